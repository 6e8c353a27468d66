//! Fluent builder for constructing a [`Simulator`].

use ob_agent::{Agent, PlacementConfig};
use ob_core::{Params, RunConfig};
use ob_epidemic::{DiseaseModel, Sird};

use crate::sim::{DEFAULT_MAX_EVENTS_PER_STEP, DEFAULT_SEED};
use crate::{SimResult, Simulator};

/// Where the initial population comes from.
enum Initial {
    Empty,
    Placed(usize),
    Given(Vec<Agent>),
}

/// Fluent builder for [`Simulator<M>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                       | Default                           |
/// |------------------------------|-----------------------------------|
/// | `.params(p)`                 | `Params::default()`               |
/// | `.seed(s)`                   | [`DEFAULT_SEED`]                  |
/// | `.placement(cfg)`            | `PlacementConfig::default()`      |
/// | `.disease(model)`            | `Sird`                            |
/// | `.max_events_per_step(n)`    | 1 000 000                         |
/// | `.check_invariants(b)`       | on in debug builds                |
/// | `.population(n)` / `.agents(v)` | no agents                     |
///
/// # Example
///
/// ```rust
/// use ob_core::Params;
/// use ob_sim::SimBuilder;
///
/// let params = Params { contagiousness: 0.0, ..Params::default() };
/// let mut sim = SimBuilder::new()
///     .params(params)
///     .seed(7)
///     .population(50)
///     .build()
///     .unwrap();
/// sim.step(1.0).unwrap();
/// assert_eq!(sim.tally().infected, 1);
/// ```
pub struct SimBuilder<M: DiseaseModel = Sird> {
    params:     Params,
    seed:       u64,
    placement:  PlacementConfig,
    model:      M,
    max_events: usize,
    check:      bool,
    initial:    Initial,
}

impl SimBuilder<Sird> {
    pub fn new() -> Self {
        Self {
            params:     Params::default(),
            seed:       DEFAULT_SEED,
            placement:  PlacementConfig::default(),
            model:      Sird,
            max_events: DEFAULT_MAX_EVENTS_PER_STEP,
            check:      cfg!(debug_assertions),
            initial:    Initial::Empty,
        }
    }
}

impl Default for SimBuilder<Sird> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: DiseaseModel> SimBuilder<M> {
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Take seed and population size from a batch configuration.
    pub fn run_config(self, config: &RunConfig) -> Self {
        self.seed(config.seed).population(config.population)
    }

    pub fn placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    /// Swap the epidemic rules.
    pub fn disease<N: DiseaseModel>(self, model: N) -> SimBuilder<N> {
        SimBuilder {
            params:     self.params,
            seed:       self.seed,
            placement:  self.placement,
            model,
            max_events: self.max_events,
            check:      self.check,
            initial:    self.initial,
        }
    }

    /// Safety cap on events resolved in one `step`; exceeding it is a hard
    /// error.
    pub fn max_events_per_step(mut self, limit: usize) -> Self {
        self.max_events = limit;
        self
    }

    /// Run [`Simulator::check_invariants`] after every step.
    pub fn check_invariants(mut self, enabled: bool) -> Self {
        self.check = enabled;
        self
    }

    /// Place `n` agents with `create_population` on build.
    pub fn population(mut self, n: usize) -> Self {
        self.initial = Initial::Placed(n);
        self
    }

    /// Install these agents with `set_agents` on build.
    pub fn agents(mut self, agents: Vec<Agent>) -> Self {
        self.initial = Initial::Given(agents);
        self
    }

    /// Validate the parameters, create the population, and return a
    /// ready-to-step [`Simulator`].
    pub fn build(self) -> SimResult<Simulator<M>> {
        let mut sim = Simulator::with_model(self.model, self.seed);
        sim.set_params(self.params)?;
        sim.set_placement(self.placement);
        sim.max_events_per_step = self.max_events;
        sim.check_each_step = self.check;

        match self.initial {
            Initial::Empty => {}
            Initial::Placed(n) => {
                sim.create_population(n)?;
            }
            Initial::Given(agents) => sim.set_agents(agents)?,
        }
        Ok(sim)
    }
}

//! The `Simulator` struct and its event loop.

use ob_agent::{Agent, HealthState, PlacementConfig, PopulationBuilder, patient_zero, random_velocity};
use ob_core::params::{check_fraction, check_positive};
use ob_core::rng::agent_rngs;
use ob_core::{AgentId, AgentRng, Params, RunConfig, SimRng, Vec2};
use ob_epidemic::{DiseaseContext, DiseaseModel, Sird, advance_infections, contact_pair};
use ob_event::{Bounds, Event, EventQueue, Resolved, predict_pair, predict_wall, resolve};

use crate::{NoopObserver, SimError, SimObserver, SimResult, Snapshot, Tally};

/// Seed used by [`Simulator::new`].
pub const DEFAULT_SEED: u64 = 42;

/// Default cap on the events one `step` may resolve.
pub const DEFAULT_MAX_EVENTS_PER_STEP: usize = 1_000_000;

/// Containment tolerance of [`Simulator::check_invariants`].
pub const CONTAINMENT_TOLERANCE: f64 = 1e-6;

/// Non-overlap tolerance of [`Simulator::check_invariants`].
pub const OVERLAP_TOLERANCE: f64 = 1e-4;

// ── Simulator ─────────────────────────────────────────────────────────────────

/// The arena, its population, and the pending collisions.
///
/// `Simulator<M>` advances time with [`step`](Self::step): every predicted
/// wall or pair contact inside the step is resolved in time order, agents
/// drift in straight lines between contacts, and the disease model `M` sees
/// every pair contact and the elapsed time.
///
/// Create via [`Simulator::new`] for the defaults or
/// [`SimBuilder`][crate::SimBuilder] for anything else.
pub struct Simulator<M: DiseaseModel = Sird> {
    params:    Params,
    placement: PlacementConfig,
    model:     M,
    seed:      u64,

    agents: Vec<Agent>,
    rngs:   Vec<AgentRng>,
    rng:    SimRng,
    queue:  EventQueue,

    /// Arena the current population was placed in.  `params.width/height`
    /// only take effect at the next population change.
    bounds:    Bounds,
    /// Per-axis bound for velocities drawn when lockdown releases an agent.
    max_speed: f64,
    requested: usize,

    current_time: f64,

    pub(crate) max_events_per_step: usize,
    pub(crate) check_each_step:     bool,
    poisoned: bool,
}

impl Simulator<Sird> {
    /// Empty arena with default parameters, SIRD rules and [`DEFAULT_SEED`].
    pub fn new() -> Self {
        Self::with_model(Sird, DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_model(Sird, seed)
    }
}

impl Default for Simulator<Sird> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: DiseaseModel> Simulator<M> {
    /// Empty arena with default parameters and the given disease model.
    pub fn with_model(model: M, seed: u64) -> Self {
        let params = Params::default();
        Self {
            bounds: Bounds::new(params.width, params.height),
            params,
            placement: PlacementConfig::default(),
            model,
            seed,
            agents: Vec::new(),
            rngs: Vec::new(),
            rng: SimRng::new(seed),
            queue: EventQueue::new(0),
            max_speed: 0.0,
            requested: 0,
            current_time: 0.0,
            max_events_per_step: DEFAULT_MAX_EVENTS_PER_STEP,
            check_each_step: cfg!(debug_assertions),
            poisoned: false,
        }
    }

    pub(crate) fn set_params(&mut self, params: Params) -> SimResult<()> {
        params.validate()?;
        self.params = params;
        self.bounds = Bounds::new(self.params.width, self.params.height);
        Ok(())
    }

    pub(crate) fn set_placement(&mut self, placement: PlacementConfig) {
        self.placement = placement;
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    /// `N`, the number of agents actually placed.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// How many agents the last `create_population` asked for.
    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Live events currently predicted.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.current_time, &self.agents)
    }

    pub fn tally(&self) -> Tally {
        Tally::from_agents(&self.agents)
    }

    /// `Σ (vx² + vy²)` over the population.
    pub fn kinetic_energy(&self) -> f64 {
        self.agents.iter().map(Agent::speed2).sum()
    }

    // ── Parameter setters ─────────────────────────────────────────────────
    //
    // Each setter rejects an out-of-range value and keeps the old one.

    /// Arena width for the next `create_population`.
    pub fn set_width(&mut self, width: f64) -> SimResult<()> {
        self.params.width = check_positive("width", width)?;
        Ok(())
    }

    /// Arena height for the next `create_population`.
    pub fn set_height(&mut self, height: f64) -> SimResult<()> {
        self.params.height = check_positive("height", height)?;
        Ok(())
    }

    pub fn set_duration(&mut self, duration: f64) -> SimResult<()> {
        self.params.duration = check_positive("duration", duration)?;
        Ok(())
    }

    pub fn set_contagiousness(&mut self, contagiousness: f64) -> SimResult<()> {
        self.params.contagiousness = check_fraction("contagiousness", contagiousness)?;
        Ok(())
    }

    pub fn set_lethality(&mut self, lethality: f64) -> SimResult<()> {
        self.params.lethality = check_fraction("lethality", lethality)?;
        Ok(())
    }

    pub fn set_simulation_speed(&mut self, speed: f64) -> SimResult<()> {
        self.params.simulation_speed = check_positive("simulation_speed", speed)?;
        Ok(())
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Replace the population with up to `n` freshly placed agents.
    ///
    /// Slots with index below `n · lockdown` (the requested `n`) start
    /// locked, the agent nearest the arena centre becomes patient zero, and
    /// the queue is rebuilt at the current time.  Returns the
    /// number of agents actually placed, which is smaller than `n` in an
    /// overcrowded arena.
    ///
    /// Clears a poisoned state.
    pub fn create_population(&mut self, n: usize) -> SimResult<usize> {
        self.bounds = Bounds::new(self.params.width, self.params.height);
        let population = PopulationBuilder::new(n, self.params.width, self.params.height)
            .lockdown(self.params.lockdown)
            .config(self.placement.clone())
            .build(&mut self.rng);

        self.requested = n;
        self.max_speed = population.max_speed;
        self.agents = population.agents;
        self.rngs = agent_rngs(self.agents.len(), self.seed);

        if let Some(id) = patient_zero(&self.agents, self.params.center()) {
            self.agents[id.index()].set_state(HealthState::Infected);
            log::debug!("patient zero is {id}");
        }

        self.poisoned = false;
        self.rebuild_queue().map_err(|e| self.poison(e))?;
        Ok(self.agents.len())
    }

    /// Install a hand-built population.
    ///
    /// Agents are re-indexed `0..len` in the given order.  Dead or locked
    /// agents have their velocity zeroed.  Nobody is infected automatically
    /// and the lockdown fraction is not applied.  The population must fit the
    /// arena `params.width × params.height` without overlaps.
    ///
    /// Clears a poisoned state.
    pub fn set_agents(&mut self, agents: Vec<Agent>) -> SimResult<()> {
        self.bounds = Bounds::new(self.params.width, self.params.height);
        self.agents = agents;
        let mut max_radius: f64 = 0.0;
        for (i, agent) in self.agents.iter_mut().enumerate() {
            agent.id = AgentId(i as u32);
            if agent.state == HealthState::Dead || agent.locked {
                agent.vel = Vec2::ZERO;
            }
            max_radius = max_radius.max(agent.radius);
        }
        self.requested = self.agents.len();
        self.max_speed = self.placement.speed_factor * max_radius;
        self.rngs = agent_rngs(self.agents.len(), self.seed);

        self.poisoned = false;
        let checked = self.validate_agents().and_then(|()| self.rebuild_queue());
        checked.map_err(|e| self.poison(e))
    }

    fn validate_agents(&self) -> SimResult<()> {
        for agent in &self.agents {
            if !(agent.radius.is_finite() && agent.radius > 0.0) {
                return Err(SimError::InvariantViolation(format!(
                    "{} has radius {}", agent.id, agent.radius,
                )));
            }
            if !(agent.pos.is_finite() && agent.vel.is_finite()) {
                return Err(SimError::InvariantViolation(format!(
                    "{} has a non-finite position or velocity", agent.id,
                )));
            }
        }
        self.check_invariants()
    }

    /// Reset the clock to zero and re-predict every event.
    ///
    /// Clears a poisoned state.
    pub fn start(&mut self) -> SimResult<()> {
        self.current_time = 0.0;
        self.poisoned = false;
        self.rebuild_queue().map_err(|e| self.poison(e))
    }

    /// Lock the first `p · N` agents by index and release the rest.
    ///
    /// Newly locked agents stop; newly released ones draw a fresh velocity in
    /// `[−v, v]²` (dead agents stay still).  Every prediction is redone.
    pub fn set_lockdown(&mut self, p: f64) -> SimResult<()> {
        if self.poisoned {
            return Err(SimError::Poisoned);
        }
        self.params.lockdown = check_fraction("lockdown", p)?;

        let locked_below = p * self.agents.len() as f64;
        let (mut frozen, mut released) = (0usize, 0usize);
        for (i, agent) in self.agents.iter_mut().enumerate() {
            let lock = (i as f64) < locked_below;
            if lock == agent.locked {
                continue;
            }
            if lock {
                agent.lock();
                frozen += 1;
            } else {
                agent.unlock(random_velocity(self.max_speed, &mut self.rng));
                released += 1;
            }
        }
        log::debug!("lockdown {p}: froze {frozen}, released {released}");

        self.rebuild_queue().map_err(|e| self.poison(e))
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance simulated time by `dt`.
    ///
    /// `step(0.0)` changes nothing.  A hard error poisons the simulator.
    pub fn step(&mut self, dt: f64) -> SimResult<()> {
        self.step_observed(dt, &mut NoopObserver)
    }

    /// Advance by `wall_dt · simulation_speed` simulated seconds.
    pub fn step_wall_clock(&mut self, wall_dt: f64) -> SimResult<()> {
        self.step(wall_dt * self.params.simulation_speed)
    }

    /// [`step`](Self::step), reporting events and transitions to `observer`.
    pub fn step_observed<O: SimObserver>(&mut self, dt: f64, observer: &mut O) -> SimResult<()> {
        if self.poisoned {
            return Err(SimError::Poisoned);
        }
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimError::InvalidStep(dt));
        }
        if dt == 0.0 {
            return Ok(());
        }

        let result = self
            .process_step(dt, observer)
            .and_then(|()| if self.check_each_step { self.check_invariants() } else { Ok(()) });
        result.map_err(|e| self.poison(e))
    }

    /// Step until `config.total_time` simulated seconds have passed.
    ///
    /// The last step is shortened so the run ends exactly on the horizon.
    /// Uses the current population; seed and population size in `config`
    /// are for [`SimBuilder::run_config`][crate::SimBuilder::run_config].
    pub fn run<O: SimObserver>(&mut self, config: &RunConfig, observer: &mut O) -> SimResult<()> {
        config.validate()?;
        let end = self.current_time + config.total_time;
        let interval = config.snapshot_interval_steps;

        observer.on_run_start(&self.snapshot());
        for step in 1..=config.step_count() {
            let dt = config.step_dt.min(end - self.current_time).max(0.0);
            self.step_observed(dt, observer)?;
            observer.on_step_end(step, self.current_time, &self.tally());
            if interval > 0 && step % interval == 0 {
                observer.on_snapshot(&self.snapshot());
            }
        }
        observer.on_run_end(self.current_time, &self.tally());
        Ok(())
    }

    fn process_step<O: SimObserver>(&mut self, dt: f64, observer: &mut O) -> SimResult<()> {
        let mut old_time = self.current_time;
        let target = old_time + dt;
        self.current_time = target;

        // ── Events inside (old_time, target] in time order ────────────────
        let mut processed = 0usize;
        // Agents resolved at `old_time` so far.
        let mut last: Vec<AgentId> = Vec::new();
        while let Some(&event) = self.queue.peek_min() {
            let t = event.time();
            if t > target {
                break;
            }
            // Ties are legal only between contacts sharing no agent.
            let tie_ok = processed > 0 && !last.iter().any(|&id| event.involves(id));
            if t < old_time || (t == old_time && !tie_ok) {
                return Err(SimError::LostMonotonicity { event_time: t, old_time });
            }
            processed += 1;
            if processed > self.max_events_per_step {
                return Err(SimError::EventBudgetExceeded { limit: self.max_events_per_step, time: t });
            }
            self.queue.pop_min();

            if t > old_time {
                last.clear();
            }
            self.drift(t - old_time);
            old_time = t;
            log::trace!("{event}");
            observer.on_event(&event);

            let resolved = resolve(&event, &mut self.agents);
            let touched = resolved.to_vec();
            self.queue.remove_all_referring_to(&touched);
            self.predict_for(&touched, t)?;
            last.extend(touched);

            if let Resolved::Pair(a, b) = resolved {
                let ctx = DiseaseContext::new(t, &self.params);
                for transition in contact_pair(&self.model, &mut self.agents, &mut self.rngs, a, b, &ctx) {
                    observer.on_transition(&transition);
                }
            }
        }
        self.drift(target - old_time);

        // ── Elapsed-time transitions ──────────────────────────────────────
        let ctx = DiseaseContext::new(target, &self.params);
        let transitions = advance_infections(&self.model, &mut self.agents, &mut self.rngs, dt, &ctx);
        let mut died = Vec::new();
        for transition in &transitions {
            observer.on_transition(transition);
            if transition.is_death() {
                died.push(transition.agent);
            }
        }

        // The dead stopped moving: their old predictions no longer hold.
        if !died.is_empty() {
            self.queue.remove_all_referring_to(&died);
            self.predict_for(&died, target)?;
        }
        Ok(())
    }

    #[inline]
    fn drift(&mut self, dt: f64) {
        if dt > 0.0 {
            for agent in &mut self.agents {
                agent.advance(dt);
            }
        }
    }

    // ── Prediction ────────────────────────────────────────────────────────

    /// Insert fresh wall and pair predictions for every agent in `ids`.
    ///
    /// Walls are settled for all of `ids` before any pair is predicted, so
    /// pair predictions see the final velocities.  A pair of two agents from
    /// `ids` is predicted once.
    fn predict_for(&mut self, ids: &[AgentId], now: f64) -> SimResult<()> {
        for &id in ids {
            self.settle_wall(id, now);
        }
        for (k, &id) in ids.iter().enumerate() {
            let agent = &self.agents[id.index()];
            for other in &self.agents {
                if other.id == id || ids[..k].contains(&other.id) {
                    continue;
                }
                if let Some(event) = predict_pair(agent, other, now)? {
                    self.queue.insert(event);
                }
            }
        }
        Ok(())
    }

    /// Queue the next wall contact of `id`.
    ///
    /// A contact due at `now` (an agent on or a hair past its wall, moving
    /// out) is reflected on the spot instead of queued, so every queued
    /// event lies strictly after the time it was predicted at.
    fn settle_wall(&mut self, id: AgentId, now: f64) {
        let agent = &mut self.agents[id.index()];
        // One reflection per axis at most.
        for _ in 0..2 {
            match predict_wall(agent, now, self.bounds) {
                Some(Event::Wall { t, wall, .. }) if t <= now => {
                    log::trace!("t={now:.6} {id} settled against {wall} wall");
                    agent.reflect(wall.normal(), 1.0);
                }
                Some(event) => {
                    self.queue.insert(event);
                    return;
                }
                None => return,
            }
        }
        if let Some(event) = predict_wall(agent, now, self.bounds).filter(|e| e.time() > now) {
            self.queue.insert(event);
        }
    }

    /// Drop every prediction and redo all walls and all pairs at
    /// `current_time`.
    fn rebuild_queue(&mut self) -> SimResult<()> {
        self.queue.reset(self.agents.len());
        let now = self.current_time;
        for i in 0..self.agents.len() {
            self.settle_wall(AgentId(i as u32), now);
        }
        for (i, agent) in self.agents.iter().enumerate() {
            for other in &self.agents[i + 1..] {
                if let Some(event) = predict_pair(agent, other, now)? {
                    self.queue.insert(event);
                }
            }
        }
        log::debug!(
            "rebuilt event queue at t={now}: {} events for {} agents",
            self.queue.len(),
            self.agents.len(),
        );
        Ok(())
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    /// Verify containment (within 1e-6) and pairwise non-overlap (within
    /// 1e-4).  O(N²).
    pub fn check_invariants(&self) -> SimResult<()> {
        for agent in &self.agents {
            if !self.bounds.contains(agent.pos, agent.radius, CONTAINMENT_TOLERANCE) {
                return Err(SimError::InvariantViolation(format!(
                    "{} at ({:.6}, {:.6}) with radius {} leaves the {}x{} arena",
                    agent.id, agent.pos.x, agent.pos.y, agent.radius,
                    self.bounds.width, self.bounds.height,
                )));
            }
        }
        for (i, a) in self.agents.iter().enumerate() {
            for b in &self.agents[i + 1..] {
                let gap = a.dist2(b).sqrt() - (a.radius + b.radius);
                if gap < -OVERLAP_TOLERANCE {
                    return Err(SimError::InvariantViolation(format!(
                        "{} and {} overlap by {:.6}", a.id, b.id, -gap,
                    )));
                }
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn queue_mut(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    fn poison(&mut self, error: SimError) -> SimError {
        if error.is_fatal() {
            log::error!("simulator poisoned at t={}: {error}", self.current_time);
            self.poisoned = true;
        }
        error
    }
}

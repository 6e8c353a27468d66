//! The default model: susceptible → infected → recovered | dead.

use ob_agent::{Agent, HealthState};
use ob_core::AgentRng;

use crate::{DiseaseContext, DiseaseModel, Transition};

/// SIRD rules driven by [`Params`][ob_core::Params]:
///
/// - **Contact**: an `Infected` source turns a `Susceptible` target
///   `Infected` with probability `contagiousness`.  Any other pairing is a
///   no-op and draws nothing.
/// - **Elapsed time**: an `Infected` agent accumulates `infection_elapsed`;
///   once it exceeds `duration` the agent dies with probability `lethality`
///   and recovers otherwise.
///
/// There is no latent period: an agent is infectious from the moment it is
/// infected.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sird;

impl DiseaseModel for Sird {
    fn on_contact(
        &self,
        source: &Agent,
        target: &mut Agent,
        ctx:    &DiseaseContext<'_>,
        rng:    &mut AgentRng,
    ) -> Option<Transition> {
        if target.state != HealthState::Susceptible || source.state != HealthState::Infected {
            return None;
        }
        if !rng.gen_bool(ctx.params.contagiousness) {
            return None;
        }
        target.set_state(HealthState::Infected);
        Some(Transition {
            agent: target.id,
            from:  HealthState::Susceptible,
            to:    HealthState::Infected,
            time:  ctx.time,
        })
    }

    fn on_elapsed(
        &self,
        agent: &mut Agent,
        dt:    f64,
        ctx:   &DiseaseContext<'_>,
        rng:   &mut AgentRng,
    ) -> Option<Transition> {
        if agent.state != HealthState::Infected {
            return None;
        }
        agent.infection_elapsed += dt;
        if agent.infection_elapsed <= ctx.params.duration {
            return None;
        }
        let outcome = if rng.gen_bool(ctx.params.lethality) {
            HealthState::Dead
        } else {
            HealthState::Recovered
        };
        agent.set_state(outcome);
        Some(Transition {
            agent: agent.id,
            from:  HealthState::Infected,
            to:    outcome,
            time:  ctx.time,
        })
    }
}

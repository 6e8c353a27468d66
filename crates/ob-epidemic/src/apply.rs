//! Population-level drivers that route callbacks to the right agents and
//! RNG streams.

use ob_agent::Agent;
use ob_core::{AgentId, AgentRng};

use crate::{DiseaseContext, DiseaseModel, Transition};

/// Give `a` and `b` the chance to infect each other after they collide.
///
/// Both orderings are evaluated, `a` on `b` first.  With the SIRD rules at
/// most one of them can fire.
pub fn contact_pair<M: DiseaseModel>(
    model:  &M,
    agents: &mut [Agent],
    rngs:   &mut [AgentRng],
    a:      AgentId,
    b:      AgentId,
    ctx:    &DiseaseContext<'_>,
) -> Vec<Transition> {
    let mut out = Vec::new();
    for (source, target) in [(a, b), (b, a)] {
        let source_agent = agents[source.index()].clone();
        let target_agent = &mut agents[target.index()];
        let rng = &mut rngs[target.index()];
        if let Some(t) = model.on_contact(&source_agent, target_agent, ctx, rng) {
            log::debug!("{t} (contact with {source})");
            out.push(t);
        }
    }
    out
}

/// Let `dt` simulated seconds pass for every agent, in index order.
pub fn advance_infections<M: DiseaseModel>(
    model:  &M,
    agents: &mut [Agent],
    rngs:   &mut [AgentRng],
    dt:     f64,
    ctx:    &DiseaseContext<'_>,
) -> Vec<Transition> {
    let mut out = Vec::new();
    for (agent, rng) in agents.iter_mut().zip(rngs.iter_mut()) {
        if let Some(t) = model.on_elapsed(agent, dt, ctx, rng) {
            log::debug!("{t}");
            out.push(t);
        }
    }
    out
}

//! The `DiseaseModel` trait: the extension point for epidemic rules.

use ob_agent::Agent;
use ob_core::AgentRng;

use crate::{DiseaseContext, Transition};

/// Pluggable epidemic rules.
///
/// Implementations decide state changes and apply them to the agent they are
/// handed (via [`Agent::set_state`], which also zeroes the velocity of the
/// dead).  They must not move agents or touch velocities otherwise: the
/// simulator re-predicts collisions only for agents that report a death.
///
/// # Example
///
/// ```rust
/// use ob_agent::Agent;
/// use ob_core::AgentRng;
/// use ob_epidemic::{DiseaseContext, DiseaseModel, Transition};
///
/// /// Nobody ever gets sick.
/// struct Immune;
///
/// impl DiseaseModel for Immune {
///     fn on_contact(
///         &self,
///         _source: &Agent,
///         _target: &mut Agent,
///         _ctx:    &DiseaseContext<'_>,
///         _rng:    &mut AgentRng,
///     ) -> Option<Transition> {
///         None
///     }
///
///     fn on_elapsed(
///         &self,
///         _agent: &mut Agent,
///         _dt:    f64,
///         _ctx:   &DiseaseContext<'_>,
///         _rng:   &mut AgentRng,
///     ) -> Option<Transition> {
///         None
///     }
/// }
/// ```
pub trait DiseaseModel: Send + Sync + 'static {
    /// `source` has just collided with `target`; possibly change `target`.
    ///
    /// `rng` is `target`'s own stream.
    fn on_contact(
        &self,
        source: &Agent,
        target: &mut Agent,
        ctx:    &DiseaseContext<'_>,
        rng:    &mut AgentRng,
    ) -> Option<Transition>;

    /// `dt` simulated seconds have passed for `agent`.
    ///
    /// `rng` is `agent`'s own stream.
    fn on_elapsed(
        &self,
        agent: &mut Agent,
        dt:    f64,
        ctx:   &DiseaseContext<'_>,
        rng:   &mut AgentRng,
    ) -> Option<Transition>;
}

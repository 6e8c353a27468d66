//! Elastic reflection for a resolved event.

use ob_agent::Agent;
use ob_core::AgentId;

use crate::Event;

/// The agents whose velocity a resolved event changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    Single(AgentId),
    Pair(AgentId, AgentId),
}

impl Resolved {
    /// The reflected agents, first agent first.
    pub fn iter(&self) -> impl Iterator<Item = AgentId> {
        let (a, b) = match *self {
            Resolved::Single(a)  => (a, None),
            Resolved::Pair(a, b) => (a, Some(b)),
        };
        std::iter::once(a).chain(b)
    }

    pub fn to_vec(&self) -> Vec<AgentId> {
        self.iter().collect()
    }

    /// `true` for agent–agent contacts, the only ones that can transmit.
    pub fn is_pair(&self) -> bool {
        matches!(self, Resolved::Pair(..))
    }
}

/// Apply `event` to `agents` (indexed by `AgentId`).
///
/// A wall event reflects its agent along the wall's inward normal.  A pair
/// event reflects `a` with sign `+1` and `b` with sign `−1` along the shared
/// `a → b` normal; each agent keeps its speed, and a stationary participant
/// stays stationary.
pub fn resolve(event: &Event, agents: &mut [Agent]) -> Resolved {
    match *event {
        Event::Wall { agent, wall, .. } => {
            agents[agent.index()].reflect(wall.normal(), 1.0);
            Resolved::Single(agent)
        }
        Event::Pair { a, b, normal, .. } => {
            let (first, second) = pair_mut(agents, a.index(), b.index());
            first.reflect(normal, 1.0);
            second.reflect(normal, -1.0);
            Resolved::Pair(a, b)
        }
    }
}

/// Two disjoint mutable borrows into `agents`.
///
/// # Panics
/// Panics if `i == j` or either index is out of bounds.
pub fn pair_mut(agents: &mut [Agent], i: usize, j: usize) -> (&mut Agent, &mut Agent) {
    assert_ne!(i, j, "pair event references the same agent twice");
    if i < j {
        let (lo, hi) = agents.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = agents.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

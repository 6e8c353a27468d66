//! Epidemic state of a single agent.

use std::fmt;

/// Where an agent is in the susceptible → infected → {recovered, dead} chain.
///
/// The discriminants match the integer codes front-ends use for colouring
/// and tallying (`0..=3`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum HealthState {
    #[default]
    Susceptible = 0,
    Infected    = 1,
    Recovered   = 2,
    Dead        = 3,
}

impl HealthState {
    /// All states in code order; handy for building histograms.
    pub const ALL: [HealthState; 4] = [
        HealthState::Susceptible,
        HealthState::Infected,
        HealthState::Recovered,
        HealthState::Dead,
    ];

    /// Integer code (`0..=3`).
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `Recovered` and `Dead` never change again.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, HealthState::Recovered | HealthState::Dead)
    }

    /// Whether `self → next` is a legal transition.
    pub fn can_become(self, next: HealthState) -> bool {
        matches!(
            (self, next),
            (HealthState::Susceptible, HealthState::Infected)
                | (HealthState::Infected, HealthState::Recovered)
                | (HealthState::Infected, HealthState::Dead)
        )
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthState::Susceptible => "susceptible",
            HealthState::Infected    => "infected",
            HealthState::Recovered   => "recovered",
            HealthState::Dead        => "dead",
        };
        f.write_str(s)
    }
}

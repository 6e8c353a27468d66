//! Event and arena-boundary types.

use std::fmt;

use ob_core::{AgentId, Vec2};

/// The rectangle `[0, width] × [0, height]` agents live in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width:  f64,
    pub height: f64,
}

impl Bounds {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `true` if a disc of `radius` at `pos` lies inside, allowing `tol` slack.
    #[inline]
    pub fn contains(&self, pos: Vec2, radius: f64, tol: f64) -> bool {
        pos.x >= radius - tol
            && pos.x <= self.width - radius + tol
            && pos.y >= radius - tol
            && pos.y <= self.height - radius + tol
    }
}

/// One of the four arena walls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Wall {
    /// `x = 0`
    Left,
    /// `x = width`
    Right,
    /// `y = 0`
    Bottom,
    /// `y = height`
    Top,
}

impl Wall {
    /// Unit normal pointing into the arena.
    #[inline]
    pub fn normal(self) -> Vec2 {
        match self {
            Wall::Left   => Vec2::new(1.0, 0.0),
            Wall::Right  => Vec2::new(-1.0, 0.0),
            Wall::Bottom => Vec2::new(0.0, 1.0),
            Wall::Top    => Vec2::new(0.0, -1.0),
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Wall::Left   => "left",
            Wall::Right  => "right",
            Wall::Bottom => "bottom",
            Wall::Top    => "top",
        };
        f.write_str(s)
    }
}

/// A predicted geometric contact at absolute simulated time `t`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    /// `agent` touches `wall`.
    Wall {
        t:     f64,
        agent: AgentId,
        wall:  Wall,
    },

    /// `a` and `b` touch; `normal` is the unit vector from `a` to `b` at
    /// the moment of contact.
    Pair {
        t:      f64,
        a:      AgentId,
        b:      AgentId,
        normal: Vec2,
    },
}

impl Event {
    /// Absolute simulated time of the contact.
    #[inline]
    pub fn time(&self) -> f64 {
        match *self {
            Event::Wall { t, .. } | Event::Pair { t, .. } => t,
        }
    }

    /// Collision normal: the wall's inward normal, or `a → b` for pairs.
    #[inline]
    pub fn normal(&self) -> Vec2 {
        match *self {
            Event::Wall { wall, .. }   => wall.normal(),
            Event::Pair { normal, .. } => normal,
        }
    }

    /// The first agent and, for pair events, the second.
    #[inline]
    pub fn agents(&self) -> (AgentId, Option<AgentId>) {
        match *self {
            Event::Wall { agent, .. } => (agent, None),
            Event::Pair { a, b, .. }  => (a, Some(b)),
        }
    }

    /// `true` if `agent` takes part in this event.
    #[inline]
    pub fn involves(&self, agent: AgentId) -> bool {
        let (a, b) = self.agents();
        a == agent || b == Some(agent)
    }

    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, Event::Pair { .. })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Wall { t, agent, wall } => write!(f, "t={t:.6} {agent} hits {wall} wall"),
            Event::Pair { t, a, b, .. }    => write!(f, "t={t:.6} {a} meets {b}"),
        }
    }
}

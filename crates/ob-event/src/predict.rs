//! Analytic prediction of the next wall or pair contact.
//!
//! Both predictors take the current absolute time `now` and return events
//! stamped with absolute times: `t > now` for pairs, `t >= now` for walls.
//! Neither mutates anything.

use ob_agent::Agent;
use ob_core::Vec2;

use crate::{Bounds, Event, EventError, EventResult, Wall};

/// Largest `| |Δp′| − (ra + rb) |` at a predicted contact that is treated as
/// round-off.  Larger residuals are logged in debug builds.
pub const CONTACT_RESIDUAL_TOLERANCE: f64 = 1e-4;

/// How far into the past an approaching, overlapping pair may have started
/// touching before it counts as a missed collision rather than round-off.
pub const OVERLAP_TOLERANCE_SECS: f64 = 0.01;

// ── Wall ──────────────────────────────────────────────────────────────────────

/// Earliest contact of `agent` with one of the four walls of `bounds`, or
/// `None` if the agent is stationary.
///
/// Per axis with non-zero velocity the candidate is the time to reach the
/// wall the agent moves toward; the smaller candidate wins, `x` on ties.
/// A negative candidate (an agent already a hair past its wall from
/// floating-point drift) is clamped to zero so the reflection happens now.
pub fn predict_wall(agent: &Agent, now: f64, bounds: Bounds) -> Option<Event> {
    let r = agent.radius;
    let Vec2 { x, y } = agent.pos;
    let Vec2 { x: vx, y: vy } = agent.vel;

    let mut best: Option<(f64, Wall)> = None;
    let mut consider = |dt: f64, wall: Wall| {
        let dt = dt.max(0.0);
        if best.is_none_or(|(best_dt, _)| dt < best_dt) {
            best = Some((dt, wall));
        }
    };

    if vx < 0.0 {
        consider((r - x) / vx, Wall::Left);
    } else if vx > 0.0 {
        consider((bounds.width - r - x) / vx, Wall::Right);
    }
    if vy < 0.0 {
        consider((r - y) / vy, Wall::Bottom);
    } else if vy > 0.0 {
        consider((bounds.height - r - y) / vy, Wall::Top);
    }

    best.map(|(dt, wall)| Event::Wall { t: now + dt, agent: agent.id, wall })
}

// ── Pair ──────────────────────────────────────────────────────────────────────

/// Earliest future contact between `a` and `b`.
///
/// Solves `|Δp + Δv·τ|² = (ra + rb)²` for `τ` with
///
/// ```text
/// A = Δv·Δv    B = Δp·Δv    C = Δp·Δp − (ra + rb)²    D = B² − A·C
/// τ0 = (−B − √D) / A        τ1 = (−B + √D) / A
/// ```
///
/// | Case                                     | Result                        |
/// |------------------------------------------|-------------------------------|
/// | `A = 0` (same velocity) or `D ≤ 0`       | `Ok(None)`                    |
/// | `τ1 ≤ 0` (contact entirely past)         | `Ok(None)`                    |
/// | `τ0 > 0` and `now + τ0 > now`            | event at `now + τ0`           |
/// | `τ0` within round-off of `now`           | `Ok(None)`                    |
/// | `τ0 ≤ 0 < τ1`, separating (`B ≥ 0`)      | `Ok(None)`                    |
/// | `τ0 ≤ 0 < τ1`, approaching, `−τ0 ≤ 0.01` | `Ok(None)`                    |
/// | `τ0 ≤ 0 < τ1`, approaching, `−τ0 > 0.01` | `Err(EventError::Overlap)`    |
///
/// Every returned event is strictly later than `now`.  A separating pair
/// is never an error: right after a bounce `τ0` extrapolates back through
/// the pre-bounce path and can sit far in the past while the overlap itself
/// is round-off.
///
/// The normal is the unit vector from `a` to `b` at the contact point.
pub fn predict_pair(a: &Agent, b: &Agent, now: f64) -> EventResult<Option<Event>> {
    let dp = b.pos - a.pos;
    let dv = b.vel - a.vel;
    let d = a.radius + b.radius;

    let qa = dv.norm2();
    if qa == 0.0 {
        return Ok(None);
    }
    let qb = dp.dot(dv);
    let qc = dp.norm2() - d * d;

    let disc = qb * qb - qa * qc;
    if disc <= 0.0 {
        return Ok(None);
    }
    let q = disc.sqrt();
    let t0 = (-qb - q) / qa;
    let t1 = (-qb + q) / qa;
    if !(t0.is_finite() && t1.is_finite()) || t1 <= 0.0 {
        return Ok(None);
    }

    if t0 <= 0.0 {
        // Already touching or overlapping.
        if qb < 0.0 && -t0 > OVERLAP_TOLERANCE_SECS {
            return Err(EventError::Overlap { a: a.id, b: b.id, overlap_secs: -t0 });
        }
        return Ok(None);
    }
    let t = now + t0;
    if t <= now {
        return Ok(None);
    }

    let contact = dp + dv * t0;
    let Some(normal) = contact.normalized() else {
        // Coincident centres cannot be resolved along any direction.
        return Err(EventError::Overlap { a: a.id, b: b.id, overlap_secs: 0.0 });
    };

    if cfg!(debug_assertions) {
        let residual = (contact.norm() - d).abs();
        if residual > CONTACT_RESIDUAL_TOLERANCE {
            log::warn!(
                "contact residual {residual:.3e} for {} / {} at t={:.6}",
                a.id, b.id, t,
            );
        }
    }

    Ok(Some(Event::Pair { t, a: a.id, b: b.id, normal }))
}

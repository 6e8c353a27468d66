//! Unit tests for ob-event.

use ob_agent::Agent;
use ob_core::{AgentId, Vec2};

use crate::{Bounds, Event, EventError, EventQueue, Wall, predict_pair, predict_wall, resolve};

// ── Helpers ───────────────────────────────────────────────────────────────────

const ARENA: Bounds = Bounds { width: 400.0, height: 400.0 };

fn mover(i: u32, x: f64, y: f64, vx: f64, vy: f64) -> Agent {
    Agent::new(AgentId(i), Vec2::new(x, y), 4.0).with_velocity(Vec2::new(vx, vy))
}

fn wall_event(t: f64, i: u32) -> Event {
    Event::Wall { t, agent: AgentId(i), wall: Wall::Left }
}

fn pair_event(t: f64, a: u32, b: u32) -> Event {
    Event::Pair { t, a: AgentId(a), b: AgentId(b), normal: Vec2::new(1.0, 0.0) }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[cfg(test)]
mod wall_prediction {
    use super::*;

    #[test]
    fn heading_right() {
        let a = mover(0, 50.0, 200.0, 10.0, 0.0);
        let ev = predict_wall(&a, 0.0, ARENA).unwrap();
        // (W − r − x0) / vx = (400 − 4 − 50) / 10
        assert!(close(ev.time(), 34.6));
        assert_eq!(ev, Event::Wall { t: ev.time(), agent: AgentId(0), wall: Wall::Right });
        assert_eq!(ev.normal(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn heading_left_is_offset_by_now() {
        let a = mover(0, 50.0, 200.0, -10.0, 0.0);
        let ev = predict_wall(&a, 7.0, ARENA).unwrap();
        assert!(close(ev.time(), 7.0 + 4.6));
        assert_eq!(ev.normal(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn vertical_axes() {
        let up = mover(0, 200.0, 300.0, 0.0, 8.0);
        let down = mover(1, 200.0, 300.0, 0.0, -8.0);
        match predict_wall(&up, 0.0, ARENA).unwrap() {
            Event::Wall { t, wall, .. } => {
                assert_eq!(wall, Wall::Top);
                assert!(close(t, 96.0 / 8.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        match predict_wall(&down, 0.0, ARENA).unwrap() {
            Event::Wall { t, wall, .. } => {
                assert_eq!(wall, Wall::Bottom);
                assert!(close(t, 296.0 / 8.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(Wall::Bottom.normal(), Vec2::new(0.0, 1.0));
        assert_eq!(Wall::Top.normal(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn nearer_axis_wins() {
        // x wall in 34.6 s, y wall in 1 s.
        let a = mover(0, 50.0, 386.0, 10.0, 10.0);
        match predict_wall(&a, 0.0, ARENA).unwrap() {
            Event::Wall { t, wall, .. } => {
                assert_eq!(wall, Wall::Top);
                assert!(close(t, 1.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn corner_tie_prefers_x() {
        let a = mover(0, 386.0, 386.0, 10.0, 10.0);
        match predict_wall(&a, 0.0, ARENA).unwrap() {
            Event::Wall { wall, .. } => assert_eq!(wall, Wall::Right),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn stationary_has_no_wall_event() {
        let a = mover(0, 50.0, 50.0, 0.0, 0.0);
        assert!(predict_wall(&a, 0.0, ARENA).is_none());
    }

    #[test]
    fn drifted_past_wall_fires_now() {
        let a = mover(0, 4.0 - 1e-12, 200.0, -5.0, 0.0);
        let ev = predict_wall(&a, 3.0, ARENA).unwrap();
        assert_eq!(ev.time(), 3.0);
    }
}

#[cfg(test)]
mod pair_prediction {
    use super::*;

    #[test]
    fn head_on() {
        let a = mover(0, 100.0, 200.0, 10.0, 0.0);
        let b = mover(1, 200.0, 200.0, -10.0, 0.0);
        let ev = predict_pair(&a, &b, 1.0).unwrap().unwrap();
        // Gap of 100 − 8 closes at 20 per second.
        assert!(close(ev.time(), 1.0 + 4.6));
        let n = ev.normal();
        assert!(close(n.x, 1.0) && close(n.y, 0.0));
        assert_eq!(ev.agents(), (AgentId(0), Some(AgentId(1))));
    }

    #[test]
    fn normal_points_from_a_to_b() {
        let a = mover(0, 200.0, 200.0, 0.0, 0.0);
        let b = mover(1, 200.0, 100.0, 0.0, 10.0);
        let ev = predict_pair(&a, &b, 0.0).unwrap().unwrap();
        let n = ev.normal();
        assert!(close(n.x, 0.0) && close(n.y, -1.0));
        assert!(close(ev.time(), 9.2));
    }

    #[test]
    fn glancing_normal_is_unit() {
        let a = mover(0, 100.0, 200.0, 10.0, 0.0);
        let b = mover(1, 200.0, 205.0, -10.0, 0.0);
        let ev = predict_pair(&a, &b, 0.0).unwrap().unwrap();
        assert!(close(ev.normal().norm(), 1.0));
        assert!(ev.normal().y > 0.0);
    }

    #[test]
    fn parallel_miss() {
        let a = mover(0, 100.0, 200.0, 10.0, 0.0);
        let b = mover(1, 200.0, 220.0, -10.0, 0.0);
        assert_eq!(predict_pair(&a, &b, 0.0), Ok(None));
    }

    #[test]
    fn moving_apart() {
        let a = mover(0, 100.0, 200.0, -10.0, 0.0);
        let b = mover(1, 200.0, 200.0, 10.0, 0.0);
        assert_eq!(predict_pair(&a, &b, 0.0), Ok(None));
    }

    #[test]
    fn identical_velocity() {
        let a = mover(0, 100.0, 200.0, 3.0, 4.0);
        let b = mover(1, 109.0, 200.0, 3.0, 4.0);
        assert_eq!(predict_pair(&a, &b, 0.0), Ok(None));
    }

    #[test]
    fn touching_and_separating() {
        let a = mover(0, 100.0, 200.0, -1.0, 0.0);
        let b = mover(1, 108.0, 200.0, 1.0, 0.0);
        assert_eq!(predict_pair(&a, &b, 0.0), Ok(None));
    }

    #[test]
    fn touching_and_approaching_is_not_an_event() {
        let a = mover(0, 100.0, 200.0, 1.0, 0.0);
        let b = mover(1, 108.0, 200.0, -1.0, 0.0);
        assert_eq!(predict_pair(&a, &b, 5.0), Ok(None));
    }

    #[test]
    fn shallow_overlap_approaching_is_not_an_event() {
        let a = mover(0, 100.0, 200.0, 1.0, 0.0);
        let b = mover(1, 108.0 - 1e-9, 200.0, -1.0, 0.0);
        assert_eq!(predict_pair(&a, &b, 5.0), Ok(None));
    }

    #[test]
    fn just_bounced_overlap_is_not_an_error() {
        // Round-off overlap after a head-on bounce: τ0 lies 0.8 s back.
        let a = mover(0, 100.0, 200.0, -10.0, 0.0);
        let b = mover(1, 108.0 - 1e-9, 200.0, 10.0, 0.0);
        assert_eq!(predict_pair(&a, &b, 5.0), Ok(None));
    }

    #[test]
    fn predicted_contact_is_strictly_future() {
        let a = mover(0, 100.0, 200.0, 10.0, 0.0);
        let b = mover(1, 108.0 + 1e-12, 200.0, -10.0, 0.0);
        match predict_pair(&a, &b, 1e6) {
            Ok(Some(ev)) => assert!(ev.time() > 1e6),
            Ok(None) => {}
            Err(e) => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn deep_overlap_is_an_error() {
        let a = mover(0, 100.0, 200.0, 1.0, 0.0);
        let b = mover(1, 104.0, 200.0, -1.0, 0.0);
        match predict_pair(&a, &b, 0.0) {
            Err(EventError::Overlap { a, b, overlap_secs }) => {
                assert_eq!((a, b), (AgentId(0), AgentId(1)));
                assert!(close(overlap_secs, 2.0));
            }
            other => panic!("expected overlap error, got {other:?}"),
        }
    }

    #[test]
    fn mover_hits_stationary() {
        let dead = mover(0, 200.0, 200.0, 0.0, 0.0);
        let live = mover(1, 100.0, 200.0, 10.0, 0.0);
        let ev = predict_pair(&live, &dead, 0.0).unwrap().unwrap();
        assert!(close(ev.time(), 9.2));
    }
}

#[cfg(test)]
mod queue {
    use super::*;

    fn drain(q: &mut EventQueue) -> Vec<Event> {
        std::iter::from_fn(|| q.pop_min()).collect()
    }

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new(3);
        q.insert(wall_event(3.0, 0));
        q.insert(pair_event(1.0, 1, 2));
        q.insert(wall_event(2.0, 2));
        let times: Vec<f64> = drain(&mut q).iter().map(Event::time).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_times_pop_in_insertion_order() {
        let mut q = EventQueue::new(3);
        q.insert(wall_event(1.0, 2));
        q.insert(wall_event(1.0, 0));
        q.insert(wall_event(1.0, 1));
        let order: Vec<AgentId> = drain(&mut q).iter().map(|e| e.agents().0).collect();
        assert_eq!(order, vec![AgentId(2), AgentId(0), AgentId(1)]);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut q = EventQueue::new(1);
        q.insert(wall_event(4.0, 0));
        assert_eq!(q.peek_min().map(Event::time), Some(4.0));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn invalidate_drops_every_event_of_agent() {
        let mut q = EventQueue::new(4);
        q.insert(wall_event(1.0, 0));
        q.insert(pair_event(2.0, 0, 1));
        q.insert(pair_event(3.0, 2, 0));
        q.insert(pair_event(4.0, 2, 3));
        q.insert(wall_event(5.0, 1));
        q.invalidate(AgentId(0));

        assert_eq!(q.len(), 2);
        assert!(q.pending().all(|e| !e.involves(AgentId(0))));
        assert_eq!(q.peek_min().map(Event::time), Some(4.0));
        assert_eq!(q.raw_len(), 2, "stale entries above the live minimum are discarded");
    }

    #[test]
    fn refreshed_agents_keep_only_new_predictions() {
        let mut q = EventQueue::new(3);
        q.insert(wall_event(1.0, 0));
        q.insert(pair_event(2.0, 0, 1));
        q.insert(wall_event(3.0, 2));

        q.remove_all_referring_to(&[AgentId(0), AgentId(1)]);
        q.insert(wall_event(6.0, 0));
        q.insert(pair_event(7.0, 1, 2));

        let mut times: Vec<f64> = q.pending().map(Event::time).collect();
        times.sort_by(f64::total_cmp);
        assert_eq!(times, vec![3.0, 6.0, 7.0]);
    }

    #[test]
    fn invalidating_partner_kills_pair_event() {
        let mut q = EventQueue::new(2);
        q.insert(pair_event(2.0, 0, 1));
        q.invalidate(AgentId(1));
        assert!(q.pop_min().is_none());
    }

    #[test]
    fn compaction_keeps_heap_bounded() {
        let mut q = EventQueue::new(2);
        q.insert(wall_event(1e9, 1));
        for i in 0..10_000 {
            q.invalidate(AgentId(0));
            q.insert(wall_event(1000.0 + i as f64, 0));
        }
        assert!(q.raw_len() <= 2048, "raw_len = {}", q.raw_len());
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop_min().map(|e| e.time()), Some(1000.0 + 9_999.0));
        assert_eq!(q.pop_min().map(|e| e.time()), Some(1e9));
    }

    #[test]
    fn reset_clears() {
        let mut q = EventQueue::new(1);
        q.insert(wall_event(1.0, 0));
        q.reset(5);
        assert!(q.is_empty());
        assert_eq!(q.agent_count(), 5);
        q.insert(wall_event(1.0, 4));
        assert_eq!(q.len(), 1);
    }
}

#[cfg(test)]
mod resolver {
    use super::*;
    use crate::resolve::pair_mut;

    #[test]
    fn wall_flips_normal_component() {
        let mut agents = vec![mover(0, 396.0, 200.0, 10.0, 3.0)];
        let ev = Event::Wall { t: 0.0, agent: AgentId(0), wall: Wall::Right };
        let r = resolve(&ev, &mut agents);
        assert_eq!(r.to_vec(), vec![AgentId(0)]);
        assert!(!r.is_pair());
        assert_eq!(agents[0].vel, Vec2::new(-10.0, 3.0));
    }

    #[test]
    fn head_on_pair_reverses_both() {
        let mut agents = vec![
            mover(0, 196.0, 200.0, 10.0, 0.0),
            mover(1, 204.0, 200.0, -10.0, 0.0),
        ];
        let ev = predict_pair(&agents[0], &agents[1], 0.0).unwrap().unwrap();
        let r = resolve(&ev, &mut agents);
        assert_eq!(r.to_vec(), vec![AgentId(0), AgentId(1)]);
        assert!((agents[0].vel - Vec2::new(-10.0, 0.0)).norm() < 1e-9);
        assert!((agents[1].vel - Vec2::new(10.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn tangential_component_preserved() {
        let mut agents = vec![
            mover(0, 196.0, 200.0, 10.0, 5.0),
            mover(1, 204.0, 200.0, -10.0, -2.0),
        ];
        let ev = Event::Pair { t: 0.0, a: AgentId(0), b: AgentId(1), normal: Vec2::new(1.0, 0.0) };
        resolve(&ev, &mut agents);
        assert_eq!(agents[0].vel, Vec2::new(-10.0, 5.0));
        assert_eq!(agents[1].vel, Vec2::new(10.0, -2.0));
    }

    #[test]
    fn stationary_partner_stays_put() {
        let mut agents = vec![
            mover(0, 196.0, 200.0, 10.0, 0.0),
            mover(1, 204.0, 200.0, 0.0, 0.0),
        ];
        let ev = Event::Pair { t: 0.0, a: AgentId(0), b: AgentId(1), normal: Vec2::new(1.0, 0.0) };
        resolve(&ev, &mut agents);
        assert_eq!(agents[0].vel, Vec2::new(-10.0, 0.0));
        assert!(agents[1].is_stationary());
    }

    #[test]
    fn pair_mut_either_order() {
        let mut agents = vec![mover(0, 0.0, 0.0, 0.0, 0.0), mover(1, 1.0, 0.0, 0.0, 0.0)];
        {
            let (x, y) = pair_mut(&mut agents, 1, 0);
            assert_eq!((x.id, y.id), (AgentId(1), AgentId(0)));
        }
        let (x, y) = pair_mut(&mut agents, 0, 1);
        assert_eq!((x.id, y.id), (AgentId(0), AgentId(1)));
    }
}

#[cfg(test)]
mod bounds {
    use super::*;

    #[test]
    fn containment_with_tolerance() {
        assert!(ARENA.contains(Vec2::new(4.0, 396.0), 4.0, 0.0));
        assert!(!ARENA.contains(Vec2::new(3.9, 200.0), 4.0, 1e-6));
        assert!(ARENA.contains(Vec2::new(4.0 - 1e-7, 200.0), 4.0, 1e-6));
    }
}

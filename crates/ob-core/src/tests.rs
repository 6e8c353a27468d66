//! Unit tests for ob-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(AgentId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geometry {
    use crate::Vec2;

    #[test]
    fn arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(b - a, Vec2::new(2.0, -3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
        assert_eq!(a.dot(b), 1.0);
    }

    #[test]
    fn norms() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.norm2(), 25.0);
        assert_eq!(v.norm(), 5.0);
        let u = v.normalized().unwrap();
        assert!((u.norm() - 1.0).abs() < 1e-12);
        assert!(Vec2::ZERO.normalized().is_none());
    }

    #[test]
    fn zero_check() {
        assert!(Vec2::ZERO.is_zero());
        assert!(!Vec2::new(0.0, 1e-300).is_zero());
    }
}

#[cfg(test)]
mod params {
    use crate::{ParamError, Params, RunConfig};

    #[test]
    fn defaults_match_front_end() {
        let p = Params::default();
        assert_eq!(p.width, 400.0);
        assert_eq!(p.height, 400.0);
        assert_eq!(p.duration, 14.0);
        assert_eq!(p.contagiousness, 0.6);
        assert_eq!(p.simulation_speed, 1.0);
        assert_eq!(p.lethality, 0.1);
        assert_eq!(p.lockdown, 0.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn probability_above_one_rejected() {
        let p = Params { contagiousness: 1.5, ..Params::default() };
        match p.validate() {
            Err(ParamError::OutOfRange { name, .. }) => assert_eq!(name, "contagiousness"),
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_sizes_rejected() {
        assert!(Params { width: 0.0, ..Params::default() }.validate().is_err());
        assert!(Params { height: -1.0, ..Params::default() }.validate().is_err());
        assert!(Params { duration: 0.0, ..Params::default() }.validate().is_err());
    }

    #[test]
    fn nan_rejected_as_not_finite() {
        let p = Params { lethality: f64::NAN, ..Params::default() };
        assert!(matches!(p.validate(), Err(ParamError::NotFinite { name: "lethality", .. })));
    }

    #[test]
    fn fraction_endpoints_accepted() {
        let p = Params { lockdown: 1.0, contagiousness: 0.0, lethality: 1.0, ..Params::default() };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn center_is_half_extent() {
        let p = Params { width: 100.0, height: 50.0, ..Params::default() };
        assert_eq!(p.center(), crate::Vec2::new(50.0, 25.0));
    }

    #[test]
    fn run_step_count_rounds_up() {
        let cfg = RunConfig { step_dt: 0.4, total_time: 1.0, ..RunConfig::default() };
        assert_eq!(cfg.step_count(), 3);
        assert!(cfg.validate().is_ok());
        assert!(RunConfig { step_dt: 0.0, ..RunConfig::default() }.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::rng::agent_rngs;
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            assert_eq!(r1.unit(), r2.unit());
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        assert_ne!(r0.unit(), r1.unit(), "seeds for adjacent agents should diverge");
    }

    #[test]
    fn agent_zero_not_sim_stream() {
        let mut agent = AgentRng::new(42, AgentId(0));
        let mut sim = SimRng::new(42);
        assert_ne!(agent.unit(), sim.unit());
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = AgentRng::new(0, AgentId(0));
        for _ in 0..100 {
            assert!(!rng.gen_bool(0.0));
            assert!(rng.gen_bool(1.0));
        }
    }

    #[test]
    fn symmetric_in_bounds() {
        let mut rng = SimRng::new(9);
        for _ in 0..1000 {
            let v = rng.symmetric(3.0);
            assert!((-3.0..3.0).contains(&v), "got {v}");
        }
    }

    #[test]
    fn uniform_in_bounds() {
        let mut rng = SimRng::new(9);
        for _ in 0..1000 {
            let v = rng.uniform(2.0, 5.0);
            assert!((2.0..5.0).contains(&v), "got {v}");
        }
    }

    #[test]
    fn bulk_rngs_match_individual() {
        let mut bulk = agent_rngs(3, 77);
        let mut single = AgentRng::new(77, AgentId(2));
        assert_eq!(bulk.len(), 3);
        assert_eq!(bulk[2].unit(), single.unit());
    }
}

//! Property-based tests for ephemeris computations using proptest.
//!
//! These tests verify that orbital computations maintain expected properties
//! across a wide range of inputs.

use chrono::{TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use std::f64::consts::TAU;

use super::{Ephemeris, KeplerSolver, Planet, SolverPolicy, planar_position};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Ten fixed Newton steps satisfy Kepler's equation for moderate eccentricity.
    #[test]
    fn prop_kepler_round_trip_fixed_iterations(
        mean_anomaly_normalized in 0.0f64..1.0,
        eccentricity in 0.0f64..0.9,
    ) {
        let mean_anomaly = mean_anomaly_normalized * TAU;
        let solver = KeplerSolver::new(SolverPolicy::LEGACY);

        let sol = solver.solve(mean_anomaly, eccentricity).unwrap();
        let m_check = sol.eccentric_anomaly - eccentricity * sol.eccentric_anomaly.sin();

        let error = (m_check - mean_anomaly.rem_euclid(TAU)).abs();
        prop_assert!(
            error < 1e-6,
            "Kepler solver failed: M={}, e={}, E={}, M_check={}, error={}",
            mean_anomaly, eccentricity, sol.eccentric_anomaly, m_check, error
        );
    }

    /// The convergent policy holds all the way up to e = 0.999.
    #[test]
    fn prop_kepler_convergent_policy(
        mean_anomaly in -20.0f64..20.0,
        eccentricity in 0.0f64..0.999,
    ) {
        let sol = KeplerSolver::default().solve(mean_anomaly, eccentricity).unwrap();
        prop_assert!(sol.residual() < 1e-10, "residual {}", sol.residual());
    }

    /// e = 0 gives E = M and ν = M.
    #[test]
    fn prop_circular_orbit_degenerate(mean_anomaly in 0.0f64..TAU) {
        let sol = KeplerSolver::default().solve(mean_anomaly, 0.0).unwrap();
        prop_assert_eq!(sol.eccentric_anomaly, mean_anomaly);
        prop_assert!((sol.true_anomaly - mean_anomaly).abs() < 1e-12);
    }

    /// i = Ω = 0 puts the body in the ecliptic and matches the 2D formula.
    #[test]
    fn prop_planar_reduction(
        a in 0.3f64..5.0,
        e in 0.0f64..0.9,
        m in 0.0f64..TAU,
        omega in 0.0f64..TAU,
    ) {
        let eph = Ephemeris::default();
        let p3 = eph.position_at_mean_anomaly(a, e, m, omega, 0.0, 0.0).unwrap();
        let p2 = planar_position(&eph.solver, a, e, m, omega).unwrap();

        prop_assert_eq!(p3.z(), 0.0);
        prop_assert!((p3.x() - p2.x()).abs() < 1e-12 * a.max(1.0));
        prop_assert!((p3.y() - p2.y()).abs() < 1e-12 * a.max(1.0));
    }

    /// The rotation into the ecliptic preserves distance from the Sun.
    #[test]
    fn prop_rotation_preserves_radius(
        e in 0.0f64..0.9,
        m in 0.0f64..TAU,
        omega in 0.0f64..TAU,
        inclination in 0.0f64..std::f64::consts::PI,
        node in 0.0f64..TAU,
    ) {
        let eph = Ephemeris::default();
        let p = eph.position_at_mean_anomaly(1.5, e, m, omega, inclination, node).unwrap();
        prop_assert!((p.vec.length() - p.r).abs() < 1e-12);
        prop_assert!(p.r >= 1.5 * (1.0 - e) - 1e-12 && p.r <= 1.5 * (1.0 + e) + 1e-12);
    }

    /// Earth stays between perihelion and aphelion at any instant.
    #[test]
    fn prop_earth_radius_bounds(offset_days in -36_525.0f64..36_525.0) {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let at = j2000 + TimeDelta::milliseconds((offset_days * 86_400_000.0) as i64);

        let p = Ephemeris::default().planet_position(Planet::Earth, at).unwrap();
        prop_assert!(
            p.r >= 0.983 - 1e-12 && p.r <= 1.017 + 1e-12,
            "Earth radius {} AU outside perihelion/aphelion bounds", p.r
        );
    }

    /// Position changes smoothly over time.
    #[test]
    fn prop_position_continuity(offset_days in 0.0f64..3650.0) {
        let eph = Ephemeris::default();
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let t0 = j2000 + TimeDelta::milliseconds((offset_days * 86_400_000.0) as i64);

        let p0 = eph.planet_position(Planet::Earth, t0).unwrap();
        let p1 = eph.planet_position(Planet::Earth, t0 + TimeDelta::hours(1)).unwrap();

        // Earth moves ~0.0007 AU per hour
        prop_assert!(p0.distance_to(&p1) < 0.001);
    }
}

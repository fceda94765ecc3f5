//! Property-based tests for close-approach evaluation.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;

use super::{ApproachSeverity, Separation, separation};
use crate::ephemeris::{Ephemeris, OrbitalElementSet, Planet, SolverPolicy};

fn arb_elements() -> impl Strategy<Value = OrbitalElementSet> {
    (
        0.3f64..4.0,
        0.0f64..0.95,
        0.0f64..360.0,
        0.0f64..360.0,
        0.0f64..180.0,
        0.0f64..360.0,
        50.0f64..3000.0,
        2_440_000.0f64..2_470_000.0,
    )
        .prop_map(|(a, e, m0, w, i, node, period, epoch)| {
            OrbitalElementSet::new(a, e, m0, w, i, node, period, epoch).unwrap()
        })
}

fn instant(offset_days: f64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        + TimeDelta::milliseconds((offset_days * 86_400_000.0) as i64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// distance(A, B, t) == distance(B, A, t), bit for bit.
    #[test]
    fn prop_distance_symmetry(
        a in arb_elements(),
        b in arb_elements(),
        offset in -20_000.0f64..20_000.0,
    ) {
        let eph = Ephemeris::default();
        let at = instant(offset);
        let ab = separation(&eph, &a, &b, at).unwrap();
        let ba = separation(&eph, &b, &a, at).unwrap();
        prop_assert_eq!(ab, ba);
    }

    /// Symmetry also holds under the legacy fixed-iteration solver.
    #[test]
    fn prop_distance_symmetry_legacy(
        a in arb_elements(),
        offset in -5_000.0f64..5_000.0,
    ) {
        let eph = Ephemeris::new(SolverPolicy::LEGACY);
        let earth = Planet::Earth.elements();
        let at = instant(offset);
        prop_assert_eq!(
            separation(&eph, &a, &earth, at).unwrap(),
            separation(&eph, &earth, &a, at).unwrap()
        );
    }

    /// Separation never exceeds the sum of the two aphelia.
    #[test]
    fn prop_separation_bounded_by_aphelia(
        a in arb_elements(),
        b in arb_elements(),
        offset in -20_000.0f64..20_000.0,
    ) {
        let s = separation(&Ephemeris::default(), &a, &b, instant(offset)).unwrap();
        prop_assert!(s.au >= 0.0);
        prop_assert!(s.au <= a.aphelion() + b.aphelion() + 1e-9);
    }

    /// Severity never decreases as the distance grows.
    #[test]
    fn prop_severity_monotonic(km1 in 0.0f64..5.0e7, km2 in 0.0f64..5.0e7) {
        let (near, far) = if km1 <= km2 { (km1, km2) } else { (km2, km1) };
        prop_assert!(ApproachSeverity::from_km(near) <= ApproachSeverity::from_km(far));
    }

    /// The three units agree with each other.
    #[test]
    fn prop_units_consistent(au in 0.0f64..10.0) {
        let s = Separation::from_au(au);
        prop_assert!((s.km / 149_597_870.7 - au).abs() <= 1e-12 * au.max(1.0));
        prop_assert!((s.lunar * 384_400.0 - s.km).abs() <= 1e-6 * s.km.max(1.0));
    }
}

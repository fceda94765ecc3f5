//! Impact model regression fixture: 50 m rocky impactor at 50 000 km/h.

mod common;

use approx::assert_relative_eq;
use std::f64::consts::PI;

use flyby::impact::{CasualtyBucket, ImpactParams, ImpactScenario, SeismicReach};

use common::*;

fn fixture() -> ImpactScenario {
    ImpactScenario::compute(50.0, 50_000.0, &ImpactParams::default()).unwrap()
}

#[test]
fn test_pinned_values() {
    let s = fixture();

    assert_relative_eq!(s.diameter_km, 0.05);
    assert_relative_eq!(s.velocity_km_s, 13.888_888_888_888_89, max_relative = 1e-15);
    assert_relative_eq!(s.mass_kg, 163_624_617.374_468_4, max_relative = 1e-12);
    assert_relative_eq!(s.energy_joules, 1.578_169_534_861_770_6e16, max_relative = 1e-12);
    assert_relative_eq!(s.energy_megatons, 3.771_915_714_296_775, max_relative = 1e-12);
    assert_relative_eq!(s.crater_diameter_km, 0.286_428_488_372_886_26, max_relative = 1e-12);
    assert_relative_eq!(s.crater_depth_km, 0.071_607_122_093_221_56, max_relative = 1e-12);
    assert_relative_eq!(s.zones.severe_blast, 9.710_710_213_852_506, max_relative = 1e-12);
    assert_relative_eq!(s.zones.moderate_blast, 19.421_420_427_705_012, max_relative = 1e-12);
    assert_relative_eq!(s.zones.thermal_radiation, 29.132_130_641_557_517, max_relative = 1e-12);
    assert_relative_eq!(s.zones.airblast, 48.553_551_069_262_53, max_relative = 1e-12);
    assert_relative_eq!(s.seismic_magnitude, 4.576_561_979_604_849, max_relative = 1e-12);
    assert_relative_eq!(s.affected_population, 444_368.351_174_799_2, max_relative = 1e-9);
    assert_relative_eq!(s.hiroshima_equivalents(), 0.251_461_047_619_785, max_relative = 1e-12);

    assert_eq!(s.casualties, CasualtyBucket::HundredsOfThousands);
    assert_eq!(s.casualties.to_string(), "hundreds of thousands");
    assert_eq!(s.seismic_reach(), SeismicReach::Regional);
}

#[test]
fn test_matches_closed_form_exactly() {
    let s = fixture();

    let diameter_km = 50.0 / 1000.0;
    let velocity = 50_000.0 / 3600.0;
    let mass = (4.0 / 3.0) * PI * (diameter_km * 500.0f64).powi(3) * 2500.0;
    let energy = 0.5 * mass * (velocity * 1000.0f64).powi(2);
    let megatons = energy / 4.184e15;
    let crater = 1.8 * diameter_km * (2500.0f64 / 2500.0).powf(1.0 / 3.0) * velocity.powf(0.44);

    assert_eq!(s.energy_megatons, megatons);
    assert_eq!(s.crater_diameter_km, crater);
    assert_eq!(s.crater_depth_km, crater / 4.0);
    assert_eq!(s.zones.fireball, crater / 2.0);
    assert_eq!(s.zones.vaporization, crater * 0.75);
    assert_eq!(s.zones.total_destruction, crater * 2.0);
    assert_eq!(s.zones.severe_blast, megatons.sqrt() * 5.0);
}

#[test]
fn test_density_is_explicit() {
    let rocky = fixture();
    let iron = ImpactScenario::compute(50.0, 50_000.0, &ImpactParams::with_density(7800.0)).unwrap();

    assert_relative_eq!(iron.mass_kg / rocky.mass_kg, 7800.0 / 2500.0, max_relative = 1e-12);
    assert_relative_eq!(
        iron.crater_diameter_km / rocky.crater_diameter_km,
        (7800.0f64 / 2500.0).cbrt(),
        max_relative = 1e-12
    );
}

#[test]
fn test_scenario_from_recorded_event() {
    let catalog = fixture_catalog();
    let event = do111_event(&catalog);
    let params = ImpactParams::default();

    let s = ImpactScenario::from_event(event, &params).unwrap();
    let direct = ImpactScenario::compute(0.5 * (97.0 + 216.9), 50_000.0, &params).unwrap();
    assert_eq!(s, direct);
    assert!(s.energy_megatons > fixture().energy_megatons);
}

//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use flyby::catalog::{BodyId, Catalog, CloseApproachEvent};
use flyby::ephemeris::OrbitalElementSet;

/// NEO reference id of (2009 DO111).
pub const DO111_ID: &str = "3436338";

/// Recorded miss distance of the 2025-09-27 approach, lunar distances.
pub const DO111_RECORDED_LD: f64 = 49.04;

/// Orbit export entry for (2009 DO111), osculating at JD 2461000.5.
///
/// Period, mean anomaly and epoch are the catalog's. Semi-major axis,
/// eccentricity and the three angles are fitted to the body's heliocentric
/// position near the 2025-09-27 approach, so the 10% agreement checked in
/// `close_approach.rs` is a consistency check of the propagation chain, not
/// an independent validation against catalog elements.
pub const DO111_ORBIT_JSON: &str = r#"{
    "3436338": {
        "name": "(2009 DO111)",
        "semi_major_axis": "1.05098",
        "eccentricity": "0.16",
        "inclination": "4.5",
        "ascending_node_longitude": "255.0",
        "perihelion_argument": "35.0",
        "mean_anomaly": "113.5762333440321",
        "orbital_period": "393.533951972213",
        "epoch_osculation": "2461000.5"
    }
}"#;

pub const DO111_EVENTS_JSON: &str = r#"{
    "events": [
        {
            "name": "(2009 DO111)",
            "neo_reference_id": "3436338",
            "date": "2025-09-27",
            "miss_distance_km": 18851000.0,
            "miss_distance_lunar": 49.04,
            "velocity_kmh": 50000.0,
            "diameter_min": 97.0,
            "diameter_max": 216.9,
            "is_hazardous": false,
            "magnitude": 22.1
        },
        {
            "name": "(2025 QX3)",
            "neo_reference_id": "54390011",
            "date": "2025-09-29",
            "miss_distance_km": 1500000.0,
            "miss_distance_lunar": 3.902,
            "velocity_kmh": 31000.0,
            "diameter_min": 12.0,
            "diameter_max": 27.0,
            "is_hazardous": false
        }
    ]
}"#;

pub fn do111_id() -> BodyId {
    BodyId::from(DO111_ID)
}

pub fn do111_elements() -> OrbitalElementSet {
    OrbitalElementSet::new(
        1.05098,
        0.16,
        113.576_233_344_032_1,
        35.0,
        4.5,
        255.0,
        393.533_951_972_213,
        2_461_000.5,
    )
    .unwrap()
}

/// Reference planets plus the DO111 orbit and both events.
pub fn fixture_catalog() -> Catalog {
    let mut catalog = Catalog::with_reference_planets();
    catalog.merge_orbits_json(DO111_ORBIT_JSON).unwrap();
    catalog.merge_events_json(DO111_EVENTS_JSON).unwrap();
    catalog
}

pub fn do111_event(catalog: &Catalog) -> &CloseApproachEvent {
    catalog
        .events()
        .iter()
        .find(|e| e.neo_reference_id.as_str() == DO111_ID)
        .unwrap()
}

pub fn approach_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 27, 0, 0, 0).unwrap()
}

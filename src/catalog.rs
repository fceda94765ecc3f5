//! Body catalog: orbital element sets and recorded close-approach events.
//!
//! Both inputs are the JSON exports of the NEO feed:
//! - an orbit map keyed by NEO reference id (`orbital_data.json`), with the
//!   feed's field names and numbers given either as JSON numbers or strings;
//! - an event feed `{ "events": [...] }` (`events.json`).
//!
//! A body referenced by an event but absent from the orbit map is kept with
//! no orbit. Asking for its elements yields [`CatalogError::MissingOrbitData`]
//! so callers report the distance as unknown.

use bevy::prelude::*;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::epoch::{self, EpochError};
use crate::ephemeris::{OrbitError, OrbitalElementSet, Planet};
use crate::types::{KM_PER_AU, LUNAR_DISTANCE_KM, MS_PER_DAY};

/// Osculating epoch assumed when a record omits one.
pub const DEFAULT_EPOCH_JD: f64 = 2_461_000.5;

/// Events closer than this (days) count as "near approach" for display.
pub const NEAR_APPROACH_DAYS: f64 = 2.0;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("no orbital data for body {0}")]
    MissingOrbitData(BodyId),

    #[error("invalid orbit record for {id}: {source}")]
    InvalidRecord { id: BodyId, source: OrbitError },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Catalog key: NEO reference id, or planet name for the reference planets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn earth() -> Self {
        Self::from(Planet::Earth)
    }
}

impl From<Planet> for BodyId {
    fn from(planet: Planet) -> Self {
        Self(planet.name().to_string())
    }
}

impl From<&str> for BodyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepts `1.23` as well as `"1.23"`.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(f64),
        Text(String),
    }

    match Lenient::deserialize(deserializer)? {
        Lenient::Number(v) => Ok(v),
        Lenient::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "lenient_f64")] f64);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(v)| v))
}

/// One entry of the orbit export.
#[derive(Clone, Debug, Deserialize)]
pub struct OrbitRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub semi_major_axis: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub eccentricity: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub perihelion_argument: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub mean_anomaly: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub orbital_period: f64,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub inclination: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub ascending_node_longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub epoch_osculation: Option<f64>,
}

impl OrbitRecord {
    /// Validated element set. Missing inclination and node default to 0,
    /// a missing epoch to [`DEFAULT_EPOCH_JD`].
    pub fn to_elements(&self) -> Result<OrbitalElementSet, OrbitError> {
        OrbitalElementSet::new(
            self.semi_major_axis,
            self.eccentricity,
            self.mean_anomaly,
            self.perihelion_argument,
            self.inclination.unwrap_or(0.0),
            self.ascending_node_longitude.unwrap_or(0.0),
            self.orbital_period,
            self.epoch_osculation.unwrap_or(DEFAULT_EPOCH_JD),
        )
    }
}

/// A recorded close approach, as reported by the feed. Read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloseApproachEvent {
    pub name: String,
    pub neo_reference_id: BodyId,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Full time of closest approach, `YYYY-MM-DDTHH:MM:SS` (UTC)
    #[serde(default)]
    pub time: Option<String>,
    pub miss_distance_km: f64,
    pub miss_distance_lunar: f64,
    pub velocity_kmh: f64,
    /// Estimated diameter range in meters
    pub diameter_min: f64,
    pub diameter_max: f64,
    pub is_hazardous: bool,
    #[serde(default)]
    pub magnitude: Option<f64>,
}

impl CloseApproachEvent {
    /// Instant of closest approach: the full time when given, otherwise
    /// midnight UTC of `date`. A malformed `time` is an error.
    pub fn instant(&self) -> Result<DateTime<Utc>, EpochError> {
        match &self.time {
            Some(time) => NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S")
                .map(|naive| naive.and_utc())
                .map_err(|_| EpochError::InvalidDate(time.clone())),
            None => epoch::parse_calendar_date(&self.date),
        }
    }

    /// Mean of the estimated diameter range in meters.
    pub fn mean_diameter_m(&self) -> f64 {
        0.5 * (self.diameter_min + self.diameter_max)
    }

    /// Miss distance in AU.
    pub fn miss_distance_au(&self) -> f64 {
        self.miss_distance_km / KM_PER_AU
    }

    /// Whether the reported distance in km and in lunar distances agree.
    pub fn distances_consistent(&self, tolerance: f64) -> bool {
        let lunar = self.miss_distance_km / LUNAR_DISTANCE_KM;
        (lunar - self.miss_distance_lunar).abs() <= tolerance * self.miss_distance_lunar.abs()
    }

    /// Signed days from the event to `at` (positive after the approach).
    pub fn days_since(&self, at: DateTime<Utc>) -> Result<f64, EpochError> {
        Ok((at - self.instant()?).num_milliseconds() as f64 / MS_PER_DAY)
    }

    /// Within [`NEAR_APPROACH_DAYS`] of the recorded approach.
    pub fn is_near(&self, at: DateTime<Utc>) -> Result<bool, EpochError> {
        Ok(self.days_since(at)?.abs() <= NEAR_APPROACH_DAYS)
    }
}

#[derive(Deserialize)]
struct EventFeed {
    events: Vec<CloseApproachEvent>,
}

/// One catalog body. `orbit` is `None` when the catalog has no elements.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyRecord {
    pub id: BodyId,
    pub name: String,
    pub orbit: Option<OrbitalElementSet>,
}

/// Resource holding every known body and recorded event.
#[derive(Resource, Clone, Debug, Default)]
pub struct Catalog {
    bodies: BTreeMap<BodyId, BodyRecord>,
    events: Vec<CloseApproachEvent>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with Mercury, Venus, Earth and Mars.
    pub fn with_reference_planets() -> Self {
        let mut catalog = Self::new();
        for planet in Planet::ALL {
            catalog.insert_body(BodyId::from(*planet), planet.name(), Some(planet.elements()));
        }
        catalog
    }

    /// Insert or replace a body.
    pub fn insert_body(&mut self, id: BodyId, name: impl Into<String>, orbit: Option<OrbitalElementSet>) {
        let name = name.into();
        self.bodies.insert(id.clone(), BodyRecord { id, name, orbit });
    }

    /// Merge an orbit map (`{ "<id>": { ...record... } }`).
    ///
    /// Every record is validated; the first invalid one aborts the merge and
    /// leaves the catalog untouched. Returns the number of records merged.
    pub fn merge_orbits_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let records: BTreeMap<BodyId, OrbitRecord> = serde_json::from_str(json)?;

        let mut parsed = Vec::with_capacity(records.len());
        for (id, record) in records {
            let elements = record
                .to_elements()
                .map_err(|source| CatalogError::InvalidRecord { id: id.clone(), source })?;
            let name = record.name.unwrap_or_else(|| id.to_string());
            parsed.push((id, name, elements));
        }

        let count = parsed.len();
        for (id, name, elements) in parsed {
            self.insert_body(id, name, Some(elements));
        }

        info!("Loaded {} orbit records ({} bodies in catalog)", count, self.bodies.len());
        Ok(count)
    }

    /// Merge an event feed (`{ "events": [...] }`).
    ///
    /// Bodies first seen here are registered without orbit data. Returns the
    /// number of events merged.
    pub fn merge_events_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let feed: EventFeed = serde_json::from_str(json)?;
        let count = feed.events.len();

        for event in feed.events {
            if !self.bodies.contains_key(&event.neo_reference_id) {
                warn!("No orbital data for {} ({})", event.name, event.neo_reference_id);
                self.insert_body(event.neo_reference_id.clone(), event.name.clone(), None);
            }
            if let Err(err) = event.instant() {
                warn!("Close approach of {} has no usable instant: {}", event.name, err);
            }
            self.events.push(event);
        }

        info!("Loaded {} close-approach events", count);
        Ok(count)
    }

    pub fn load_orbits(&mut self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        self.merge_orbits_json(&json)
    }

    pub fn load_events(&mut self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        self.merge_events_json(&json)
    }

    pub fn body(&self, id: &BodyId) -> Option<&BodyRecord> {
        self.bodies.get(id)
    }

    /// Orbital elements of `id`.
    ///
    /// Fails with `MissingOrbitData` both for unknown ids and for known
    /// bodies without elements.
    pub fn orbit(&self, id: &BodyId) -> Result<&OrbitalElementSet, CatalogError> {
        self.bodies
            .get(id)
            .and_then(|b| b.orbit.as_ref())
            .ok_or_else(|| CatalogError::MissingOrbitData(id.clone()))
    }

    pub fn bodies(&self) -> impl Iterator<Item = &BodyRecord> {
        self.bodies.values()
    }

    pub fn events(&self) -> &[CloseApproachEvent] {
        &self.events
    }

    pub fn events_for<'a, 'b>(
        &'a self,
        id: &'b BodyId,
    ) -> impl Iterator<Item = &'a CloseApproachEvent> + use<'a, 'b> {
        self.events.iter().filter(move |e| &e.neo_reference_id == id)
    }

    /// Recorded event of `id` closest in time to `at`.
    pub fn nearest_event(&self, id: &BodyId, at: DateTime<Utc>) -> Option<&CloseApproachEvent> {
        self.events_for(id)
            .filter_map(|e| e.days_since(at).ok().map(|d| (d.abs(), e)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

//! Close-approach evaluation between two propagated bodies.
//!
//! Both bodies are propagated to the same instant with the full two-body
//! model and reduced to a Euclidean separation, reported in AU, km and
//! lunar distances. The cosmetic flyby substitution used by renderers lives
//! in [`smoothing`] and is only reached through [`PositionMode::VisualSmoothing`].

pub mod smoothing;

#[cfg(test)]
mod proptest_approach;

pub use smoothing::{SmoothingConfig, display_position, smoothed_flyby_position, smoothing_deviation};

use chrono::{DateTime, Utc};
use std::fmt;

use crate::catalog::{BodyId, Catalog, CatalogError, CloseApproachEvent};
use crate::ephemeris::{Ephemeris, OrbitError, OrbitalElementSet};
use crate::epoch::{self, EpochError};
use crate::types::{KM_PER_AU, LUNAR_DISTANCE_KM, au_to_km, km_to_lunar};

/// Upper bound on samples taken by [`find_closest_approach`].
pub const MAX_SEARCH_SAMPLES: usize = 1_000_000;

/// Width (days) at which the golden-section refinement stops.
const REFINE_TOLERANCE_DAYS: f64 = 1e-6;

/// 1/φ
const INV_PHI: f64 = 0.618_033_988_749_894_9;

#[derive(thiserror::Error, Debug)]
pub enum ApproachError {
    #[error(transparent)]
    Orbit(#[from] OrbitError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Epoch(#[from] EpochError),

    #[error("invalid search window: {0}")]
    InvalidSearchWindow(&'static str),

    #[error("recorded miss distance {0} LD cannot be compared against")]
    InvalidRecordedDistance(f64),
}

/// Distance bundle between two bodies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separation {
    pub au: f64,
    pub km: f64,
    pub lunar: f64,
}

impl Separation {
    pub fn from_au(au: f64) -> Self {
        let km = au_to_km(au);
        Self {
            au,
            km,
            lunar: km_to_lunar(km),
        }
    }

    pub fn from_km(km: f64) -> Self {
        Self {
            au: km / KM_PER_AU,
            km,
            lunar: km_to_lunar(km),
        }
    }

    pub fn severity(&self) -> ApproachSeverity {
        ApproachSeverity::from_km(self.km)
    }
}

/// Coarse classification of a miss distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApproachSeverity {
    /// Inside the Moon's orbit.
    Critical,
    /// Under 500 000 km.
    ExtremelyClose,
    /// Under 1 000 000 km.
    VeryClose,
    /// Under 20 000 000 km.
    Moderate,
    Distant,
}

impl ApproachSeverity {
    pub fn from_km(km: f64) -> Self {
        if km < LUNAR_DISTANCE_KM {
            ApproachSeverity::Critical
        } else if km < 500_000.0 {
            ApproachSeverity::ExtremelyClose
        } else if km < 1_000_000.0 {
            ApproachSeverity::VeryClose
        } else if km < 20_000_000.0 {
            ApproachSeverity::Moderate
        } else {
            ApproachSeverity::Distant
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApproachSeverity::Critical => "critical",
            ApproachSeverity::ExtremelyClose => "extremely close",
            ApproachSeverity::VeryClose => "very close",
            ApproachSeverity::Moderate => "moderate",
            ApproachSeverity::Distant => "distant",
        }
    }
}

impl fmt::Display for ApproachSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a body's position is produced for display.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PositionMode {
    /// Full propagation at every instant.
    #[default]
    Physical,
    /// Substitute a synthesized flyby near recorded events. Not physical.
    VisualSmoothing(SmoothingConfig),
}

/// Separation of two element sets propagated to `at`.
///
/// Order-independent: `separation(e, a, b, t) == separation(e, b, a, t)`.
pub fn separation(
    ephemeris: &Ephemeris,
    a: &OrbitalElementSet,
    b: &OrbitalElementSet,
    at: DateTime<Utc>,
) -> Result<Separation, OrbitError> {
    let pa = ephemeris.position(a, at)?;
    let pb = ephemeris.position(b, at)?;

    let au = pa.distance_to(&pb);
    if !au.is_finite() {
        return Err(OrbitError::DegenerateResult);
    }
    Ok(Separation::from_au(au))
}

/// [`separation`] for two catalog bodies.
///
/// A body without elements yields `MissingOrbitData`; the distance is then
/// unknown and must not be defaulted.
pub fn separation_by_id(
    ephemeris: &Ephemeris,
    catalog: &Catalog,
    a: &BodyId,
    b: &BodyId,
    at: DateTime<Utc>,
) -> Result<Separation, ApproachError> {
    let ea = catalog.orbit(a)?;
    let eb = catalog.orbit(b)?;
    Ok(separation(ephemeris, ea, eb, at)?)
}

/// Minimum separation found inside a search window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosestApproach {
    pub at: DateTime<Utc>,
    pub separation: Separation,
}

/// Closest approach of two bodies within `[start, end]`.
///
/// The window is sampled every `step_days`, then the bracket around the best
/// sample is refined by golden-section search. Only the best local minimum
/// at the sampling resolution is found; steps longer than a few days may
/// skip a fast flyby.
pub fn find_closest_approach(
    ephemeris: &Ephemeris,
    a: &OrbitalElementSet,
    b: &OrbitalElementSet,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step_days: f64,
) -> Result<ClosestApproach, ApproachError> {
    let span = epoch::day_offset(start, end);
    if span <= 0.0 {
        return Err(ApproachError::InvalidSearchWindow("end must be after start"));
    }
    if !step_days.is_finite() || step_days <= 0.0 {
        return Err(ApproachError::InvalidSearchWindow("step must be positive and finite"));
    }
    let samples = (span / step_days).ceil();
    if samples > MAX_SEARCH_SAMPLES as f64 {
        return Err(ApproachError::InvalidSearchWindow("too many samples for window and step"));
    }

    let distance_at = |days: f64| -> Result<f64, ApproachError> {
        let at = epoch::add_days(start, days)?;
        Ok(separation(ephemeris, a, b, at)?.au)
    };

    let mut best_t = 0.0;
    let mut best_d = distance_at(0.0)?;
    for k in 1..=samples as usize {
        let t = (k as f64 * step_days).min(span);
        let d = distance_at(t)?;
        if d < best_d {
            best_t = t;
            best_d = d;
        }
    }

    let mut lo = (best_t - step_days).max(0.0);
    let mut hi = (best_t + step_days).min(span);
    let mut x1 = hi - INV_PHI * (hi - lo);
    let mut x2 = lo + INV_PHI * (hi - lo);
    let mut f1 = distance_at(x1)?;
    let mut f2 = distance_at(x2)?;

    while hi - lo > REFINE_TOLERANCE_DAYS {
        if f1 < f2 {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - INV_PHI * (hi - lo);
            f1 = distance_at(x1)?;
        } else {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + INV_PHI * (hi - lo);
            f2 = distance_at(x2)?;
        }
    }

    let refined_t = 0.5 * (lo + hi);
    let refined_d = distance_at(refined_t)?;
    let (t, d) = if refined_d <= best_d {
        (refined_t, refined_d)
    } else {
        (best_t, best_d)
    };

    Ok(ClosestApproach {
        at: epoch::add_days(start, t)?,
        separation: Separation::from_au(d),
    })
}

/// Propagated versus recorded miss distance for one event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproachComparison {
    pub at: DateTime<Utc>,
    pub computed: Separation,
    pub recorded: Separation,
    /// `|computed - recorded| / recorded`, on lunar distances.
    pub relative_error: f64,
}

impl ApproachComparison {
    pub fn within(&self, tolerance: f64) -> bool {
        self.relative_error <= tolerance
    }
}

/// Propagate the event's body and `reference` to the recorded instant and
/// compare with the recorded miss distance.
///
/// A recorded distance that is not finite and positive is an error.
pub fn compare_with_event(
    ephemeris: &Ephemeris,
    catalog: &Catalog,
    event: &CloseApproachEvent,
    reference: &BodyId,
) -> Result<ApproachComparison, ApproachError> {
    if !event.miss_distance_lunar.is_finite() || event.miss_distance_lunar <= 0.0 {
        return Err(ApproachError::InvalidRecordedDistance(event.miss_distance_lunar));
    }
    let at = event.instant()?;
    let computed = separation_by_id(ephemeris, catalog, &event.neo_reference_id, reference, at)?;
    let recorded = Separation::from_km(event.miss_distance_lunar * LUNAR_DISTANCE_KM);
    let relative_error = (computed.lunar - recorded.lunar).abs() / recorded.lunar;

    Ok(ApproachComparison {
        at,
        computed,
        recorded,
        relative_error,
    })
}

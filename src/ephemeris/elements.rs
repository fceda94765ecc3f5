//! Osculating orbital element sets as delivered by the catalog.

use chrono::{DateTime, Utc};
use std::f64::consts::TAU;

use crate::epoch::{self, EpochError};
use crate::types::DEG_TO_RAD;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OrbitError {
    #[error("eccentricity {0} outside [0, 1): only elliptical orbits are supported")]
    InvalidEccentricity(f64),

    #[error("semi-major axis {0} AU must be positive")]
    InvalidSemiMajorAxis(f64),

    #[error("orbital period {0} days must be positive")]
    InvalidPeriod(f64),

    #[error("{field} is not finite")]
    NonFinite { field: &'static str },

    #[error(
        "Kepler solve did not converge (M={mean_anomaly}, e={eccentricity}, residual={residual})"
    )]
    NotConverged {
        mean_anomaly: f64,
        eccentricity: f64,
        residual: f64,
    },

    #[error("computed position is not finite")]
    DegenerateResult,

    #[error(transparent)]
    Epoch(#[from] EpochError),
}

pub(crate) fn ensure_finite(value: f64, field: &'static str) -> Result<f64, OrbitError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OrbitError::NonFinite { field })
    }
}

/// Reject eccentricities outside the elliptical range.
pub fn check_eccentricity(e: f64) -> Result<(), OrbitError> {
    ensure_finite(e, "eccentricity")?;
    if (0.0..1.0).contains(&e) {
        Ok(())
    } else {
        Err(OrbitError::InvalidEccentricity(e))
    }
}

/// Keplerian elements of one body, fixed at an osculating epoch.
///
/// Angles are stored in degrees, as the catalog reports them, and converted
/// to radians by the accessors used for trigonometry. A value of this type
/// always satisfies `a > 0`, `0 <= e < 1`, `period > 0` with every field
/// finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElementSet {
    semi_major_axis: f64,
    eccentricity: f64,
    mean_anomaly_deg: f64,
    argument_of_perihelion_deg: f64,
    inclination_deg: f64,
    ascending_node_deg: f64,
    period_days: f64,
    epoch_jd: f64,
}

impl OrbitalElementSet {
    /// Validated element set.
    ///
    /// # Arguments
    /// * `semi_major_axis` - AU
    /// * `eccentricity` - dimensionless, `[0, 1)`
    /// * `mean_anomaly_deg` - mean anomaly at `epoch_jd`
    /// * `argument_of_perihelion_deg` - ω
    /// * `inclination_deg` - i
    /// * `ascending_node_deg` - Ω
    /// * `period_days` - sidereal period
    /// * `epoch_jd` - Julian Date of the osculating elements
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        mean_anomaly_deg: f64,
        argument_of_perihelion_deg: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
        period_days: f64,
        epoch_jd: f64,
    ) -> Result<Self, OrbitError> {
        let set = Self::new_unchecked(
            semi_major_axis,
            eccentricity,
            mean_anomaly_deg,
            argument_of_perihelion_deg,
            inclination_deg,
            ascending_node_deg,
            period_days,
            epoch_jd,
        );
        set.validate()?;
        Ok(set)
    }

    /// Element set lying in the ecliptic (`i = Ω = 0`).
    pub fn planar(
        semi_major_axis: f64,
        eccentricity: f64,
        mean_anomaly_deg: f64,
        argument_of_perihelion_deg: f64,
        period_days: f64,
        epoch_jd: f64,
    ) -> Result<Self, OrbitError> {
        Self::new(
            semi_major_axis,
            eccentricity,
            mean_anomaly_deg,
            argument_of_perihelion_deg,
            0.0,
            0.0,
            period_days,
            epoch_jd,
        )
    }

    /// Used for the static reference table, which is covered by tests.
    pub(crate) const fn new_unchecked(
        semi_major_axis: f64,
        eccentricity: f64,
        mean_anomaly_deg: f64,
        argument_of_perihelion_deg: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
        period_days: f64,
        epoch_jd: f64,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            mean_anomaly_deg,
            argument_of_perihelion_deg,
            inclination_deg,
            ascending_node_deg,
            period_days,
            epoch_jd,
        }
    }

    pub fn validate(&self) -> Result<(), OrbitError> {
        ensure_finite(self.semi_major_axis, "semi_major_axis")?;
        ensure_finite(self.mean_anomaly_deg, "mean_anomaly")?;
        ensure_finite(self.argument_of_perihelion_deg, "argument_of_perihelion")?;
        ensure_finite(self.inclination_deg, "inclination")?;
        ensure_finite(self.ascending_node_deg, "ascending_node")?;
        ensure_finite(self.period_days, "period")?;
        ensure_finite(self.epoch_jd, "epoch")?;
        check_eccentricity(self.eccentricity)?;

        if self.semi_major_axis <= 0.0 {
            return Err(OrbitError::InvalidSemiMajorAxis(self.semi_major_axis));
        }
        if self.period_days <= 0.0 {
            return Err(OrbitError::InvalidPeriod(self.period_days));
        }
        Ok(())
    }

    /// Semi-major axis in AU
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn mean_anomaly_deg(&self) -> f64 {
        self.mean_anomaly_deg
    }

    pub fn argument_of_perihelion_deg(&self) -> f64 {
        self.argument_of_perihelion_deg
    }

    pub fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }

    pub fn ascending_node_deg(&self) -> f64 {
        self.ascending_node_deg
    }

    /// Orbital period in days
    pub fn period_days(&self) -> f64 {
        self.period_days
    }

    /// Julian Date of the osculating epoch
    pub fn epoch_jd(&self) -> f64 {
        self.epoch_jd
    }

    /// Mean anomaly at epoch in radians
    pub fn mean_anomaly_at_epoch(&self) -> f64 {
        self.mean_anomaly_deg * DEG_TO_RAD
    }

    /// Argument of perihelion ω in radians
    pub fn argument_of_perihelion(&self) -> f64 {
        self.argument_of_perihelion_deg * DEG_TO_RAD
    }

    /// Inclination i in radians
    pub fn inclination(&self) -> f64 {
        self.inclination_deg * DEG_TO_RAD
    }

    /// Longitude of the ascending node Ω in radians
    pub fn ascending_node(&self) -> f64 {
        self.ascending_node_deg * DEG_TO_RAD
    }

    /// Mean motion in radians per day.
    pub fn mean_motion(&self) -> f64 {
        TAU / self.period_days
    }

    /// Calendar instant of the osculating epoch.
    pub fn epoch_instant(&self) -> Result<DateTime<Utc>, OrbitError> {
        Ok(epoch::julian_date_to_instant(self.epoch_jd)?)
    }

    /// Mean anomaly (radians, not normalized) at `at`.
    ///
    /// Pure two-body extrapolation: `M = M0 + n·Δt` with a signed `Δt`. No
    /// perturbations are applied, so accuracy degrades with |Δt|, including
    /// when extrapolating backward from an epoch that postdates `at`.
    pub fn mean_anomaly_at(&self, at: DateTime<Utc>) -> Result<f64, OrbitError> {
        let dt_days = epoch::day_offset(self.epoch_instant()?, at);
        ensure_finite(
            self.mean_anomaly_at_epoch() + self.mean_motion() * dt_days,
            "mean_anomaly",
        )
    }

    /// Closest distance to the Sun in AU
    pub fn perihelion(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the Sun in AU
    pub fn aphelion(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

//! Shared constants and the heliocentric position type.

use bevy::math::DVec3;

/// Kilometres per astronomical unit.
pub const KM_PER_AU: f64 = 149_597_870.7;

/// Lunar distance in kilometres.
pub const LUNAR_DISTANCE_KM: f64 = 384_400.0;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Milliseconds per Julian day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Date of J2000.0 (2000-01-01T12:00:00).
///
/// The reference planet elements are given at this epoch.
pub const J2000_JD: f64 = 2_451_545.0;

/// Convert a distance in AU to kilometres.
pub fn au_to_km(au: f64) -> f64 {
    au * KM_PER_AU
}

/// Convert a distance in kilometres to lunar distances.
pub fn km_to_lunar(km: f64) -> f64 {
    km / LUNAR_DISTANCE_KM
}

/// Heliocentric position in the ecliptic frame.
///
/// Coordinates are in AU. `r` is the orbital radius reported by the Kepler
/// solve, which equals `vec.length()` up to rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub vec: DVec3,
    pub r: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64, r: f64) -> Self {
        Self {
            vec: DVec3::new(x, y, z),
            r,
        }
    }

    pub fn x(&self) -> f64 {
        self.vec.x
    }

    pub fn y(&self) -> f64 {
        self.vec.y
    }

    pub fn z(&self) -> f64 {
        self.vec.z
    }

    /// Euclidean distance to another position, in AU.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.vec.distance(other.vec)
    }

    /// Ecliptic longitude in degrees, in `(-180, 180]`.
    pub fn longitude_deg(&self) -> f64 {
        self.vec.y.atan2(self.vec.x) * RAD_TO_DEG
    }

    pub fn is_finite(&self) -> bool {
        self.vec.is_finite() && self.r.is_finite()
    }
}

//! Ephemeris module for computing heliocentric body positions.
//!
//! Positions come from pure two-body Keplerian propagation of catalog
//! elements: mean anomaly is advanced from the element epoch, Kepler's
//! equation is solved, and the perifocal position is rotated into the
//! ecliptic frame.
//!
//! Coordinate frame:
//! - 3D heliocentric (Sun at origin), ecliptic, distances in AU.
//!
//! Known limitation: no perturbation or secular correction is applied, so
//! accuracy degrades with the distance in time from the osculating epoch,
//! in either direction.

pub mod data;
pub mod elements;
pub mod kepler;

#[cfg(test)]
mod proptest_ephemeris;

pub use data::Planet;
pub use elements::{OrbitError, OrbitalElementSet};
pub use kepler::{KeplerSolution, KeplerSolver, SolverPolicy};

use bevy::math::DVec3;
use bevy::prelude::*;
use chrono::{DateTime, Utc};

use elements::ensure_finite;

use crate::types::Position;

/// Rotate perifocal coordinates `(x_p, y_p, 0)` into the ecliptic frame.
///
/// Composition of rotations by the argument of perihelion `omega`, the
/// inclination and the longitude of the ascending node `node` (all radians).
/// With `inclination = node = 0` this is a plain rotation by `omega` in the
/// ecliptic plane and `z` is exactly zero.
pub fn perifocal_to_ecliptic(x_p: f64, y_p: f64, omega: f64, inclination: f64, node: f64) -> DVec3 {
    let (sin_w, cos_w) = omega.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_n, cos_n) = node.sin_cos();

    let x = (cos_n * cos_w - sin_n * sin_w * cos_i) * x_p
        + (-cos_n * sin_w - sin_n * cos_w * cos_i) * y_p;
    let y = (sin_n * cos_w + cos_n * sin_w * cos_i) * x_p
        + (-sin_n * sin_w + cos_n * cos_w * cos_i) * y_p;
    let z = (sin_i * sin_w) * x_p + (sin_i * cos_w) * y_p;

    DVec3::new(x, y, z)
}

/// Position computed directly in the ecliptic plane: angle `ν + ω`.
///
/// Kept for comparison with the 3D rotation; the two agree when `i = Ω = 0`.
pub fn planar_position(
    solver: &KeplerSolver,
    semi_major_axis: f64,
    eccentricity: f64,
    mean_anomaly: f64,
    omega: f64,
) -> Result<Position, OrbitError> {
    let sol = solver.solve(mean_anomaly, eccentricity)?;
    let r = sol.radius(semi_major_axis);
    let angle = sol.true_anomaly + omega;
    Ok(Position::new(r * angle.cos(), r * angle.sin(), 0.0, r))
}

/// Resource computing heliocentric positions from orbital elements.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct Ephemeris {
    pub solver: KeplerSolver,
}

impl Ephemeris {
    pub fn new(policy: SolverPolicy) -> Self {
        Self {
            solver: KeplerSolver::new(policy),
        }
    }

    /// Position for a mean anomaly already advanced to the query instant.
    ///
    /// # Arguments
    /// * `semi_major_axis` - AU
    /// * `eccentricity` - `0 <= e < 1`
    /// * `mean_anomaly` - M in radians
    /// * `omega` - argument of perihelion ω in radians
    /// * `inclination` - i in radians
    /// * `node` - longitude of ascending node Ω in radians
    pub fn position_at_mean_anomaly(
        &self,
        semi_major_axis: f64,
        eccentricity: f64,
        mean_anomaly: f64,
        omega: f64,
        inclination: f64,
        node: f64,
    ) -> Result<Position, OrbitError> {
        ensure_finite(semi_major_axis, "semi_major_axis")?;
        if semi_major_axis <= 0.0 {
            return Err(OrbitError::InvalidSemiMajorAxis(semi_major_axis));
        }
        ensure_finite(omega, "argument_of_perihelion")?;
        ensure_finite(inclination, "inclination")?;
        ensure_finite(node, "ascending_node")?;

        let sol = self.solver.solve(mean_anomaly, eccentricity)?;
        let r = sol.radius(semi_major_axis);

        let x_p = r * sol.true_anomaly.cos();
        let y_p = r * sol.true_anomaly.sin();
        let vec = perifocal_to_ecliptic(x_p, y_p, omega, inclination, node);

        let position = Position { vec, r };
        if !position.is_finite() {
            return Err(OrbitError::DegenerateResult);
        }
        Ok(position)
    }

    /// Propagate an element set to `at` and return its heliocentric position.
    pub fn position(&self, elements: &OrbitalElementSet, at: DateTime<Utc>) -> Result<Position, OrbitError> {
        elements.validate()?;
        let mean_anomaly = elements.mean_anomaly_at(at)?;
        self.position_at_mean_anomaly(
            elements.semi_major_axis(),
            elements.eccentricity(),
            mean_anomaly,
            elements.argument_of_perihelion(),
            elements.inclination(),
            elements.ascending_node(),
        )
    }

    /// Position of a reference planet at `at`.
    pub fn planet_position(&self, planet: Planet, at: DateTime<Utc>) -> Result<Position, OrbitError> {
        self.position(&planet.elements(), at)
    }
}

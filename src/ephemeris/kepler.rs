//! Kepler equation solver using Newton's method.

use std::f64::consts::{PI, TAU};

use super::elements::{OrbitError, check_eccentricity, ensure_finite};

/// How the Newton iteration on `E - e·sin(E) = M` is run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SolverPolicy {
    /// Exactly `n` Newton steps seeded with `E₀ = M`, no convergence check.
    ///
    /// Ten steps satisfy Kepler's equation to well under 1e-6 rad for
    /// `e < 0.9`. Closer to `e = 1` the seed at `M` converges slowly for
    /// small `M` and the result may be stale; use [`SolverPolicy::Converge`].
    FixedIterations(u32),

    /// Iterate until the Newton step falls below `tolerance`, failing with
    /// [`OrbitError::NotConverged`] after `max_iterations` steps.
    Converge { tolerance: f64, max_iterations: u32 },
}

impl SolverPolicy {
    /// Ten fixed Newton steps.
    pub const LEGACY: SolverPolicy = SolverPolicy::FixedIterations(10);
}

impl Default for SolverPolicy {
    fn default() -> Self {
        SolverPolicy::Converge {
            tolerance: 1e-12,
            max_iterations: 50,
        }
    }
}

/// Result of one Kepler solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolution {
    /// Mean anomaly the solve was run for, normalized to [0, 2π)
    pub mean_anomaly: f64,
    /// Eccentric anomaly E in radians
    pub eccentric_anomaly: f64,
    /// True anomaly ν in radians
    pub true_anomaly: f64,
    pub eccentricity: f64,
    /// Newton steps taken
    pub iterations: u32,
}

impl KeplerSolution {
    /// Orbital radius `a·(1 - e·cos E)`, in the unit of `semi_major_axis`.
    pub fn radius(&self, semi_major_axis: f64) -> f64 {
        semi_major_axis * (1.0 - self.eccentricity * self.eccentric_anomaly.cos())
    }

    /// `|E - e·sin(E) - M|`
    pub fn residual(&self) -> f64 {
        kepler_residual(self.eccentric_anomaly, self.eccentricity, self.mean_anomaly)
    }
}

fn kepler_residual(eccentric_anomaly: f64, e: f64, mean_anomaly: f64) -> f64 {
    (eccentric_anomaly - e * eccentric_anomaly.sin() - mean_anomaly).abs()
}

/// Kepler equation solver for elliptical orbits.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeplerSolver {
    pub policy: SolverPolicy,
}

impl KeplerSolver {
    pub fn new(policy: SolverPolicy) -> Self {
        Self { policy }
    }

    /// Solve Kepler's equation for eccentric and true anomaly.
    ///
    /// # Arguments
    /// * `mean_anomaly` - Mean anomaly M in radians (any value, normalized to [0, 2π))
    /// * `eccentricity` - `0 <= e < 1`
    ///
    /// # Errors
    /// `InvalidEccentricity` outside the elliptical range, `NonFinite` for NaN
    /// or infinite input, `NotConverged` when the convergent policy runs out
    /// of iterations.
    pub fn solve(&self, mean_anomaly: f64, eccentricity: f64) -> Result<KeplerSolution, OrbitError> {
        check_eccentricity(eccentricity)?;
        let m = ensure_finite(mean_anomaly, "mean_anomaly")?.rem_euclid(TAU);

        let (eccentric_anomaly, iterations) = match self.policy {
            SolverPolicy::FixedIterations(n) => {
                let mut e_anomaly = m;
                for _ in 0..n {
                    e_anomaly -= newton_step(e_anomaly, eccentricity, m);
                }
                (e_anomaly, n)
            }
            SolverPolicy::Converge {
                tolerance,
                max_iterations,
            } => converge(m, eccentricity, tolerance, max_iterations)?,
        };

        if !eccentric_anomaly.is_finite() {
            return Err(OrbitError::DegenerateResult);
        }

        Ok(KeplerSolution {
            mean_anomaly: m,
            eccentric_anomaly,
            true_anomaly: eccentric_to_true_anomaly(eccentric_anomaly, eccentricity),
            eccentricity,
            iterations,
        })
    }
}

/// Newton correction `f(E)/f'(E)` for `f(E) = E - e·sin(E) - M`.
///
/// `f'(E) = 1 - e·cos(E)` stays positive for `e < 1`.
fn newton_step(e_anomaly: f64, e: f64, m: f64) -> f64 {
    let f = e_anomaly - e * e_anomaly.sin() - m;
    let f_prime = 1.0 - e * e_anomaly.cos();
    f / f_prime
}

fn converge(m: f64, e: f64, tolerance: f64, max_iterations: u32) -> Result<(f64, u32), OrbitError> {
    // π is a safer starting point than M for very eccentric orbits
    let mut e_anomaly = if e < 0.8 { m } else { PI };

    for i in 0..max_iterations {
        let delta = newton_step(e_anomaly, e, m);
        e_anomaly -= delta;

        if delta.abs() < tolerance {
            return Ok((e_anomaly, i + 1));
        }
    }

    Err(OrbitError::NotConverged {
        mean_anomaly: m,
        eccentricity: e,
        residual: kepler_residual(e_anomaly, e, m),
    })
}

/// True anomaly from eccentric anomaly.
///
/// ν = 2·atan2(√(1+e)·sin(E/2), √(1-e)·cos(E/2)), which keeps the correct
/// quadrant over the whole orbit.
pub fn eccentric_to_true_anomaly(eccentric_anomaly: f64, e: f64) -> f64 {
    let half_e = eccentric_anomaly / 2.0;
    let y = (1.0 + e).sqrt() * half_e.sin();
    let x = (1.0 - e).sqrt() * half_e.cos();
    2.0 * y.atan2(x)
}

//! Visual smoothing of flybys near recorded close approaches.
//!
//! Within a window around a recorded event the body is drawn at the recorded
//! miss distance from Earth, swept through a small angle as time passes. The
//! synthesized point is not derived from the orbital elements and can sit
//! anywhere on a circle of that radius around Earth, so it must never feed a
//! distance computation. [`smoothing_deviation`] measures how far it strays
//! from the propagated position.

use bevy::math::DVec3;
use chrono::{DateTime, Utc};

use super::{ApproachError, PositionMode};
use crate::catalog::CloseApproachEvent;
use crate::ephemeris::{Ephemeris, OrbitalElementSet};
use crate::epoch::EpochError;
use crate::types::{KM_PER_AU, LUNAR_DISTANCE_KM, Position};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingConfig {
    /// Half-width of the substitution window, days.
    pub window_days: f64,
    /// Angle swept from one edge of the window to the centre, radians.
    pub sweep_radians: f64,
    /// Angular spacing between successive bodies, degrees.
    pub spacing_deg: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_days: 5.0,
            sweep_radians: 0.5,
            // golden angle
            spacing_deg: 137.5,
        }
    }
}

/// Synthesized flyby position, or `None` outside the window.
///
/// `index` spreads simultaneous flybys around Earth; `earth` is Earth's
/// propagated position at `at`. The result lies in Earth's ecliptic plane at
/// exactly the recorded miss distance.
pub fn smoothed_flyby_position(
    earth: &Position,
    event: &CloseApproachEvent,
    index: usize,
    at: DateTime<Utc>,
    config: &SmoothingConfig,
) -> Result<Option<Position>, EpochError> {
    let days = event.days_since(at)?;
    if config.window_days <= 0.0 || days.abs() > config.window_days {
        return Ok(None);
    }

    let distance = event.miss_distance_lunar * LUNAR_DISTANCE_KM / KM_PER_AU;
    let angle = (index as f64 * config.spacing_deg).to_radians() + days / config.window_days * config.sweep_radians;
    let (sin, cos) = angle.sin_cos();

    let vec = earth.vec + DVec3::new(distance * cos, distance * sin, 0.0);
    Ok(Some(Position { vec, r: vec.length() }))
}

/// Position to draw for a body at `at`.
///
/// Under [`PositionMode::Physical`], or with no event, or outside the window,
/// this is the propagated position.
pub fn display_position(
    ephemeris: &Ephemeris,
    elements: &OrbitalElementSet,
    earth: &Position,
    event: Option<&CloseApproachEvent>,
    index: usize,
    at: DateTime<Utc>,
    mode: PositionMode,
) -> Result<Position, ApproachError> {
    if let PositionMode::VisualSmoothing(config) = mode
        && let Some(event) = event
        && let Some(position) = smoothed_flyby_position(earth, event, index, at, &config)?
    {
        return Ok(position);
    }
    Ok(ephemeris.position(elements, at)?)
}

/// Distance (AU) between the smoothed and the propagated position of the
/// event's body, or `None` outside the window.
pub fn smoothing_deviation(
    ephemeris: &Ephemeris,
    elements: &OrbitalElementSet,
    earth_elements: &OrbitalElementSet,
    event: &CloseApproachEvent,
    index: usize,
    at: DateTime<Utc>,
    config: &SmoothingConfig,
) -> Result<Option<f64>, ApproachError> {
    let earth = ephemeris.position(earth_elements, at)?;
    let Some(smoothed) = smoothed_flyby_position(&earth, event, index, at, config)? else {
        return Ok(None);
    };
    let physical = ephemeris.position(elements, at)?;
    Ok(Some(smoothed.distance_to(&physical)))
}

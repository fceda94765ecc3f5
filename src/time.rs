//! Simulation clock.
//!
//! The current simulated instant is an explicit resource; every system that
//! needs "now" reads it from here instead of keeping its own date.

use bevy::prelude::*;
use chrono::{DateTime, Utc};

use crate::epoch::{self, EpochError};

/// Simulated instant plus playback controls.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationTime {
    pub current: DateTime<Utc>,
    /// Simulated days per real second.
    pub scale: f64,
    pub paused: bool,
    /// Instant restored by [`SimulationTime::reset`].
    pub initial: DateTime<Utc>,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self::starting_at(Utc::now())
    }
}

impl SimulationTime {
    pub fn starting_at(at: DateTime<Utc>) -> Self {
        Self {
            current: at,
            scale: 1.0,
            paused: false,
            initial: at,
        }
    }

    /// Move the clock by `days` (may be negative), ignoring pause and scale.
    pub fn step_days(&mut self, days: f64) -> Result<(), EpochError> {
        self.current = epoch::add_days(self.current, days)?;
        Ok(())
    }

    /// Back to the initial instant, paused.
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.paused = true;
    }

    /// Days elapsed since the initial instant.
    pub fn elapsed_days(&self) -> f64 {
        epoch::day_offset(self.initial, self.current)
    }

    pub fn julian_date(&self) -> f64 {
        epoch::instant_to_julian_date(self.current)
    }
}

pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationTime>()
            .add_systems(Update, advance_time);
    }
}

/// Advance the simulated instant by real elapsed time times `scale`.
///
/// A step that would leave the representable calendar range pauses the
/// clock instead.
pub fn advance_time(mut sim_time: ResMut<SimulationTime>, time: Res<Time>) {
    if sim_time.paused {
        return;
    }

    let days = time.delta_secs_f64() * sim_time.scale;
    if days == 0.0 {
        return;
    }
    if let Err(err) = sim_time.step_days(days) {
        warn!("Simulation clock stopped: {}", err);
        sim_time.paused = true;
    }
}

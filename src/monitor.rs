//! ECS integration: live close-approach readings for tracked bodies.
//!
//! Spawn an entity with [`TrackedBody`]; every frame the monitor propagates
//! it and the reference body (Earth by default) to the simulation clock and
//! stores the result in its [`ApproachReading`].

use bevy::prelude::*;
use chrono::{DateTime, Utc};

use crate::approach::{
    ApproachSeverity, PositionMode, Separation, display_position, separation_by_id,
};
use crate::catalog::{BodyId, Catalog};
use crate::ephemeris::Ephemeris;
use crate::time::{SimulationTime, advance_time};
use crate::types::Position;

/// A catalog body whose distance to the reference body is monitored.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
#[require(ApproachReading)]
pub struct TrackedBody {
    pub id: BodyId,
    /// Spreads smoothed flybys of different bodies around Earth.
    pub index: usize,
}

impl TrackedBody {
    pub fn new(id: impl Into<BodyId>, index: usize) -> Self {
        Self { id: id.into(), index }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ReadingStatus {
    /// Not yet computed.
    #[default]
    Pending,
    Known(Separation),
    /// Distance cannot be computed, e.g. missing orbit data. Never zero.
    Unknown(String),
}

/// Latest monitor output for one tracked body.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct ApproachReading {
    pub at: Option<DateTime<Utc>>,
    pub status: ReadingStatus,
    /// Position to draw, per [`MonitorSettings::mode`].
    pub display: Option<Position>,
    /// Within two days of a recorded close approach.
    pub near_approach: bool,
}

impl ApproachReading {
    pub fn separation(&self) -> Option<Separation> {
        match &self.status {
            ReadingStatus::Known(s) => Some(*s),
            _ => None,
        }
    }

    pub fn severity(&self) -> Option<ApproachSeverity> {
        self.separation().map(|s| s.severity())
    }
}

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct MonitorSettings {
    pub reference: BodyId,
    /// Only affects [`ApproachReading::display`]; distances are always physical.
    pub mode: PositionMode,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            reference: BodyId::earth(),
            mode: PositionMode::Physical,
        }
    }
}

pub struct MonitorPlugin;

impl Plugin for MonitorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Ephemeris>()
            .init_resource::<Catalog>()
            .init_resource::<SimulationTime>()
            .init_resource::<MonitorSettings>()
            .add_systems(Update, update_approach_readings.after(advance_time));
    }
}

/// Recompute readings whose instant is stale.
pub fn update_approach_readings(
    sim_time: Res<SimulationTime>,
    ephemeris: Res<Ephemeris>,
    catalog: Res<Catalog>,
    settings: Res<MonitorSettings>,
    mut bodies: Query<(&TrackedBody, &mut ApproachReading)>,
) {
    let at = sim_time.current;
    let inputs_changed = catalog.is_changed() || settings.is_changed() || ephemeris.is_changed();

    let reference = catalog
        .orbit(&settings.reference)
        .ok()
        .and_then(|elements| ephemeris.position(elements, at).ok());

    for (tracked, mut reading) in &mut bodies {
        if reading.at == Some(at) && !inputs_changed {
            continue;
        }

        let status = match separation_by_id(&ephemeris, &catalog, &tracked.id, &settings.reference, at) {
            Ok(separation) => {
                debug!(
                    "{} at {}: {:.3} LD ({})",
                    tracked.id,
                    at,
                    separation.lunar,
                    separation.severity()
                );
                ReadingStatus::Known(separation)
            }
            Err(err) => {
                if !matches!(reading.status, ReadingStatus::Unknown(_)) {
                    warn!("Distance of {} to {} unknown: {}", tracked.id, settings.reference, err);
                }
                ReadingStatus::Unknown(err.to_string())
            }
        };

        let event = catalog.nearest_event(&tracked.id, at);
        reading.near_approach = event.and_then(|e| e.is_near(at).ok()).unwrap_or(false);
        reading.display = match (catalog.orbit(&tracked.id), reference) {
            (Ok(elements), Some(earth)) => {
                display_position(&ephemeris, elements, &earth, event, tracked.index, at, settings.mode).ok()
            }
            _ => None,
        };
        reading.status = status;
        reading.at = Some(at);
    }
}

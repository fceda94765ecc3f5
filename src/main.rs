//! Flyby - headless close-approach monitor
//!
//! Loads an orbit export and an optional event feed, steps the simulation
//! clock day by day and logs distances, closest approaches and impact
//! scenarios for every tracked body.

use std::path::PathBuf;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use chrono::{TimeDelta, Utc};
use clap::Parser;

use flyby::approach::{PositionMode, SmoothingConfig, compare_with_event, find_closest_approach};
use flyby::catalog::{BodyId, Catalog};
use flyby::ephemeris::{Ephemeris, Planet, SolverPolicy};
use flyby::epoch;
use flyby::impact::{ImpactParams, ImpactScenario};
use flyby::monitor::{ApproachReading, MonitorPlugin, MonitorSettings, TrackedBody};
use flyby::time::{SimulationTime, TimePlugin};

/// Tolerance used when reporting propagated vs recorded miss distances.
const REPORT_TOLERANCE: f64 = 0.10;

#[derive(Parser, Debug)]
#[command(version, about = "Close-approach monitor for near-Earth objects")]
struct Args {
    /// Orbit export keyed by NEO reference id
    #[arg(long)]
    orbits: PathBuf,

    /// Close-approach event feed ({ "events": [...] })
    #[arg(long)]
    events: Option<PathBuf>,

    /// First simulated day (YYYY-MM-DD), today when omitted
    #[arg(long)]
    start: Option<String>,

    /// Number of days to simulate
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Use the fixed ten-iteration Kepler solve
    #[arg(long)]
    legacy_solver: bool,

    /// Report display positions with flyby smoothing near recorded events
    #[arg(long)]
    smooth: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut catalog = Catalog::with_reference_planets();
    catalog.load_orbits(&args.orbits)?;
    if let Some(events) = &args.events {
        catalog.load_events(events)?;
    }

    let start = match &args.start {
        Some(date) => epoch::parse_calendar_date(date)?,
        None => Utc::now(),
    };
    let policy = if args.legacy_solver {
        SolverPolicy::LEGACY
    } else {
        SolverPolicy::default()
    };
    let mode = if args.smooth {
        PositionMode::VisualSmoothing(SmoothingConfig::default())
    } else {
        PositionMode::Physical
    };

    let tracked: Vec<BodyId> = catalog
        .bodies()
        .filter(|b| Planet::from_name(b.id.as_str()).is_none())
        .map(|b| b.id.clone())
        .collect();

    let ephemeris = Ephemeris::new(policy);
    let mut clock = SimulationTime::starting_at(start);
    // Stepped explicitly below, not by wall time
    clock.paused = true;

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(ephemeris)
        .insert_resource(clock)
        .insert_resource(MonitorSettings {
            reference: BodyId::earth(),
            mode,
        })
        .insert_resource(catalog.clone())
        .add_plugins((TimePlugin, MonitorPlugin));

    for (index, id) in tracked.iter().enumerate() {
        app.world_mut().spawn(TrackedBody::new(id.clone(), index));
    }
    app.finish();
    app.cleanup();

    info!("Tracking {} bodies from {} for {} days", tracked.len(), start, args.days);

    let mut readings = app.world_mut().query::<(&TrackedBody, &ApproachReading)>();
    for day in 0..=args.days {
        app.update();

        for (body, reading) in readings.iter(app.world()) {
            if reading.near_approach
                && let Some(separation) = reading.separation()
            {
                let shown = reading.display.map(|p| p.vec).unwrap_or_default();
                info!(
                    "day {}: {} near recorded approach, {:.2} LD ({}), drawn at ({:.4}, {:.4}) AU",
                    day,
                    body.id,
                    separation.lunar,
                    separation.severity(),
                    shown.x,
                    shown.y
                );
            }
        }

        app.world_mut().resource_mut::<SimulationTime>().step_days(1.0)?;
    }

    let end = start + TimeDelta::days(i64::from(args.days.max(1)));
    let earth = Planet::Earth.elements();
    for id in &tracked {
        let Ok(elements) = catalog.orbit(id) else {
            continue;
        };
        match find_closest_approach(&ephemeris, elements, &earth, start, end, 1.0) {
            Ok(closest) => info!(
                "{}: closest {:.2} LD on {} ({})",
                id,
                closest.separation.lunar,
                closest.at,
                closest.separation.severity()
            ),
            Err(err) => warn!("{}: closest approach search failed: {}", id, err),
        }
    }

    let params = ImpactParams::default();
    for event in catalog.events() {
        match compare_with_event(&ephemeris, &catalog, event, &BodyId::earth()) {
            Ok(cmp) if cmp.within(REPORT_TOLERANCE) => info!(
                "{}: propagated {:.2} LD vs recorded {:.2} LD",
                event.name, cmp.computed.lunar, cmp.recorded.lunar
            ),
            Ok(cmp) => warn!(
                "{}: propagated {:.2} LD vs recorded {:.2} LD ({:.0}% off)",
                event.name,
                cmp.computed.lunar,
                cmp.recorded.lunar,
                cmp.relative_error * 100.0
            ),
            Err(err) => warn!("{}: distance unknown: {}", event.name, err),
        }

        match ImpactScenario::from_event(event, &params) {
            Ok(s) => info!(
                "{}: impact {:.2} MT ({:.2}k x Hiroshima), crater {:.2} km, severe blast {:.1} km, {} affected",
                event.name,
                s.energy_megatons,
                s.hiroshima_equivalents(),
                s.crater_diameter_km,
                s.zones.severe_blast,
                s.casualties
            ),
            Err(err) => warn!("{}: no impact scenario: {}", event.name, err),
        }
    }

    Ok(())
}

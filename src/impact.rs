//! Kinetic impact consequence model.
//!
//! An order-of-magnitude heuristic, not a risk assessment: diameter and
//! velocity give mass and kinetic energy, which give crater dimensions,
//! concentric damage radii, a seismic magnitude and a coarse casualty bucket.
//! Every step is a closed-form expression; nothing is simulated.

use std::f64::consts::PI;
use std::fmt;

use crate::catalog::CloseApproachEvent;

/// Joules per megaton of TNT.
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Divisor turning a yield in megatons into the reported Hiroshima figure.
///
/// The bomb yielded 15 kt, so `MT / 15` is the count in thousands of
/// Hiroshimas, the unit every report of this model uses.
pub const HIROSHIMA_DIVISOR: f64 = 15.0;

/// Scale applied to the diameter in km before cubing in the mass formula.
///
/// An approximation, not a derived radius: `diameter_km * 500` is the
/// radius in metres, cubed and multiplied by the density in kg/m³. Every
/// figure the model reports is calibrated against this constant.
pub const MASS_SCALE: f64 = 500.0;

/// Above this yield (MT) the seismic signal is felt globally.
pub const GLOBAL_SEISMIC_MEGATONS: f64 = 100.0;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImpactError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} is not finite")]
    NonFinite { field: &'static str },
}

fn ensure_positive(value: f64, field: &'static str) -> Result<f64, ImpactError> {
    if !value.is_finite() {
        return Err(ImpactError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ImpactError::NonPositive { field, value });
    }
    Ok(value)
}

/// Material and population assumptions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactParams {
    /// Impactor density, kg/m³ (rocky asteroid).
    pub density: f64,
    /// Target density, kg/m³ (continental crust).
    pub target_density: f64,
    /// People per km² inside the severe-blast radius.
    pub population_density: f64,
}

impl Default for ImpactParams {
    fn default() -> Self {
        Self {
            density: 2500.0,
            target_density: 2500.0,
            population_density: 1500.0,
        }
    }
}

impl ImpactParams {
    pub fn with_density(density: f64) -> Self {
        Self {
            density,
            ..Self::default()
        }
    }
}

/// Damage radii around ground zero, km.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageZones {
    pub fireball: f64,
    pub vaporization: f64,
    pub total_destruction: f64,
    pub severe_blast: f64,
    pub moderate_blast: f64,
    pub thermal_radiation: f64,
    pub airblast: f64,
}

impl DamageZones {
    fn from_crater_and_yield(crater_km: f64, megatons: f64) -> Self {
        let root = megatons.sqrt();
        Self {
            fireball: crater_km / 2.0,
            vaporization: crater_km * 0.75,
            total_destruction: crater_km * 2.0,
            severe_blast: root * 5.0,
            moderate_blast: root * 10.0,
            thermal_radiation: root * 15.0,
            airblast: root * 25.0,
        }
    }

    /// Zones from innermost to outermost, with display names.
    pub fn rings(&self) -> [(&'static str, f64); 7] {
        let mut rings = [
            ("fireball", self.fireball),
            ("vaporization", self.vaporization),
            ("total destruction", self.total_destruction),
            ("severe blast", self.severe_blast),
            ("moderate blast", self.moderate_blast),
            ("thermal radiation", self.thermal_radiation),
            ("air blast", self.airblast),
        ];
        rings.sort_by(|a, b| a.1.total_cmp(&b.1));
        rings
    }
}

/// Coarse casualty category. Deliberately not a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CasualtyBucket {
    TensOfThousands,
    HundredsOfThousands,
    Millions,
}

impl CasualtyBucket {
    pub fn from_affected(affected: f64) -> Self {
        if affected > 1e6 {
            CasualtyBucket::Millions
        } else if affected > 1e5 {
            CasualtyBucket::HundredsOfThousands
        } else {
            CasualtyBucket::TensOfThousands
        }
    }
}

impl fmt::Display for CasualtyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CasualtyBucket::Millions => "millions",
            CasualtyBucket::HundredsOfThousands => "hundreds of thousands",
            CasualtyBucket::TensOfThousands => "tens of thousands",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeismicReach {
    Regional,
    Global,
}

/// Consequences of one hypothetical impact. Recomputed per query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactScenario {
    pub diameter_km: f64,
    pub velocity_km_s: f64,
    pub mass_kg: f64,
    pub energy_joules: f64,
    pub energy_megatons: f64,
    pub crater_diameter_km: f64,
    pub crater_depth_km: f64,
    pub zones: DamageZones,
    pub seismic_magnitude: f64,
    /// People inside the severe-blast radius at the assumed density.
    pub affected_population: f64,
    pub casualties: CasualtyBucket,
}

impl ImpactScenario {
    /// Run the model for an impactor of `diameter_m` metres arriving at
    /// `velocity_kmh` km/h.
    pub fn compute(diameter_m: f64, velocity_kmh: f64, params: &ImpactParams) -> Result<Self, ImpactError> {
        ensure_positive(diameter_m, "diameter")?;
        ensure_positive(velocity_kmh, "velocity")?;
        ensure_positive(params.density, "density")?;
        ensure_positive(params.target_density, "target_density")?;
        if !params.population_density.is_finite() || params.population_density < 0.0 {
            return Err(ImpactError::NonPositive {
                field: "population_density",
                value: params.population_density,
            });
        }

        let diameter_km = diameter_m / 1000.0;
        let velocity_km_s = velocity_kmh / 3600.0;

        let mass_kg = (4.0 / 3.0) * PI * (diameter_km * MASS_SCALE).powi(3) * params.density;
        let energy_joules = 0.5 * mass_kg * (velocity_km_s * 1000.0).powi(2);
        let energy_megatons = energy_joules / JOULES_PER_MEGATON;

        let crater_diameter_km =
            1.8 * diameter_km * (params.density / params.target_density).powf(1.0 / 3.0) * velocity_km_s.powf(0.44);
        let crater_depth_km = crater_diameter_km / 4.0;

        let zones = DamageZones::from_crater_and_yield(crater_diameter_km, energy_megatons);
        let seismic_magnitude = 4.0 + energy_megatons.log10();

        let affected_population = PI * zones.severe_blast.powi(2) * params.population_density;

        Ok(Self {
            diameter_km,
            velocity_km_s,
            mass_kg,
            energy_joules,
            energy_megatons,
            crater_diameter_km,
            crater_depth_km,
            zones,
            seismic_magnitude,
            affected_population,
            casualties: CasualtyBucket::from_affected(affected_population),
        })
    }

    /// Scenario seeded from a recorded event: mean of its diameter range at
    /// its recorded velocity.
    pub fn from_event(event: &CloseApproachEvent, params: &ImpactParams) -> Result<Self, ImpactError> {
        Self::compute(event.mean_diameter_m(), event.velocity_kmh, params)
    }

    /// Yield in thousands of Hiroshima bombs (`MT / 15`).
    pub fn hiroshima_equivalents(&self) -> f64 {
        self.energy_megatons / HIROSHIMA_DIVISOR
    }

    pub fn seismic_reach(&self) -> SeismicReach {
        if self.energy_megatons > GLOBAL_SEISMIC_MEGATONS {
            SeismicReach::Global
        } else {
            SeismicReach::Regional
        }
    }
}

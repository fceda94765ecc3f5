//! Reference elements for the inner planets (J2000 epoch).
//!
//! Simplified to the ecliptic plane: only the argument of perihelion is
//! non-zero, so positions reduce to the planar case.

use super::elements::OrbitalElementSet;
use crate::types::J2000_JD;

/// Planets carried in the reference table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
}

impl Planet {
    pub const ALL: &'static [Planet] = &[Planet::Mercury, Planet::Venus, Planet::Earth, Planet::Mars];

    /// Human-readable name, also used as the catalog id.
    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Earth => "Earth",
            Planet::Mars => "Mars",
        }
    }

    pub fn from_name(name: &str) -> Option<Planet> {
        Planet::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Keplerian elements at J2000.0.
    pub fn elements(&self) -> OrbitalElementSet {
        match self {
            Planet::Mercury => MERCURY,
            Planet::Venus => VENUS,
            Planet::Earth => EARTH,
            Planet::Mars => MARS,
        }
    }
}

// a (AU), e, M0 (deg), ω (deg), i, Ω, period (days), epoch (JD)
const MERCURY: OrbitalElementSet =
    OrbitalElementSet::new_unchecked(0.387, 0.206, 174.796, 29.124, 0.0, 0.0, 88.0, J2000_JD);
const VENUS: OrbitalElementSet =
    OrbitalElementSet::new_unchecked(0.723, 0.007, 50.115, 54.884, 0.0, 0.0, 225.0, J2000_JD);
const EARTH: OrbitalElementSet =
    OrbitalElementSet::new_unchecked(1.0, 0.017, 358.617, 102.937, 0.0, 0.0, 365.25, J2000_JD);
const MARS: OrbitalElementSet =
    OrbitalElementSet::new_unchecked(1.524, 0.093, 19.373, 286.502, 0.0, 0.0, 687.0, J2000_JD);

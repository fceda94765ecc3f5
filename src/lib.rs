//! Flyby - near-Earth object close-approach and impact toolkit
//!
//! Propagates catalog orbital elements to heliocentric positions, evaluates
//! Earth-relative separations and models hypothetical kinetic impacts. The
//! simulation clock and live readings are exposed as Bevy plugins for
//! headless or rendered front ends.

pub mod approach;
pub mod catalog;
pub mod ephemeris;
pub mod epoch;
pub mod impact;
pub mod monitor;
pub mod time;
pub mod types;

//! Length corrections for known transcription errors in the source maps.
//!
//! Each entry names a base line (ordered station pair) whose recorded
//! distances were taken from a map on which that line measured
//! `map_length_feet`. Distances along that line are rescaled by the ratio of
//! the computed line length to the map length. Entries are matched by exact
//! ids only; no other line is ever rescaled.

use crate::units::feet10_to_metres;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthCorrection {
    pub from: &'static str,
    pub to: &'static str,
    pub map_length_feet: f64,
}

pub const LENGTH_CORRECTIONS: &[LengthCorrection] = &[LengthCorrection {
    from: "15-23",
    to: "15-22",
    map_length_feet: 216.0,
}];

impl LengthCorrection {
    /// Rescales `requested_m` by `measured_m / map length`.
    pub fn rescale(&self, measured_m: f64, requested_m: f64) -> f64 {
        measured_m / feet10_to_metres(self.map_length_feet) * requested_m
    }
}

/// Correction registered for the base line `from`→`to`, if any.
pub fn correction_for(from: &str, to: &str) -> Option<&'static LengthCorrection> {
    LENGTH_CORRECTIONS
        .iter()
        .find(|c| c.from == from && c.to == to)
}

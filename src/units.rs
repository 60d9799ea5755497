//! Historical Prussian length and angle units used by the field books.

use crate::types::LengthUnit;

/// Metres per foot when a rod counts 10 feet (1 rod = 3.766242 m).
pub const METRES_PER_FOOT_10: f64 = 0.376_624_2;
/// Metres per foot when a rod counts 12 feet (1 rod = 3.766242 m as well,
/// but split into the older 12-foot division).
pub const METRES_PER_FOOT_12: f64 = 0.313_853_5;
/// Feet per rod for the survey-foot tables.
pub const FEET_PER_ROD: f64 = 10.0;
/// Gon per full turn.
pub const GON_PER_TURN: f64 = 400.0;

/// Converts survey feet (10 per rod) into metres.
#[inline]
pub fn feet10_to_metres(feet: f64) -> f64 {
    feet * METRES_PER_FOOT_10
}

/// Converts Prussian feet (12 per rod) into metres.
#[inline]
pub fn feet12_to_metres(feet: f64) -> f64 {
    feet * METRES_PER_FOOT_12
}

/// Converts a literal length into metres. Returns `None` for
/// [`LengthUnit::Percent`], which only has a meaning relative to a base line.
pub fn length_to_metres(length: f64, unit: LengthUnit) -> Option<f64> {
    match unit {
        LengthUnit::Feet10 => Some(feet10_to_metres(length)),
        LengthUnit::Feet12 => Some(feet12_to_metres(length)),
        LengthUnit::Percent => None,
    }
}

#[inline]
pub fn rods_to_feet(rods: f64) -> f64 {
    rods * FEET_PER_ROD
}

#[inline]
pub fn gon_to_degrees(gon: f64) -> f64 {
    gon / GON_PER_TURN * 360.0
}

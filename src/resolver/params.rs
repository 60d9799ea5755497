//! Parameter types configuring the resolver.

use serde::Serialize;

/// Resolution mode of one fixed-point pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolveMode {
    /// MultiWay points are cross-checked and only settle once every
    /// candidate resolves (mean of all candidates).
    Strict,
    /// MultiWay points take the first candidate that resolves, unchecked.
    Lenient,
}

impl ResolveMode {
    #[inline]
    pub fn is_strict(self) -> bool {
        matches!(self, ResolveMode::Strict)
    }
}

impl From<bool> for ResolveMode {
    fn from(strict: bool) -> Self {
        if strict {
            ResolveMode::Strict
        } else {
            ResolveMode::Lenient
        }
    }
}

/// Knobs of the fixed-point driver and the MultiWay consistency checks.
#[derive(Clone, Debug)]
pub struct ResolverParams {
    /// Maximum per-axis difference (map units) between two absolute
    /// candidates before they are flagged.
    pub absolute_tolerance: f64,
    /// Maximum turning-angle difference (degrees) between two relative
    /// candidates on the same base line.
    pub angle_tolerance_deg: f64,
    /// Re-run leniently from the input state when strict does not converge.
    pub lenient_fallback: bool,
}

impl Default for ResolverParams {
    fn default() -> Self {
        Self {
            absolute_tolerance: 20.0,
            angle_tolerance_deg: 0.01,
            lenient_fallback: true,
        }
    }
}

//! Point resolution: the single-step resolver and the fixed-point driver.
//!
//! - `step`: dispatch of one point against the current network state.
//! - `relative`: bearing/distance construction with unit handling.
//! - `corrections`: fixed table of base lines whose map distances are rescaled.
//! - `multiway`: strict cross-checking and lenient first-wins merge.
//! - `linker`: anchors district-local frames through shared points.
//! - `driver`: strict pass, optional lenient re-run, report assembly.
//! - `diagnose`: reasons for points left unresolved.

mod diagnose;
mod driver;
mod linker;
mod multiway;
mod relative;
mod step;

pub mod corrections;
pub mod params;

pub use corrections::{correction_for, LengthCorrection, LENGTH_CORRECTIONS};
pub use diagnose::unresolved_points;
pub use driver::Resolver;
pub use params::{ResolveMode, ResolverParams};
pub use step::{resolve, resolve_point};

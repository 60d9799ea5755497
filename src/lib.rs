#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod network;
pub mod point;
pub mod resolver;
pub mod types;

// Helpers used by the command-line tool.
pub mod config;
pub mod io;

// Numeric building blocks.
pub mod geometry;
pub mod units;

// --- High-level re-exports -------------------------------------------------

// Main entry points: network + driver.
pub use crate::error::NetworkError;
pub use crate::network::PointNetwork;
pub use crate::resolver::{resolve, Resolver, ResolverParams};
pub use crate::types::{Coord, ResolvedPoint};

// Report returned by the driver.
pub use crate::diagnostics::ResolutionReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use cadastral_resolver::prelude::*;
///
/// let mut net = PointNetwork::new();
/// net.insert(Point::absolute("A", 0.0, 0.0)).unwrap();
/// net.insert(Point::absolute("B", 2.0, 0.0)).unwrap();
/// net.insert(Point::average("M", ["A", "B"])).unwrap();
///
/// let report = Resolver::default().run(&mut net).unwrap();
/// assert!(report.is_fully_resolved());
/// assert_eq!(net.position("M"), Some(Coord::new(1.0, 0.0)));
/// ```
pub mod prelude {
    pub use crate::point::{Descriptor, FrameKey, Point, RelativeDef};
    pub use crate::types::{Coord, LengthUnit, PointKind};
    pub use crate::{PointNetwork, ResolutionReport, Resolver, ResolverParams};
}

//! Serializable diagnostics produced by a resolution run.
//!
//! [`ResolutionReport`] is the main entry point returned by the resolver. It
//! summarises every pass, lists the local frames that were anchored, the
//! MultiWay inconsistencies found in strict mode (with debug points for map
//! inspection), and every point that stayed unresolved together with the
//! reason.

pub mod consistency;
pub mod report;
pub mod timing;
pub mod unresolved;

pub use consistency::{ConsistencyCheck, DebugPoint, Inconsistency, ResolveTrace};
pub use report::{FrameReport, PassSummary, ResolutionReport};
pub use timing::{StageTiming, TimingBreakdown};
pub use unresolved::{UnresolvedPoint, UnresolvedReason};

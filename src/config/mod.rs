//! JSON configuration of the command-line tool.
//!
//! - `run`: run config (input, outputs, export filter, resolver overrides).
//! - `input`: network input file (frames, points, traverses).

pub mod input;
pub mod run;

pub use input::{load_network, NetworkInput};
pub use run::{load_config, OutputConfig, ResolverConfig, RunConfig};

//! Point definitions and district-local coordinate frames.
//!
//! A [`Point`] pairs a stable id with one [`Descriptor`]. Descriptors form a
//! closed set: absolute and district-local coordinates, bearing/distance
//! constructions ([`RelativeDef`]), aliases, averages, line intersections and
//! [`MultiWay`] nodes that hold several independent definitions of the same
//! point. Only Absolute starts out resolved.

mod descriptor;
mod frame;

pub use descriptor::{Descriptor, MultiWay, Point, RelativeDef};
pub use frame::{FrameKey, LocalFrame, LocalFrames};

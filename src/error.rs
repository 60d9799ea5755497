use crate::point::FrameKey;
use crate::types::{PointId, PointKind};

/// Contract violations raised while building or resolving a network.
///
/// Missing references, degenerate geometry and inconsistent duplicates are
/// data problems and never surface here; they are logged and reported.
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkError {
    /// Two definitions with different ids were merged into one MultiWay node.
    IdMismatch { expected: PointId, found: PointId },
    /// Two definitions of the same id disagree on the point category.
    KindMismatch {
        id: PointId,
        expected: PointKind,
        found: PointKind,
    },
    /// A MultiWay node arrived without any candidate.
    EmptyMultiWay { id: PointId },
    /// A local frame that already has an offset was solved a second time.
    FrameAlreadySolved { frame: FrameKey, anchor: PointId },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::IdMismatch { expected, found } => {
                write!(f, "not the same point: {found} merged into {expected}")
            }
            NetworkError::KindMismatch {
                id,
                expected,
                found,
            } => write!(
                f,
                "point {id} defined as {expected:?} and as {found:?}"
            ),
            NetworkError::EmptyMultiWay { id } => {
                write!(f, "multi-way point {id} without candidates")
            }
            NetworkError::FrameAlreadySolved { frame, anchor } => write!(
                f,
                "local frame {frame} already solved (second anchor {anchor})"
            ),
        }
    }
}

impl std::error::Error for NetworkError {}

use crate::point::FrameKey;
use crate::types::PointId;
use serde::Serialize;

/// Why a point still has no global coordinate after a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UnresolvedReason {
    /// The definition refers to itself.
    SelfReference,
    /// Referenced ids are absent from the collection.
    MissingReferences { ids: Vec<PointId> },
    /// Referenced points exist but never resolved (a cycle, or a chain that
    /// ends in a missing or degenerate point).
    WaitingOn { ids: Vec<PointId> },
    /// The point lives in a local frame that was never anchored.
    UnsolvedFrame { frame: FrameKey },
    /// An intersection needs exactly four reference points.
    IllegalIntersection { refs: usize },
    /// An average needs at least two reference points.
    IllegalAverage { refs: usize },
    /// All inputs are known but the geometry has no finite solution.
    Degenerate,
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnresolvedReason::SelfReference => write!(f, "references itself"),
            UnresolvedReason::MissingReferences { ids } => {
                write!(f, "unknown points {}", ids.join(", "))
            }
            UnresolvedReason::WaitingOn { ids } => {
                write!(f, "depends on unresolved points {}", ids.join(", "))
            }
            UnresolvedReason::UnsolvedFrame { frame } => {
                write!(f, "local frame {frame} is not anchored")
            }
            UnresolvedReason::IllegalIntersection { refs } => {
                write!(f, "intersection with {refs} instead of 4 points")
            }
            UnresolvedReason::IllegalAverage { refs } => {
                write!(f, "average of {refs} instead of at least 2 points")
            }
            UnresolvedReason::Degenerate => write!(f, "degenerate geometry"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedPoint {
    pub id: PointId,
    pub variant: &'static str,
    pub reason: UnresolvedReason,
}

//! Explains why points are still unresolved after a run.

use crate::diagnostics::{UnresolvedPoint, UnresolvedReason};
use crate::network::PointNetwork;
use crate::point::{Descriptor, Point};
use crate::types::PointId;

/// Unresolved points of `network` in insertion order, each with the most
/// specific reason found.
pub fn unresolved_points(network: &PointNetwork) -> Vec<UnresolvedPoint> {
    network
        .iter()
        .filter(|p| !p.is_absolute())
        .map(|p| UnresolvedPoint {
            id: p.id.clone(),
            variant: p.variant_name(),
            reason: reason(p, network),
        })
        .collect()
}

fn reason(point: &Point, network: &PointNetwork) -> UnresolvedReason {
    match &point.descriptor {
        Descriptor::Intersect { refs } if refs.len() != 4 => {
            return UnresolvedReason::IllegalIntersection { refs: refs.len() };
        }
        Descriptor::Average { refs } if refs.len() < 2 => {
            return UnresolvedReason::IllegalAverage { refs: refs.len() };
        }
        Descriptor::LocalAbsolute { frame, .. } => {
            return UnresolvedReason::UnsolvedFrame {
                frame: frame.clone(),
            };
        }
        _ => {}
    }

    let refs = point.references();
    if refs.iter().any(|r| *r == point.id) {
        return UnresolvedReason::SelfReference;
    }

    let missing: Vec<PointId> = refs
        .iter()
        .filter(|r| !network.contains(r))
        .map(|r| r.to_string())
        .collect();
    if !missing.is_empty() {
        return UnresolvedReason::MissingReferences { ids: missing };
    }

    let waiting: Vec<PointId> = refs
        .iter()
        .filter(|r| network.position(r).is_none())
        .map(|r| r.to_string())
        .collect();
    if !waiting.is_empty() {
        return UnresolvedReason::WaitingOn { ids: waiting };
    }

    if let Some(frame) = point
        .frames()
        .into_iter()
        .find(|f| !network.frames().is_solved(f))
    {
        return UnresolvedReason::UnsolvedFrame {
            frame: frame.clone(),
        };
    }

    UnresolvedReason::Degenerate
}

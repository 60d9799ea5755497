//! Anchors district-local frames to the global frame.
//!
//! A frame is tied once one of its points is also known globally. Since ids
//! are unique, such a point is always a MultiWay node holding a
//! LocalAbsolute candidate next to at least one global definition.

use super::params::{ResolveMode, ResolverParams};
use super::step::resolve_point;
use crate::diagnostics::ResolveTrace;
use crate::error::NetworkError;
use crate::network::PointNetwork;
use crate::point::{Descriptor, FrameKey, Point};
use crate::types::{Coord, PointId};
use log::debug;

struct Anchor {
    frame: FrameKey,
    point: PointId,
    global: Coord,
    local: Coord,
}

/// Solves every unsolved frame that has a globally resolvable anchor and
/// returns the frames solved, in network order.
pub(crate) fn link_local_frames(network: &mut PointNetwork) -> Result<Vec<FrameKey>, NetworkError> {
    let anchors = find_anchors(network);
    let mut linked = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        let offset = network
            .frames_mut()
            .solve(&anchor.frame, &anchor.point, anchor.global, anchor.local)?;
        debug!(
            "link_local_frames: frame {} anchored at {} offset=({:.3}, {:.3})",
            anchor.frame, anchor.point, offset.x, offset.y
        );
        linked.push(anchor.frame);
    }
    Ok(linked)
}

fn find_anchors(network: &PointNetwork) -> Vec<Anchor> {
    let mut anchors: Vec<Anchor> = Vec::new();
    for point in network.iter() {
        let Descriptor::MultiWay(mw) = &point.descriptor else {
            continue;
        };
        for candidate in &mw.candidates {
            let Descriptor::LocalAbsolute {
                local_x,
                local_y,
                frame,
            } = &candidate.descriptor
            else {
                continue;
            };
            if network.frames().is_solved(frame) || anchors.iter().any(|a| &a.frame == frame) {
                continue;
            }
            if let Some(global) = global_position(point, network) {
                anchors.push(Anchor {
                    frame: frame.clone(),
                    point: point.id.clone(),
                    global,
                    local: Coord::new(*local_x, *local_y),
                });
            }
        }
    }
    anchors
}

/// Cached position of the node, else the first candidate defined outside a
/// local frame that resolves. Candidates whose references are not resolved
/// yet are skipped quietly; the sweep itself warns about missing ones.
fn global_position(point: &Point, network: &PointNetwork) -> Option<Coord> {
    if let Some(pos) = point.position() {
        return Some(pos);
    }
    let Descriptor::MultiWay(mw) = &point.descriptor else {
        return None;
    };
    let params = ResolverParams::default();
    let mut trace = ResolveTrace::new();
    mw.candidates
        .iter()
        .filter(|c| !matches!(c.descriptor, Descriptor::LocalAbsolute { .. }))
        .filter(|c| references_resolved(c, network))
        .find_map(|c| resolve_point(c, network, ResolveMode::Lenient, &params, &mut trace))
        .map(|r| r.position())
}

fn references_resolved(candidate: &Point, network: &PointNetwork) -> bool {
    candidate
        .references()
        .iter()
        .all(|r| network.position(r).is_some())
}

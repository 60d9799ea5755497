//! Single-step resolution of one point against the current network state.

use super::multiway::resolve_multi_way;
use super::params::{ResolveMode, ResolverParams};
use super::relative::resolve_relative;
use crate::diagnostics::ResolveTrace;
use crate::geometry;
use crate::network::PointNetwork;
use crate::point::{Descriptor, FrameKey, Point};
use crate::types::{Coord, PointId, ResolvedPoint};
use log::warn;

/// Attempts to resolve `point` with default parameters, discarding
/// consistency findings. `None` means "not (yet) resolvable".
pub fn resolve(point: &Point, network: &PointNetwork, strict: bool) -> Option<ResolvedPoint> {
    let mut trace = ResolveTrace::new();
    resolve_point(
        point,
        network,
        ResolveMode::from(strict),
        &ResolverParams::default(),
        &mut trace,
    )
}

/// Attempts to resolve `point`; MultiWay findings are recorded in `trace`.
pub fn resolve_point(
    point: &Point,
    network: &PointNetwork,
    mode: ResolveMode,
    params: &ResolverParams,
    trace: &mut ResolveTrace,
) -> Option<ResolvedPoint> {
    let id = point.id.as_str();
    match &point.descriptor {
        Descriptor::Absolute { x, y } => Some(ResolvedPoint::new(id, Coord::new(*x, *y))),
        Descriptor::LocalAbsolute {
            local_x,
            local_y,
            frame,
        } => resolve_local(id, Coord::new(*local_x, *local_y), frame, network),
        Descriptor::Relative(def) => resolve_relative(id, def, network),
        Descriptor::Alias { target, resolved } => match resolved {
            Some(pos) => Some(ResolvedPoint::new(id, *pos)),
            None => {
                let pos = reference_positions(id, std::slice::from_ref(target), network)?;
                Some(ResolvedPoint::new(id, pos[0]))
            }
        },
        Descriptor::Average { refs } => resolve_average(id, refs, network),
        Descriptor::Intersect { refs } => resolve_intersect(id, refs, network),
        Descriptor::MultiWay(mw) => resolve_multi_way(id, mw, network, mode, params, trace),
    }
}

fn resolve_local(id: &str, local: Coord, frame: &FrameKey, network: &PointNetwork) -> Option<ResolvedPoint> {
    let global = network.frames().get(frame)?.to_global(local)?;
    Some(ResolvedPoint::new(id, global))
}

fn resolve_average(id: &str, refs: &[PointId], network: &PointNetwork) -> Option<ResolvedPoint> {
    if refs.len() < 2 {
        warn!("illegal average {id}: {} reference points", refs.len());
        return None;
    }
    let positions = reference_positions(id, refs, network)?;
    geometry::mean(&positions).map(|pos| ResolvedPoint::new(id, pos))
}

fn resolve_intersect(id: &str, refs: &[PointId], network: &PointNetwork) -> Option<ResolvedPoint> {
    if refs.len() != 4 {
        warn!("illegal intersection {id}: {} reference points", refs.len());
        return None;
    }
    let p = reference_positions(id, refs, network)?;
    match geometry::intersect_lines(&p[0], &p[1], &p[2], &p[3]) {
        Some(hit) => Some(ResolvedPoint::new(id, hit)),
        None => {
            warn!("no intersection for {id}");
            None
        }
    }
}

/// Positions of all `refs`, or `None` as soon as one is unknown (warned) or
/// not resolved yet.
pub(crate) fn reference_positions(owner: &str, refs: &[PointId], network: &PointNetwork) -> Option<Vec<Coord>> {
    let mut positions = Vec::with_capacity(refs.len());
    for r in refs {
        let Some(point) = network.get(r) else {
            warn!("unknown point {r} referenced by {owner}");
            return None;
        };
        positions.push(point.position()?);
    }
    Some(positions)
}

use super::corrections::correction_for;
use super::step::reference_positions;
use crate::geometry::{self, direction, point_along, rotate_deg};
use crate::network::PointNetwork;
use crate::point::RelativeDef;
use crate::types::{Coord, LengthUnit, ResolvedPoint};
use crate::units::{feet10_to_metres, length_to_metres};
use log::warn;

/// Resolves a bearing/distance definition once p1 and p2 are known.
///
/// The base point lies on the line p1→p2 at the base distance measured from
/// p1; the target is reached from there by rotating the p1→p2 direction by
/// `angle` degrees and walking `length` survey feet.
pub(crate) fn resolve_relative(id: &str, def: &RelativeDef, network: &PointNetwork) -> Option<ResolvedPoint> {
    let refs = [def.p1.clone(), def.p2.clone()];
    let positions = reference_positions(id, &refs, network)?;
    let (p1, p2) = (positions[0], positions[1]);

    let Some(dir) = direction(&p1, &p2) else {
        warn!("calculation failed (NaN): {id} has coincident base points {} and {}", def.p1, def.p2);
        return None;
    };

    let base = point_along(&p1, &dir, base_distance(def, &p1, &p2));
    let heading = rotate_deg(&dir, def.angle);
    let target = point_along(&base, &heading, feet10_to_metres(def.length));

    if !geometry::is_finite(&target) {
        warn!("calculation failed (NaN): {id}");
        return None;
    }
    Some(ResolvedPoint::new(id, target))
}

/// Distance from p1 to the base point in metres.
fn base_distance(def: &RelativeDef, p1: &Coord, p2: &Coord) -> f64 {
    let measured = (p2 - p1).norm();
    match (def.unit, length_to_metres(def.length_p1p2, def.unit)) {
        (LengthUnit::Percent, _) | (_, None) => measured * def.length_p1p2 / 100.0,
        (_, Some(requested)) => match correction_for(&def.p1, &def.p2) {
            Some(correction) => correction.rescale(measured, requested),
            None => requested,
        },
    }
}

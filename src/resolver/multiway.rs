//! Merge resolution of points recorded by several independent sources.

use super::params::{ResolveMode, ResolverParams};
use super::step::resolve_point;
use crate::diagnostics::{ConsistencyCheck, DebugPoint, Inconsistency, ResolveTrace};
use crate::geometry;
use crate::network::PointNetwork;
use crate::point::{Descriptor, MultiWay, Point, RelativeDef};
use crate::types::{Coord, ResolvedPoint};
use log::warn;

pub(crate) fn resolve_multi_way(
    id: &str,
    mw: &MultiWay,
    network: &PointNetwork,
    mode: ResolveMode,
    params: &ResolverParams,
    trace: &mut ResolveTrace,
) -> Option<ResolvedPoint> {
    if let Some(pos) = mw.resolved {
        return Some(ResolvedPoint::new(id, pos));
    }
    match mode {
        ResolveMode::Lenient => mw
            .candidates
            .iter()
            .find_map(|c| resolve_point(c, network, mode, params, trace))
            .map(|r| ResolvedPoint::new(id, r.position())),
        ResolveMode::Strict => resolve_strict(id, mw, network, params, trace),
    }
}

/// Cross-checks all candidates, then settles on their mean only when every
/// candidate resolves.
fn resolve_strict(
    id: &str,
    mw: &MultiWay,
    network: &PointNetwork,
    params: &ResolverParams,
    trace: &mut ResolveTrace,
) -> Option<ResolvedPoint> {
    let mut findings = raw_inconsistencies(id, &mw.candidates, params);

    let resolved: Vec<(usize, Coord)> = mw
        .candidates
        .iter()
        .enumerate()
        .filter_map(|(i, c)| {
            resolve_point(c, network, ResolveMode::Strict, params, trace).map(|r| (i, r.position()))
        })
        .collect();
    findings.extend(spread_inconsistencies(id, &resolved, params.absolute_tolerance));

    for finding in findings {
        if trace.record(finding.clone()) {
            warn!("{finding}");
        }
    }

    let positions: Vec<Coord> = resolved.iter().map(|(_, pos)| *pos).collect();
    if trace.is_flagged(id) {
        trace.record_debug_points(id, DebugPoint::for_candidates(id, &positions));
    }

    if resolved.len() < mw.candidates.len() {
        return None;
    }
    geometry::mean(&positions).map(|pos| ResolvedPoint::new(id, pos))
}

/// Pairwise comparison of the raw candidate definitions.
fn raw_inconsistencies(id: &str, candidates: &[Point], params: &ResolverParams) -> Vec<Inconsistency> {
    let mut findings = Vec::new();
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let found = match (&candidates[i].descriptor, &candidates[j].descriptor) {
                (Descriptor::Relative(a), Descriptor::Relative(b)) => {
                    relative_mismatch(a, b, params.angle_tolerance_deg)
                        .map(|delta| (ConsistencyCheck::RelativeDefinition, delta))
                }
                (Descriptor::Absolute { x: ax, y: ay }, Descriptor::Absolute { x: bx, y: by }) => {
                    let (a, b) = (Coord::new(*ax, *ay), Coord::new(*bx, *by));
                    exceeds(&a, &b, params.absolute_tolerance)
                        .then(|| (ConsistencyCheck::AbsolutePosition, (a - b).norm()))
                }
                _ => None,
            };
            if let Some((check, delta)) = found {
                findings.push(Inconsistency {
                    point_id: id.to_string(),
                    check,
                    candidates: [i, j],
                    delta,
                });
            }
        }
    }
    findings
}

/// Angle difference of two definitions on the same base line, if they
/// disagree. Definitions on different base lines are not comparable.
fn relative_mismatch(a: &RelativeDef, b: &RelativeDef, angle_tolerance: f64) -> Option<f64> {
    if a.p1 != b.p1 || a.p2 != b.p2 {
        return None;
    }
    let angle_delta = (a.angle - b.angle).abs();
    let differs = a.length != b.length
        || a.length_p1p2 != b.length_p1p2
        || a.unit != b.unit
        || angle_delta > angle_tolerance;
    differs.then_some(angle_delta)
}

fn spread_inconsistencies(id: &str, resolved: &[(usize, Coord)], tolerance: f64) -> Vec<Inconsistency> {
    let mut findings = Vec::new();
    for (k, (i, a)) in resolved.iter().enumerate() {
        for (j, b) in &resolved[k + 1..] {
            if exceeds(a, b, tolerance) {
                findings.push(Inconsistency {
                    point_id: id.to_string(),
                    check: ConsistencyCheck::ResolvedPosition,
                    candidates: [*i, *j],
                    delta: (a - b).norm(),
                });
            }
        }
    }
    findings
}

#[inline]
fn exceeds(a: &Coord, b: &Coord, tolerance: f64) -> bool {
    (a.x - b.x).abs() > tolerance || (a.y - b.y).abs() > tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LengthUnit;

    fn multi_way(points: Vec<Point>) -> (PointNetwork, MultiWay) {
        let mut network = PointNetwork::new();
        network.extend(points).unwrap();
        let Descriptor::MultiWay(mw) = network.get("4-12").unwrap().descriptor.clone() else {
            panic!("expected a MultiWay node");
        };
        (network, mw)
    }

    fn strict(network: &PointNetwork, mw: &MultiWay, trace: &mut ResolveTrace) -> Option<ResolvedPoint> {
        resolve_multi_way("4-12", mw, network, ResolveMode::Strict, &ResolverParams::default(), trace)
    }

    #[test]
    fn absolute_candidates_beyond_tolerance_are_flagged() {
        let (net, mw) = multi_way(vec![
            Point::absolute("4-12", 100.0, 100.0),
            Point::absolute("4-12", 100.0, 121.0),
        ]);
        let mut trace = ResolveTrace::new();
        let r = strict(&net, &mw, &mut trace).unwrap();

        assert_eq!(r.position(), Coord::new(100.0, 110.5));
        let checks: Vec<ConsistencyCheck> = trace.inconsistencies().map(|f| f.check).collect();
        assert_eq!(
            checks,
            vec![ConsistencyCheck::AbsolutePosition, ConsistencyCheck::ResolvedPosition]
        );
        let ids: Vec<&str> = trace.debug_points().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["4-12v1", "4-12v2"]);
    }

    #[test]
    fn absolute_candidates_within_tolerance_pass() {
        let (net, mw) = multi_way(vec![
            Point::absolute("4-12", 100.0, 100.0),
            Point::absolute("4-12", 100.0, 115.0),
        ]);
        let mut trace = ResolveTrace::new();
        let r = strict(&net, &mw, &mut trace).unwrap();
        assert_eq!(r.position(), Coord::new(100.0, 107.5));
        assert_eq!(trace.inconsistency_count(), 0);
        assert_eq!(trace.debug_points().count(), 0);
    }

    #[test]
    fn relative_candidates_on_same_base_line_are_compared() {
        let def = |angle: f64| RelativeDef {
            p1: "a".into(),
            p2: "b".into(),
            length_p1p2: 50.0,
            unit: LengthUnit::Percent,
            angle,
            length: 10.0,
        };
        let (net, mw) = multi_way(vec![
            Point::absolute("a", 0.0, 0.0),
            Point::absolute("b", 10.0, 0.0),
            Point::relative("4-12", def(90.0)),
            Point::relative("4-12", def(90.005)),
            Point::relative("4-12", def(90.5)),
        ]);
        let mut trace = ResolveTrace::new();
        strict(&net, &mw, &mut trace).unwrap();

        let pairs: Vec<[usize; 2]> = trace
            .inconsistencies()
            .filter(|f| f.check == ConsistencyCheck::RelativeDefinition)
            .map(|f| f.candidates)
            .collect();
        assert_eq!(pairs, vec![[0, 2], [1, 2]]);
    }

    fn base_def(p1: &str, p2: &str) -> RelativeDef {
        RelativeDef {
            p1: p1.into(),
            p2: p2.into(),
            length_p1p2: 5.0,
            unit: LengthUnit::Feet10,
            angle: 90.0,
            length: 10.0,
        }
    }

    fn relative_findings(other: RelativeDef) -> Vec<Inconsistency> {
        let candidates = vec![
            Point::relative("4-12", base_def("a", "b")),
            Point::relative("4-12", other),
        ];
        raw_inconsistencies("4-12", &candidates, &ResolverParams::default())
    }

    #[test]
    fn any_difference_besides_angle_is_flagged() {
        let variants = [
            RelativeDef {
                length: 11.0,
                ..base_def("a", "b")
            },
            RelativeDef {
                unit: LengthUnit::Feet12,
                ..base_def("a", "b")
            },
            RelativeDef {
                length_p1p2: 5.5,
                ..base_def("a", "b")
            },
        ];
        for other in variants {
            let findings = relative_findings(other.clone());
            assert_eq!(findings.len(), 1, "not flagged: {other:?}");
            assert_eq!(findings[0].check, ConsistencyCheck::RelativeDefinition);
            assert_eq!(findings[0].candidates, [0, 1]);
            assert_eq!(findings[0].delta, 0.0);
        }
        assert!(relative_findings(base_def("a", "b")).is_empty());
    }

    #[test]
    fn definitions_on_different_base_lines_are_not_compared() {
        let swapped = RelativeDef {
            length: 40.0,
            angle: -90.0,
            ..base_def("b", "a")
        };
        assert!(relative_findings(swapped).is_empty());
        assert!(relative_findings(base_def("a", "c")).is_empty());
    }

    #[test]
    fn strict_waits_for_every_candidate() {
        let (net, mw) = multi_way(vec![
            Point::absolute("4-12", 100.0, 100.0),
            Point::alias("4-12", "pending"),
            Point::average("pending", ["elsewhere", "nowhere"]),
        ]);
        let mut trace = ResolveTrace::new();
        assert!(strict(&net, &mw, &mut trace).is_none());
    }

    #[test]
    fn lenient_takes_first_resolvable_candidate() {
        let (net, mw) = multi_way(vec![
            Point::alias("4-12", "pending"),
            Point::absolute("4-12", 100.0, 100.0),
            Point::absolute("4-12", 300.0, 300.0),
            Point::average("pending", ["elsewhere", "nowhere"]),
        ]);
        let mut trace = ResolveTrace::new();
        let r = resolve_multi_way(
            "4-12",
            &mw,
            &net,
            ResolveMode::Lenient,
            &ResolverParams::default(),
            &mut trace,
        )
        .unwrap();
        assert_eq!(r.position(), Coord::new(100.0, 100.0));
        assert_eq!(trace.inconsistency_count(), 0);
    }

    #[test]
    fn repeated_checks_warn_once() {
        let (net, mw) = multi_way(vec![
            Point::absolute("4-12", 0.0, 0.0),
            Point::absolute("4-12", 50.0, 0.0),
            Point::alias("4-12", "never"),
        ]);
        let mut trace = ResolveTrace::new();
        assert!(strict(&net, &mw, &mut trace).is_none());
        assert!(strict(&net, &mw, &mut trace).is_none());
        assert_eq!(trace.inconsistency_count(), 2);
    }
}

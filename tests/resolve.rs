mod common;

use cadastral_resolver::diagnostics::{ConsistencyCheck, UnresolvedReason};
use cadastral_resolver::prelude::*;
use cadastral_resolver::resolver::ResolveMode;
use cadastral_resolver::units::feet10_to_metres;
use common::fixtures::{acyclic_network, conflicting_sources, dorf_frame, framed_network, open_traverse};
use common::{approx_eq, init_logger};

#[test]
fn acyclic_network_converges_in_strict_mode() {
    init_logger();
    let mut net = acyclic_network();
    let report = Resolver::default().run(&mut net).unwrap();

    assert!(report.strict_converged);
    assert!(report.is_fully_resolved());
    assert_eq!(report.final_mode(), Some(ResolveMode::Strict));
    assert_eq!(report.resolved_count, report.point_count);

    assert!(approx_eq(net.position("M"), 5.0, 0.0));
    assert!(approx_eq(net.position("R"), 5.0, 0.0));
    assert!(approx_eq(net.position("X"), 5.0, 5.0));
    assert!(approx_eq(net.position("AL"), 5.0, 5.0));
    // resolved computed points are replaced, aliases keep their redirect
    assert!(matches!(net.get("M").unwrap().descriptor, Descriptor::Absolute { .. }));
    assert!(matches!(net.get("AL").unwrap().descriptor, Descriptor::Alias { .. }));
}

#[test]
fn cycles_terminate_and_are_reported() {
    init_logger();
    let mut net = PointNetwork::new();
    net.extend([
        Point::absolute("A", 0.0, 0.0),
        Point::alias("self", "self"),
        Point::alias("x", "y"),
        Point::alias("y", "x"),
    ])
    .unwrap();

    let report = Resolver::default().run(&mut net).unwrap();
    assert!(!report.is_fully_resolved());
    assert_eq!(report.passes.len(), 2);
    assert!(report.passes.iter().all(|p| !p.converged));

    let unresolved: Vec<(&str, &UnresolvedReason)> = report
        .unresolved
        .iter()
        .map(|u| (u.id.as_str(), &u.reason))
        .collect();
    assert_eq!(unresolved.len(), 3);
    assert_eq!(unresolved[0], ("self", &UnresolvedReason::SelfReference));
    assert!(matches!(unresolved[1].1, UnresolvedReason::WaitingOn { ids } if ids == &["y"]));
}

#[test]
fn local_point_resolves_after_frame_is_anchored() {
    init_logger();
    let mut net = framed_network();
    let pending = net.get("1-2").unwrap().clone();
    assert!(cadastral_resolver::resolve(&pending, &net, true).is_none());

    let report = Resolver::default().run(&mut net).unwrap();
    assert!(report.strict_converged);
    assert!(approx_eq(net.position("1-2"), 1005.0, 2005.0));
    assert!(approx_eq(net.position("1-1"), 1010.0, 2010.0));

    assert_eq!(report.passes[0].frames_linked, 1);
    let frame = &report.frames[0];
    assert_eq!(frame.frame, dorf_frame().to_string());
    assert_eq!(frame.offset, Some([1000.0, 2000.0]));
    assert_eq!(frame.anchor.as_deref(), Some("1-1"));
}

#[test]
fn unanchored_frame_leaves_points_unresolved() {
    init_logger();
    let mut net = PointNetwork::new();
    net.insert(Point::local("9-1", dorf_frame(), 1.0, 1.0)).unwrap();
    let report = Resolver::default().run(&mut net).unwrap();
    assert_eq!(
        report.unresolved[0].reason,
        UnresolvedReason::UnsolvedFrame { frame: dorf_frame() }
    );
    assert!(report.frames[0].offset.is_none());
}

#[test]
fn strict_failure_falls_back_to_lenient_from_input_state() {
    init_logger();
    let mut net = conflicting_sources();
    let report = Resolver::default().run(&mut net).unwrap();

    assert!(!report.strict_converged);
    assert_eq!(report.passes.len(), 2);
    assert_eq!(report.final_mode(), Some(ResolveMode::Lenient));

    // lenient takes the first resolvable candidate, not the strict mean
    assert!(approx_eq(net.position("w"), 0.0, 0.0));
    assert!(approx_eq(net.position("p"), 5.0, 5.0));
    assert!(approx_eq(net.position("d"), 5.0, 5.0));

    // strict findings survive the re-run
    assert!(report
        .inconsistencies
        .iter()
        .any(|f| f.point_id == "w" && f.check == ConsistencyCheck::AbsolutePosition));
    let debug_ids: Vec<&str> = report.debug_points.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(debug_ids, vec!["wv1", "wv2"]);
    assert!(report.is_fully_resolved());
}

#[test]
fn strict_only_run_keeps_partial_result() {
    init_logger();
    let mut net = conflicting_sources();
    let resolver = Resolver::new(ResolverParams {
        lenient_fallback: false,
        ..ResolverParams::default()
    });
    let report = resolver.run(&mut net).unwrap();

    assert_eq!(report.passes.len(), 1);
    assert!(approx_eq(net.position("w"), 0.0, 15.0));
    assert_eq!(net.position("p"), None);
    let ids: Vec<&str> = report.unresolved.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["p", "d"]);
}

#[test]
fn traverse_legs_resolve_against_fixed_stations() {
    init_logger();
    let mut net = PointNetwork::new();
    let inserted = open_traverse().insert_into(&mut net).unwrap();
    assert_eq!(inserted, 3);

    let report = Resolver::default().run(&mut net).unwrap();
    assert!(report.strict_converged);
    // 10 rods = 100 survey feet, turned right at B
    assert!(approx_eq(net.position("C"), 100.0, -feet10_to_metres(100.0)));
    assert_eq!(net.get("C").unwrap().municipality.as_deref(), Some("Dorf"));
}

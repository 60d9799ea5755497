use cadastral_resolver::network::{Station, TraverseChain};
use cadastral_resolver::prelude::*;

pub const DORF_1: (&str, u32) = ("Dorf", 1);

pub fn dorf_frame() -> FrameKey {
    FrameKey::new(DORF_1.0, DORF_1.1)
}

/// Acyclic network using every computed variant, inserted leaves last.
pub fn acyclic_network() -> PointNetwork {
    let mut net = PointNetwork::new();
    net.extend([
        Point::alias("AL", "X"),
        Point::intersect("X", ["A", "C", "B", "D"]),
        Point::relative(
            "R",
            RelativeDef {
                p1: "A".into(),
                p2: "B".into(),
                length_p1p2: 50.0,
                unit: LengthUnit::Percent,
                angle: 90.0,
                length: 0.0,
            },
        ),
        Point::average("M", ["A", "B"]),
        Point::absolute("A", 0.0, 0.0),
        Point::absolute("B", 10.0, 0.0),
        Point::absolute("C", 10.0, 10.0),
        Point::absolute("D", 0.0, 10.0),
    ])
    .expect("fixture network is well formed");
    net
}

/// Frame anchored through "1-1" at local (10, 10) / global (1010, 2010).
pub fn framed_network() -> PointNetwork {
    let frame = dorf_frame();
    let mut net = PointNetwork::new();
    net.extend([
        Point::local("1-2", frame.clone(), 5.0, 5.0),
        Point::local("1-1", frame, 10.0, 10.0),
        Point::absolute("1-1", 1010.0, 2010.0),
    ])
    .expect("fixture network is well formed");
    net
}

/// "p" has one source that can never resolve, so strict resolution stalls
/// on it and on everything depending on it. "w" has two sources 30 units
/// apart.
pub fn conflicting_sources() -> PointNetwork {
    let mut net = PointNetwork::new();
    net.extend([
        Point::absolute("base", 0.0, 0.0),
        Point::alias("p", "missing"),
        Point::absolute("p", 5.0, 5.0),
        Point::alias("d", "p"),
        Point::absolute("w", 0.0, 0.0),
        Point::absolute("w", 0.0, 30.0),
    ])
    .expect("fixture network is well formed");
    net
}

/// Open traverse between two fixed stations with one measured leg:
/// a right turn of 100 gon at "B" and 10 rods to "C".
pub fn open_traverse() -> TraverseChain {
    TraverseChain {
        stations: vec![
            Station::new("A").with_coord(0.0, 0.0),
            Station::new("B").with_coord(100.0, 0.0).with_leg(100.0, 10.0),
            Station::new("C"),
        ],
        municipality: Some("Dorf".into()),
        ..TraverseChain::default()
    }
}

//! Insertion-ordered point collection owned by the resolver during a run.
//!
//! Points are keyed by id. Inserting a second definition for a known id
//! merges both into a MultiWay node instead of overwriting, so independent
//! sources for the same station stay inspectable. Iteration follows
//! insertion order, which fixes the candidate that wins in lenient mode.

pub mod traverse;

use crate::error::NetworkError;
use crate::point::{Descriptor, FrameKey, LocalFrames, MultiWay, Point};
use crate::types::{Coord, PointId};
use indexmap::IndexMap;

pub use traverse::{Station, TraverseChain};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointNetwork {
    points: IndexMap<PointId, Point>,
    frames: LocalFrames,
}

impl PointNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, merging with an existing one of the same id.
    ///
    /// Existing candidates keep their position ahead of the new one. Local
    /// frames referenced by the point are registered on the way.
    pub fn insert(&mut self, point: Point) -> Result<(), NetworkError> {
        let point = checked_multi_way(point)?;
        for frame in point.frames() {
            self.frames.register(frame.clone());
        }

        let Some(existing) = self.points.get_mut(&point.id) else {
            self.points.insert(point.id.clone(), point);
            return Ok(());
        };

        if let Descriptor::MultiWay(mw) = &mut existing.descriptor {
            let (id, kind) = (existing.id.clone(), existing.kind);
            mw.absorb(&id, kind, point)?;
            if existing.municipality.is_none() {
                existing.municipality = mw.candidates.iter().find_map(|c| c.municipality.clone());
            }
            return Ok(());
        }

        let merged = Point::multi_way(existing.clone(), point)?;
        *existing = merged;
        Ok(())
    }

    pub fn extend<I>(&mut self, points: I) -> Result<(), NetworkError>
    where
        I: IntoIterator<Item = Point>,
    {
        for point in points {
            self.insert(point)?;
        }
        Ok(())
    }

    pub fn register_frame(&mut self, key: FrameKey) {
        self.frames.register(key);
    }

    pub fn get(&self, id: &str) -> Option<&Point> {
        self.points.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.points.contains_key(id)
    }

    /// Global position of `id`, if the point exists and is resolved.
    pub fn position(&self, id: &str) -> Option<Coord> {
        self.points.get(id).and_then(Point::position)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    pub fn frames(&self) -> &LocalFrames {
        &self.frames
    }

    pub(crate) fn frames_mut(&mut self) -> &mut LocalFrames {
        &mut self.frames
    }

    /// Ids of all points without a global coordinate, in insertion order.
    pub fn unresolved_ids(&self) -> Vec<PointId> {
        self.points
            .values()
            .filter(|p| !p.is_absolute())
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.points.values().filter(|p| p.is_absolute()).count()
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.points.values().all(Point::is_absolute)
    }

    /// Stores the resolved position of `id`; unknown ids are ignored.
    pub(crate) fn settle(&mut self, id: &str, position: Coord) {
        if let Some(point) = self.points.get_mut(id) {
            point.settle(position);
        }
    }
}

/// Rebuilds an incoming MultiWay node through [`MultiWay::absorb`], so its
/// candidates are flattened and checked against the node's id and kind. A
/// node left with a single candidate is stored as that plain definition.
fn checked_multi_way(point: Point) -> Result<Point, NetworkError> {
    let Point {
        id,
        kind,
        municipality,
        descriptor,
    } = point;
    let raw = match descriptor {
        Descriptor::MultiWay(raw) => raw,
        descriptor => {
            return Ok(Point {
                id,
                kind,
                municipality,
                descriptor,
            })
        }
    };

    let mut mw = MultiWay {
        candidates: Vec::with_capacity(raw.len()),
        resolved: None,
    };
    for candidate in raw.candidates {
        mw.absorb(&id, kind, candidate)?;
    }

    match mw.candidates.len() {
        0 => Err(NetworkError::EmptyMultiWay { id }),
        1 => {
            let mut single = mw.candidates.remove(0);
            if single.municipality.is_none() {
                single.municipality = municipality;
            }
            Ok(single)
        }
        _ => Ok(Point {
            id,
            kind,
            municipality,
            descriptor: Descriptor::MultiWay(mw),
        }),
    }
}

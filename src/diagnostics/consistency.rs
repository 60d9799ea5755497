use crate::types::{Coord, PointId};
use indexmap::IndexMap;
use serde::Serialize;

/// Which comparison flagged two candidates of a MultiWay point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsistencyCheck {
    /// Two relative definitions from the same base line disagree.
    RelativeDefinition,
    /// Two absolute definitions lie further apart than the tolerance.
    AbsolutePosition,
    /// Two candidates resolved to positions further apart than the tolerance.
    ResolvedPosition,
}

/// Mismatch between two candidates (indices into the MultiWay candidate list).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inconsistency {
    pub point_id: PointId,
    pub check: ConsistencyCheck,
    pub candidates: [usize; 2],
    /// Angle difference in degrees for relative definitions, planar distance
    /// otherwise.
    pub delta: f64,
}

impl Inconsistency {
    fn same_finding(&self, other: &Inconsistency) -> bool {
        self.point_id == other.point_id
            && self.check == other.check
            && self.candidates == other.candidates
    }
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b] = self.candidates;
        match self.check {
            ConsistencyCheck::RelativeDefinition => write!(
                f,
                "inconsistent relative survey point {} (candidates {a}/{b}, angle delta {:.3}°)",
                self.point_id, self.delta
            ),
            ConsistencyCheck::AbsolutePosition => write!(
                f,
                "inconsistent absolute survey point {} (candidates {a}/{b}): delta {}",
                self.point_id,
                self.delta.round()
            ),
            ConsistencyCheck::ResolvedPosition => write!(
                f,
                "inconsistent resolved survey point {} (candidates {a}/{b}): delta {}",
                self.point_id,
                self.delta.round()
            ),
        }
    }
}

/// Resolved candidate of an inconsistent point, exported under a
/// disambiguated id (`<id>v<n>`) so the spread can be inspected on a map.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugPoint {
    pub id: PointId,
    pub source_id: PointId,
    pub position: [f64; 2],
}

impl DebugPoint {
    pub fn for_candidates(source_id: &str, positions: &[Coord]) -> Vec<DebugPoint> {
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| DebugPoint {
                id: format!("{source_id}v{}", i + 1),
                source_id: source_id.to_string(),
                position: [p.x, p.y],
            })
            .collect()
    }
}

/// Collects MultiWay findings across sweeps.
///
/// Strict resolution re-checks an unresolved point on every sweep; findings
/// are stored once per point so each mismatch is warned about only once.
#[derive(Clone, Debug, Default)]
pub struct ResolveTrace {
    inconsistencies: IndexMap<PointId, Vec<Inconsistency>>,
    debug_points: IndexMap<PointId, Vec<DebugPoint>>,
}

impl ResolveTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a finding; returns `false` if it was already known.
    pub fn record(&mut self, finding: Inconsistency) -> bool {
        let known = self
            .inconsistencies
            .entry(finding.point_id.clone())
            .or_default();
        if known.iter().any(|k| k.same_finding(&finding)) {
            return false;
        }
        known.push(finding);
        true
    }

    /// Replaces the debug points of `source_id` with the latest candidates.
    pub fn record_debug_points(&mut self, source_id: &str, points: Vec<DebugPoint>) {
        if points.is_empty() {
            return;
        }
        self.debug_points.insert(source_id.to_string(), points);
    }

    pub fn is_flagged(&self, point_id: &str) -> bool {
        self.inconsistencies.contains_key(point_id)
    }

    pub fn inconsistencies(&self) -> impl Iterator<Item = &Inconsistency> {
        self.inconsistencies.values().flatten()
    }

    pub fn debug_points(&self) -> impl Iterator<Item = &DebugPoint> {
        self.debug_points.values().flatten()
    }

    pub fn inconsistency_count(&self) -> usize {
        self.inconsistencies.values().map(Vec::len).sum()
    }
}

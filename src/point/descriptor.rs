use super::frame::FrameKey;
use crate::error::NetworkError;
use crate::types::{Coord, LengthUnit, PointId, PointKind};
use serde::{Deserialize, Serialize};

/// A surveyed point: stable id, category and one definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: PointId,
    #[serde(default)]
    pub kind: PointKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(flatten)]
    pub descriptor: Descriptor,
}

/// How a point is defined in the source material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Descriptor {
    /// Projected coordinate, known up front.
    Absolute { x: f64, y: f64 },
    /// Coordinate in a district frame that may not be anchored yet.
    LocalAbsolute {
        local_x: f64,
        local_y: f64,
        frame: FrameKey,
    },
    /// Bearing/distance construction from two reference points.
    Relative(RelativeDef),
    /// Same coordinate as another point.
    Alias {
        target: PointId,
        #[serde(skip)]
        resolved: Option<Coord>,
    },
    /// Mean of the referenced points.
    Average { refs: Vec<PointId> },
    /// Intersection of line(refs[0], refs[1]) with line(refs[2], refs[3]).
    Intersect { refs: Vec<PointId> },
    /// One physical point recorded by several independent sources.
    MultiWay(MultiWay),
}

/// Walk `length_p1p2` along p1→p2, turn by `angle` degrees and walk `length`
/// survey feet to reach the target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeDef {
    pub p1: PointId,
    pub p2: PointId,
    #[serde(rename = "lengthP1P2")]
    pub length_p1p2: f64,
    #[serde(default)]
    pub unit: LengthUnit,
    pub angle: f64,
    pub length: f64,
}

/// Candidate definitions of the same id plus the cached merged position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiWay {
    pub candidates: Vec<Point>,
    #[serde(skip)]
    pub resolved: Option<Coord>,
}

impl MultiWay {
    /// Combines two definitions of the same point, keeping `first` ahead of
    /// `second` in candidate order.
    pub fn new(first: Point, second: Point) -> Result<Self, NetworkError> {
        let id = first.id.clone();
        let kind = first.kind;
        let mut mw = Self {
            candidates: Vec::with_capacity(2),
            resolved: None,
        };
        mw.absorb(&id, kind, first)?;
        mw.absorb(&id, kind, second)?;
        Ok(mw)
    }

    /// Appends a further candidate. A MultiWay candidate is flattened.
    pub fn absorb(&mut self, id: &str, kind: PointKind, point: Point) -> Result<(), NetworkError> {
        check_same_point(id, kind, &point)?;
        match point.descriptor {
            Descriptor::MultiWay(other) => {
                for candidate in other.candidates {
                    self.absorb(id, kind, candidate)?;
                }
            }
            _ => self.candidates.push(point),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn check_same_point(id: &str, kind: PointKind, point: &Point) -> Result<(), NetworkError> {
    if point.id != id {
        return Err(NetworkError::IdMismatch {
            expected: id.to_string(),
            found: point.id.clone(),
        });
    }
    if point.kind != kind {
        return Err(NetworkError::KindMismatch {
            id: id.to_string(),
            expected: kind,
            found: point.kind,
        });
    }
    Ok(())
}

impl Point {
    pub fn new(id: impl Into<PointId>, descriptor: Descriptor) -> Self {
        Self {
            id: id.into(),
            kind: PointKind::default(),
            municipality: None,
            descriptor,
        }
    }

    pub fn absolute(id: impl Into<PointId>, x: f64, y: f64) -> Self {
        Self::new(id, Descriptor::Absolute { x, y })
    }

    pub fn local(id: impl Into<PointId>, frame: FrameKey, local_x: f64, local_y: f64) -> Self {
        Self::new(
            id,
            Descriptor::LocalAbsolute {
                local_x,
                local_y,
                frame,
            },
        )
    }

    pub fn relative(id: impl Into<PointId>, def: RelativeDef) -> Self {
        Self::new(id, Descriptor::Relative(def))
    }

    pub fn alias(id: impl Into<PointId>, target: impl Into<PointId>) -> Self {
        Self::new(
            id,
            Descriptor::Alias {
                target: target.into(),
                resolved: None,
            },
        )
    }

    pub fn average<I, S>(id: impl Into<PointId>, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PointId>,
    {
        Self::new(
            id,
            Descriptor::Average {
                refs: refs.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn intersect<I, S>(id: impl Into<PointId>, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PointId>,
    {
        Self::new(
            id,
            Descriptor::Intersect {
                refs: refs.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Merges two definitions of the same id into a MultiWay point.
    pub fn multi_way(first: Point, second: Point) -> Result<Self, NetworkError> {
        let id = first.id.clone();
        let kind = first.kind;
        let municipality = first.municipality.clone().or_else(|| second.municipality.clone());
        Ok(Self {
            id,
            kind,
            municipality,
            descriptor: Descriptor::MultiWay(MultiWay::new(first, second)?),
        })
    }

    pub fn with_kind(mut self, kind: PointKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = Some(municipality.into());
        self
    }

    /// True once the point has a global coordinate.
    ///
    /// Relative, Average, Intersect and LocalAbsolute hold no resolved state;
    /// the driver replaces them with an Absolute definition when they
    /// resolve. Alias and MultiWay keep their definition and cache the
    /// position instead.
    pub fn is_absolute(&self) -> bool {
        self.position().is_some()
    }

    pub fn position(&self) -> Option<Coord> {
        match &self.descriptor {
            Descriptor::Absolute { x, y } => Some(Coord::new(*x, *y)),
            Descriptor::Alias { resolved, .. } => *resolved,
            Descriptor::MultiWay(mw) => mw.resolved,
            Descriptor::LocalAbsolute { .. }
            | Descriptor::Relative(_)
            | Descriptor::Average { .. }
            | Descriptor::Intersect { .. } => None,
        }
    }

    /// Records a resolved position. Resolution is monotonic: a point that
    /// already has a position keeps it.
    pub fn settle(&mut self, position: Coord) {
        if self.is_absolute() {
            return;
        }
        match &mut self.descriptor {
            Descriptor::Alias { resolved, .. } => *resolved = Some(position),
            Descriptor::MultiWay(mw) => mw.resolved = Some(position),
            other => {
                *other = Descriptor::Absolute {
                    x: position.x,
                    y: position.y,
                }
            }
        }
    }

    /// Ids this definition depends on, in definition order. MultiWay points
    /// list the references of all their candidates.
    pub fn references(&self) -> Vec<&str> {
        match &self.descriptor {
            Descriptor::Absolute { .. } | Descriptor::LocalAbsolute { .. } => Vec::new(),
            Descriptor::Relative(def) => vec![def.p1.as_str(), def.p2.as_str()],
            Descriptor::Alias { target, .. } => vec![target.as_str()],
            Descriptor::Average { refs } | Descriptor::Intersect { refs } => {
                refs.iter().map(String::as_str).collect()
            }
            Descriptor::MultiWay(mw) => {
                let mut refs: Vec<&str> = Vec::new();
                for candidate in &mw.candidates {
                    for r in candidate.references() {
                        if !refs.contains(&r) {
                            refs.push(r);
                        }
                    }
                }
                refs
            }
        }
    }

    /// Local frames this point (or one of its candidates) lives in.
    pub fn frames(&self) -> Vec<&FrameKey> {
        match &self.descriptor {
            Descriptor::LocalAbsolute { frame, .. } => vec![frame],
            Descriptor::MultiWay(mw) => mw.candidates.iter().flat_map(Point::frames).collect(),
            _ => Vec::new(),
        }
    }

    /// Short variant name used in logs and reports.
    pub fn variant_name(&self) -> &'static str {
        match &self.descriptor {
            Descriptor::Absolute { .. } => "absolute",
            Descriptor::LocalAbsolute { .. } => "localAbsolute",
            Descriptor::Relative(_) => "relative",
            Descriptor::Alias { .. } => "alias",
            Descriptor::Average { .. } => "average",
            Descriptor::Intersect { .. } => "intersect",
            Descriptor::MultiWay(_) => "multiWay",
        }
    }
}

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Stable point identifier, unique within one resolution run.
pub type PointId = String;

/// Planar coordinate in the projected system of the current run.
pub type Coord = Vector2<f64>;

/// Category of a surveyed point. Only metadata for the resolver, but MultiWay
/// candidates must agree on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointKind {
    #[default]
    Net,
    NetMeridian,
    Property,
    Building,
    Helper,
}

impl PointKind {
    /// Points belonging to the survey net itself (stations, meridian marks
    /// and construction helpers).
    pub fn is_net(self) -> bool {
        matches!(self, PointKind::Net | PointKind::NetMeridian | PointKind::Helper)
    }
}

/// Unit of the base distance of a relative point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LengthUnit {
    /// Prussian survey foot, 10 feet per rod.
    #[default]
    Feet10,
    /// Prussian foot, 12 feet per rod.
    Feet12,
    /// Percentage of the distance between the two reference points.
    Percent,
}

/// Absolute coordinate produced by a successful resolution step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedPoint {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
}

impl ResolvedPoint {
    pub fn new(id: impl Into<PointId>, position: Coord) -> Self {
        Self {
            id: id.into(),
            x: position.x,
            y: position.y,
        }
    }

    #[inline]
    pub fn position(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

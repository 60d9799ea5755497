//! Conversion of traverse tables into point definitions.
//!
//! A traverse lists stations in walking order. At every station the field
//! book records the turning angle (gon) towards the next station and the
//! distance to it (rods). Each leg becomes a Relative definition of the next
//! station: continue along prev→current for 100 % of that base line, turn,
//! then walk the recorded distance. Stations with known coordinates become
//! Absolute definitions instead.
//!
//! Sub-polygons hang off a main polygon and are only tied to it at their
//! end, so they are walked in reverse and use the distance recorded at the
//! following station.

use super::PointNetwork;
use crate::error::NetworkError;
use crate::point::{Point, RelativeDef};
use crate::types::{LengthUnit, PointId, PointKind};
use crate::units::{gon_to_degrees, rods_to_feet};
use serde::Deserialize;

/// One row of a traverse table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: PointId,
    /// Distance to the next station in rods.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Turning angle at this station in gon.
    #[serde(default)]
    pub angle: Option<f64>,
    /// Already projected coordinate, if the station is a fixed point.
    #[serde(default)]
    pub coord: Option<[f64; 2]>,
}

impl Station {
    pub fn new(id: impl Into<PointId>) -> Self {
        Self {
            id: id.into(),
            distance: None,
            angle: None,
            coord: None,
        }
    }

    pub fn with_leg(mut self, angle_gon: f64, distance_rods: f64) -> Self {
        self.angle = Some(angle_gon);
        self.distance = Some(distance_rods);
        self
    }

    pub fn with_coord(mut self, x: f64, y: f64) -> Self {
        self.coord = Some([x, y]);
        self
    }
}

/// Ordered stations of one traverse plus the district settings that affect
/// how angles are read.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraverseChain {
    pub stations: Vec<Station>,
    #[serde(default)]
    pub subpolygon: bool,
    /// District records angles in the opposite turning sense.
    #[serde(default)]
    pub flip: bool,
    #[serde(default)]
    pub municipality: Option<String>,
}

impl TraverseChain {
    pub fn new(stations: Vec<Station>) -> Self {
        Self {
            stations,
            ..Self::default()
        }
    }

    /// Point definitions implied by the chain, in leg order.
    pub fn to_points(&self) -> Vec<Point> {
        if self.stations.len() < 2 {
            return Vec::new();
        }

        let mut stations = self.stations.clone();
        if self.subpolygon {
            stations.reverse();
        }
        close_ring(&mut stations);

        let n = stations.len();
        let mut points = Vec::with_capacity(n);
        let start = usize::from(self.subpolygon);
        for i in start..n {
            let current = &stations[i];
            let prev = &stations[(i + n - 1) % n];
            let next = &stations[(i + 1) % n];

            if let Some([x, y]) = next.coord {
                points.push(self.tag(Point::absolute(next.id.clone(), x, y)));
                continue;
            }

            let distance = if self.subpolygon {
                next.distance
            } else {
                current.distance
            };
            let (Some(distance), Some(angle_gon)) = (distance, current.angle) else {
                continue;
            };

            let angle = 180.0 - gon_to_degrees(angle_gon);
            let angle = if self.subpolygon || self.flip {
                angle
            } else {
                -angle
            };
            let def = RelativeDef {
                p1: prev.id.clone(),
                p2: current.id.clone(),
                length_p1p2: 100.0,
                unit: LengthUnit::Percent,
                angle,
                length: rods_to_feet(distance),
            };
            points.push(self.tag(Point::relative(next.id.clone(), def)));
        }
        points
    }

    /// Inserts the chain's definitions, merging with known stations.
    pub fn insert_into(&self, network: &mut PointNetwork) -> Result<usize, NetworkError> {
        let points = self.to_points();
        let count = points.len();
        network.extend(points)?;
        Ok(count)
    }

    fn tag(&self, point: Point) -> Point {
        let point = point.with_kind(PointKind::Net);
        match &self.municipality {
            Some(m) => point.with_municipality(m.clone()),
            None => point,
        }
    }
}

/// A chain that returns to its first station is a ring; the repeated last
/// row only contributes the readings the first row lacks.
fn close_ring(stations: &mut Vec<Station>) {
    let n = stations.len();
    if n < 2 || stations[0].id != stations[n - 1].id {
        return;
    }
    if let Some(last) = stations.pop() {
        let first = &mut stations[0];
        first.distance = first.distance.or(last.distance);
        first.angle = first.angle.or(last.angle);
    }
}

//! Selection of resolved points for downstream writers.

use crate::network::PointNetwork;
use crate::point::{Descriptor, Point};
use crate::types::{PointId, PointKind};
use log::warn;
use serde::{Deserialize, Serialize};

/// Which points [`collect_points`] hands out.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFilter {
    /// Export property and building points too, not only the survey net.
    #[serde(default)]
    pub all_points: bool,
    #[serde(default)]
    pub municipality: Option<String>,
}

impl ExportFilter {
    fn accepts(&self, point: &Point) -> bool {
        if !self.all_points && !point.kind.is_net() {
            return false;
        }
        match &self.municipality {
            Some(m) => point.municipality.as_deref() == Some(m.as_str()),
            None => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedPoint {
    pub id: PointId,
    pub kind: PointKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointExport {
    pub points: Vec<ExportedPoint>,
    /// Points passing the filter that have no global coordinate.
    pub not_calculated: Vec<PointId>,
}

/// Collects absolute points and resolved MultiWay nodes in network order.
/// Resolved aliases are redirects and are skipped.
pub fn collect_points(network: &PointNetwork, filter: &ExportFilter) -> PointExport {
    let mut export = PointExport::default();
    for point in network.iter().filter(|p| filter.accepts(p)) {
        let Some(pos) = point.position() else {
            warn!("point {} was not calculated", point.id);
            export.not_calculated.push(point.id.clone());
            continue;
        };
        if matches!(point.descriptor, Descriptor::Alias { .. }) {
            continue;
        }
        export.points.push(ExportedPoint {
            id: point.id.clone(),
            kind: point.kind,
            municipality: point.municipality.clone(),
            x: pos.x,
            y: pos.y,
        });
    }
    export
}

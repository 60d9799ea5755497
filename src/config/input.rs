use crate::error::NetworkError;
use crate::io::read_json_file;
use crate::network::{PointNetwork, TraverseChain};
use crate::point::{FrameKey, Point};
use serde::Deserialize;
use std::path::Path;

/// Raw definitions handed over by the source parsers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NetworkInput {
    pub frames: Vec<FrameKey>,
    pub points: Vec<Point>,
    pub traverses: Vec<TraverseChain>,
}

impl NetworkInput {
    /// Builds the network: frames first, then points in file order, then
    /// the definitions implied by each traverse.
    pub fn into_network(self) -> Result<PointNetwork, NetworkError> {
        let mut network = PointNetwork::new();
        for frame in self.frames {
            network.register_frame(frame);
        }
        network.extend(self.points)?;
        for chain in &self.traverses {
            chain.insert_into(&mut network)?;
        }
        Ok(network)
    }
}

pub fn load_network(path: &Path) -> Result<PointNetwork, String> {
    let input: NetworkInput = read_json_file(path)?;
    input
        .into_network()
        .map_err(|e| format!("Invalid network {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Descriptor;

    #[test]
    fn input_merges_points_and_traverses() {
        let json = r#"{
            "frames": [{"municipality": "Dorf", "district": 3}],
            "points": [
                {"id": "1", "type": "absolute", "x": 0, "y": 0},
                {"id": "2", "type": "absolute", "x": 10, "y": 0},
                {"id": "3-1", "type": "localAbsolute", "localX": 1, "localY": 2,
                 "frame": {"municipality": "Dorf", "district": 3}},
                {"id": "2", "kind": "net", "type": "alias", "target": "1"}
            ],
            "traverses": []
        }"#;
        let input: NetworkInput = serde_json::from_str(json).unwrap();
        let network = input.into_network().unwrap();

        assert_eq!(network.len(), 3);
        assert_eq!(network.frames().len(), 1);
        assert!(matches!(
            network.get("2").unwrap().descriptor,
            Descriptor::MultiWay(_)
        ));
    }

    #[test]
    fn conflicting_kinds_are_rejected() {
        let json = r#"{"points": [
            {"id": "1", "type": "absolute", "x": 0, "y": 0},
            {"id": "1", "kind": "building", "type": "absolute", "x": 0, "y": 0}
        ]}"#;
        let input: NetworkInput = serde_json::from_str(json).unwrap();
        assert!(matches!(
            input.into_network(),
            Err(NetworkError::KindMismatch { .. })
        ));
    }

    #[test]
    fn multi_way_input_must_describe_one_point() {
        let json = r#"{"points": [
            {"id": "a", "type": "multiWay", "candidates": [
                {"id": "b", "type": "absolute", "x": 0, "y": 0},
                {"id": "c", "kind": "building", "type": "absolute", "x": 100, "y": 0}
            ]}
        ]}"#;
        let input: NetworkInput = serde_json::from_str(json).unwrap();
        assert!(matches!(
            input.into_network(),
            Err(NetworkError::IdMismatch { .. })
        ));

        let json = r#"{"points": [
            {"id": "a", "type": "multiWay", "candidates": [
                {"id": "a", "type": "absolute", "x": 0, "y": 0},
                {"id": "a", "type": "absolute", "x": 10, "y": 0}
            ]}
        ]}"#;
        let input: NetworkInput = serde_json::from_str(json).unwrap();
        let network = input.into_network().unwrap();
        assert!(matches!(
            network.get("a").unwrap().descriptor,
            Descriptor::MultiWay(_)
        ));
    }
}

//! A road network: the routing graph together with node positions and the ids
//! the map data uses for the nodes.

use super::graph::*;
use nav_types::WGS84;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Coordinate {
        Coordinate { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    fn as_wgs84(&self) -> WGS84<f64> {
        WGS84::from_degrees_and_meters(self.lat, self.lng, 0.0)
    }

    /// Great circle distance in meters.
    pub fn distance_m(&self, other: &Coordinate) -> f64 {
        self.as_wgs84().distance(&other.as_wgs84())
    }
}

#[derive(Debug, Clone)]
pub struct RoadNetwork {
    graph: OwnedGraph,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    external_ids: Vec<u64>,
    node_ids: HashMap<u64, NodeId>,
}

impl RoadNetwork {
    /// Panics if the node data does not match the graph or an external id occurs twice.
    pub fn new(graph: OwnedGraph, latitude: Vec<f64>, longitude: Vec<f64>, external_ids: Vec<u64>) -> RoadNetwork {
        assert_eq!(latitude.len(), graph.num_nodes());
        assert_eq!(longitude.len(), graph.num_nodes());
        assert_eq!(external_ids.len(), graph.num_nodes());

        let node_ids: HashMap<u64, NodeId> = external_ids.iter().enumerate().map(|(node, &id)| (id, node as NodeId)).collect();
        assert_eq!(node_ids.len(), external_ids.len(), "duplicate external node ids");

        RoadNetwork {
            graph,
            latitude,
            longitude,
            external_ids,
            node_ids,
        }
    }

    pub fn graph(&self) -> &OwnedGraph {
        &self.graph
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    pub fn num_arcs(&self) -> usize {
        self.graph.num_arcs()
    }

    pub fn coordinate(&self, node: NodeId) -> Coordinate {
        Coordinate::new(self.latitude[node as usize], self.longitude[node as usize])
    }

    pub fn coordinates(&self, path: &[NodeId]) -> Vec<Coordinate> {
        path.iter().map(|&node| self.coordinate(node)).collect()
    }

    /// Average position of the nodes on the path, `None` for an empty path.
    pub fn center(&self, path: &[NodeId]) -> Option<Coordinate> {
        if path.is_empty() {
            return None;
        }
        let (lat, lng) = path
            .iter()
            .map(|&node| self.coordinate(node))
            .fold((0.0, 0.0), |(lat, lng), c| (lat + c.lat, lng + c.lng));
        Some(Coordinate::new(lat / path.len() as f64, lng / path.len() as f64))
    }

    /// The node closest to the given position, `None` if the network has no nodes.
    pub fn nearest_node(&self, position: &Coordinate) -> Option<NodeId> {
        (0..self.num_nodes() as NodeId)
            .map(|node| (node, self.coordinate(node).distance_m(position)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(node, _)| node)
    }

    pub fn external_id(&self, node: NodeId) -> u64 {
        self.external_ids[node as usize]
    }

    pub fn node_by_external_id(&self, id: u64) -> Option<NodeId> {
        self.node_ids.get(&id).copied()
    }
}

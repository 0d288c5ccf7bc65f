//! Shortest path search on road networks.

use crate::datastr::graph::*;
use serde::Serialize;
use thiserror::Error;

pub mod dijkstra;
pub mod reachability;

pub use self::dijkstra::{
    query::dijkstra::{find_path, find_path_with_policy, path_length},
    stepped_dijkstra::{QueryProgress, SearchOutcome, SearchStep, SteppedDijkstra},
    ParallelEdgePolicy,
};
pub use self::reachability::has_path;

/// Simply a source-target pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub from: NodeId,
    pub to: NodeId,
}

impl Query {
    /// Both endpoints have to be nodes of the graph.
    pub fn validate(&self, graph: &impl Graph) -> Result<(), SearchError> {
        for node in [self.from, self.to] {
            if !graph.contains_node(node) {
                return Err(SearchError::NodeNotFound(node));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),
}

/// A path and its total length.
/// Unreachable targets yield an empty path with infinite distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: Vec<NodeId>,
    pub distance: Weight,
}

impl Route {
    pub fn unreachable() -> Route {
        Route { path: Vec::new(), distance: INFINITY }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteStatistics {
    pub distance_m: f64,
    pub distance_km: f64,
    pub num_nodes: usize,
    pub num_segments: usize,
}

impl RouteStatistics {
    /// Routes with less than two nodes have no extent, everything is zero.
    pub fn from_route(route: &Route) -> RouteStatistics {
        if route.path.len() < 2 {
            return RouteStatistics {
                distance_m: 0.0,
                distance_km: 0.0,
                num_nodes: 0,
                num_segments: 0,
            };
        }

        RouteStatistics {
            distance_m: route.distance,
            distance_km: route.distance / 1000.0,
            num_nodes: route.path.len(),
            num_segments: route.path.len() - 1,
        }
    }
}

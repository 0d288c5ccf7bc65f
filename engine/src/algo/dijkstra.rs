//! Dijkstra's algorithm with lazy deletion.
//!
//! Instead of a decrease key operation, every improvement of a tentative distance pushes
//! a new entry into a binary heap. Outdated entries are skipped when they are popped
//! because their node has already been settled.

use super::*;
use std::{cmp::Ordering, fmt, str::FromStr};

pub mod generic_dijkstra;
pub mod query;
pub mod stepped_dijkstra;

pub use generic_dijkstra::DijkstraRun;

/// Priority Queue entries
#[derive(Copy, Clone, Debug)]
pub struct State {
    pub distance: Weight,
    pub node: NodeId,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    // Lengths are validated on graph construction, so there are no NaNs to care about.
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance).then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Which weight to use when there are several arcs from one node to the same neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelEdgePolicy {
    /// Weight of the arc stored first.
    #[default]
    FirstEdge,
    /// Minimum weight over all parallel arcs.
    ShortestEdge,
}

impl ParallelEdgePolicy {
    /// Add the arc to `neighbor` to the list of resolved neighbors of the current node.
    /// Returns true if this was the first arc to `neighbor`.
    pub fn merge(self, resolved: &mut Vec<(NodeId, Weight)>, neighbor: NodeId, weight: Weight) -> bool {
        for (other, other_weight) in resolved.iter_mut() {
            if *other == neighbor {
                if self == ParallelEdgePolicy::ShortestEdge && weight < *other_weight {
                    *other_weight = weight;
                }
                return false;
            }
        }

        resolved.push((neighbor, weight));
        true
    }

    /// Weight of the arc from `tail` to `head`, `None` if there is no such arc.
    pub fn arc_weight<G: LinkIterable<Link>>(self, graph: &G, tail: NodeId, head: NodeId) -> Option<Weight> {
        let mut weights = graph.link_iter(tail).filter(|link| link.node == head).map(|link| link.weight());
        match self {
            ParallelEdgePolicy::FirstEdge => weights.next(),
            ParallelEdgePolicy::ShortestEdge => weights.reduce(Weight::min),
        }
    }
}

impl fmt::Display for ParallelEdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ParallelEdgePolicy::FirstEdge => "first",
            ParallelEdgePolicy::ShortestEdge => "shortest",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown parallel edge policy {0:?}, expected \"first\" or \"shortest\"")]
pub struct UnknownPolicy(pub String);

impl FromStr for ParallelEdgePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(ParallelEdgePolicy::FirstEdge),
            "shortest" => Ok(ParallelEdgePolicy::ShortestEdge),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

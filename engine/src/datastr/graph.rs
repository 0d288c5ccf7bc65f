//! Graph traits and basic types.
//!
//! Road networks are directed multigraphs: there may be several arcs between the same
//! ordered pair of nodes and each arc may or may not carry a length.

pub mod first_out_graph;

pub use self::first_out_graph::{FirstOutGraph, OwnedGraph};

/// Node ids are 32bit unsigned ints
pub type NodeId = u32;
/// Edge ids are 32bit unsigned ints
pub type EdgeId = u32;
/// Segment lengths in meters
pub type Weight = f64;
/// Distance of unreachable nodes.
pub const INFINITY: Weight = f64::INFINITY;
/// Weight used for arcs without a length attribute.
pub const FALLBACK_WEIGHT: Weight = 1.0;

pub trait Arc {
    fn head(&self) -> NodeId;
}

/// An outgoing arc as seen from its tail.
/// The length is optional because the map data does not always contain one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Link {
    pub node: NodeId,
    pub length: Option<Weight>,
}

impl Link {
    /// The length of the arc or `FALLBACK_WEIGHT` if it has none.
    #[inline(always)]
    pub fn weight(&self) -> Weight {
        self.length.unwrap_or(FALLBACK_WEIGHT)
    }
}

impl Arc for Link {
    #[inline(always)]
    fn head(&self) -> NodeId {
        self.node
    }
}

/// Base trait for graphs.
/// Interesting behaviour will be added through subtraits.
pub trait Graph {
    fn num_nodes(&self) -> usize;
    fn num_arcs(&self) -> usize;
    fn degree(&self, node: NodeId) -> usize;

    fn contains_node(&self, node: NodeId) -> bool {
        (node as usize) < self.num_nodes()
    }
}

pub trait LinkIterable<L>: Graph {
    /// Type of the outgoing neighbor iterator.
    type Iter<'a>: Iterator<Item = L>
    where
        Self: 'a;

    /// Get a iterator over the outgoing links of the given node.
    fn link_iter(&self, node: NodeId) -> Self::Iter<'_>;
}

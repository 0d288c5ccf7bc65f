//! Static adjacency array representation of a road network.
//!
//! Nodes and arcs are identified by ids going from `0` to `n-1` and `m-1` respectively.
//! We store the graph using three collections: `first_out`, `head` and `length`.
//! `head` and `length` have each `m` elements, `first_out` has `n+1` elements.
//! The first element of `first_out` is always 0 and the last one `m`.
//! `head[first_out[x]..first_out[x+1]]` contains all neighbors of `x`.
//! Parallel arcs are stored next to each other in the order they were added.

use super::*;
use std::ops::Range;

/// Container struct for the three collections of a graph.
/// Generic over the types of the three data collections,
/// anything that can be borrowed as a slice works.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstOutGraph<FirstOutContainer, HeadContainer, LengthContainer> {
    // index of first edge of each node +1 entry in the end
    first_out: FirstOutContainer,
    // the node ids to which each edge points
    head: HeadContainer,
    // the length of each edge, if known
    length: LengthContainer,
}

pub type OwnedGraph = FirstOutGraph<Vec<EdgeId>, Vec<NodeId>, Vec<Option<Weight>>>;

impl<FirstOutContainer, HeadContainer, LengthContainer> FirstOutGraph<FirstOutContainer, HeadContainer, LengthContainer>
where
    FirstOutContainer: AsRef<[EdgeId]>,
    HeadContainer: AsRef<[NodeId]>,
    LengthContainer: AsRef<[Option<Weight>]>,
{
    /// Create a new `FirstOutGraph` from the three containers.
    /// Panics if the containers do not describe a valid graph or a length is negative, infinite or NaN.
    pub fn new(first_out: FirstOutContainer, head: HeadContainer, length: LengthContainer) -> Self {
        {
            let (first_out, head, length) = (first_out.as_ref(), head.as_ref(), length.as_ref());
            assert!(first_out.len() < <NodeId>::MAX as usize);
            assert!(head.len() < <EdgeId>::MAX as usize);
            assert_eq!(first_out.first(), Some(&0));
            assert_eq!(first_out.last().map(|&m| m as usize), Some(head.len()));
            assert!(first_out.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(length.len(), head.len());
            let n = first_out.len() - 1;
            assert!(head.iter().all(|&node| (node as usize) < n));
            assert!(length.iter().flatten().all(|l| l.is_finite() && *l >= 0.0));
        }

        FirstOutGraph { first_out, head, length }
    }

    /// Borrow a slice of the first_out data
    pub fn first_out(&self) -> &[EdgeId] {
        self.first_out.as_ref()
    }
    /// Borrow a slice of the head data
    pub fn head(&self) -> &[NodeId] {
        self.head.as_ref()
    }
    /// Borrow a slice of the length data
    pub fn length(&self) -> &[Option<Weight>] {
        self.length.as_ref()
    }

    /// Get the range of edge ids which make up the outgoing edges of `node`
    pub fn neighbor_edge_indices(&self, node: NodeId) -> Range<usize> {
        let node = node as usize;
        (self.first_out()[node] as usize)..(self.first_out()[node + 1] as usize)
    }
}

impl OwnedGraph {
    pub fn from_adjacency_lists(adjacency_lists: Vec<Vec<Link>>) -> OwnedGraph {
        // create first_out array by doing a prefix sum over the adjacency list sizes
        let first_out = std::iter::once(0)
            .chain(adjacency_lists.iter().scan(0, |state, neighbors| {
                *state += neighbors.len() as EdgeId;
                Some(*state)
            }))
            .collect();

        // append all adjacency lists and split the pairs into two seperate vectors
        let (head, length) = adjacency_lists
            .into_iter()
            .flat_map(|neighbors| neighbors.into_iter().map(|Link { node, length }| (node, length)))
            .unzip();

        OwnedGraph::new(first_out, head, length)
    }

    /// Build a graph from an unordered list of `(tail, head, length)` arcs.
    /// The relative order of arcs with the same tail is preserved,
    /// so the first of several parallel arcs stays the first one.
    pub fn from_arcs(num_nodes: usize, arcs: impl IntoIterator<Item = (NodeId, NodeId, Option<Weight>)>) -> OwnedGraph {
        let mut adjacency_lists: Vec<Vec<Link>> = (0..num_nodes).map(|_| Vec::new()).collect();
        for (tail, head, length) in arcs {
            adjacency_lists[tail as usize].push(Link { node: head, length });
        }
        OwnedGraph::from_adjacency_lists(adjacency_lists)
    }
}

impl<FirstOutContainer, HeadContainer, LengthContainer> Graph for FirstOutGraph<FirstOutContainer, HeadContainer, LengthContainer>
where
    FirstOutContainer: AsRef<[EdgeId]>,
    HeadContainer: AsRef<[NodeId]>,
    LengthContainer: AsRef<[Option<Weight>]>,
{
    fn num_nodes(&self) -> usize {
        self.first_out().len() - 1
    }

    fn num_arcs(&self) -> usize {
        self.head().len()
    }

    fn degree(&self, node: NodeId) -> usize {
        self.neighbor_edge_indices(node).len()
    }
}

impl<FirstOutContainer, HeadContainer, LengthContainer> LinkIterable<Link> for FirstOutGraph<FirstOutContainer, HeadContainer, LengthContainer>
where
    FirstOutContainer: AsRef<[EdgeId]>,
    HeadContainer: AsRef<[NodeId]>,
    LengthContainer: AsRef<[Option<Weight>]>,
{
    #[allow(clippy::type_complexity)]
    type Iter<'a> = std::iter::Map<std::iter::Zip<std::slice::Iter<'a, NodeId>, std::slice::Iter<'a, Option<Weight>>>, fn((&NodeId, &Option<Weight>)) -> Link>
    where
        Self: 'a;

    #[inline]
    fn link_iter(&self, node: NodeId) -> Self::Iter<'_> {
        let range = self.neighbor_edge_indices(node);
        self.head()[range.clone()]
            .iter()
            .zip(self.length()[range].iter())
            .map(|(&neighbor, &length)| Link { node: neighbor, length })
    }
}

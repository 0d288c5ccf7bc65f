//! A single run of the lazy deletion Dijkstra, advanced one settled node at a time.

use super::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// State of one query on a borrowed graph.
///
/// The outgoing arcs of a settled node are relaxed lazily when the next node is requested.
/// That way a caller which stops at the target never relaxes the target's arcs and
/// the queue length observed right after settling a node does not yet contain its neighbors.
#[derive(Debug)]
pub struct DijkstraRun<'g, G> {
    graph: &'g G,
    query: Query,
    policy: ParallelEdgePolicy,

    // best tentative distance found so far, only used to avoid pushing worse entries
    distances: Vec<Weight>,
    predecessors: Vec<NodeId>,
    settled: Vec<bool>,
    // all settled nodes in the order they were settled
    settled_order: Vec<NodeId>,
    queue: BinaryHeap<Reverse<State>>,

    unrelaxed: Option<NodeId>,
    // scratch buffer for resolving parallel arcs
    neighbors: Vec<(NodeId, Weight)>,

    num_queue_pushs: usize,
    num_relaxed_arcs: usize,
}

impl<'g, G: LinkIterable<Link>> DijkstraRun<'g, G> {
    pub fn query(graph: &'g G, query: Query, policy: ParallelEdgePolicy) -> Result<Self, SearchError> {
        query.validate(graph)?;
        let n = graph.num_nodes();
        let from = query.from;

        let mut run = DijkstraRun {
            graph,
            query,
            policy,

            distances: vec![INFINITY; n],
            predecessors: vec![n as NodeId; n],
            settled: vec![false; n],
            settled_order: Vec::new(),
            queue: BinaryHeap::new(),

            unrelaxed: None,
            neighbors: Vec::new(),

            num_queue_pushs: 0,
            num_relaxed_arcs: 0,
        };

        // Start with origin
        run.distances[from as usize] = 0.0;
        run.predecessors[from as usize] = from;
        run.push(State { distance: 0.0, node: from });

        Ok(run)
    }

    /// Settle the next node and return it with its final distance.
    /// `None` once the queue is exhausted.
    pub fn settle_next_node(&mut self) -> Option<State> {
        if let Some(node) = self.unrelaxed.take() {
            self.relax_outgoing(node);
        }

        // Examine the frontier with lower distance nodes first (min-heap)
        while let Some(Reverse(state)) = self.queue.pop() {
            // stale entry, the node was settled through a shorter entry before
            if self.settled[state.node as usize] {
                continue;
            }

            self.settled[state.node as usize] = true;
            self.settled_order.push(state.node);
            self.unrelaxed = Some(state.node);
            return Some(state);
        }

        None
    }

    fn relax_outgoing(&mut self, node: NodeId) {
        let distance = self.distances[node as usize];

        // these are necessary because otherwise the borrow checker could not figure out
        // that we're only borrowing parts of self
        let settled = &self.settled;
        let neighbors = &mut self.neighbors;
        neighbors.clear();

        for link in self.graph.link_iter(node) {
            if settled[link.node as usize] {
                continue;
            }
            self.num_relaxed_arcs += 1;
            self.policy.merge(neighbors, link.node, link.weight());
        }

        // For each node we can reach, see if we can find a way with
        // a lower distance going through this node
        for i in 0..self.neighbors.len() {
            let (head, weight) = self.neighbors[i];
            let next_distance = distance + weight;

            if next_distance < self.distances[head as usize] {
                // Relaxation, we have now found a better way
                self.distances[head as usize] = next_distance;
                self.predecessors[head as usize] = node;
                self.push(State {
                    distance: next_distance,
                    node: head,
                });
            }
        }
    }

    fn push(&mut self, state: State) {
        self.num_queue_pushs += 1;
        self.queue.push(Reverse(state));
    }

    /// Path from the source to `node` following the predecessors.
    /// Empty if `node` has not been reached.
    pub fn node_path(&self, node: NodeId) -> Vec<NodeId> {
        if self.distances[node as usize] == INFINITY {
            return Vec::new();
        }

        let mut path = vec![node];
        let mut current = node;
        while current != self.query.from {
            current = self.predecessors[current as usize];
            path.push(current);
        }
        path.reverse();

        path
    }

    pub fn tentative_distance(&self, node: NodeId) -> Weight {
        self.distances[node as usize]
    }

    pub fn predecessor(&self, node: NodeId) -> NodeId {
        self.predecessors[node as usize]
    }

    pub fn is_settled(&self, node: NodeId) -> bool {
        self.settled[node as usize]
    }

    pub fn settled_nodes(&self) -> &[NodeId] {
        &self.settled_order
    }

    pub fn num_settled(&self) -> usize {
        self.settled_order.len()
    }

    /// Number of entries in the queue, stale ones included.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn current_query(&self) -> Query {
        self.query
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn num_queue_pushs(&self) -> usize {
        self.num_queue_pushs
    }

    pub fn num_relaxed_arcs(&self) -> usize {
        self.num_relaxed_arcs
    }
}

impl<'g, G: LinkIterable<Link>> Iterator for DijkstraRun<'g, G> {
    type Item = State;

    #[inline]
    fn next(&mut self) -> Option<State> {
        self.settle_next_node()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_nodes_in_distance_order() {
        //
        //       2        1
        //   0 -----> 1 -----> 2
        //   |                 ^
        //   +-----------------+
        //            5
        //
        let graph = OwnedGraph::from_arcs(4, vec![(0, 1, Some(2.0)), (1, 2, Some(1.0)), (0, 2, Some(5.0))]);
        let run = DijkstraRun::query(&graph, Query { from: 0, to: 2 }, ParallelEdgePolicy::FirstEdge).unwrap();

        let settled: Vec<(NodeId, Weight)> = run.map(|State { node, distance }| (node, distance)).collect();
        assert_eq!(settled, vec![(0, 0.0), (1, 2.0), (2, 3.0)]);
    }

    #[test]
    fn stale_entries_are_skipped() {
        let graph = OwnedGraph::from_arcs(3, vec![(0, 2, Some(5.0)), (0, 1, Some(1.0)), (1, 2, Some(1.0))]);
        let mut run = DijkstraRun::query(&graph, Query { from: 0, to: 2 }, ParallelEdgePolicy::FirstEdge).unwrap();

        while run.settle_next_node().is_some() {}

        // node 2 was pushed twice but settled once
        assert_eq!(run.num_queue_pushs(), 4);
        assert_eq!(run.settled_nodes(), &[0, 1, 2]);
        assert_eq!(run.tentative_distance(2), 2.0);
        assert_eq!(run.predecessor(2), 1);
        assert_eq!(run.node_path(2), vec![0, 1, 2]);
    }

    #[test]
    fn target_arcs_stay_unrelaxed() {
        let graph = OwnedGraph::from_arcs(3, vec![(0, 1, Some(1.0)), (1, 2, Some(1.0))]);
        let mut run = DijkstraRun::query(&graph, Query { from: 0, to: 1 }, ParallelEdgePolicy::FirstEdge).unwrap();
        assert_eq!(run.current_query(), Query { from: 0, to: 1 });

        assert_eq!(run.settle_next_node().map(|s| s.node), Some(0));
        assert_eq!(run.queue_len(), 0);
        assert_eq!(run.settle_next_node().map(|s| s.node), Some(1));
        assert_eq!(run.tentative_distance(2), INFINITY);
        assert!(run.node_path(2).is_empty());
    }
}

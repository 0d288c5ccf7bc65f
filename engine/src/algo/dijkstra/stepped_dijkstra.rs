//! Dijkstra which reports every settled node, for visualizing the search progress.
//!
//! This is the same algorithm as `query::dijkstra::find_path`, it only exposes the
//! intermediate states. Consuming it completely always ends with the same route.

use super::*;

/// Message for searches which exhausted the queue without reaching the target.
pub const NO_PATH_FOUND: &str = "No path found";

/// Snapshot after a node was settled.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStep {
    pub node: NodeId,
    pub distance: Weight,
    pub path: Vec<NodeId>,
    pub num_settled: usize,
    pub queue_len: usize,
}

/// Final result of a stepped search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub route: Route,
    pub num_settled: usize,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        self.route.is_found()
    }

    pub fn error(&self) -> Option<&'static str> {
        if self.is_found() {
            None
        } else {
            Some(NO_PATH_FOUND)
        }
    }
}

/// Result of a single iteration
#[derive(Debug, Clone, PartialEq)]
pub enum QueryProgress {
    Settled(SearchStep),
    Done(SearchOutcome),
}

#[derive(Debug)]
pub struct SteppedDijkstra<'g, G> {
    run: DijkstraRun<'g, G>,
    // set once the target was settled or the queue ran empty
    result: Option<SearchOutcome>,
    // the iterator already yielded the final `Done`
    finished: bool,
}

impl<'g, G: LinkIterable<Link>> SteppedDijkstra<'g, G> {
    pub fn new(graph: &'g G, query: Query, policy: ParallelEdgePolicy) -> Result<Self, SearchError> {
        Ok(SteppedDijkstra {
            run: DijkstraRun::query(graph, query, policy)?,
            result: None,
            finished: false,
        })
    }

    /// Settle one more node.
    /// Once the search is over, every call returns the same `Done`.
    pub fn next_step(&mut self) -> QueryProgress {
        match &self.result {
            Some(result) => QueryProgress::Done(result.clone()),
            None => self.settle_next_node(),
        }
    }

    fn settle_next_node(&mut self) -> QueryProgress {
        let to = self.run.current_query().to;

        if let Some(State { distance, node }) = self.run.settle_next_node() {
            let path = self.run.node_path(node);

            if node == to {
                self.result = Some(SearchOutcome {
                    route: Route { path: path.clone(), distance },
                    num_settled: self.run.num_settled(),
                });
            }

            QueryProgress::Settled(SearchStep {
                node,
                distance,
                path,
                num_settled: self.run.num_settled(),
                queue_len: self.run.queue_len(),
            })
        } else {
            let outcome = SearchOutcome {
                route: Route::unreachable(),
                num_settled: self.run.num_settled(),
            };
            self.result = Some(outcome.clone());
            QueryProgress::Done(outcome)
        }
    }

    /// Consume all remaining steps and return the final outcome.
    pub fn run_to_completion(&mut self) -> SearchOutcome {
        loop {
            if let QueryProgress::Done(outcome) = self.next_step() {
                return outcome;
            }
        }
    }

    /// All settled nodes in the order they were settled.
    pub fn visited(&self) -> &[NodeId] {
        self.run.settled_nodes()
    }

    pub fn is_visited(&self, node: NodeId) -> bool {
        self.run.is_settled(node)
    }

    pub fn tentative_distance(&self, node: NodeId) -> Weight {
        self.run.tentative_distance(node)
    }

    pub fn query(&self) -> Query {
        self.run.current_query()
    }

    pub fn graph(&self) -> &'g G {
        self.run.graph()
    }
}

/// Yields every settled step, then exactly one `Done`.
impl<'g, G: LinkIterable<Link>> Iterator for SteppedDijkstra<'g, G> {
    type Item = QueryProgress;

    fn next(&mut self) -> Option<QueryProgress> {
        if self.finished {
            return None;
        }

        let progress = self.next_step();
        if let QueryProgress::Done(_) = progress {
            self.finished = true;
        }
        Some(progress)
    }
}

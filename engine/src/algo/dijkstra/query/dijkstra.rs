use super::*;

/// Shortest route from `from` to `to` using the default parallel edge policy.
///
/// Fails if one of the nodes is not part of the graph.
/// An unreachable target is not an error but yields `Route::unreachable()`.
pub fn find_path<G: LinkIterable<Link>>(graph: &G, from: NodeId, to: NodeId) -> Result<Route, SearchError> {
    find_path_with_policy(graph, from, to, ParallelEdgePolicy::default())
}

pub fn find_path_with_policy<G: LinkIterable<Link>>(graph: &G, from: NodeId, to: NodeId, policy: ParallelEdgePolicy) -> Result<Route, SearchError> {
    let mut run = DijkstraRun::query(graph, Query { from, to }, policy)?;
    report!("algo", "Lazy Dijkstra Query");

    let mut route = Route::unreachable();
    while let Some(State { distance, node }) = run.settle_next_node() {
        // Alternatively we could have continued to find all shortest paths
        if node == to {
            route = Route {
                path: run.node_path(node),
                distance,
            };
            break;
        }
    }

    report!("num_settled_nodes", run.num_settled());
    report!("num_queue_pushs", run.num_queue_pushs());
    report!("num_relaxed_arcs", run.num_relaxed_arcs());

    Ok(route)
}

/// Total weight of the given path with arc weights resolved like during the search.
/// `None` for an empty path or if two consecutive nodes are not connected.
pub fn path_length<G: LinkIterable<Link>>(graph: &G, path: &[NodeId], policy: ParallelEdgePolicy) -> Option<Weight> {
    if path.is_empty() || !path.iter().all(|&node| graph.contains_node(node)) {
        return None;
    }

    path.windows(2).map(|arc| policy.arc_weight(graph, arc[0], arc[1])).sum()
}

//! Cheap check whether a route exists at all, ignoring lengths.

use super::*;
use std::collections::VecDeque;

/// Breadth first search from `from` until `to` is found.
pub fn has_path<G: LinkIterable<Link>>(graph: &G, from: NodeId, to: NodeId) -> Result<bool, SearchError> {
    Query { from, to }.validate(graph)?;

    let mut seen = vec![false; graph.num_nodes()];
    let mut queue = VecDeque::new();
    seen[from as usize] = true;
    queue.push_back(from);

    while let Some(node) = queue.pop_front() {
        if node == to {
            return Ok(true);
        }
        for link in graph.link_iter(node) {
            let head = link.head();
            if !seen[head as usize] {
                seen[head as usize] = true;
                queue.push_back(head);
            }
        }
    }

    Ok(false)
}

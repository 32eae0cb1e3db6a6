//! Traversals over a [`GraphView`].

use std::collections::BTreeSet;

use crate::vertex::VertexId;
use crate::view::GraphView;

/// All vertices reachable from `start` along particle direction, `start`
/// included.
pub fn downstream(view: &GraphView, start: VertexId) -> BTreeSet<VertexId> {
    let mut seen = BTreeSet::new();
    if view.vertex(start).is_none() {
        return seen;
    }
    let mut stack = vec![start];
    seen.insert(start);
    while let Some(node) = stack.pop() {
        for next in view.successors(node) {
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    seen
}

/// Strongly connected components with more than one vertex.
///
/// Each component is sorted, and components are ordered by their smallest
/// vertex id. Iterative Kosaraju so deep cascades cannot overflow the stack.
pub fn strongly_connected(view: &GraphView) -> Vec<Vec<VertexId>> {
    // First pass: finishing order on the forward graph.
    let mut visited = BTreeSet::new();
    let mut order = Vec::with_capacity(view.vertices().len());
    for &root in view.vertices().keys() {
        if !visited.insert(root) {
            continue;
        }
        let mut stack = vec![(root, view.successors(root), 0usize)];
        while let Some((node, successors, cursor)) = stack.last_mut() {
            if *cursor < successors.len() {
                let next = successors[*cursor];
                *cursor += 1;
                if visited.insert(next) {
                    stack.push((next, view.successors(next), 0));
                }
            } else {
                order.push(*node);
                stack.pop();
            }
        }
    }

    // Second pass: collect on the reversed graph in reverse finishing order.
    let mut assigned = BTreeSet::new();
    let mut components = Vec::new();
    for &root in order.iter().rev() {
        if !assigned.insert(root) {
            continue;
        }
        let mut component = vec![root];
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            for previous in view.predecessors(node) {
                if assigned.insert(previous) {
                    component.push(previous);
                    stack.push(previous);
                }
            }
        }
        if component.len() > 1 {
            component.sort();
            components.push(component);
        }
    }
    components.sort();
    components
}

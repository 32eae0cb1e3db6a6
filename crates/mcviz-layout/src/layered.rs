//! Layered placement shared by the feynman, dual and phi projections.
//!
//! Entities are indexed `0..count` in identity order, so "ties by identity"
//! is "ties by index" here.

use std::collections::BTreeSet;

use mcviz_spline::Point;

/// Horizontal distance between ranks.
pub const RANK_SPACING: f64 = 60.0;
/// Vertical distance between slots within a rank.
pub const SLOT_SPACING: f64 = 40.0;

/// Rank of every entity: the longest path from a source.
///
/// Kahn's algorithm with the smallest ready index first. When only cycles
/// remain, the smallest unplaced index is released and its unplaced
/// predecessors are treated as back edges.
pub fn ranks(count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let (successors, predecessors) = adjacency(count, edges);
    let mut indegree: Vec<usize> = predecessors.iter().map(Vec::len).collect();
    let mut placed = vec![false; count];
    let mut rank = vec![0usize; count];
    let mut ready: BTreeSet<usize> = (0..count).filter(|&v| indegree[v] == 0).collect();
    let mut remaining = count;

    while remaining > 0 {
        let next = match ready.pop_first() {
            Some(next) => next,
            None => match (0..count).find(|&v| !placed[v]) {
                Some(released) => released,
                None => break,
            },
        };
        if placed[next] {
            continue;
        }
        placed[next] = true;
        remaining -= 1;
        rank[next] = predecessors[next]
            .iter()
            .filter(|&&p| placed[p] && p != next)
            .map(|&p| rank[p] + 1)
            .max()
            .unwrap_or(0);
        for &s in &successors[next] {
            if placed[s] {
                continue;
            }
            indegree[s] = indegree[s].saturating_sub(1);
            if indegree[s] == 0 {
                ready.insert(s);
            }
        }
    }
    rank
}

/// Positions for every entity.
///
/// `x = rank * 60`; within a rank entities are ordered by the barycenter of
/// their predecessors in earlier ranks (ties by index) and centred on
/// `y = 0` with 40 units between slots.
pub fn place(count: usize, edges: &[(usize, usize)]) -> Vec<Point> {
    let rank = ranks(count, edges);
    let (_, predecessors) = adjacency(count, edges);
    let depth = rank.iter().copied().max().map_or(0, |r| r + 1);

    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); depth];
    for (v, &r) in rank.iter().enumerate() {
        layers[r].push(v);
    }

    let mut positions = vec![Point::ORIGIN; count];
    for (r, layer) in layers.iter().enumerate() {
        let mut keyed: Vec<(f64, usize)> = layer
            .iter()
            .map(|&v| {
                let ys: Vec<f64> = predecessors[v]
                    .iter()
                    .filter(|&&p| rank[p] < r)
                    .map(|&p| positions[p].y)
                    .collect();
                let barycenter = if ys.is_empty() {
                    0.0
                } else {
                    ys.iter().sum::<f64>() / ys.len() as f64
                };
                (barycenter, v)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let centre = (keyed.len() as f64 - 1.0) / 2.0;
        for (slot, &(_, v)) in keyed.iter().enumerate() {
            positions[v] = Point::new(
                r as f64 * RANK_SPACING,
                (slot as f64 - centre) * SLOT_SPACING,
            );
        }
    }
    positions
}

/// Deduplicated successor and predecessor lists without self-loops.
fn adjacency(count: usize, edges: &[(usize, usize)]) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
    let mut successors = vec![BTreeSet::new(); count];
    let mut predecessors = vec![BTreeSet::new(); count];
    for &(a, b) in edges {
        if a == b || a >= count || b >= count {
            continue;
        }
        successors[a].insert(b);
        predecessors[b].insert(a);
    }
    let collect = |sets: Vec<BTreeSet<usize>>| -> Vec<Vec<usize>> {
        sets.into_iter().map(|s| s.into_iter().collect()).collect()
    };
    (collect(successors), collect(predecessors))
}

//! Vertices as nodes, particles as edges.

use std::collections::BTreeMap;

use mcviz_core::{GraphView, VertexId};
use mcviz_error::{Error, Result};
use mcviz_spline::{Bezier, Point, Spline};

use crate::kind::Projection;
use crate::layered;
use crate::model::{Edge, Item, Layout, Node};

/// Perpendicular distance between neighbouring parallel particles.
const BOW_SPACING: f64 = 12.0;
/// Size of a self-loop drawn above its vertex.
const LOOP_SIZE: f64 = 20.0;

pub fn feynman(view: &GraphView) -> Result<Layout> {
    if view.is_empty() {
        return Err(Error::layout_degenerate("nothing to lay out: graph has no vertices"));
    }

    let index: BTreeMap<VertexId, usize> = view
        .vertices()
        .keys()
        .enumerate()
        .map(|(i, &id)| (id, i))
        .collect();
    let endpoints = |origin: VertexId, destination: VertexId| -> Result<(usize, usize)> {
        match (index.get(&origin), index.get(&destination)) {
            (Some(&a), Some(&b)) => Ok((a, b)),
            _ => Err(Error::layout_degenerate(format!(
                "particle between {} and {} has no vertex",
                origin, destination
            ))),
        }
    };

    let mut links = Vec::with_capacity(view.particles().len());
    for particle in view.particles().values() {
        links.push(endpoints(particle.origin, particle.destination)?);
    }
    let positions = layered::place(index.len(), &links);

    let nodes: Vec<Node> = view
        .vertices()
        .values()
        .zip(&positions)
        .map(|(vertex, &position)| Node::new(Item::Vertex(vertex.clone()), position))
        .collect();

    // parallel index of each particle within its (origin, destination) bundle
    let mut bundles: BTreeMap<(usize, usize), usize> = BTreeMap::new();
    for &link in &links {
        *bundles.entry(link).or_default() += 1;
    }
    let mut seen: BTreeMap<(usize, usize), usize> = BTreeMap::new();

    let edges = view
        .particles()
        .values()
        .zip(&links)
        .map(|(particle, &(from, to))| {
            let slot = seen.entry((from, to)).or_default();
            let parallel = *slot;
            *slot += 1;
            let spline = if from == to {
                self_loop(positions[from], parallel)
            } else {
                let count = bundles.get(&(from, to)).copied().unwrap_or(1);
                let offset = (parallel as f64 - (count as f64 - 1.0) / 2.0) * BOW_SPACING;
                bowed(positions[from], positions[to], offset)
            };
            Edge::new(Item::Particle(particle.clone()), from, to, spline)
        })
        .collect();

    Ok(Layout {
        projection: Projection::Feynman,
        nodes,
        edges,
    })
}

/// A cubic from `from` to `to` whose midpoint sits `offset` units along the
/// left-hand normal. Zero offset is a straight line.
pub(crate) fn bowed(from: Point, to: Point, offset: f64) -> Spline {
    if offset == 0.0 {
        return Spline::line(from, to);
    }
    let normal = (to - from).perp().normalized().unwrap_or(Point::new(0.0, 1.0));
    // both control points shifted by d move the midpoint by 0.75 d
    let shift = normal * (offset / 0.75);
    Spline::from_segment(Bezier::new(
        from,
        from.lerp(to, 1.0 / 3.0) + shift,
        from.lerp(to, 2.0 / 3.0) + shift,
        to,
    ))
}

/// A closed cubic leaving and returning to `at`, growing with each
/// additional loop on the same vertex.
pub(crate) fn self_loop(at: Point, parallel: usize) -> Spline {
    let size = LOOP_SIZE * (1.0 + parallel as f64 * 0.5);
    Spline::from_segment(Bezier::new(
        at,
        at + Point::new(-size, -1.5 * size),
        at + Point::new(size, -1.5 * size),
        at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcviz_core::{EventGraph, Particle, ParticleId, Vertex};
    use mcviz_error::ErrorKind;

    fn view(n: u32, particles: &[(u32, i32, u32, u32)]) -> GraphView {
        let vertices = (1..=n).map(|id| Vertex::new(VertexId(id))).collect();
        let particles = particles
            .iter()
            .map(|&(id, pdg, a, b)| Particle::new(ParticleId(id), pdg, VertexId(a), VertexId(b)))
            .collect();
        EventGraph::new(vertices, particles).unwrap().view()
    }

    #[test]
    fn test_causal_order_left_to_right() {
        let layout = feynman(&view(4, &[(1, 2212, 1, 3), (2, 2212, 2, 3), (3, 21, 3, 4)])).unwrap();
        assert_eq!(layout.nodes.len(), 4);
        assert_eq!(layout.edges.len(), 3);
        let x = |i: usize| layout.nodes[i].position.x;
        assert!(x(0) < x(2) && x(1) < x(2) && x(2) < x(3));

        let gluon = &layout.edges[2];
        assert_eq!((gluon.from, gluon.to), (2, 3));
        assert_eq!(gluon.spline.start(), layout.nodes[2].position);
        assert_eq!(gluon.spline.end(), layout.nodes[3].position);
        assert!(matches!(gluon.item, Item::Particle(ref p) if p.id == ParticleId(3)));
    }

    #[test]
    fn test_parallel_particles_are_bowed_apart() {
        let layout = feynman(&view(2, &[(1, 21, 1, 2), (2, 21, 1, 2)])).unwrap();
        let mid = |e: &Edge| e.spline.point_at(e.spline.length() / 2.0);
        let (a, b) = (mid(&layout.edges[0]), mid(&layout.edges[1]));
        assert!((a.y - b.y).abs() > 10.0, "{a:?} vs {b:?}");
        assert_eq!(layout.edges[0].spline.start(), layout.edges[1].spline.start());
    }

    #[test]
    fn test_self_loop_has_length() {
        let layout = feynman(&view(2, &[(1, 21, 1, 2), (2, 21, 2, 2)])).unwrap();
        let spline = &layout.edges[1].spline;
        assert_eq!(spline.start(), spline.end());
        assert!(spline.length() > LOOP_SIZE);
    }

    #[test]
    fn test_empty_graph_is_degenerate() {
        let err = feynman(&GraphView::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LayoutDegenerate);
    }
}

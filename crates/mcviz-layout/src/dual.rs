//! Particles as nodes, vertices as hub edges.

use std::collections::BTreeMap;

use mcviz_core::{GraphView, ParticleId};
use mcviz_error::{Error, Result};
use mcviz_spline::{Bezier, Point, Spline};

use crate::kind::Projection;
use crate::layered;
use crate::model::{Edge, Item, Layout, Node};

pub fn dual(view: &GraphView) -> Result<Layout> {
    let index = particle_index(view)?;
    let links = particle_links(view, &index);
    let positions = layered::place(index.len(), &links);
    Ok(Layout {
        projection: Projection::Dual,
        nodes: particle_nodes(view, &positions),
        edges: hub_edges(view, &index, &positions),
    })
}

/// Node index of every particle, in identity order.
pub(crate) fn particle_index(view: &GraphView) -> Result<BTreeMap<ParticleId, usize>> {
    if view.particles().is_empty() {
        return Err(Error::layout_degenerate("nothing to lay out: graph has no particles"));
    }
    Ok(view
        .particles()
        .keys()
        .enumerate()
        .map(|(i, &id)| (id, i))
        .collect())
}

/// One link per (incoming, outgoing) particle pair at every vertex.
pub(crate) fn particle_links(
    view: &GraphView,
    index: &BTreeMap<ParticleId, usize>,
) -> Vec<(usize, usize)> {
    let mut links = Vec::new();
    for vertex in view.vertices().values() {
        for incoming in &vertex.incoming {
            for outgoing in &vertex.outgoing {
                if let (Some(&a), Some(&b)) = (index.get(incoming), index.get(outgoing))
                    && a != b
                {
                    links.push((a, b));
                }
            }
        }
    }
    links
}

pub(crate) fn particle_nodes(view: &GraphView, positions: &[Point]) -> Vec<Node> {
    view.particles()
        .values()
        .zip(positions)
        .map(|(particle, &position)| Node::new(Item::Particle(particle.clone()), position))
        .collect()
}

/// Spokes for every vertex with both incoming and outgoing particles.
///
/// Each (incoming, outgoing) pair becomes one edge from the incoming
/// particle's node to the outgoing one's, with both control points at the
/// hub centre so all spokes of a vertex meet there. A vertex therefore
/// yields `incoming × outgoing` spokes and an incoming particle leaves its
/// node once per outgoing particle; `going` names the outgoing side so each
/// spoke is styled by the particle it produces. Vertices with only one side
/// are absorbed into their particle nodes.
pub(crate) fn hub_edges(
    view: &GraphView,
    index: &BTreeMap<ParticleId, usize>,
    positions: &[Point],
) -> Vec<Edge> {
    let mut edges = Vec::new();
    for vertex in view.vertices().values() {
        if vertex.incoming.is_empty() || vertex.outgoing.is_empty() {
            continue;
        }
        let Some(hub) = Point::centroid(
            vertex
                .particles()
                .filter_map(|p| index.get(&p))
                .map(|&i| positions[i]),
        ) else {
            continue;
        };
        for incoming in &vertex.incoming {
            for outgoing in &vertex.outgoing {
                let (Some(&from), Some(&to)) = (index.get(incoming), index.get(outgoing)) else {
                    continue;
                };
                if from == to {
                    continue;
                }
                let spline = Spline::from_segment(Bezier::new(positions[from], hub, hub, positions[to]));
                let mut edge = Edge::new(Item::Vertex(vertex.clone()), from, to, spline);
                if let Some(particle) = view.particle(*outgoing) {
                    edge = edge.with_going(particle.clone());
                }
                edges.push(edge);
            }
        }
    }
    edges
}

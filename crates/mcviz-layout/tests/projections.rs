use std::collections::BTreeSet;

use mcviz_core::{ErrorKind, EventGraph, GraphView, Particle, ParticleId, Vertex, VertexId, tags};
use mcviz_layout::{Item, Layout, LayoutKind, Projection};
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

/// Two beams meet, a gluon runs through a kink into a string that
/// hadronizes into two pions. Every particle carries a momentum.
fn event() -> GraphView {
    let vertices = (1..=7).map(|id| Vertex::new(VertexId(id))).collect();
    let particle = |id, pdg, a, b, px: f64, py: f64| {
        Particle::new(ParticleId(id), pdg, VertexId(a), VertexId(b)).with_momentum(px, py, 1.0, 10.0)
    };
    let particles = vec![
        particle(1, 2212, 1, 3, 0.0, 0.1),
        particle(2, 2212, 2, 3, 0.0, -0.1),
        particle(3, 21, 3, 4, 1.0, 0.5),
        particle(4, 21, 4, 5, 1.0, 0.6),
        particle(5, 92, 5, 6, 0.8, 0.8),
        particle(6, 211, 6, 7, -0.5, 1.0),
    ];
    EventGraph::new(vertices, particles).unwrap().view()
}

fn positions(layout: &Layout) -> Vec<(f64, f64)> {
    layout.nodes.iter().map(|n| (n.position.x, n.position.y)).collect()
}

#[test]
fn every_layout_is_deterministic() {
    let view = event();
    for kind in LayoutKind::iter() {
        let first = kind.layout(&view).unwrap();
        let second = kind.layout(&view).unwrap();
        assert_eq!(positions(&first), positions(&second), "{kind}");
        assert_eq!(first.edges.len(), second.edges.len(), "{kind}");
    }
}

#[test]
fn feynman_maps_every_entity_once() {
    let view = event();
    let layout = LayoutKind::Feynman.layout(&view).unwrap();
    assert_eq!(layout.projection, Projection::Feynman);

    let vertices: Vec<VertexId> = layout
        .nodes
        .iter()
        .filter_map(|n| n.item.as_vertex().map(|v| v.id))
        .collect();
    assert_eq!(vertices, view.vertices().keys().copied().collect::<Vec<_>>());

    let particles: Vec<ParticleId> = layout
        .edges
        .iter()
        .filter_map(|e| e.item.as_particle().map(|p| p.id))
        .collect();
    assert_eq!(particles, view.particles().keys().copied().collect::<Vec<_>>());

    for edge in &layout.edges {
        assert_eq!(edge.spline.start(), layout.nodes[edge.from].position);
        assert_eq!(edge.spline.end(), layout.nodes[edge.to].position);
    }
}

#[test]
fn dual_and_phi_place_particles_as_nodes() {
    let view = event();
    for kind in [LayoutKind::Dual, LayoutKind::Phi] {
        let layout = kind.layout(&view).unwrap();
        let particles: BTreeSet<ParticleId> = layout
            .nodes
            .iter()
            .filter_map(|n| n.item.as_particle().map(|p| p.id))
            .collect();
        assert_eq!(particles.len(), view.particles().len(), "{kind}");

        // beam and final vertices are absorbed, every other vertex is a hub
        let hubs: BTreeSet<VertexId> = layout
            .edges
            .iter()
            .filter_map(|e| e.item.as_vertex().map(|v| v.id))
            .collect();
        assert_eq!(
            hubs,
            BTreeSet::from([VertexId(3), VertexId(4), VertexId(5), VertexId(6)]),
            "{kind}"
        );
        assert!(layout.edges.iter().all(|e| e.going.is_some()));
    }
}

#[test]
fn staged_layouts_work_on_a_copy() {
    let view = event();
    let jetless = LayoutKind::Jetless.layout(&view).unwrap();
    let combined = LayoutKind::Combined.layout(&view).unwrap();

    assert!(jetless.nodes.iter().any(|n| n.item.has_tag(tags::JET)));
    assert!(combined.nodes.iter().any(|n| n.item.has_tag(tags::JET)));
    assert!(combined.edges.iter().any(|e| e.item.has_tag(tags::KINK)));
    assert!(combined.edges.len() < jetless.edges.len());

    assert_eq!(view.vertices().len(), 7);
    assert!(view.summaries().is_empty());
}

#[test]
fn empty_graph_is_degenerate() {
    let err = LayoutKind::Feynman.layout(&GraphView::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LayoutDegenerate);
}

#[test]
fn nodes_are_never_stacked() {
    let layout = LayoutKind::Dual.layout(&event()).unwrap();
    let distinct: BTreeSet<(u64, u64)> = layout
        .nodes
        .iter()
        .map(|n| (n.position.x.to_bits(), n.position.y.to_bits()))
        .collect();
    assert_eq!(distinct.len(), layout.nodes.len());
    assert!(matches!(layout.nodes[0].item, Item::Particle(_)));
}

use mcviz_core::{
    ErrorKind, EventGraph, OperatorSpec, Particle, ParticleId, Tool, ToolKind, Vertex, VertexId,
    apply_tools, tags,
};
use pretty_assertions::assert_eq;

/// Two beams meet, a gluon pair runs through a kink into a string that
/// hadronizes into two pions.
fn event() -> EventGraph {
    let vertices = (1..=8).map(|id| Vertex::new(VertexId(id))).collect();
    let particles = vec![
        Particle::new(ParticleId(1), 2212, VertexId(1), VertexId(3)),
        Particle::new(ParticleId(2), 2212, VertexId(2), VertexId(3)),
        Particle::new(ParticleId(3), 21, VertexId(3), VertexId(4)).with_color(501).with_anticolor(502),
        Particle::new(ParticleId(4), 21, VertexId(4), VertexId(5)).with_color(501).with_anticolor(502),
        Particle::new(ParticleId(5), 2, VertexId(3), VertexId(5)).with_color(502),
        Particle::new(ParticleId(6), 92, VertexId(5), VertexId(6)),
        Particle::new(ParticleId(7), 211, VertexId(6), VertexId(7)),
        Particle::new(ParticleId(8), -211, VertexId(6), VertexId(8)),
    ];
    EventGraph::new(vertices, particles).unwrap()
}

fn tools(specs: &[&str]) -> Vec<Box<dyn Tool>> {
    specs
        .iter()
        .map(|s| ToolKind::from_spec(&OperatorSpec::parse(s).unwrap()).unwrap())
        .collect()
}

#[test]
fn tools_run_in_order_on_snapshots() {
    let graph = event();
    let view = graph.view();
    let next = apply_tools(view.clone(), &tools(&["Kinks", "Chainmail", "Jets"])).unwrap();

    // kink at vertex 4 merged gluons 3 and 4
    let gluon = next.particle(ParticleId(3)).unwrap();
    assert!(gluon.has_tag(tags::KINK));
    assert!(gluon.has_tag(tags::CHAINMAIL));
    assert!(gluon.has_tag(tags::CLUSTER));
    assert!(next.particle(ParticleId(4)).is_none());

    // the string region became one summary vertex
    assert_eq!(next.summaries().len(), 1);
    assert_eq!(gluon.destination, next.summaries()[0].vertex);

    // the loaded graph and the input view are untouched
    assert_eq!(graph.particles().len(), 8);
    assert_eq!(view.particles().len(), 8);
    assert!(view.particles().values().all(|p| p.tags.is_empty()));
}

#[test]
fn unsummarize_restores_what_jets_contracted() {
    let view = event().view();
    let contracted = apply_tools(view.clone(), &tools(&["Jets"])).unwrap();
    let restored = apply_tools(contracted, &tools(&["Unsummarize"])).unwrap();
    assert_eq!(restored.vertices(), view.vertices());
    assert_eq!(restored.particles(), view.particles());
}

#[test]
fn pluck_with_option_keeps_connectivity() {
    let view = event().view();
    let next = apply_tools(view, &tools(&["Pluck:pdgid=92"])).unwrap();
    assert!(next.particle(ParticleId(6)).is_none());
    assert_eq!(next.particle(ParticleId(7)).unwrap().origin, VertexId(5));
    assert_eq!(next.particle(ParticleId(8)).unwrap().origin, VertexId(5));
    assert!(next.validate().is_ok());
}

#[test]
fn bad_tool_configuration_is_rejected() {
    let err = ToolKind::from_spec(&OperatorSpec::parse("Pluck:pdgid=gluon").unwrap())
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

    let err = ToolKind::from_spec(&OperatorSpec::parse("Pluck:code=21").unwrap())
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::UnknownOption);
}

use mcviz_error::{Error, Result};
use tracing::debug;

use super::{Tool, require_consistent};
use crate::tags;
use crate::view::{End, GraphView, Summary};

/// Undo every recorded contraction, most recent first.
///
/// Absorbed vertices and internal particles come back, boundary particles
/// get their original endpoints, and the tags the contraction added are
/// removed. A record that no longer matches the graph is an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsummarize;

impl Tool for Unsummarize {
    fn name(&self) -> &'static str {
        "Unsummarize"
    }

    #[tracing::instrument(skip_all)]
    fn apply(&self, view: &GraphView) -> Result<GraphView> {
        require_consistent(self.name(), view)?;
        let mut next = view.clone();
        let mut restored = 0usize;
        while let Some(summary) = next.pop_summary() {
            restore(&mut next, summary)?;
            restored += 1;
        }
        next.relink();
        debug!(restored, "restored summaries");
        Ok(next)
    }
}

fn precondition(message: String) -> Error {
    Error::tool_precondition("Unsummarize", message)
}

fn restore(view: &mut GraphView, summary: Summary) -> Result<()> {
    let hub = summary.vertex;
    match view.vertex(hub) {
        Some(vertex) if vertex.has_tag(tags::SUMMARY) => {}
        _ => return Err(precondition(format!("summary vertex {} is gone", hub))),
    }
    if let Some(clash) = summary.vertices.iter().find(|v| view.vertex(v.id).is_some()) {
        return Err(precondition(format!("vertex {} already exists", clash.id)));
    }
    if let Some(clash) = summary.particles.iter().find(|p| view.particle(p.id).is_some()) {
        return Err(precondition(format!("particle {} already exists", clash.id)));
    }

    for boundary in &summary.boundary {
        let Some(particle) = view.particle_mut(boundary.particle) else {
            return Err(precondition(format!(
                "boundary particle {} of summary {} is gone",
                boundary.particle, hub
            )));
        };
        let end = match boundary.end {
            End::Origin => &mut particle.origin,
            End::Destination => &mut particle.destination,
        };
        if *end != hub {
            return Err(precondition(format!(
                "boundary particle {} no longer attaches to summary {}",
                boundary.particle, hub
            )));
        }
        *end = boundary.original;
        for tag in &boundary.added_tags {
            particle.tags.remove(tag);
        }
    }

    if let Some(stray) = view
        .particles()
        .values()
        .find(|p| p.origin == hub || p.destination == hub)
    {
        return Err(precondition(format!(
            "particle {} attaches to summary {} but is not recorded",
            stray.id, hub
        )));
    }

    view.remove_vertex(hub);
    for vertex in summary.vertices {
        view.insert_vertex(vertex);
    }
    for particle in summary.particles {
        view.insert_particle(particle);
    }
    view.relink();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EventGraph;
    use crate::particle::{Particle, ParticleId};
    use crate::tools::{Jets, Kinks, Loops, Tool};
    use crate::vertex::{Vertex, VertexId};
    use mcviz_error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn graph(n: u32, particles: &[(u32, i32, u32, u32)]) -> GraphView {
        let vertices = (1..=n).map(|id| Vertex::new(VertexId(id))).collect();
        let particles = particles
            .iter()
            .map(|&(id, pdg, a, b)| Particle::new(ParticleId(id), pdg, VertexId(a), VertexId(b)))
            .collect();
        EventGraph::new(vertices, particles).unwrap().view()
    }

    #[test]
    fn test_restores_nested_contractions() {
        let view = graph(
            6,
            &[(1, 1, 1, 2), (2, 21, 2, 3), (3, 21, 3, 2), (4, 92, 3, 4), (5, 211, 4, 5), (6, -1, 6, 4)],
        );
        let contracted = Loops.apply(&view).unwrap();
        let contracted = Jets.apply(&contracted).unwrap();
        assert_eq!(contracted.summaries().len(), 2);

        let restored = Unsummarize.apply(&contracted).unwrap();
        assert!(restored.summaries().is_empty());
        assert_eq!(restored.vertices(), view.vertices());
        assert_eq!(restored.particles(), view.particles());
    }

    #[test]
    fn test_noop_without_summaries() {
        let view = graph(2, &[(1, 22, 1, 2)]);
        let restored = Unsummarize.apply(&view).unwrap();
        assert_eq!(restored.particles(), view.particles());
    }

    #[test]
    fn test_mismatched_record_fails() {
        // 1 -g-> {2 <-> 3} -g-> 4 -g-> 5: after the loop is contracted Kinks
        // splices vertex 4, which the loop record does not involve
        let view = graph(
            5,
            &[(1, 21, 1, 2), (2, 21, 2, 3), (3, 21, 3, 2), (4, 21, 3, 4), (5, 21, 4, 5)],
        );
        let contracted = Loops.apply(&view).unwrap();
        let kinked = Kinks.apply(&contracted).unwrap();
        assert!(kinked.particle(ParticleId(5)).is_none());
        assert!(Unsummarize.apply(&kinked).is_ok());

        // a boundary particle removed behind the record's back
        let mut broken = contracted.clone();
        broken.remove_particle(ParticleId(1));
        broken.relink();
        let err = Unsummarize.apply(&broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ToolPrecondition);
    }
}

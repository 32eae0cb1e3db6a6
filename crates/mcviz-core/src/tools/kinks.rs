use mcviz_error::{Error, Result};
use tracing::debug;

use super::{Tool, require_consistent};
use crate::tags;
use crate::vertex::VertexId;
use crate::view::GraphView;

/// Remove pass-through vertices between two particles of the same kind.
///
/// A vertex with exactly one incoming and one outgoing particle is removed
/// when both particles share a PDG code: the incoming particle is extended
/// to the outgoing one's destination and tagged `kink`. A code change or a
/// summary vertex leaves the vertex in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct Kinks;

impl Tool for Kinks {
    fn name(&self) -> &'static str {
        "Kinks"
    }

    #[tracing::instrument(skip_all)]
    fn apply(&self, view: &GraphView) -> Result<GraphView> {
        require_consistent(self.name(), view)?;
        let mut next = view.clone();
        let candidates: Vec<VertexId> = next.vertices().keys().copied().collect();
        let mut spliced = 0usize;

        for id in candidates {
            let Some(vertex) = next.vertex(id) else {
                continue;
            };
            if vertex.incoming.len() != 1 || vertex.outgoing.len() != 1 {
                continue;
            }
            let (Some(&incoming), Some(&outgoing)) =
                (vertex.incoming.first(), vertex.outgoing.first())
            else {
                continue;
            };
            if incoming == outgoing {
                continue;
            }
            if vertex.has_tag(tags::SUMMARY) {
                debug!(vertex = %id, "kink at summary vertex left in place");
                continue;
            }

            let (Some(before), Some(after)) = (next.particle(incoming), next.particle(outgoing))
            else {
                return Err(Error::tool_precondition(
                    "Kinks",
                    format!("vertex {} lists a missing particle", id),
                ));
            };
            if before.pdgid != after.pdgid {
                debug!(
                    vertex = %id,
                    incoming = before.pdgid,
                    outgoing = after.pdgid,
                    "kind changes across vertex, left in place"
                );
                continue;
            }
            let destination = after.destination;

            next.remove_particle(outgoing);
            next.remove_vertex(id);
            if let Some(particle) = next.particle_mut(incoming) {
                particle.destination = destination;
                particle.tag(tags::KINK);
            }
            let Some(end) = next.vertex_mut(destination) else {
                return Err(Error::tool_precondition(
                    "Kinks",
                    format!("particle {} ends at missing vertex {}", outgoing, destination),
                ));
            };
            end.incoming.remove(&outgoing);
            end.incoming.insert(incoming);
            spliced += 1;
        }

        next.relink();
        debug!(spliced, "removed kinks");
        Ok(next)
    }
}

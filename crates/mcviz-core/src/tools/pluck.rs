use mcviz_error::{Error, Result};
use tracing::debug;

use super::{Tool, require_consistent};
use crate::args::{Arg, Options};
use crate::particle::ParticleId;
use crate::tags;
use crate::view::GraphView;

pub(super) const ARGS: &[Arg] = &[Arg::int("pdgid", "PDG code of the particles to remove", "91")];

/// Remove every particle with one PDG code and join its two ends.
///
/// The plucked particle's destination vertex is merged into its origin, so
/// whatever hung off the removed particle now hangs off the origin vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pluck {
    pub pdgid: i32,
}

impl Default for Pluck {
    fn default() -> Self {
        Self { pdgid: 91 }
    }
}

impl Pluck {
    pub fn new(pdgid: i32) -> Self {
        Self { pdgid }
    }

    pub fn from_options(options: &Options) -> Result<Self> {
        let pdgid = options.int("pdgid")?;
        let pdgid = i32::try_from(pdgid)
            .map_err(|_| Error::config_invalid(format!("pdgid {} out of range", pdgid)))?;
        Ok(Self { pdgid })
    }
}

impl Tool for Pluck {
    fn name(&self) -> &'static str {
        "Pluck"
    }

    #[tracing::instrument(skip_all, fields(pdgid = self.pdgid))]
    fn apply(&self, view: &GraphView) -> Result<GraphView> {
        require_consistent(self.name(), view)?;
        let mut next = view.clone();
        let targets: Vec<ParticleId> = view
            .particles()
            .values()
            .filter(|p| p.pdgid == self.pdgid)
            .map(|p| p.id)
            .collect();

        let mut plucked = 0usize;
        for id in targets {
            let Some(particle) = next.remove_particle(id) else {
                continue;
            };
            let (origin, destination) = (particle.origin, particle.destination);
            for end in [origin, destination] {
                match next.vertex(end) {
                    None => {
                        return Err(Error::tool_precondition(
                            "Pluck",
                            format!("particle {} references missing vertex {}", id, end),
                        ));
                    }
                    Some(vertex) if vertex.has_tag(tags::SUMMARY) => {
                        return Err(Error::tool_precondition(
                            "Pluck",
                            format!("particle {} touches summary vertex {}", id, end),
                        ));
                    }
                    Some(_) => {}
                }
            }
            plucked += 1;
            if origin == destination {
                continue;
            }

            let attached: Vec<ParticleId> = next
                .particles()
                .values()
                .filter(|p| p.origin == destination || p.destination == destination)
                .map(|p| p.id)
                .collect();
            for other in attached {
                if let Some(p) = next.particle_mut(other) {
                    if p.origin == destination {
                        p.origin = origin;
                    }
                    if p.destination == destination {
                        p.destination = origin;
                    }
                }
            }
            if let Some(merged) = next.remove_vertex(destination)
                && let Some(vertex) = next.vertex_mut(origin)
            {
                vertex.tags.extend(merged.tags);
            }
        }

        next.relink();
        debug!(plucked, "plucked particles");
        Ok(next)
    }
}

use std::collections::{BTreeMap, BTreeSet};

use mcviz_error::Result;
use tracing::debug;

use super::{Tool, require_consistent};
use crate::particle::ParticleId;
use crate::tags;
use crate::vertex::VertexId;
use crate::view::GraphView;

/// Tag closed gluon clusters.
///
/// A vertex whose incident particles are all gluons, with at least one in
/// and one out, is a gluball vertex. Gluons running between two gluball
/// vertices are tagged as well.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gluballs;

impl Tool for Gluballs {
    fn name(&self) -> &'static str {
        "Gluballs"
    }

    #[tracing::instrument(skip_all)]
    fn apply(&self, view: &GraphView) -> Result<GraphView> {
        require_consistent(self.name(), view)?;
        let balls: BTreeSet<VertexId> = view
            .vertices()
            .values()
            .filter(|v| !v.incoming.is_empty() && !v.outgoing.is_empty())
            .filter(|v| {
                v.particles()
                    .all(|p| view.particle(p).is_some_and(|p| p.gluon()))
            })
            .map(|v| v.id)
            .collect();
        let gluons: Vec<ParticleId> = view
            .particles()
            .values()
            .filter(|p| p.gluon() && balls.contains(&p.origin) && balls.contains(&p.destination))
            .map(|p| p.id)
            .collect();

        let mut next = view.clone();
        for &id in &balls {
            if let Some(vertex) = next.vertex_mut(id) {
                vertex.tag(tags::GLUBALL);
            }
        }
        for &id in &gluons {
            if let Some(particle) = next.particle_mut(id) {
                particle.tag(tags::GLUBALL);
            }
        }
        debug!(vertices = balls.len(), particles = gluons.len(), "tagged gluballs");
        Ok(next)
    }
}

/// Tag colour-connected particles as groups.
///
/// Colour and anticolour indices carried by the same particle belong to the
/// same group. Every particle of a group with at least two members gets
/// `chainmail` and `chain:<n>`, with `n` counting groups from zero in order
/// of their smallest colour index.
#[derive(Debug, Default, Clone, Copy)]
pub struct Chainmail;

impl Tool for Chainmail {
    fn name(&self) -> &'static str {
        "Chainmail"
    }

    #[tracing::instrument(skip_all)]
    fn apply(&self, view: &GraphView) -> Result<GraphView> {
        require_consistent(self.name(), view)?;
        let mut sets = ColorSets::default();
        for particle in view.particles().values() {
            match (particle.color, particle.anticolor) {
                (Some(c), Some(a)) => sets.union(c, a),
                (Some(c), None) | (None, Some(c)) => {
                    sets.find(c);
                }
                (None, None) => {}
            }
        }

        let mut groups: BTreeMap<u32, Vec<ParticleId>> = BTreeMap::new();
        for particle in view.particles().values() {
            if let Some(index) = particle.color.or(particle.anticolor) {
                groups.entry(sets.find(index)).or_default().push(particle.id);
            }
        }

        let mut next = view.clone();
        let mut chains = 0usize;
        for members in groups.values().filter(|m| m.len() >= 2) {
            let chain = format!("chain:{}", chains);
            for &id in members {
                if let Some(particle) = next.particle_mut(id) {
                    particle.tag(tags::CHAINMAIL);
                    particle.tag(&chain);
                }
            }
            chains += 1;
        }
        debug!(chains, "tagged colour chains");
        Ok(next)
    }
}

/// Union-find over colour indices; a set's representative is its smallest
/// index, so iterating groups by representative orders them by that index.
#[derive(Debug, Default)]
struct ColorSets {
    parent: BTreeMap<u32, u32>,
}

impl ColorSets {
    fn find(&mut self, index: u32) -> u32 {
        let mut root = *self.parent.entry(index).or_insert(index);
        while let Some(&up) = self.parent.get(&root) {
            if up == root {
                break;
            }
            root = up;
        }
        // path compression
        let mut cursor = index;
        while cursor != root {
            let up = self.parent.insert(cursor, root).unwrap_or(root);
            cursor = up;
        }
        root
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (low, high) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent.insert(high, low);
        }
    }
}

//! The working copy of an event graph that tools operate on.

use std::collections::{BTreeMap, BTreeSet};

use mcviz_error::{Error, Result};

use crate::particle::{Particle, ParticleId};
use crate::vertex::{Vertex, VertexId};

/// Which end of a particle a contraction re-targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Origin,
    Destination,
}

/// A boundary particle of a contracted region.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub particle: ParticleId,
    pub end: End,
    /// The endpoint before contraction.
    pub original: VertexId,
    /// Tags the contraction added, removed again on restore.
    pub added_tags: Vec<String>,
}

/// Everything a contraction needs to be undone.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// The synthetic vertex standing in for the region.
    pub vertex: VertexId,
    /// `jet` or `loop`
    pub label: &'static str,
    pub vertices: Vec<Vertex>,
    /// Particles with both ends inside the region.
    pub particles: Vec<Particle>,
    pub boundary: Vec<Boundary>,
}

/// Snapshot of the event graph exposed to the tool pipeline.
///
/// Particle endpoints are the single source of truth: vertex incidence sets
/// and the initial/final flags are rebuilt from them by [`GraphView::relink`].
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    vertices: BTreeMap<VertexId, Vertex>,
    particles: BTreeMap<ParticleId, Particle>,
    summaries: Vec<Summary>,
}

impl GraphView {
    pub(crate) fn from_maps(
        vertices: BTreeMap<VertexId, Vertex>,
        particles: BTreeMap<ParticleId, Particle>,
    ) -> Self {
        let mut view = Self {
            vertices,
            particles,
            summaries: Vec::new(),
        };
        view.relink();
        view
    }

    pub fn vertices(&self) -> &BTreeMap<VertexId, Vertex> {
        &self.vertices
    }

    pub fn particles(&self) -> &BTreeMap<ParticleId, Particle> {
        &self.particles
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    /// Contractions still recorded, oldest first.
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Initial-state particles in ascending id order.
    pub fn initial_particles(&self) -> Vec<&Particle> {
        self.particles
            .values()
            .filter(|p| p.initial_state)
            .collect()
    }

    /// Distinct destination vertices of `id`'s outgoing particles.
    pub fn successors(&self, id: VertexId) -> Vec<VertexId> {
        let Some(vertex) = self.vertices.get(&id) else {
            return Vec::new();
        };
        let set: BTreeSet<VertexId> = vertex
            .outgoing
            .iter()
            .filter_map(|p| self.particles.get(p))
            .map(|p| p.destination)
            .collect();
        set.into_iter().collect()
    }

    /// Distinct origin vertices of `id`'s incoming particles.
    pub fn predecessors(&self, id: VertexId) -> Vec<VertexId> {
        let Some(vertex) = self.vertices.get(&id) else {
            return Vec::new();
        };
        let set: BTreeSet<VertexId> = vertex
            .incoming
            .iter()
            .filter_map(|p| self.particles.get(p))
            .map(|p| p.origin)
            .collect();
        set.into_iter().collect()
    }

    /// Check referential integrity in both directions: particle endpoints
    /// resolve, and vertex incidence sets agree with them.
    pub fn validate(&self) -> Result<()> {
        check_references(&self.vertices, &self.particles)?;
        for vertex in self.vertices.values() {
            for id in &vertex.incoming {
                match self.particles.get(id) {
                    Some(p) if p.destination == vertex.id => {}
                    _ => {
                        return Err(Error::dangling_reference(id, vertex.id)
                            .with_context("side", "incoming"));
                    }
                }
            }
            for id in &vertex.outgoing {
                match self.particles.get(id) {
                    Some(p) if p.origin == vertex.id => {}
                    _ => {
                        return Err(Error::dangling_reference(id, vertex.id)
                            .with_context("side", "outgoing"));
                    }
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Mutation, for tools only
    // =========================================================================

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(&id)
    }

    pub(crate) fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(&id)
    }

    pub(crate) fn insert_vertex(&mut self, vertex: Vertex) {
        self.vertices.insert(vertex.id, vertex);
    }

    pub(crate) fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        self.vertices.remove(&id)
    }

    pub(crate) fn insert_particle(&mut self, particle: Particle) {
        self.particles.insert(particle.id, particle);
    }

    pub(crate) fn remove_particle(&mut self, id: ParticleId) -> Option<Particle> {
        self.particles.remove(&id)
    }

    pub(crate) fn push_summary(&mut self, summary: Summary) {
        self.summaries.push(summary);
    }

    pub(crate) fn pop_summary(&mut self) -> Option<Summary> {
        self.summaries.pop()
    }

    /// An id not used by any live or summarized vertex.
    pub(crate) fn next_vertex_id(&self) -> VertexId {
        let live = self.vertices.keys().next_back().map_or(0, |v| v.0);
        let recorded = self
            .summaries
            .iter()
            .flat_map(|s| s.vertices.iter().map(|v| v.id.0).chain([s.vertex.0]))
            .max()
            .unwrap_or(0);
        VertexId(live.max(recorded) + 1)
    }

    /// Rebuild vertex incidence and topology flags from particle endpoints.
    pub(crate) fn relink(&mut self) {
        relink(&mut self.vertices, &mut self.particles);
    }
}

pub(crate) fn check_references(
    vertices: &BTreeMap<VertexId, Vertex>,
    particles: &BTreeMap<ParticleId, Particle>,
) -> Result<()> {
    for particle in particles.values() {
        for end in [particle.origin, particle.destination] {
            if !vertices.contains_key(&end) {
                return Err(Error::dangling_reference(particle.id, end));
            }
        }
    }
    Ok(())
}

pub(crate) fn relink(
    vertices: &mut BTreeMap<VertexId, Vertex>,
    particles: &mut BTreeMap<ParticleId, Particle>,
) {
    for vertex in vertices.values_mut() {
        vertex.incoming.clear();
        vertex.outgoing.clear();
    }
    for particle in particles.values() {
        if let Some(v) = vertices.get_mut(&particle.origin) {
            v.outgoing.insert(particle.id);
        }
        if let Some(v) = vertices.get_mut(&particle.destination) {
            v.incoming.insert(particle.id);
        }
    }
    for vertex in vertices.values_mut() {
        vertex.initial = vertex.incoming.is_empty();
    }
    for particle in particles.values_mut() {
        particle.initial_state = vertices.get(&particle.origin).is_some_and(|v| v.initial);
        particle.final_state = vertices
            .get(&particle.destination)
            .is_some_and(|v| v.outgoing.is_empty());
    }
}

use std::collections::BTreeMap;
use std::path::Path;

use mcviz_error::{Error, Result};

use crate::load::{Loader, load_event};
use crate::particle::{Particle, ParticleId};
use crate::vertex::{Vertex, VertexId};
use crate::view::{GraphView, check_references, relink};

/// A loaded event: vertices and particles keyed by identity.
///
/// Construction checks that every particle endpoint resolves to a vertex;
/// the graph is immutable afterwards. Tools work on [`GraphView`] copies
/// obtained through [`EventGraph::view`].
#[derive(Debug, Clone)]
pub struct EventGraph {
    vertices: BTreeMap<VertexId, Vertex>,
    particles: BTreeMap<ParticleId, Particle>,
}

impl EventGraph {
    /// Build a graph from loader output.
    ///
    /// Duplicate identities are a parse failure; particles that reference a
    /// missing vertex are a dangling reference. Both are recoverable so the
    /// load dispatcher can move on to the next loader.
    pub fn new(vertices: Vec<Vertex>, particles: Vec<Particle>) -> Result<Self> {
        let mut vertex_map = BTreeMap::new();
        for vertex in vertices {
            let id = vertex.id;
            if vertex_map.insert(id, vertex).is_some() {
                return Err(Error::parse_failed(format!("duplicate vertex id {}", id))
                    .with_operation("graph::new"));
            }
        }

        let mut particle_map = BTreeMap::new();
        for particle in particles {
            let id = particle.id;
            if particle_map.insert(id, particle).is_some() {
                return Err(Error::parse_failed(format!("duplicate particle id {}", id))
                    .with_operation("graph::new"));
            }
        }

        check_references(&vertex_map, &particle_map).map_err(|e| e.with_operation("graph::new"))?;
        relink(&mut vertex_map, &mut particle_map);

        Ok(Self {
            vertices: vertex_map,
            particles: particle_map,
        })
    }

    /// Load an event through an ordered list of loaders.
    pub fn load(path: impl AsRef<Path>, loaders: &[Box<dyn Loader>]) -> Result<Self> {
        load_event(path, loaders)
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

    /// Initial-state particles in ascending id order.
    pub fn initial_particles(&self) -> Vec<&Particle> {
        self.particles
            .values()
            .filter(|p| p.initial_state)
            .collect()
    }

    /// A fresh working copy for the tool pipeline.
    pub fn view(&self) -> GraphView {
        GraphView::from_maps(self.vertices.clone(), self.particles.clone())
    }
}

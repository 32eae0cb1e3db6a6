use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::particle::ParticleId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VertexId(pub u32);

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl VertexId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// An interaction point.
///
/// `incoming`, `outgoing` and `initial` are derived from particle endpoints
/// whenever the owning graph relinks; loaders only need to supply the id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vertex {
    pub id: VertexId,
    pub incoming: BTreeSet<ParticleId>,
    pub outgoing: BTreeSet<ParticleId>,
    /// No incoming particles: the start of a beam.
    pub initial: bool,
    pub tags: BTreeSet<String>,
}

impl Vertex {
    pub fn new(id: VertexId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn degree(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }

    /// No outgoing particles.
    pub fn terminal(&self) -> bool {
        self.outgoing.is_empty()
    }

    /// Incoming then outgoing particles.
    pub fn particles(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.incoming.iter().chain(self.outgoing.iter()).copied()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn tag(&mut self, tag: &str) -> bool {
        self.tags.insert(tag.to_string())
    }
}

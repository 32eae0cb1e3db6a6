//! JSON event dump reader.

use mcviz_error::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::load::Loader;
use crate::particle::{Particle, ParticleId};
use crate::vertex::{Vertex, VertexId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: VertexId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    pub id: ParticleId,
    pub pdgid: i32,
    pub origin: VertexId,
    pub destination: VertexId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    /// `[px, py, pz, e]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anticolor: Option<u32>,
}

impl From<ParticleRecord> for Particle {
    fn from(record: ParticleRecord) -> Self {
        let mut particle = Particle::new(record.id, record.pdgid, record.origin, record.destination);
        particle.status = record.status;
        particle.pt = record.pt;
        particle.phi = record.phi;
        if let Some([px, py, pz, e]) = record.momentum {
            particle = particle.with_momentum(px, py, pz, e);
        }
        particle
            .with_color(record.color.unwrap_or(0))
            .with_anticolor(record.anticolor.unwrap_or(0))
    }
}

/// Top-level document: `{ "vertices": [...], "particles": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDump {
    pub vertices: Vec<VertexRecord>,
    pub particles: Vec<ParticleRecord>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLoader;

impl Loader for JsonLoader {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, text: &str) -> Result<(Vec<Vertex>, Vec<Particle>)> {
        let dump: EventDump = serde_json::from_str(text).map_err(|err| {
            Error::parse_failed(format!("not a JSON event dump: {}", err)).set_source(err)
        })?;
        let vertices = dump
            .vertices
            .into_iter()
            .map(|record| Vertex::new(record.id))
            .collect();
        let particles = dump.particles.into_iter().map(Particle::from).collect();
        Ok((vertices, particles))
    }
}

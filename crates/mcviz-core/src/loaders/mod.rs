//! Reference loaders.

mod hepmc;
mod json;

pub use hepmc::HepMcLoader;
pub use json::{EventDump, JsonLoader, ParticleRecord, VertexRecord};

use crate::load::Loader;

/// The fixed dispatch order: HepMC first, then JSON.
pub fn default_loaders() -> Vec<Box<dyn Loader>> {
    vec![Box::new(HepMcLoader), Box::new(JsonLoader)]
}

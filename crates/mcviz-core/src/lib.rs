//! Event graph model, load dispatch and structural tools for mcviz.
//!
//! A loaded [`EventGraph`] is never mutated. Tools work on [`GraphView`]
//! snapshots: each tool takes the previous view and returns a new one.

pub mod algo;
pub mod args;
pub mod graph;
pub mod load;
pub mod loaders;
pub mod particle;
pub mod tools;
pub mod vertex;
pub mod view;

pub use args::{Arg, ArgKind, ArgValue, OperatorSpec, Options};
pub use graph::EventGraph;
pub use load::{Loader, load_event, read_source};
pub use loaders::{HepMcLoader, JsonLoader, default_loaders};
pub use mcviz_error::{Error, ErrorKind, Result};
pub use particle::{Particle, ParticleId};
pub use tools::{Tool, ToolKind, apply_tools};
pub use vertex::{Vertex, VertexId};
pub use view::{Boundary, End, GraphView, Summary};

/// Tag names shared between tools, layouts and styles.
pub mod tags {
    pub const SUMMARY: &str = "summary";
    pub const JET: &str = "jet";
    pub const LOOP: &str = "loop";
    pub const CLUSTER: &str = "cluster";
    pub const KINK: &str = "kink";
    pub const GLUBALL: &str = "gluball";
    pub const CHAINMAIL: &str = "chainmail";
}

//! Loader contract and the fixed-order load dispatcher.

use std::fs;
use std::path::Path;

use mcviz_error::{Error, Result};
use tracing::{debug, error, info};

use crate::graph::EventGraph;
use crate::particle::Particle;
use crate::vertex::Vertex;

/// A format-specific event reader.
///
/// `parse` fails with a recoverable error (`ParseFailed`) when the text is
/// not in this loader's format; the dispatcher then tries the next loader.
pub trait Loader {
    fn name(&self) -> &'static str;

    fn parse(&self, text: &str) -> Result<(Vec<Vertex>, Vec<Particle>)>;

    /// Read `path` and parse it. The file handle is released before parsing.
    fn load(&self, path: &Path) -> Result<(Vec<Vertex>, Vec<Particle>)> {
        let text = read_source(path)?;
        self.parse(&text)
    }
}

/// Read an event source into memory.
///
/// I/O failures map to the read error kinds; content that is not UTF-8 is a
/// parse failure since no text loader can match it.
pub fn read_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        Error::from(err)
            .with_operation("read_source")
            .with_context("path", path.display().to_string())
    })?;
    String::from_utf8(bytes).map_err(|err| {
        Error::parse_failed("event source is not valid UTF-8")
            .with_context("path", path.display().to_string())
            .set_source(err)
    })
}

/// Try each loader in order; the first structurally valid parse wins.
///
/// A read error aborts immediately. Parse failures and loader output with
/// dangling references fall through to the next loader. If nothing
/// matches the result is `NoLoaderSucceeded`.
pub fn load_event(path: impl AsRef<Path>, loaders: &[Box<dyn Loader>]) -> Result<EventGraph> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let text = match read_source(path) {
        Ok(text) => text,
        Err(err) if err.is_recoverable() => {
            debug!(path = %shown, error = %err, "event source is not text");
            return Err(Error::no_loader_succeeded(shown).set_source(err));
        }
        Err(err) => {
            error!(path = %shown, error = %err, "loading event source failed");
            return Err(err.with_operation("load_event"));
        }
    };

    for loader in loaders {
        let outcome = loader
            .parse(&text)
            .and_then(|(vertices, particles)| EventGraph::new(vertices, particles));
        match outcome {
            Ok(graph) => {
                info!(
                    loader = loader.name(),
                    vertices = graph.vertices().len(),
                    particles = graph.particles().len(),
                    "loaded event"
                );
                return Ok(graph);
            }
            Err(err) if err.is_recoverable() => {
                debug!(loader = loader.name(), error = %err, "loader did not match");
            }
            Err(err) => return Err(err.with_operation("load_event")),
        }
    }

    Err(Error::no_loader_succeeded(shown))
}

//! Turn styled layout edges into path data.
//!
//! Each edge becomes one group: its style attributes plus one or more
//! paths. The geometry generator is chosen by the edge's line type, and
//! reads the `energy` and `scale` attributes the styles left behind.
//! Assembling the groups into a document is left to the caller.

use mcviz_error::{Error, Result};
use mcviz_layout::{Edge, Layout, LineType, StyleArgs};
use mcviz_spline::{
    DEFAULT_AMPLITUDE, GluonShape, PhotonShape, fermion_arrow_data, fermion_arrow_size,
};
use serde::Serialize;
use tracing::debug;

/// Attributes consumed by the geometry rather than passed through.
const GEOMETRY_ARGS: [&str; 2] = ["energy", "scale"];

/// One drawable path with its own attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPath {
    pub d: String,
    pub attrs: StyleArgs,
}

impl RenderedPath {
    fn new(d: String, name: &str, value: &str) -> Self {
        let mut attrs = StyleArgs::new();
        attrs.set(name, value);
        Self { d, attrs }
    }
}

/// The group drawn for one layout edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedEdge {
    /// What the edge stands for, e.g. `particle 3`.
    pub item: String,
    pub line_type: LineType,
    pub attrs: StyleArgs,
    pub paths: Vec<RenderedPath>,
}

// ============================================================================
// Public API
// ============================================================================

/// Render every edge of `layout`, in edge order.
pub fn render_layout(layout: &Layout) -> Result<Vec<RenderedEdge>> {
    let rendered = layout
        .edges
        .iter()
        .map(render_edge)
        .collect::<Result<Vec<_>>>()?;
    debug!(edges = rendered.len(), "rendered layout");
    Ok(rendered)
}

/// Render one edge.
///
/// Fails with `StyleIncomplete` when the edge has no line type, or no
/// numeric `energy` or `scale` attribute.
pub fn render_edge(edge: &Edge) -> Result<RenderedEdge> {
    let Some(line_type) = edge.line_type else {
        return Err(incomplete(edge, "line type"));
    };
    let energy = required_number(edge, "energy")?;
    let scale = required_number(edge, "scale")?;
    let amplitude = DEFAULT_AMPLITUDE * scale;
    let base = &edge.spline;

    let paths = match line_type {
        LineType::Identity | LineType::Hadron => {
            vec![RenderedPath::new(base.path_data(), "fill", "none")]
        }
        LineType::Photon | LineType::FinalPhoton => vec![RenderedPath::new(
            PhotonShape::photon(amplitude).path_data(energy, base),
            "fill",
            "none",
        )],
        LineType::Boson => vec![RenderedPath::new(
            PhotonShape::boson(amplitude).path_data(energy, base),
            "fill",
            "none",
        )],
        LineType::Gluon => vec![RenderedPath::new(
            GluonShape::new(amplitude).path_data(energy, base),
            "fill",
            "none",
        )],
        LineType::Fermion => {
            let size = fermion_arrow_size(energy);
            vec![
                RenderedPath::new(base.path_data(), "fill", "none"),
                RenderedPath::new(fermion_arrow_data(size, base), "stroke", "none"),
            ]
        }
    };

    let mut attrs = StyleArgs::new();
    for (name, value) in edge.style_args.iter() {
        if !GEOMETRY_ARGS.contains(&name) {
            attrs.set(name, value.clone());
        }
    }

    Ok(RenderedEdge {
        item: edge.item.to_string(),
        line_type,
        attrs,
        paths,
    })
}

fn required_number(edge: &Edge, name: &'static str) -> Result<f64> {
    edge.style_args
        .number(name)
        .ok_or_else(|| incomplete(edge, name).with_context("attribute", name))
}

fn incomplete(edge: &Edge, what: &str) -> Error {
    Error::style_incomplete(format!("{} has no {}", edge.item, what))
        .with_operation("render_edge")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcviz_core::{Particle, ParticleId, VertexId};
    use mcviz_error::ErrorKind;
    use mcviz_layout::Item;
    use mcviz_spline::{Point, Spline};

    fn edge(line_type: Option<LineType>) -> Edge {
        let particle = Particle::new(ParticleId(7), 11, VertexId(1), VertexId(2));
        let spline = Spline::line(Point::ORIGIN, Point::new(60.0, 0.0));
        let mut edge = Edge::new(Item::Particle(particle), 0, 1, spline);
        edge.line_type = line_type;
        edge.style_args
            .set("energy", 0.2)
            .set("scale", 1.0)
            .set("stroke", "black");
        edge
    }

    #[test]
    fn test_missing_line_type_is_incomplete() {
        let err = render_edge(&edge(None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StyleIncomplete);
    }

    #[test]
    fn test_missing_energy_is_incomplete() {
        let mut edge = edge(Some(LineType::Photon));
        edge.style_args = StyleArgs::new();
        edge.style_args.set("scale", 1.0).set("energy", "high");
        let err = render_edge(&edge).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StyleIncomplete);
        assert!(err.message().contains("energy"));
    }

    #[test]
    fn test_fermion_has_line_and_arrow() {
        let rendered = render_edge(&edge(Some(LineType::Fermion))).unwrap();
        assert_eq!(rendered.item, "particle 7");
        assert_eq!(rendered.paths.len(), 2);
        assert_eq!(rendered.paths[0].d, "M0.00 0.00C20.00 0.00 40.00 0.00 60.00 0.00");
        assert_eq!(rendered.paths[1].attrs.text("stroke"), Some("none"));
        assert!(rendered.paths[1].d.ends_with('Z'));
    }

    #[test]
    fn test_geometry_args_are_consumed() {
        let rendered = render_edge(&edge(Some(LineType::Identity))).unwrap();
        assert_eq!(rendered.attrs.text("stroke"), Some("black"));
        assert!(rendered.attrs.get("energy").is_none());
        assert!(rendered.attrs.get("scale").is_none());
        assert_eq!(rendered.paths[0].attrs.text("fill"), Some("none"));
    }

    #[test]
    fn test_wavy_lines_span_the_edge() {
        for line_type in [LineType::Photon, LineType::FinalPhoton, LineType::Boson, LineType::Gluon] {
            let rendered = render_edge(&edge(Some(line_type))).unwrap();
            let d = &rendered.paths[0].d;
            assert!(d.starts_with("M0.00 0.00C"), "{line_type}: {d}");
            assert!(d.ends_with("60.00 0.00"), "{line_type}: {d}");
        }
    }
}

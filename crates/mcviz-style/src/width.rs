use mcviz_core::{Arg, ArgKind, Options, Particle};
use mcviz_error::{Error, Result};
use mcviz_layout::{Item, Layout};

use crate::Style;

pub(crate) const LINE_WIDTH_ARGS: &[Arg] = &[
    Arg::float("scale", "scale of the line effects", "1.0"),
    Arg::float("min", "minimal width of a line", "0.1"),
];

pub(crate) const THICKEN_ARGS: &[Arg] =
    &[Arg::required("color_id", ArgKind::Int, "id of the colour to thicken")];

const THICK_STROKE_WIDTH: f64 = 0.5;

/// Stroke width grows with the transverse momentum of the particle an
/// entity stands for.
///
/// Applies to particle-backed edges and nodes, and to vertex-backed edges
/// through the particle they lead to. Entities without a momentum are left
/// alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineWidthPt {
    pub scale: f64,
    pub min: f64,
}

impl Default for LineWidthPt {
    fn default() -> Self {
        Self { scale: 1.0, min: 0.1 }
    }
}

impl LineWidthPt {
    pub fn from_options(options: &Options) -> Result<Self> {
        Ok(Self {
            scale: options.float("scale")?,
            min: options.float("min")?,
        })
    }

    pub fn width(&self, pt: f64) -> f64 {
        self.min + self.scale * (pt.max(0.0) + 1.0).ln() * 0.1
    }
}

impl Style for LineWidthPt {
    fn name(&self) -> &'static str {
        "LineWidthPt"
    }

    fn apply(&self, layout: &mut Layout) -> Result<()> {
        for edge in &mut layout.edges {
            let particle = match &edge.item {
                Item::Particle(particle) => Some(particle),
                Item::Vertex(_) => edge.going.as_ref(),
            };
            if let Some(pt) = particle.and_then(|p| p.pt) {
                edge.style_args.set("stroke-width", self.width(pt));
            }
        }
        for node in &mut layout.nodes {
            if let Item::Particle(Particle { pt: Some(pt), .. }) = &node.item {
                node.style_args.set("stroke-width", self.width(*pt));
            }
        }
        Ok(())
    }
}

/// Thicken every particle-backed edge carrying one colour index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThickenColor {
    pub color_id: u32,
}

impl ThickenColor {
    pub fn new(color_id: u32) -> Self {
        Self { color_id }
    }

    pub fn from_options(options: &Options) -> Result<Self> {
        let color_id = options.int("color_id")?;
        let color_id = u32::try_from(color_id).map_err(|_| {
            Error::config_invalid(format!("color_id {} is not a colour index", color_id))
                .with_context("option", "color_id")
        })?;
        Ok(Self { color_id })
    }
}

impl Style for ThickenColor {
    fn name(&self) -> &'static str {
        "ThickenColor"
    }

    fn apply(&self, layout: &mut Layout) -> Result<()> {
        for edge in &mut layout.edges {
            if let Item::Particle(particle) = &edge.item
                && particle.carries_color(self.color_id)
            {
                edge.style_args.set("stroke-width", THICK_STROKE_WIDTH);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcviz_core::{EventGraph, ParticleId, Vertex, VertexId};
    use mcviz_layout::LayoutKind;

    fn view() -> mcviz_core::GraphView {
        let vertices = (1..=3).map(|id| Vertex::new(VertexId(id))).collect();
        let particles = vec![
            Particle::new(ParticleId(1), 2, VertexId(1), VertexId(2))
                .with_pt(0.0)
                .with_color(501),
            Particle::new(ParticleId(2), 21, VertexId(2), VertexId(3))
                .with_pt(std::f64::consts::E - 1.0)
                .with_color(502)
                .with_anticolor(501),
            Particle::new(ParticleId(3), 211, VertexId(2), VertexId(3)),
        ];
        EventGraph::new(vertices, particles).unwrap().view()
    }

    #[test]
    fn test_width_formula() {
        let style = LineWidthPt { scale: 2.0, min: 0.1 };
        assert!((style.width(0.0) - 0.1).abs() < 1e-12);
        assert!((style.width(std::f64::consts::E - 1.0) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_line_width_on_feynman_edges() {
        let mut layout = LayoutKind::Feynman.layout(&view()).unwrap();
        LineWidthPt::default().apply(&mut layout).unwrap();
        let width = |i: usize| layout.edges[i].style_args.number("stroke-width");
        assert_eq!(width(0), Some(0.1));
        assert!((width(1).unwrap() - 0.2).abs() < 1e-12);
        // no momentum, untouched
        assert_eq!(width(2), None);
        assert!(layout.nodes.iter().all(|n| n.style_args.is_empty()));
    }

    #[test]
    fn test_line_width_on_dual_nodes_and_hubs() {
        let mut layout = LayoutKind::Dual.layout(&view()).unwrap();
        LineWidthPt::default().apply(&mut layout).unwrap();
        assert_eq!(layout.nodes[0].style_args.number("stroke-width"), Some(0.1));
        assert_eq!(layout.nodes[2].style_args.number("stroke-width"), None);
        // the hub edge towards the gluon takes the gluon's width
        let towards_gluon = layout
            .edges
            .iter()
            .find(|e| e.going.as_ref().is_some_and(|p| p.id == ParticleId(2)))
            .unwrap();
        assert!((towards_gluon.style_args.number("stroke-width").unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_thicken_color_matches_color_or_anticolor() {
        let mut layout = LayoutKind::Feynman.layout(&view()).unwrap();
        ThickenColor::new(501).apply(&mut layout).unwrap();
        let width = |i: usize| layout.edges[i].style_args.number("stroke-width");
        assert_eq!(width(0), Some(THICK_STROKE_WIDTH));
        assert_eq!(width(1), Some(THICK_STROKE_WIDTH));
        assert_eq!(width(2), None);
    }
}

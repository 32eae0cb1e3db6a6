use mcviz_core::tags;
use mcviz_error::Result;
use mcviz_layout::{Item, Layout, LineType};

use crate::Style;
use crate::color::{GLUBALL_FILL, INITIAL_FILL, particle_color};

pub const DEFAULT_ENERGY: f64 = 0.2;
pub const DEFAULT_STROKE_WIDTH: f64 = 0.05;

/// Black lines without enhancements; the baseline every other style
/// layers over.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStyle;

impl Style for DefaultStyle {
    fn name(&self) -> &'static str {
        "Default"
    }

    fn apply(&self, layout: &mut Layout) -> Result<()> {
        for edge in &mut layout.edges {
            edge.line_type = Some(LineType::Identity);
            edge.style_args
                .set("energy", DEFAULT_ENERGY)
                .set("stroke", "black")
                .set("fill", "black")
                .set("stroke-width", DEFAULT_STROKE_WIDTH)
                .set("scale", 1.0);
        }
        for node in &mut layout.nodes {
            node.style_args
                .set("stroke", "black")
                .set("fill", "none")
                .set("stroke-width", DEFAULT_STROKE_WIDTH);
        }
        Ok(())
    }
}

/// Colour particles by kind.
///
/// Particle-backed edges get the kind colour as stroke and fill. Initial
/// vertices are filled cyan and gluball vertices green. Particle-backed
/// nodes are filled with the kind colour, white instead of black, and cyan
/// when initial-state.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleColors;

impl Style for SimpleColors {
    fn name(&self) -> &'static str {
        "SimpleColors"
    }

    fn apply(&self, layout: &mut Layout) -> Result<()> {
        for edge in &mut layout.edges {
            if let Item::Particle(particle) = &edge.item {
                let color = particle_color(particle);
                edge.style_args.set("stroke", color).set("fill", color);
            }
        }

        for node in &mut layout.nodes {
            match &node.item {
                Item::Vertex(vertex) => {
                    if vertex.initial {
                        node.style_args.set("fill", INITIAL_FILL);
                    } else if vertex.has_tag(tags::GLUBALL) {
                        node.style_args.set("fill", GLUBALL_FILL);
                    }
                }
                Item::Particle(particle) => {
                    let fill = if particle.initial_state {
                        INITIAL_FILL
                    } else {
                        match particle_color(particle) {
                            "black" => "white",
                            color => color,
                        }
                    };
                    node.style_args.set("fill", fill);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcviz_core::{EventGraph, Particle, ParticleId, Vertex, VertexId};
    use mcviz_layout::{AttrValue, LayoutKind};

    fn layout(kind: LayoutKind) -> Layout {
        let vertices = (1..=3).map(|id| Vertex::new(VertexId(id))).collect();
        let particles = vec![
            Particle::new(ParticleId(1), 2212, VertexId(1), VertexId(2)),
            Particle::new(ParticleId(2), 21, VertexId(2), VertexId(3)).with_color(501),
        ];
        kind.layout(&EventGraph::new(vertices, particles).unwrap().view()).unwrap()
    }

    #[test]
    fn test_default_populates_every_entity() {
        let mut layout = layout(LayoutKind::Feynman);
        DefaultStyle.apply(&mut layout).unwrap();
        for edge in &layout.edges {
            assert_eq!(edge.line_type, Some(LineType::Identity));
            assert_eq!(edge.style_args.number("energy"), Some(DEFAULT_ENERGY));
            assert_eq!(edge.style_args.number("scale"), Some(1.0));
            assert_eq!(edge.style_args.text("fill"), Some("black"));
        }
        for node in &layout.nodes {
            assert_eq!(node.style_args.get("fill"), Some(&AttrValue::from("none")));
        }
    }

    #[test]
    fn test_simple_colors_feynman() {
        let mut layout = layout(LayoutKind::Feynman);
        SimpleColors.apply(&mut layout).unwrap();
        assert_eq!(layout.edges[0].style_args.text("stroke"), Some("black"));
        assert_eq!(layout.edges[1].style_args.text("stroke"), Some("green"));
        assert_eq!(layout.edges[1].style_args.text("fill"), Some("green"));
        // beam vertex is initial, the others are left unfilled
        assert_eq!(layout.nodes[0].style_args.text("fill"), Some(INITIAL_FILL));
        assert_eq!(layout.nodes[1].style_args.get("fill"), None);
    }

    #[test]
    fn test_simple_colors_dual_fills_particle_nodes() {
        let mut layout = layout(LayoutKind::Dual);
        SimpleColors.apply(&mut layout).unwrap();
        // the beam proton is initial-state, the gluon is green
        assert_eq!(layout.nodes[0].style_args.text("fill"), Some(INITIAL_FILL));
        assert_eq!(layout.nodes[1].style_args.text("fill"), Some("green"));
        // vertex-backed hub edges are not coloured
        assert!(layout.edges.iter().all(|e| e.style_args.get("stroke").is_none()));
    }

    #[test]
    fn test_black_particle_nodes_become_white() {
        let vertices = (1..=3).map(|id| Vertex::new(VertexId(id))).collect();
        let particles = vec![
            Particle::new(ParticleId(1), 2212, VertexId(1), VertexId(2)),
            Particle::new(ParticleId(2), 211, VertexId(2), VertexId(3)),
        ];
        let view = EventGraph::new(vertices, particles).unwrap().view();
        let mut layout = LayoutKind::Dual.layout(&view).unwrap();
        SimpleColors.apply(&mut layout).unwrap();
        assert_eq!(layout.nodes[1].style_args.text("fill"), Some("white"));
    }
}

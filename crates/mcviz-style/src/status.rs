use mcviz_error::Result;
use mcviz_layout::{Item, Layout};
use tracing::debug;

use crate::Style;
use crate::color::hsl_color;

const BINS: usize = 10;

/// Colour particles by status code, ten codes per bin.
///
/// Particle-backed edges get the bin colour as stroke, particle-backed nodes
/// as fill. Particles without a status are left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusColor;

impl StatusColor {
    /// Alternating dark and light colours around the hue circle.
    pub fn palette() -> Vec<String> {
        (0..BINS)
            .map(|i| hsl_color(i as f64 / BINS as f64, 1.0, 0.25 + 0.5 * (i % 2) as f64))
            .collect()
    }

    /// Palette index of a status code; codes from 90 up share the last bin.
    pub fn bin(status: i32) -> usize {
        (status.unsigned_abs() as usize / 10).min(BINS - 1)
    }
}

impl Style for StatusColor {
    fn name(&self) -> &'static str {
        "StatusColor"
    }

    fn apply(&self, layout: &mut Layout) -> Result<()> {
        let palette = Self::palette();
        debug!(?palette, "status colours");

        for edge in &mut layout.edges {
            if let Item::Particle(particle) = &edge.item
                && let Some(status) = particle.status
            {
                edge.style_args.set("stroke", palette[Self::bin(status)].as_str());
            }
        }
        for node in &mut layout.nodes {
            if let Item::Particle(particle) = &node.item
                && let Some(status) = particle.status
            {
                node.style_args.set("fill", palette[Self::bin(status)].as_str());
            }
        }
        Ok(())
    }
}

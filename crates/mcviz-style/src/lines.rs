use mcviz_core::{Arg, Options, Particle, tags};
use mcviz_error::Result;
use mcviz_layout::{Item, Layout, LineType};
use tracing::debug;

use crate::Style;

pub(crate) const ARGS: &[Arg] = &[Arg::float("scale", "scale of the line effects", "1.0")];

/// Stroke width of hadronization cluster lines.
const CLUSTER_STROKE_WIDTH: f64 = 0.2;
/// Edge `scale` per unit of the `scale` option.
pub const LINE_SCALE: f64 = 0.2;

/// Curly gluons, wavy photons and bosons, arrowed fermions.
///
/// Every edge gets `scale`, the option times [`LINE_SCALE`]. Particle-backed
/// edges get a line type by kind; vertex-backed edges keep whatever line
/// type they already have.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FancyLines {
    pub scale: f64,
}

impl Default for FancyLines {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl FancyLines {
    /// The `scale` attribute written onto edges.
    pub fn edge_scale(&self) -> f64 {
        LINE_SCALE * self.scale
    }

    pub fn from_options(options: &Options) -> Result<Self> {
        Ok(Self {
            scale: options.float("scale")?,
        })
    }
}

/// Line type for a particle-backed edge.
pub fn line_type(particle: &Particle) -> LineType {
    if particle.has_tag(tags::CLUSTER) {
        LineType::Hadron
    } else if particle.gluon() {
        LineType::Gluon
    } else if particle.photon() {
        if particle.final_state {
            LineType::FinalPhoton
        } else {
            LineType::Photon
        }
    } else if particle.colored() || particle.lepton() {
        LineType::Fermion
    } else if particle.boson() {
        LineType::Boson
    } else {
        LineType::Hadron
    }
}

impl Style for FancyLines {
    fn name(&self) -> &'static str {
        "FancyLines"
    }

    fn apply(&self, layout: &mut Layout) -> Result<()> {
        let scale = self.edge_scale();
        let mut kept = 0usize;
        for edge in &mut layout.edges {
            edge.style_args.set("scale", scale);
            let Item::Particle(particle) = &edge.item else {
                kept += 1;
                continue;
            };
            let line = line_type(particle);
            if line == LineType::Hadron && particle.has_tag(tags::CLUSTER) {
                edge.style_args.set("stroke-width", CLUSTER_STROKE_WIDTH);
            }
            edge.line_type = Some(line);
        }
        if kept > 0 {
            debug!(kept, "vertex-backed edges keep their line type");
        }
        Ok(())
    }
}

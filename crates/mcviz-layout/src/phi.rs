//! Particles placed by azimuth, detector-style.

use mcviz_core::GraphView;
use mcviz_error::{Error, Result};
use mcviz_spline::Point;

use crate::dual::{hub_edges, particle_index, particle_links, particle_nodes};
use crate::kind::Projection;
use crate::layered;
use crate::model::Layout;

/// Radius of the innermost ring and the distance between rings.
const RING_SPACING: f64 = 40.0;
/// Outward step when a position is already taken.
const NUDGE: f64 = 10.0;
/// Closest two nodes may sit before one is nudged.
const MIN_SEPARATION: f64 = 1.0;

/// Nodes are particles at angle `phi` on ring `generation + 1`, where the
/// generation is the particle's rank in the particle graph. Edges are the
/// same hub spokes as the dual layout.
pub fn phi(view: &GraphView) -> Result<Layout> {
    let index = particle_index(view)?;
    let links = particle_links(view, &index);
    let generation = layered::ranks(index.len(), &links);

    let mut positions: Vec<Point> = Vec::with_capacity(index.len());
    for (particle, &generation) in view.particles().values().zip(&generation) {
        let Some(angle) = particle.phi.filter(|a| a.is_finite()) else {
            return Err(Error::layout_degenerate(format!(
                "particle {} has no azimuthal angle",
                particle.id
            ))
            .with_context("particle", particle.id.to_string()));
        };
        let direction = Point::new(angle.cos(), angle.sin());
        let mut radius = RING_SPACING + RING_SPACING * generation as f64;
        let mut position = direction * radius;
        while positions.iter().any(|p| p.distance(position) < MIN_SEPARATION) {
            radius += NUDGE;
            position = direction * radius;
        }
        positions.push(position);
    }

    Ok(Layout {
        projection: Projection::Phi,
        nodes: particle_nodes(view, &positions),
        edges: hub_edges(view, &index, &positions),
    })
}

use std::collections::BTreeSet;

use mcviz_error::Result;
use tracing::debug;

use super::{Tool, require_consistent};
use crate::algo::{downstream, strongly_connected};
use crate::tags;
use crate::vertex::{Vertex, VertexId};
use crate::view::{Boundary, End, GraphView, Summary};

/// Collapse each hadronization region into one synthetic vertex.
///
/// A region is everything downstream of a cluster or string particle's
/// origin; regions that overlap are merged first.
#[derive(Debug, Default, Clone, Copy)]
pub struct Jets;

impl Tool for Jets {
    fn name(&self) -> &'static str {
        "Jets"
    }

    #[tracing::instrument(skip_all)]
    fn apply(&self, view: &GraphView) -> Result<GraphView> {
        require_consistent(self.name(), view)?;
        let seeds: Vec<VertexId> = view
            .particles()
            .values()
            .filter(|p| p.hadronization_seed())
            .map(|p| p.origin)
            .collect();
        let regions = merge_overlapping(seeds.into_iter().map(|v| downstream(view, v)).collect());

        let mut next = view.clone();
        for region in &regions {
            contract(&mut next, region, tags::JET, Some(tags::CLUSTER));
        }
        debug!(regions = regions.len(), "contracted jets");
        Ok(next)
    }
}

/// Collapse every cycle into one synthetic vertex.
///
/// Cycles are strongly connected components with more than one vertex, plus
/// single vertices carrying a self-loop particle.
#[derive(Debug, Default, Clone, Copy)]
pub struct Loops;

impl Tool for Loops {
    fn name(&self) -> &'static str {
        "Loops"
    }

    #[tracing::instrument(skip_all)]
    fn apply(&self, view: &GraphView) -> Result<GraphView> {
        require_consistent(self.name(), view)?;
        let mut regions: Vec<BTreeSet<VertexId>> = strongly_connected(view)
            .into_iter()
            .map(|component| component.into_iter().collect())
            .collect();
        let self_loops: BTreeSet<VertexId> = view
            .particles()
            .values()
            .filter(|p| p.is_self_loop())
            .map(|p| p.origin)
            .filter(|v| !regions.iter().any(|r| r.contains(v)))
            .collect();
        regions.extend(self_loops.into_iter().map(|v| BTreeSet::from([v])));

        let mut next = view.clone();
        for region in &regions {
            contract(&mut next, region, tags::LOOP, None);
        }
        debug!(regions = regions.len(), "contracted loops");
        Ok(next)
    }
}

/// Union regions that share a vertex until all are disjoint.
fn merge_overlapping(regions: Vec<BTreeSet<VertexId>>) -> Vec<BTreeSet<VertexId>> {
    let mut merged: Vec<BTreeSet<VertexId>> = Vec::new();
    for mut region in regions.into_iter().filter(|r| !r.is_empty()) {
        loop {
            let Some(index) = merged.iter().position(|m| !m.is_disjoint(&region)) else {
                break;
            };
            region.extend(merged.swap_remove(index));
        }
        merged.push(region);
    }
    merged.sort();
    merged
}

/// Replace `region` with a synthetic vertex and record how to undo it.
///
/// Particles with both ends inside are removed; boundary particles are
/// re-targeted onto the new vertex. Particles entering the region get
/// `entering_tag` when one is given.
pub(crate) fn contract(
    view: &mut GraphView,
    region: &BTreeSet<VertexId>,
    label: &'static str,
    entering_tag: Option<&'static str>,
) -> VertexId {
    let hub = view.next_vertex_id();

    let mut internal = Vec::new();
    let mut boundary = Vec::new();
    let touching: Vec<_> = view
        .particles()
        .values()
        .filter(|p| region.contains(&p.origin) || region.contains(&p.destination))
        .map(|p| p.id)
        .collect();

    for id in touching {
        let Some(particle) = view.particle_mut(id) else {
            continue;
        };
        let from_inside = region.contains(&particle.origin);
        let to_inside = region.contains(&particle.destination);
        if from_inside && to_inside {
            if let Some(removed) = view.remove_particle(id) {
                internal.push(removed);
            }
        } else if to_inside {
            let original = particle.destination;
            particle.destination = hub;
            let added_tags = entering_tag
                .filter(|tag| particle.tag(tag))
                .map(|tag| vec![tag.to_string()])
                .unwrap_or_default();
            boundary.push(Boundary {
                particle: id,
                end: End::Destination,
                original,
                added_tags,
            });
        } else {
            let original = particle.origin;
            particle.origin = hub;
            boundary.push(Boundary {
                particle: id,
                end: End::Origin,
                original,
                added_tags: Vec::new(),
            });
        }
    }

    let vertices: Vec<Vertex> = region.iter().filter_map(|&v| view.remove_vertex(v)).collect();

    let mut synthetic = Vertex::new(hub);
    synthetic.tag(tags::SUMMARY);
    synthetic.tag(label);
    view.insert_vertex(synthetic);
    view.relink();

    debug!(
        vertex = %hub,
        label,
        absorbed = vertices.len(),
        internal = internal.len(),
        boundary = boundary.len(),
        "contracted region"
    );
    view.push_summary(Summary {
        vertex: hub,
        label,
        vertices,
        particles: internal,
        boundary,
    });
    hub
}

//! Named layouts as staged compositions of tools and a base projection.

use std::collections::BTreeSet;

use mcviz_core::{GraphView, Options, Tool, ToolKind, apply_tools};
use mcviz_error::{Error, Result};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use crate::dual::dual;
use crate::feynman::feynman;
use crate::model::Layout;
use crate::phi::phi;

/// Which entities become nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Projection {
    /// Vertices are nodes, particles are edges.
    Feynman,
    /// Particles are nodes, vertices are hub edges.
    Dual,
    /// Particles are nodes placed by azimuth.
    Phi,
}

impl Projection {
    pub fn project(self, view: &GraphView) -> Result<Layout> {
        match self {
            Projection::Feynman => feynman(view),
            Projection::Dual => dual(view),
            Projection::Phi => phi(view),
        }
    }
}

/// The fixed set of layout names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    Feynman,
    Dual,
    Phi,
    /// Jets contracted, then feynman.
    Jetless,
    /// Jets contracted and kinks removed, then feynman.
    Combined,
}

impl LayoutKind {
    /// Resolve an optional name; `None` is the default layout.
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        match name {
            None => Ok(Self::default()),
            Some(name) => name.parse().map_err(|_| Error::unknown_layout(name)),
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            LayoutKind::Feynman => "vertices as nodes, particles as lines",
            LayoutKind::Dual => "particles as nodes, vertices as hubs",
            LayoutKind::Phi => "particles placed by azimuthal angle",
            LayoutKind::Jetless => "feynman with hadronization contracted",
            LayoutKind::Combined => "feynman with hadronization contracted and kinks removed",
        }
    }

    /// Tools run before the projection.
    pub fn stages(self) -> &'static [ToolKind] {
        match self {
            LayoutKind::Feynman | LayoutKind::Dual | LayoutKind::Phi => &[],
            LayoutKind::Jetless => &[ToolKind::Jets],
            LayoutKind::Combined => &[ToolKind::Jets, ToolKind::Kinks],
        }
    }

    pub fn projection(self) -> Projection {
        match self {
            LayoutKind::Dual => Projection::Dual,
            LayoutKind::Phi => Projection::Phi,
            LayoutKind::Feynman | LayoutKind::Jetless | LayoutKind::Combined => Projection::Feynman,
        }
    }

    /// Run the staged tools on a copy of `view`, then project it.
    #[tracing::instrument(skip_all, fields(layout = self.as_str()))]
    pub fn layout(self, view: &GraphView) -> Result<Layout> {
        let staged = if self.stages().is_empty() {
            view.clone()
        } else {
            let tools = self
                .stages()
                .iter()
                .map(|kind| kind.build(&Options::defaults(kind.as_str(), kind.args())?))
                .collect::<Result<Vec<Box<dyn Tool>>>>()?;
            apply_tools(view.clone(), &tools)?
        };

        let layout = self.projection().project(&staged)?;
        check_distinct(&layout)?;
        debug!(
            nodes = layout.nodes.len(),
            edges = layout.edges.len(),
            "laid out event"
        );
        Ok(layout)
    }
}

/// No two nodes may share a position.
fn check_distinct(layout: &Layout) -> Result<()> {
    let mut seen = BTreeSet::new();
    for node in &layout.nodes {
        let key = (node.position.x.to_bits(), node.position.y.to_bits());
        if !node.position.x.is_finite() || !node.position.y.is_finite() || !seen.insert(key) {
            return Err(Error::layout_degenerate(format!(
                "{} has no distinct position",
                node.item
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcviz_core::{EventGraph, Particle, ParticleId, Vertex, VertexId, tags};
    use mcviz_error::ErrorKind;
    use strum::IntoEnumIterator;

    fn hadronizing() -> GraphView {
        let vertices = (1..=6).map(|id| Vertex::new(VertexId(id))).collect();
        let particles = vec![
            Particle::new(ParticleId(1), 2, VertexId(1), VertexId(2)),
            Particle::new(ParticleId(2), 2, VertexId(2), VertexId(3)),
            Particle::new(ParticleId(3), 92, VertexId(3), VertexId(4)),
            Particle::new(ParticleId(4), 211, VertexId(4), VertexId(5)),
            Particle::new(ParticleId(5), 211, VertexId(4), VertexId(6)),
        ];
        EventGraph::new(vertices, particles).unwrap().view()
    }

    #[test]
    fn test_names() {
        assert_eq!(LayoutKind::from_name(None).unwrap(), LayoutKind::Feynman);
        assert_eq!(LayoutKind::from_name(Some("jetless")).unwrap(), LayoutKind::Jetless);
        let err = LayoutKind::from_name(Some("circular")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownLayout);
        let names: Vec<&str> = LayoutKind::iter().map(LayoutKind::as_str).collect();
        assert_eq!(names, vec!["feynman", "dual", "phi", "jetless", "combined"]);
    }

    #[test]
    fn test_jetless_contracts_before_projecting() {
        let view = hadronizing();
        let plain = LayoutKind::Feynman.layout(&view).unwrap();
        let jetless = LayoutKind::Jetless.layout(&view).unwrap();
        assert_eq!(plain.nodes.len(), 6);
        // region {3, 4, 5, 6} collapses into one vertex
        assert_eq!(jetless.nodes.len(), 3);
        assert!(jetless.nodes.iter().any(|n| n.item.has_tag(tags::JET)));
        assert!(jetless.edges.iter().any(|e| e.item.has_tag(tags::CLUSTER)));
        // the caller's view is untouched
        assert_eq!(view.vertices().len(), 6);
    }

    #[test]
    fn test_combined_also_removes_kinks() {
        let combined = LayoutKind::Combined.layout(&hadronizing()).unwrap();
        // quark 1 extended through vertex 2
        assert_eq!(combined.nodes.len(), 2);
        assert_eq!(combined.edges.len(), 1);
        assert!(combined.edges[0].item.has_tag(tags::KINK));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let view = hadronizing();
        for kind in [LayoutKind::Feynman, LayoutKind::Dual] {
            let a = kind.layout(&view).unwrap();
            let b = kind.layout(&view).unwrap();
            let positions = |l: &Layout| l.nodes.iter().map(|n| n.position).collect::<Vec<_>>();
            assert_eq!(positions(&a), positions(&b));
        }
    }
}

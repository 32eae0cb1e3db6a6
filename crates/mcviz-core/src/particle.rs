use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::vertex::VertexId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ParticleId(pub u32);

impl std::fmt::Display for ParticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ParticleId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// PDG codes of the hadronization pseudo-particles (cluster, string).
const HADRONIZATION_SEEDS: [i32; 2] = [91, 92];

/// A particle: a directed edge from its origin vertex to its destination.
///
/// Kind flags are derived from `pdgid` and the colour flow, so styles ask
/// `particle.gluon()` rather than looking at codes. `initial_state` and
/// `final_state` are topology flags maintained by the owning graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub pdgid: i32,
    pub status: Option<i32>,
    /// `(px, py, pz, e)`
    pub momentum: Option<[f64; 4]>,
    /// Transverse momentum
    pub pt: Option<f64>,
    /// Azimuthal angle in radians
    pub phi: Option<f64>,
    pub color: Option<u32>,
    pub anticolor: Option<u32>,
    pub origin: VertexId,
    pub destination: VertexId,
    pub initial_state: bool,
    pub final_state: bool,
    pub tags: BTreeSet<String>,
}

impl Particle {
    pub fn new(id: ParticleId, pdgid: i32, origin: VertexId, destination: VertexId) -> Self {
        Self {
            id,
            pdgid,
            status: None,
            momentum: None,
            pt: None,
            phi: None,
            color: None,
            anticolor: None,
            origin,
            destination,
            initial_state: false,
            final_state: false,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the four-momentum; `pt` and `phi` follow unless already set.
    pub fn with_momentum(mut self, px: f64, py: f64, pz: f64, e: f64) -> Self {
        self.momentum = Some([px, py, pz, e]);
        if self.pt.is_none() {
            self.pt = Some(px.hypot(py));
        }
        if self.phi.is_none() {
            self.phi = Some(py.atan2(px));
        }
        self
    }

    pub fn with_pt(mut self, pt: f64) -> Self {
        self.pt = Some(pt);
        self
    }

    pub fn with_phi(mut self, phi: f64) -> Self {
        self.phi = Some(phi);
        self
    }

    /// Colour index; zero means no colour.
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = (color != 0).then_some(color);
        self
    }

    /// Anticolour index; zero means no anticolour.
    pub fn with_anticolor(mut self, anticolor: u32) -> Self {
        self.anticolor = (anticolor != 0).then_some(anticolor);
        self
    }

    pub fn gluon(&self) -> bool {
        self.pdgid == 21
    }

    pub fn photon(&self) -> bool {
        self.pdgid == 22
    }

    /// Electroweak and Higgs bosons.
    pub fn boson(&self) -> bool {
        matches!(self.pdgid.abs(), 23..=25 | 32..=37)
    }

    pub fn lepton(&self) -> bool {
        matches!(self.pdgid.abs(), 11..=18)
    }

    pub fn quark(&self) -> bool {
        matches!(self.pdgid.abs(), 1..=8)
    }

    pub fn colored(&self) -> bool {
        self.color.is_some() || self.anticolor.is_some()
    }

    /// Carries the given colour index as colour or anticolour.
    pub fn carries_color(&self, index: u32) -> bool {
        self.color == Some(index) || self.anticolor == Some(index)
    }

    /// Hadronization cluster or string.
    pub fn hadronization_seed(&self) -> bool {
        HADRONIZATION_SEEDS.contains(&self.pdgid)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Add a tag, returning whether it was new.
    pub fn tag(&mut self, tag: &str) -> bool {
        self.tags.insert(tag.to_string())
    }

    /// Whether the particle starts and ends at the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.origin == self.destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(pdgid: i32) -> Particle {
        Particle::new(ParticleId(1), pdgid, VertexId(1), VertexId(2))
    }

    #[test]
    fn test_kind_flags() {
        assert!(particle(21).gluon());
        assert!(particle(22).photon());
        assert!(particle(-24).boson());
        assert!(particle(25).boson());
        assert!(particle(-13).lepton());
        assert!(particle(2).quark());
        assert!(particle(92).hadronization_seed());
        assert!(!particle(211).boson());
        assert!(!particle(211).lepton());
    }

    #[test]
    fn test_color_zero_is_none() {
        let p = particle(2).with_color(0).with_anticolor(0);
        assert!(!p.colored());
        let q = particle(2).with_color(501);
        assert!(q.colored());
        assert!(q.carries_color(501));
        assert!(!q.carries_color(502));
    }

    #[test]
    fn test_momentum_derives_pt_and_phi() {
        let p = particle(211).with_momentum(3.0, 4.0, 1.0, 10.0);
        assert_eq!(p.pt, Some(5.0));
        assert!((p.phi.unwrap() - 4.0_f64.atan2(3.0)).abs() < 1e-12);

        let q = particle(211).with_pt(7.0).with_momentum(3.0, 4.0, 1.0, 10.0);
        assert_eq!(q.pt, Some(7.0));
    }
}

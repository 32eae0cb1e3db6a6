//! HepMC2 `IO_GenEvent` ASCII reader.
//!
//! Only the first event of a listing is read. Vertex barcodes are renumbered
//! sequentially in order of first reference; particle barcodes are kept.
//! Orphan incoming particles get a synthetic initial vertex each and
//! particles without an end vertex get a synthetic terminal vertex.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use mcviz_error::{Error, Result};
use tracing::debug;

use crate::load::Loader;
use crate::particle::{Particle, ParticleId};
use crate::vertex::{Vertex, VertexId};

const START_LISTING: &str = "HepMC::IO_GenEvent-START_EVENT_LISTING";
const END_LISTING: &str = "HepMC::IO_GenEvent-END_EVENT_LISTING";

/// Flow code carrying the colour index.
const FLOW_COLOR: u32 = 1;
/// Flow code carrying the anticolour index.
const FLOW_ANTICOLOR: u32 = 2;

#[derive(Debug, Default, Clone, Copy)]
pub struct HepMcLoader;

impl Loader for HepMcLoader {
    fn name(&self) -> &'static str {
        "hepmc"
    }

    fn parse(&self, text: &str) -> Result<(Vec<Vertex>, Vec<Particle>)> {
        let mut listing = false;
        let mut in_event = false;
        let mut reader = EventReader::default();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with(START_LISTING) {
                listing = true;
                continue;
            }
            if line.starts_with("HepMC::Version") {
                continue;
            }
            if !listing {
                return Err(Error::parse_failed("missing IO_GenEvent listing header"));
            }
            if line.starts_with(END_LISTING) {
                break;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            let outcome = match fields[0] {
                "E" if in_event => break,
                "E" => {
                    in_event = true;
                    Ok(())
                }
                "V" if in_event => reader.vertex(&fields[1..]),
                "P" if in_event => reader.particle(&fields[1..]),
                "N" | "U" | "C" | "H" | "F" => Ok(()),
                other => Err(Error::parse_failed(format!("unexpected record '{}'", other))),
            };
            outcome.map_err(|e| e.with_context("line", (index + 1).to_string()))?;
        }

        if !in_event {
            return Err(Error::parse_failed("no event record in HepMC listing"));
        }
        let (vertices, particles) = reader.finish();
        debug!(
            vertices = vertices.len(),
            particles = particles.len(),
            "read HepMC event"
        );
        Ok((vertices, particles))
    }
}

#[derive(Debug)]
struct PendingParticle {
    particle: Particle,
    origin: Option<VertexId>,
    destination: Option<VertexId>,
}

#[derive(Debug, Default)]
struct EventReader {
    barcodes: BTreeMap<i64, VertexId>,
    declared: BTreeSet<VertexId>,
    pending: Vec<PendingParticle>,
    /// Current vertex and how many of its orphan particles remain.
    current: Option<(VertexId, usize)>,
}

impl EventReader {
    fn vertex_id(&mut self, barcode: i64) -> VertexId {
        let next = VertexId(self.barcodes.len() as u32 + 1);
        *self.barcodes.entry(barcode).or_insert(next)
    }

    /// `barcode id x y z ctau n_orphan n_out ...`
    fn vertex(&mut self, fields: &[&str]) -> Result<()> {
        let barcode: i64 = field(fields, 0, "vertex barcode")?;
        let orphans: usize = field(fields, 6, "orphan count")?;
        let id = self.vertex_id(barcode);
        if !self.declared.insert(id) {
            return Err(Error::parse_failed(format!("vertex {} declared twice", barcode)));
        }
        self.current = Some((id, orphans));
        Ok(())
    }

    /// `barcode pdg px py pz e m status theta phi end_vtx n_flows [code index]...`
    fn particle(&mut self, fields: &[&str]) -> Result<()> {
        let Some((vertex, orphans)) = self.current.as_mut() else {
            return Err(Error::parse_failed("particle record before any vertex"));
        };
        let vertex = *vertex;
        let orphan = if *orphans > 0 {
            *orphans -= 1;
            true
        } else {
            false
        };

        let barcode: u32 = field(fields, 0, "particle barcode")?;
        let pdgid: i32 = field(fields, 1, "pdg code")?;
        let px: f64 = field(fields, 2, "px")?;
        let py: f64 = field(fields, 3, "py")?;
        let pz: f64 = field(fields, 4, "pz")?;
        let e: f64 = field(fields, 5, "energy")?;
        let status: i32 = field(fields, 7, "status")?;
        let end_barcode: i64 = field(fields, 10, "end vertex")?;
        let flow_count: usize = field(fields, 11, "flow count")?;

        let mut particle = Particle::new(ParticleId(barcode), pdgid, VertexId(0), VertexId(0))
            .with_status(status)
            .with_momentum(px, py, pz, e);
        for flow in 0..flow_count {
            let code: u32 = field(fields, 12 + 2 * flow, "flow code")?;
            let index: u32 = field(fields, 13 + 2 * flow, "flow index")?;
            particle = match code {
                FLOW_COLOR => particle.with_color(index),
                FLOW_ANTICOLOR => particle.with_anticolor(index),
                _ => particle,
            };
        }

        let (origin, destination) = if orphan {
            (None, Some(vertex))
        } else if end_barcode == 0 {
            (Some(vertex), None)
        } else {
            (Some(vertex), Some(self.vertex_id(end_barcode)))
        };
        self.pending.push(PendingParticle {
            particle,
            origin,
            destination,
        });
        Ok(())
    }

    fn finish(self) -> (Vec<Vertex>, Vec<Particle>) {
        let mut next = self.barcodes.len() as u32;
        let mut vertices: Vec<Vertex> = self.declared.iter().map(|&id| Vertex::new(id)).collect();
        let mut synthetic = |vertices: &mut Vec<Vertex>| {
            next += 1;
            vertices.push(Vertex::new(VertexId(next)));
            VertexId(next)
        };

        let mut particles = Vec::with_capacity(self.pending.len());
        for pending in self.pending {
            let mut particle = pending.particle;
            particle.origin = match pending.origin {
                Some(id) => id,
                None => synthetic(&mut vertices),
            };
            particle.destination = match pending.destination {
                Some(id) => id,
                None => synthetic(&mut vertices),
            };
            particles.push(particle);
        }
        (vertices, particles)
    }
}

fn field<T: FromStr>(fields: &[&str], index: usize, what: &str) -> Result<T> {
    let raw = fields
        .get(index)
        .ok_or_else(|| Error::parse_failed(format!("missing {}", what)))?;
    raw.parse()
        .map_err(|_| Error::parse_failed(format!("invalid {} '{}'", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT: &str = "\
HepMC::Version 2.06.09
HepMC::IO_GenEvent-START_EVENT_LISTING
E 1 -1 -1.0 -1.0 -1.0 0 -3 1 2 0 1 1.0
U GEV MM
V -1 0 0 0 0 0 1 1 0
P 1 2212 0 0 6500 6500 0.938 4 0 0 -3 0
P 3 21 0.5 0 10 10.01 0 3 0 0 -3 1 1 501
V -2 0 0 0 0 0 1 1 0
P 2 2212 0 0 -6500 6500 0.938 4 0 0 -3 0
P 4 -2 0 0.7 -8 8.1 0 3 0 0 -3 1 2 501
V -3 0 0 0 0 0 0 1 0
P 5 22 3 4 0 5 0 1 0 0 0 0
E 2 -1 -1.0 -1.0 -1.0 0 -3 1 2 0 1 1.0
V -1 0 0 0 0 0 1 1 0
HepMC::IO_GenEvent-END_EVENT_LISTING
";

    #[test]
    fn test_reads_first_event() {
        let (vertices, particles) = HepMcLoader.parse(EVENT).unwrap();
        // three declared vertices, two synthetic initial, one synthetic terminal
        assert_eq!(vertices.len(), 6);
        assert_eq!(particles.len(), 5);

        let beam = particles.iter().find(|p| p.id == ParticleId(1)).unwrap();
        assert_eq!(beam.destination, VertexId(1));
        assert!(beam.origin.0 > 3);

        let gluon = particles.iter().find(|p| p.id == ParticleId(3)).unwrap();
        assert_eq!(gluon.origin, VertexId(1));
        // -3 is referenced before it is declared, so it is numbered second
        assert_eq!(gluon.destination, VertexId(2));
        assert_eq!(gluon.color, Some(501));
        assert_eq!(gluon.status, Some(3));

        let antiquark = particles.iter().find(|p| p.id == ParticleId(4)).unwrap();
        assert_eq!(antiquark.anticolor, Some(501));
        assert_eq!(antiquark.color, None);

        let photon = particles.iter().find(|p| p.id == ParticleId(5)).unwrap();
        assert_eq!(photon.origin, VertexId(2));
        assert_eq!(photon.pt, Some(5.0));
    }

    #[test]
    fn test_rejects_other_formats() {
        assert!(HepMcLoader.parse("{\"vertices\": []}").is_err());
        assert!(HepMcLoader.parse("").is_err());
        let err = HepMcLoader
            .parse("HepMC::IO_GenEvent-START_EVENT_LISTING\nE 1\nP 1 21\n")
            .unwrap_err();
        assert!(err.is_recoverable());
    }
}

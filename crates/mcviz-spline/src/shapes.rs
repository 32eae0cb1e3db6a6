//! Feynman line shapes.
//!
//! Each generator builds its wave as a chain of cubic segments in a flat
//! local frame running from `(0, 0)` to `(length, 0)`, then maps the chain
//! onto the base spline. The first and last points of every chain are
//! pinned to `x = 0` and `x = length` so the result starts and ends exactly
//! on the base spline's endpoints.

use crate::bezier::Bezier;
use crate::path::{PathBuilder, path_data};
use crate::point::Point;
use crate::spline::Spline;

/// Wave amplitude before per-kind and per-edge scaling.
pub const DEFAULT_AMPLITUDE: f64 = 8.0;

/// Length over which the per-kind wave densities are expressed.
const WAVE_UNIT: f64 = 50.0;

/// Clamp an energy into `[0, 1]`; NaN counts as zero.
pub fn clamp_energy(energy: f64) -> f64 {
    if energy.is_nan() {
        0.0
    } else {
        energy.clamp(0.0, 1.0)
    }
}

fn waves_for(energy: f64, length: f64, n_min: f64, n_max: f64, at_least: usize) -> usize {
    let per_unit = n_min + energy * (n_max - n_min);
    let n = (per_unit * length / WAVE_UNIT).floor();
    if n.is_finite() && n > at_least as f64 {
        n as usize
    } else {
        at_least
    }
}

fn ride(segments: &[Bezier], base: &Spline) -> String {
    let mapped: Vec<Bezier> = segments
        .iter()
        .map(|segment| base.transform_segment(segment))
        .collect();
    path_data(&mapped)
}

/// Sinusoidal wave: photons, and with a fixed density and no envelope,
/// massive bosons.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotonShape {
    /// Waves per 50 units at zero energy.
    pub n_min: f64,
    /// Waves per 50 units at full energy.
    pub n_max: f64,
    /// Exponent of the tapering envelope; `None` leaves the wave flat.
    pub power: Option<i32>,
    pub amplitude: f64,
}

impl PhotonShape {
    pub fn photon(amplitude: f64) -> Self {
        Self {
            n_min: 3.0,
            n_max: 10.0,
            power: Some(10),
            amplitude,
        }
    }

    pub fn boson(amplitude: f64) -> Self {
        Self {
            n_min: 2.0,
            n_max: 2.0,
            power: None,
            amplitude: amplitude / 3.0,
        }
    }

    pub fn wave_count(&self, energy: f64, length: f64) -> usize {
        waves_for(clamp_energy(energy), length, self.n_min, self.n_max, 2)
    }

    pub fn effective_amplitude(&self, energy: f64) -> f64 {
        (0.5 + 0.5 * clamp_energy(energy)) * self.amplitude
    }

    /// The wave in the local frame of a straight line of `length`.
    pub fn segments(&self, energy: f64, length: f64) -> Vec<Bezier> {
        let n = self.wave_count(energy, length);
        photon_segments(length, self.effective_amplitude(energy), n, self.power)
    }

    /// Path data for the wave riding `base`.
    pub fn path_data(&self, energy: f64, base: &Spline) -> String {
        ride(&self.segments(energy, base.length()), base)
    }
}

fn photon_segments(length: f64, amplitude: f64, n_waves: usize, power: Option<i32>) -> Vec<Bezier> {
    let half_waves = n_waves * 2;
    let wavelength = length / half_waves as f64;
    let strength = wavelength / 2.0;

    let envelope = |i: usize| match power {
        Some(power) if half_waves > 1 => {
            let u = 2.0 * i as f64 / (half_waves - 1) as f64 - 1.0;
            1.0 - u.abs().powi(power)
        }
        _ => 1.0,
    };

    let mut px = Vec::with_capacity(half_waves + 2);
    let mut py = Vec::with_capacity(half_waves + 2);
    px.push(0.0);
    py.push(0.0);
    for i in 0..half_waves {
        px.push(wavelength * (0.5 + i as f64));
        py.push(amplitude * envelope(i));
    }
    px.push(length);
    py.push(0.0);

    let last = half_waves + 1;
    let mut segments = Vec::with_capacity(last);
    let mut sign = 1.0;
    for i in 1..=last {
        let origin = Point::new(px[i - 1], -sign * py[i - 1]);
        let dest = Point::new(px[i], sign * py[i]);
        let c1 = if i == 1 {
            origin
        } else {
            Point::new(px[i - 1] + strength, -sign * py[i - 1])
        };
        let c2 = if i == last {
            dest
        } else {
            Point::new(px[i] - strength, sign * py[i])
        };
        segments.push(Bezier::new(origin, c1, c2, dest));
        sign = -sign;
    }
    segments
}

/// Curly gluon line: a flat run of loops between straight lead-in and
/// lead-out stretches.
#[derive(Debug, Clone, PartialEq)]
pub struct GluonShape {
    pub n_min: f64,
    pub n_max: f64,
    pub amplitude: f64,
}

impl GluonShape {
    /// How far control points reach, in wavelengths.
    const LOOPINESS: f64 = 0.7;
    /// Wavelengths spent on each lead-in/lead-out.
    const LEAD: f64 = 2.0;

    pub fn new(amplitude: f64) -> Self {
        Self {
            n_min: 1.0,
            n_max: 11.0,
            amplitude,
        }
    }

    pub fn loop_count(&self, energy: f64, length: f64) -> usize {
        waves_for(clamp_energy(energy), length, self.n_min, self.n_max, 1)
    }

    pub fn effective_amplitude(&self, energy: f64) -> f64 {
        (1.0 - 0.3 * clamp_energy(energy)) * self.amplitude
    }

    pub fn segments(&self, energy: f64, length: f64) -> Vec<Bezier> {
        let n = self.loop_count(energy, length);
        let amplitude = self.effective_amplitude(energy);

        let points = n * 2 + 1;
        let wavelength = length / ((points - 1) as f64 + 2.0 * Self::LEAD);
        let strength = wavelength * Self::LOOPINESS;

        let mut px = Vec::with_capacity(points + 2);
        let mut py = Vec::with_capacity(points + 2);
        px.push(0.0);
        py.push(0.0);
        for i in 0..points {
            px.push(wavelength * (Self::LEAD + i as f64));
            py.push(amplitude);
        }
        px.push(length);
        py.push(0.0);

        let last = points + 1;
        let mut segments = Vec::with_capacity(last);
        let mut sign: f64 = 1.0;
        for i in 1..=last {
            let origin = Point::new(px[i - 1], -sign * py[i - 1]);
            let dest = Point::new(px[i], sign * py[i]);
            let c1 = if i == 1 {
                origin
            } else {
                Point::new(
                    px[i - 1] - sign * (2.0 - sign) * strength,
                    -sign * py[i - 1],
                )
            };
            let c2 = if i == last {
                dest
            } else {
                Point::new(px[i] - sign * (2.0 + sign) * strength, sign * py[i])
            };
            segments.push(Bezier::new(origin, c1, c2, dest));
            sign = -sign;
        }
        segments
    }

    pub fn path_data(&self, energy: f64, base: &Spline) -> String {
        ride(&self.segments(energy, base.length()), base)
    }
}

/// Arrow size for a fermion line at `energy`.
pub fn fermion_arrow_size(energy: f64) -> f64 {
    2.0 + 10.0 * clamp_energy(energy)
}

/// Path data for a closed arrow head of `size`, centred on the midpoint of
/// `base` and pointing along it.
pub fn fermion_arrow_data(size: f64, base: &Spline) -> String {
    let mid = base.length() / 2.0;
    let width = size * 0.3;
    let at = |x: f64, y: f64| base.transform_x_point(mid, mid + x, y);

    let mut builder = PathBuilder::new();
    builder
        .move_to(at(size * 0.5, 0.0))
        .line_to(at(-size * 0.5, width))
        .curve_to(
            at(-size * 0.4, width * 0.5),
            at(-size * 0.4, -width * 0.5),
            at(-size * 0.5, -width),
        )
        .close();
    builder.build()
}

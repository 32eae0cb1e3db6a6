//! Colour helpers shared by the colouring styles.

use mcviz_core::Particle;

pub const INITIAL_FILL: &str = "cyan";
pub const GLUBALL_FILL: &str = "#22bb44";

/// Colour of a particle by kind. The first matching kind wins: gluon,
/// photon, coloured (red with a colour, blue with only an anticolour),
/// boson, lepton.
pub fn particle_color(particle: &Particle) -> &'static str {
    if particle.gluon() {
        "green"
    } else if particle.photon() {
        "orange"
    } else if particle.colored() {
        if particle.color.is_some() { "red" } else { "blue" }
    } else if particle.boson() {
        "magenta"
    } else if particle.lepton() {
        "#EFDECD"
    } else {
        "black"
    }
}

/// `#rrggbb` for a hue in turns and saturation, lightness in `[0, 1]`.
pub fn hsl_color(hue: f64, saturation: f64, lightness: f64) -> String {
    let saturation = saturation.clamp(0.0, 1.0);
    let lightness = lightness.clamp(0.0, 1.0);
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue.rem_euclid(1.0) * 6.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

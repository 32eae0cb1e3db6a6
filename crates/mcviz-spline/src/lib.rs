//! Spline geometry for mcviz.
//!
//! Pure curve math with no knowledge of events or layouts. A [`Spline`] is a
//! chain of cubic Bézier segments with an arclength parametrization; the
//! shape generators in [`shapes`] build a wave in a flat local frame
//! (`x` along the line, `y` perpendicular) and map it onto a base spline so
//! the wave rides the curve.
//!
//! # Module Structure
//!
//! - [`point`]: 2D points and vector arithmetic
//! - [`bezier`]: single cubic Bézier segments
//! - [`spline`]: arclength-parametrized segment chains
//! - [`path`]: path-data string builder
//! - [`shapes`]: photon, gluon, boson and fermion generators

pub mod bezier;
pub mod path;
pub mod point;
pub mod shapes;
pub mod spline;

pub use bezier::Bezier;
pub use path::{PathBuilder, path_data};
pub use point::Point;
pub use shapes::{
    DEFAULT_AMPLITUDE, GluonShape, PhotonShape, clamp_energy, fermion_arrow_data,
    fermion_arrow_size,
};
pub use spline::Spline;

//! Projections of an event graph into positioned nodes and edges.
//!
//! A layout never changes the graph it is given. Named layouts may stage
//! tools first; they run on a copy of the view.

pub mod dual;
pub mod feynman;
pub mod kind;
pub mod layered;
pub mod model;
pub mod phi;

pub use dual::dual;
pub use feynman::feynman;
pub use kind::{LayoutKind, Projection};
pub use model::{AttrValue, Edge, Item, Layout, LineType, Node, StyleArgs};
pub use phi::phi;

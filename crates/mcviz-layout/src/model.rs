//! Positioned, style-bearing wrappers produced by a layout.

use std::collections::BTreeMap;
use std::fmt;

use mcviz_core::{Particle, Vertex};
use mcviz_spline::{Point, Spline};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::kind::Projection;

/// The graph entity a node or edge stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Vertex(Vertex),
    Particle(Particle),
}

impl Item {
    pub fn as_vertex(&self) -> Option<&Vertex> {
        match self {
            Item::Vertex(v) => Some(v),
            Item::Particle(_) => None,
        }
    }

    pub fn as_particle(&self) -> Option<&Particle> {
        match self {
            Item::Particle(p) => Some(p),
            Item::Vertex(_) => None,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        match self {
            Item::Vertex(v) => v.has_tag(tag),
            Item::Particle(p) => p.has_tag(tag),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Vertex(v) => write!(f, "vertex {}", v.id),
            Item::Particle(p) => write!(f, "particle {}", p.id),
        }
    }
}

/// Geometry generator selector for an edge.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    Identity,
    Photon,
    FinalPhoton,
    Gluon,
    Boson,
    Fermion,
    Hadron,
}

/// A presentation attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// Per-entity presentation attributes. Later writes replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleArgs(BTreeMap<String, AttrValue>);

impl StyleArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    /// Numeric value; text that parses as a number counts.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.0.get(name)? {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name)? {
            AttrValue::Text(s) => Some(s),
            AttrValue::Number(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub item: Item,
    pub position: Point,
    pub style_args: StyleArgs,
}

impl Node {
    pub fn new(item: Item, position: Point) -> Self {
        Self {
            item,
            position,
            style_args: StyleArgs::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub item: Item,
    /// Index of the start node in [`Layout::nodes`].
    pub from: usize,
    /// Index of the end node in [`Layout::nodes`].
    pub to: usize,
    /// For vertex-backed edges, the particle leaving the vertex along this
    /// edge.
    pub going: Option<Particle>,
    pub spline: Spline,
    pub style_args: StyleArgs,
    pub line_type: Option<LineType>,
}

impl Edge {
    pub fn new(item: Item, from: usize, to: usize, spline: Spline) -> Self {
        Self {
            item,
            from,
            to,
            going: None,
            spline,
            style_args: StyleArgs::new(),
            line_type: None,
        }
    }

    pub fn with_going(mut self, particle: Particle) -> Self {
        self.going = Some(particle);
        self
    }
}

/// A projected event: nodes with positions and edges with base splines.
#[derive(Debug, Clone)]
pub struct Layout {
    pub projection: Projection,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Layout {
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }
}

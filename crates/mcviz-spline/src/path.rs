//! Path-data string building.

use crate::bezier::Bezier;
use crate::point::Point;

/// Builder for path-data strings (`M`, `L`, `C`, `Z` commands).
///
/// Coordinates are written with two decimals; negative zero is printed as
/// `0.00`.
pub struct PathBuilder {
    output: String,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(256),
        }
    }

    /// Absolute move.
    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.output.push('M');
        self.pair(p);
        self
    }

    /// Absolute line.
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.output.push('L');
        self.pair(p);
        self
    }

    /// Absolute cubic curve.
    pub fn curve_to(&mut self, c1: Point, c2: Point, p: Point) -> &mut Self {
        self.output.push('C');
        self.pair(c1);
        self.output.push(' ');
        self.pair(c2);
        self.output.push(' ');
        self.pair(p);
        self
    }

    /// Close the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.output.push('Z');
        self
    }

    /// Finish building and return the path data.
    pub fn build(self) -> String {
        self.output
    }

    fn pair(&mut self, p: Point) {
        write_coord(&mut self.output, p.x);
        self.output.push(' ');
        write_coord(&mut self.output, p.y);
    }
}

fn write_coord(output: &mut String, value: f64) {
    let text = format!("{value:.2}");
    output.push_str(if text == "-0.00" { "0.00" } else { &text });
}

/// Path data for a continuous chain of segments: one move to the first
/// origin, then one curve per segment.
pub fn path_data(segments: &[Bezier]) -> String {
    let mut builder = PathBuilder::new();
    if let Some(first) = segments.first() {
        builder.move_to(first.start());
    }
    for segment in segments {
        builder.curve_to(segment.points[1], segment.points[2], segment.points[3]);
    }
    builder.build()
}

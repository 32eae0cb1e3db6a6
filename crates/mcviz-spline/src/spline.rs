//! Arclength-parametrized chains of cubic Bézier segments.

use crate::bezier::Bezier;
use crate::path::path_data;
use crate::point::Point;

/// Samples per segment for the arclength table.
const SAMPLES: usize = 64;

/// An immutable chain of cubic segments with a derived arclength.
///
/// Positions along the spline are addressed by arclength `s`; the
/// coordinate transform maps `(s, offset)` in the spline's local frame to an
/// absolute point, with `offset` measured along the left-hand normal.
#[derive(Debug, Clone)]
pub struct Spline {
    segments: Vec<Bezier>,
    /// Arclength at the start of each segment.
    offsets: Vec<f64>,
    /// Cumulative arclength within each segment at `t = j / SAMPLES`.
    tables: Vec<Vec<f64>>,
    length: f64,
}

impl Spline {
    /// Build a spline from its segments. An empty list yields a zero-length
    /// spline at the origin.
    pub fn new(segments: Vec<Bezier>) -> Self {
        let segments = if segments.is_empty() {
            vec![Bezier::line(Point::ORIGIN, Point::ORIGIN)]
        } else {
            segments
        };

        let mut offsets = Vec::with_capacity(segments.len());
        let mut tables = Vec::with_capacity(segments.len());
        let mut length = 0.0;
        for segment in &segments {
            offsets.push(length);
            let table = arclength_table(segment);
            length += table[SAMPLES];
            tables.push(table);
        }

        Self {
            segments,
            offsets,
            tables,
            length,
        }
    }

    /// A straight spline between two points.
    pub fn line(from: Point, to: Point) -> Self {
        Self::new(vec![Bezier::line(from, to)])
    }

    /// A single-segment spline.
    pub fn from_segment(segment: Bezier) -> Self {
        Self::new(vec![segment])
    }

    pub fn segments(&self) -> &[Bezier] {
        &self.segments
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn start(&self) -> Point {
        self.segments[0].start()
    }

    pub fn end(&self) -> Point {
        self.segments[self.segments.len() - 1].end()
    }

    /// Segment index and curve parameter for arclength `s`, clamped to the
    /// spline. `s >= length` always resolves to the final endpoint.
    pub fn locate(&self, s: f64) -> (usize, f64) {
        let last = self.segments.len() - 1;
        if !(s < self.length) {
            return (last, 1.0);
        }
        if s <= 0.0 {
            return (0, 0.0);
        }

        let index = self
            .offsets
            .iter()
            .rposition(|&offset| offset <= s)
            .unwrap_or(0);
        let local = s - self.offsets[index];
        let table = &self.tables[index];

        let j = match table.iter().position(|&cum| cum > local) {
            Some(0) => return (index, 0.0),
            Some(j) => j - 1,
            None => return (index, 1.0),
        };
        let span = table[j + 1] - table[j];
        let frac = if span > 0.0 {
            (local - table[j]) / span
        } else {
            0.0
        };
        (index, (j as f64 + frac) / SAMPLES as f64)
    }

    /// Absolute position at arclength `s` (clamped).
    pub fn point_at(&self, s: f64) -> Point {
        let (index, t) = self.locate(s);
        self.segments[index].point_at(t)
    }

    /// Unit tangent at arclength `s` (clamped).
    pub fn tangent_at(&self, s: f64) -> Point {
        let (index, t) = self.locate(s);
        self.segments[index].tangent_at(t)
    }

    /// Position and unit tangent at arclength `s`.
    pub fn frame_at(&self, s: f64) -> (Point, Point) {
        let (index, t) = self.locate(s);
        let segment = &self.segments[index];
        (segment.point_at(t), segment.tangent_at(t))
    }

    /// Map a local point `(x, y)` onto the spline: `x` is arclength, `y` the
    /// offset along the normal. Beyond either end the spline is extended
    /// along its end tangent.
    pub fn transform_point(&self, x: f64, y: f64) -> Point {
        let (anchor, along) = if x < 0.0 {
            (0.0, x)
        } else if x > self.length {
            (self.length, x - self.length)
        } else {
            (x, 0.0)
        };
        let (base, tangent) = self.frame_at(anchor);
        if along == 0.0 {
            base + tangent.perp() * y
        } else {
            base + tangent * along + tangent.perp() * y
        }
    }

    /// Map a local point rigidly using the frame at arclength `anchor`, so
    /// small glyphs keep their shape on curved splines.
    pub fn transform_x_point(&self, anchor: f64, x: f64, y: f64) -> Point {
        let (base, tangent) = self.frame_at(anchor);
        base + tangent * (x - anchor) + tangent.perp() * y
    }

    /// Map every point of a local-frame segment onto the spline.
    pub fn transform_segment(&self, segment: &Bezier) -> Bezier {
        segment.map(|p| self.transform_point(p.x, p.y))
    }

    /// Path data for the spline drawn as-is.
    pub fn path_data(&self) -> String {
        path_data(&self.segments)
    }
}

fn arclength_table(segment: &Bezier) -> Vec<f64> {
    let mut table = Vec::with_capacity(SAMPLES + 1);
    let mut total = 0.0;
    let mut prev = segment.start();
    table.push(0.0);
    for j in 1..=SAMPLES {
        let p = segment.point_at(j as f64 / SAMPLES as f64);
        total += prev.distance(p);
        table.push(total);
        prev = p;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length() {
        let s = Spline::line(Point::ORIGIN, Point::new(30.0, 40.0));
        assert!((s.length() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_locate_clamps() {
        let s = Spline::line(Point::ORIGIN, Point::new(10.0, 0.0));
        assert_eq!(s.locate(-5.0), (0, 0.0));
        assert_eq!(s.locate(s.length()), (0, 1.0));
        assert_eq!(s.locate(99.0), (0, 1.0));
    }

    #[test]
    fn test_point_at_is_arclength() {
        let s = Spline::new(vec![
            Bezier::line(Point::ORIGIN, Point::new(10.0, 0.0)),
            Bezier::line(Point::new(10.0, 0.0), Point::new(10.0, 10.0)),
        ]);
        assert!((s.length() - 20.0).abs() < 1e-9);
        let p = s.point_at(15.0);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_endpoints_exact() {
        let s = Spline::from_segment(Bezier::new(
            Point::new(5.0, -10.0),
            Point::new(20.0, -10.0),
            Point::new(15.0, 30.0),
            Point::new(40.0, 10.0),
        ));
        assert_eq!(s.transform_point(0.0, 0.0), s.start());
        assert_eq!(s.transform_point(s.length(), 0.0), s.end());
    }

    #[test]
    fn test_transform_offset_uses_normal() {
        let s = Spline::line(Point::ORIGIN, Point::new(10.0, 0.0));
        let p = s.transform_point(5.0, 2.0);
        assert!((p.x - 5.0).abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_extrapolates() {
        let s = Spline::line(Point::ORIGIN, Point::new(10.0, 0.0));
        let p = s.transform_point(12.0, 0.0);
        assert!((p.x - 12.0).abs() < 1e-9);
        let q = s.transform_point(-1.0, 0.0);
        assert!((q.x + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_spline() {
        let p = Point::new(3.0, 3.0);
        let s = Spline::line(p, p);
        assert_eq!(s.length(), 0.0);
        assert_eq!(s.transform_point(0.0, 0.0), p);
        assert_eq!(s.point_at(1.0), p);
    }

    #[test]
    fn test_path_data() {
        let s = Spline::line(Point::ORIGIN, Point::new(3.0, 0.0));
        assert_eq!(s.path_data(), "M0.00 0.00C1.00 0.00 2.00 0.00 3.00 0.00");
    }
}

//! Single cubic Bézier segments.

use crate::point::Point;

/// One cubic segment: origin, two control points, destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bezier {
    pub points: [Point; 4],
}

impl Bezier {
    pub fn new(origin: Point, c1: Point, c2: Point, dest: Point) -> Self {
        Self {
            points: [origin, c1, c2, dest],
        }
    }

    /// A straight segment with control points at the thirds.
    pub fn line(from: Point, to: Point) -> Self {
        Self::new(from, from.lerp(to, 1.0 / 3.0), from.lerp(to, 2.0 / 3.0), to)
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[3]
    }

    /// Evaluate at `t ∈ [0, 1]`; the endpoints are returned exactly.
    pub fn point_at(&self, t: f64) -> Point {
        if t <= 0.0 {
            return self.points[0];
        }
        if t >= 1.0 {
            return self.points[3];
        }
        let [p0, p1, p2, p3] = self.points;
        let mt = 1.0 - t;
        p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
    }

    /// First derivative with respect to `t`.
    pub fn derivative_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let [p0, p1, p2, p3] = self.points;
        let mt = 1.0 - t;
        (p1 - p0) * (3.0 * mt * mt) + (p2 - p1) * (6.0 * mt * t) + (p3 - p2) * (3.0 * t * t)
    }

    /// Unit tangent at `t`.
    ///
    /// Falls back to the chord direction where the derivative vanishes (a
    /// control point sitting on its endpoint), then to the x axis.
    pub fn tangent_at(&self, t: f64) -> Point {
        self.derivative_at(t)
            .normalized()
            .or_else(|| (self.points[3] - self.points[0]).normalized())
            .unwrap_or(Point::new(1.0, 0.0))
    }

    /// Apply `f` to all four points.
    pub fn map(&self, mut f: impl FnMut(Point) -> Point) -> Bezier {
        let [p0, p1, p2, p3] = self.points;
        Bezier::new(f(p0), f(p1), f(p2), f(p3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_exact() {
        let b = Bezier::new(
            Point::new(0.1, 0.2),
            Point::new(5.0, 9.0),
            Point::new(-3.0, 1.0),
            Point::new(7.3, -2.9),
        );
        assert_eq!(b.point_at(0.0), b.start());
        assert_eq!(b.point_at(1.0), b.end());
    }

    #[test]
    fn test_line_is_straight() {
        let b = Bezier::line(Point::ORIGIN, Point::new(9.0, 0.0));
        let mid = b.point_at(0.5);
        assert!((mid.x - 4.5).abs() < 1e-12);
        assert_eq!(mid.y, 0.0);
        assert_eq!(b.tangent_at(0.0), Point::new(1.0, 0.0));
    }

    #[test]
    fn test_tangent_falls_back_to_chord() {
        let hub = Point::new(5.0, 5.0);
        let b = Bezier::new(Point::ORIGIN, Point::ORIGIN, hub, Point::new(10.0, 0.0));
        assert_eq!(b.tangent_at(0.0), Point::new(1.0, 0.0));
    }
}

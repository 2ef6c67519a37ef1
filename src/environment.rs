//! Points and the environment a tour is evaluated against.
//!
//! An [`Environment`] owns the fixed start location and the target points.
//! Tours never hold coordinates, only indices into [`Environment::points`].

use crate::error::{Error, Result};
use rand::Rng;

/// A 3D coordinate. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Draws a point with each coordinate uniform in `[-0.5, 0.5)`, then
    /// scales the vector by `scale`.
    pub fn random<R: Rng>(scale: f64, rng: &mut R) -> Self {
        Self::new(
            rng.random_range(-0.5..0.5),
            rng.random_range(-0.5..0.5),
            rng.random_range(-0.5..0.5),
        )
        .scaled(scale)
    }
}

/// The start location and target points of one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Environment {
    start: Point,
    points: Vec<Point>,
    scale: f64,
}

impl Environment {
    /// Builds an environment from explicit coordinates.
    ///
    /// Fails with [`Error::NoPoints`] when `points` is empty.
    pub fn new(start: Point, points: Vec<Point>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::NoPoints(0));
        }
        Ok(Self {
            start,
            points,
            scale: 1.0,
        })
    }

    /// Generates `count` random target points plus a random start, all scaled
    /// by `scale`.
    pub fn generate<R: Rng>(count: usize, scale: f64, rng: &mut R) -> Result<Self> {
        if count < 1 {
            return Err(Error::NoPoints(count));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidScale(scale));
        }
        let start = Point::random(scale, rng);
        let points = random_points(count, scale, rng);
        Ok(Self {
            start,
            points,
            scale,
        })
    }

    /// Returns a copy that keeps the start but draws fresh target points.
    pub fn with_fresh_points<R: Rng>(&self, rng: &mut R) -> Self {
        Self {
            start: self.start,
            points: random_points(self.points.len(), self.scale, rng),
            scale: self.scale,
        }
    }

    pub fn start(&self) -> &Point {
        &self.start
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Resolves a visiting order into the closed polyline
    /// `start, p[i0], p[i1], ..., start`. Out-of-range indices are skipped.
    pub fn tour_points(&self, indices: &[usize]) -> Vec<Point> {
        let mut out = Vec::with_capacity(indices.len() + 2);
        out.push(self.start);
        out.extend(indices.iter().filter_map(|&i| self.points.get(i).copied()));
        out.push(self.start);
        out
    }
}

fn random_points<R: Rng>(count: usize, scale: f64, rng: &mut R) -> Vec<Point> {
    (0..count).map(|_| Point::random(scale, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(1.0, 2.0, 2.0);
        assert!((a.distance_to(&b) - 3.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_random_point_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let p = Point::random(60.0, &mut rng);
            for c in [p.x, p.y, p.z] {
                assert!((-30.0..30.0).contains(&c), "coordinate out of range: {c}");
            }
        }
    }

    #[test]
    fn test_generate() {
        let mut rng = create_rng(42);
        let env = Environment::generate(12, 10.0, &mut rng).unwrap();
        assert_eq!(env.len(), 12);
        assert!(env.point(11).is_some());
        assert!(env.point(12).is_none());
    }

    #[test]
    fn test_generate_rejects_zero_points() {
        let mut rng = create_rng(42);
        assert_eq!(
            Environment::generate(0, 10.0, &mut rng),
            Err(Error::NoPoints(0))
        );
    }

    #[test]
    fn test_generate_rejects_bad_scale() {
        let mut rng = create_rng(42);
        assert!(matches!(
            Environment::generate(3, 0.0, &mut rng),
            Err(Error::InvalidScale(_))
        ));
        assert!(Environment::generate(3, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Environment::new(Point::new(0.0, 0.0, 0.0), vec![]).is_err());
    }

    #[test]
    fn test_fresh_points_keep_start() {
        let mut rng = create_rng(5);
        let env = Environment::generate(8, 20.0, &mut rng).unwrap();
        let next = env.with_fresh_points(&mut rng);
        assert_eq!(next.start(), env.start());
        assert_eq!(next.len(), env.len());
        assert_ne!(next.points(), env.points());
    }

    #[test]
    fn test_tour_points_closed_loop() {
        let start = Point::new(0.0, 0.0, 0.0);
        let env = Environment::new(
            start,
            vec![Point::new(1.0, 0.0, 0.0), Point::new(0.0, 1.0, 0.0)],
        )
        .unwrap();
        let line = env.tour_points(&[1, 0]);
        assert_eq!(line.len(), 4);
        assert_eq!(line[0], start);
        assert_eq!(line[1], Point::new(0.0, 1.0, 0.0));
        assert_eq!(line[3], start);
    }
}

//! Lines, rays and line segments.

use nalgebra::{Point3, Vector3};

/// An infinite line through `point` along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line3D {
    point: Point3<f32>,
    direction: Vector3<f32>,
}

impl Line3D {
    /// Creates a line from a point and a direction.
    ///
    /// # Panics (debug builds only)
    /// Panics if the direction is the zero vector.
    pub fn new(point: Point3<f32>, direction: Vector3<f32>) -> Self {
        debug_assert!(
            direction != Vector3::zeros(),
            "Line direction cannot be zero"
        );
        Self { point, direction }
    }

    #[inline]
    pub fn point(&self) -> Point3<f32> {
        self.point
    }

    #[inline]
    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// Returns `point + t * direction`.
    #[inline]
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.point + self.direction * t
    }
}

impl From<LineSegment3D> for Line3D {
    fn from(segment: LineSegment3D) -> Self {
        Self::new(segment.start, segment.direction())
    }
}

/// A half-line starting at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray3D {
    origin: Point3<f32>,
    direction: Vector3<f32>,
}

impl Ray3D {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// Returns the point at parameter `t`, or `None` for `t < 0`
    /// (behind the origin).
    pub fn point_at(&self, t: f32) -> Option<Point3<f32>> {
        (t >= 0.0).then(|| self.origin + self.direction * t)
    }
}

/// A finite segment between `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment3D {
    start: Point3<f32>,
    end: Point3<f32>,
}

impl LineSegment3D {
    pub fn new(start: Point3<f32>, end: Point3<f32>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> Point3<f32> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point3<f32> {
        self.end
    }

    /// Returns `end - start`.
    #[inline]
    pub fn direction(&self) -> Vector3<f32> {
        self.end - self.start
    }

    pub fn length(&self) -> f32 {
        self.direction().norm()
    }

    pub fn length_squared(&self) -> f32 {
        self.direction().norm_squared()
    }

    /// Unit direction from start to end. NaN for a zero-length segment.
    pub fn normalized_direction(&self) -> Vector3<f32> {
        self.direction() / self.length()
    }

    /// Linear interpolation: `t = 0` is `start`, `t = 1` is `end`.
    #[inline]
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.start + self.direction() * t
    }
}

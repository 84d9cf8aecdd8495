//! Plane representation and point classification.

use std::ops::{BitOr, BitOrAssign};

use nalgebra::{Point3, Vector3};

/// Default epsilon for plane classification.
/// Points within this distance of the plane are considered "on" the plane.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// Classification of geometry relative to a plane.
///
/// The discriminants form a two-bit set, so the classification of a polygon
/// is the `|` of the classifications of its vertices: a polygon with both a
/// strictly-front and a strictly-back vertex ends up `Spanning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Classification {
    /// All vertices are on the plane (coplanar)
    Coplanar = 0,
    /// No vertex is behind the plane, at least one is in front
    Front = 1,
    /// No vertex is in front of the plane, at least one is behind
    Back = 2,
    /// Vertices are on both sides (spans the plane)
    Spanning = 3,
}

impl Classification {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Classification::Coplanar,
            1 => Classification::Front,
            2 => Classification::Back,
            _ => Classification::Spanning,
        }
    }
}

impl BitOr for Classification {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_bits(self as u8 | rhs as u8)
    }
}

impl BitOrAssign for Classification {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl From<PlaneSide> for Classification {
    fn from(side: PlaneSide) -> Self {
        match side {
            PlaneSide::Front => Classification::Front,
            PlaneSide::Back => Classification::Back,
            PlaneSide::OnPlane => Classification::Coplanar,
        }
    }
}

/// A plane in 3D space, represented as `normal · point = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    normal: Vector3<f32>,
    w: f32,
}

impl Plane {
    /// Creates a plane from a normal vector and offset, stored as given.
    ///
    /// The normal is not normalized; distances reported by [`Plane::classify`]
    /// are scaled by its length.
    pub const fn new(normal: Vector3<f32>, w: f32) -> Self {
        Self { normal, w }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal is normalized.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let unit_normal = normal.normalize();
        let w = unit_normal.dot(&point.coords);
        Self {
            normal: unit_normal,
            w,
        }
    }

    /// Creates a plane from three points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// The points must not be collinear. Collinear (or coincident) points
    /// produce a NaN normal, which is not checked here.
    pub fn from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let normal = (b - a).cross(&(c - a));
        Self::from_point_and_normal(a, normal)
    }

    /// Returns the normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn w(&self) -> f32 {
        self.w
    }

    /// Computes `normal · point - w`.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is exactly on the plane
    #[inline]
    pub fn classify(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classifies which side of the plane a point lies on.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    pub fn classify_point_with_epsilon(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        let dist = self.classify(point);
        if dist < -epsilon {
            PlaneSide::Back
        } else if dist > epsilon {
            PlaneSide::Front
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Flips the plane in place: back becomes front.
    #[inline]
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Returns `true` if both planes face roughly the same direction.
    #[inline]
    pub fn orientation_matches(&self, other: &Plane) -> bool {
        self.normal.dot(&other.normal) > 0.0
    }

    /// Projects a point onto the plane (finds the closest point on the plane).
    #[inline]
    pub fn project_point(&self, point: Point3<f32>) -> Point3<f32> {
        point - self.normal * self.classify(point)
    }

    /// Computes the intersection of a line segment with the plane.
    ///
    /// Returns `Some((t, point))` where:
    /// - `t` is the interpolation parameter (0.0 = start, 1.0 = end)
    /// - `point` is the intersection point
    ///
    /// Returns `None` if the segment is parallel to the plane or doesn't intersect.
    pub fn intersect_segment(
        &self,
        start: Point3<f32>,
        end: Point3<f32>,
    ) -> Option<(f32, Point3<f32>)> {
        let direction = end - start;
        let denom = self.normal.dot(&direction);

        // Segment is parallel to plane
        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = (self.w - self.normal.dot(&start.coords)) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some((t, start + direction * t))
    }
}

//! Rectangle (quad) representation.

use nalgebra::{Point3, Vector3};

use crate::{Classification, Csg, Plane, PlaneSide, Polygon, SimpleVertex};

/// A parallelogram spanned by two edge vectors from a corner, usually a
/// rectangle. Corners run `origin`, `origin + u`, `origin + u + v`,
/// `origin + v`, counter-clockwise seen from the side `u × v` points to.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    origin: Point3<f32>,
    u: Vector3<f32>,
    v: Vector3<f32>,
}

impl Rectangle {
    pub fn new(origin: Point3<f32>, u: Vector3<f32>, v: Vector3<f32>) -> Self {
        Self { origin, u, v }
    }

    /// Builds the quad `a, b, c, d` from three of its corners; `c` is only
    /// checked (debug builds) to lie in the plane of the other three.
    pub fn from_corners(
        a: Point3<f32>,
        b: Point3<f32>,
        c: Point3<f32>,
        d: Point3<f32>,
    ) -> Self {
        debug_assert_eq!(
            Plane::from_points(a, b, d).classify_point(c),
            PlaneSide::OnPlane,
            "quad corners are not coplanar"
        );
        Self::new(a, b - a, d - a)
    }

    /// An axis-aligned rectangle in the `z = 0` plane, facing +Z.
    pub fn from_min_max_xy(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self::new(
            Point3::new(min_x, min_y, 0.0),
            Vector3::x() * (max_x - min_x),
            Vector3::y() * (max_y - min_y),
        )
    }

    #[inline]
    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    #[inline]
    pub fn u(&self) -> Vector3<f32> {
        self.u
    }

    #[inline]
    pub fn v(&self) -> Vector3<f32> {
        self.v
    }

    pub fn vertices(&self) -> [Point3<f32>; 4] {
        let Self { origin, u, v } = *self;
        [origin, origin + u, origin + u + v, origin + v]
    }

    /// `u × v`, with the area as its length.
    pub fn normal(&self) -> Vector3<f32> {
        self.u.cross(&self.v)
    }

    /// `None` for a zero-area quad.
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        self.normal().try_normalize(f32::EPSILON)
    }

    pub fn plane(&self) -> Plane {
        Plane::from_point_and_normal(self.origin, self.normal())
    }

    pub fn centroid(&self) -> Point3<f32> {
        self.origin + (self.u + self.v) / 2.0
    }

    pub fn area(&self) -> f32 {
        self.normal().norm()
    }

    pub fn classify(&self, plane: &Plane) -> Classification {
        self.vertices()
            .into_iter()
            .fold(Classification::Coplanar, |acc, p| {
                acc | Classification::from(plane.classify_point(p))
            })
    }

    /// A solid made of this single quad, with the unit normal on each vertex.
    pub fn to_csg(&self) -> Csg<SimpleVertex> {
        Csg::new(vec![Polygon::from(self)])
    }
}

impl From<&Rectangle> for Polygon<SimpleVertex> {
    fn from(rectangle: &Rectangle) -> Self {
        let normal = rectangle.unit_normal().unwrap_or_else(Vector3::zeros);
        Polygon::new(
            rectangle
                .vertices()
                .into_iter()
                .map(|p| SimpleVertex::new(p, normal))
                .collect(),
        )
    }
}

impl From<Rectangle> for Polygon<SimpleVertex> {
    fn from(rectangle: Rectangle) -> Self {
        Self::from(&rectangle)
    }
}

impl From<Rectangle> for Plane {
    fn from(rectangle: Rectangle) -> Self {
        rectangle.plane()
    }
}

impl From<&Rectangle> for Plane {
    fn from(rectangle: &Rectangle) -> Self {
        rectangle.plane()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_corners_matches_new() {
        let rect = Rectangle::from_corners(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(2.0, 3.0, 1.0),
            Point3::new(0.0, 3.0, 1.0),
        );
        assert_eq!(rect.u(), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(rect.v(), Vector3::new(0.0, 3.0, 0.0));
        assert_relative_eq!(rect.area(), 6.0);
        assert_relative_eq!(rect.centroid(), Point3::new(1.0, 1.5, 1.0));
        assert_relative_eq!(rect.plane().w(), 1.0);
    }

    #[test]
    fn min_max_xy_faces_up() {
        let rect = Rectangle::from_min_max_xy(-1.0, -2.0, 1.0, 2.0);
        assert_relative_eq!(rect.unit_normal().unwrap(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(rect.vertices()[2], Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn classify() {
        let rect = Rectangle::from_min_max_xy(0.0, 0.0, 1.0, 1.0);
        assert_eq!(rect.classify(&rect.plane()), Classification::Coplanar);
        assert_eq!(
            rect.classify(&Plane::new(Vector3::new(0.0, 1.0, 0.0), 0.5)),
            Classification::Spanning
        );
    }

    #[test]
    fn to_csg_carries_unit_normal() {
        let csg = Rectangle::from_min_max_xy(0.0, 0.0, 4.0, 4.0).to_csg();
        assert_eq!(csg.len(), 1);
        let polygon = &csg.polygons()[0];
        assert_eq!(polygon.len(), 4);
        assert!(polygon.vertices().iter().all(|v| v.normal == Vector3::new(0.0, 0.0, 1.0)));
        assert_relative_eq!(polygon.area(), 16.0);
    }
}

//! Triangle representation.

use nalgebra::{Point3, Vector3};

use crate::{Classification, Csg, Plane, Polygon, SimpleVertex};

/// A triangle in 3D space, defined by three vertices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Computes the unit normal vector of the triangle.
    ///
    /// Returns `None` if the triangle is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        self.normal().try_normalize(f32::EPSILON)
    }

    /// Returns the plane that this triangle lies on.
    ///
    /// A degenerate triangle gives a NaN plane.
    pub fn plane(&self) -> Plane {
        let [a, b, c] = self.vertices;
        Plane::from_points(a, b, c)
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Classifies this triangle relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        self.vertices
            .iter()
            .map(|v| Classification::from(plane.classify_point(*v)))
            .fold(Classification::Coplanar, |acc, c| acc | c)
    }

    /// A solid made of this single triangle. Vertex normals are zero.
    pub fn to_csg(&self) -> Csg<SimpleVertex> {
        Csg::new(vec![Polygon::from(self)])
    }
}

impl From<&Triangle> for Polygon<SimpleVertex> {
    fn from(triangle: &Triangle) -> Self {
        Polygon::new(
            triangle
                .vertices
                .iter()
                .map(|p| SimpleVertex::new(*p, Vector3::zeros()))
                .collect(),
        )
    }
}

impl From<Triangle> for Polygon<SimpleVertex> {
    fn from(triangle: Triangle) -> Self {
        Self::from(&triangle)
    }
}

impl From<Triangle> for Plane {
    fn from(triangle: Triangle) -> Self {
        triangle.plane()
    }
}

impl From<&Triangle> for Plane {
    fn from(triangle: &Triangle) -> Self {
        triangle.plane()
    }
}

//! Generic polygon representation.

use nalgebra::{Point3, Vector3};

use crate::{Classification, Plane, Vertex};

/// A convex polygon in 3D space, defined by an ordered list of vertices.
///
/// Vertices should be coplanar and in counter-clockwise winding order
/// when viewed from the front (the direction the normal points). The last
/// vertex connects back to the first.
#[derive(Debug, Clone, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon<V> {
    vertices: Vec<V>,
}

impl<V: Vertex> Polygon<V> {
    /// Creates a new polygon from a list of vertices.
    ///
    /// Fewer than 3 vertices make a degenerate polygon: its plane is NaN and
    /// its area zero. [`Csg::new`](crate::Csg::new) and
    /// [`BspNode::insert`](crate::BspNode::insert) drop such polygons.
    pub fn new(vertices: Vec<V>) -> Self {
        Self { vertices }
    }

    /// True with fewer than 3 vertices.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Consumes the polygon, returning its vertices.
    #[inline]
    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices (always false for valid polygons).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over the vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.vertices.iter().map(Vertex::position)
    }

    /// Returns the plane that this polygon lies on.
    ///
    /// Derived from the first three vertices on every call, so it follows any
    /// change to the vertices. Collinear leading vertices, or fewer than
    /// three vertices, give a NaN plane.
    pub fn plane(&self) -> Plane {
        match self.vertices.as_slice() {
            [a, b, c, ..] => Plane::from_points(a.position(), b.position(), c.position()),
            _ => Plane::new(Vector3::repeat(f32::NAN), f32::NAN),
        }
    }

    /// Reverses the winding and flips every vertex normal.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for vertex in &mut self.vertices {
            vertex.flip();
        }
    }

    /// Returns a flipped copy of this polygon.
    pub fn flipped(&self) -> Self {
        let mut polygon = self.clone();
        polygon.flip();
        polygon
    }

    /// Computes the centroid (average of the vertex positions).
    pub fn centroid(&self) -> Point3<f32> {
        let sum: Vector3<f32> = self.positions().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len() as f32)
    }

    /// Computes the area of the polygon (fan triangulation from vertex 0).
    pub fn area(&self) -> f32 {
        self.fan_triangles()
            .map(|(a, b, c)| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    /// Iterates over the fan triangles `(v0, vi, vi+1)` as positions.
    pub(crate) fn fan_triangles(
        &self,
    ) -> impl Iterator<Item = (Point3<f32>, Point3<f32>, Point3<f32>)> + '_ {
        let first = self.vertices.first().map(Vertex::position);
        first.into_iter().flat_map(move |first| {
            self.vertices
                .windows(2)
                .skip(1)
                .map(move |pair| (first, pair[0].position(), pair[1].position()))
        })
    }

    /// Classifies this polygon relative to a plane.
    ///
    /// Returns:
    /// - `Front` if no vertex is behind the plane and at least one is in front
    /// - `Back` if no vertex is in front of the plane and at least one is behind
    /// - `Coplanar` if all vertices lie on the plane
    /// - `Spanning` if vertices are on both sides
    pub fn classify(&self, plane: &Plane) -> Classification {
        self.positions()
            .map(|p| Classification::from(plane.classify_point(p)))
            .fold(Classification::Coplanar, |acc, c| acc | c)
    }
}

impl<V: Vertex> From<Polygon<V>> for Plane {
    fn from(polygon: Polygon<V>) -> Self {
        polygon.plane()
    }
}

impl<V: Vertex> From<&Polygon<V>> for Plane {
    fn from(polygon: &Polygon<V>) -> Self {
        polygon.plane()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimpleVertex;
    use approx::assert_relative_eq;

    fn vertex(p: [f32; 3], n: [f32; 3]) -> SimpleVertex {
        SimpleVertex::new(Point3::new(p[0], p[1], p[2]), Vector3::new(n[0], n[1], n[2]))
    }

    fn unit_square() -> Polygon<SimpleVertex> {
        let n = [0.0, 0.0, 1.0];
        Polygon::new(vec![
            vertex([0.0, 0.0, 0.0], n),
            vertex([1.0, 0.0, 0.0], n),
            vertex([1.0, 1.0, 0.0], n),
            vertex([0.0, 1.0, 0.0], n),
        ])
    }

    #[test]
    fn plane_follows_winding() {
        let square = unit_square();
        let plane = square.plane();
        assert_relative_eq!(plane.normal(), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(plane.w(), 0.0);
    }

    #[test]
    fn flip_reverses_and_negates() {
        let square = unit_square();
        let flipped = square.flipped();

        let positions: Vec<_> = flipped.positions().collect();
        assert_eq!(positions[0], Point3::new(0.0, 1.0, 0.0));
        assert_eq!(positions[3], Point3::new(0.0, 0.0, 0.0));
        assert!(flipped.vertices().iter().all(|v| v.normal == Vector3::new(0.0, 0.0, -1.0)));
        assert_relative_eq!(flipped.plane().normal(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn flip_is_involution() {
        let square = unit_square();
        let mut twice = square.clone();
        twice.flip();
        twice.flip();
        assert_eq!(twice, square);
    }

    #[test]
    fn centroid_and_area() {
        let square = unit_square();
        assert_relative_eq!(square.centroid(), Point3::new(0.5, 0.5, 0.0));
        assert_relative_eq!(square.area(), 1.0);
    }

    #[test]
    fn classify_against_planes() {
        let square = unit_square();
        let up = Plane::new(Vector3::new(0.0, 0.0, 1.0), -1.0);
        let down = Plane::new(Vector3::new(0.0, 0.0, 1.0), 1.0);
        let through = Plane::new(Vector3::new(1.0, 0.0, 0.0), 0.5);
        let edge = Plane::new(Vector3::new(1.0, 0.0, 0.0), 0.0);

        assert_eq!(square.classify(&square.plane()), Classification::Coplanar);
        assert_eq!(square.classify(&up), Classification::Front);
        assert_eq!(square.classify(&down), Classification::Back);
        assert_eq!(square.classify(&through), Classification::Spanning);
        // Two vertices on the plane, two in front.
        assert_eq!(square.classify(&edge), Classification::Front);
    }

    #[test]
    fn plane_from_polygon() {
        let square = unit_square();
        let by_ref: Plane = (&square).into();
        let by_value: Plane = square.into();
        assert_eq!(by_ref, by_value);
    }

    #[test]
    fn short_polygons_do_not_panic() {
        let n = [0.0, 0.0, 1.0];
        for count in 0..3 {
            let short = Polygon::new(
                (0..count)
                    .map(|i| vertex([i as f32, 0.0, 0.0], n))
                    .collect::<Vec<_>>(),
            );
            assert!(short.is_degenerate());
            assert!(short.plane().w().is_nan());
            assert_eq!(short.area(), 0.0);
            assert_eq!(short.fan_triangles().count(), 0);
        }
        assert!(!unit_square().is_degenerate());
        assert_eq!(unit_square().fan_triangles().count(), 2);
    }
}

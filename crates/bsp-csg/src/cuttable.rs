//! Polygon splitting against a plane.

use crate::{Classification, Plane, Polygon, Rectangle, SimpleVertex, Triangle, Vertex};

/// The four-way result of splitting polygons by a plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<V> {
    /// Coplanar polygons facing the same direction as the plane.
    pub coplanar_front: Vec<Polygon<V>>,
    /// Coplanar polygons facing the opposite direction.
    pub coplanar_back: Vec<Polygon<V>>,
    /// Polygons (or parts of polygons) in front of the plane.
    pub front: Vec<Polygon<V>>,
    /// Polygons (or parts of polygons) behind the plane.
    pub back: Vec<Polygon<V>>,
}

impl<V> Default for Split<V> {
    fn default() -> Self {
        Self {
            coplanar_front: Vec::new(),
            coplanar_back: Vec::new(),
            front: Vec::new(),
            back: Vec::new(),
        }
    }
}

impl<V: Vertex> Split<V> {
    /// Splits every polygon by `plane`, accumulating the results in input order.
    pub fn partition<I>(polygons: I, plane: &Plane) -> Self
    where
        I: IntoIterator<Item = Polygon<V>>,
    {
        let mut split = Self::default();
        for polygon in polygons {
            split.push(polygon, plane);
        }
        split
    }

    /// Splits a single polygon by `plane` and appends the pieces.
    pub fn push(&mut self, polygon: Polygon<V>, plane: &Plane) {
        split_polygon(polygon, plane, self);
    }

    /// Total number of polygons across all four lists.
    pub fn len(&self) -> usize {
        self.coplanar_front.len() + self.coplanar_back.len() + self.front.len() + self.back.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for geometry that can be split by a plane.
pub trait Cuttable {
    type Vertex: Vertex;

    /// Splits the geometry by a plane.
    ///
    /// # Results by classification
    ///
    /// - **Coplanar**: one polygon in `coplanar_front` (same facing as the
    ///   plane) or `coplanar_back` (opposite facing)
    /// - **Front**: the geometry, unchanged, in `front`
    /// - **Back**: the geometry, unchanged, in `back`
    /// - **Spanning**: the piece in front of the plane in `front` and the
    ///   piece behind it in `back`; a piece with fewer than 3 vertices is
    ///   dropped
    fn split(&self, plane: &Plane) -> Split<Self::Vertex>;
}

impl<V: Vertex> Cuttable for Polygon<V> {
    type Vertex = V;

    fn split(&self, plane: &Plane) -> Split<V> {
        let mut split = Split::default();
        split.push(self.clone(), plane);
        split
    }
}

impl Cuttable for Triangle {
    type Vertex = SimpleVertex;

    fn split(&self, plane: &Plane) -> Split<SimpleVertex> {
        Polygon::from(self).split(plane)
    }
}

impl Cuttable for Rectangle {
    type Vertex = SimpleVertex;

    fn split(&self, plane: &Plane) -> Split<SimpleVertex> {
        Polygon::from(self).split(plane)
    }
}

/// Splits `polygon` by `plane` into the matching list(s) of `out`.
///
/// Spanning polygons are cut with a Sutherland-Hodgman style walk over the
/// edges: every vertex goes to the side(s) it lies on, and every edge with
/// one end strictly in front and the other strictly behind contributes an
/// interpolated vertex to both sides.
fn split_polygon<V: Vertex>(polygon: Polygon<V>, plane: &Plane, out: &mut Split<V>) {
    let sides: Vec<Classification> = polygon
        .positions()
        .map(|p| Classification::from(plane.classify_point(p)))
        .collect();
    let kind = sides
        .iter()
        .fold(Classification::Coplanar, |acc, &side| acc | side);

    match kind {
        Classification::Coplanar => {
            if plane.orientation_matches(&polygon.plane()) {
                out.coplanar_front.push(polygon);
            } else {
                out.coplanar_back.push(polygon);
            }
        }
        Classification::Front => out.front.push(polygon),
        Classification::Back => out.back.push(polygon),
        Classification::Spanning => {
            let vertices = polygon.vertices();
            let n = vertices.len();

            let mut front_verts = Vec::with_capacity(n + 1);
            let mut back_verts = Vec::with_capacity(n + 1);

            for i in 0..n {
                let next_idx = (i + 1) % n;
                let (current, current_side) = (&vertices[i], sides[i]);
                let (next, next_side) = (&vertices[next_idx], sides[next_idx]);

                if current_side != Classification::Back {
                    front_verts.push(current.clone());
                }
                if current_side != Classification::Front {
                    back_verts.push(current.clone());
                }

                if current_side | next_side == Classification::Spanning {
                    let start = current.position();
                    let t = (plane.w() - plane.normal().dot(&start.coords))
                        / plane.normal().dot(&(next.position() - start));
                    let intersection = current.interpolate(next, t);
                    front_verts.push(intersection.clone());
                    back_verts.push(intersection);
                }
            }

            if front_verts.len() >= 3 {
                out.front.push(Polygon::new(front_verts));
            }
            if back_verts.len() >= 3 {
                out.back.push(Polygon::new(back_verts));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PLANE_EPSILON;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    fn polygon(points: &[[f32; 3]]) -> Polygon<SimpleVertex> {
        let normal = Vector3::new(0.0, 0.0, 1.0);
        Polygon::new(
            points
                .iter()
                .map(|p| SimpleVertex::new(Point3::new(p[0], p[1], p[2]), normal))
                .collect(),
        )
    }

    fn unit_square() -> Polygon<SimpleVertex> {
        polygon(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ])
    }

    fn x_plane(x: f32) -> Plane {
        Plane::new(Vector3::new(1.0, 0.0, 0.0), x)
    }

    #[test]
    fn coplanar_same_facing_goes_front() {
        let square = unit_square();
        let split = square.split(&Plane::new(Vector3::new(0.0, 0.0, 1.0), 0.0));
        assert_eq!(split.coplanar_front, vec![square]);
        assert_eq!(split.len(), 1);
    }

    #[test]
    fn coplanar_opposite_facing_goes_back() {
        let square = unit_square();
        let split = square.split(&Plane::new(Vector3::new(0.0, 0.0, -1.0), 0.0));
        assert_eq!(split.coplanar_back, vec![square]);
        assert_eq!(split.len(), 1);
    }

    #[test]
    fn front_and_back_are_unchanged() {
        let square = unit_square();

        let split = square.split(&x_plane(-1.0));
        assert_eq!(split.front, vec![square.clone()]);
        assert_eq!(split.len(), 1);

        let split = square.split(&x_plane(2.0));
        assert_eq!(split.back, vec![square]);
        assert_eq!(split.len(), 1);
    }

    #[test]
    fn touching_polygon_is_not_spanning() {
        // Left edge lies on the plane, the rest is in front.
        let square = unit_square();
        let split = square.split(&x_plane(0.0));
        assert_eq!(split.front, vec![square]);
        assert!(split.back.is_empty());
    }

    #[test]
    fn spanning_square_is_cut_in_two() {
        let split = unit_square().split(&x_plane(0.5));
        assert_eq!(split.front.len(), 1);
        assert_eq!(split.back.len(), 1);
        assert!(split.coplanar_front.is_empty() && split.coplanar_back.is_empty());

        let front: Vec<_> = split.front[0].positions().collect();
        let back: Vec<_> = split.back[0].positions().collect();
        assert_eq!(
            front,
            vec![
                Point3::new(0.5, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
            ]
        );
        assert_eq!(
            back,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.5, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn spanning_split_accounts_for_every_vertex() {
        let square = unit_square();
        let split = square.split(&x_plane(0.25));

        let outputs: Vec<SimpleVertex> = split
            .front
            .iter()
            .chain(&split.back)
            .flat_map(|p| p.vertices().iter().copied())
            .collect();

        for original in square.vertices() {
            assert!(outputs.contains(original));
        }

        // Exactly two new vertices, each shared by both halves.
        let new: Vec<&SimpleVertex> = split.front[0]
            .vertices()
            .iter()
            .filter(|v| !square.vertices().contains(*v))
            .collect();
        assert_eq!(new.len(), 2);
        for v in new {
            assert!(split.back[0].vertices().contains(v));
            assert_relative_eq!(v.position.x, 0.25);
        }
    }

    #[test]
    fn vertices_on_plane_are_shared_without_interpolation() {
        let diamond = polygon(&[
            [0.0, -1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
        ]);
        let split = diamond.split(&x_plane(0.0));

        let front: Vec<_> = split.front[0].positions().collect();
        let back: Vec<_> = split.back[0].positions().collect();
        assert_eq!(
            front,
            vec![
                Point3::new(0.0, -1.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ]
        );
        assert_eq!(
            back,
            vec![
                Point3::new(0.0, -1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(-1.0, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn interpolates_normals_along_cut_edges() {
        let a = SimpleVertex::new(Point3::new(-1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let b = SimpleVertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        let c = SimpleVertex::new(Point3::new(1.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        let split = Polygon::new(vec![a, b, c]).split(&x_plane(0.0));

        let cut = split.front[0].vertices()[0];
        assert_relative_eq!(cut.position, Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(cut.normal, Vector3::new(0.0, 0.5, 0.5));
    }

    #[test]
    fn epsilon_band_is_coplanar() {
        let half = PLANE_EPSILON / 2.0;
        let nearly_flat = polygon(&[[0.0, 0.0, 0.0], [1.0, 0.0, half], [0.0, 1.0, 0.0]]);
        let split = nearly_flat.split(&Plane::new(Vector3::new(0.0, 0.0, 1.0), 0.0));
        assert_eq!(split.coplanar_front.len(), 1);

        let double = PLANE_EPSILON * 2.0;
        let lifted = polygon(&[[0.0, 0.0, 0.0], [1.0, 0.0, double], [0.0, 1.0, 0.0]]);
        let split = lifted.split(&Plane::new(Vector3::new(0.0, 0.0, 1.0), 0.0));
        assert_eq!(split.front.len(), 1);

        let sunk = polygon(&[[0.0, 0.0, 0.0], [1.0, 0.0, -double], [0.0, 1.0, 0.0]]);
        let split = sunk.split(&Plane::new(Vector3::new(0.0, 0.0, 1.0), 0.0));
        assert_eq!(split.back.len(), 1);
    }

    #[test]
    fn partition_accumulates_in_order() {
        let left = polygon(&[[-3.0, 0.0, 0.0], [-2.0, 0.0, 0.0], [-2.0, 1.0, 0.0]]);
        let right = polygon(&[[2.0, 0.0, 0.0], [3.0, 0.0, 0.0], [3.0, 1.0, 0.0]]);
        let middle = unit_square();

        let split = Split::partition(vec![left.clone(), middle, right.clone()], &x_plane(0.5));
        assert_eq!(split.back.len(), 2);
        assert_eq!(split.front.len(), 2);
        assert_eq!(split.back[0], left);
        assert_eq!(split.front[1], right);
    }

    #[test]
    fn partition_of_nothing_is_empty() {
        let split = Split::<SimpleVertex>::partition(Vec::new(), &x_plane(0.0));
        assert!(split.is_empty());
    }

    #[test]
    fn triangle_is_cuttable() {
        let triangle = Triangle::new(
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        );
        let split = triangle.split(&x_plane(0.0));
        assert_eq!(split.front.len(), 1);
        assert_eq!(split.back.len(), 1);
        assert_eq!(split.back[0].len(), 3);
        assert_eq!(split.front[0].len(), 4);
    }
}

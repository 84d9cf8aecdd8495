//! Solid primitives: axis-aligned boxes and UV spheres.

use std::f32::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};

use crate::{Csg, Polygon, SimpleVertex};

/// An axis-aligned box between two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cuboid {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Cuboid {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// A cube of edge length `size` centered on `center`.
    pub fn centered(center: Point3<f32>, size: f32) -> Self {
        let half = Vector3::repeat(size / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// The six faces as outward-wound quads, in the order
    /// -X, +X, -Y, +Y, -Z, +Z.
    pub fn to_csg(&self) -> Csg<SimpleVertex> {
        let (lo, hi) = (self.min, self.max);

        // 8 corners, indexed by bit 0 = x, bit 1 = y, bit 2 = z.
        let corner = |i: usize| {
            Point3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        };

        // Counter-clockwise when viewed from outside.
        let faces: [([usize; 4], [f32; 3]); 6] = [
            ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
            ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
            ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
            ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
            ([0, 2, 3, 1], [0.0, 0.0, -1.0]),
            ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
        ];

        let polygons = faces
            .iter()
            .map(|(indices, n)| {
                let normal = Vector3::new(n[0], n[1], n[2]);
                Polygon::new(
                    indices
                        .iter()
                        .map(|&i| SimpleVertex::new(corner(i), normal))
                        .collect(),
                )
            })
            .collect();

        Csg::new(polygons)
    }
}

/// Tessellation settings for [`Sphere::to_csg_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SphereOptions {
    /// Subdivisions around the Y axis.
    pub slices: usize,
    /// Subdivisions from pole to pole.
    pub stacks: usize,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            slices: 36,
            stacks: 36,
        }
    }
}

impl SphereOptions {
    pub fn with_slices(mut self, slices: usize) -> Self {
        self.slices = slices;
        self
    }

    pub fn with_stacks(mut self, stacks: usize) -> Self {
        self.stacks = stacks;
        self
    }
}

/// A sphere given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Tessellates with the default [`SphereOptions`].
    pub fn to_csg(&self) -> Csg<SimpleVertex> {
        self.to_csg_with(SphereOptions::default())
    }

    /// Tessellates into triangles, two per latitude/longitude cell. The
    /// cells touching a pole keep only the triangle with area, giving
    /// `2 * slices * (stacks - 1)` triangles. Vertex normals point radially
    /// outward.
    ///
    /// Fewer than 3 slices or 2 stacks cannot enclose a volume and yields an
    /// empty solid.
    pub fn to_csg_with(&self, options: SphereOptions) -> Csg<SimpleVertex> {
        let SphereOptions { slices, stacks } = options;
        if slices < 3 || stacks < 2 {
            return Csg::empty();
        }

        let vertex = |i: usize, j: usize| {
            let theta = i as f32 / slices as f32 * TAU;
            let phi = j as f32 / stacks as f32 * PI;
            let dir = Vector3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            SimpleVertex::new(self.center + dir * self.radius, dir)
        };

        let mut polygons = Vec::with_capacity(2 * slices * (stacks - 1));
        for i in 0..slices {
            for j in 0..stacks {
                let (v1, v2) = (vertex(i, j), vertex(i + 1, j));
                let (v3, v4) = (vertex(i + 1, j + 1), vertex(i, j + 1));
                // v1 == v2 on the north pole row, v3 == v4 on the south.
                if j > 0 {
                    polygons.push(Polygon::new(vec![v1, v2, v3]));
                }
                if j < stacks - 1 {
                    polygons.push(Polygon::new(vec![v1, v3, v4]));
                }
            }
        }

        Csg::new(polygons)
    }
}

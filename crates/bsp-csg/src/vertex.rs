//! Vertex abstraction used by polygons and the BSP tree.

use std::hash::{Hash, Hasher};

use nalgebra::{Point3, Vector3};

/// A polygon vertex: a position, a normal, and whatever else the caller
/// needs to carry through splitting.
///
/// Splitting a polygon creates new vertices with [`Vertex::interpolate`], so
/// any extra per-vertex attributes should be interpolated there too.
pub trait Vertex: Clone {
    fn position(&self) -> Point3<f32>;

    fn normal(&self) -> Vector3<f32>;

    /// Linearly interpolates between `self` (`t = 0`) and `other` (`t = 1`).
    fn interpolate(&self, other: &Self, t: f32) -> Self;

    /// Negates the normal. Called on every vertex when a polygon is flipped.
    fn flip(&mut self);
}

/// A vertex carrying only a position and a normal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleVertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl SimpleVertex {
    pub const fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

impl Vertex for SimpleVertex {
    #[inline]
    fn position(&self) -> Point3<f32> {
        self.position
    }

    #[inline]
    fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Position and normal are lerped independently. The normal is not
    /// renormalized, so it is shorter than unit length between two
    /// non-parallel normals.
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position + (other.position - self.position) * t,
            normal: self.normal + (other.normal - self.normal) * t,
        }
    }

    #[inline]
    fn flip(&mut self) {
        self.normal = -self.normal;
    }
}

// Components are compared with `==`, so `Eq` only holds for vertices without NaN.
impl Eq for SimpleVertex {}

impl Hash for SimpleVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `+ 0.0` folds -0.0 onto 0.0 so equal vertices hash equally.
        for c in self.position.iter().chain(self.normal.iter()) {
            (c + 0.0).to_bits().hash(state);
        }
    }
}

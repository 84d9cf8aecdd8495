//! Solids and the boolean operations between them.

use nalgebra::Point3;

use crate::bsp::BspNode;
use crate::{Plane, Polygon, Split, Vertex};

/// A solid described by its boundary: a list of convex, outward-facing
/// polygons.
///
/// Boolean operations build a [`BspNode`] tree for each operand, run a fixed
/// sequence of clip and invert steps and return the surviving polygons as a
/// new solid. The operands are never modified.
///
/// An empty tree clips everything away, so any boolean operation with an
/// empty operand yields an empty solid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Csg<V> {
    polygons: Vec<Polygon<V>>,
}

impl<V> Default for Csg<V> {
    fn default() -> Self {
        Self {
            polygons: Vec::new(),
        }
    }
}

impl<V: Vertex> Csg<V> {
    /// Wraps `polygons`, dropping any with fewer than 3 vertices.
    pub fn new(mut polygons: Vec<Polygon<V>>) -> Self {
        let before = polygons.len();
        polygons.retain(|polygon| !polygon.is_degenerate());
        if polygons.len() < before {
            tracing::warn!(dropped = before - polygons.len(), "dropped degenerate polygons");
        }
        Self { polygons }
    }

    /// A solid with no polygons.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon<V>] {
        &self.polygons
    }

    #[inline]
    pub fn into_polygons(self) -> Vec<Polygon<V>> {
        self.polygons
    }

    /// Number of polygons.
    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Total number of vertices over all polygons, shared corners counted once
    /// per polygon.
    pub fn vertex_count(&self) -> usize {
        self.polygons.iter().map(Polygon::len).sum()
    }

    fn trees(&self, other: &Csg<V>) -> (BspNode<V>, BspNode<V>) {
        (
            BspNode::from_polygons(self.polygons.clone()),
            BspNode::from_polygons(other.polygons.clone()),
        )
    }

    /// Returns a solid occupying the space of `self`, `other`, or both.
    ///
    /// ```text
    /// +-------+            +-------+
    /// |       |            |       |
    /// |   A   |            |       |
    /// |    +--+----+   =   |       +----+
    /// +----+--+    |       +----+       |
    ///      |   B   |            |       |
    ///      |       |            |       |
    ///      +-------+            +-------+
    /// ```
    pub fn union(&self, other: &Csg<V>) -> Csg<V> {
        let (mut a, mut b) = self.trees(other);

        tracing::trace!("a.clip_to(b)");
        a.clip_to(&b);
        tracing::trace!("b.clip_to(a)");
        b.clip_to(&a);
        tracing::trace!("b.invert()");
        b.invert();
        tracing::trace!("b.clip_to(a)");
        b.clip_to(&a);
        tracing::trace!("b.invert()");
        b.invert();

        let result = combine(a, b);
        tracing::debug!(
            a = self.len(),
            b = other.len(),
            result = result.len(),
            "union"
        );
        result
    }

    /// Returns a solid occupying the space of `self` that is not in `other`.
    ///
    /// ```text
    /// +-------+            +-------+
    /// |       |            |       |
    /// |   A   |            |       |
    /// |    +--+----+   =   |    +--+
    /// +----+--+    |       +----+
    ///      |   B   |
    ///      |       |
    ///      +-------+
    /// ```
    pub fn subtract(&self, other: &Csg<V>) -> Csg<V> {
        let (mut a, mut b) = self.trees(other);

        tracing::trace!("a.invert()");
        a.invert();
        tracing::trace!("a.clip_to(b)");
        a.clip_to(&b);
        tracing::trace!("b.clip_to(a)");
        b.clip_to(&a);
        tracing::trace!("b.invert()");
        b.invert();
        tracing::trace!("b.clip_to(a)");
        b.clip_to(&a);
        tracing::trace!("b.invert()");
        b.invert();
        tracing::trace!("a.invert()");
        a.invert();

        let result = combine_flipping_b(a, b);
        tracing::debug!(
            a = self.len(),
            b = other.len(),
            result = result.len(),
            "subtract"
        );
        result
    }

    /// Returns a solid occupying the space common to `self` and `other`.
    ///
    /// ```text
    /// +-------+
    /// |       |
    /// |   A   |
    /// |    +--+----+   =   +--+
    /// +----+--+    |       +--+
    ///      |   B   |
    ///      |       |
    ///      +-------+
    /// ```
    pub fn intersect(&self, other: &Csg<V>) -> Csg<V> {
        let (mut a, mut b) = self.trees(other);

        tracing::trace!("a.invert()");
        a.invert();
        tracing::trace!("b.clip_to(a)");
        b.clip_to(&a);
        tracing::trace!("b.invert()");
        b.invert();
        tracing::trace!("a.clip_to(b)");
        a.clip_to(&b);
        tracing::trace!("b.clip_to(a)");
        b.clip_to(&a);
        tracing::trace!("a.invert()");
        a.invert();

        let result = combine_flipping_b(a, b);
        tracing::debug!(
            a = self.len(),
            b = other.len(),
            result = result.len(),
            "intersect"
        );
        result
    }

    /// Returns the solid turned inside out: every polygon flipped.
    pub fn inverted(&self) -> Csg<V> {
        Csg::new(self.polygons.iter().map(Polygon::flipped).collect())
    }

    /// Cuts every polygon by `plane`, returning the part in front of the
    /// plane and the part behind it.
    ///
    /// Polygons lying in the plane go to the front half when they face the
    /// same way as the plane and to the back half otherwise. The halves are
    /// open surfaces: no cap is generated along the cut.
    pub fn split(&self, plane: &Plane) -> (Csg<V>, Csg<V>) {
        let Split {
            coplanar_front,
            coplanar_back,
            front,
            back,
        } = Split::partition(self.polygons.iter().cloned(), plane);

        let mut front_polygons = coplanar_front;
        front_polygons.extend(front);
        let mut back_polygons = coplanar_back;
        back_polygons.extend(back);

        tracing::debug!(
            polygons = self.len(),
            front = front_polygons.len(),
            back = back_polygons.len(),
            "split"
        );
        (Csg::new(front_polygons), Csg::new(back_polygons))
    }

    /// Returns the axis-aligned bounds as `(min, max)`, `None` for an empty
    /// solid.
    pub fn bounding_box(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut positions = self.polygons.iter().flat_map(Polygon::positions);
        let first = positions.next()?;

        Some(positions.fold((first, first), |(min, max), p| {
            (
                Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }

    /// Volume enclosed by the surface, positive when the polygons face
    /// outward.
    ///
    /// Sums the signed volumes of the tetrahedra spanned by the origin and
    /// each fan triangle. Only meaningful for a closed surface.
    pub fn signed_volume(&self) -> f32 {
        let sum: f32 = self
            .polygons
            .iter()
            .flat_map(Polygon::fan_triangles)
            .map(|(a, b, c)| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum();
        sum / 6.0
    }

    /// Total area of all polygons.
    pub fn surface_area(&self) -> f32 {
        self.polygons.iter().map(Polygon::area).sum()
    }
}

fn combine<V: Vertex>(a: BspNode<V>, b: BspNode<V>) -> Csg<V> {
    let mut polygons = a.into_polygons();
    polygons.extend(b.into_polygons());
    Csg::new(polygons)
}

/// Like [`combine`], but B's polygons also take part in the final inversion
/// of A, as if they had been merged into A beforehand.
fn combine_flipping_b<V: Vertex>(a: BspNode<V>, b: BspNode<V>) -> Csg<V> {
    let mut polygons = a.into_polygons();
    polygons.extend(b.into_polygons().into_iter().map(|mut polygon| {
        polygon.flip();
        polygon
    }));
    Csg::new(polygons)
}

impl<V: Vertex> From<Vec<Polygon<V>>> for Csg<V> {
    fn from(polygons: Vec<Polygon<V>>) -> Self {
        Self::new(polygons)
    }
}

impl<V: Vertex> From<BspNode<V>> for Csg<V> {
    fn from(node: BspNode<V>) -> Self {
        Self::new(node.into_polygons())
    }
}

impl<V: Vertex> FromIterator<Polygon<V>> for Csg<V> {
    fn from_iter<I: IntoIterator<Item = Polygon<V>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! BSP tree node implementation.

use crate::{Cuttable, Plane, Polygon, Split, Vertex};

use super::visitor::{BspVisitor, CollectingVisitor};

/// A node in the BSP tree.
///
/// Each node partitions space using a splitting plane and stores polygons
/// that are coplanar with that plane. Polygons on the front or back of the
/// plane are stored in the respective child subtrees.
///
/// A node is either *empty* (no plane, no polygons, no children) or
/// *populated*. The plane of a populated node is the plane of the first
/// polygon ever inserted into it; no balancing is attempted, so the shape
/// of the tree depends on the input order.
///
/// The tree also describes a solid: space behind every plane on a path
/// that ends in a missing back child is inside.
#[derive(Debug, Clone)]
pub struct BspNode<V> {
    /// The splitting plane, `None` only for an empty node.
    plane: Option<Plane>,

    /// Polygons coplanar with the plane, facing either way.
    polygons: Vec<Polygon<V>>,

    /// Subtree containing polygons in FRONT of the splitting plane.
    front: Option<Box<BspNode<V>>>,

    /// Subtree containing polygons BEHIND the splitting plane.
    back: Option<Box<BspNode<V>>>,
}

impl<V> Default for BspNode<V> {
    fn default() -> Self {
        Self {
            plane: None,
            polygons: Vec::new(),
            front: None,
            back: None,
        }
    }
}

impl<V: Vertex> BspNode<V> {
    /// Creates an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree out of `polygons`.
    pub fn from_polygons(polygons: Vec<Polygon<V>>) -> Self {
        let mut node = Self::new();
        node.insert(polygons);
        node
    }

    /// Returns the splitting plane, `None` for an empty node.
    #[inline]
    pub fn plane(&self) -> Option<&Plane> {
        self.plane.as_ref()
    }

    /// Returns the polygons stored at this node.
    #[inline]
    pub fn polygons(&self) -> &[Polygon<V>] {
        &self.polygons
    }

    /// Returns a reference to the front child subtree.
    #[inline]
    pub fn front(&self) -> Option<&BspNode<V>> {
        self.front.as_deref()
    }

    /// Returns a reference to the back child subtree.
    #[inline]
    pub fn back(&self) -> Option<&BspNode<V>> {
        self.back.as_deref()
    }

    /// Returns `true` for a node without a splitting plane.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plane.is_none()
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Returns the total number of polygons in this subtree (including all descendants).
    pub fn polygon_count(&self) -> usize {
        let mut count = self.polygons.len();

        if let Some(ref front) = self.front {
            count += front.polygon_count();
        }
        if let Some(ref back) = self.back {
            count += back.polygon_count();
        }

        count
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let front_depth = self.front.as_ref().map_or(0, |n| n.depth());
        let back_depth = self.back.as_ref().map_or(0, |n| n.depth());
        1 + front_depth.max(back_depth)
    }

    /// Adds polygons to the tree.
    ///
    /// Polygons coplanar with this node's plane are kept here (whichever way
    /// they face); the rest are filtered down into the front and back
    /// subtrees, creating them when missing. An empty node takes the plane of
    /// the first polygon. Polygons with fewer than 3 vertices are dropped.
    pub fn insert(&mut self, mut polygons: Vec<Polygon<V>>) {
        polygons.retain(|polygon| !polygon.is_degenerate());
        let Some(first) = polygons.first() else {
            return;
        };
        let plane = *self.plane.get_or_insert_with(|| first.plane());

        let Split {
            coplanar_front,
            coplanar_back,
            front,
            back,
        } = Split::partition(polygons, &plane);

        self.polygons.extend(coplanar_front);
        self.polygons.extend(coplanar_back);

        if !front.is_empty() {
            match self.front {
                Some(ref mut node) => node.insert(front),
                None => self.front = Some(Box::new(Self::from_polygons(front))),
            }
        }
        if !back.is_empty() {
            match self.back {
                Some(ref mut node) => node.insert(back),
                None => self.back = Some(Box::new(Self::from_polygons(back))),
            }
        }
    }

    /// Converts solid space to empty space and empty space to solid space.
    pub fn invert(&mut self) {
        for polygon in &mut self.polygons {
            polygon.flip();
        }
        if let Some(ref mut plane) = self.plane {
            plane.flip();
        }
        if let Some(ref mut front) = self.front {
            front.invert();
        }
        if let Some(ref mut back) = self.back {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Removes the parts of `polygons` that are inside the solid this tree
    /// describes.
    ///
    /// Unlike [`BspNode::insert`], coplanar polygons are not kept at the node:
    /// same-facing ones continue down the front side and opposite-facing ones
    /// down the back side. Anything that reaches a missing back child is
    /// inside and gets dropped; an empty node clips everything away.
    pub fn clip_polygons(&self, polygons: Vec<Polygon<V>>) -> Vec<Polygon<V>> {
        let Some(ref plane) = self.plane else {
            return Vec::new();
        };

        let Split {
            coplanar_front,
            coplanar_back,
            mut front,
            mut back,
        } = Split::partition(polygons, plane);
        front.extend(coplanar_front);
        back.extend(coplanar_back);

        if let Some(ref node) = self.front {
            front = node.clip_polygons(front);
        }
        match self.back {
            Some(ref node) => back = node.clip_polygons(back),
            None => back.clear(),
        }

        front.extend(back);
        front
    }

    /// Removes all polygons in this tree that are inside the other tree.
    pub fn clip_to(&mut self, other: &BspNode<V>) {
        let polygons = std::mem::take(&mut self.polygons);
        self.polygons = other.clip_polygons(polygons);
        if let Some(ref mut front) = self.front {
            front.clip_to(other);
        }
        if let Some(ref mut back) = self.back {
            back.clip_to(other);
        }
    }

    /// Visits every node depth-first: this node, then the front subtree,
    /// then the back subtree.
    pub fn traverse<T: BspVisitor<V>>(&self, visitor: &mut T) {
        visitor.visit(&self.polygons);
        if let Some(ref front) = self.front {
            front.traverse(visitor);
        }
        if let Some(ref back) = self.back {
            back.traverse(visitor);
        }
    }

    /// Collects every polygon in the tree, in [`BspNode::traverse`] order.
    pub fn all_polygons(&self) -> Vec<Polygon<V>> {
        let mut visitor = CollectingVisitor::new();
        self.traverse(&mut visitor);
        visitor.into_polygons()
    }

    /// Consumes the tree, returning its polygons in [`BspNode::traverse`] order.
    pub fn into_polygons(self) -> Vec<Polygon<V>> {
        let mut result = Vec::with_capacity(self.polygon_count());
        collect_owned(self, &mut result);
        result
    }

    /// Logs the shape of the tree at `TRACE` level, one event per node.
    pub fn dump(&self) {
        dump_node(self, 0, "root");
    }
}

impl<V: Vertex> From<Vec<Polygon<V>>> for BspNode<V> {
    fn from(polygons: Vec<Polygon<V>>) -> Self {
        Self::from_polygons(polygons)
    }
}

fn collect_owned<V>(node: BspNode<V>, result: &mut Vec<Polygon<V>>) {
    result.extend(node.polygons);
    if let Some(front) = node.front {
        collect_owned(*front, result);
    }
    if let Some(back) = node.back {
        collect_owned(*back, result);
    }
}

fn dump_node<V>(node: &BspNode<V>, depth: usize, side: &str) {
    tracing::trace!(
        depth,
        side,
        polygons = node.polygons.len(),
        plane = ?node.plane,
        "bsp node"
    );
    if let Some(ref front) = node.front {
        dump_node(front, depth + 1, "front");
    }
    if let Some(ref back) = node.back {
        dump_node(back, depth + 1, "back");
    }
}

impl<V: Vertex> Cuttable for BspNode<V> {
    type Vertex = V;

    /// Splits every polygon in the tree by `plane`.
    fn split(&self, plane: &Plane) -> Split<V> {
        Split::partition(self.all_polygons(), plane)
    }
}

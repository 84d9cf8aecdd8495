//! Callbacks for walking a [`BspNode`](super::BspNode) tree.

use crate::Polygon;

/// Receives the polygon group of every node during
/// [`BspNode::traverse`](super::BspNode::traverse).
///
/// Groups arrive depth-first: a node, then its front subtree, then its back
/// subtree. Every group is coplanar with its node's plane, and a node whose
/// polygons were all clipped away still produces an (empty) group.
pub trait BspVisitor<V> {
    fn visit(&mut self, polygons: &[Polygon<V>]);
}

/// Clones every visited polygon into a flat list.
#[derive(Debug)]
pub struct CollectingVisitor<V> {
    collected: Vec<Polygon<V>>,
}

impl<V> Default for CollectingVisitor<V> {
    fn default() -> Self {
        Self {
            collected: Vec::new(),
        }
    }
}

impl<V> CollectingVisitor<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polygons seen so far, in visiting order.
    pub fn polygons(&self) -> &[Polygon<V>] {
        &self.collected
    }

    pub fn into_polygons(self) -> Vec<Polygon<V>> {
        self.collected
    }
}

impl<V: Clone> BspVisitor<V> for CollectingVisitor<V> {
    fn visit(&mut self, polygons: &[Polygon<V>]) {
        self.collected.extend_from_slice(polygons);
    }
}

/// Adapts a closure `FnMut(&[Polygon<V>])` into a visitor.
pub struct FnVisitor<F> {
    callback: F,
}

impl<F> FnVisitor<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<V, F: FnMut(&[Polygon<V>])> BspVisitor<V> for FnVisitor<F> {
    fn visit(&mut self, polygons: &[Polygon<V>]) {
        (self.callback)(polygons);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::BspNode;
    use crate::{Cuboid, SimpleVertex};
    use nalgebra::Point3;

    fn cube_tree() -> BspNode<SimpleVertex> {
        let cube = Cuboid::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)).to_csg();
        BspNode::from_polygons(cube.into_polygons())
    }

    #[test]
    fn collector_starts_empty() {
        let visitor = CollectingVisitor::<SimpleVertex>::new();
        assert!(visitor.polygons().is_empty());
        assert!(visitor.into_polygons().is_empty());
    }

    #[test]
    fn collector_keeps_visiting_order() {
        let cube = Cuboid::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)).to_csg();
        let faces = cube.polygons();

        let mut visitor = CollectingVisitor::new();
        visitor.visit(&faces[3..5]);
        visitor.visit(&[]);
        visitor.visit(&faces[..1]);

        assert_eq!(
            visitor.polygons(),
            &[faces[3].clone(), faces[4].clone(), faces[0].clone()]
        );
    }

    #[test]
    fn closure_sees_one_group_per_node() {
        let tree = cube_tree();

        let mut groups = 0;
        let mut area = 0.0;
        tree.traverse(&mut FnVisitor::new(|polygons: &[Polygon<SimpleVertex>]| {
            groups += 1;
            area += polygons.iter().map(Polygon::area).sum::<f32>();
        }));

        assert_eq!(groups, 6);
        assert!((area - 6.0).abs() < 1e-5);
    }

    #[test]
    fn clipped_nodes_are_still_visited() {
        let mut tree = cube_tree();
        tree.invert();
        tree.clip_to(&cube_tree());

        let mut sizes = Vec::new();
        tree.traverse(&mut FnVisitor::new(|polygons: &[Polygon<SimpleVertex>]| {
            sizes.push(polygons.len());
        }));
        assert_eq!(sizes, vec![0; 6]);
    }
}

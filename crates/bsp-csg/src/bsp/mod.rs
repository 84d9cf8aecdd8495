//! Binary Space Partitioning tree for solid modelling.
//!
//! A [`BspNode`] recursively partitions 3D space using planes taken from its
//! input polygons. Read as a solid, the tree marks space behind its
//! boundary as inside, which is what the boolean operations in
//! [`crate::Csg`] rely on.
//!
//! # Example
//!
//! ```
//! use bsp_csg::bsp::{BspNode, CollectingVisitor};
//! use bsp_csg::Cuboid;
//! use nalgebra::Point3;
//!
//! let cube = Cuboid::centered(Point3::origin(), 2.0).to_csg();
//! let mut tree = BspNode::from_polygons(cube.into_polygons());
//! assert_eq!(tree.polygon_count(), 6);
//!
//! // Turn the cube inside out.
//! tree.invert();
//!
//! let mut visitor = CollectingVisitor::new();
//! tree.traverse(&mut visitor);
//! assert_eq!(visitor.into_polygons().len(), 6);
//! ```
//!
//! # Architecture
//!
//! - [`BspNode`]: splitting plane, coplanar polygons and two optional subtrees
//! - [`BspVisitor`]: visitor trait for custom traversal behavior

mod node;
mod visitor;

pub use node::BspNode;
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor};

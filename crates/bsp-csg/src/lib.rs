//! Constructive solid geometry on polygon soups using BSP (Binary Space
//! Partitioning) trees.
//!
//! A [`Csg`] solid is a list of convex, outward-facing polygons. Union,
//! subtraction and intersection build a [`bsp::BspNode`] tree per operand
//! and clip the two against each other.
//!
//! ```
//! use bsp_csg::{Cuboid, Sphere};
//! use nalgebra::Point3;
//!
//! let cube = Cuboid::centered(Point3::origin(), 2.0).to_csg();
//! let sphere = Sphere::new(Point3::new(1.0, 1.0, 1.0), 1.0).to_csg();
//!
//! let carved = cube.subtract(&sphere);
//! assert!(carved.signed_volume() < cube.signed_volume());
//! ```

pub mod bsp;
mod csg;
mod cuttable;
mod error;
pub mod export;
mod plane;
mod polygon;
mod rectangle;
mod segment;
mod shapes;
mod triangle;
mod vertex;

pub use bsp::{BspNode, BspVisitor, CollectingVisitor, FnVisitor};
pub use csg::Csg;
pub use cuttable::{Cuttable, Split};
pub use error::{Error, Result};
pub use export::{from_text, read_text, to_ply, to_text, write_ply, write_text};
pub use plane::{Classification, Plane, PlaneSide, PLANE_EPSILON};
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use segment::{Line3D, LineSegment3D, Ray3D};
pub use shapes::{Cuboid, Sphere, SphereOptions};
pub use triangle::Triangle;
pub use vertex::{SimpleVertex, Vertex};

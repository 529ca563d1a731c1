//! Coordinate reference system transformations.
//!
//! Implements the map projections used for fixture generation from scratch:
//! Mercator (spherical and ellipsoidal) and transverse Mercator, plus a small
//! registry of EPSG codes and a parser for PROJ-style parameter strings.

pub mod crs;
pub mod ellipsoid;
pub mod error;
pub mod mercator;
pub mod transform;
pub mod transverse_mercator;
pub mod utm;

pub use crs::{Crs, Projection};
pub use ellipsoid::Ellipsoid;
pub use error::{ProjectionError, ProjectionResult};
pub use mercator::Mercator;
pub use transform::{Coord, ForwardTransform, Transformation};
pub use transverse_mercator::TransverseMercator;

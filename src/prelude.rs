//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use photon_kdtree::prelude::*;
//! ```

pub use crate::{
    Color, DEFAULT_QUERY_PHOTONS, KdPoint, KdTree, KnnScratch, Light, Material, Neighbor, Photon, PhotonMap,
    PhotonMapConfig, Plane, PlaneScene, PointLight, RectangularLight, Scene,
};

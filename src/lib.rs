//! # Photon k-d tree - Nearest-Neighbor Index and Photon Map
//!
//! A Rust library providing a static k-d tree with exact and approximate
//! k-nearest-neighbor search, and a photon map for global illumination built on it.
//!
//! ## Features
//!
//! - **Arena Layout**: One pre-order node vector sized to the point count, no per-node allocation
//! - **In-Place Build**: Randomized quickselect reorders the caller's points; the tree borrows them
//! - **Approximate Search**: `eps > 0` trades accuracy for speed with a `(1 + eps)` distance bound
//! - **Reusable Scratch**: Query state lives outside the tree, so readers can share one index
//! - **Photon Map**: Stochastic light tracing over any [`Scene`] with a density radiance estimate
//!
//! ## Quick Start
//!
//! ```rust
//! use photon_kdtree::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! // Points are reordered in place while building
//! let mut points = vec![
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [-1.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 2.0],
//! ];
//! let tree = KdTree::build(3, &mut points, &mut rng).unwrap();
//!
//! // Three closest points, nearest first
//! let hits = tree.knn(3, &[0.0, 0.0, 0.0], 0.0);
//! assert_eq!(hits[0].dist_sq, 0.0);
//! assert_eq!(hits[1].dist_sq, 1.0);
//! assert_eq!(hits[2].dist_sq, 1.0);
//!
//! // Reuse search state across many queries
//! let mut scratch = tree.scratch();
//! let nearest = tree.knn_with(&mut scratch, 1, &[0.1, 0.9, 0.0], 0.0);
//! assert_eq!(*nearest[0].point, [0.0, 1.0, 0.0]);
//! ```
//!
//! ## Photon Mapping
//!
//! ```rust
//! use glam::DVec3;
//! use photon_kdtree::prelude::*;
//! use rand::SeedableRng;
//!
//! let scene = PlaneScene::new(
//!     vec![Plane::new(DVec3::ZERO, DVec3::Y, Material::lambertian(DVec3::ONE))],
//!     vec![PointLight::new(DVec3::new(0.0, 1.0, 0.0))],
//! );
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut storage = Vec::new();
//! let map = PhotonMap::build(&mut storage, &scene, &PhotonMapConfig::new(2_000), &mut rng).unwrap();
//!
//! let radiance = map.query(DVec3::ZERO, DVec3::Y, DEFAULT_QUERY_PHOTONS, 0.0);
//! assert!(radiance.x > 0.0);
//! ```
//!
//! ## How It Works
//!
//! Building picks the even-biased median along the current axis (cycling with depth)
//! and recurses on both halves, writing nodes in pre-order so a left child is always
//! the next slot. Search keeps a bounded max-heap of the best `k` squared distances
//! and a growable max-heap of pending subtrees keyed by their split-plane distance.
//! A subtree is skipped once `(1 + eps)` times its bound cannot beat the current
//! `k`-th best distance.

pub mod error;
pub mod frontier;
pub mod heap;
pub mod kdtree;
pub mod light;
mod oracle_tests;
pub mod photon_map;
pub mod plane;
pub mod point;
pub mod prelude;
pub mod sampling;
pub mod scene;
mod timing;
pub mod top_k;

pub use error::{Error, Result};
pub use frontier::Frontier;
pub use heap::Entry;
pub use kdtree::{KdTree, KnnScratch, Neighbor, Node, NodeId};
pub use light::{PointLight, RectangularLight};
pub use photon_map::{DEFAULT_QUERY_PHOTONS, Photon, PhotonMap, PhotonMapConfig};
pub use plane::{Plane, PlaneScene};
pub use point::{KdPoint, distance_sq};
pub use scene::{Color, Hit, Light, Material, Ray, Scene};
pub use top_k::TopK;

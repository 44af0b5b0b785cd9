//! Direction sampling for photon emission and diffuse bounces.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;

/// Cosine-weighted direction on the +z hemisphere.
pub fn cosine_hemisphere<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let u1: f64 = rng.random();
    let u2: f64 = rng.random();
    let theta = TAU * u2;
    let r = u1.sqrt();
    let x = r * theta.cos();
    let y = r * theta.sin();
    let z = (1.0 - x * x - y * y).max(0.0).sqrt();
    DVec3::new(x, y, z)
}

/// Uniformly distributed direction on the unit sphere.
pub fn uniform_sphere<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let u1: f64 = rng.random();
    let u2: f64 = rng.random();
    let z = 1.0 - 2.0 * u1;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = TAU * u2;
    DVec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Maps a +z-hemisphere direction into the frame whose z axis is `normal`.
pub fn orient(local: DVec3, normal: DVec3) -> DVec3 {
    let n = normal.normalize();
    let (u, v) = n.any_orthonormal_pair();
    (u * local.x + v * local.y + n * local.z).normalize()
}

/// Cosine-weighted direction about `normal`.
pub fn cosine_about<R: Rng + ?Sized>(normal: DVec3, rng: &mut R) -> DVec3 {
    orient(cosine_hemisphere(rng), normal)
}

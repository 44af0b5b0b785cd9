//! Boundary types for the scene a [`PhotonMap`](crate::PhotonMap) traces through.
//!
//! Intersection, lights and materials belong to the renderer; this module only
//! fixes the contract the photon tracer relies on.

use glam::DVec3;
use rand::Rng;

/// Linear RGB radiance.
pub type Color = DVec3;

/// Reflectivity of a Lambertian surface when none is given.
pub const DEFAULT_REFLECTIVITY: f64 = 0.2;

/// A ray with the number of bounces that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: DVec3,
    /// Unit direction.
    pub direction: DVec3,
    /// Bounces since emission; 0 for a ray leaving a light.
    pub depth: u32,
}

impl Ray {
    /// Creates a depth-0 ray; `direction` is normalized.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            depth: 0,
        }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Surface response, as far as photon transport cares.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Material {
    /// Diffuse reflector that retains photons.
    Lambertian {
        /// Per-channel reflectance.
        albedo: Color,
        /// Fraction of energy carried on after a bounce.
        reflectivity: f64,
    },
    /// Flat emissive-looking surface; shaded with a constant color.
    Diffuse {
        /// Constant color.
        color: Color,
    },
    /// Perfect mirror.
    Specular,
    /// Refracting surface.
    Dielectric {
        /// Index of refraction.
        refractive_index: f64,
    },
}

impl Material {
    /// Lambertian surface with the default reflectivity.
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian {
            albedo,
            reflectivity: DEFAULT_REFLECTIVITY,
        }
    }

    /// True if photons landing here are recorded.
    pub fn retains_photons(&self) -> bool {
        self.diffuse_response().is_some()
    }

    /// Albedo and reflectivity of a photon-retaining surface, `None` otherwise.
    pub fn diffuse_response(&self) -> Option<(Color, f64)> {
        match *self {
            Self::Lambertian { albedo, reflectivity } => Some((albedo, reflectivity)),
            Self::Diffuse { .. } | Self::Specular | Self::Dielectric { .. } => None,
        }
    }
}

/// A ray-surface intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Ray parameter of the hit.
    pub t: f64,
    /// Hit location.
    pub point: DVec3,
    /// Surface normal at the hit.
    pub normal: DVec3,
    /// Material at the hit.
    pub material: Material,
}

/// Geometry photons are traced against.
pub trait Scene {
    /// Light type of this scene.
    type Light: Light;

    /// Nearest hit along `ray` with `t` in `[t_min, t_max]`.
    fn intersect(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit>;

    /// Lights in the scene.
    fn lights(&self) -> &[Self::Light];
}

/// A light source photons are emitted from.
pub trait Light {
    /// Emitted color.
    fn color(&self) -> Color;

    /// Samples an outgoing ray from the light's surface.
    fn emit<R: Rng + ?Sized>(&self, rng: &mut R) -> Ray;

    /// Samples a point on the light's surface.
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_lambertian_retains_photons() {
        assert!(Material::lambertian(Color::ONE).retains_photons());
        assert!(!Material::Diffuse { color: Color::ONE }.retains_photons());
        assert!(!Material::Specular.retains_photons());
        assert!(!Material::Dielectric { refractive_index: 1.5 }.retains_photons());
    }

    #[test]
    fn test_diffuse_response() {
        let material = Material::Lambertian {
            albedo: Color::new(0.5, 0.25, 1.0),
            reflectivity: 0.7,
        };
        assert_eq!(material.diffuse_response(), Some((Color::new(0.5, 0.25, 1.0), 0.7)));
        assert_eq!(
            Material::lambertian(Color::ONE).diffuse_response(),
            Some((Color::ONE, DEFAULT_REFLECTIVITY))
        );
        assert!(Material::Specular.diffuse_response().is_none());
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 4.0));
        assert_eq!(ray.direction, DVec3::Z);
        assert_eq!(ray.at(2.5), DVec3::new(0.0, 0.0, 2.5));
        assert_eq!(ray.depth, 0);
    }
}

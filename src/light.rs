//! Reference light sources.

use glam::DVec3;
use rand::Rng;

use crate::sampling::{cosine_about, uniform_sphere};
use crate::scene::{Color, Light, Ray};

/// Isotropic point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    /// Light position.
    pub position: DVec3,
    /// Emitted color.
    pub color: Color,
}

impl PointLight {
    /// White point light at `position`.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            color: Color::ONE,
        }
    }
}

impl Light for PointLight {
    fn color(&self) -> Color {
        self.color
    }

    fn emit<R: Rng + ?Sized>(&self, rng: &mut R) -> Ray {
        Ray::new(self.position, uniform_sphere(rng))
    }

    fn random_point<R: Rng + ?Sized>(&self, _rng: &mut R) -> DVec3 {
        self.position
    }
}

/// Area light spanning the axis-aligned box between two corners, emitting
/// cosine-weighted about `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangularLight {
    /// First corner.
    pub min: DVec3,
    /// Opposite corner.
    pub max: DVec3,
    /// Emission direction.
    pub normal: DVec3,
    /// Emitted color.
    pub color: Color,
}

impl RectangularLight {
    /// White area light between `min` and `max` facing `normal`.
    pub fn new(min: DVec3, max: DVec3, normal: DVec3) -> Self {
        Self {
            min,
            max,
            normal: normal.normalize(),
            color: Color::ONE,
        }
    }
}

impl Light for RectangularLight {
    fn color(&self) -> Color {
        self.color
    }

    fn emit<R: Rng + ?Sized>(&self, rng: &mut R) -> Ray {
        let origin = self.random_point(rng);
        Ray::new(origin, cosine_about(self.normal, rng))
    }

    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec3 {
        let t = DVec3::new(rng.random(), rng.random(), rng.random());
        self.min + (self.max - self.min) * t
    }
}

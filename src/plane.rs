//! Minimal scene of infinite planes, enough to drive photon tracing.

use glam::DVec3;

use crate::scene::{Hit, Light, Material, Ray, Scene};

const PARALLEL_EPSILON: f64 = 1e-9;

/// Infinite plane through `point` with unit `normal`. Intersected from both sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Any point on the plane.
    pub point: DVec3,
    /// Unit normal reported at every hit.
    pub normal: DVec3,
    /// Surface material.
    pub material: Material,
}

impl Plane {
    /// Creates a plane; `normal` is normalized.
    pub fn new(point: DVec3, normal: DVec3, material: Material) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }

    /// Intersection with `ray` for `t` in `[t_min, t_max]`.
    pub fn intersect(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if t < t_min || t > t_max {
            return None;
        }
        Some(Hit {
            t,
            point: ray.at(t),
            normal: self.normal,
            material: self.material,
        })
    }
}

/// A set of planes lit by lights of one type.
#[derive(Clone, Debug)]
pub struct PlaneScene<L> {
    /// Geometry.
    pub planes: Vec<Plane>,
    /// Light sources; photons are emitted from the first.
    pub lights: Vec<L>,
}

impl<L> PlaneScene<L> {
    /// Creates a scene.
    pub fn new(planes: Vec<Plane>, lights: Vec<L>) -> Self {
        Self { planes, lights }
    }
}

impl<L: Light> Scene for PlaneScene<L> {
    type Light = L;

    fn intersect(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;
        for plane in &self.planes {
            let limit = nearest.map_or(t_max, |hit| hit.t);
            if let Some(hit) = plane.intersect(ray, t_min, limit) {
                nearest = Some(hit);
            }
        }
        nearest
    }

    fn lights(&self) -> &[L] {
        &self.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::PointLight;
    use crate::scene::Color;

    #[test]
    fn test_plane_hit_and_miss() {
        let floor = Plane::new(DVec3::ZERO, DVec3::Y, Material::lambertian(Color::ONE));
        let down = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::NEG_Y);
        let hit = floor.intersect(&down, 0.1, f64::INFINITY).unwrap();
        assert_eq!(hit.point, DVec3::new(1.0, 0.0, 3.0));
        assert_eq!(hit.t, 2.0);

        let up = Ray::new(DVec3::new(0.0, 2.0, 0.0), DVec3::Y);
        assert!(floor.intersect(&up, 0.1, f64::INFINITY).is_none());

        let parallel = Ray::new(DVec3::new(0.0, 2.0, 0.0), DVec3::X);
        assert!(floor.intersect(&parallel, 0.1, f64::INFINITY).is_none());
    }

    #[test]
    fn test_scene_returns_nearest() {
        let scene = PlaneScene::new(
            vec![
                Plane::new(DVec3::ZERO, DVec3::Y, Material::Specular),
                Plane::new(DVec3::new(0.0, 1.0, 0.0), DVec3::Y, Material::lambertian(Color::ONE)),
            ],
            vec![PointLight::new(DVec3::new(0.0, 5.0, 0.0))],
        );
        let ray = Ray::new(DVec3::new(0.0, 3.0, 0.0), DVec3::NEG_Y);
        let hit = scene.intersect(&ray, 0.0, f64::INFINITY).unwrap();
        assert_eq!(hit.point.y, 1.0);
        assert!(hit.material.retains_photons());
        assert_eq!(scene.lights().len(), 1);
    }
}

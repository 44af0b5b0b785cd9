//! Photon map: stochastic light transport recorded in a k-d tree and read back
//! as a radiance density estimate.
//!
//! Building traces `photons` samples from the scene's first light. Each time a
//! path lands on a Lambertian surface the carried radiance is attenuated by the
//! albedo and the cosine to the incoming direction, a photon is recorded (direct
//! hits only when configured) and the radiance is scaled by the surface
//! reflectivity before the path continues in a cosine-weighted direction.
//!
//! Photon storage is owned by the caller and borrowed by the map, so the photons
//! and the index over them live and die together.

use std::f64::consts::PI;
use std::io::Write;

use glam::DVec3;
use rand::Rng;

use crate::error::{Error, Result};
use crate::kdtree::{KdTree, KnnScratch};
use crate::point::KdPoint;
use crate::sampling::cosine_about;
use crate::scene::{Color, Light, Ray, Scene};
use crate::timing::Timed;

/// Photons gathered per radiance query unless the renderer asks otherwise.
pub const DEFAULT_QUERY_PHOTONS: usize = 50;

/// Tunables for [`PhotonMap::build`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotonMapConfig {
    /// Photon budget; storage is reserved for exactly this many.
    pub photons: usize,
    /// Record photons on a path's first hit.
    pub include_direct_lighting: bool,
    /// Bounces after which a path is dropped.
    pub max_depth: u32,
    /// Scale applied to the light color at emission.
    pub emission_scale: f64,
    /// Smallest ray parameter accepted as a hit, to step off the last surface.
    pub min_distance: f64,
    /// A path ends once every channel of its radiance is below this.
    pub cutoff: f64,
    /// Paths emitted per budgeted photon before tracing gives up.
    pub max_paths_per_photon: usize,
}

impl Default for PhotonMapConfig {
    fn default() -> Self {
        Self {
            photons: 10_000,
            include_direct_lighting: true,
            max_depth: 10,
            emission_scale: 1.0,
            min_distance: 0.1,
            cutoff: 0.001,
            max_paths_per_photon: 64,
        }
    }
}

impl PhotonMapConfig {
    /// Default configuration with a photon budget of `photons`.
    pub fn new(photons: usize) -> Self {
        Self {
            photons,
            ..Self::default()
        }
    }

    /// Sets whether first hits are recorded.
    #[must_use]
    pub fn with_direct_lighting(mut self, include: bool) -> Self {
        self.include_direct_lighting = include;
        self
    }

    /// Sets the bounce limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the emission scale.
    #[must_use]
    pub fn with_emission_scale(mut self, scale: f64) -> Self {
        self.emission_scale = scale;
        self
    }

    /// Sets the minimum hit distance.
    #[must_use]
    pub fn with_min_distance(mut self, distance: f64) -> Self {
        self.min_distance = distance;
        self
    }

    /// Sets the radiance cutoff.
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Sets the path cap per budgeted photon.
    #[must_use]
    pub fn with_max_paths_per_photon(mut self, paths: usize) -> Self {
        self.max_paths_per_photon = paths;
        self
    }
}

/// A recorded photon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Photon {
    /// Where the photon landed.
    pub location: DVec3,
    /// Unit vector from the landing point back along the arriving ray.
    pub direction: DVec3,
    /// Radiance carried on arrival.
    pub power: Color,
}

impl KdPoint for Photon {
    #[inline]
    fn coordinate(&self, axis: usize) -> f64 {
        self.location[axis]
    }
}

/// Photons indexed for radiance queries.
#[derive(Debug)]
pub struct PhotonMap<'a> {
    tree: KdTree<'a, Photon>,
    number_emitted: usize,
}

impl<'a> PhotonMap<'a> {
    /// Traces photons through `scene` into `storage` and indexes them.
    ///
    /// `storage` is cleared and reserved for exactly `config.photons` photons.
    /// Only the scene's first light emits.
    ///
    /// # Errors
    /// [`Error::NoLights`] if photons are requested from a scene without lights,
    /// [`Error::Starved`] if `config.photons * config.max_paths_per_photon` paths
    /// were emitted without filling the budget.
    pub fn build<S, R>(
        storage: &'a mut Vec<Photon>,
        scene: &S,
        config: &PhotonMapConfig,
        rng: &mut R,
    ) -> Result<Self>
    where
        S: Scene,
        R: Rng + ?Sized,
    {
        let _t = Timed::info("photon map build");
        let number_emitted = trace(storage, scene, config, rng)?;
        let photons: &'a mut [Photon] = storage;
        let stored = photons.len();
        let tree = KdTree::build(3, photons, rng)?;
        log::info!("photon map: stored {stored} photons from {number_emitted} emitted paths");

        Ok(Self {
            tree,
            number_emitted,
        })
    }

    /// Estimates radiance arriving at `point` on a surface facing `normal`.
    ///
    /// Gathers the `k` nearest photons (approximately when `eps > 0`), keeps the
    /// ones that arrived from the `normal` side and divides their summed power by
    /// `π r² · number_emitted`, where `r` is the distance to the farthest photon
    /// gathered. Returns black when nothing can be estimated.
    pub fn query(&self, point: DVec3, normal: DVec3, k: usize, eps: f64) -> Color {
        self.query_with(&mut self.tree.scratch(), point, normal, k, eps)
    }

    /// [`query`](Self::query) reusing caller-provided search state.
    pub fn query_with(
        &self,
        scratch: &mut KnnScratch,
        point: DVec3,
        normal: DVec3,
        k: usize,
        eps: f64,
    ) -> Color {
        let hits = self.tree.knn_with(scratch, k, &point, eps);
        let Some(farthest) = hits.last() else {
            return Color::ZERO;
        };

        let area = PI * farthest.dist_sq * self.number_emitted as f64;
        if !(area > 0.0 && area.is_finite()) {
            return Color::ZERO;
        }

        let gathered: Color = hits
            .iter()
            .filter(|hit| hit.point.direction.dot(normal) >= 0.0)
            .map(|hit| hit.point.power)
            .sum();
        gathered / area
    }

    /// Writes the photons as text: the count, then `x y z r g b` per line.
    ///
    /// # Errors
    /// [`Error::Io`] if writing fails.
    pub fn write_dump<W: Write>(&self, mut out: W) -> Result<()> {
        let photons = self.photons();
        writeln!(out, "{}", photons.len())?;
        for p in photons {
            writeln!(
                out,
                "{:.6} {:.6} {:.6} {:.6} {:.6} {:.6}",
                p.location.x, p.location.y, p.location.z, p.power.x, p.power.y, p.power.z
            )?;
        }
        out.flush()?;
        Ok(())
    }

    /// Recorded photons, in index order.
    pub fn photons(&self) -> &'a [Photon] {
        self.tree.points()
    }

    /// Number of recorded photons.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True if no photons were recorded.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Paths emitted while building, including those that recorded nothing.
    pub fn number_emitted(&self) -> usize {
        self.number_emitted
    }

    /// The index over the photons.
    pub fn tree(&self) -> &KdTree<'a, Photon> {
        &self.tree
    }

    /// Creates search state for [`query_with`](Self::query_with).
    pub fn scratch(&self) -> KnnScratch {
        self.tree.scratch()
    }
}

/// Fills `photons` up to the budget and returns the number of paths emitted.
fn trace<S, R>(photons: &mut Vec<Photon>, scene: &S, config: &PhotonMapConfig, rng: &mut R) -> Result<usize>
where
    S: Scene,
    R: Rng + ?Sized,
{
    photons.clear();
    photons.reserve_exact(config.photons);
    if config.photons == 0 {
        return Ok(0);
    }

    let lights = scene.lights();
    let Some(light) = lights.first() else {
        return Err(Error::NoLights);
    };
    if lights.len() > 1 {
        log::warn!(
            "photon map: scene has {} lights, only the first emits photons",
            lights.len()
        );
    }

    let max_paths = config.photons.saturating_mul(config.max_paths_per_photon.max(1));
    let mut emitted = 0;

    while photons.len() < config.photons {
        if emitted >= max_paths {
            return Err(Error::Starved {
                stored: photons.len(),
                requested: config.photons,
                emitted,
            });
        }
        emitted += 1;

        let mut ray = light.emit(rng);
        let mut power = light.color() * config.emission_scale;

        while ray.depth < config.max_depth && photons.len() < config.photons {
            let Some(hit) = scene.intersect(&ray, config.min_distance, f64::INFINITY) else {
                break;
            };

            // Other materials pass the path on with its radiance unchanged.
            if let Some((albedo, reflectivity)) = hit.material.diffuse_response() {
                // Lights may emit unnormalized directions.
                let direction = (-ray.direction).normalize_or_zero();
                let c = hit.normal.dot(direction);
                if c > 0.0 {
                    power *= albedo * c;
                }
                if config.include_direct_lighting || ray.depth > 0 {
                    photons.push(Photon {
                        location: hit.point,
                        direction,
                        power,
                    });
                }
                power *= reflectivity;
            }

            if power.max_element() < config.cutoff {
                break;
            }

            ray = Ray {
                origin: hit.point,
                direction: cosine_about(hit.normal, rng),
                depth: ray.depth + 1,
            };
        }
    }

    Ok(emitted)
}

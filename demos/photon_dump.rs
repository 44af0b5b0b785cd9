//! Traces a photon map through a lit box and writes it as a text dump.
//!
//! The dump is a photon count followed by one `x y z r g b` line per photon.
//! Run with `RUST_LOG=info cargo run --example photon_dump -- [photons] [output]`;
//! without an output path the dump goes to stdout.

use std::fs::File;
use std::io::{self, BufWriter};

use glam::DVec3;
use photon_kdtree::{
    DEFAULT_QUERY_PHOTONS, Material, PhotonMap, PhotonMapConfig, Plane, PlaneScene, RectangularLight,
};
use rand::SeedableRng;

fn box_scene() -> PlaneScene<RectangularLight> {
    let white = Material::lambertian(DVec3::splat(0.75));
    let red = Material::lambertian(DVec3::new(0.75, 0.25, 0.25));
    let blue = Material::lambertian(DVec3::new(0.25, 0.25, 0.75));
    PlaneScene::new(
        vec![
            Plane::new(DVec3::ZERO, DVec3::Y, white),
            Plane::new(DVec3::new(0.0, 10.0, 0.0), DVec3::NEG_Y, white),
            Plane::new(DVec3::new(-5.0, 0.0, 0.0), DVec3::X, red),
            Plane::new(DVec3::new(5.0, 0.0, 0.0), DVec3::NEG_X, blue),
            Plane::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z, white),
            Plane::new(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z, Material::Specular),
        ],
        vec![RectangularLight::new(
            DVec3::new(-1.0, 9.9, -1.0),
            DVec3::new(1.0, 9.9, 1.0),
            DVec3::NEG_Y,
        )],
    )
}

fn run() -> photon_kdtree::Result<()> {
    let mut args = std::env::args().skip(1);
    let photons: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(10_000);
    let output = args.next();

    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    let mut storage = Vec::new();
    let map = PhotonMap::build(&mut storage, &box_scene(), &PhotonMapConfig::new(photons), &mut rng)?;

    let floor = map.query(DVec3::ZERO, DVec3::Y, DEFAULT_QUERY_PHOTONS, 0.0);
    let wall = map.query(DVec3::new(-5.0, 5.0, 0.0), DVec3::X, DEFAULT_QUERY_PHOTONS, 0.0);
    log::info!("radiance at floor center {floor}, at red wall {wall}");

    match output {
        Some(path) => map.write_dump(BufWriter::new(File::create(path)?)),
        None => map.write_dump(io::stdout().lock()),
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

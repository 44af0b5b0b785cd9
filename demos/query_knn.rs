//! Builds a k-d tree over random points and prints the neighbors of a few queries.
//!
//! Run with `RUST_LOG=debug cargo run --example query_knn -- [points] [k] [eps]`.

use photon_kdtree::KdTree;
use rand::Rng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let num_points: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(10_000);
    let k: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(5);
    let eps: f64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(0.0);

    let mut rng = rand::rngs::StdRng::seed_from_u64(95756739);
    let mut points: Vec<[f64; 3]> = (0..num_points)
        .map(|_| [rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)])
        .collect();

    let tree = match KdTree::build(3, &mut points, &mut rng) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let mut scratch = tree.scratch();
    for query in [[0.0, 0.0, 0.0], [0.5, -0.5, 0.25], [2.0, 2.0, 2.0]] {
        let hits = tree.knn_with(&mut scratch, k, &query, eps);
        println!(
            "query {:?}: {} neighbors, {} nodes visited",
            query,
            hits.len(),
            scratch.nodes_visited()
        );
        for hit in hits {
            println!(
                "  [{:>8.4}, {:>8.4}, {:>8.4}]  dist {:.5}",
                hit.point[0],
                hit.point[1],
                hit.point[2],
                hit.dist_sq.sqrt()
            );
        }
    }
}

//! Build and k-nearest-neighbor query timings for KdTree over uniform 3D points

use photon_kdtree::KdTree;
use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;

fn main() {
    println!("KdTree k-NN Benchmark");
    println!("=====================\n");

    let num_items = 1_000_000;
    let num_tests = 10_000;

    // Fixed seed for reproducibility
    let seed = 95756739_u64;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    // Random points in a 100x100x100 cube
    let mut points: Vec<[f64; 3]> = (0..num_items)
        .map(|_| {
            [
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..100.0),
            ]
        })
        .collect();

    let queries: Vec<[f64; 3]> = (0..num_tests)
        .map(|_| {
            [
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..100.0),
            ]
        })
        .collect();

    let build_start = Instant::now();
    let tree = match KdTree::build(3, &mut points, &mut rng) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("build failed: {err}");
            return;
        }
    };
    let build_total = build_start.elapsed();
    println!("build kd-tree {} items: {:>12.2}ms\n", num_items, build_total.as_secs_f64() * 1000.0);

    println!("{:<28} {:>12} {:>16}", "query", "time", "nodes/query");
    println!("{}", "-".repeat(58));

    let mut scratch = tree.scratch();
    for (k, eps) in [(1, 0.0), (10, 0.0), (50, 0.0), (50, 0.5), (50, 2.0), (200, 0.0)] {
        let mut visited = 0;
        let query_start = Instant::now();
        for q in &queries {
            let hits = tree.knn_with(&mut scratch, k, q, eps);
            std::hint::black_box(hits);
            visited += scratch.nodes_visited();
        }
        let elapsed = query_start.elapsed();
        println!(
            "knn k={:<4} eps={:<4}          {:>12.2}ms {:>16.1}",
            k,
            eps,
            elapsed.as_secs_f64() * 1000.0,
            visited as f64 / num_tests as f64
        );
    }

    let query_start = Instant::now();
    for q in &queries {
        std::hint::black_box(tree.locate(q));
    }
    let elapsed = query_start.elapsed();
    println!("locate {:>26} {:>12.2}ms", "", elapsed.as_secs_f64() * 1000.0);
}

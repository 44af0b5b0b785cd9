//! Comparison tests between KdTree search and a brute-force linear scan
//! These tests verify exactness at eps = 0, the (1 + eps) bound otherwise,
//! and that one tree serves concurrent readers

#[cfg(test)]
mod tests {
    use crate::{KdTree, distance_sq};
    use rand::{Rng, SeedableRng};

    fn random_points<R: Rng>(rng: &mut R, n: usize, dim: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|_| (0..dim).map(|_| rng.random_range(-100.0..100.0)).collect())
            .collect()
    }

    fn grid_points(n: usize, dim: usize) -> Vec<Vec<f64>> {
        // Heavy ties on every axis.
        (0..n).map(|i| (0..dim).map(|axis| ((i >> axis) % 4) as f64).collect()).collect()
    }

    fn brute_force(points: &[Vec<f64>], query: &[f64], k: usize, dim: usize) -> Vec<f64> {
        let mut dists: Vec<f64> = points.iter().map(|p| distance_sq(p, query, dim)).collect();
        dists.sort_by(f64::total_cmp);
        dists.truncate(k);
        dists
    }

    // ============================================================================
    // EXACT SEARCH
    // ============================================================================

    #[test]
    fn test_exact_knn_matches_brute_force() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(95756739);
        for dim in 1..=4 {
            for n in [1, 2, 5, 33, 250, 1000] {
                let mut points = random_points(&mut rng, n, dim);
                let unordered = points.clone();
                let tree = KdTree::build(dim, &mut points, &mut rng).unwrap();
                let mut scratch = tree.scratch();

                for _ in 0..20 {
                    let query: Vec<f64> = (0..dim).map(|_| rng.random_range(-120.0..120.0)).collect();
                    for k in [1, 3, 10, n] {
                        let expected = brute_force(&unordered, &query, k, dim);
                        let actual: Vec<f64> = tree
                            .knn_with(&mut scratch, k, &query, 0.0)
                            .iter()
                            .map(|h| h.dist_sq)
                            .collect();
                        assert_eq!(actual, expected, "dim = {dim}, n = {n}, k = {k}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_exact_knn_with_ties_matches_brute_force() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(17);
        for dim in 1..=3 {
            let mut points = grid_points(300, dim);
            let unordered = points.clone();
            let tree = KdTree::build(dim, &mut points, &mut rng).unwrap();

            for _ in 0..30 {
                let query: Vec<f64> = (0..dim).map(|_| rng.random_range(0..4) as f64).collect();
                for k in [1, 8, 40] {
                    let expected = brute_force(&unordered, &query, k, dim);
                    let actual: Vec<f64> = tree.knn(k, &query, 0.0).iter().map(|h| h.dist_sq).collect();
                    assert_eq!(actual, expected, "dim = {dim}, k = {k}, query = {query:?}");
                }
            }
        }
    }

    #[test]
    fn test_returned_points_carry_their_distance() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut points = random_points(&mut rng, 400, 3);
        let tree = KdTree::build(3, &mut points, &mut rng).unwrap();
        let query = [1.0, -2.0, 3.0];
        for hit in tree.knn(25, &query[..], 0.0) {
            assert_eq!(distance_sq(hit.point, &query[..], 3), hit.dist_sq);
            assert_eq!(tree.point(hit.node), hit.point);
        }
    }

    // ============================================================================
    // APPROXIMATE SEARCH
    // ============================================================================

    #[test]
    fn test_approximate_knn_within_bound() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        for dim in 1..=4 {
            let mut points = random_points(&mut rng, 2000, dim);
            let unordered = points.clone();
            let tree = KdTree::build(dim, &mut points, &mut rng).unwrap();
            let mut scratch = tree.scratch();

            for eps in [0.1, 0.5, 1.0, 4.0] {
                for _ in 0..20 {
                    let query: Vec<f64> = (0..dim).map(|_| rng.random_range(-100.0..100.0)).collect();
                    let k = 12;
                    let truth = brute_force(&unordered, &query, k, dim);
                    let kth = truth[k - 1];

                    let hits = tree.knn_with(&mut scratch, k, &query, eps);
                    assert_eq!(hits.len(), k, "Approximate search should still fill k");
                    for hit in &hits {
                        assert!(
                            hit.dist_sq <= (1.0 + eps) * kth * (1.0 + 1e-12),
                            "dim = {dim}, eps = {eps}: {} exceeds (1 + eps) * {kth}",
                            hit.dist_sq
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_approximate_search_visits_fewer_nodes() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(123);
        let mut points = random_points(&mut rng, 20_000, 3);
        let tree = KdTree::build(3, &mut points, &mut rng).unwrap();
        let mut scratch = tree.scratch();

        let (mut exact, mut approx) = (0, 0);
        for _ in 0..50 {
            let query: Vec<f64> = (0..3).map(|_| rng.random_range(-100.0..100.0)).collect();
            let hits = tree.knn_with(&mut scratch, 16, &query, 0.0);
            assert_eq!(hits.len(), 16);
            exact += scratch.nodes_visited();
            let hits = tree.knn_with(&mut scratch, 16, &query, 2.0);
            assert_eq!(hits.len(), 16);
            approx += scratch.nodes_visited();
        }
        assert!(approx <= exact, "eps > 0 should never widen the search: {approx} vs {exact}");
    }

    // ============================================================================
    // CONCURRENT READERS
    // ============================================================================

    #[test]
    fn test_concurrent_readers() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
        let mut points: Vec<[f64; 3]> = (0..5000)
            .map(|_| [rng.random_range(0.0..1.0), rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)])
            .collect();
        let tree = KdTree::build(3, &mut points, &mut rng).unwrap();
        let queries: Vec<[f64; 3]> = (0..400)
            .map(|_| [rng.random_range(0.0..1.0), rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)])
            .collect();

        let sequential: Vec<Vec<f64>> = queries
            .iter()
            .map(|q| tree.knn(8, q, 0.0).iter().map(|h| h.dist_sq).collect())
            .collect();

        let parallel: Vec<Vec<Vec<f64>>> = std::thread::scope(|s| {
            let handles: Vec<_> = queries
                .chunks(100)
                .map(|chunk| {
                    let tree = &tree;
                    s.spawn(move || {
                        let mut scratch = tree.scratch();
                        chunk
                            .iter()
                            .map(|q| tree.knn_with(&mut scratch, 8, q, 0.0).iter().map(|h| h.dist_sq).collect())
                            .collect::<Vec<Vec<f64>>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let parallel: Vec<Vec<f64>> = parallel.into_iter().flatten().collect();
        assert_eq!(parallel, sequential, "Readers with their own scratch should agree");
    }
}

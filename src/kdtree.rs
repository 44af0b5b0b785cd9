//! Arena-backed k-d tree with best-first, optionally approximate, k-nearest-neighbor search.
//!
//! The tree never owns its points. [`KdTree::build`] reorders the caller's slice in
//! place (randomized quickselect around an even-biased median) and keeps a shared
//! borrow of it, so the index cannot outlive or observe a moved array.
//!
//! Nodes live in one `Vec` allocated for exactly `n` nodes and filled in pre-order:
//! a node's left child, when present, is always the next slot and its right child
//! index is stored explicitly.
//!
//! Search is branch-and-bound over two queues: a [`Frontier`] of subtrees ordered
//! by split-plane distance, and a [`TopK`] holding the best squared distances
//! found so far. See [`KdTree::search`].

use rand::Rng;

use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::point::{KdPoint, compare_on_axis, distance_sq};
use crate::timing::Timed;
use crate::top_k::TopK;

/// Index of a node in a tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in the arena (pre-order).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn from_index(index: usize) -> Self {
        Self(narrow(index))
    }
}

#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "point counts are checked against u32::MAX before building"
)]
fn narrow(index: usize) -> u32 {
    index as u32
}

/// One arena slot: a point, the split it introduces and links to its children.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    median: f64,
    point: u32,
    axis: u32,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    /// Position of this node's point in the (reordered) point slice.
    #[inline]
    pub fn point_index(&self) -> usize {
        self.point as usize
    }

    /// Value of the node's point on the splitting axis.
    #[inline]
    pub fn median(&self) -> f64 {
        self.median
    }

    /// Splitting axis.
    #[inline]
    pub fn axis(&self) -> usize {
        self.axis as usize
    }

    /// Left child; always the next arena slot when present.
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child.
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// True if the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A search hit: the point, the node holding it and its squared distance to the query.
#[derive(Debug)]
pub struct Neighbor<'a, P> {
    /// The neighboring point.
    pub point: &'a P,
    /// Node holding the point.
    pub node: NodeId,
    /// Squared Euclidean distance to the query.
    pub dist_sq: f64,
}

impl<P> Clone for Neighbor<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Neighbor<'_, P> {}

/// Mutable per-query search state.
///
/// Reuse one scratch across queries to avoid reallocating the frontier.
/// A scratch must not be shared between concurrent searches; give each reader
/// thread its own.
#[derive(Clone, Debug, Default)]
pub struct KnnScratch {
    frontier: Frontier<NodeId>,
    nodes_visited: usize,
}

impl KnnScratch {
    /// Creates a scratch whose frontier starts with room for `capacity` subtrees.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frontier: Frontier::with_capacity(capacity),
            nodes_visited: 0,
        }
    }

    /// Nodes whose point was measured by the most recent search.
    pub fn nodes_visited(&self) -> usize {
        self.nodes_visited
    }
}

/// A static k-d tree over a borrowed slice of points.
///
/// # Examples
/// ```
/// use photon_kdtree::KdTree;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let mut points = [[0.0, 0.0], [3.0, 1.0], [1.0, 1.0], [8.0, 8.0]];
/// let tree = KdTree::build(2, &mut points, &mut rng).unwrap();
///
/// let hits = tree.knn(2, &[0.9, 0.8], 0.0);
/// assert_eq!(*hits[0].point, [1.0, 1.0]);
/// assert_eq!(*hits[1].point, [0.0, 0.0]);
/// ```
#[derive(Debug)]
pub struct KdTree<'a, P> {
    points: &'a [P],
    nodes: Vec<Node>,
    dim: usize,
}

impl<'a, P: KdPoint> KdTree<'a, P> {
    /// Builds a tree over `points`, splitting on axes `0..dim`.
    ///
    /// The slice is reordered in place and stays borrowed for the tree's lifetime.
    /// `rng` drives quickselect pivot choice; a seeded generator makes the layout
    /// reproducible.
    ///
    /// # Errors
    /// [`Error::ZeroDimension`] if `dim` is zero and `points` is not empty, and
    /// [`Error::TooManyPoints`] if `points` has more than `u32::MAX` elements.
    pub fn build<R: Rng + ?Sized>(dim: usize, points: &'a mut [P], rng: &mut R) -> Result<Self> {
        let n = points.len();
        if n == 0 {
            return Ok(Self {
                points,
                nodes: Vec::new(),
                dim,
            });
        }
        if dim == 0 {
            return Err(Error::ZeroDimension { points: n });
        }
        if u32::try_from(n).is_err() {
            return Err(Error::TooManyPoints { points: n });
        }

        let _t = Timed::debug("kd-tree build");
        let mut builder = Builder {
            points: &mut *points,
            nodes: Vec::with_capacity(n),
            dim,
            rng,
        };
        let root = builder.subtree(0, n, 0);
        debug_assert_eq!(root.map(NodeId::index), Some(0), "root should occupy the first slot");
        let nodes = builder.nodes;
        debug_assert_eq!(nodes.len(), n, "arena should hold exactly one node per point");
        log::debug!("kd-tree: indexed {n} points in {dim} dimensions");

        Ok(Self { points, nodes, dim })
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no points are indexed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dimensionality the tree was built with.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Root node, `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    /// The node arena in pre-order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node by id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// The point held by node `id`.
    pub fn point(&self, id: NodeId) -> &'a P {
        let points: &'a [P] = self.points;
        &points[self.nodes[id.index()].point_index()]
    }

    /// The indexed points, in tree order.
    pub fn points(&self) -> &'a [P] {
        self.points
    }

    /// Creates a search scratch sized for this tree.
    pub fn scratch(&self) -> KnnScratch {
        let depth = self.len().max(1).ilog2() as usize;
        KnnScratch::with_capacity(depth.max(32))
    }

    /// Walks from the root to the node whose region contains `query`.
    ///
    /// At each node the walk goes left if `query[axis] < median`, right otherwise,
    /// and stops at a leaf or where the chosen child does not exist. The tree keeps
    /// no bounding volume, so for queries outside the hull of the indexed points the
    /// returned node is arbitrary (but valid). Returns `None` for an empty tree.
    pub fn locate<Q: KdPoint + ?Sized>(&self, query: &Q) -> Option<NodeId> {
        let mut id = self.root()?;
        loop {
            let node = self.node(id);
            let next = if query.coordinate(node.axis()) < node.median {
                node.left
            } else {
                node.right
            };
            match next {
                Some(child) => id = child,
                None => return Some(id),
            }
        }
    }

    /// Finds the single exact nearest neighbor of `query`.
    pub fn nn<Q: KdPoint + ?Sized>(&self, query: &Q) -> Option<NodeId> {
        let mut results = TopK::new(1);
        self.search(&mut self.scratch(), &mut results, query, 0.0);
        results.pop().map(|e| e.item)
    }

    /// Finds the `k` nearest neighbors of `query`, closest first.
    ///
    /// With `eps > 0` the search may skip subtrees that could only improve the
    /// result by a factor of `1 + eps`. `eps` must be non-negative. Fewer than `k`
    /// neighbors are returned when the tree holds fewer points.
    pub fn knn<Q: KdPoint + ?Sized>(&self, k: usize, query: &Q, eps: f64) -> Vec<Neighbor<'a, P>> {
        self.knn_with(&mut self.scratch(), k, query, eps)
    }

    /// [`knn`](Self::knn) reusing caller-provided search state.
    pub fn knn_with<Q: KdPoint + ?Sized>(
        &self,
        scratch: &mut KnnScratch,
        k: usize,
        query: &Q,
        eps: f64,
    ) -> Vec<Neighbor<'a, P>> {
        let mut results = TopK::new(k.min(self.len()));
        self.search(scratch, &mut results, query, eps);
        self.drain(results)
    }

    /// Runs the branch-and-bound search, accumulating into `results`.
    ///
    /// `results` may already hold candidate nodes (for example the neighbors of a
    /// nearby earlier query); they tighten pruning from the start. Its capacity is
    /// the `k` of the search. Priorities in `results` are squared distances.
    ///
    /// The frontier stores negated, un-squared split-plane distances so that the
    /// max-heap yields the closest subtree first. Each popped subtree is walked
    /// straight down its near side, pushing far siblings that may still hold a
    /// point within `(1 + eps)` of the current worst result.
    pub fn search<Q: KdPoint + ?Sized>(
        &self,
        scratch: &mut KnnScratch,
        results: &mut TopK<NodeId>,
        query: &Q,
        eps: f64,
    ) {
        debug_assert!(eps >= 0.0, "eps must be non-negative, got {eps}");
        scratch.frontier.clear();
        scratch.nodes_visited = 0;

        let Some(root) = self.root() else {
            return;
        };
        if results.capacity() == 0 {
            return;
        }

        let scale = 1.0 + eps;
        scratch.frontier.push(-0.0, root);

        while let Some(entry) = scratch.frontier.pop() {
            // Frontier bounds are un-squared; result priorities are squared.
            let bound = -entry.priority;
            if results.is_full() && scale * bound * bound >= results.bound() {
                // Everything left in the frontier is at least this far.
                break;
            }

            let mut cursor = Some(entry.item);
            while let Some(id) = cursor {
                scratch.nodes_visited += 1;
                let node = &self.nodes[id.index()];

                let d2 = distance_sq(&self.points[node.point_index()], query, self.dim);
                results.push(d2, id);

                let diff = query.coordinate(node.axis()) - node.median;
                let (near, far) = if diff < 0.0 {
                    (node.left, node.right)
                } else {
                    (node.right, node.left)
                };

                if let Some(far) = far {
                    if scale * diff * diff < results.bound() {
                        scratch.frontier.push(-diff.abs(), far);
                    }
                }

                cursor = near;
            }
        }

        log::trace!(
            "kd-tree: knn visited {} of {} nodes",
            scratch.nodes_visited,
            self.nodes.len()
        );
    }

    /// Collects every point in the subtree rooted at `id`, in pre-order.
    pub fn subtree(&self, id: NodeId) -> Vec<&'a P> {
        let points: &'a [P] = self.points;
        let mut out = Vec::new();
        self.walk(id, |node| out.push(&points[node.point_index()]));
        out
    }

    /// Counts the points in the subtree rooted at `id`.
    pub fn subtree_len(&self, id: NodeId) -> usize {
        let mut count = 0;
        self.walk(id, |_| count += 1);
        count
    }

    fn walk(&self, id: NodeId, mut visit: impl FnMut(&Node)) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            visit(node);
            stack.extend(node.right);
            stack.extend(node.left);
        }
    }

    fn drain(&self, mut results: TopK<NodeId>) -> Vec<Neighbor<'a, P>> {
        let mut out = Vec::with_capacity(results.len());
        // Worst comes out first.
        while let Some(entry) = results.pop() {
            out.push(Neighbor {
                point: self.point(entry.item),
                node: entry.item,
                dist_sq: entry.priority,
            });
        }
        out.reverse();
        out
    }
}

struct Builder<'p, 'r, P, R: ?Sized> {
    points: &'p mut [P],
    nodes: Vec<Node>,
    dim: usize,
    rng: &'r mut R,
}

impl<P: KdPoint, R: Rng + ?Sized> Builder<'_, '_, P, R> {
    /// Builds the subtree over `points[start..end]` and returns its root.
    fn subtree(&mut self, start: usize, end: usize, depth: usize) -> Option<NodeId> {
        let count = end - start;
        if count == 0 {
            return None;
        }

        let id = NodeId::from_index(self.nodes.len());
        let axis = depth % self.dim;

        if count == 1 {
            self.nodes.push(Node {
                median: self.points[start].coordinate(axis),
                point: narrow(start),
                axis: narrow(axis),
                left: None,
                right: None,
            });
            return Some(id);
        }

        // Even-biased rank: floor(floor(n/2)/2)*2.
        let median_index = start + ((count / 2) >> 1 << 1);
        let median = self.select_order(median_index, start, end - 1, axis);

        self.nodes.push(Node {
            median,
            point: narrow(median_index),
            axis: narrow(axis),
            left: None,
            right: None,
        });

        let left = self.subtree(start, median_index, depth + 1);
        let right = self.subtree(median_index + 1, end, depth + 1);
        debug_assert!(
            left.is_none_or(|l| l.index() == id.index() + 1),
            "left child must follow its parent"
        );

        let node = &mut self.nodes[id.index()];
        node.left = left;
        node.right = right;
        Some(id)
    }

    /// Places the element of rank `rank` within `points[start..=end]` at `rank`,
    /// with smaller elements before it and larger ones after, and returns its
    /// coordinate on `axis`.
    fn select_order(&mut self, rank: usize, start: usize, end: usize, axis: usize) -> f64 {
        let (mut lo, mut hi) = (start, end);
        loop {
            if lo == hi {
                return self.points[lo].coordinate(axis);
            }
            let pivot = self.partition(lo, hi, axis);
            match rank.cmp(&pivot) {
                std::cmp::Ordering::Equal => return self.points[pivot].coordinate(axis),
                std::cmp::Ordering::Less => hi = pivot - 1,
                std::cmp::Ordering::Greater => lo = pivot + 1,
            }
        }
    }

    /// Lomuto partition of `points[lo..=hi]` around a uniformly random pivot.
    fn partition(&mut self, lo: usize, hi: usize, axis: usize) -> usize {
        let pivot = self.rng.random_range(lo..=hi);
        self.points.swap(pivot, hi);

        let mut store = lo;
        for j in lo..hi {
            if compare_on_axis(&self.points[j], &self.points[hi], axis, self.dim).is_lt() {
                self.points.swap(store, j);
                store += 1;
            }
        }
        self.points.swap(store, hi);
        store
    }
}

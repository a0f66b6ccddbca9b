//! High-level passes over the fractal tree.
//!
//! The typical lifetime looks like:
//! 1. [`build_tree`] — once at startup: construct the whole tree and
//!    sample every leaf's fixed parameters.
//! 2. [`update_tree`] — every frame: re-derive each branch's segment in
//!    place from the live parameters; topology and leaves stay as built.
//! 3. [`draw_tree`] — every frame, after updating: walk the tree up to
//!    the live render depth limit, emitting lines and leaf polygons.

use crate::{
    canvas::Canvas,
    config::Config,
    geometry::{Side, fork_end},
    leaf::Leaf,
    tree::{Branch, Segment},
    types::Depth,
};
use glam::Vec2;
use rand::Rng;

/// Builds the whole tree hanging off one segment, recursively.
///
/// Returns `None` once `depth` reaches `cfg.depth_max`; that bound is
/// the single termination rule and fixes the tree's size for good.
/// Otherwise the branch keeps `a` -> `b` as its baseline, grows leaves if
/// `depth` lies inside the configured eligible range, and forks two
/// mirror-image children off `b` via [`fork_end`], each one level deeper
/// with the same `angle` and `ratio`.
///
/// A branch earns `floor(length / cfg.len_per_leaf)` leaves; each leaf
/// samples its attachment ratio, side and color here, once, and never
/// again. Entropy is drawn in a fixed order (own leaves, then the whole
/// left subtree, then the right one), so a seeded RNG reproduces an
/// identical tree.
///
/// ### Parameters
/// - `a` - Start of this branch's segment (the parent's end point).
/// - `b` - End of this branch's segment.
/// - `angle` - Branching half-angle in radians, constant across the tree.
/// - `ratio` - Child/parent length ratio, constant across the tree.
/// - `depth` - Recursion depth of this call; the root starts at `0`.
/// - `cfg` - Fixed shape constants.
/// - `rng` - Entropy source for leaf parameters. Only this pass draws
///   from it; updating and drawing are entropy-free.
pub fn build_tree(
    a: Vec2,
    b: Vec2,
    angle: f32,
    ratio: f32,
    depth: Depth,
    cfg: &Config,
    rng: &mut impl Rng,
) -> Option<Box<Branch>> {
    if depth >= cfg.depth_max {
        return None;
    }

    let mut branch = Branch::new(a, b);

    if (cfg.leaf_depth_min..=cfg.leaf_depth_max).contains(&depth) {
        // One leaf per len_per_leaf of segment, rounded down.
        let count = (branch.line.length() / cfg.len_per_leaf) as usize;
        branch.leafs = (0..count).map(|_| Leaf::random(cfg, rng)).collect();
    }

    let left_end = fork_end(a, b, angle, ratio, Side::Left);
    let right_end = fork_end(a, b, angle, ratio, Side::Right);
    branch.left = build_tree(b, left_end, angle, ratio, depth + 1, cfg, rng);
    branch.right = build_tree(b, right_end, angle, ratio, depth + 1, cfg, rng);

    Some(Box::new(branch))
}

/// Re-derives the geometry of an existing tree, in place.
///
/// Stops silently once `depth` reaches `cfg.depth_max`, mirroring the
/// builder's bound. The branch's segment is replaced wholesale with
/// `a` -> `b`, then each *present* child is updated with its
/// [`fork_end`] endpoint and `depth + 1`. Children are never created or
/// removed and leaves are never touched: topology is fixed at build
/// time, which is what keeps the leaf randomization stable while the
/// live parameters reshape the tree.
///
/// ### Parameters
/// - `branch` - The subtree to reshape.
/// - `a`, `b` - The new segment end points for this branch.
/// - `angle`, `ratio` - Live shape parameters, constant across the tree.
/// - `depth` - Recursion depth of this call; the root starts at `0`.
/// - `cfg` - Fixed shape constants; `cfg.depth_max` must be the bound
///   the tree was built with.
pub fn update_tree(
    branch: &mut Branch,
    a: Vec2,
    b: Vec2,
    angle: f32,
    ratio: f32,
    depth: Depth,
    cfg: &Config,
) {
    if depth >= cfg.depth_max {
        return;
    }

    branch.line = Segment::new(a, b);

    if let Some(left) = branch.left.as_deref_mut() {
        let end = fork_end(a, b, angle, ratio, Side::Left);
        update_tree(left, b, end, angle, ratio, depth + 1, cfg);
    }
    if let Some(right) = branch.right.as_deref_mut() {
        let end = fork_end(a, b, angle, ratio, Side::Right);
        update_tree(right, b, end, angle, ratio, depth + 1, cfg);
    }
}

/// Draws the tree onto a [`Canvas`], up to a live depth limit.
///
/// Pre-order walk: once `depth` reaches `limit` the whole subtree is
/// skipped, leaves included. Otherwise the segment is emitted as a
/// line, every leaf as a filled polygon placed against the *current*
/// segment, and both present children follow with `depth + 1`.
///
/// `limit` is independent of the build-time `cfg.depth_max`: it gates
/// rendering only, so shallower and deeper cuts of the already-built
/// tree appear instantly without rebuilding anything.
pub fn draw_tree(
    branch: &Branch,
    depth: Depth,
    limit: Depth,
    cfg: &Config,
    canvas: &mut impl Canvas,
) {
    if depth >= limit {
        return;
    }

    canvas.line(branch.line.a, branch.line.b);
    for leaf in &branch.leafs {
        let points = leaf.polygon(branch.line.a, branch.line.b, cfg);
        canvas.polygon(&points, leaf.color);
    }

    if let Some(left) = branch.left.as_deref() {
        draw_tree(left, depth + 1, limit, cfg, canvas);
    }
    if let Some(right) = branch.right.as_deref() {
        draw_tree(right, depth + 1, limit, cfg, canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Canvas double that only counts what would have been drawn.
    #[derive(Default)]
    struct RecordingCanvas {
        lines: usize,
        polygons: usize,
    }

    impl Canvas for RecordingCanvas {
        fn line(&mut self, _a: Vec2, _b: Vec2) {
            self.lines += 1;
        }

        fn polygon(&mut self, _points: &[Vec2], _fill: Rgba) {
            self.polygons += 1;
        }
    }

    fn collect_leafs(branch: &Branch, out: &mut Vec<Leaf>) {
        out.extend(branch.leafs.iter().cloned());
        if let Some(left) = branch.left.as_deref() {
            collect_leafs(left, out);
        }
        if let Some(right) = branch.right.as_deref() {
            collect_leafs(right, out);
        }
    }

    fn assert_segments_match(x: &Branch, y: &Branch) {
        assert!(
            x.line.a.abs_diff_eq(y.line.a, 1e-3) && x.line.b.abs_diff_eq(y.line.b, 1e-3),
            "segment mismatch: {:?} vs {:?}",
            x.line,
            y.line
        );
        assert_eq!(x.left.is_some(), y.left.is_some());
        assert_eq!(x.right.is_some(), y.right.is_some());
        if let (Some(xl), Some(yl)) = (x.left.as_deref(), y.left.as_deref()) {
            assert_segments_match(xl, yl);
        }
        if let (Some(xr), Some(yr)) = (x.right.as_deref(), y.right.as_deref()) {
            assert_segments_match(xr, yr);
        }
    }

    #[test]
    fn build_returns_none_at_the_depth_bound() {
        let cfg = Config::default();
        let mut rng = StdRng::seed_from_u64(1);
        let trunk = Vec2::new(0.0, 100.0);

        assert!(build_tree(Vec2::ZERO, trunk, 0.3, 0.75, cfg.depth_max, &cfg, &mut rng).is_none());
        assert!(
            build_tree(Vec2::ZERO, trunk, 0.3, 0.75, cfg.depth_max + 5, &cfg, &mut rng).is_none()
        );
    }

    #[test]
    fn last_level_branches_have_no_children() {
        let cfg = Config::default();
        let mut rng = StdRng::seed_from_u64(1);

        let branch = build_tree(
            Vec2::ZERO,
            Vec2::new(0.0, 100.0),
            0.3,
            0.75,
            cfg.depth_max - 1,
            &cfg,
            &mut rng,
        )
        .unwrap();

        assert!(branch.left.is_none());
        assert!(branch.right.is_none());
    }

    #[test]
    fn full_build_is_a_complete_binary_tree() {
        let cfg = Config::default();
        let mut rng = StdRng::seed_from_u64(2);

        let tree = build_tree(
            Vec2::ZERO,
            Vec2::new(0.0, 130.0),
            20.0_f32.to_radians(),
            0.75,
            0,
            &cfg,
            &mut rng,
        )
        .unwrap();

        assert_eq!(tree.node_count(), (1 << cfg.depth_max) - 1);
        assert_eq!(tree.height(), cfg.depth_max);
    }

    #[test]
    fn leaf_count_follows_the_length_rule() {
        // depth 2 is leaf-eligible; with depth_max 3 the call builds a
        // single childless branch, so only its own leaves exist.
        let cfg = Config {
            depth_max: 3,
            ..Config::default()
        };
        let mut rng = StdRng::seed_from_u64(3);

        let exact =
            build_tree(Vec2::ZERO, Vec2::new(0.0, 90.0), 0.3, 0.75, 2, &cfg, &mut rng).unwrap();
        assert_eq!(exact.leafs.len(), 3);

        let short =
            build_tree(Vec2::ZERO, Vec2::new(0.0, 89.0), 0.3, 0.75, 2, &cfg, &mut rng).unwrap();
        assert_eq!(short.leafs.len(), 2);
    }

    #[test]
    fn no_leaves_outside_the_eligible_depths() {
        let cfg = Config::default();
        let mut rng = StdRng::seed_from_u64(4);

        let root = build_tree(
            Vec2::ZERO,
            Vec2::new(0.0, 300.0),
            0.3,
            0.75,
            0,
            &cfg,
            &mut rng,
        )
        .unwrap();
        // The trunk is too shallow to grow leaves; its descendants are not.
        assert!(root.leafs.is_empty());
        assert!(root.leaf_count() > 0);

        let deep = build_tree(
            Vec2::ZERO,
            Vec2::new(0.0, 300.0),
            0.3,
            0.75,
            cfg.leaf_depth_max + 1,
            &cfg,
            &mut rng,
        )
        .unwrap();
        assert_eq!(deep.leaf_count(), 0);
    }

    #[test]
    fn seeded_builds_are_identical() {
        let cfg = Config {
            depth_max: 5,
            ..Config::default()
        };
        let trunk = Vec2::new(0.0, 150.0);

        let first =
            build_tree(Vec2::ZERO, trunk, 0.35, 0.75, 0, &cfg, &mut StdRng::seed_from_u64(42))
                .unwrap();
        let second =
            build_tree(Vec2::ZERO, trunk, 0.35, 0.75, 0, &cfg, &mut StdRng::seed_from_u64(42))
                .unwrap();

        let (mut leafs_first, mut leafs_second) = (Vec::new(), Vec::new());
        collect_leafs(&first, &mut leafs_first);
        collect_leafs(&second, &mut leafs_second);

        assert!(!leafs_first.is_empty());
        assert_eq!(leafs_first, leafs_second);
    }

    #[test]
    fn update_reshapes_without_touching_topology() {
        let cfg = Config {
            depth_max: 3,
            ..Config::default()
        };
        let mut rng = StdRng::seed_from_u64(5);

        let mut tree = build_tree(
            Vec2::ZERO,
            Vec2::new(0.0, 120.0),
            0.4,
            0.8,
            0,
            &cfg,
            &mut rng,
        )
        .unwrap();

        let nodes_before = tree.node_count();
        let mut leafs_before = Vec::new();
        collect_leafs(&tree, &mut leafs_before);
        assert!(!leafs_before.is_empty());

        for _ in 0..100 {
            let angle = rng.random_range(0.0..std::f32::consts::FRAC_PI_2);
            let ratio = rng.random_range(0.3..0.9);
            let height = rng.random_range(10.0..300.0);
            update_tree(
                &mut tree,
                Vec2::ZERO,
                Vec2::new(0.0, height),
                angle,
                ratio,
                0,
                &cfg,
            );
        }

        let mut leafs_after = Vec::new();
        collect_leafs(&tree, &mut leafs_after);

        assert_eq!(tree.node_count(), nodes_before);
        assert_eq!(leafs_before, leafs_after);
    }

    #[test]
    fn update_matches_a_fresh_build_geometrically() {
        let cfg = Config {
            depth_max: 4,
            ..Config::default()
        };
        // Different seeds on purpose: geometry does not depend on entropy.
        let mut updated = build_tree(
            Vec2::ZERO,
            Vec2::new(0.0, 100.0),
            0.2,
            0.6,
            0,
            &cfg,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let rebuilt = build_tree(
            Vec2::ZERO,
            Vec2::new(0.0, 155.0),
            0.5,
            0.8,
            0,
            &cfg,
            &mut StdRng::seed_from_u64(999),
        )
        .unwrap();

        update_tree(&mut updated, Vec2::ZERO, Vec2::new(0.0, 155.0), 0.5, 0.8, 0, &cfg);

        assert_segments_match(&updated, &rebuilt);
    }

    #[test]
    fn mismatched_depth_bounds_degrade_without_panicking() {
        let built = Config {
            depth_max: 4,
            ..Config::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let mut tree = build_tree(
            Vec2::ZERO,
            Vec2::new(0.0, 100.0),
            0.3,
            0.7,
            0,
            &built,
            &mut rng,
        )
        .unwrap();

        // Tighter bound than the build: deep branches are skipped and
        // keep their stale segments.
        let tight = Config {
            depth_max: 2,
            ..built
        };
        let before = tree.left.as_ref().unwrap().left.as_ref().unwrap().line;
        update_tree(&mut tree, Vec2::ZERO, Vec2::new(0.0, 50.0), 0.3, 0.7, 0, &tight);
        let after = tree.left.as_ref().unwrap().left.as_ref().unwrap().line;
        assert_eq!(before, after);

        // Looser bound: recursion simply runs out of children.
        let loose = Config {
            depth_max: 30,
            ..built
        };
        update_tree(&mut tree, Vec2::ZERO, Vec2::new(0.0, 50.0), 0.3, 0.7, 0, &loose);
        assert_eq!(tree.node_count(), 15);
    }

    #[test]
    fn draw_is_gated_by_the_render_limit() {
        let cfg = Config {
            depth_max: 4,
            ..Config::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let tree = build_tree(
            Vec2::ZERO,
            Vec2::new(0.0, 200.0),
            0.3,
            0.75,
            0,
            &cfg,
            &mut rng,
        )
        .unwrap();

        let mut canvas = RecordingCanvas::default();
        draw_tree(&tree, 0, 0, &cfg, &mut canvas);
        assert_eq!((canvas.lines, canvas.polygons), (0, 0));

        // Limit 1: the root line plus its own (here: zero) leaves.
        let mut canvas = RecordingCanvas::default();
        draw_tree(&tree, 0, 1, &cfg, &mut canvas);
        assert_eq!(canvas.lines, 1);
        assert_eq!(canvas.polygons, tree.leafs.len());

        // A limit at or past the build bound draws everything.
        let mut canvas = RecordingCanvas::default();
        draw_tree(&tree, 0, cfg.depth_max, &cfg, &mut canvas);
        assert_eq!(canvas.lines, tree.node_count());
        assert_eq!(canvas.polygons, tree.leaf_count());
        assert!(canvas.polygons > 0);
    }
}

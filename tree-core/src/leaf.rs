use crate::color::Rgba;
use crate::config::Config;
use crate::geometry::{Side, perpendicular};
use glam::Vec2;
use rand::Rng;

/// A decorative leaf attached to one branch.
///
/// Only the *parameters* of the leaf are stored: where along the branch
/// it sits, which side it points toward, and its color. The drawn
/// geometry is recomputed from the branch's current segment every frame,
/// so leaves follow the branch wherever the live parameters reshape it.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Attachment position along the owning segment, in `[0, 1)`.
    pub branch_ratio: f32,
    /// Which perpendicular side of the branch the leaf points toward.
    pub side: Side,
    /// Fill color, fixed at creation.
    pub color: Rgba,
}

impl Leaf {
    /// Samples a fresh leaf: uniform attachment point, fair-coin side,
    /// color between the configured bounds.
    pub fn random(cfg: &Config, rng: &mut impl Rng) -> Self {
        Self {
            branch_ratio: rng.random_range(0.0..1.0),
            side: if rng.random_bool(0.5) {
                Side::Left
            } else {
                Side::Right
            },
            color: Rgba::random_between(cfg.leaf_color_low, cfg.leaf_color_high, rng),
        }
    }

    /// Derives the leaf's kite polygon from the owning branch's current
    /// segment `a` -> `b`.
    ///
    /// The base sits at `branch_ratio` along the segment; the tip extends
    /// `cfg.leaf_len` perpendicular to the branch toward `side`; the two
    /// arms are offset from a pivot at `cfg.leaf_arm_ratio` along the
    /// base-to-tip axis, by `cfg.leaf_arm_len` to either side. Vertex
    /// order is `[base, arm1, tip, arm2]`.
    ///
    /// A zero-length segment makes the perpendicular scale divide by
    /// zero and the returned points non-finite; the result is handed to
    /// the drawing surface as-is.
    pub fn polygon(&self, a: Vec2, b: Vec2, cfg: &Config) -> [Vec2; 4] {
        let base = a.lerp(b, self.branch_ratio);
        let tip = base + perpendicular(b - a, self.side) * (cfg.leaf_len / a.distance(b));

        let pivot = base.lerp(tip, cfg.leaf_arm_ratio);
        let axis = tip - base;
        let arm_scale = cfg.leaf_arm_len / cfg.leaf_len;
        let arm1 = pivot + perpendicular(axis, Side::Left) * arm_scale;
        let arm2 = pivot + perpendicular(axis, Side::Right) * arm_scale;

        [base, arm1, tip, arm2]
    }
}

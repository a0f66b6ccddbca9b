use crate::color::Rgba;
use crate::types::Depth;

/// Fixed shape constants shared by the build, update and draw passes.
///
/// These are set once at startup; the live per-frame values (branch
/// angle, length ratio, trunk height, render depth limit) are plain
/// arguments to the passes instead.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Recursion bound for building and updating. Branches at this depth
    /// are never created, so the bound fixes the tree size for good.
    pub depth_max: Depth,
    /// Shallowest depth (inclusive) at which branches grow leaves.
    pub leaf_depth_min: Depth,
    /// Deepest depth (inclusive) at which branches grow leaves.
    pub leaf_depth_max: Depth,
    /// Branch length that earns one leaf; a branch gets
    /// `floor(length / len_per_leaf)` of them.
    pub len_per_leaf: f32,
    /// Base-to-tip length of a drawn leaf.
    pub leaf_len: f32,
    /// Length of the two side arms of the leaf kite.
    pub leaf_arm_len: f32,
    /// Position of the arm pivot along the base-to-tip axis.
    pub leaf_arm_ratio: f32,
    /// Lower sampling bound for leaf colors.
    pub leaf_color_low: Rgba,
    /// Upper sampling bound for leaf colors.
    pub leaf_color_high: Rgba,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth_max: 14,
            leaf_depth_min: 2,
            leaf_depth_max: 10,
            len_per_leaf: 30.0,
            leaf_len: 30.0,
            leaf_arm_len: 8.0,
            leaf_arm_ratio: 0.4,
            leaf_color_low: Rgba::rgb(0, 150, 0),
            leaf_color_high: Rgba::rgb(255, 200, 0),
        }
    }
}

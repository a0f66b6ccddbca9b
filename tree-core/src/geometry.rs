use glam::Vec2;

/// One of the two mirror-image directions off a parent line.
///
/// Child branches fork toward both sides; a leaf points toward exactly
/// one, chosen at random when the leaf is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Rotation sign: `+1.0` for [`Side::Left`], `-1.0` for [`Side::Right`].
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Calculate the end point of a child branch forked off the segment
/// `a` -> `b`.
///
/// The parent direction `b - a` is rotated by `angle` radians toward
/// `side`, scaled by `ratio`, and attached at `b` (the parent's end is
/// the child's start). The two sides produce mirror reflections of each
/// other about the line through `a` and `b`, and negating `angle` swaps
/// which side is which.
pub fn fork_end(a: Vec2, b: Vec2, angle: f32, ratio: f32, side: Side) -> Vec2 {
    let v = b - a;
    let (sin, cos) = angle.sin_cos();
    let sin = sin * side.sign();
    b + Vec2::new(v.x * cos + v.y * sin, v.y * cos - v.x * sin) * ratio
}

/// Perpendicular of `v` toward `side`, with the same length as `v`.
pub fn perpendicular(v: Vec2, side: Side) -> Vec2 {
    Vec2::new(v.y, -v.x) * side.sign()
}

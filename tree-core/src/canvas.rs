use crate::color::Rgba;
use glam::Vec2;

/// Drawing surface the draw pass emits onto.
///
/// The core only issues calls and never reads anything back; clearing
/// between frames is the surface owner's business. The viewer implements
/// this over an egui painter, tests over a recording double.
pub trait Canvas {
    /// Draw one branch segment in world coordinates.
    fn line(&mut self, a: Vec2, b: Vec2);

    /// Draw a closed polygon filled with `fill` (a leaf kite).
    fn polygon(&mut self, points: &[Vec2], fill: Rgba);
}

//! Core 2-D fractal tree generation and reshaping library.
//!
//! Main components:
//! - [`tree`] — the recursive branch structure and its segments.
//! - [`leaf`] — decorative leaves and their placement geometry.
//! - [`phases`] — the build / update / draw passes over the tree.
//! - [`geometry`] — branch forking and perpendicular helpers.
//! - [`color`] — RGBA colors and bounded random sampling.
//! - [`config`] — fixed shape constants for the whole tree.
//! - [`canvas`] — the drawing-surface trait the draw pass emits onto.
//! - [`types`] — shared type aliases.

pub mod canvas;
pub mod color;
pub mod config;
pub mod geometry;
pub mod leaf;
pub mod phases;
pub mod tree;
pub mod types;

//! Interactive 2D fractal tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the tree and its live
//! shape parameters and implements [`eframe::App`] to reshape, draw,
//! and control the tree through an egui UI.

use eframe::App;
use glam::Vec2;
use rand::rng;
use tree_core::{
    canvas::Canvas,
    color::Rgba,
    config::Config,
    phases,
    tree::Branch,
    types::Depth,
};

/// Live shape parameters, in the units the sliders show.
///
/// Degrees and percent are what the UI displays; the conversion helpers
/// produce the radians and plain ratio the reshape pass consumes. The
/// central panel reads them once per frame, right before updating and
/// drawing, so both passes see one consistent snapshot.
///
/// ### Fields
/// - `render_depth` - How many branching levels to draw (the tree is
///   always built out to [`Config::depth_max`]).
/// - `angle_deg` - Angle between a branch and each of its children, in degrees.
/// - `ratio_pct` - Child branch length as a percentage of its parent's.
/// - `trunk_height` - Trunk length in world units (pixels at zoom 1).
struct Params {
    render_depth: Depth,
    angle_deg: f32,
    ratio_pct: f32,
    trunk_height: f32,
}

impl Params {
    /// Branching angle in radians.
    fn angle(&self) -> f32 {
        self.angle_deg.to_radians()
    }

    /// Child-to-parent length ratio as a plain fraction.
    fn ratio(&self) -> f32 {
        self.ratio_pct / 100.0
    }

    /// Trunk tip in world space; the trunk base is the world origin.
    fn trunk_top(&self) -> Vec2 {
        Vec2::new(0.0, self.trunk_height)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            render_depth: Config::default().depth_max,
            angle_deg: 20.0,
            ratio_pct: 75.0,
            trunk_height: 130.0,
        }
    }
}

/// World-to-screen mapping for the canvas.
///
/// World units are pixels at zoom `1.0`, world y points up, and the
/// world origin sits at the ground anchor near the bottom of the
/// canvas, so the tree grows upward from where a trunk base belongs.
#[derive(Clone, Copy)]
struct Camera {
    zoom: f32,
    pan: egui::Vec2,
}

impl Camera {
    /// Ground anchor in screen space: centered horizontally, at 8/9 of
    /// the canvas height.
    fn anchor(rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(rect.center().x, rect.top() + rect.height() * (8.0 / 9.0))
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are scaled by `zoom`, offset by `pan`, and
    /// placed relative to the ground anchor of the given `rect`. The
    /// y-axis is flipped so that positive y goes up in world space.
    ///
    /// ### Parameters
    /// - `p` - World-space position.
    /// - `rect` - Screen-space rectangle representing the drawing area.
    ///
    /// ### Returns
    /// The corresponding egui position in screen-space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let anchor = Self::anchor(rect);
        egui::pos2(
            anchor.x + p.x * self.zoom + self.pan.x,
            anchor.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Converts a screen-space position back to world-space.
    ///
    /// This is the inverse of [`Camera::world_to_screen`] (up to
    /// floating point rounding), using the same `zoom`, `pan`, and
    /// ground anchor.
    ///
    /// ### Parameters
    /// - `p` - Screen-space position in egui coordinates.
    /// - `rect` - Screen-space rectangle representing the drawing area.
    ///
    /// ### Returns
    /// The corresponding position in world-space.
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let anchor = Self::anchor(rect);
        let x = (p.x - anchor.x - self.pan.x) / self.zoom;
        let y = (anchor.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }
}

/// Bridges the core's [`Canvas`] calls onto an egui painter.
///
/// Branches become 1px black line segments, leaf kites become filled
/// convex polygons with the same black outline. The counters feed the
/// status bar.
struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
    camera: Camera,
    lines: usize,
    polygons: usize,
}

impl Canvas for PainterCanvas<'_> {
    fn line(&mut self, a: Vec2, b: Vec2) {
        self.painter.line_segment(
            [
                self.camera.world_to_screen(a, self.rect),
                self.camera.world_to_screen(b, self.rect),
            ],
            egui::Stroke::new(1.0, egui::Color32::BLACK),
        );
        self.lines += 1;
    }

    fn polygon(&mut self, points: &[Vec2], fill: Rgba) {
        let screen: Vec<egui::Pos2> = points
            .iter()
            .map(|&p| self.camera.world_to_screen(p, self.rect))
            .collect();
        let fill = egui::Color32::from_rgba_unmultiplied(fill.r, fill.g, fill.b, fill.a);
        self.painter.add(egui::Shape::convex_polygon(
            screen,
            fill,
            egui::Stroke::new(1.0, egui::Color32::BLACK),
        ));
        self.polygons += 1;
    }
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The tree core: [`Branch`], [`Config`], and the build/update/draw passes.
/// - UI state (pan/zoom camera, live shape parameters).
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input (sliders, pan, zoom, regrow).
/// 2. Reshape the existing tree in place to the current slider values.
/// 3. Draw the tree down to the render depth limit.
///
/// ### Fields
/// - `tree` - Current tree structure; built once and reshaped per frame.
/// - `cfg` - Structural configuration (depth bound, leaf placement and sizing).
///
/// - `rng` - Random number generator used when regrowing the tree.
///
/// - `params` - Live shape parameter values bound to the sliders.
/// - `camera` - Zoom factor and pan offset for the canvas.
///
/// - `lines_drawn` - Branch lines emitted in the last frame (for display only).
/// - `leafs_drawn` - Leaf polygons emitted in the last frame (for display only).
pub struct Viewer {
    tree: Option<Box<Branch>>,
    cfg: Config,

    rng: rand::rngs::ThreadRng,

    params: Params,
    camera: Camera,

    lines_drawn: usize,
    leafs_drawn: usize,
}

impl Viewer {
    /// Creates a new viewer with a fully grown tree.
    ///
    /// The default setup is:
    /// - [`Config::default`] for the structural parameters.
    /// - [`Params::default`] for the slider values, so the tree is built
    ///   from the default trunk, angle, and length ratio.
    /// - A tree grown out to [`Config::depth_max`] with thread-local
    ///   randomness deciding leaf placement and color.
    ///
    /// The camera starts at zoom `1.0` with no pan, which puts the
    /// trunk base at the ground anchor.
    ///
    /// ### Returns
    /// A fully-initialized [`Viewer`] ready to be passed to `eframe::run_native`.
    pub fn new() -> Self {
        let mut rng = rng();
        let cfg = Config::default();
        let params = Params::default();
        let tree = phases::build_tree(
            Vec2::ZERO,
            params.trunk_top(),
            params.angle(),
            params.ratio(),
            0,
            &cfg,
            &mut rng,
        );

        Self {
            tree,
            cfg,
            rng,
            params,
            camera: Camera {
                zoom: 1.0,
                pan: egui::vec2(0.0, 0.0),
            },
            lines_drawn: 0,
            leafs_drawn: 0,
        }
    }

    /// Rebuilds the tree from scratch with fresh randomness.
    ///
    /// The silhouette stays the same (it is determined by the sliders),
    /// but every leaf gets a new position, side, and color. Camera and
    /// slider values are kept.
    fn regrow(&mut self) {
        self.tree = phases::build_tree(
            Vec2::ZERO,
            self.params.trunk_top(),
            self.params.angle(),
            self.params.ratio(),
            0,
            &self.cfg,
            &mut self.rng,
        );
    }

    /// Builds the top panel UI (regrow button, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🌱 Regrow").clicked() {
                    self.regrow();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.camera.zoom, 0.1..=10.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (tree size, draw counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "drawn = {} lines, {} leafs",
                    self.lines_drawn, self.leafs_drawn
                ));
                ui.separator();
                let (branches, leafs) = match self.tree.as_deref() {
                    Some(tree) => (tree.node_count(), tree.leaf_count()),
                    None => (0, 0),
                };
                ui.label(format!("branches = {branches}"));
                ui.label(format!("leafs = {leafs}"));
            });
        });
    }

    /// Builds the right-hand panel with the live shape sliders.
    fn ui_shape_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("shape_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Shape");

                ui.separator();
                ui.add(
                    egui::Slider::new(&mut self.params.render_depth, 0..=self.cfg.depth_max)
                        .text("Render depth"),
                );
                ui.add(
                    egui::Slider::new(&mut self.params.angle_deg, 0.0..=90.0)
                        .suffix("°")
                        .text("Branch angle"),
                );
                ui.add(
                    egui::Slider::new(&mut self.params.ratio_pct, 10.0..=90.0)
                        .suffix("%")
                        .text("Length ratio"),
                );
                ui.add(
                    egui::Slider::new(&mut self.params.trunk_height, 10.0..=300.0)
                        .suffix(" px")
                        .text("Trunk height"),
                );

                ui.separator();
                if ui.button("Reset shape to default").clicked() {
                    self.params = Params::default();
                }
            });
    }

    /// Builds the central panel where the tree is drawn and the camera
    /// is driven with the mouse.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.camera.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());

                let world_before = self.camera.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.camera.zoom = (self.camera.zoom * factor).clamp(0.1, 10.0);

                let screen_after = self.camera.world_to_screen(world_before, rect);
                self.camera.pan += pointer_screen - screen_after;
            }

            // Clear the canvas, then reshape and draw from one snapshot
            // of the slider values.
            painter.rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::WHITE);

            let (angle, ratio) = (self.params.angle(), self.params.ratio());
            let trunk_top = self.params.trunk_top();
            let limit = self.params.render_depth;

            if let Some(tree) = self.tree.as_deref_mut() {
                phases::update_tree(tree, Vec2::ZERO, trunk_top, angle, ratio, 0, &self.cfg);
            }

            let mut canvas = PainterCanvas {
                painter: &painter,
                rect,
                camera: self.camera,
                lines: 0,
                polygons: 0,
            };
            if let Some(tree) = self.tree.as_deref() {
                phases::draw_tree(tree, 0, limit, &self.cfg, &mut canvas);
            }
            self.lines_drawn = canvas.lines;
            self.leafs_drawn = canvas.polygons;

            // The tree follows the sliders live; keep frames coming.
            ctx.request_repaint();
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// This method:
    /// - Renders the top control bar and status bar.
    /// - Renders the shape side panel.
    /// - Draws the central tree view and handles interactions.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_shape_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

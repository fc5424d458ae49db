#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Harvest Defence.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in containerised CI environments. To
//! keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The adapter draws the field and sidebar with text glyphs colored by a
//! [`Theme`], so it needs no texture assets; the optional theme manifest in
//! `assets/theme.toml` recolors the presentation without recompiling.

mod theme;

pub use theme::Theme;

use anyhow::Result;
use glam::Vec2;
use harvest_defence_core::{Direction, SeedSlot};
use harvest_defence_rendering::{
    Color, FrameInput, FrameSimulationBreakdown, IntentFeedback, Presentation, RenderingBackend,
    Scene, HELP_LEGEND, SIDEBAR_WIDTH,
};
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::text::measure_text;
use std::time::{Duration, Instant};

/// Rendering backend that presents scenes through a Macroquad window.
#[derive(Clone, Debug)]
pub struct MacroquadBackend {
    show_fps: bool,
    swap_interval: Option<i32>,
    theme: Theme,
}

impl MacroquadBackend {
    /// Creates a backend with the built-in theme and FPS reporting off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_fps: false,
            swap_interval: None,
            theme: Theme::default(),
        }
    }

    /// Enables or disables the once-per-second FPS report on stdout.
    #[must_use]
    pub fn with_show_fps(mut self, show_fps: bool) -> Self {
        self.show_fps = show_fps;
        self
    }

    /// Overrides the swap interval requested from the windowing platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: i32) -> Self {
        self.swap_interval = Some(swap_interval);
        self
    }

    /// Replaces the presentation theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameSimulationBreakdown + 'static,
    {
        let Self {
            show_fps,
            swap_interval,
            theme,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 1024,
            window_height: 640,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();
            let background = to_macroquad_color(clear_color);

            loop {
                let frame_input = KeyboardInput::poll();
                if frame_input.quit {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let breakdown = update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let animation_clock = macroquad::time::get_time();

                let render_start = Instant::now();
                draw_field(&scene, &metrics, &theme, animation_clock);
                draw_plant_flashes(&scene, &metrics);
                draw_raiders(&scene, &metrics, &theme);
                draw_player(&scene, &metrics, &theme);
                draw_sidebar(&scene, &metrics, &theme);
                let render = render_start.elapsed();

                if show_fps {
                    if let Some(report) = fps_counter.record_frame(frame_dt, breakdown, render) {
                        println!(
                            "FPS: {:.2} | sim: {:>6.2}ms scene: {:>6.2}ms render: {:>6.2}ms",
                            report.per_second,
                            report.avg_simulation.as_secs_f64() * 1_000.0,
                            report.avg_scene_population.as_secs_f64() * 1_000.0,
                            report.avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Snapshot of edge-triggered key presses observed during a single frame.
struct KeyboardInput;

impl KeyboardInput {
    fn poll() -> FrameInput {
        let movement = if is_key_pressed(KeyCode::W) || is_key_pressed(KeyCode::Up) {
            Some(Direction::North)
        } else if is_key_pressed(KeyCode::S) || is_key_pressed(KeyCode::Down) {
            Some(Direction::South)
        } else if is_key_pressed(KeyCode::A) || is_key_pressed(KeyCode::Left) {
            Some(Direction::West)
        } else if is_key_pressed(KeyCode::D) || is_key_pressed(KeyCode::Right) {
            Some(Direction::East)
        } else {
            None
        };

        let seed_keys = [
            (KeyCode::Key1, 1u8),
            (KeyCode::Key2, 2),
            (KeyCode::Key3, 3),
            (KeyCode::Key4, 4),
            (KeyCode::Key5, 5),
            (KeyCode::Key6, 6),
        ];
        let select_slot = seed_keys
            .iter()
            .find(|(key, _)| is_key_pressed(*key))
            .map(|(_, slot)| SeedSlot::new(*slot));

        FrameInput {
            movement,
            select_slot,
            activate: is_key_pressed(KeyCode::Space),
            fertilize: is_key_pressed(KeyCode::F),
            quit: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
    tile_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let total = scene.total_size();
        let scale = if total.x <= f32::EPSILON || total.y <= f32::EPSILON {
            1.0
        } else {
            (screen_width / total.x).min(screen_height / total.y)
        };
        let offset = Vec2::new(
            (screen_width - total.x * scale) * 0.5,
            (screen_height - total.y * scale) * 0.5,
        );
        Self {
            scale,
            offset,
            tile_step: scene.tile_grid.tile_length * scale,
        }
    }

    fn project(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }
}

fn draw_field(scene: &Scene, metrics: &SceneMetrics, theme: &Theme, animation_clock: f64) {
    let grid = scene.tile_grid;
    let soil = to_macroquad_color(theme.soil);
    let line = to_macroquad_color(grid.line_color);

    for row in 0..grid.rows {
        for column in 0..grid.columns {
            let origin = metrics.project(Vec2::new(
                column as f32 * grid.tile_length,
                row as f32 * grid.tile_length,
            ));
            macroquad::shapes::draw_rectangle(
                origin.x,
                origin.y,
                metrics.tile_step,
                metrics.tile_step,
                soil,
            );
            macroquad::shapes::draw_rectangle_lines(
                origin.x,
                origin.y,
                metrics.tile_step,
                metrics.tile_step,
                1.0,
                line,
            );
        }
    }

    for tile in &scene.tiles {
        let mut color = theme.crop_color(tile.kind);
        if tile.stage.is_ripe() {
            // Ripe crops pulse so they read as "grab me" at a glance.
            let phase = animation_clock * 4.0
                + f64::from(tile.cell.column())
                + f64::from(tile.cell.row());
            color = color.with_alpha(0.5 + 0.5 * phase.sin() as f32);
        }
        let center = metrics.project(grid.tile_center(tile.cell));
        draw_glyph_centered(tile.glyph, center, metrics.tile_step * 0.6, color);

        if tile.fertilized {
            let blink = (animation_clock * 4.0).fract() < 0.5;
            if blink {
                let corner = metrics.project(Vec2::new(
                    (tile.cell.column() as f32 + 0.8) * grid.tile_length,
                    (tile.cell.row() as f32 + 0.25) * grid.tile_length,
                ));
                draw_glyph_centered(
                    '*',
                    corner,
                    metrics.tile_step * 0.3,
                    Color::new(1.0, 1.0, 1.0, 1.0),
                );
            }
        }
    }
}

fn draw_plant_flashes(scene: &Scene, metrics: &SceneMetrics) {
    for flash in &scene.plant_flashes {
        let strength = flash.strength();
        if strength <= 0.0 {
            continue;
        }
        let origin = metrics.project(Vec2::new(
            flash.cell.column() as f32 * scene.tile_grid.tile_length,
            flash.cell.row() as f32 * scene.tile_grid.tile_length,
        ));
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            metrics.tile_step,
            metrics.tile_step,
            to_macroquad_color(Color::new(1.0, 1.0, 0.0, 0.8 * strength)),
        );
    }
}

fn draw_raiders(scene: &Scene, metrics: &SceneMetrics, theme: &Theme) {
    for raider in &scene.raiders {
        let center = metrics.project(scene.tile_grid.tile_center(raider.cell));
        draw_glyph_centered(
            theme.raider_glyph,
            center,
            metrics.tile_step * 0.55,
            theme.raider,
        );
    }
}

fn draw_player(scene: &Scene, metrics: &SceneMetrics, theme: &Theme) {
    let center = metrics.project(scene.tile_grid.tile_center(scene.player.cell));
    draw_glyph_centered(
        theme.player_glyph,
        center,
        metrics.tile_step * 0.7,
        theme.player,
    );
}

fn draw_sidebar(scene: &Scene, metrics: &SceneMetrics, theme: &Theme) {
    let field_width = scene.tile_grid.size().x;
    let origin = metrics.project(Vec2::new(field_width, 0.0));
    let width = SIDEBAR_WIDTH * metrics.scale;
    let height = scene.tile_grid.size().y * metrics.scale;

    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        width,
        height,
        to_macroquad_color(theme.sidebar_background),
    );
    macroquad::shapes::draw_rectangle_lines(
        origin.x,
        origin.y,
        width,
        height,
        2.0,
        to_macroquad_color(theme.sidebar_border),
    );

    let text_color = to_macroquad_color(theme.text);
    let dim_color = to_macroquad_color(theme.text.with_alpha(0.7));
    let pad = 10.0 * metrics.scale;
    let row_height = 26.0 * metrics.scale;
    let font = (18.0 * metrics.scale).max(8.0);
    let mut cursor_y = origin.y + 24.0 * metrics.scale;

    macroquad::text::draw_text("Seeds", origin.x + pad, cursor_y, font, text_color);
    cursor_y += row_height;

    for row in &scene.sidebar.seed_rows {
        if row.selected {
            macroquad::shapes::draw_rectangle(
                origin.x + 4.0 * metrics.scale,
                cursor_y - row_height * 0.75,
                width - 8.0 * metrics.scale,
                row_height,
                to_macroquad_color(theme.selection_highlight.with_alpha(0.85)),
            );
        }
        let ink = if row.selected {
            to_macroquad_color(theme.sidebar_border)
        } else {
            text_color
        };
        let line = format!(
            "{} {} {:<8} {:>2}c",
            row.slot.get(),
            row.glyph,
            row.name,
            row.cost.get()
        );
        macroquad::text::draw_text(&line, origin.x + pad, cursor_y, font, ink);
        cursor_y += row_height;
    }

    cursor_y += row_height * 0.5;
    let coins = format!("Coins: {}", scene.sidebar.wallet.get());
    macroquad::text::draw_text(&coins, origin.x + pad, cursor_y, font, text_color);
    cursor_y += row_height;

    macroquad::text::draw_text("Harvested", origin.x + pad, cursor_y, font, text_color);
    cursor_y += row_height;
    for row in &scene.sidebar.harvest_rows {
        let line = format!("{} x {}", row.glyph, row.count);
        macroquad::text::draw_text(&line, origin.x + pad, cursor_y, font, dim_color);
        cursor_y += row_height * 0.8;
    }

    cursor_y += row_height * 0.5;
    for line in HELP_LEGEND {
        macroquad::text::draw_text(line, origin.x + pad, cursor_y, font * 0.8, dim_color);
        cursor_y += row_height * 0.7;
    }

    if let Some(feedback) = &scene.feedback {
        let message = feedback_message(feedback);
        macroquad::text::draw_text(
            &message,
            origin.x + pad,
            origin.y + height - row_height * 0.5,
            font * 0.8,
            to_macroquad_color(Color::from_rgb_u8(0xe6, 0x50, 0x50)),
        );
    }
}

fn feedback_message(feedback: &IntentFeedback) -> String {
    match feedback {
        IntentFeedback::PlantRejected { reason, .. } => format!("! {reason}"),
        IntentFeedback::FertilizeRejected { reason, .. } => format!("! {reason}"),
        IntentFeedback::SeedRejected { reason, .. } => format!("! {reason}"),
    }
}

fn draw_glyph_centered(glyph: char, center: Vec2, font_size: f32, color: Color) {
    let mut buffer = [0u8; 4];
    let text: &str = glyph.encode_utf8(&mut buffer);
    let font_size = font_size.max(8.0);
    let dimensions = measure_text(text, None, font_size as u16, 1.0);
    macroquad::text::draw_text(
        text,
        center.x - dimensions.width * 0.5,
        center.y + dimensions.height * 0.5,
        font_size,
        to_macroquad_color(color),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    simulation_accum: Duration,
    scene_population_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsReport {
    per_second: f64,
    avg_simulation: Duration,
    avg_scene_population: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    fn record_frame(
        &mut self,
        frame_dt: Duration,
        breakdown: FrameSimulationBreakdown,
        render: Duration,
    ) -> Option<FpsReport> {
        self.elapsed = self.elapsed.saturating_add(frame_dt);
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum = self.simulation_accum.saturating_add(breakdown.simulation);
        self.scene_population_accum = self
            .scene_population_accum
            .saturating_add(breakdown.scene_population);
        self.render_accum = self.render_accum.saturating_add(render);

        if self.elapsed < Duration::from_secs(1) || self.frames == 0 {
            return None;
        }

        let report = FpsReport {
            per_second: f64::from(self.frames) / self.elapsed.as_secs_f64(),
            avg_simulation: self.simulation_accum / self.frames,
            avg_scene_population: self.scene_population_accum / self.frames,
            avg_render: self.render_accum / self.frames,
        };
        *self = Self::default();
        Some(report)
    }
}

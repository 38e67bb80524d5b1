//! Canvas 2D backend for draw command lists

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use wasm_bindgen::JsCast;

use super::{DrawCommand, RenderSink};
use crate::error::PlatformError;
use crate::sim::{Aabb, ObstacleKind};

const SKY_COLOR: &str = "#003";
const SKYLINE_COLOR: &str = "#111";
const GROUND_COLOR: &str = "#222";
/// Horizontal spacing and width of skyline buildings
const BUILDING_PITCH: f32 = 50.0;
const BUILDING_WIDTH: f32 = 40.0;

fn obstacle_color(kind: ObstacleKind) -> &'static str {
    match kind {
        ObstacleKind::Burger => "orange",
        ObstacleKind::Chocolate => "#7b3f00",
        ObstacleKind::Crate => "gray",
    }
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    player_sprite: HtmlImageElement,
    /// Building heights, generated once so the skyline does not flicker
    skyline: Vec<f32>,
}

impl CanvasRenderer {
    pub fn new(
        canvas: &HtmlCanvasElement,
        player_sprite: HtmlImageElement,
        seed: u64,
    ) -> Result<Self, PlatformError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| PlatformError::Js(format!("{:?}", e)))?
            .ok_or(PlatformError::NoCanvasContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::NoCanvasContext)?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let count = (canvas.width() as f32 / BUILDING_PITCH).ceil() as usize;
        let skyline = (0..count).map(|_| rng.random_range(50.0..150.0)).collect();

        Ok(Self {
            ctx,
            player_sprite,
            skyline,
        })
    }

    fn fill(&self, color: &str, rect: &Aabb) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.min.x as f64,
            rect.min.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn draw_background(&self, width: f32, height: f32, ground_line: f32) {
        let (w, h) = (width as f64, height as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(SKY_COLOR);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.ctx.set_fill_style_str(SKYLINE_COLOR);
        for (i, building) in self.skyline.iter().enumerate() {
            let x = i as f32 * BUILDING_PITCH;
            self.ctx.fill_rect(
                x as f64,
                (ground_line - building) as f64,
                BUILDING_WIDTH as f64,
                *building as f64,
            );
        }

        self.ctx.set_fill_style_str(GROUND_COLOR);
        self.ctx
            .fill_rect(0.0, ground_line as f64, w, (height - ground_line) as f64);
    }

    fn draw_player(&self, rect: &Aabb) {
        let drawn = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                &self.player_sprite,
                rect.min.x as f64,
                rect.min.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            )
            .is_ok();
        if !drawn {
            self.fill("white", rect);
        }
    }
}

impl RenderSink for CanvasRenderer {
    fn present(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Background { size, ground_line } => {
                    self.draw_background(size.x, size.y, *ground_line)
                }
                DrawCommand::Player { rect, .. } => self.draw_player(rect),
                DrawCommand::Obstacle { rect, kind } => self.fill(obstacle_color(*kind), rect),
            }
        }
    }
}

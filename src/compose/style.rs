//! Geometry and palette of a pin. All values are in canvas pixels.

use crate::foundation::core::{CanvasSize, Rect, Rgba8};

pub const CANVAS: CanvasSize = CanvasSize::new(1200, 1800);

pub const BACKGROUND: Rgba8 = Rgba8::rgb(0x10, 0x18, 0x28);
pub const TITLE_COLOR: Rgba8 = Rgba8::rgb(0xF9, 0xFA, 0xFB);
pub const EXCERPT_COLOR: Rgba8 = Rgba8::rgb(0xD1, 0xD5, 0xDC);

pub const CORNER_RADIUS: f64 = 16.0;

pub const IMAGE_BAND: Rect = Rect::new(10.0, 10.0, 1190.0, 1190.0);

pub const PANEL_X: f64 = 32.0;
pub const PANEL_Y: f64 = 1024.0;
/// Two thirds of the canvas width less the side margins.
pub const PANEL_WIDTH: f64 = (1200.0 - 64.0) / 3.0 * 2.0;
pub const PANEL_HEIGHT: f64 = 1800.0 - 1040.0;
pub const PANEL_OPACITY: f32 = 0.75;

pub const TEXT_X: f64 = 50.0;
pub const TEXT_MAX_WIDTH: f64 = 730.0;
pub const TITLE_Y: f64 = 1054.0;
pub const TITLE_SIZE: f64 = 48.0;
pub const EXCERPT_SIZE: f64 = 32.0;
/// Gap between the last title line and the excerpt, on top of `TITLE_Y`.
pub const EXCERPT_OFFSET: f64 = 1074.0;

pub const GRADIENT_HEIGHT: f64 = 350.0;
/// `rgba(16, 24, 40, 0.20)`
pub const GRADIENT_TOP: Rgba8 = Rgba8::rgba(0x10, 0x18, 0x28, 51);
pub const GRADIENT_BOTTOM: Rgba8 = BACKGROUND;

pub const LOGO: Rect = Rect::new(864.0, 1630.0, 864.0 + 286.0, 1630.0 + 115.0);

pub fn panel_rect() -> Rect {
    Rect::new(PANEL_X, PANEL_Y, PANEL_X + PANEL_WIDTH, PANEL_Y + PANEL_HEIGHT)
}

pub fn gradient_rect() -> Rect {
    let y = f64::from(CANVAS.height) - GRADIENT_HEIGHT;
    Rect::new(0.0, y, PANEL_WIDTH + 16.0, y + GRADIENT_HEIGHT)
}

/// Top of the excerpt block for a title wrapped into `title_lines` lines.
pub fn excerpt_y(title_lines: usize) -> f64 {
    title_lines as f64 * TITLE_SIZE * crate::text::wrap::LINE_HEIGHT + EXCERPT_OFFSET
}

#[cfg(test)]
#[path = "../../tests/unit/compose/style.rs"]
mod tests;

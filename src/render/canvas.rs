use std::sync::Arc;

use kurbo::Shape;

use crate::{
    assets::PreparedImage,
    foundation::{
        core::{Affine, BezPath, CanvasSize, Point, Rect, Rgba8, Rgba8Premul, Vec2},
        error::{PinError, PinResult},
    },
    render::RgbaFrame,
    text::{shaper::TextShaper, wrap::PlacedLine},
};

/// Per-step drawing state applied by [`PinCanvas::scoped`].
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    /// Clip region in canvas coordinates.
    pub clip: Option<BezPath>,
    /// Group opacity in `[0, 1]`.
    pub opacity: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            clip: None,
            opacity: 1.0,
        }
    }
}

impl DrawState {
    pub fn clipped(path: BezPath) -> Self {
        Self {
            clip: Some(path),
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// A fixed-size CPU drawing surface for one pin.
///
/// Drawing commands are recorded into a `vello_cpu` render context and rasterized by
/// [`PinCanvas::finish`].
pub struct PinCanvas {
    size: CanvasSize,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl std::fmt::Debug for PinCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinCanvas").field("size", &self.size).finish()
    }
}

impl PinCanvas {
    pub fn new(size: CanvasSize) -> PinResult<Self> {
        let (width, height) = size.to_u16()?;
        Ok(Self {
            size,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        })
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Run one drawing step under `state`.
    ///
    /// Layers pushed for the state are popped and transform/paint are reset afterwards, whatever
    /// `f` returns, so no style leaks into the next step.
    pub fn scoped<R>(&mut self, state: &DrawState, f: impl FnOnce(&mut Self) -> R) -> R {
        self.reset_state();

        let mut depth = 0usize;
        if let Some(clip) = &state.clip {
            self.ctx.push_clip_layer(&bezpath_to_cpu(clip));
            depth += 1;
        }
        if state.opacity < 1.0 {
            self.ctx.push_opacity_layer(state.opacity.clamp(0.0, 1.0));
            depth += 1;
        }

        let out = f(self);

        for _ in 0..depth {
            self.ctx.pop_layer();
        }
        self.reset_state();
        out
    }

    fn reset_state(&mut self) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Draw `image` stretched to exactly cover `dest`, ignoring its aspect ratio.
    pub fn draw_image(&mut self, image: &PreparedImage, dest: Rect) -> PinResult<()> {
        let pixmap =
            image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
        let (w, h) = (f64::from(image.width), f64::from(image.height));

        let transform = Affine::translate(Vec2::new(dest.x0, dest.y0))
            * Affine::scale_non_uniform(dest.width() / w, dest.height() / h);

        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        Ok(())
    }

    /// Fill `rect` with a top-to-bottom linear gradient from `top` to `bottom`.
    pub fn fill_vertical_gradient(&mut self, rect: Rect, top: Rgba8, bottom: Rgba8) -> PinResult<()> {
        let w = rect.width().ceil().max(1.0) as u32;
        let h = rect.height().ceil().max(1.0) as u32;
        let gradient = vertical_gradient_image(top.premultiplied(), bottom.premultiplied(), w, h);
        self.draw_image(&gradient, rect)
    }

    /// Draw one wrapped line hanging below its origin (the origin is the top of the line box).
    pub fn fill_text_line(&mut self, shaper: &mut TextShaper, line: &PlacedLine) {
        let layout = shaper.layout_line(&line.text);
        let font = shaper.font().clone();

        self.ctx.set_transform(affine_to_cpu(Affine::translate(
            line.origin.to_vec2(),
        )));
        for parley_line in layout.lines() {
            for item in parley_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                // Absolute x along the line, y on the baseline measured from the layout top.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize every recorded command and return the pixels.
    pub fn finish(mut self) -> RgbaFrame {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        RgbaFrame {
            width: self.size.width,
            height: self.size.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

/// Closed rounded-rectangle outline, for fills and clips.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    kurbo::RoundedRect::from_rect(rect, radius).to_path(0.1)
}

fn vertical_gradient_image(
    start: Rgba8Premul,
    end: Rgba8Premul,
    w: u32,
    h: u32,
) -> PreparedImage {
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    let h1 = (h.max(1) - 1) as f32;
    for y in 0..h {
        let t = if h1 <= 0.0 { 0.0 } else { (y as f32) / h1 };
        let lerp = |a: u8, b: u8| -> u8 {
            let af = a as f32;
            let bf = b as f32;
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        let c = [
            lerp(start.r, end.r),
            lerp(start.g, end.g),
            lerp(start.b, end.b),
            lerp(start.a, end.a),
        ];
        for x in 0..w {
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&c);
        }
    }
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(bytes),
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PinResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PinError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PinError::render("image height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(PinError::render("image has zero width or height"));
    }
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PinError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;

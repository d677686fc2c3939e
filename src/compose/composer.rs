use std::path::{Path, PathBuf};

use crate::{
    assets::{
        self,
        fonts::{FontBook, FontWeightKind},
    },
    compose::style,
    content::loader::RenderSpec,
    foundation::{core::Point, error::PinResult},
    render::canvas::{DrawState, PinCanvas, rounded_rect_path},
    text::{
        shaper::{TextShaper, TextStyle},
        wrap::{WrapResult, wrap_text},
    },
};

/// Composes pins for one worker.
///
/// Owns the title and excerpt shapers, so a `Composer` is built per thread and reused for
/// every document that thread handles.
#[derive(Debug)]
pub struct Composer {
    title: TextShaper,
    excerpt: TextShaper,
    logo_path: PathBuf,
}

impl Composer {
    pub fn new(fonts: &FontBook, logo_path: impl Into<PathBuf>) -> PinResult<Self> {
        let title = TextShaper::new(
            fonts.face(FontWeightKind::Bold),
            TextStyle {
                size_px: style::TITLE_SIZE as f32,
                weight: FontWeightKind::Bold,
                color: style::TITLE_COLOR,
            },
        )?;
        let excerpt = TextShaper::new(
            fonts.face(FontWeightKind::Regular),
            TextStyle {
                size_px: style::EXCERPT_SIZE as f32,
                weight: FontWeightKind::Regular,
                color: style::EXCERPT_COLOR,
            },
        )?;
        Ok(Self {
            title,
            excerpt,
            logo_path: logo_path.into(),
        })
    }

    pub fn logo_path(&self) -> &Path {
        &self.logo_path
    }

    /// Wrap the title at its fixed origin.
    pub fn wrap_title(&mut self, title: &str) -> WrapResult {
        wrap_text(
            &mut self.title,
            title,
            Point::new(style::TEXT_X, style::TITLE_Y),
            style::TEXT_MAX_WIDTH,
            style::TITLE_SIZE,
        )
    }

    /// Wrap the excerpt below a title of `title_lines` lines.
    pub fn wrap_excerpt(&mut self, excerpt: &str, title_lines: usize) -> WrapResult {
        wrap_text(
            &mut self.excerpt,
            excerpt,
            Point::new(style::TEXT_X, style::excerpt_y(title_lines)),
            style::TEXT_MAX_WIDTH,
            style::EXCERPT_SIZE,
        )
    }

    /// Draw one pin. Each step runs in its own draw state; a failed asset load aborts the
    /// pin with `MissingAsset`.
    #[tracing::instrument(skip(self, spec), fields(image = %spec.image_path.display()))]
    pub fn compose(&mut self, spec: &RenderSpec) -> PinResult<PinCanvas> {
        let mut canvas = PinCanvas::new(style::CANVAS)?;
        let plain = DrawState::default();

        canvas.scoped(&plain, |c| c.fill_rect(style::CANVAS.rect(), style::BACKGROUND));

        let source = assets::load_sized_image(
            &spec.image_path,
            style::IMAGE_BAND.width() as u32,
            style::IMAGE_BAND.height() as u32,
        )?;
        let band = DrawState::clipped(rounded_rect_path(style::IMAGE_BAND, style::CORNER_RADIUS));
        canvas.scoped(&band, |c| c.draw_image(&source, style::IMAGE_BAND))?;

        let panel = DrawState::default().with_opacity(style::PANEL_OPACITY);
        canvas.scoped(&panel, |c| {
            c.fill_path(
                &rounded_rect_path(style::panel_rect(), style::CORNER_RADIUS),
                style::BACKGROUND,
            )
        });

        let title = self.wrap_title(&spec.title);
        canvas.scoped(&plain, |c| {
            for line in title.lines() {
                c.fill_text_line(&mut self.title, line);
            }
        });

        let excerpt = self.wrap_excerpt(&spec.excerpt, title.line_count());
        canvas.scoped(&plain, |c| {
            for line in excerpt.lines() {
                c.fill_text_line(&mut self.excerpt, line);
            }
        });

        canvas.scoped(&plain, |c| {
            c.fill_vertical_gradient(
                style::gradient_rect(),
                style::GRADIENT_TOP,
                style::GRADIENT_BOTTOM,
            )
        })?;

        let logo = assets::load_sized_image(
            &self.logo_path,
            style::LOGO.width() as u32,
            style::LOGO.height() as u32,
        )?;
        canvas.scoped(&plain, |c| c.draw_image(&logo, style::LOGO))?;

        tracing::debug!(
            title_lines = title.line_count(),
            excerpt_lines = excerpt.line_count(),
            "composed pin"
        );
        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;

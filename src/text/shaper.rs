use std::borrow::Cow;

use crate::{
    assets::fonts::{FontFace, FontWeightKind},
    foundation::{
        core::Rgba8,
        error::{PinError, PinResult},
    },
    text::wrap::TextMeasure,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Font size, weight and fill color of one text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub weight: FontWeightKind,
    pub color: Rgba8,
}

/// Shapes single lines of text in one face and style.
///
/// Each shaper owns its Parley contexts, so one instance must not be shared between threads;
/// workers build their own from the shared [`FontFace`] bytes.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    font: vello_cpu::peniko::FontData,
    style: TextStyle,
}

impl std::fmt::Debug for TextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextShaper")
            .field("family", &self.family)
            .field("style", &self.style)
            .finish()
    }
}

impl TextShaper {
    pub fn new(face: &FontFace, style: TextStyle) -> PinResult<Self> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(PinError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.data.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| PinError::font("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PinError::font("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.data.as_ref().clone()),
            face.index,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
            style,
        })
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Font handle for drawing the glyphs this shaper produces.
    pub fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` as a single unbroken line.
    pub fn layout_line(&mut self, text: &str) -> parley::Layout<TextBrushRgba8> {
        let weight = match self.style.weight {
            FontWeightKind::Regular => parley::style::FontWeight::NORMAL,
            FontWeightKind::Bold => parley::style::FontWeight::BOLD,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.style.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(
            self.style.color.into(),
        ));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for TextShaper {
    fn measure(&mut self, text: &str) -> f64 {
        f64::from(self.layout_line(text).full_width())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;

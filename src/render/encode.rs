use std::io::Cursor;

use crate::{
    assets::decode::unpremultiply_rgba8_in_place,
    foundation::error::{PinError, PinResult},
    render::RgbaFrame,
};

/// Encode a frame as an RGBA8 PNG.
///
/// Encoding is deterministic: identical frames yield identical bytes.
pub fn encode_png(frame: &RgbaFrame) -> PinResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(PinError::encoding(format!(
            "frame buffer is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut straight = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut straight);
    }

    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| PinError::encoding("frame dimensions do not match buffer"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PinError::encoding(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;

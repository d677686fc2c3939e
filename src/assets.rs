use std::{path::Path, sync::Arc};

use crate::foundation::error::{PinError, PinResult};

pub mod decode;
pub mod fonts;
pub mod svg_raster;

#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Debug)]
pub struct PreparedSvg {
    pub tree: Arc<usvg::Tree>,
}

/// Read and decode a raster image from disk.
pub fn load_image(path: &Path) -> PinResult<PreparedImage> {
    let bytes = std::fs::read(path).map_err(|e| PinError::missing_asset(path, e))?;
    decode::decode_image(&bytes).map_err(|e| PinError::missing_asset(path, format!("{e:#}")))
}

/// Load an image asset and bring it to exactly `width` x `height` pixels.
///
/// SVG files are rasterized at the target size; raster formats are decoded at their native
/// size and left for the canvas to scale.
pub fn load_sized_image(path: &Path, width: u32, height: u32) -> PinResult<PreparedImage> {
    let is_svg = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if !is_svg {
        return load_image(path);
    }

    let bytes = std::fs::read(path).map_err(|e| PinError::missing_asset(path, e))?;
    let svg = decode::parse_svg_with_resources(&bytes, path.parent())
        .map_err(|e| PinError::missing_asset(path, format!("{e:#}")))?;
    let rgba8_premul = svg_raster::rasterize_svg_to_premul_rgba8(&svg.tree, width, height)?;
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

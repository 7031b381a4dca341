use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Size;
use crate::foundation::error::{SceneError, SceneResult};

/// Raster image decoded ahead of the walk.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoding the bytes were read as, e.g. `"png"`.
    pub format: &'static str,
    /// Straight (non-premultiplied) RGBA8 rows, tightly packed.
    pub pixels: Arc<[u8]>,
}

impl PreparedImage {
    /// Intrinsic size in user units, one unit per pixel.
    pub fn intrinsic_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Whether any pixel is not fully opaque.
    pub fn has_transparency(&self) -> bool {
        self.pixels.chunks_exact(4).any(|px| px[3] != u8::MAX)
    }
}

/// Sniff the encoding of `bytes` and decode them to RGBA8.
pub fn decode_image(bytes: &[u8]) -> SceneResult<PreparedImage> {
    let format = image::guess_format(bytes).context("detect image format")?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .with_context(|| format!("decode {format:?} image"))?
        .into_rgba8();
    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(SceneError::validation("image has no pixels"));
    }
    Ok(PreparedImage {
        width,
        height,
        format: format.extensions_str().first().copied().unwrap_or("unknown"),
        pixels: decoded.into_raw().into(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::foundation::core::Rgb;
use crate::foundation::error::{SceneError, SceneResult};

/// Decoded image ready to be embedded in an SVG `<image>` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// MIME type of the embedded payload.
    pub mime: &'static str,
    /// Base64-encoded file bytes.
    pub base64: String,
}

impl ImageData {
    /// Read and probe an image file.
    pub fn from_path(path: &Path) -> SceneResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        Self::from_bytes(&bytes)
    }

    /// Probe encoded image bytes; the bytes are embedded unchanged.
    pub fn from_bytes(bytes: &[u8]) -> SceneResult<Self> {
        let format = image::guess_format(bytes).context("guess image format")?;
        let img = image::load_from_memory_with_format(bytes, format)
            .context("decode image from memory")?;
        Ok(Self {
            width: img.width(),
            height: img.height(),
            mime: format.to_mime_type(),
            base64: BASE64_STANDARD.encode(bytes),
        })
    }

    /// Encode rows of pixels as a PNG payload. Every row must have the same length.
    pub fn from_rgb_rows(rows: &[Vec<Rgb>]) -> SceneResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(SceneError::validation("pixel rows must be non-empty"));
        }

        let mut raw = Vec::with_capacity(width * height * 3);
        for row in rows {
            if row.len() != width {
                return Err(SceneError::SizeMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
            raw.extend(row.iter().flat_map(|px| px.channels()));
        }

        let (w, h) = (dimension(width)?, dimension(height)?);
        let img = image::RgbImage::from_raw(w, h, raw)
            .ok_or_else(|| SceneError::validation("pixel buffer does not match dimensions"))?;
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("encode png")?;

        Ok(Self {
            width: w,
            height: h,
            mime: "image/png",
            base64: BASE64_STANDARD.encode(&png),
        })
    }

    /// `data:` URI for an `href` attribute.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

fn dimension(n: usize) -> SceneResult<u32> {
    u32::try_from(n).map_err(|_| SceneError::validation("image dimension exceeds u32"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;

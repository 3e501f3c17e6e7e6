//! Maximum-compression PNG re-encoding for screenshots

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ImageError;

/// Re-encodes PNG bytes with the best compression and adaptive filtering
///
/// Pixels are unchanged; only the encoded size differs.
pub fn recompress_png(png: &[u8]) -> Result<Vec<u8>, ImageError> {
    let image = image::load_from_memory(png)?;
    let mut out = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive);
    image.write_with_encoder(encoder)?;
    Ok(out)
}

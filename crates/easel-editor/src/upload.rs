//! Image upload: MIME gate, data-URI encoding and dimension probing.
//!
//! The host reads the file and hands over its bytes. Only the header is
//! decoded here, enough to learn the intrinsic size for the auto height.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use easel_core::EditorError;
use easel_core::Size;
use easel_core::model::ImageSource;
use image::ImageError;
use std::io::Cursor;

/// Reject anything whose MIME type is not `image/*`.
pub fn check_mime(mime: &str) -> Result<(), EditorError> {
    if mime.starts_with("image/") {
        Ok(())
    } else {
        log::warn!("rejected upload with MIME {mime:?}");
        Err(EditorError::NotAnImage {
            mime: mime.to_string(),
        })
    }
}

/// `data:<mime>;base64,<payload>`
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Intrinsic pixel size, from the format guessed off the magic bytes.
///
/// `None` when the format is one this build cannot probe (SVG, ICO, AVIF
/// and friends); the browser still gets to load those. Data that claims a
/// known format but does not parse is `DecodeFailed`.
pub fn decode_dimensions(bytes: &[u8]) -> Result<Option<Size>, EditorError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EditorError::DecodeFailed(e.to_string()))?;
    let (width, height) = match reader.into_dimensions() {
        Ok(dimensions) => dimensions,
        Err(ImageError::Unsupported(e)) => {
            log::debug!("no header probe for upload: {e}");
            return Ok(None);
        }
        Err(e) => return Err(EditorError::DecodeFailed(e.to_string())),
    };
    if width == 0 || height == 0 {
        return Err(EditorError::DecodeFailed(format!("empty image {width}x{height}")));
    }
    Ok(Some(Size::new(f64::from(width), f64::from(height))))
}

/// Validate and package an uploaded file.
pub fn prepare_image(mime: &str, bytes: &[u8]) -> Result<ImageSource, EditorError> {
    check_mime(mime)?;
    if bytes.is_empty() {
        return Err(EditorError::ReadFailed);
    }
    let natural = decode_dimensions(bytes)?;
    match natural {
        Some(size) => log::info!("decoded {mime} upload: {}x{} ({} bytes)", size.width, size.height, bytes.len()),
        None => log::info!("{mime} upload passed through unprobed ({} bytes)", bytes.len()),
    }
    Ok(ImageSource {
        data_uri: encode_data_uri(mime, bytes),
        mime: mime.to_string(),
        natural,
    })
}

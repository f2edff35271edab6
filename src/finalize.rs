//! Image finalization: raster capture buffer to tagged JPEG bytes.
//!
//! The browser hands back a PNG raster; it is decoded, re-encoded as a
//! quality-configurable JPEG, and the JFIF APP0 segment is stamped with a
//! DPI equal to the profile's pixel-density multiplier times 72.

use crate::CaptureError;
use image::codecs::jpeg::JpegEncoder;

const BASE_DPI: f64 = 72.0;
const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: u8 = 0xE0;

/// DPI tag for a capture taken at the given pixel-density multiplier.
/// `None` means no profile scale was supplied and the base 72 is used.
pub fn density_for_scale(scale: Option<f64>) -> u16 {
    (scale.unwrap_or(1.0) * BASE_DPI).round() as u16
}

/// Re-encodes a raster capture buffer as a JPEG tagged with `dpi`.
pub fn finalize_jpeg(raster: &[u8], quality: u8, dpi: u16) -> Result<Vec<u8>, CaptureError> {
    // Browser rasters are usually RGBA PNGs; JPEG has no alpha channel
    let img = image::load_from_memory(raster)?.to_rgb8();

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
    img.write_with_encoder(encoder)?;

    set_jfif_density(&mut jpeg, dpi)?;
    Ok(jpeg)
}

/// Stamps the JFIF APP0 segment with a dots-per-inch density, inserting
/// the segment after SOI when the encoder did not emit one.
///
/// APP0 layout after the 2-byte marker: length(2) "JFIF\0"(5) version(2)
/// units(1) x-density(2) y-density(2) thumbnail dims(2).
pub fn set_jfif_density(jpeg: &mut Vec<u8>, dpi: u16) -> Result<(), CaptureError> {
    if jpeg.len() < 4 || jpeg[0..2] != SOI {
        return Err(CaptureError::EncodeFailed(
            "output is not a JPEG stream".to_string(),
        ));
    }

    let mut pos = 2;
    while pos + 4 <= jpeg.len() && jpeg[pos] == 0xFF {
        let marker = jpeg[pos + 1];
        // Start of scan: entropy-coded data follows, no more headers
        if marker == 0xDA {
            break;
        }
        let len = u16::from_be_bytes([jpeg[pos + 2], jpeg[pos + 3]]) as usize;
        // A truncated buffer may declare a length past its own end; only
        // trust the segment when the density fields are actually present
        if marker == APP0
            && len >= 14
            && pos + 16 <= jpeg.len()
            && &jpeg[pos + 4..pos + 9] == b"JFIF\0"
        {
            jpeg[pos + 11] = 1; // units: dots per inch
            jpeg[pos + 12..pos + 14].copy_from_slice(&dpi.to_be_bytes());
            jpeg[pos + 14..pos + 16].copy_from_slice(&dpi.to_be_bytes());
            return Ok(());
        }
        pos += 2 + len;
    }

    // No JFIF header present; splice a minimal one in after SOI
    let [hi, lo] = dpi.to_be_bytes();
    let segment = [
        0xFF, APP0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x02, 0x01, hi, lo, hi, lo,
        0x00, 0x00,
    ];
    jpeg.splice(2..2, segment);
    Ok(())
}

/// Reads the density back out of a JPEG's JFIF header, if present.
/// Returns (units, x-density, y-density).
pub fn read_jfif_density(jpeg: &[u8]) -> Option<(u8, u16, u16)> {
    if jpeg.len() < 4 || jpeg[0..2] != SOI {
        return None;
    }
    let mut pos = 2;
    while pos + 4 <= jpeg.len() && jpeg[pos] == 0xFF {
        let marker = jpeg[pos + 1];
        if marker == 0xDA {
            break;
        }
        let len = u16::from_be_bytes([jpeg[pos + 2], jpeg[pos + 3]]) as usize;
        if marker == APP0
            && len >= 14
            && pos + 16 <= jpeg.len()
            && &jpeg[pos + 4..pos + 9] == b"JFIF\0"
        {
            return Some((
                jpeg[pos + 11],
                u16::from_be_bytes([jpeg[pos + 12], jpeg[pos + 13]]),
                u16::from_be_bytes([jpeg[pos + 14], jpeg[pos + 15]]),
            ));
        }
        pos += 2 + len;
    }
    None
}

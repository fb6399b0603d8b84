//! PNG encoding for surface color previews.
//!
//! A preview is the surface seen from above: one block of pixels per grid
//! cell, colored exactly like the 3D surface. Row 0 of the image is the
//! largest Y so the picture matches the plot's default orientation.

use afm_common::{RenderError, RenderResult};
use std::io::Write;
use tracing::debug;

use crate::surface::SurfacePlotSpec;

/// Largest preview edge in pixels.
pub const MAX_PREVIEW_DIMENSION: usize = 8192;

/// Rasterize a plot's face colors and encode them as an RGBA PNG.
///
/// `cell_size` is the edge length in pixels of one grid cell.
pub fn render_preview_png(spec: &SurfacePlotSpec, cell_size: usize) -> RenderResult<Vec<u8>> {
    let cell_size = cell_size.max(1);
    let (rows, cols) = spec.dimensions();
    if rows == 0 || cols == 0 {
        return Err(RenderError::EmptyGrid);
    }

    let too_large = || {
        RenderError::Encoding(format!(
            "preview of {}x{} cells at {} pixels per cell exceeds {} pixels per side",
            cols, rows, cell_size, MAX_PREVIEW_DIMENSION
        ))
    };
    let width = cols.checked_mul(cell_size).ok_or_else(too_large)?;
    let height = rows.checked_mul(cell_size).ok_or_else(too_large)?;
    if width > MAX_PREVIEW_DIMENSION || height > MAX_PREVIEW_DIMENSION {
        return Err(too_large());
    }

    let colors = spec.face_colors();
    let mut pixels = Vec::with_capacity(width * height * 4);
    for row in colors.iter().rev() {
        let mut line = Vec::with_capacity(width * 4);
        for color in row {
            for _ in 0..cell_size {
                line.extend_from_slice(&[color.r, color.g, color.b, color.a]);
            }
        }
        for _ in 0..cell_size {
            pixels.extend_from_slice(&line);
        }
    }

    debug!(width, height, "Encoding preview PNG");
    create_png(&pixels, width, height).map_err(RenderError::Encoding)
}

/// Create a PNG image from RGBA pixel data (color type 6).
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    if width == 0 || height == 0 {
        return Err(format!("invalid image size {}x{}", width, height));
    }
    if pixels.len() != width * height * 4 {
        return Err(format!(
            "expected {} bytes of RGBA data for {}x{}, got {}",
            width * height * 4,
            width,
            height,
            pixels.len()
        ));
    }

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type (RGBA)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    let idat_data =
        deflate_idat_rgba(pixels, width, height).map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk: length, type, data, CRC over type and data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Deflate RGBA image data for IDAT chunk.
fn deflate_idat_rgba(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    // Each scanline is a filter byte (0 = none) followed by the row
    let stride = width * 4;
    let mut uncompressed = Vec::with_capacity(height * (1 + stride));
    for row in pixels.chunks_exact(stride) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_signature_and_ihdr() {
        let png = create_png(&[255, 0, 0, 255, 0, 255, 0, 255], 2, 1).unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 2);
        assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 1);
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }

    #[test]
    fn test_png_rejects_wrong_length() {
        assert!(create_png(&[0, 0, 0], 1, 1).is_err());
    }
}

//! Row padding and pixel addressing for every supported bit depth.
//!
//! Rows are addressed top-down in memory (row 0 is the top of the image);
//! the bottom-up order of the file format is applied only by the encoder and
//! decoder.

use crate::depth::BitDepth;
use crate::error::BitmapError;

/// Where one pixel lives inside the pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelLocation {
    /// Offset of the first byte holding the pixel.
    pub byte_offset: usize,
    /// For packed depths, the pixel's position within that byte counted from
    /// the most significant bit. Always 0 for depths of 8 and above.
    pub bit_offset: u8,
    /// Bits occupied by the pixel (equal to the bit depth).
    pub bit_width: u8,
}

/// Bytes of color data in one row, `ceil(width * bits / 8)`.
pub fn unpadded_row_width(width: u32, depth: BitDepth) -> Option<usize> {
    (width as usize)
        .checked_mul(depth.bits() as usize)
        .map(|bits| bits.div_ceil(8))
}

/// Bytes in one stored row: the unpadded width rounded up to a multiple of 4.
pub fn raw_row_width(width: u32, depth: BitDepth) -> Option<usize> {
    unpadded_row_width(width, depth)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

/// Translate `(x, y)` into a location within a `width` x `height` buffer.
///
/// Returns [`BitmapError::OutOfRange`] when the coordinate is outside the
/// image and [`BitmapError::InvalidArgument`] when the addressed row does not
/// fit in `usize`. Padding bytes are never addressed.
pub fn locate(
    width: u32,
    height: u32,
    depth: BitDepth,
    x: u32,
    y: u32,
) -> Result<PixelLocation, BitmapError> {
    if x >= width || y >= height {
        return Err(BitmapError::OutOfRange(alloc::format!(
            "pixel ({x}, {y}) outside {width}x{height} image"
        )));
    }
    let stride = raw_row_width(width, depth).ok_or_else(|| {
        BitmapError::InvalidArgument(alloc::format!("row width overflow for width {width}"))
    })?;
    // every in-row offset is below the end of the row
    (y as usize)
        .checked_mul(stride)
        .and_then(|start| start.checked_add(stride))
        .ok_or_else(|| {
            BitmapError::InvalidArgument(alloc::format!(
                "row {y} offset overflow for a {width}x{height} image"
            ))
        })?;
    Ok(locate_in_rows(stride, depth, x, y))
}

/// Address arithmetic behind [`locate`], for callers that already checked
/// the coordinate against the image bounds.
pub(crate) fn locate_in_rows(stride: usize, depth: BitDepth, x: u32, y: u32) -> PixelLocation {
    let row_start = y as usize * stride;
    let bits = depth.bits() as usize;
    let x = x as usize;

    if bits < 8 {
        let per_byte = 8 / bits;
        PixelLocation {
            byte_offset: row_start + x / per_byte,
            bit_offset: ((x % per_byte) * bits) as u8,
            bit_width: bits as u8,
        }
    } else {
        PixelLocation {
            byte_offset: row_start + x * depth.bytes_per_pixel(),
            bit_offset: 0,
            bit_width: bits as u8,
        }
    }
}

/// Read the pixel value at `loc`. Multi-byte pixels are little-endian.
pub(crate) fn read_value(buf: &[u8], loc: PixelLocation) -> u32 {
    let width = loc.bit_width as u32;
    if width < 8 {
        let shift = 8 - loc.bit_offset as u32 - width;
        let mask = (1u32 << width) - 1;
        (buf[loc.byte_offset] as u32 >> shift) & mask
    } else {
        let n = width as usize / 8;
        buf[loc.byte_offset..loc.byte_offset + n]
            .iter()
            .rev()
            .fold(0u32, |acc, &b| (acc << 8) | b as u32)
    }
}

/// Write `value` at `loc`, leaving neighboring packed pixels untouched.
/// Bits above the pixel width are discarded.
pub(crate) fn write_value(buf: &mut [u8], loc: PixelLocation, value: u32) {
    let width = loc.bit_width as u32;
    if width < 8 {
        let shift = 8 - loc.bit_offset as u32 - width;
        let mask = (((1u32 << width) - 1) << shift) as u8;
        let byte = &mut buf[loc.byte_offset];
        *byte = (*byte & !mask) | (((value << shift) as u8) & mask);
    } else {
        let n = width as usize / 8;
        let bytes = value.to_le_bytes();
        buf[loc.byte_offset..loc.byte_offset + n].copy_from_slice(&bytes[..n]);
    }
}

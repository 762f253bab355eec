//! BMP parser for uncompressed BITMAPINFOHEADER files.
//!
//! Rows are read bottom-up for positive heights and top-down for negative
//! ones, always landing top-down in the [`Bitmap`]. Padding bytes and unused
//! trailing bits of packed rows are cleared so they never carry data.

use alloc::vec;
use alloc::vec::Vec;

use crate::bitmap::{Bitmap, buffer_layout};
use crate::color::Color;
use crate::depth::BitDepth;
use crate::error::BitmapError;
use crate::header::{BmpHeader, HEADER_SIZE, PALETTE_ENTRY_SIZE};
use crate::layout::unpadded_row_width;
use crate::limits::Limits;

pub(crate) fn decode_bmp(data: &[u8], limits: Option<&Limits>) -> Result<Bitmap, BitmapError> {
    let mut header = BmpHeader::parse(data)?;
    let depth = BitDepth::try_from(header.bit_depth)
        .map_err(|e| BitmapError::UnsupportedFormat(alloc::format!("{e}")))?;

    let width = header.width as u32;
    let top_down = header.height < 0;
    let height = header.height.unsigned_abs();

    if let Some(limits) = limits {
        limits.check(width, height, depth)?;
    }
    let (stride, len) = buffer_layout(width, height, depth)
        .map_err(|e| BitmapError::UnsupportedFormat(alloc::format!("{e}")))?;

    let palette = read_palette(data, &header, depth)?;
    let palette_bytes = if depth.is_indexed() {
        used_colors(&header, depth) * PALETTE_ENTRY_SIZE
    } else {
        0
    };
    let palette_end = HEADER_SIZE + palette_bytes;

    let offset = header.data_offset as usize;
    if offset < palette_end {
        return Err(BitmapError::UnsupportedFormat(alloc::format!(
            "pixel data offset {offset} overlaps headers/palette ending at {palette_end}"
        )));
    }
    let src = data
        .get(offset..)
        .and_then(|rest| rest.get(..len))
        .ok_or_else(|| {
            BitmapError::UnsupportedFormat(alloc::format!(
                "pixel data truncated: need {len} bytes at offset {offset}, file has {}",
                data.len()
            ))
        })?;

    let used = unpadded_row_width(width, depth).unwrap_or(stride);
    let tail_mask = trailing_bits_mask(width, depth);
    let mut pixels = vec![0u8; len];
    for (y, dst) in pixels.chunks_exact_mut(stride).enumerate() {
        let src_row = if top_down { y } else { height as usize - 1 - y };
        let start = src_row * stride;
        dst[..used].copy_from_slice(&src[start..start + used]);
        dst[used - 1] &= tail_mask;
    }

    log::debug!(
        "parsed {width}x{height} {}-bit BMP ({}), {} palette entries",
        depth.bits(),
        if top_down { "top-down" } else { "bottom-up" },
        palette.as_ref().map_or(0, Vec::len)
    );

    header.height = height as i32;
    Ok(Bitmap::from_parts(header, depth, pixels, palette))
}

/// Palette entries declared in the header; 0 means the full `2^depth`.
fn used_colors(header: &BmpHeader, depth: BitDepth) -> usize {
    match header.colors_used as usize {
        0 => depth.palette_len(),
        n => n,
    }
}

/// Read the palette that follows the 40-byte info header. Entries the file
/// does not declare stay zero.
fn read_palette(
    data: &[u8],
    header: &BmpHeader,
    depth: BitDepth,
) -> Result<Option<Vec<Color>>, BitmapError> {
    if !depth.is_indexed() {
        return Ok(None);
    }
    let count = used_colors(header, depth);
    let bytes = data
        .get(HEADER_SIZE..HEADER_SIZE + count * PALETTE_ENTRY_SIZE)
        .ok_or_else(|| {
            BitmapError::UnsupportedFormat(alloc::format!(
                "palette truncated: expected {count} entries"
            ))
        })?;

    let mut palette = vec![0; depth.palette_len()];
    for (entry, chunk) in palette.iter_mut().zip(bytes.chunks_exact(PALETTE_ENTRY_SIZE)) {
        *entry = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], 0]);
    }
    Ok(Some(palette))
}

/// Mask keeping only the bits of the last data byte that belong to pixels.
fn trailing_bits_mask(width: u32, depth: BitDepth) -> u8 {
    let bits = (width as usize * depth.bits() as usize) % 8;
    if bits == 0 { 0xFF } else { 0xFFu8 << (8 - bits) }
}

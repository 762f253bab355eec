//! BMP encoder: header, palette, then padded rows bottom-up.

use alloc::vec::Vec;

use crate::bitmap::Bitmap;

/// Encode `bmp` as a complete BMP file.
///
/// The header fields are already kept consistent by [`Bitmap`], so the
/// output length always equals `header().file_size()`.
pub(crate) fn encode_bmp(bmp: &Bitmap) -> Vec<u8> {
    let header = bmp.header();
    log::debug!(
        "encoding {}x{} {}-bit BMP: {} palette entries, {} bytes",
        bmp.width(),
        bmp.height(),
        bmp.bit_depth(),
        bmp.palette_size(),
        header.file_size()
    );

    let mut out = Vec::with_capacity(header.file_size() as usize);
    header.write_into(&mut out);

    if let Some(palette) = bmp.palette() {
        for &entry in palette {
            // B, G, R, reserved
            out.extend_from_slice(&(entry & 0x00FF_FFFF).to_le_bytes());
        }
    }

    // Positive height: the last logical row comes first.
    let stride = bmp.raw_row_width();
    for row in bmp.pixel_data().chunks_exact(stride).rev() {
        out.extend_from_slice(row);
    }

    debug_assert_eq!(out.len(), header.file_size() as usize);
    out
}

//! The owned image: header, palette and padded pixel rows.

use alloc::vec;
use alloc::vec::Vec;

use crate::color::{self, Color};
use crate::depth::BitDepth;
use crate::error::BitmapError;
use crate::header::{BmpHeader, HEADER_SIZE, PALETTE_ENTRY_SIZE};
use crate::layout::{self, PixelLocation};
use crate::limits::Limits;

/// Width and height of [`Bitmap::default`].
pub const DEFAULT_SIZE: u32 = 64;

/// An uncompressed BMP image held in memory.
///
/// Rows are stored top-down (row 0 is the top of the image), each padded to
/// a multiple of 4 bytes. Indexed depths (1, 2, 4, 8) carry a palette of
/// `2^depth` entries; direct-color depths (16, 24, 32) carry none.
///
/// Cloning performs a deep copy of both buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    header: BmpHeader,
    depth: BitDepth,
    raw_row_width: usize,
    pixels: Vec<u8>,
    palette: Option<Vec<Color>>,
}

impl Default for Bitmap {
    /// A black 64x64 24-bit image.
    fn default() -> Self {
        let depth = BitDepth::Bpp24;
        let raw_row_width = DEFAULT_SIZE as usize * depth.bytes_per_pixel();
        let mut header = BmpHeader::new(depth);
        header.width = DEFAULT_SIZE as i32;
        header.height = DEFAULT_SIZE as i32;
        let mut bmp = Self {
            header,
            depth,
            raw_row_width,
            pixels: vec![0; raw_row_width * DEFAULT_SIZE as usize],
            palette: None,
        };
        bmp.sync_header();
        bmp
    }
}

impl Bitmap {
    /// Create a zeroed image. `bits` must be 1, 2, 4, 8, 16, 24 or 32.
    pub fn new(width: u32, height: u32, bits: u16) -> Result<Self, BitmapError> {
        let depth = BitDepth::try_from(bits)?;
        let (raw_row_width, len) = buffer_layout(width, height, depth)?;
        let mut header = BmpHeader::new(depth);
        header.width = width as i32;
        header.height = height as i32;
        let mut bmp = Self {
            header,
            depth,
            raw_row_width,
            pixels: vec![0; len],
            palette: depth.is_indexed().then(|| vec![0; depth.palette_len()]),
        };
        bmp.sync_header();
        Ok(bmp)
    }

    /// Assemble a bitmap from parsed parts. Buffers must match the layout.
    pub(crate) fn from_parts(
        mut header: BmpHeader,
        depth: BitDepth,
        pixels: Vec<u8>,
        palette: Option<Vec<Color>>,
    ) -> Self {
        let width = header.width as u32;
        let raw_row_width = layout::raw_row_width(width, depth).unwrap_or(0);
        header.bit_depth = depth.bits();
        header.colors_important = 0;
        let mut bmp = Self {
            header,
            depth,
            raw_row_width,
            pixels,
            palette,
        };
        bmp.sync_header();
        bmp
    }

    // ── Configuration ───────────────────────────────────────────────

    /// Change the bit depth.
    ///
    /// Indexed depths get a fresh zeroed palette of `2^bits` entries;
    /// direct-color depths drop the palette. Pixel data is kept when the
    /// padded row width is unchanged and reallocated zeroed otherwise.
    /// A supported depth still fails with [`BitmapError::InvalidArgument`]
    /// when the current dimensions would not fit a BMP file at that depth.
    /// On error nothing changes.
    pub fn set_bit_depth(&mut self, bits: u16) -> Result<(), BitmapError> {
        let depth = BitDepth::try_from(bits)?;
        let (raw_row_width, len) = buffer_layout(self.width(), self.height(), depth)?;

        if raw_row_width != self.raw_row_width {
            log::trace!(
                "bit depth {} -> {bits}: row width {} -> {raw_row_width}, reallocating",
                self.depth.bits(),
                self.raw_row_width
            );
            self.pixels = vec![0; len];
            self.raw_row_width = raw_row_width;
        }
        self.palette = depth.is_indexed().then(|| vec![0; depth.palette_len()]);
        self.depth = depth;
        self.header.bit_depth = bits;
        self.sync_header();
        Ok(())
    }

    /// Resize the image, discarding all pixel data.
    ///
    /// Both dimensions must be positive and the resulting file must fit the
    /// 32-bit size fields of the header.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<(), BitmapError> {
        let (raw_row_width, len) = buffer_layout(width, height, self.depth)?;
        log::trace!("resize to {width}x{height}, {len} pixel bytes");
        self.header.width = width as i32;
        self.header.height = height as i32;
        self.raw_row_width = raw_row_width;
        self.pixels = vec![0; len];
        self.sync_header();
        Ok(())
    }

    /// Set the resolution in pixels per meter.
    pub fn set_resolution(&mut self, x_res: i32, y_res: i32) {
        self.header.x_res = x_res;
        self.header.y_res = y_res;
    }

    fn sync_header(&mut self) {
        let palette_bytes = self.palette_size() * PALETTE_ENTRY_SIZE;
        self.header.colors_used = self.palette_size() as u32;
        self.header.data_offset = (HEADER_SIZE + palette_bytes) as u32;
        self.header.image_size = self.pixels.len() as u32;
        self.header.file_size = (HEADER_SIZE + palette_bytes + self.pixels.len()) as u32;
    }

    // ── Information ─────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.header.width as u32
    }

    pub fn height(&self) -> u32 {
        self.header.height as u32
    }

    pub fn bit_depth(&self) -> u16 {
        self.depth.bits()
    }

    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Number of pixels (width * height).
    pub fn size(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Horizontal resolution in pixels per meter.
    pub fn x_res(&self) -> i32 {
        self.header.x_res
    }

    /// Vertical resolution in pixels per meter.
    pub fn y_res(&self) -> i32 {
        self.header.y_res
    }

    /// Number of palette entries, 0 for direct-color images.
    pub fn palette_size(&self) -> usize {
        self.palette.as_ref().map_or(0, Vec::len)
    }

    /// Bytes per stored row, including padding.
    pub fn raw_row_width(&self) -> usize {
        self.raw_row_width
    }

    /// The padded rows, top row first.
    pub fn pixel_data(&self) -> &[u8] {
        &self.pixels
    }

    pub fn palette(&self) -> Option<&[Color]> {
        self.palette.as_deref()
    }

    /// The header as it will be written by [`Bitmap::generate`].
    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    // ── Pixels ──────────────────────────────────────────────────────

    fn locate(&self, x: u32, y: u32) -> Result<PixelLocation, BitmapError> {
        layout::locate(self.width(), self.height(), self.depth, x, y)
    }

    fn index_to_xy(&self, index: usize) -> Result<(u32, u32), BitmapError> {
        if index as u64 >= self.size() {
            return Err(BitmapError::OutOfRange(alloc::format!(
                "pixel index {index} outside {} pixels",
                self.size()
            )));
        }
        let width = self.width() as usize;
        Ok(((index % width) as u32, (index / width) as u32))
    }

    /// Write a pixel. `color` is masked to the bit depth; for indexed depths
    /// it is the palette index.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<(), BitmapError> {
        let loc = self.locate(x, y)?;
        layout::write_value(&mut self.pixels, loc, color);
        Ok(())
    }

    /// Write a pixel by row-major index from the top-left corner.
    pub fn set_pixel_at(&mut self, index: usize, color: Color) -> Result<(), BitmapError> {
        let (x, y) = self.index_to_xy(index)?;
        self.set_pixel(x, y, color)
    }

    /// Read a pixel's stored value (a palette index for indexed depths).
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Color, BitmapError> {
        let loc = self.locate(x, y)?;
        Ok(layout::read_value(&self.pixels, loc))
    }

    pub fn get_pixel_at(&self, index: usize) -> Result<Color, BitmapError> {
        let (x, y) = self.index_to_xy(index)?;
        self.get_pixel(x, y)
    }

    /// Read a pixel as `0x00RRGGBB`, looking indexed values up in the
    /// palette and expanding 16-bit X1R5G5B5.
    pub fn get_color(&self, x: u32, y: u32) -> Result<Color, BitmapError> {
        let value = self.get_pixel(x, y)?;
        Ok(match self.depth {
            BitDepth::Bpp16 => color::expand_rgb555(value),
            BitDepth::Bpp24 | BitDepth::Bpp32 => value & 0x00FF_FFFF,
            _ => self.get_palette(value as usize)?,
        })
    }

    // ── Palette ─────────────────────────────────────────────────────

    fn palette_slot(&mut self, index: usize) -> Result<&mut Color, BitmapError> {
        let bits = self.depth.bits();
        let palette = self.palette.as_mut().ok_or_else(|| {
            BitmapError::OutOfRange(alloc::format!("{bits}-bit image has no palette"))
        })?;
        let len = palette.len();
        palette.get_mut(index).ok_or_else(|| {
            BitmapError::OutOfRange(alloc::format!("palette index {index} >= {len}"))
        })
    }

    /// Set a palette entry to `0x00RRGGBB`. The reserved top byte is dropped.
    pub fn set_palette(&mut self, index: usize, color: Color) -> Result<(), BitmapError> {
        *self.palette_slot(index)? = color & 0x00FF_FFFF;
        Ok(())
    }

    pub fn get_palette(&self, index: usize) -> Result<Color, BitmapError> {
        let palette = self.palette.as_deref().ok_or_else(|| {
            BitmapError::OutOfRange(alloc::format!(
                "{}-bit image has no palette",
                self.depth.bits()
            ))
        })?;
        palette.get(index).copied().ok_or_else(|| {
            BitmapError::OutOfRange(alloc::format!(
                "palette index {index} >= {}",
                palette.len()
            ))
        })
    }

    // ── Fills ───────────────────────────────────────────────────────

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        let (width, height) = (self.width(), self.height());
        self.paint(0, 0, width, height, color);
    }

    pub fn fill_row(&mut self, row: u32, color: Color) -> Result<(), BitmapError> {
        self.fill_rect(0, row, self.width(), 1, color)
    }

    pub fn fill_col(&mut self, col: u32, color: Color) -> Result<(), BitmapError> {
        self.fill_rect(col, 0, 1, self.height(), color)
    }

    /// Fill `[x, x + width) x [y, y + height)`.
    ///
    /// The whole rectangle must lie inside the image; otherwise nothing is
    /// written. An empty rectangle on the image is a no-op.
    pub fn fill_rect(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), BitmapError> {
        let fits = |start: u32, len: u32, limit: u32| {
            start < limit && start.checked_add(len).is_some_and(|end| end <= limit)
        };
        if !fits(x, width, self.width()) || !fits(y, height, self.height()) {
            return Err(BitmapError::OutOfRange(alloc::format!(
                "rectangle {width}x{height} at ({x}, {y}) outside {}x{} image",
                self.width(),
                self.height()
            )));
        }
        self.paint(x, y, width, height, color);
        Ok(())
    }

    /// Write a validated rectangle. Byte-aligned depths write each row once
    /// and copy it; packed depths go pixel by pixel.
    fn paint(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let stride = self.raw_row_width;
        let bpp = self.depth.bytes_per_pixel();
        let rows = y as usize..(y + height) as usize;

        if bpp == 0 {
            for row in rows {
                for col in x..x + width {
                    let loc = layout::locate_in_rows(stride, self.depth, col, row as u32);
                    layout::write_value(&mut self.pixels, loc, color);
                }
            }
            return;
        }

        let value = color.to_le_bytes();
        let span = x as usize * bpp..(x + width) as usize * bpp;
        for row in rows {
            let row_bytes = &mut self.pixels[row * stride..row * stride + stride];
            for px in row_bytes[span.clone()].chunks_exact_mut(bpp) {
                px.copy_from_slice(&value[..bpp]);
            }
        }
    }

    // ── Copy ────────────────────────────────────────────────────────

    /// Replace this image with a deep copy of `other`.
    pub fn copy_from(&mut self, other: &Bitmap) {
        self.clone_from(other);
    }

    /// Parse a BMP file held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        crate::decode::decode_bmp(data, None)
    }

    /// Parse a BMP file held in memory, rejecting images beyond `limits`.
    pub fn from_bytes_with_limits(data: &[u8], limits: &Limits) -> Result<Self, BitmapError> {
        crate::decode::decode_bmp(data, Some(limits))
    }

    /// Replace this image with one parsed from `data`. Unchanged on error.
    pub fn copy_bytes(&mut self, data: &[u8]) -> Result<(), BitmapError> {
        *self = Self::from_bytes(data)?;
        Ok(())
    }

    // ── Output ──────────────────────────────────────────────────────

    /// Encode to a complete BMP file.
    pub fn to_bytes(&self) -> Vec<u8> {
        crate::encode::encode_bmp(self)
    }
}

#[cfg(feature = "std")]
impl Bitmap {
    /// Read and parse a BMP file.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, BitmapError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Replace this image with the BMP file at `path`. Unchanged on error.
    pub fn copy_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), BitmapError> {
        *self = Self::open(path)?;
        Ok(())
    }

    /// Write the encoded file to `writer`.
    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> Result<(), BitmapError> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Write the image to `path`, creating or truncating the file.
    pub fn generate(&self, path: impl AsRef<std::path::Path>) -> Result<(), BitmapError> {
        use std::io::Write as _;

        let path = path.as_ref();
        log::debug!("writing {} bytes to {}", self.header.file_size, path.display());
        let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Padded row width and pixel buffer length for the given geometry.
///
/// Fails with [`BitmapError::InvalidArgument`] for zero dimensions or when
/// the file would not fit the header's 32-bit fields.
pub(crate) fn buffer_layout(
    width: u32,
    height: u32,
    depth: BitDepth,
) -> Result<(usize, usize), BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidArgument(alloc::format!(
            "dimensions {width}x{height} must be positive"
        )));
    }
    let too_large = || {
        BitmapError::InvalidArgument(alloc::format!(
            "dimensions {width}x{height} too large for a {}-bit BMP",
            depth.bits()
        ))
    };
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(too_large());
    }
    let stride = layout::raw_row_width(width, depth).ok_or_else(too_large)?;
    let len = stride.checked_mul(height as usize).ok_or_else(too_large)?;
    let file_size = len
        .checked_add(HEADER_SIZE + depth.palette_len() * PALETTE_ENTRY_SIZE)
        .ok_or_else(too_large)?;
    if file_size > u32::MAX as usize {
        return Err(too_large());
    }
    Ok((stride, len))
}

//! BITMAPFILEHEADER + BITMAPINFOHEADER model and its 54-byte encoding.

use alloc::vec::Vec;

use crate::depth::BitDepth;
use crate::error::BitmapError;

/// Size of the file header (signature, size, reserved, data offset).
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the BITMAPINFOHEADER, the only DIB header variant supported.
pub const INFO_HEADER_SIZE: usize = 40;
/// Combined header size; palette or pixel data starts here.
pub const HEADER_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// Bytes per palette entry (B, G, R, reserved).
pub const PALETTE_ENTRY_SIZE: usize = 4;

/// The two BMP headers as they appear at the start of the file.
///
/// Derived fields (`file_size`, `data_offset`, `image_size`, `colors_used`)
/// are maintained by [`crate::Bitmap`]; the header cannot be edited directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub(crate) file_size: u32,
    pub(crate) data_offset: u32,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) planes: u16,
    pub(crate) bit_depth: u16,
    pub(crate) compression: u32,
    pub(crate) image_size: u32,
    pub(crate) x_res: i32,
    pub(crate) y_res: i32,
    pub(crate) colors_used: u32,
    pub(crate) colors_important: u32,
}

impl BmpHeader {
    pub(crate) fn new(depth: BitDepth) -> Self {
        Self {
            file_size: HEADER_SIZE as u32,
            data_offset: HEADER_SIZE as u32,
            width: 0,
            height: 0,
            planes: 1,
            bit_depth: depth.bits(),
            compression: 0,
            image_size: 0,
            x_res: 0,
            y_res: 0,
            colors_used: 0,
            colors_important: 0,
        }
    }

    /// Always `b"BM"`.
    pub fn signature(&self) -> [u8; 2] {
        *b"BM"
    }

    /// Total file size in bytes: header, palette and pixel data.
    pub fn file_size(&self) -> u32 {
        self.file_size
    }

    /// Offset of the pixel data from the start of the file.
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    /// Always 40 (BITMAPINFOHEADER).
    pub fn info_header_size(&self) -> u32 {
        INFO_HEADER_SIZE as u32
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    /// Positive heights mean rows are stored bottom-up.
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn planes(&self) -> u16 {
        self.planes
    }

    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
    }

    /// Always 0 (`BI_RGB`, uncompressed) for headers produced by this crate.
    pub fn compression(&self) -> u32 {
        self.compression
    }

    /// Size of the padded pixel data in bytes.
    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    /// Horizontal resolution in pixels per meter.
    pub fn x_res(&self) -> i32 {
        self.x_res
    }

    /// Vertical resolution in pixels per meter.
    pub fn y_res(&self) -> i32 {
        self.y_res
    }

    /// Number of palette entries written after the header.
    pub fn colors_used(&self) -> u32 {
        self.colors_used
    }

    pub fn colors_important(&self) -> u32 {
        self.colors_important
    }

    /// Append the 54 header bytes to `out`.
    pub(crate) fn write_into(&self, out: &mut Vec<u8>) {
        // File header (14 bytes)
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // reserved
        out.extend_from_slice(&self.data_offset.to_le_bytes());

        // DIB header (BITMAPINFOHEADER, 40 bytes)
        out.extend_from_slice(&(INFO_HEADER_SIZE as u32).to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes()); // positive = bottom-up
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bit_depth.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_res.to_le_bytes());
        out.extend_from_slice(&self.y_res.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_important.to_le_bytes());
    }

    /// Parse and validate the headers at the start of `data`.
    ///
    /// Only uncompressed, single-plane BITMAPINFOHEADER files with a
    /// supported bit depth are accepted; anything else is
    /// [`BitmapError::UnsupportedFormat`].
    pub(crate) fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        let mut cur = Cursor::new(data);

        if cur.read_fixed_bytes::<2>()? != *b"BM" {
            return Err(unsupported("missing BM signature"));
        }
        let file_size = cur.get_u32_le()?;
        cur.skip(4)?; // reserved
        let data_offset = cur.get_u32_le()?;

        let ihsize = cur.get_u32_le()?;
        if ihsize as usize != INFO_HEADER_SIZE {
            return Err(BitmapError::UnsupportedFormat(alloc::format!(
                "DIB header size {ihsize} unsupported (only 40-byte BITMAPINFOHEADER)"
            )));
        }

        let width = cur.get_i32_le()?;
        let height = cur.get_i32_le()?;
        let planes = cur.get_u16_le()?;
        let bit_depth = cur.get_u16_le()?;
        let compression = cur.get_u32_le()?;
        let image_size = cur.get_u32_le()?;
        let x_res = cur.get_i32_le()?;
        let y_res = cur.get_i32_le()?;
        let colors_used = cur.get_u32_le()?;
        let colors_important = cur.get_u32_le()?;

        if planes != 1 {
            return Err(BitmapError::UnsupportedFormat(alloc::format!(
                "planes field is {planes}, expected 1"
            )));
        }
        if compression != 0 {
            return Err(BitmapError::UnsupportedFormat(alloc::format!(
                "compression {compression} unsupported (only uncompressed BI_RGB)"
            )));
        }
        let depth = BitDepth::try_from(bit_depth).map_err(|_| {
            BitmapError::UnsupportedFormat(alloc::format!("bit depth {bit_depth} unsupported"))
        })?;
        if width <= 0 {
            return Err(BitmapError::UnsupportedFormat(alloc::format!(
                "width {width} is not positive"
            )));
        }
        if height == 0 || height == i32::MIN {
            return Err(BitmapError::UnsupportedFormat(alloc::format!(
                "height {height} unsupported"
            )));
        }
        // Direct-color files may carry an optional color table; it is skipped.
        if depth.is_indexed() && colors_used as usize > depth.palette_len() {
            return Err(BitmapError::UnsupportedFormat(alloc::format!(
                "palette count {colors_used} exceeds {} for {bit_depth}-bit depth",
                depth.palette_len()
            )));
        }

        Ok(Self {
            file_size,
            data_offset,
            width,
            height,
            planes,
            bit_depth,
            compression,
            image_size,
            x_res,
            y_res,
            colors_used,
            colors_important,
        })
    }
}

fn unsupported(msg: &str) -> BitmapError {
    BitmapError::UnsupportedFormat(msg.into())
}

/// Little-endian reader over a byte slice. Reads past the end are errors.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        self.take(n).map(|_| ())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.data.len());
        let Some(end) = end else {
            return Err(unsupported("unexpected end of input"));
        };
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    pub(crate) fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    pub(crate) fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

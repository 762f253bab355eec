use crate::depth::BitDepth;
use crate::error::BitmapError;
use crate::layout::raw_row_width;

/// Resource limits applied when parsing BMP input.
///
/// All fields default to `None` (no limit). Limits are checked against the
/// header before any palette or pixel memory is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the padded pixel buffer in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    pub(crate) fn check(&self, width: u32, height: u32, depth: BitDepth) -> Result<(), BitmapError> {
        if let Some(max) = self.max_width.filter(|&max| width > max) {
            return Err(exceeded("width", u64::from(width), u64::from(max)));
        }
        if let Some(max) = self.max_height.filter(|&max| height > max) {
            return Err(exceeded("height", u64::from(height), u64::from(max)));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max) = self.max_pixels.filter(|&max| pixels > max) {
            return Err(exceeded("pixel count", pixels, max));
        }
        if let Some(max) = self.max_memory_bytes {
            let bytes = raw_row_width(width, depth)
                .map(|stride| stride as u64 * u64::from(height))
                .unwrap_or(u64::MAX);
            if bytes > max {
                return Err(exceeded("pixel buffer bytes", bytes, max));
            }
        }
        Ok(())
    }
}

fn exceeded(what: &str, value: u64, max: u64) -> BitmapError {
    BitmapError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
}

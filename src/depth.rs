use crate::error::BitmapError;

/// Bits used to store one pixel.
///
/// Depths of 8 and below are indexed (each pixel is a palette index);
/// 16, 24 and 32 are direct color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 2-color palette, 8 pixels per byte.
    Bpp1,
    /// 4-color palette, 4 pixels per byte.
    Bpp2,
    /// 16-color palette, 2 pixels per byte.
    Bpp4,
    /// 256-color palette, one byte per pixel.
    Bpp8,
    /// Direct color, 2 bytes per pixel (conventionally X1R5G5B5).
    Bpp16,
    /// Direct color, 3 bytes per pixel in B, G, R order.
    Bpp24,
    /// Direct color, 4 bytes per pixel in B, G, R, reserved order.
    Bpp32,
}

impl BitDepth {
    /// Number of bits per pixel.
    pub const fn bits(self) -> u16 {
        match self {
            Self::Bpp1 => 1,
            Self::Bpp2 => 2,
            Self::Bpp4 => 4,
            Self::Bpp8 => 8,
            Self::Bpp16 => 16,
            Self::Bpp24 => 24,
            Self::Bpp32 => 32,
        }
    }

    /// Whether pixel values are palette indices.
    pub const fn is_indexed(self) -> bool {
        self.bits() <= 8
    }

    /// Number of palette entries, or 0 for direct-color depths.
    pub const fn palette_len(self) -> usize {
        if self.is_indexed() {
            1 << self.bits()
        } else {
            0
        }
    }

    /// Bytes per pixel for direct-color and 8-bit depths, 0 for packed depths.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bpp1 | Self::Bpp2 | Self::Bpp4 => 0,
            Self::Bpp8 => 1,
            Self::Bpp16 => 2,
            Self::Bpp24 => 3,
            Self::Bpp32 => 4,
        }
    }

    /// Mask of the values a pixel of this depth can hold.
    pub const fn value_mask(self) -> u32 {
        match self {
            Self::Bpp32 => u32::MAX,
            other => (1u32 << other.bits()) - 1,
        }
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = BitmapError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        Ok(match bits {
            1 => Self::Bpp1,
            2 => Self::Bpp2,
            4 => Self::Bpp4,
            8 => Self::Bpp8,
            16 => Self::Bpp16,
            24 => Self::Bpp24,
            32 => Self::Bpp32,
            other => {
                return Err(BitmapError::InvalidArgument(alloc::format!(
                    "bit depth {other} unsupported (expected 1, 2, 4, 8, 16, 24 or 32)"
                )));
            }
        })
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> Self {
        depth.bits()
    }
}

//! Packed color values.

/// A 32-bit pixel value.
///
/// For 24 and 32-bit images this is `0x00RRGGBB` (stored B, G, R in the
/// file). For 16-bit images the low 16 bits are stored, conventionally
/// X1R5G5B5. For indexed images it is a palette index.
pub type Color = u32;

/// Pack 8-bit channels into `0x00RRGGBB`.
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Split `0x00RRGGBB` into `(r, g, b)`. The top byte is ignored.
pub const fn channels(color: Color) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// Pack 8-bit channels into a 16-bit X1R5G5B5 value, dropping the low bits.
pub const fn rgb555(r: u8, g: u8, b: u8) -> Color {
    (((r as u32) >> 3) << 10) | (((g as u32) >> 3) << 5) | ((b as u32) >> 3)
}

/// Expand an X1R5G5B5 value to `0x00RRGGBB`, replicating the high bits so
/// full intensity maps to 255.
pub const fn expand_rgb555(value: Color) -> Color {
    let r = scale5((value >> 10) & 0x1f);
    let g = scale5((value >> 5) & 0x1f);
    let b = scale5(value & 0x1f);
    r << 16 | g << 8 | b
}

const fn scale5(v: u32) -> u32 {
    (v << 3) | (v >> 2)
}

/// Convert an [`rgb::RGB8`] into a `0x00RRGGBB` color.
#[cfg(feature = "rgb")]
pub fn from_rgb8(px: rgb::RGB8) -> Color {
    rgb(px.r, px.g, px.b)
}

/// Convert a `0x00RRGGBB` color into an [`rgb::RGB8`].
#[cfg(feature = "rgb")]
pub fn to_rgb8(color: Color) -> rgb::RGB8 {
    let (r, g, b) = channels(color);
    rgb::RGB8::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_split() {
        assert_eq!(rgb(0x12, 0x34, 0x56), 0x12_3456);
        assert_eq!(channels(0xFF12_3456), (0x12, 0x34, 0x56));
    }

    #[test]
    fn rgb555_extremes() {
        assert_eq!(rgb555(255, 255, 255), 0x7FFF);
        assert_eq!(expand_rgb555(0x7FFF), 0xFF_FFFF);
        assert_eq!(expand_rgb555(0), 0);
        assert_eq!(expand_rgb555(rgb555(255, 0, 0)), 0xFF_0000);
        assert_eq!(expand_rgb555(rgb555(0, 0, 255)), 0x00_00FF);
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn rgb8_conversion() {
        let px = rgb::RGB8::new(1, 2, 3);
        assert_eq!(from_rgb8(px), 0x01_0203);
        assert_eq!(to_rgb8(0x01_0203), px);
    }
}

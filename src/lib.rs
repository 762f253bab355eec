//! # blimp
//!
//! Build BMP images in memory and write them as uncompressed Windows bitmaps.
//!
//! A [`Bitmap`] owns a row-padded pixel buffer and, for indexed depths, a
//! palette. Pixels are addressed by `(x, y)` from the top-left corner or by
//! row-major index, at any of the seven standard bit depths:
//!
//! | bits | pixel value            | palette |
//! |------|------------------------|---------|
//! | 1, 2, 4, 8 | palette index    | `2^bits` entries |
//! | 16   | X1R5G5B5 (low 16 bits) | none |
//! | 24   | `0x00RRGGBB`           | none |
//! | 32   | `0xXXRRGGBB`           | none |
//!
//! Output is a 14-byte file header, a 40-byte BITMAPINFOHEADER, the palette
//! and the pixel rows bottom-up. Parsing accepts the same layout back.
//!
//! ## Non-Goals
//!
//! - RLE, bitfields and V4/V5 headers
//! - Color-space conversion
//! - Multi-frame images
//!
//! ## Usage
//!
//! ```no_run
//! use blimp::{Bitmap, rgb};
//!
//! let mut bmp = Bitmap::new(4, 4, 24)?;
//! bmp.fill(rgb(0, 255, 0));
//! bmp.set_pixel(1, 2, rgb(255, 0, 0))?;
//! bmp.generate("green.bmp")?;
//!
//! let back = Bitmap::open("green.bmp")?;
//! assert_eq!(back.get_pixel(1, 2)?, 0xFF_0000);
//! # Ok::<(), blimp::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod color;
mod decode;
mod depth;
mod encode;
mod error;
mod header;
mod layout;
mod limits;

// Re-exports
pub use bitmap::{Bitmap, DEFAULT_SIZE};
pub use color::{Color, channels, expand_rgb555, rgb, rgb555};
#[cfg(feature = "rgb")]
pub use color::{from_rgb8, to_rgb8};
pub use depth::BitDepth;
pub use error::BitmapError;
pub use header::{BmpHeader, FILE_HEADER_SIZE, HEADER_SIZE, INFO_HEADER_SIZE, PALETTE_ENTRY_SIZE};
pub use layout::{PixelLocation, locate, raw_row_width, unpadded_row_width};
pub use limits::Limits;

//! Writes a horizontal rainbow as a 24-bit image and as an 8-bit
//! palettized image.

use blimp::{Bitmap, BitmapError, Color, rgb};

const WIDTH: u32 = 256;
const HEIGHT: u32 = 64;

/// Walk the six hue segments: red, yellow, green, aqua, blue, purple.
fn hue(step: u32, steps: u32) -> Color {
    let pos = step * 6 * 255 / steps;
    let (segment, t) = (pos / 255, (pos % 255) as u8);
    match segment {
        0 => rgb(255, t, 0),
        1 => rgb(255 - t, 255, 0),
        2 => rgb(0, 255, t),
        3 => rgb(0, 255 - t, 255),
        4 => rgb(t, 0, 255),
        _ => rgb(255, 0, 255 - t),
    }
}

fn main() -> Result<(), BitmapError> {
    let mut direct = Bitmap::new(WIDTH, HEIGHT, 24)?;
    for x in 0..WIDTH {
        direct.fill_col(x, hue(x, WIDTH))?;
    }
    direct.generate("rainbow24.bmp")?;

    let mut indexed = Bitmap::new(WIDTH, HEIGHT, 8)?;
    for i in 0..indexed.palette_size() {
        indexed.set_palette(i, hue(i as u32, 256))?;
    }
    for x in 0..WIDTH {
        indexed.fill_col(x, x * 256 / WIDTH)?;
    }
    indexed.generate("rainbow8.bmp")?;

    println!(
        "wrote rainbow24.bmp ({} bytes) and rainbow8.bmp ({} bytes)",
        direct.header().file_size(),
        indexed.header().file_size()
    );
    Ok(())
}

//! Hand-built BMP files exercising the parser beyond what the encoder emits.

use blimp::*;

/// Build a BITMAPINFOHEADER file. `rows` are given in file order.
fn build_bmp(
    width: i32,
    height: i32,
    bits: u16,
    palette: &[[u8; 4]],
    gap: usize,
    rows: &[&[u8]],
) -> Vec<u8> {
    let pixel_bytes: usize = rows.iter().map(|r| r.len()).sum();
    let data_offset = 54 + palette.len() * 4 + gap;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((data_offset + pixel_bytes) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // image size may be 0
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&(palette.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend(std::iter::repeat_n(0xEEu8, gap));
    for row in rows {
        out.extend_from_slice(row);
    }
    out
}

// ── Accepted variants ────────────────────────────────────────────────

#[test]
fn bottom_up_24bit() {
    // 2x2: file row 0 is the bottom of the image
    let data = build_bmp(
        2,
        2,
        24,
        &[],
        0,
        &[
            &[0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0, 0], // red, green
            &[0xFF, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0, 0], // blue, white
        ],
    );
    let bmp = Bitmap::from_bytes(&data).unwrap();
    assert_eq!(bmp.get_pixel(0, 0).unwrap(), 0x00_00FF);
    assert_eq!(bmp.get_pixel(1, 0).unwrap(), 0xFF_FFFF);
    assert_eq!(bmp.get_pixel(0, 1).unwrap(), 0xFF_0000);
    assert_eq!(bmp.get_pixel(1, 1).unwrap(), 0x00_FF00);
}

#[test]
fn top_down_is_normalized() {
    let data = build_bmp(1, -2, 8, &[[0; 4], [0; 4]], 0, &[&[1, 0, 0, 0], &[0, 0, 0, 0]]);
    let bmp = Bitmap::from_bytes(&data).unwrap();
    assert_eq!(bmp.height(), 2);
    assert_eq!(bmp.header().height(), 2);
    assert_eq!(bmp.get_pixel(0, 0).unwrap(), 1);
    assert_eq!(bmp.get_pixel(0, 1).unwrap(), 0);

    // written back bottom-up
    let out = bmp.to_bytes();
    assert_eq!(&out[22..26], &2i32.to_le_bytes());
    let pixels = &out[54 + 256 * 4..];
    assert_eq!(pixels, &[0, 0, 0, 0, 1, 0, 0, 0]);
}

#[test]
fn short_palette_is_zero_extended() {
    let data = build_bmp(
        2,
        1,
        4,
        &[[0x10, 0x20, 0x30, 0x00], [0x40, 0x50, 0x60, 0x99]],
        0,
        &[&[0x10, 0, 0, 0]],
    );
    let bmp = Bitmap::from_bytes(&data).unwrap();
    assert_eq!(bmp.palette_size(), 16);
    assert_eq!(bmp.get_palette(0).unwrap(), 0x30_2010);
    // reserved byte ignored
    assert_eq!(bmp.get_palette(1).unwrap(), 0x60_5040);
    assert_eq!(bmp.get_palette(2).unwrap(), 0);
    assert_eq!(bmp.get_color(0, 0).unwrap(), 0x60_5040);
    assert_eq!(bmp.get_color(1, 0).unwrap(), 0x30_2010);
    // re-encoded with the full palette
    assert_eq!(bmp.header().colors_used(), 16);
}

#[test]
fn honors_data_offset_gap() {
    let data = build_bmp(1, 1, 24, &[], 6, &[&[1, 2, 3, 0]]);
    let bmp = Bitmap::from_bytes(&data).unwrap();
    assert_eq!(bmp.get_pixel(0, 0).unwrap(), 0x03_0201);
    assert_eq!(bmp.header().data_offset(), 54);
}

#[test]
fn padding_and_trailing_bits_are_cleared() {
    // 5x1 1-bit with garbage everywhere
    let palette = [[0; 4], [0xFF, 0xFF, 0xFF, 0]];
    let data = build_bmp(5, 1, 1, &palette, 0, &[&[0b1010_1111, 0xAA, 0xBB, 0xCC]]);
    let bmp = Bitmap::from_bytes(&data).unwrap();
    assert_eq!(bmp.pixel_data(), &[0b1010_1000, 0, 0, 0]);
    let values: Vec<_> = (0..5).map(|x| bmp.get_pixel(x, 0).unwrap()).collect();
    assert_eq!(values, [1, 0, 1, 0, 1]);
}

// ── Rejected variants ────────────────────────────────────────────────

fn expect_unsupported(data: &[u8], what: &str) {
    match Bitmap::from_bytes(data) {
        Err(BitmapError::UnsupportedFormat(_)) => {}
        other => panic!("{what}: expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn rejects_malformed_input() {
    let good = build_bmp(2, 2, 24, &[], 0, &[&[0; 8], &[0; 8]]);
    assert!(Bitmap::from_bytes(&good).is_ok());

    expect_unsupported(b"", "empty");
    expect_unsupported(b"BM", "signature only");
    expect_unsupported(&good[..54], "no pixel data");
    expect_unsupported(&good[..good.len() - 1], "truncated pixel data");

    let mut v5 = good.clone();
    v5[14..18].copy_from_slice(&124u32.to_le_bytes());
    expect_unsupported(&v5, "BITMAPV5HEADER");

    let mut rle = good.clone();
    rle[30..34].copy_from_slice(&1u32.to_le_bytes());
    expect_unsupported(&rle, "RLE8");

    let mut depth = good.clone();
    depth[28..30].copy_from_slice(&12u16.to_le_bytes());
    expect_unsupported(&depth, "12-bit");

    let mut overlap = good.clone();
    overlap[10..14].copy_from_slice(&20u32.to_le_bytes());
    expect_unsupported(&overlap, "data offset inside header");

    let mut negative_width = good;
    negative_width[18..22].copy_from_slice(&(-2i32).to_le_bytes());
    expect_unsupported(&negative_width, "negative width");
}

#[test]
fn rejects_truncated_palette() {
    let mut data = build_bmp(1, 1, 8, &[[0; 4]; 4], 0, &[&[0; 4]]);
    // claim 200 colors with only 4 present
    data[46..50].copy_from_slice(&200u32.to_le_bytes());
    data.truncate(54 + 16);
    expect_unsupported(&data, "truncated palette");
}

#[test]
fn rejects_oversized_palette_count() {
    let data = build_bmp(1, 1, 1, &[[0; 4]; 3], 0, &[&[0; 4]]);
    expect_unsupported(&data, "3 colors for 1-bit");
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_reject_large() {
    let data = Bitmap::new(8, 4, 24).unwrap().to_bytes();

    let ok = Limits {
        max_pixels: Some(32),
        ..Default::default()
    };
    assert!(Bitmap::from_bytes_with_limits(&data, &ok).is_ok());

    for limits in [
        Limits {
            max_width: Some(7),
            ..Default::default()
        },
        Limits {
            max_height: Some(3),
            ..Default::default()
        },
        Limits {
            max_pixels: Some(31),
            ..Default::default()
        },
        Limits {
            max_memory_bytes: Some(95),
            ..Default::default()
        },
    ] {
        match Bitmap::from_bytes_with_limits(&data, &limits) {
            Err(BitmapError::LimitExceeded(_)) => {}
            other => panic!("expected LimitExceeded for {limits:?}, got {other:?}"),
        }
    }
}

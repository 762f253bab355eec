use blimp::*;

fn u32_at(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(data[off..off + 4].try_into().unwrap())
}

fn patterned(w: u32, h: u32, bits: u16) -> Bitmap {
    let mut bmp = Bitmap::new(w, h, bits).unwrap();
    for i in 0..bmp.palette_size() {
        bmp.set_palette(i, (i as u32).wrapping_mul(0x01_0F1D) & 0xFF_FFFF)
            .unwrap();
    }
    let mut state: u32 = 0xDEAD_BEEF;
    for idx in 0..(w * h) as usize {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        bmp.set_pixel_at(idx, state).unwrap();
    }
    bmp.set_resolution(2835, 3780);
    bmp
}

#[test]
fn green_4x4_24bit_layout() {
    let mut bmp = Bitmap::new(4, 4, 24).unwrap();
    bmp.fill(0x00_FF00);
    let data = bmp.to_bytes();

    assert_eq!(bmp.raw_row_width(), 12);
    assert_eq!(data.len(), 54 + 4 * 12);
    assert_eq!(&data[0..2], b"BM");
    assert_eq!(u32_at(&data, 2), 54 + 48);
    assert_eq!(u32_at(&data, 10), 54); // no palette
    assert_eq!(u32_at(&data, 14), 40);
    assert_eq!(u32_at(&data, 46), 0);
    for px in data[54..].chunks_exact(3) {
        assert_eq!(px, &[0x00, 0xFF, 0x00]);
    }
}

#[test]
fn rows_are_written_bottom_up() {
    let mut bmp = Bitmap::new(2, 3, 8).unwrap();
    bmp.fill_row(0, 1).unwrap();
    bmp.fill_row(1, 2).unwrap();
    bmp.fill_row(2, 3).unwrap();
    let data = bmp.to_bytes();

    let offset = 54 + 256 * 4;
    assert_eq!(u32_at(&data, 10) as usize, offset);
    assert_eq!(&data[offset..], &[3, 3, 0, 0, 2, 2, 0, 0, 1, 1, 0, 0]);
}

#[test]
fn palette_written_in_index_order() {
    let mut bmp = Bitmap::new(1, 1, 1).unwrap();
    bmp.set_palette(0, 0x42_F44E).unwrap();
    bmp.set_palette(1, 0xF7_1D5E).unwrap();
    let data = bmp.to_bytes();

    assert_eq!(u32_at(&data, 46), 2);
    assert_eq!(u32_at(&data, 10), 54 + 8);
    assert_eq!(&data[54..62], &[0x4E, 0xF4, 0x42, 0x00, 0x5E, 0x1D, 0xF7, 0x00]);
    assert_eq!(data.len(), 54 + 8 + 4);
}

#[test]
fn bytes_roundtrip_all_depths() {
    for bits in [1u16, 2, 4, 8, 16, 24, 32] {
        for (w, h) in [(1u32, 1u32), (5, 1), (3, 7), (17, 5)] {
            let bmp = patterned(w, h, bits);
            let back = Bitmap::from_bytes(&bmp.to_bytes()).unwrap();
            assert_eq!(back.width(), w);
            assert_eq!(back.height(), h);
            assert_eq!(back.bit_depth(), bits);
            assert_eq!(back.palette(), bmp.palette(), "{bits}-bit {w}x{h}");
            assert_eq!(back.x_res(), 2835);
            assert_eq!(back.y_res(), 3780);
            for y in 0..h {
                for x in 0..w {
                    assert_eq!(
                        back.get_pixel(x, y).unwrap(),
                        bmp.get_pixel(x, y).unwrap(),
                        "{bits}-bit {w}x{h} at ({x}, {y})"
                    );
                }
            }
            assert_eq!(back, bmp);
        }
    }
}

#[test]
fn file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bmp");

    let bmp = patterned(6, 4, 4);
    bmp.generate(&path).unwrap();
    assert_eq!(
        std::fs::metadata(&path).unwrap().len(),
        u64::from(bmp.header().file_size())
    );

    let opened = Bitmap::open(&path).unwrap();
    assert_eq!(opened, bmp);

    let mut copied = Bitmap::default();
    copied.copy_file(&path).unwrap();
    assert_eq!(copied, bmp);
}

#[test]
fn generate_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.bmp");
    match Bitmap::default().generate(&path) {
        Err(BitmapError::Io(_)) => {}
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn copy_file_failure_keeps_instance() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.bmp");
    std::fs::write(&bad, b"BMnot really a bitmap").unwrap();

    let mut bmp = patterned(3, 3, 24);
    let before = bmp.clone();
    assert!(matches!(
        bmp.copy_file(&bad),
        Err(BitmapError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        bmp.copy_file(dir.path().join("absent.bmp")),
        Err(BitmapError::Io(_))
    ));
    assert_eq!(bmp, before);
}

#[test]
fn write_to_matches_to_bytes() {
    let bmp = patterned(5, 2, 16);
    let mut sink = Vec::new();
    bmp.write_to(&mut sink).unwrap();
    assert_eq!(sink, bmp.to_bytes());
}

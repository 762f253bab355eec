#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
    fs::write(format!("{dir}/bmp_1x1_24.bmp"), &bmp).unwrap();

    // 5x1 1-bit with a 2-entry palette
    let mut mono = vec![0u8; 54 + 8 + 4];
    mono[..54].copy_from_slice(&bmp[..54]);
    mono[2..6].copy_from_slice(&66u32.to_le_bytes());
    mono[10..14].copy_from_slice(&62u32.to_le_bytes());
    mono[18..22].copy_from_slice(&5i32.to_le_bytes());
    mono[28..30].copy_from_slice(&1u16.to_le_bytes());
    mono[46..50].copy_from_slice(&2u32.to_le_bytes());
    mono[58..61].copy_from_slice(&[0xff, 0xff, 0xff]); // white
    mono[62] = 0b1010_1000;
    fs::write(format!("{dir}/bmp_5x1_1.bmp"), &mono).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/header_only.bin"), &bmp[..54]).unwrap();

    println!("Generated seed corpus in {dir}/");
}

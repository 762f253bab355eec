#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing must never panic, and anything accepted must be addressable
    let Ok(bmp) = blimp::Bitmap::from_bytes(data) else {
        return;
    };
    let _ = bmp.get_color(bmp.width() - 1, bmp.height() - 1);
});

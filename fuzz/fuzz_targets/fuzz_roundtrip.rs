#![no_main]
use blimp::Bitmap;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // If we can parse it, re-encoding and parsing again must produce an identical image
    let limits = blimp::Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let Ok(parsed) = Bitmap::from_bytes_with_limits(data, &limits) else {
        return;
    };

    let encoded = parsed.to_bytes();
    assert_eq!(encoded.len(), parsed.header().file_size() as usize);

    let Ok(reparsed) = Bitmap::from_bytes(&encoded) else {
        panic!("re-encoded data failed to parse");
    };
    assert_eq!(parsed, reparsed, "roundtrip mismatch");
});

#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Loading arbitrary bytes must never panic
    let _ = zenmono::BitmapInfo::from_bytes(data);
    let Ok(bmp) = zenmono::MonoBitmap::from_bytes(data) else {
        return;
    };

    // Anything that loads is canonical: it reloads strictly to the same bytes
    let again = zenmono::LoadRequest::new(bmp.as_bytes())
        .with_strictness(zenmono::Strictness::Strict)
        .load()
        .expect("normalized bitmap failed strict load");
    assert_eq!(again.as_bytes(), bmp.as_bytes(), "reload mismatch");
});

#![no_main]
use libfuzzer_sys::fuzz_target;
use zenmono::*;

fn word(data: &[u8], i: usize) -> i32 {
    let b = |k: usize| data.get(i + k).copied().unwrap_or(0);
    i16::from_le_bytes([b(0), b(1)]) as i32
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let w = u32::from(data[0] % 64) + 1;
    let h = u32::from(data[1] % 64) + 1;
    let Ok(mut bmp) = MonoBitmap::new(w, h) else {
        return;
    };

    // Each 9-byte chunk is one drawing command; none may panic
    for cmd in data[2..].chunks(9) {
        let color = Color::from_low_bit(cmd[0] >> 4);
        let (x0, y0, x1, y1) = (word(cmd, 1), word(cmd, 3), word(cmd, 5), word(cmd, 7));
        match cmd[0] % 4 {
            0 => bmp.set_pixel(x0 as u32, y0 as u32, color),
            1 => bmp.draw_line(x0, y0, x1, y1, color),
            2 => bmp.draw_rect(x0 as u32, y0 as u32, x1 as u32, y1 as u32, color),
            _ => bmp.fill(color),
        }
    }

    let size = bmp.file_size() as usize;
    assert_eq!(bmp.as_bytes().len(), size);

    let dw = u32::from(data[0] / 64) * 17 + 1;
    let dh = u32::from(data[1] / 64) * 13 + 1;
    let resized = bmp
        .resize_bicubic(dw, dh, enough::Unstoppable)
        .expect("small resize failed");
    assert_eq!((resized.width(), resized.height()), (dw, dh));
    assert!(resized.count_white() <= u64::from(dw) * u64::from(dh));
});

#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_load";
    fs::create_dir_all(dir).unwrap();

    // Minimal 1x1 monochrome BMP: 62 header bytes + one 4-byte row
    let mut bmp = vec![0u8; 66];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&66u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&62u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&1u16.to_le_bytes()); // bpp
    bmp[34..38].copy_from_slice(&4u32.to_le_bytes()); // image size
    bmp[46..50].copy_from_slice(&2u32.to_le_bytes()); // colors used
    bmp[58..61].copy_from_slice(&[0xff, 0xff, 0xff]); // white palette entry
    bmp[62] = 0x80; // the single pixel is white
    fs::write(format!("{dir}/mono_1x1.bmp"), &bmp).unwrap();

    // Top-down variant (rejected) and a padding-dirty row
    let mut top_down = bmp.clone();
    top_down[22..26].copy_from_slice(&(-1i32).to_le_bytes());
    fs::write(format!("{dir}/top_down.bmp"), top_down).unwrap();
    let mut dirty = bmp.clone();
    dirty[62..66].copy_from_slice(&[0xff; 4]);
    fs::write(format!("{dir}/dirty_padding.bmp"), dirty).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/header_only.bin"), &bmp[..62]).unwrap();

    println!("Generated seed corpus in {dir}/");
}

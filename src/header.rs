//! File layout of a 1-bit BMP: 14-byte file header, 40-byte
//! BITMAPINFOHEADER, two-entry palette, then bottom-up pixel rows
//! padded to 4 bytes.

use alloc::format;

use crate::codec::{read_i32_le, read_u16_le, read_u32_le, write_u16_le, write_u32_le};
use crate::error::BitmapError;

pub(crate) const FILE_HEADER_SIZE: usize = 14;
pub(crate) const INFO_HEADER_SIZE: usize = 40;
pub(crate) const PALETTE_SIZE: usize = 2 * 4;
/// Offset of the first pixel row; every bitmap this crate writes uses it.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;

const MAGIC: &[u8; 2] = b"BM";
/// Black (B, G, R, reserved), then white.
const PALETTE: [u8; PALETTE_SIZE] = [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0];

// File header
const OFF_FILE_SIZE: usize = 0x02;
const OFF_RESERVED1: usize = 0x06;
const OFF_RESERVED2: usize = 0x08;
const OFF_DATA_OFFSET: usize = 0x0A;
// Info header
const OFF_INFO_SIZE: usize = 0x0E;
const OFF_WIDTH: usize = 0x12;
const OFF_HEIGHT: usize = 0x16;
const OFF_PLANES: usize = 0x1A;
const OFF_BIT_COUNT: usize = 0x1C;
const OFF_COMPRESSION: usize = 0x1E;
const OFF_IMAGE_SIZE: usize = 0x22;
const OFF_X_PPM: usize = 0x26;
const OFF_Y_PPM: usize = 0x2A;
const OFF_COLORS_USED: usize = 0x2E;
const OFF_COLORS_IMPORTANT: usize = 0x32;
const OFF_PALETTE: usize = 0x36;

/// Bytes used to store one pixel row: one bit per pixel, rounded up to
/// a multiple of 4 bytes.
#[inline]
pub const fn bytes_per_row(width: u32) -> u32 {
    width.div_ceil(32) * 4
}

/// Largest width or height: both are stored as signed 32-bit fields.
pub(crate) const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Sizes derived from the dimensions. All of them fit the 32-bit
/// header fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub bytes_per_row: usize,
    pub pixel_data_size: usize,
    pub file_size: usize,
}

impl Layout {
    pub(crate) fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::ZeroDimension { width, height });
        }
        let too_large = || BitmapError::DimensionsTooLarge { width, height };
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(too_large());
        }
        let row = bytes_per_row(width);
        let pixel_data_size = row.checked_mul(height).ok_or_else(too_large)?;
        let file_size = pixel_data_size
            .checked_add(PIXEL_DATA_OFFSET as u32)
            .ok_or_else(too_large)?;
        Ok(Self {
            bytes_per_row: row as usize,
            pixel_data_size: usize::try_from(pixel_data_size).map_err(|_| too_large())?,
            file_size: usize::try_from(file_size).map_err(|_| too_large())?,
        })
    }
}

/// Write every header and palette field. `buf` must be at least
/// `PIXEL_DATA_OFFSET` bytes; pixel data is left alone.
pub(crate) fn write_header(buf: &mut [u8], width: u32, height: u32, layout: &Layout) {
    buf[0..2].copy_from_slice(MAGIC);
    write_u32_le(buf, OFF_FILE_SIZE, layout.file_size as u32);
    write_u16_le(buf, OFF_RESERVED1, 0);
    write_u16_le(buf, OFF_RESERVED2, 0);
    write_u32_le(buf, OFF_DATA_OFFSET, PIXEL_DATA_OFFSET as u32);

    write_u32_le(buf, OFF_INFO_SIZE, INFO_HEADER_SIZE as u32);
    write_u32_le(buf, OFF_WIDTH, width);
    write_u32_le(buf, OFF_HEIGHT, height); // positive = bottom-up
    write_u16_le(buf, OFF_PLANES, 1);
    write_u16_le(buf, OFF_BIT_COUNT, 1);
    write_u32_le(buf, OFF_COMPRESSION, 0);
    write_u32_le(buf, OFF_IMAGE_SIZE, layout.pixel_data_size as u32);
    write_u32_le(buf, OFF_X_PPM, 0);
    write_u32_le(buf, OFF_Y_PPM, 0);
    write_u32_le(buf, OFF_COLORS_USED, 2);
    write_u32_le(buf, OFF_COLORS_IMPORTANT, 0);

    buf[OFF_PALETTE..OFF_PALETTE + PALETTE_SIZE].copy_from_slice(&PALETTE);
}

pub(crate) fn width(buf: &[u8]) -> u32 {
    read_u32_le(buf, OFF_WIDTH)
}

pub(crate) fn height(buf: &[u8]) -> u32 {
    read_u32_le(buf, OFF_HEIGHT)
}

pub(crate) fn file_size(buf: &[u8]) -> u32 {
    read_u32_le(buf, OFF_FILE_SIZE)
}

pub(crate) fn pixel_data_size(buf: &[u8]) -> u32 {
    read_u32_le(buf, OFF_IMAGE_SIZE)
}

pub(crate) fn pixel_data_offset(buf: &[u8]) -> u32 {
    read_u32_le(buf, OFF_DATA_OFFSET)
}

// ── Parsing external buffers ────────────────────────────────────────

/// How strictly [`crate::LoadRequest`] validates a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Every header field must hold exactly the value this crate writes,
    /// and the buffer length must equal the declared file size.
    Strict,

    /// Default. Fields that do not affect pixel addressing (file size,
    /// image size, resolution, color counts, reserved) are ignored and
    /// rewritten on load; trailing bytes are dropped. Rejects anything
    /// that changes how pixels are addressed or rendered.
    #[default]
    Standard,
}

/// Dimensions and sizes of a monochrome bitmap buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapInfo {
    pub width: u32,
    pub height: u32,
    pub bytes_per_row: u32,
    pub pixel_data_size: u32,
    pub file_size: u32,
}

impl BitmapInfo {
    /// Probe a buffer's header without copying pixel data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        parse_header(data, Strictness::Standard)
    }
}

pub(crate) fn parse_header(data: &[u8], strictness: Strictness) -> Result<BitmapInfo, BitmapError> {
    if data.len() < PIXEL_DATA_OFFSET {
        return Err(BitmapError::UnexpectedEof);
    }
    if &data[0..2] != MAGIC {
        return Err(BitmapError::InvalidHeader("missing BM magic".into()));
    }

    let info_size = read_u32_le(data, OFF_INFO_SIZE);
    if info_size as usize != INFO_HEADER_SIZE {
        return Err(BitmapError::UnsupportedVariant(format!(
            "info header size {info_size}, only the 40-byte header is supported"
        )));
    }
    let data_offset = pixel_data_offset(data);
    if data_offset as usize != PIXEL_DATA_OFFSET {
        return Err(BitmapError::UnsupportedVariant(format!(
            "pixel data offset {data_offset}, expected {PIXEL_DATA_OFFSET}"
        )));
    }

    let raw_width = read_i32_le(data, OFF_WIDTH);
    let raw_height = read_i32_le(data, OFF_HEIGHT);
    if raw_width < 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "negative width {raw_width}"
        )));
    }
    if raw_height < 0 {
        return Err(BitmapError::UnsupportedVariant(
            "top-down row order (negative height)".into(),
        ));
    }

    let planes = read_u16_le(data, OFF_PLANES);
    if planes != 1 {
        return Err(BitmapError::InvalidHeader(format!(
            "planes must be 1, got {planes}"
        )));
    }
    let bit_count = read_u16_le(data, OFF_BIT_COUNT);
    if bit_count != 1 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "{bit_count} bits per pixel, only 1 is supported"
        )));
    }
    let compression = read_u32_le(data, OFF_COMPRESSION);
    if compression != 0 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "compression {compression}, only uncompressed is supported"
        )));
    }
    if data[OFF_PALETTE..OFF_PALETTE + PALETTE_SIZE] != PALETTE {
        return Err(BitmapError::InvalidHeader(
            "palette is not black/white".into(),
        ));
    }

    let (width, height) = (raw_width as u32, raw_height as u32);
    let layout = Layout::new(width, height)?;
    if data.len() < layout.file_size {
        return Err(BitmapError::BufferTooSmall {
            needed: layout.file_size,
            actual: data.len(),
        });
    }

    if strictness == Strictness::Strict {
        check_strict(data, &layout)?;
    }

    Ok(BitmapInfo {
        width,
        height,
        bytes_per_row: layout.bytes_per_row as u32,
        pixel_data_size: layout.pixel_data_size as u32,
        file_size: layout.file_size as u32,
    })
}

fn check_strict(data: &[u8], layout: &Layout) -> Result<(), BitmapError> {
    let declared = file_size(data);
    if declared as usize != data.len() || data.len() != layout.file_size {
        return Err(BitmapError::InvalidHeader(format!(
            "file size field {declared}, buffer {} bytes, expected {}",
            data.len(),
            layout.file_size
        )));
    }
    let image_size = pixel_data_size(data);
    if image_size as usize != layout.pixel_data_size {
        return Err(BitmapError::InvalidHeader(format!(
            "image size field {image_size}, expected {}",
            layout.pixel_data_size
        )));
    }
    let colors_used = read_u32_le(data, OFF_COLORS_USED);
    if colors_used != 2 {
        return Err(BitmapError::InvalidHeader(format!(
            "palette color count {colors_used}, expected 2"
        )));
    }
    let zero_fields = [
        ("reserved1", u32::from(read_u16_le(data, OFF_RESERVED1))),
        ("reserved2", u32::from(read_u16_le(data, OFF_RESERVED2))),
        ("x resolution", read_u32_le(data, OFF_X_PPM)),
        ("y resolution", read_u32_le(data, OFF_Y_PPM)),
        ("important colors", read_u32_le(data, OFF_COLORS_IMPORTANT)),
    ];
    for (name, value) in zero_fields {
        if value != 0 {
            return Err(BitmapError::InvalidHeader(format!(
                "{name} must be 0, got {value}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn header_for(width: u32, height: u32) -> alloc::vec::Vec<u8> {
        let layout = Layout::new(width, height).unwrap();
        let mut buf = vec![0u8; layout.file_size];
        write_header(&mut buf, width, height, &layout);
        buf
    }

    #[test]
    fn row_bytes_round_to_four() {
        assert_eq!(bytes_per_row(1), 4);
        assert_eq!(bytes_per_row(32), 4);
        assert_eq!(bytes_per_row(33), 8);
        assert_eq!(bytes_per_row(100), 16);
        assert_eq!(bytes_per_row(256), 32);
        assert_eq!(bytes_per_row(512), 64);
        assert_eq!(bytes_per_row(u32::MAX), 1 << 29);
        for w in 1..=600 {
            let row = bytes_per_row(w);
            assert_eq!(row % 4, 0, "width {w}");
            assert!(row >= w.div_ceil(8), "width {w}");
            assert!(row < w.div_ceil(8) + 4, "width {w}");
        }
    }

    #[test]
    fn layout_rejects_zero_and_overflow() {
        assert!(matches!(
            Layout::new(0, 5),
            Err(BitmapError::ZeroDimension { .. })
        ));
        assert!(matches!(
            Layout::new(5, 0),
            Err(BitmapError::ZeroDimension { .. })
        ));
        assert!(matches!(
            Layout::new(u32::MAX, u32::MAX),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn dimensions_must_fit_signed_fields() {
        for (w, h) in [(MAX_DIMENSION + 1, 1), (1, MAX_DIMENSION + 1), (u32::MAX, 1)] {
            assert!(
                matches!(
                    Layout::new(w, h),
                    Err(BitmapError::DimensionsTooLarge { .. })
                ),
                "{w}x{h}"
            );
        }

        let layout = Layout::new(MAX_DIMENSION, 1).unwrap();
        assert_eq!(layout.bytes_per_row, 1 << 28);
        let mut buf = [0u8; PIXEL_DATA_OFFSET];
        write_header(&mut buf, MAX_DIMENSION, 1, &layout);
        assert_eq!(read_i32_le(&buf, OFF_WIDTH), i32::MAX);
    }

    #[test]
    fn header_bytes_match_wire_layout() {
        let buf = header_for(3, 2);
        let expected: [u8; PIXEL_DATA_OFFSET] = [
            b'B', b'M', 70, 0, 0, 0, 0, 0, 0, 0, 62, 0, 0, 0, // file header
            40, 0, 0, 0, 3, 0, 0, 0, 2, 0, 0, 0, 1, 0, 1, 0, // size, w, h, planes, bpp
            0, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // compression, image size, ppm
            2, 0, 0, 0, 0, 0, 0, 0, // colors used, important
            0, 0, 0, 0, 255, 255, 255, 0, // palette
        ];
        assert_eq!(&buf[..PIXEL_DATA_OFFSET], &expected[..]);
        assert_eq!(buf.len(), 70);
    }

    #[test]
    fn accessors_decode_fields() {
        let buf = header_for(100, 100);
        assert_eq!(width(&buf), 100);
        assert_eq!(height(&buf), 100);
        assert_eq!(pixel_data_size(&buf), 1600);
        assert_eq!(file_size(&buf), 1662);
        assert_eq!(pixel_data_offset(&buf), 62);
    }

    #[test]
    fn parse_accepts_own_output_strictly() {
        let buf = header_for(17, 9);
        let info = parse_header(&buf, Strictness::Strict).unwrap();
        assert_eq!(info.width, 17);
        assert_eq!(info.height, 9);
        assert_eq!(info.bytes_per_row, 4);
        assert_eq!(info.file_size as usize, buf.len());
    }

    #[test]
    fn parse_rejects_other_depths() {
        let mut buf = header_for(4, 4);
        write_u16_le(&mut buf, OFF_BIT_COUNT, 8);
        assert!(matches!(
            parse_header(&buf, Strictness::Standard),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn parse_rejects_top_down() {
        let mut buf = header_for(4, 4);
        write_u32_le(&mut buf, OFF_HEIGHT, (-4i32) as u32);
        assert!(matches!(
            parse_header(&buf, Strictness::Standard),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn strictness_decides_on_resolution_fields() {
        let mut buf = header_for(4, 4);
        write_u32_le(&mut buf, OFF_X_PPM, 2835);
        write_u32_le(&mut buf, OFF_FILE_SIZE, 0);
        assert!(parse_header(&buf, Strictness::Standard).is_ok());
        assert!(matches!(
            parse_header(&buf, Strictness::Strict),
            Err(BitmapError::InvalidHeader(_))
        ));
    }

    #[test]
    fn parse_reports_truncated_pixels() {
        let buf = header_for(64, 4);
        assert!(matches!(
            parse_header(&buf[..buf.len() - 1], Strictness::Standard),
            Err(BitmapError::BufferTooSmall { needed: 94, actual: 93 })
        ));
        assert!(matches!(
            parse_header(&buf[..10], Strictness::Standard),
            Err(BitmapError::UnexpectedEof)
        ));
    }
}

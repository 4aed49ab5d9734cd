use alloc::vec::Vec;
use core::fmt;

use crate::color::Color;
use crate::error::BitmapError;
use crate::header::{self, Layout, PIXEL_DATA_OFFSET};
use crate::limits::Limits;

/// A 1-bit-per-pixel image held as a complete BMP file in memory.
///
/// The buffer is always exactly [`file_size`](Self::file_size) bytes:
/// headers, the fixed black/white palette, then bottom-up rows padded
/// to 4 bytes. Pixel coordinates have their origin at the top-left.
///
/// Writes outside the image are ignored and reads outside it return
/// `None`; neither is an error.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MonoBitmap {
    data: Vec<u8>,
}

impl MonoBitmap {
    /// Create an all-black bitmap.
    ///
    /// Fails only when the dimensions are zero or overflow the 32-bit
    /// header fields, or when the allocation itself fails.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        Self::create(width, height, None)
    }

    /// Like [`new`](Self::new), rejecting sizes beyond `limits` first.
    pub fn with_limits(width: u32, height: u32, limits: &Limits) -> Result<Self, BitmapError> {
        Self::create(width, height, Some(limits))
    }

    pub(crate) fn create(
        width: u32,
        height: u32,
        limits: Option<&Limits>,
    ) -> Result<Self, BitmapError> {
        let layout = match limits {
            Some(limits) => limits.layout(width, height)?,
            None => Layout::new(width, height)?,
        };
        let mut data = alloc_zeroed(layout.file_size)?;
        header::write_header(&mut data, width, height, &layout);
        Ok(Self { data })
    }

    /// Wrap a buffer that has already been validated and normalized.
    pub(crate) fn from_raw(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Byte-for-byte copy with its own storage, reporting allocation
    /// failure instead of aborting like [`Clone`] does.
    pub fn try_clone(&self) -> Result<Self, BitmapError> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| BitmapError::AllocationFailed {
                bytes: self.data.len(),
            })?;
        data.extend_from_slice(&self.data);
        Ok(Self { data })
    }

    pub fn width(&self) -> u32 {
        header::width(&self.data)
    }

    pub fn height(&self) -> u32 {
        header::height(&self.data)
    }

    /// Total size in bytes, as recorded in the file header.
    pub fn file_size(&self) -> u32 {
        header::file_size(&self.data)
    }

    /// Size of the padded pixel rows, as recorded in the info header.
    pub fn pixel_data_size(&self) -> u32 {
        header::pixel_data_size(&self.data)
    }

    /// Offset of the pixel data from the start of the buffer (always 62).
    pub fn pixel_data_offset(&self) -> u32 {
        header::pixel_data_offset(&self.data)
    }

    pub fn bytes_per_row(&self) -> u32 {
        header::bytes_per_row(self.width())
    }

    /// The complete BMP file, ready to be written to storage verbatim.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Set one pixel. Coordinates outside the image are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some((index, mask)) = self.locate(x, y) {
            self.write_bit(index, mask, color);
        }
    }

    /// Read one pixel, or `None` when the coordinates are outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.locate(x, y)
            .map(|(index, mask)| Color::from(self.data[index] & mask != 0))
    }

    /// Flip every pixel. Row padding stays zero.
    pub fn invert(&mut self) {
        let width = self.width() as usize;
        let row_bytes = self.bytes_per_row() as usize;
        let (full, tail_mask) = row_masks(width);
        for row in self.data[PIXEL_DATA_OFFSET..].chunks_exact_mut(row_bytes) {
            for byte in &mut row[..full] {
                *byte = !*byte;
            }
            if tail_mask != 0 {
                row[full] ^= tail_mask;
            }
        }
    }

    /// Number of white pixels, ignoring row padding.
    pub fn count_white(&self) -> u64 {
        let width = self.width() as usize;
        let row_bytes = self.bytes_per_row() as usize;
        let (full, tail_mask) = row_masks(width);
        self.data[PIXEL_DATA_OFFSET..]
            .chunks_exact(row_bytes)
            .map(|row| {
                let body: u64 = row[..full].iter().map(|b| u64::from(b.count_ones())).sum();
                let tail = if tail_mask != 0 {
                    u64::from((row[full] & tail_mask).count_ones())
                } else {
                    0
                };
                body + tail
            })
            .sum()
    }

    /// Byte index and bit mask of pixel `(x, y)`, or `None` when out of range.
    ///
    /// Row `y` (0 = top) is stored at row `height - y - 1`; within a byte
    /// the leftmost pixel is the most significant bit.
    #[inline]
    pub(crate) fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        let width = self.width();
        let height = self.height();
        if x >= width || y >= height {
            return None;
        }
        let row_bytes = header::bytes_per_row(width) as usize;
        let stored_row = (height - y - 1) as usize;
        let index = PIXEL_DATA_OFFSET + row_bytes * stored_row + (x as usize >> 3);
        Some((index, 0x80 >> (x & 7)))
    }

    #[inline]
    pub(crate) fn write_bit(&mut self, index: usize, mask: u8, color: Color) {
        match color {
            Color::White => self.data[index] |= mask,
            Color::Black => self.data[index] &= !mask,
        }
    }
}

impl fmt::Debug for MonoBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonoBitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("file_size", &self.file_size())
            .finish_non_exhaustive()
    }
}

impl AsRef<[u8]> for MonoBitmap {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Whole bytes of pixels per row, and the mask of valid bits in the
/// trailing partial byte (0 when the width is a multiple of 8).
fn row_masks(width: usize) -> (usize, u8) {
    let full = width / 8;
    let rem = width % 8;
    let tail_mask = if rem == 0 { 0 } else { 0xFFu8 << (8 - rem) };
    (full, tail_mask)
}

pub(crate) fn alloc_zeroed(bytes: usize) -> Result<Vec<u8>, BitmapError> {
    let mut data = Vec::new();
    data.try_reserve_exact(bytes)
        .map_err(|_| BitmapError::AllocationFailed { bytes })?;
    data.resize(bytes, 0);
    Ok(data)
}

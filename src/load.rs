use alloc::vec::Vec;

use crate::bitmap::MonoBitmap;
use crate::error::BitmapError;
use crate::header::{self, BitmapInfo, Layout, Strictness};
use crate::limits::Limits;

/// Builder for loading a monochrome BMP from bytes read off storage.
///
/// ```
/// use zenmono::{Color, LoadRequest, MonoBitmap, Strictness};
///
/// let mut bmp = MonoBitmap::new(8, 8)?;
/// bmp.set_pixel(3, 3, Color::White);
/// let bytes = bmp.as_bytes().to_vec();
///
/// let loaded = LoadRequest::new(&bytes)
///     .with_strictness(Strictness::Strict)
///     .load()?;
/// assert_eq!(loaded.get_pixel(3, 3), Some(Color::White));
/// # Ok::<(), zenmono::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct LoadRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    strictness: Strictness,
}

impl<'a> LoadRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            strictness: Strictness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Validate the header and copy the bitmap into owned storage.
    pub fn load(self) -> Result<MonoBitmap, BitmapError> {
        let info = self.validate()?;
        let mut data = crate::bitmap::alloc_zeroed(info.file_size as usize)?;
        data.copy_from_slice(&self.data[..info.file_size as usize]);
        Ok(normalize(data, &info))
    }

    /// Validate the header and take ownership of `data` without copying.
    pub(crate) fn load_owned(
        limits: Option<&Limits>,
        strictness: Strictness,
        mut data: Vec<u8>,
    ) -> Result<MonoBitmap, BitmapError> {
        let info = LoadRequest {
            data: &data,
            limits,
            strictness,
        }
        .validate()?;
        data.truncate(info.file_size as usize);
        Ok(normalize(data, &info))
    }

    fn validate(&self) -> Result<BitmapInfo, BitmapError> {
        let info = header::parse_header(self.data, self.strictness)?;
        if let Some(limits) = self.limits {
            limits.layout(info.width, info.height)?;
        }
        Ok(info)
    }
}

/// Rewrite the header with canonical values and clear row padding so a
/// loaded bitmap is indistinguishable from one built by this crate.
fn normalize(mut data: Vec<u8>, info: &BitmapInfo) -> MonoBitmap {
    // parse_header already proved these dimensions fit.
    let layout = Layout {
        bytes_per_row: info.bytes_per_row as usize,
        pixel_data_size: info.pixel_data_size as usize,
        file_size: info.file_size as usize,
    };
    header::write_header(&mut data, info.width, info.height, &layout);

    let used_bits = info.width as usize;
    let first_pad_byte = used_bits / 8;
    let rem = used_bits % 8;
    for row in data[header::PIXEL_DATA_OFFSET..].chunks_exact_mut(layout.bytes_per_row) {
        let mut pad_from = first_pad_byte;
        if rem != 0 {
            row[first_pad_byte] &= 0xFFu8 << (8 - rem);
            pad_from += 1;
        }
        row[pad_from..].fill(0);
    }
    MonoBitmap::from_raw(data)
}

impl MonoBitmap {
    /// Load a bitmap from bytes with default validation.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        LoadRequest::new(data).load()
    }

    /// Load a bitmap from an owned buffer, reusing its allocation.
    pub fn from_vec(data: Vec<u8>) -> Result<Self, BitmapError> {
        LoadRequest::load_owned(None, Strictness::default(), data)
    }
}

//! # zenmono
//!
//! In-memory 1-bit (monochrome) BMP images for environments that need
//! direct pixel manipulation without a general imaging library.
//!
//! A [`MonoBitmap`] *is* the file: a single buffer holding the BMP file
//! header, the 40-byte info header, a fixed black/white palette, and
//! bottom-up rows packed one bit per pixel and padded to 4 bytes.
//! [`MonoBitmap::as_bytes`] can be written to disk as-is.
//!
//! ## Operations
//!
//! - Pixel access: [`MonoBitmap::set_pixel`], [`MonoBitmap::get_pixel`]
//! - Drawing: [`MonoBitmap::draw_line`] (Bresenham),
//!   [`MonoBitmap::draw_rect`] (filled), [`MonoBitmap::fill`]
//! - Resampling: [`MonoBitmap::resize_bicubic`]
//! - Loading: [`LoadRequest`], [`MonoBitmap::from_bytes`], [`BitmapInfo::from_bytes`]
//! - Glyph blitting (`text` feature): `MonoBitmap::draw_glyph`, `MonoBitmap::draw_text`
//!
//! Coordinates outside the image are ignored rather than reported: a
//! pixel write becomes a no-op, a read returns `None`, and a line or
//! rectangle with any corner outside is skipped entirely.
//!
//! ## Non-Goals
//!
//! - Color or grayscale depths
//! - Compression (RLE) and header variants other than BITMAPINFOHEADER
//! - Other image formats
//!
//! ## Usage
//!
//! ```
//! use zenmono::{Color, MonoBitmap};
//! use enough::Unstoppable;
//!
//! let mut bmp = MonoBitmap::new(100, 100)?;
//! bmp.fill(Color::White);
//! bmp.draw_line(20, 50, 70, 60, Color::Black);
//! bmp.draw_rect(10, 20, 30, 30, Color::Black);
//! assert_eq!(bmp.get_pixel(50, 50), Some(Color::White));
//!
//! let resized = bmp.resize_bicubic(200, 70, Unstoppable)?;
//! assert_eq!((resized.width(), resized.height()), (200, 70));
//!
//! let bytes: &[u8] = resized.as_bytes(); // write these to a .bmp file
//! assert_eq!(bytes.len(), resized.file_size() as usize);
//! # Ok::<(), zenmono::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod codec;
mod color;
mod draw;
mod error;
mod header;
mod limits;
mod load;
mod resize;

#[cfg(feature = "text")]
pub mod text;

// Re-exports
pub use bitmap::MonoBitmap;
pub use color::Color;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use header::{BitmapInfo, PIXEL_DATA_OFFSET, Strictness, bytes_per_row};
pub use limits::Limits;
pub use load::LoadRequest;

#[cfg(feature = "text")]
pub use text::{Font, Glyph};

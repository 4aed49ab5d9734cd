//! Bicubic resampling of 1-bit images.
//!
//! Each destination pixel maps to a fractional source position. Four
//! source rows are interpolated horizontally with a cubic through four
//! neighbouring samples, the four results are interpolated vertically
//! the same way, and the value is thresholded at 0.5. Samples beyond
//! the source edges are clamped to the nearest edge pixel.
//!
//! All arithmetic is `f32` in a fixed evaluation order, so the output
//! is reproducible bit for bit.

use enough::Stop;

use crate::bitmap::MonoBitmap;
use crate::color::Color;
use crate::error::BitmapError;
use crate::limits::Limits;

impl MonoBitmap {
    /// Resample to `width` x `height` into a new bitmap.
    ///
    /// The source is left unchanged. Only allocation failure, invalid
    /// target dimensions, and cancellation through `stop` are reported.
    pub fn resize_bicubic(
        &self,
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<MonoBitmap, BitmapError> {
        resize(self, width, height, None, &stop)
    }

    /// Like [`resize_bicubic`](Self::resize_bicubic), checking the
    /// destination size against `limits` before allocating.
    pub fn resize_bicubic_with_limits(
        &self,
        width: u32,
        height: u32,
        limits: &Limits,
        stop: impl Stop,
    ) -> Result<MonoBitmap, BitmapError> {
        resize(self, width, height, Some(limits), &stop)
    }
}

fn resize(
    src: &MonoBitmap,
    dst_width: u32,
    dst_height: u32,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<MonoBitmap, BitmapError> {
    let mut dst = MonoBitmap::create(dst_width, dst_height, limits)?;

    let src_width = src.width();
    let src_height = src.height();
    let tx = src_width as f32 / dst_width as f32;
    let ty = src_height as f32 / dst_height as f32;
    let max_x = src_width as i64 - 1;
    let max_y = src_height as i64 - 1;

    let sample = |x: i64, y: i64| -> f32 {
        let x = x.clamp(0, max_x) as u32;
        let y = y.clamp(0, max_y) as u32;
        match src.get_pixel(x, y) {
            Some(Color::White) => 1.0,
            _ => 0.0,
        }
    };

    for row in 0..dst_height {
        if row % 16 == 0 {
            stop.check()?;
        }
        let fy = ty * row as f32;
        let y = fy as i64;
        let dy = fy - y as f32;

        for col in 0..dst_width {
            let fx = tx * col as f32;
            let x = fx as i64;
            let dx = fx - x as f32;

            let mut column = [0.0f32; 4];
            for (j, c) in column.iter_mut().enumerate() {
                let sy = y - 1 + j as i64;
                let samples = [
                    sample(x - 1, sy),
                    sample(x, sy),
                    sample(x + 1, sy),
                    sample(x + 2, sy),
                ];
                *c = cubic(samples, dx);
            }

            let value = cubic(column, dy);
            dst.set_pixel(col, row, Color::from(value > 0.5));
        }
    }

    Ok(dst)
}

/// Evaluate at `t` in `[0, 1)` the cubic through four equally spaced
/// samples, where `t = 0` is `p[1]` and `t = 1` is `p[2]`. The
/// coefficients come from finite differences against `p[1]`.
#[inline]
fn cubic(p: [f32; 4], t: f32) -> f32 {
    let d0 = p[0] - p[1];
    let d2 = p[2] - p[1];
    let d3 = p[3] - p[1];
    let a0 = p[1];
    let a1 = -1.0 / 3.0 * d0 + d2 - 1.0 / 6.0 * d3;
    let a2 = 1.0 / 2.0 * d0 + 1.0 / 2.0 * d2;
    let a3 = -1.0 / 6.0 * d0 - 1.0 / 2.0 * d2 + 1.0 / 6.0 * d3;
    a0 + a1 * t + a2 * t * t + a3 * t * t * t
}

use alloc::format;

use crate::error::BitmapError;
use crate::header::Layout;

/// Resource limits for bitmap allocation.
///
/// All fields default to `None` (no limit). Limits apply to every
/// operation that allocates a bitmap: creation, loading, and resizing.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the whole file buffer (headers, palette and pixel data).
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Compute the file layout for `width` x `height` and check it.
    ///
    /// Dimensions the format cannot represent fail first, with
    /// `ZeroDimension` or `DimensionsTooLarge`; then the first limit
    /// crossed is reported as `LimitExceeded`.
    pub(crate) fn layout(&self, width: u32, height: u32) -> Result<Layout, BitmapError> {
        let layout = Layout::new(width, height)?;
        let bounds = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", u64::from(width) * u64::from(height), self.max_pixels),
            ("file size", layout.file_size as u64, self.max_memory_bytes),
        ];
        for (what, value, limit) in bounds {
            match limit {
                Some(max) if value > max => {
                    return Err(BitmapError::LimitExceeded(format!(
                        "{what} {value} exceeds limit {max}"
                    )));
                }
                _ => {}
            }
        }
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::MAX_DIMENSION;

    fn exceeded(result: Result<Layout, BitmapError>) -> alloc::string::String {
        match result {
            Err(BitmapError::LimitExceeded(msg)) => msg,
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        let layout = limits.layout(MAX_DIMENSION, 1).unwrap();
        assert_eq!(layout, Layout::new(MAX_DIMENSION, 1).unwrap());
    }

    #[test]
    fn format_errors_come_before_limits() {
        let limits = Limits {
            max_width: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            limits.layout(MAX_DIMENSION + 1, 1),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
        assert!(matches!(
            limits.layout(0, 1),
            Err(BitmapError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn each_limit_names_what_it_rejects() {
        let width = Limits {
            max_width: Some(8),
            ..Default::default()
        };
        assert!(width.layout(8, 1000).is_ok());
        assert_eq!(exceeded(width.layout(9, 1)), "width 9 exceeds limit 8");

        let height = Limits {
            max_height: Some(8),
            ..Default::default()
        };
        assert_eq!(exceeded(height.layout(1, 9)), "height 9 exceeds limit 8");
    }

    #[test]
    fn pixel_limit_uses_product() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(limits.layout(10, 10).is_ok());
        assert_eq!(
            exceeded(limits.layout(10, 11)),
            "pixel count 110 exceeds limit 100"
        );
    }

    #[test]
    fn memory_limit_covers_whole_file_and_is_inclusive() {
        // 62 header bytes plus one padded 4-byte row
        let limits = Limits {
            max_memory_bytes: Some(66),
            ..Default::default()
        };
        assert_eq!(limits.layout(32, 1).unwrap().file_size, 66);
        assert_eq!(
            exceeded(limits.layout(33, 1)),
            "file size 70 exceeds limit 66"
        );
        assert!(limits.layout(1, 2).is_err());
    }
}

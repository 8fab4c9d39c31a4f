//! Pure calculation functions for thumbnail geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Proportional downscale by an integer factor, truncating.
///
/// Either result may be zero for sources smaller than `factor` pixels; callers
/// must reject that case before resizing.
///
/// ```
/// # use gallery_manifest::imaging::scaled_dimensions;
/// assert_eq!(scaled_dimensions((2000, 1500), 5), (400, 300));
/// assert_eq!(scaled_dimensions((1999, 4), 5), (399, 0));
/// ```
pub fn scaled_dimensions(source: (u32, u32), factor: u32) -> (u32, u32) {
    let factor = factor.max(1);
    (source.0 / factor, source.1 / factor)
}

/// A crop window in the coordinate space of the resized image.
///
/// The origin is signed: a window larger than the image sits partly above
/// and to the left of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Whether the window lies entirely inside an image of the given size.
    pub fn fits_within(&self, image: (u32, u32)) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x + i64::from(self.width) <= i64::from(image.0)
            && self.y + i64::from(self.height) <= i64::from(image.1)
    }

    /// Intersection of the window with an image of the given size, as
    /// `(x, y, width, height)`. `None` when they do not overlap.
    pub fn clamp_to(&self, image: (u32, u32)) -> Option<(u32, u32, u32, u32)> {
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = (self.x + i64::from(self.width)).min(i64::from(image.0));
        let bottom = (self.y + i64::from(self.height)).min(i64::from(image.1));

        if right <= left || bottom <= top {
            return None;
        }
        Some((
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}

/// Centered crop window of `crop` size over an image of `image` size.
///
/// The origin is `((w - cw) / 2, (h - ch) / 2)` with division truncating
/// toward zero, so a 400×400 image under a 415×415 window gives `(-7, -7)`.
pub fn center_crop(image: (u32, u32), crop: (u32, u32)) -> CropRect {
    let x = (i64::from(image.0) - i64::from(crop.0)) / 2;
    let y = (i64::from(image.1) - i64::from(crop.1)) / 2;
    CropRect {
        x,
        y,
        width: crop.0,
        height: crop.1,
    }
}

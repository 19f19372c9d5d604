use crate::foundation::error::{FieldError, FieldResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Measured size of a rendering surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a size from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either axis is zero (container not laid out yet).
    pub fn is_zero_area(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width as `f64`.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// The shorter of the two axes, as `f64`.
    pub fn min_side(self) -> f64 {
        self.w().min(self.h())
    }

    /// Center point of the surface.
    pub fn center(self) -> Point {
        Point::new(self.w() / 2.0, self.h() / 2.0)
    }

    /// Return `true` when `p` lies inside the closed rectangle `[0, w] x [0, h]`.
    pub fn contains(self, p: Point) -> bool {
        (0.0..=self.w()).contains(&p.x) && (0.0..=self.h()).contains(&p.y)
    }

    /// Pixel count (`width * height`).
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Convert into the `u16` extents accepted by the CPU rasterizer.
    pub fn to_u16(self) -> FieldResult<(u16, u16)> {
        if self.is_zero_area() {
            return Err(FieldError::surface(format!(
                "surface has zero area: {}x{}",
                self.width, self.height
            )));
        }
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| FieldError::surface("surface width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| FieldError::surface("surface height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Straight (non-premultiplied) RGB hue used for every particle of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Straight RGBA8 with `alpha` in `[0, 1]` (clamped).
    pub fn with_alpha(self, alpha: f64) -> [u8; 4] {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

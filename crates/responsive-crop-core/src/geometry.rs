//! Fractional geometry primitives.
//!
//! Every coordinate in a responsive crop value is a fraction of the full,
//! unrotated source image. This keeps stored crops independent of the actual
//! pixel dimensions of whatever rendition the host later serves.
//!
//! # Coordinate System
//!
//! - (0.0, 0.0) = top-left corner
//! - (1.0, 1.0) = bottom-right corner
//! - width/height are relative to the original dimensions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clamp a value into `[0, 1]`.
///
/// NaN maps to `0.0`, so the function is total: the result is always a
/// finite number inside the unit interval.
#[inline]
pub fn clamp01(n: f64) -> f64 {
    clamp01_or(n, 0.0)
}

/// Clamp a value into `[0, 1]`, mapping NaN to `fallback`.
///
/// `fallback` is expected to already lie in `[0, 1]`; it is clamped anyway.
#[inline]
pub fn clamp01_or(n: f64, fallback: f64) -> f64 {
    if n.is_nan() {
        return fallback.clamp(0.0, 1.0);
    }
    n.clamp(0.0, 1.0)
}

/// Point of visual interest, as fractions of the image size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocalPoint {
    pub x: f64,
    pub y: f64,
}

impl FocalPoint {
    /// Image center, used when no focal point was chosen.
    pub const CENTER: FocalPoint = FocalPoint { x: 0.5, y: 0.5 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Focal point under a pointer, from the pointer position and the
    /// bounding box of the displayed image (all in CSS pixels).
    ///
    /// An empty box yields the center.
    pub fn from_pointer(pointer_x: f64, pointer_y: f64, bounds: PixelBounds) -> Self {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Self::CENTER;
        }
        Self {
            x: (pointer_x - bounds.left) / bounds.width,
            y: (pointer_y - bounds.top) / bounds.height,
        }
        .clamped()
    }

    /// Clamp both components into `[0, 1]`. NaN components fall back to the center.
    pub fn clamped(self) -> Self {
        Self {
            x: clamp01_or(self.x, Self::CENTER.x),
            y: clamp01_or(self.y, Self::CENTER.y),
        }
    }
}

impl Default for FocalPoint {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Crop rectangle, as fractions of the full source image.
///
/// Each field is clamped on its own. `x + width` may exceed 1.0; the
/// rectangle is allowed to nominally extend past the image edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// The whole image.
    pub const FULL: CropRect = CropRect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Crop from the percentage area reported by the cropping widget.
    pub fn from_percentages(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x / 100.0, y / 100.0, width / 100.0, height / 100.0).clamped()
    }

    /// Clamp all four fields into `[0, 1]` independently.
    ///
    /// NaN fields fall back to the matching field of [`CropRect::FULL`].
    pub fn clamped(self) -> Self {
        Self {
            x: clamp01_or(self.x, Self::FULL.x),
            y: clamp01_or(self.y, Self::FULL.y),
            width: clamp01_or(self.width, Self::FULL.width),
            height: clamp01_or(self.height, Self::FULL.height),
        }
    }

    /// Check if this rectangle covers the whole image.
    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

impl Default for CropRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// On-screen box of the displayed image, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Free-function form of [`FocalPoint::clamped`].
pub fn clamp_focal_point(fp: FocalPoint) -> FocalPoint {
    fp.clamped()
}

/// Free-function form of [`CropRect::clamped`].
pub fn clamp_crop(rect: CropRect) -> CropRect {
    rect.clamped()
}

/// Convert a `"W:H"` ratio string to `W / H`.
///
/// Malformed input never fails: a missing, zero, non-numeric or infinite
/// side yields `1.0` (square).
pub fn aspect_ratio_to_number(ratio: &str) -> f64 {
    ratio
        .parse::<AspectRatio>()
        .map(|r| r.value())
        .unwrap_or(1.0)
}

/// Errors from parsing an aspect ratio string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AspectRatioError {
    /// No `:` separator.
    #[error("Aspect ratio must look like W:H, got {0:?}")]
    MissingSeparator(String),

    /// A side is not a finite number.
    #[error("Aspect ratio side is not a number: {0:?}")]
    InvalidNumber(String),

    /// A side is zero or negative.
    #[error("Aspect ratio sides must be positive, got {0:?}")]
    NonPositive(String),
}

/// A parsed `W:H` aspect ratio with positive sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    /// Width divided by height.
    pub fn value(&self) -> f64 {
        self.width / self.height
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (w, h) = match (parts.next(), parts.next()) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(AspectRatioError::MissingSeparator(s.to_string())),
        };

        let parse_side = |side: &str| -> Result<f64, AspectRatioError> {
            let n: f64 = side
                .trim()
                .parse()
                .map_err(|_| AspectRatioError::InvalidNumber(s.to_string()))?;
            if !n.is_finite() {
                return Err(AspectRatioError::InvalidNumber(s.to_string()));
            }
            if n <= 0.0 {
                return Err(AspectRatioError::NonPositive(s.to_string()));
            }
            Ok(n)
        };

        Ok(AspectRatio {
            width: parse_side(w)?,
            height: parse_side(h)?,
        })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Ratios offered by the breakpoint tabs.
pub const ASPECT_RATIO_PRESETS: [&str; 6] = ["16:9", "4:3", "1:1", "3:2", "9:16", "21:9"];


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: clamp01 always lands in the unit interval.
        #[test]
        fn prop_clamp01_in_range(n in proptest::num::f64::ANY) {
            let c = clamp01(n);
            prop_assert!((0.0..=1.0).contains(&c));
        }

        /// Property: clamp01 is idempotent.
        #[test]
        fn prop_clamp01_idempotent(n in proptest::num::f64::ANY) {
            prop_assert_eq!(clamp01(clamp01(n)), clamp01(n));
        }

        /// Property: clamp01 is monotonic for ordered inputs.
        #[test]
        fn prop_clamp01_monotonic(a in -10.0f64..10.0, b in -10.0f64..10.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(clamp01(lo) <= clamp01(hi));
        }

        /// Property: clamped crops have every field in range.
        #[test]
        fn prop_clamped_crop_in_range(
            x in proptest::num::f64::ANY,
            y in proptest::num::f64::ANY,
            w in proptest::num::f64::ANY,
            h in proptest::num::f64::ANY,
        ) {
            let r = CropRect::new(x, y, w, h).clamped();
            for v in [r.x, r.y, r.width, r.height] {
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }

        /// Property: positive integer ratios parse to W / H.
        #[test]
        fn prop_integer_ratios(w in 1u32..1000, h in 1u32..1000) {
            let n = aspect_ratio_to_number(&format!("{w}:{h}"));
            prop_assert!((n - w as f64 / h as f64).abs() < 1e-12);
        }
    }
}

//! Preview transform for a cropped breakpoint.
//!
//! The preview shows only the cropped region of the full image inside a
//! frame of the breakpoint's aspect ratio. Instead of cutting pixels, the
//! image is oversized and offset: it is scaled so the crop rectangle spans
//! the whole frame, then shifted so the crop's top-left corner sits at the
//! frame's top-left corner. The frame clips the rest.
//!
//! ```text
//! width%  = 100 / crop.width
//! height% = 100 / crop.height
//! left%   = -(crop.x * 100) / crop.width
//! top%    = -(crop.y * 100) / crop.height
//! ```
//!
//! A zero width or height leaves that axis unscaled and unshifted.

use serde::{Deserialize, Serialize};

use crate::geometry::{aspect_ratio_to_number, CropRect};

/// Size and offset of the image relative to the preview frame, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTransform {
    pub width_percent: f64,
    pub height_percent: f64,
    pub left_percent: f64,
    pub top_percent: f64,
}

impl PreviewTransform {
    /// Image shown at frame size with no offset.
    pub const IDENTITY: PreviewTransform = PreviewTransform {
        width_percent: 100.0,
        height_percent: 100.0,
        left_percent: 0.0,
        top_percent: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Inline style for the preview `<img>` inside a relatively positioned frame.
    pub fn to_css(&self) -> String {
        format!(
            "position: absolute; top: {}%; left: {}%; width: {}%; height: {}%; object-fit: cover;",
            self.top_percent, self.left_percent, self.width_percent, self.height_percent
        )
    }
}

impl Default for PreviewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Compute the transform that shows exactly `crop` in the frame.
pub fn preview_transform(crop: &CropRect) -> PreviewTransform {
    let (width_percent, left_percent) = axis(crop.x, crop.width);
    let (height_percent, top_percent) = axis(crop.y, crop.height);

    PreviewTransform {
        width_percent,
        height_percent,
        left_percent,
        top_percent,
    }
}

/// Scale and offset along one axis. Non-positive or NaN extents map to identity.
#[inline]
fn axis(offset: f64, extent: f64) -> (f64, f64) {
    if extent > 0.0 {
        let shift = -(offset * 100.0) / extent;
        // avoid a "-0%" offset for crops starting at the edge
        (100.0 / extent, if shift == 0.0 { 0.0 } else { shift })
    } else {
        (100.0, 0.0)
    }
}

/// Height of a preview frame as a percentage of its width (`padding-top`).
///
/// Malformed ratios give a square frame.
pub fn frame_padding_percent(aspect_ratio: &str) -> f64 {
    100.0 / aspect_ratio_to_number(aspect_ratio)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

//! WASM bindings for the crop preview transform.

use responsive_crop_core::preview::{self, PreviewTransform};
use responsive_crop_core::CropRect;
use wasm_bindgen::prelude::*;

/// Preview transform for JavaScript, all values in percent of the frame.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsPreviewTransform {
    inner: PreviewTransform,
}

#[wasm_bindgen]
impl JsPreviewTransform {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width_percent
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height_percent
    }

    #[wasm_bindgen(getter)]
    pub fn left(&self) -> f64 {
        self.inner.left_percent
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> f64 {
        self.inner.top_percent
    }

    /// Check if the image is shown unscaled and unshifted.
    pub fn is_identity(&self) -> bool {
        self.inner.is_identity()
    }

    /// Inline CSS for the preview `<img>`.
    pub fn css(&self) -> String {
        self.inner.to_css()
    }
}

impl From<PreviewTransform> for JsPreviewTransform {
    fn from(inner: PreviewTransform) -> Self {
        Self { inner }
    }
}

/// Compute the transform that shows only the crop rectangle.
///
/// The crop is clamped first, like every crop that enters a stored value.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const t = preview_transform(0.25, 0, 0.5, 1);
/// img.style.width = `${t.width}%`;   // 200%
/// img.style.left = `${t.left}%`;     // -50%
/// ```
#[wasm_bindgen]
pub fn preview_transform(x: f64, y: f64, width: f64, height: f64) -> JsPreviewTransform {
    let crop = CropRect::new(x, y, width, height).clamped();
    preview::preview_transform(&crop).into()
}

/// Inline CSS for a crop preview image.
#[wasm_bindgen]
pub fn preview_style(x: f64, y: f64, width: f64, height: f64) -> String {
    preview_transform(x, y, width, height).css()
}

/// `padding-top` percentage for a preview frame of the given ratio.
#[wasm_bindgen]
pub fn frame_padding_percent(aspect_ratio: &str) -> f64 {
    preview::frame_padding_percent(aspect_ratio)
}

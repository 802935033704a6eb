//! Editing session WASM bindings.
//!
//! `JsCropEditor` wraps the core `CropEditor` so the custom field page can
//! drive it from UI events. Breakpoints are passed by name (`"desktop"`,
//! `"tablet"`, `"mobile"`); an unknown name throws.

use responsive_crop_core::geometry::PixelBounds;
use responsive_crop_core::{
    BreakpointKey, CropEditor, CropRect, FocalPoint, HostError, MediaSelection,
};
use wasm_bindgen::prelude::*;

use crate::preview::JsPreviewTransform;
use crate::value::{parse_or_warn, to_js, value_from_js};

/// Editing session for one responsive crop field.
///
/// # Save Flow (TypeScript)
///
/// ```typescript
/// const payload = editor.begin_save();       // throws if a save is in flight
/// try {
///   await client.setValue(payload);
///   editor.finish_save(undefined);
/// } catch (err) {
///   editor.finish_save(String(err));
/// }
/// ```
#[wasm_bindgen]
pub struct JsCropEditor {
    inner: CropEditor,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Start editing the stored string. Empty or corrupted text starts from defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(serialized: Option<String>) -> JsCropEditor {
        Self {
            inner: CropEditor::new(parse_or_warn(serialized.as_deref())),
        }
    }

    /// Current value as a wire-format object.
    pub fn value(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.value())
    }

    /// Current value as the string the host stores.
    pub fn serialized(&self) -> Result<String, JsValue> {
        self.inner
            .serialized()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// URL to display for the chosen image, if any.
    #[wasm_bindgen(getter)]
    pub fn image_url(&self) -> Option<String> {
        self.inner
            .value()
            .media
            .url()
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn active_breakpoint(&self) -> String {
        self.inner.active_breakpoint().as_str().to_string()
    }

    pub fn set_active_breakpoint(&mut self, key: &str) -> Result<(), JsValue> {
        self.inner.set_active_breakpoint(parse_key(key)?);
        Ok(())
    }

    /// Aspect ratio of the active breakpoint.
    #[wasm_bindgen(getter)]
    pub fn active_aspect_ratio(&self) -> String {
        self.inner.active_config().aspect_ratio.clone()
    }

    /// Preview transform for the active breakpoint's crop.
    pub fn active_preview(&self) -> JsPreviewTransform {
        responsive_crop_core::preview_transform(&self.inner.active_config().crop).into()
    }

    /// Preview transform for a named breakpoint's crop.
    pub fn preview(&self, key: &str) -> Result<JsPreviewTransform, JsValue> {
        let key = parse_key(key)?;
        Ok(responsive_crop_core::preview_transform(&self.inner.value().breakpoint(key).crop).into())
    }

    pub fn set_media_selection(&mut self, media: JsValue) -> Result<(), JsValue> {
        let media: MediaSelection = serde_wasm_bindgen::from_value(media)
            .map_err(|e| JsValue::from_str(&format!("Invalid media selection: {}", e)))?;
        self.inner.set_media_selection(&media);
        Ok(())
    }

    /// Use a typed URL instead of a media item. An empty URL clears the image.
    pub fn set_manual_url(&mut self, url: &str) {
        self.inner.set_manual_url(url);
    }

    pub fn set_focal_point(&mut self, x: f64, y: f64) {
        self.inner.set_focal_point(FocalPoint::new(x, y));
    }

    /// Set the focal point from a pointer position over the displayed image.
    ///
    /// # Arguments
    ///
    /// * `client_x`, `client_y` - Pointer position in CSS pixels
    /// * `left`, `top`, `width`, `height` - `getBoundingClientRect()` of the image
    pub fn set_focal_point_from_pointer(
        &mut self,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) {
        let bounds = PixelBounds {
            left,
            top,
            width,
            height,
        };
        self.inner
            .set_focal_point(FocalPoint::from_pointer(client_x, client_y, bounds));
    }

    pub fn set_crop(
        &mut self,
        key: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue> {
        let key = parse_key(key)?;
        self.inner
            .set_crop_for_breakpoint(key, CropRect::new(x, y, width, height));
        Ok(())
    }

    /// Set the active breakpoint's crop from the cropper's percentage area.
    pub fn set_active_crop_percentages(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner
            .set_active_crop(CropRect::from_percentages(x, y, width, height));
    }

    pub fn set_aspect_ratio(&mut self, key: &str, ratio: &str) -> Result<(), JsValue> {
        let key = parse_key(key)?;
        self.inner.set_aspect_ratio(key, ratio);
        Ok(())
    }

    pub fn reset_focal_point(&mut self) {
        self.inner.reset_focal_point();
    }

    /// Reset all breakpoints to their default ratios and full-image crops.
    pub fn reset_crops(&mut self) {
        self.inner.reset_crops();
    }

    /// Replace the whole value with a (repaired) object.
    pub fn replace_value(&mut self, value: JsValue) {
        self.inner.replace_value(value_from_js(value));
    }

    /// Check if there are unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.inner.is_dirty()
    }

    /// Check if the save button should be enabled.
    pub fn can_save(&self) -> bool {
        self.inner.can_save()
    }

    /// `"idle"`, `"saving"`, `"success"` or `"error"`.
    #[wasm_bindgen(getter)]
    pub fn save_status(&self) -> String {
        self.inner.save_status().as_str().to_string()
    }

    /// Badge text for the save status.
    #[wasm_bindgen(getter)]
    pub fn status_label(&self) -> String {
        self.inner.save_status().label().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn last_error(&self) -> Option<String> {
        self.inner.last_error().map(str::to_string)
    }

    /// Start a save and return the string to store. Throws if a save is in flight.
    pub fn begin_save(&mut self) -> Result<String, JsValue> {
        self.inner
            .begin_save()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Report the host's answer: `undefined` for success, an error message otherwise.
    ///
    /// Returns the new save status.
    pub fn finish_save(&mut self, error: Option<String>) -> Result<String, JsValue> {
        let result = match error {
            None => Ok(()),
            Some(message) => Err(HostError::Save(message)),
        };
        self.inner
            .finish_save(result)
            .map(|status| status.as_str().to_string())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Discard edits and restore the last loaded or saved value.
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}

fn parse_key(key: &str) -> Result<BreakpointKey, JsValue> {
    key.parse::<BreakpointKey>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

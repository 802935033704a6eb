//! WASM bindings for reading and writing stored values.
//!
//! Values cross the boundary as plain JavaScript objects in the wire format
//! (via serde_wasm_bindgen) or as the serialized JSON string the host stores.

use js_sys::Array;
use responsive_crop_core::geometry::ASPECT_RATIO_PRESETS;
use responsive_crop_core::normalize::try_parse_serialized_value;
use responsive_crop_core::{BreakpointKey, ResponsiveCropValue};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Parse stored text like the core does, but report invalid JSON on the
/// browser console instead of through `tracing`.
pub(crate) fn parse_or_warn(text: Option<&str>) -> ResponsiveCropValue {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return ResponsiveCropValue::default();
    };

    try_parse_serialized_value(text).unwrap_or_else(|err| {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Failed to parse stored crop value, using defaults: {}",
            err
        )));
        ResponsiveCropValue::default()
    })
}

/// Read any JavaScript value as a crop value, repairing it.
///
/// Values that cannot even be read as JSON (functions, symbols) give the default.
pub(crate) fn value_from_js(raw: JsValue) -> ResponsiveCropValue {
    let raw: serde_json::Value = serde_wasm_bindgen::from_value(raw).unwrap_or_default();
    responsive_crop_core::normalize_value(&raw)
}

/// Serialize to a plain JavaScript value, with objects rather than `Map`s.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Repair an arbitrary object into a complete crop value.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const value = normalize_value({ focalPoint: { x: 2, y: 0.5 } });
/// // value.focalPoint.x === 1, all three breakpoints present
/// ```
#[wasm_bindgen]
pub fn normalize_value(raw: JsValue) -> Result<JsValue, JsValue> {
    to_js(&value_from_js(raw))
}

/// Parse the string stored by the host. Never throws for bad input;
/// empty or corrupted text gives the default value.
#[wasm_bindgen]
pub fn parse_serialized_value(text: Option<String>) -> Result<JsValue, JsValue> {
    to_js(&parse_or_warn(text.as_deref()))
}

/// Normalize an object and write it as the string the host stores.
#[wasm_bindgen]
pub fn serialize_value(value: JsValue) -> Result<String, JsValue> {
    responsive_crop_core::serialize_value(&value_from_js(value))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a `"W:H"` string to a number; malformed ratios give 1.
#[wasm_bindgen]
pub fn aspect_ratio_to_number(ratio: &str) -> f64 {
    responsive_crop_core::aspect_ratio_to_number(ratio)
}

/// Breakpoint names in display order.
#[wasm_bindgen]
pub fn breakpoint_keys() -> Array {
    BreakpointKey::ALL
        .iter()
        .map(|key| JsValue::from_str(key.as_str()))
        .collect()
}

/// Aspect ratios offered in the breakpoint tabs.
#[wasm_bindgen]
pub fn aspect_ratio_presets() -> Array {
    ASPECT_RATIO_PRESETS
        .iter()
        .map(|ratio| JsValue::from_str(ratio))
        .collect()
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn to_json(value: JsValue) -> serde_json::Value {
        serde_wasm_bindgen::from_value(value).unwrap()
    }

    fn from_json(text: &str) -> JsValue {
        js_sys::JSON::parse(text).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_normalize_null() {
        let out = to_json(normalize_value(JsValue::NULL).unwrap());
        assert_eq!(out["focalPoint"]["x"], 0.5);
        assert_eq!(out["breakpoints"]["tablet"]["aspectRatio"], "4:3");
    }

    #[wasm_bindgen_test]
    fn test_normalize_clamps() {
        let raw = from_json(r#"{"focalPoint":{"x":2.0,"y":-1.0}}"#);
        let out = to_json(normalize_value(raw).unwrap());
        assert_eq!(out["focalPoint"]["x"], 1.0);
        assert_eq!(out["focalPoint"]["y"], 0.0);
    }

    #[wasm_bindgen_test]
    fn test_parse_corrupted_text() {
        let out = to_json(parse_serialized_value(Some("{not json".into())).unwrap());
        assert_eq!(out["breakpoints"]["desktop"]["aspectRatio"], "16:9");
    }

    #[wasm_bindgen_test]
    fn test_serialize_round_trip() {
        let raw = from_json(r#"{"mediaUrl":"https://cdn/a.png"}"#);
        let text = serialize_value(raw).unwrap();
        let out = to_json(parse_serialized_value(Some(text)).unwrap());
        assert_eq!(out["mediaUrl"], "https://cdn/a.png");
    }

    #[wasm_bindgen_test]
    fn test_breakpoint_keys() {
        let keys = breakpoint_keys();
        assert_eq!(keys.length(), 3);
        assert_eq!(keys.get(0).as_string().as_deref(), Some("desktop"));
        assert_eq!(aspect_ratio_presets().length(), 6);
    }
}

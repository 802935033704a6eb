//! WASM bindings for reading host responses.

use responsive_crop_core::host;
use wasm_bindgen::prelude::*;

/// Pull the stored string out of a `getValue` response.
///
/// Accepts a bare string or an object with `data`/`value`. Returns
/// `undefined` when nothing was stored.
#[wasm_bindgen]
pub fn stored_value_from_response(response: JsValue) -> Option<String> {
    if let Some(text) = response.as_string() {
        return Some(text).filter(|t| !t.is_empty());
    }
    let response: serde_json::Value = serde_wasm_bindgen::from_value(response).ok()?;
    host::stored_value_from_response(&response)
}

/// Content language from the host application context, if it reports one.
#[wasm_bindgen]
pub fn language_from_context(context: JsValue) -> Option<String> {
    let context: serde_json::Value = serde_wasm_bindgen::from_value(context).ok()?;
    host::language_from_context(&context)
}

/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use js_sys::JSON;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_stored_value_string() {
        assert_eq!(
            stored_value_from_response(JsValue::from_str("{}")),
            Some("{}".to_string())
        );
        assert_eq!(stored_value_from_response(JsValue::from_str("")), None);
        assert_eq!(stored_value_from_response(JsValue::UNDEFINED), None);
    }

    #[wasm_bindgen_test]
    fn test_stored_value_envelope() {
        let response = JSON::parse(r#"{"data":"{\"mediaUrl\":\"x\"}"}"#).unwrap();
        assert_eq!(
            stored_value_from_response(response),
            Some("{\"mediaUrl\":\"x\"}".to_string())
        );
    }

    #[wasm_bindgen_test]
    fn test_language_from_context() {
        let context = JSON::parse(r#"{"site":{"language":"nl"}}"#).unwrap();
        assert_eq!(language_from_context(context), Some("nl".to_string()));
    }
}

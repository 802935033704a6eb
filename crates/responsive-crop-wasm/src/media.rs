//! WASM bindings for media search.
//!
//! The host client runs the GraphQL request; these functions build the
//! request body and map the response into selections for `JsCropEditor`.

use responsive_crop_core::media::{self, MediaSearchQuery};
use responsive_crop_core::EditorConfig;
use wasm_bindgen::prelude::*;

use crate::value::to_js;

/// Build the GraphQL request body for a media search.
///
/// # Arguments
///
/// * `term` - Text typed in the search box; blank matches everything
/// * `config_json` - Optional editor config JSON (root path, language, limit)
///
/// # Example (TypeScript)
///
/// ```typescript
/// const body = media_search_request(term, JSON.stringify({ language }));
/// const response = await client.query('xmc.graphql.authoring', { params: body });
/// const results = media_selections_from_response(response);
/// ```
#[wasm_bindgen]
pub fn media_search_request(term: &str, config_json: Option<String>) -> Result<JsValue, JsValue> {
    let config = config_or_warn(config_json.as_deref());
    let query = MediaSearchQuery::new(&config, term);
    to_js(&query.request_body())
}

/// Map a search response to an array of `{ id, path, name, mediaUrl }`.
///
/// Throws with the first message if the response carries GraphQL `errors`.
/// Other unexpected shapes give an empty array.
#[wasm_bindgen]
pub fn media_selections_from_response(response: JsValue) -> Result<JsValue, JsValue> {
    let response: serde_json::Value = serde_wasm_bindgen::from_value(response).unwrap_or_default();
    let selections = media::parse_media_search_response(&response)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&selections)
}

/// Parse config text like the core does, but report invalid JSON on the
/// browser console instead of through `tracing`.
fn config_or_warn(text: Option<&str>) -> EditorConfig {
    let Some(text) = text else {
        return EditorConfig::default();
    };

    EditorConfig::try_from_json_str(text).unwrap_or_else(|err| {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "{}; using default editor config",
            err
        )));
        EditorConfig::default()
    })
}

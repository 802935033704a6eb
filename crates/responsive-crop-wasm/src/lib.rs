//! Responsive Crop WASM - WebAssembly bindings for the responsive crop editor
//!
//! This crate exposes `responsive-crop-core` to the custom field page that
//! runs inside the host application.
//!
//! # Module Structure
//!
//! - `editor` - `JsCropEditor`, the editing session
//! - `value` - parse, normalize and serialize stored values
//! - `preview` - crop preview transforms
//! - `media` - media search request/response mapping
//! - `host` - helpers for host responses and context
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor, preview_style } from '@responsive-crop/wasm';
//!
//! await init();
//!
//! const editor = new JsCropEditor(await client.getValue());
//! editor.set_crop('mobile', 0.25, 0, 0.5, 1);
//! const payload = editor.begin_save();
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod host;
mod media;
mod preview;
mod value;

pub use editor::JsCropEditor;
pub use host::{language_from_context, stored_value_from_response};
pub use media::{media_search_request, media_selections_from_response};
pub use preview::{frame_padding_percent, preview_style, preview_transform, JsPreviewTransform};
pub use value::{
    aspect_ratio_presets, aspect_ratio_to_number, breakpoint_keys, normalize_value,
    parse_serialized_value, serialize_value,
};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

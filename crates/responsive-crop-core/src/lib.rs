//! Responsive Crop Core - value model and geometry for responsive image crops
//!
//! This crate holds everything about a responsive crop field that does not
//! depend on the browser: the persisted value (image, focal point and one crop
//! per breakpoint), the normalization that repairs stored input, the editing
//! state, and the transform used to preview a crop.
//!
//! # Module Structure
//!
//! - `geometry` - fractional coordinates, clamping, aspect ratios
//! - `model` - breakpoints, media source and the persisted value
//! - `normalize` - repair of untrusted input and the JSON wire format
//! - `state` - pure edit operations, save status and the editing session
//! - `preview` - crop to preview transform
//! - `host`, `media` - boundaries to the host application and media search
//! - `config` - editor settings

pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod media;
pub mod model;
pub mod normalize;
pub mod preview;
pub mod state;

pub use config::{EditorConfig, RetryPolicy};
pub use error::{ConfigError, CropValueError, HostError, SaveError, StateError};
pub use geometry::{
    aspect_ratio_to_number, clamp01, clamp_crop, clamp_focal_point, AspectRatio, CropRect,
    FocalPoint,
};
pub use model::{
    BreakpointConfig, BreakpointKey, Breakpoints, MediaSelection, MediaSource, ResponsiveCropValue,
};
pub use normalize::{normalize_value, parse_serialized_value, serialize_value};
pub use preview::{preview_transform, PreviewTransform};
pub use state::{CropEditor, SaveStatus};

//! Normalization and the wire format.
//!
//! Stored values come from a host we do not control and may be missing,
//! partial, out of range or not JSON at all. Everything here turns such
//! input into a canonical [`ResponsiveCropValue`] without failing, so the
//! editor always opens.
//!
//! # Wire Format
//!
//! ```text
//! {
//!   "mediaItemId"?: string,
//!   "mediaItemPath"?: string,
//!   "mediaUrl"?: string,
//!   "focalPoint": { "x": number, "y": number },
//!   "breakpoints": {
//!     "desktop": { "aspectRatio": string, "crop": { "x", "y", "width", "height" } },
//!     "tablet":  { ... },
//!     "mobile":  { ... }
//!   }
//! }
//! ```
//!
//! # Repair Rules
//!
//! - Non-object input yields the default value
//! - Missing or non-numeric coordinates take the default's field, then everything is clamped
//! - Missing breakpoints take their defaults; unknown breakpoint keys are dropped
//! - Media fields are copied as-is when they are strings

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::CropValueError;
use crate::geometry::{CropRect, FocalPoint};
use crate::model::{BreakpointConfig, BreakpointKey, Breakpoints, MediaSource, ResponsiveCropValue};

/// Repair any JSON value into a canonical [`ResponsiveCropValue`].
///
/// Idempotent: normalizing the wire form of a normalized value returns an
/// equal value.
pub fn normalize_value(raw: &Value) -> ResponsiveCropValue {
    let Some(obj) = raw.as_object() else {
        return ResponsiveCropValue::default();
    };

    let focal_point = read_focal_point(obj.get("focalPoint"));

    let raw_breakpoints = obj.get("breakpoints").and_then(Value::as_object);
    let breakpoints = Breakpoints::from_fn(|key| {
        let raw_config = raw_breakpoints
            .and_then(|bps| bps.get(key.as_str()))
            .and_then(Value::as_object);
        read_breakpoint(key, raw_config)
    });

    let media = MediaSource::from_parts(
        read_string(obj, "mediaItemId"),
        read_string(obj, "mediaItemPath"),
        read_string(obj, "mediaUrl"),
    );

    ResponsiveCropValue {
        media,
        focal_point,
        breakpoints,
    }
}

fn read_focal_point(raw: Option<&Value>) -> FocalPoint {
    let Some(obj) = raw.and_then(Value::as_object) else {
        return FocalPoint::CENTER;
    };
    FocalPoint {
        x: read_number(obj, "x", FocalPoint::CENTER.x),
        y: read_number(obj, "y", FocalPoint::CENTER.y),
    }
    .clamped()
}

fn read_breakpoint(key: BreakpointKey, raw: Option<&Map<String, Value>>) -> BreakpointConfig {
    let Some(obj) = raw else {
        return BreakpointConfig::default_for(key);
    };

    let aspect_ratio = read_string(obj, "aspectRatio")
        .unwrap_or_else(|| key.default_aspect_ratio().to_string());

    let crop = match obj.get("crop").and_then(Value::as_object) {
        Some(crop) => CropRect {
            x: read_number(crop, "x", CropRect::FULL.x),
            y: read_number(crop, "y", CropRect::FULL.y),
            width: read_number(crop, "width", CropRect::FULL.width),
            height: read_number(crop, "height", CropRect::FULL.height),
        }
        .clamped(),
        None => CropRect::FULL,
    };

    BreakpointConfig { aspect_ratio, crop }
}

/// Numbers past the f64 range saturate to infinity and clamp like any other.
fn read_number(obj: &Map<String, Value>, key: &str, fallback: f64) -> f64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_f64()
            .or_else(|| n.to_string().parse::<f64>().ok())
            .unwrap_or(fallback),
        _ => fallback,
    }
}

fn read_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

impl ResponsiveCropValue {
    /// Clamp a value built in code the same way [`normalize_value`] clamps
    /// stored input and put the media source in its canonical form.
    /// Aspect ratios are kept as they are.
    pub fn normalized(self) -> Self {
        let Self {
            media,
            focal_point,
            breakpoints,
        } = self;

        // Same shape a wire round trip would give, e.g. an item with only a URL
        // becomes a URL source.
        let media = MediaSource::from_parts(
            media.item_id().map(str::to_string),
            media.item_path().map(str::to_string),
            media.url().map(str::to_string),
        );

        let breakpoints = Breakpoints {
            desktop: clamp_config(breakpoints.desktop),
            tablet: clamp_config(breakpoints.tablet),
            mobile: clamp_config(breakpoints.mobile),
        };

        Self {
            media,
            focal_point: focal_point.clamped(),
            breakpoints,
        }
    }
}

fn clamp_config(config: BreakpointConfig) -> BreakpointConfig {
    BreakpointConfig {
        aspect_ratio: config.aspect_ratio,
        crop: config.crop.clamped(),
    }
}

/// Parse stored text strictly, reporting invalid JSON.
///
/// Valid JSON of the wrong shape is still repaired, not rejected.
pub fn try_parse_serialized_value(text: &str) -> Result<ResponsiveCropValue, CropValueError> {
    let raw: Value = serde_json::from_str(text).map_err(CropValueError::Parse)?;
    Ok(normalize_value(&raw))
}

/// Parse stored text, falling back to the default value.
///
/// Empty or absent text yields the default. Invalid JSON is logged and also
/// yields the default; a corrupted stored value never blocks the editor.
pub fn parse_serialized_value(text: Option<&str>) -> ResponsiveCropValue {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return ResponsiveCropValue::default();
    };

    match try_parse_serialized_value(text) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(%err, "failed to parse stored crop value; using defaults");
            ResponsiveCropValue::default()
        }
    }
}

/// Write a value in the wire format.
pub fn serialize_value(value: &ResponsiveCropValue) -> Result<String, CropValueError> {
    serde_json::to_string(value).map_err(CropValueError::Serialize)
}

/// Borrowed view of a value laid out as on the wire.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireValue<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    media_item_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_item_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_url: Option<&'a str>,
    focal_point: &'a FocalPoint,
    breakpoints: &'a Breakpoints,
}

impl<'a> From<&'a ResponsiveCropValue> for WireValue<'a> {
    fn from(value: &'a ResponsiveCropValue) -> Self {
        WireValue {
            media_item_id: value.media.item_id(),
            media_item_path: value.media.item_path(),
            media_url: value.media.url(),
            focal_point: &value.focal_point,
            breakpoints: &value.breakpoints,
        }
    }
}

impl Serialize for ResponsiveCropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireValue::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResponsiveCropValue {
    /// Accepts any JSON and repairs it with [`normalize_value`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(normalize_value(&raw))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

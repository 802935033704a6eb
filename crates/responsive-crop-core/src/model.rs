//! The responsive crop value and its defaults.
//!
//! A [`ResponsiveCropValue`] is the single entity the host stores: the
//! chosen image, its focal point and one crop per breakpoint. The breakpoint
//! map is a struct with exactly three fields, so a value with a missing or
//! extra breakpoint cannot be built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{CropRect, FocalPoint};

/// Responsive rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakpointKey {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl BreakpointKey {
    /// All breakpoints, in wire order.
    pub const ALL: [BreakpointKey; 3] = [
        BreakpointKey::Desktop,
        BreakpointKey::Tablet,
        BreakpointKey::Mobile,
    ];

    /// Wire name of the breakpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            BreakpointKey::Desktop => "desktop",
            BreakpointKey::Tablet => "tablet",
            BreakpointKey::Mobile => "mobile",
        }
    }

    /// Aspect ratio a fresh breakpoint starts with.
    pub fn default_aspect_ratio(self) -> &'static str {
        match self {
            BreakpointKey::Desktop => "16:9",
            BreakpointKey::Tablet => "4:3",
            BreakpointKey::Mobile => "1:1",
        }
    }
}

impl fmt::Display for BreakpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakpointKey {
    type Err = UnknownBreakpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(BreakpointKey::Desktop),
            "tablet" => Ok(BreakpointKey::Tablet),
            "mobile" => Ok(BreakpointKey::Mobile),
            other => Err(UnknownBreakpoint(other.to_string())),
        }
    }
}

/// A breakpoint name outside `desktop`/`tablet`/`mobile`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown breakpoint: {0}")]
pub struct UnknownBreakpoint(pub String);

/// Aspect ratio and crop for one breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointConfig {
    /// `"W:H"` ratio string. Stored as typed; see [`crate::aspect_ratio_to_number`].
    pub aspect_ratio: String,
    pub crop: CropRect,
}

impl BreakpointConfig {
    /// Default ratio for `key` with the full-image crop.
    pub fn default_for(key: BreakpointKey) -> Self {
        Self {
            aspect_ratio: key.default_aspect_ratio().to_string(),
            crop: CropRect::FULL,
        }
    }
}

/// One config per breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub desktop: BreakpointConfig,
    pub tablet: BreakpointConfig,
    pub mobile: BreakpointConfig,
}

impl Breakpoints {
    pub fn get(&self, key: BreakpointKey) -> &BreakpointConfig {
        match key {
            BreakpointKey::Desktop => &self.desktop,
            BreakpointKey::Tablet => &self.tablet,
            BreakpointKey::Mobile => &self.mobile,
        }
    }

    pub fn get_mut(&mut self, key: BreakpointKey) -> &mut BreakpointConfig {
        match key {
            BreakpointKey::Desktop => &mut self.desktop,
            BreakpointKey::Tablet => &mut self.tablet,
            BreakpointKey::Mobile => &mut self.mobile,
        }
    }

    /// Build the map by calling `f` once per breakpoint, in wire order.
    pub fn from_fn(mut f: impl FnMut(BreakpointKey) -> BreakpointConfig) -> Self {
        Self {
            desktop: f(BreakpointKey::Desktop),
            tablet: f(BreakpointKey::Tablet),
            mobile: f(BreakpointKey::Mobile),
        }
    }

    /// Iterate over `(key, config)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (BreakpointKey, &BreakpointConfig)> {
        BreakpointKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::from_fn(BreakpointConfig::default_for)
    }
}

/// Where the image comes from.
///
/// An internal media reference and a free-form URL are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MediaSource {
    /// No image chosen yet.
    #[default]
    None,
    /// Item from the media library. At least one of `id`/`path` is set;
    /// `url` is the item's resolved media URL when the search reported one.
    Item {
        id: Option<String>,
        path: Option<String>,
        url: Option<String>,
    },
    /// URL typed in by the editor.
    Url { url: String },
}

impl MediaSource {
    /// Build a source from the three loose wire fields.
    ///
    /// An id or path makes it an item reference; a lone URL makes it a
    /// free-form URL. Every combination maps back to itself through
    /// [`MediaSource::item_id`], [`MediaSource::item_path`] and [`MediaSource::url`].
    pub fn from_parts(id: Option<String>, path: Option<String>, url: Option<String>) -> Self {
        match (id, path, url) {
            (None, None, None) => MediaSource::None,
            (None, None, Some(url)) => MediaSource::Url { url },
            (id, path, url) => MediaSource::Item { id, path, url },
        }
    }

    pub fn item_id(&self) -> Option<&str> {
        match self {
            MediaSource::Item { id, .. } => id.as_deref(),
            _ => None,
        }
    }

    pub fn item_path(&self) -> Option<&str> {
        match self {
            MediaSource::Item { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    /// URL to display, whether resolved from an item or typed by hand.
    pub fn url(&self) -> Option<&str> {
        match self {
            MediaSource::None => None,
            MediaSource::Item { url, .. } => url.as_deref(),
            MediaSource::Url { url } => Some(url),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, MediaSource::None)
    }
}

/// Result of a media search, used only to fill [`MediaSource`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl MediaSelection {
    /// Media source this selection points at. `name` is display-only.
    pub fn to_source(&self) -> MediaSource {
        MediaSource::from_parts(self.id.clone(), self.path.clone(), self.media_url.clone())
    }
}

/// The persisted responsive crop value.
///
/// Serialization goes through the wire format in [`crate::normalize`];
/// deserializing accepts any JSON and repairs it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponsiveCropValue {
    pub media: MediaSource,
    pub focal_point: FocalPoint,
    pub breakpoints: Breakpoints,
}

impl ResponsiveCropValue {
    /// Value for a field that has never been edited.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for one breakpoint.
    pub fn breakpoint(&self, key: BreakpointKey) -> &BreakpointConfig {
        self.breakpoints.get(key)
    }

    /// Check if the value equals the default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

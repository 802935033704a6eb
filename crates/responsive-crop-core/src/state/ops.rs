//! Pure transitions over [`ResponsiveCropValue`].
//!
//! Each function borrows the old value and returns a new one with exactly
//! the affected field replaced. Nothing is mutated in place, so the old value
//! stays valid as a snapshot.

use crate::geometry::{CropRect, FocalPoint};
use crate::model::{BreakpointKey, Breakpoints, MediaSelection, MediaSource, ResponsiveCropValue};

/// Point the value at a media search result.
pub fn set_media_selection(
    value: &ResponsiveCropValue,
    media: &MediaSelection,
) -> ResponsiveCropValue {
    with_media(value, media.to_source())
}

/// Point the value at a typed URL, dropping any media item reference.
///
/// The URL is trimmed; an empty URL clears the media source.
pub fn set_manual_url(value: &ResponsiveCropValue, url: &str) -> ResponsiveCropValue {
    let trimmed = url.trim();
    let media = if trimmed.is_empty() {
        MediaSource::None
    } else {
        MediaSource::Url {
            url: trimmed.to_string(),
        }
    };
    with_media(value, media)
}

fn with_media(value: &ResponsiveCropValue, media: MediaSource) -> ResponsiveCropValue {
    ResponsiveCropValue {
        media,
        focal_point: value.focal_point,
        breakpoints: value.breakpoints.clone(),
    }
}

pub fn set_focal_point(value: &ResponsiveCropValue, fp: FocalPoint) -> ResponsiveCropValue {
    ResponsiveCropValue {
        media: value.media.clone(),
        focal_point: fp.clamped(),
        breakpoints: value.breakpoints.clone(),
    }
}

/// Replace the crop of one breakpoint. The others are copied unchanged.
pub fn set_crop_for_breakpoint(
    value: &ResponsiveCropValue,
    key: BreakpointKey,
    rect: CropRect,
) -> ResponsiveCropValue {
    let mut breakpoints = value.breakpoints.clone();
    breakpoints.get_mut(key).crop = rect.clamped();
    with_breakpoints(value, breakpoints)
}

/// Replace the aspect ratio of one breakpoint. The ratio is stored as given.
pub fn set_aspect_ratio(
    value: &ResponsiveCropValue,
    key: BreakpointKey,
    ratio: &str,
) -> ResponsiveCropValue {
    let mut breakpoints = value.breakpoints.clone();
    breakpoints.get_mut(key).aspect_ratio = ratio.to_string();
    with_breakpoints(value, breakpoints)
}

pub fn reset_focal_point(value: &ResponsiveCropValue) -> ResponsiveCropValue {
    set_focal_point(value, FocalPoint::CENTER)
}

/// Reset every breakpoint to its defaults: full-image crop and default ratio.
pub fn reset_crops(value: &ResponsiveCropValue) -> ResponsiveCropValue {
    with_breakpoints(value, Breakpoints::default())
}

/// Swap in a whole new value, clamped like stored input.
pub fn replace_value(next: ResponsiveCropValue) -> ResponsiveCropValue {
    next.normalized()
}

fn with_breakpoints(value: &ResponsiveCropValue, breakpoints: Breakpoints) -> ResponsiveCropValue {
    ResponsiveCropValue {
        media: value.media.clone(),
        focal_point: value.focal_point,
        breakpoints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BreakpointConfig;

    fn item_value() -> ResponsiveCropValue {
        let mut value = ResponsiveCropValue::default();
        value.media = MediaSource::Item {
            id: Some("{ITEM}".into()),
            path: Some("/media/item".into()),
            url: Some("/-/media/item.jpg".into()),
        };
        value
    }

    #[test]
    fn test_set_manual_url_clears_item() {
        let value = item_value();
        let next = set_manual_url(&value, "http://x/y.png");

        assert_eq!(next.media.item_id(), None);
        assert_eq!(next.media.item_path(), None);
        assert_eq!(next.media.url(), Some("http://x/y.png"));
        // old value untouched
        assert_eq!(value.media.item_id(), Some("{ITEM}"));
    }

    #[test]
    fn test_set_manual_url_trims_and_clears_on_empty() {
        let value = ResponsiveCropValue::default();
        let next = set_manual_url(&value, "  https://cdn/a.png \n");
        assert_eq!(next.media.url(), Some("https://cdn/a.png"));

        let cleared = set_manual_url(&next, "   ");
        assert!(cleared.media.is_none());
    }

    #[test]
    fn test_set_media_selection() {
        let value = set_manual_url(&ResponsiveCropValue::default(), "http://typed");
        let selection = MediaSelection {
            id: Some("{A}".into()),
            path: Some("/media/a".into()),
            name: Some("a".into()),
            media_url: Some("/-/media/a.jpg".into()),
        };
        let next = set_media_selection(&value, &selection);

        assert_eq!(next.media.item_id(), Some("{A}"));
        assert_eq!(next.media.url(), Some("/-/media/a.jpg"));
        assert_eq!(next.breakpoints, value.breakpoints);
        assert_eq!(next.focal_point, value.focal_point);
    }

    #[test]
    fn test_set_focal_point_clamps() {
        let next = set_focal_point(&ResponsiveCropValue::default(), FocalPoint::new(1.5, -0.2));
        assert_eq!(next.focal_point, FocalPoint::new(1.0, 0.0));
    }

    #[test]
    fn test_set_crop_leaves_other_breakpoints() {
        let value = item_value();
        let next = set_crop_for_breakpoint(&value, BreakpointKey::Tablet, CropRect::new(0.2, 0.2, 0.6, 1.4));

        assert_eq!(next.breakpoints.tablet.crop, CropRect::new(0.2, 0.2, 0.6, 1.0));
        assert_eq!(next.breakpoints.tablet.aspect_ratio, "4:3");
        assert_eq!(next.breakpoints.desktop, value.breakpoints.desktop);
        assert_eq!(next.breakpoints.mobile, value.breakpoints.mobile);
        assert_eq!(next.media, value.media);
        assert!(value.breakpoints.tablet.crop.is_full());
    }

    #[test]
    fn test_set_aspect_ratio_leaves_other_breakpoints() {
        let value = ResponsiveCropValue::default();
        let next = set_aspect_ratio(&value, BreakpointKey::Mobile, "9:16");

        assert_eq!(next.breakpoints.mobile.aspect_ratio, "9:16");
        assert!(next.breakpoints.mobile.crop.is_full());
        assert_eq!(next.breakpoints.desktop, value.breakpoints.desktop);
        assert_eq!(next.breakpoints.tablet, value.breakpoints.tablet);
    }

    #[test]
    fn test_reset_focal_point() {
        let value = set_focal_point(&item_value(), FocalPoint::new(0.1, 0.9));
        let next = reset_focal_point(&value);
        assert_eq!(next.focal_point, FocalPoint::CENTER);
        assert_eq!(next.media, value.media);
    }

    #[test]
    fn test_reset_crops_resets_ratios_too() {
        let value = set_aspect_ratio(&item_value(), BreakpointKey::Desktop, "21:9");
        let value = set_crop_for_breakpoint(&value, BreakpointKey::Desktop, CropRect::new(0.1, 0.1, 0.5, 0.5));
        let value = set_focal_point(&value, FocalPoint::new(0.3, 0.3));

        let next = reset_crops(&value);
        assert_eq!(next.breakpoints.desktop, BreakpointConfig::default_for(BreakpointKey::Desktop));
        assert_eq!(next.focal_point, FocalPoint::new(0.3, 0.3));
        assert_eq!(next.media, value.media);
    }

    #[test]
    fn test_replace_value_normalizes() {
        let mut raw = item_value();
        raw.focal_point = FocalPoint::new(3.0, 0.5);
        raw.breakpoints.mobile.crop = CropRect::new(-1.0, 0.0, 0.5, 0.5);

        let next = replace_value(raw);
        assert_eq!(next.focal_point, FocalPoint::new(1.0, 0.5));
        assert_eq!(next.breakpoints.mobile.crop, CropRect::new(0.0, 0.0, 0.5, 0.5));
    }

    #[test]
    fn test_replace_value_matches_wire_round_trip() {
        let mut raw = ResponsiveCropValue::default();
        raw.media = MediaSource::Item {
            id: None,
            path: None,
            url: Some("https://cdn/a.png".into()),
        };

        let next = replace_value(raw);
        let text = crate::normalize::serialize_value(&next).unwrap();
        assert_eq!(crate::normalize::parse_serialized_value(Some(&text)), next);
        assert_eq!(next.media.url(), Some("https://cdn/a.png"));
    }
}

use crate::error::{CropValueError, HostError, SaveError, StateResult};
use crate::geometry::{CropRect, FocalPoint};
use crate::host::HostValueStore;
use crate::model::{BreakpointConfig, BreakpointKey, MediaSelection, ResponsiveCropValue};
use crate::normalize::{parse_serialized_value, serialize_value};

use super::ops;
use super::save::{SaveEvent, SaveStateMachine, SaveStatus};

/// One editing session for a responsive crop field.
///
/// Holds the in-progress value and the snapshot it was loaded from (or last
/// saved as). Every edit replaces the value with a new one built by the pure
/// functions in [`crate::state`]. Cancelling restores the snapshot.
#[derive(Debug)]
pub struct CropEditor {
    value: ResponsiveCropValue,
    snapshot: ResponsiveCropValue,
    /// Value handed to the host by the save in flight.
    pending: Option<ResponsiveCropValue>,
    active_breakpoint: BreakpointKey,
    save: SaveStateMachine,
    last_error: Option<String>,
}

impl CropEditor {
    pub fn new(value: ResponsiveCropValue) -> Self {
        let value = value.normalized();
        Self {
            snapshot: value.clone(),
            value,
            pending: None,
            active_breakpoint: BreakpointKey::default(),
            save: SaveStateMachine::new(),
            last_error: None,
        }
    }

    /// Start from stored text. Missing or corrupted text gives the default value.
    pub fn open(serialized: Option<&str>) -> Self {
        Self::new(parse_serialized_value(serialized))
    }

    /// Load the stored value from the host and start editing it.
    pub fn load_from<S: HostValueStore + ?Sized>(store: &mut S) -> Result<Self, HostError> {
        let stored = store.load()?;
        Ok(Self::open(stored.as_deref()))
    }

    pub fn value(&self) -> &ResponsiveCropValue {
        &self.value
    }

    /// The value as last loaded or saved.
    pub fn snapshot(&self) -> &ResponsiveCropValue {
        &self.snapshot
    }

    pub fn serialized(&self) -> Result<String, CropValueError> {
        serialize_value(&self.value)
    }

    /// Check if there are edits that the host has not accepted yet.
    pub fn is_dirty(&self) -> bool {
        self.value != self.snapshot
    }

    pub fn active_breakpoint(&self) -> BreakpointKey {
        self.active_breakpoint
    }

    /// Change the breakpoint being edited. Does not touch the value.
    pub fn set_active_breakpoint(&mut self, key: BreakpointKey) {
        self.active_breakpoint = key;
    }

    pub fn active_config(&self) -> &BreakpointConfig {
        self.value.breakpoint(self.active_breakpoint)
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save.status()
    }

    /// Message from the last failed save, cleared when the next save starts.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Check if a save may start: an image is chosen and no save is in flight.
    ///
    /// An empty URL counts as no image.
    pub fn can_save(&self) -> bool {
        self.value.media.url().is_some_and(|url| !url.is_empty())
            && self.save.can_transition(SaveEvent::Begin)
    }

    pub fn set_media_selection(&mut self, media: &MediaSelection) {
        self.value = ops::set_media_selection(&self.value, media);
    }

    pub fn set_manual_url(&mut self, url: &str) {
        self.value = ops::set_manual_url(&self.value, url);
    }

    pub fn set_focal_point(&mut self, fp: FocalPoint) {
        self.value = ops::set_focal_point(&self.value, fp);
    }

    pub fn set_crop_for_breakpoint(&mut self, key: BreakpointKey, rect: CropRect) {
        self.value = ops::set_crop_for_breakpoint(&self.value, key, rect);
    }

    /// Set the crop of the active breakpoint.
    pub fn set_active_crop(&mut self, rect: CropRect) {
        self.set_crop_for_breakpoint(self.active_breakpoint, rect);
    }

    pub fn set_aspect_ratio(&mut self, key: BreakpointKey, ratio: &str) {
        self.value = ops::set_aspect_ratio(&self.value, key, ratio);
    }

    pub fn reset_focal_point(&mut self) {
        self.value = ops::reset_focal_point(&self.value);
    }

    pub fn reset_crops(&mut self) {
        self.value = ops::reset_crops(&self.value);
    }

    pub fn replace_value(&mut self, next: ResponsiveCropValue) {
        self.value = ops::replace_value(next);
    }

    /// Throw away edits and go back to the snapshot.
    ///
    /// A save already handed to the host is not aborted; if it succeeds the
    /// snapshot moves to the saved value.
    pub fn cancel(&mut self) {
        tracing::debug!("discarding edits");
        self.value = self.snapshot.clone();
    }

    /// Start a save and return the payload to hand to the host.
    ///
    /// Fails without changing state if a save is already in flight.
    pub fn begin_save(&mut self) -> Result<String, SaveError> {
        let payload = self.serialized()?;
        self.save.transition(SaveEvent::Begin)?;
        self.pending = Some(self.value.clone());
        self.last_error = None;
        Ok(payload)
    }

    /// Record the host's answer to the save in flight.
    ///
    /// On success the saved value becomes the snapshot. Edits made while the
    /// save was in flight stay in the current value for the next save.
    pub fn finish_save(&mut self, result: Result<(), HostError>) -> StateResult<SaveStatus> {
        match result {
            Ok(()) => {
                let status = self.save.transition(SaveEvent::Succeed)?;
                if let Some(saved) = self.pending.take() {
                    self.snapshot = saved;
                }
                Ok(status)
            }
            Err(err) => {
                let status = self.save.transition(SaveEvent::Fail)?;
                tracing::warn!(%err, "save failed");
                self.pending = None;
                self.last_error = Some(err.to_string());
                Ok(status)
            }
        }
    }

    /// Run a full save round trip against `store`.
    ///
    /// A host failure is recorded as [`SaveStatus::Error`] and also returned.
    pub fn save_with<S: HostValueStore + ?Sized>(&mut self, store: &mut S) -> Result<(), SaveError> {
        let payload = self.begin_save()?;
        let result = store.save(&payload);
        self.finish_save(result.clone())?;
        result.map_err(SaveError::from)
    }
}

impl Default for CropEditor {
    fn default() -> Self {
        Self::new(ResponsiveCropValue::default())
    }
}

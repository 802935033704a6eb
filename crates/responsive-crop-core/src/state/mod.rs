//! Editing state for a responsive crop field.
//!
//! - `ops` - pure `(old value) -> new value` transitions
//! - `save` - the save-status state machine
//! - `session` - [`CropEditor`], which owns the in-progress value, the last
//!   saved snapshot, the active breakpoint and the save status
//!
//! All operations are synchronous. The only round trip is the save, and the
//! state machine rejects a second save while one is in flight.

mod ops;
mod save;
mod session;

pub use ops::{
    replace_value, reset_crops, reset_focal_point, set_aspect_ratio, set_crop_for_breakpoint,
    set_focal_point, set_manual_url, set_media_selection,
};
pub use save::{SaveEvent, SaveStateMachine, SaveStatus};
pub use session::CropEditor;

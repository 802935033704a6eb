use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StateError, StateResult};

/// Where the most recent save stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Success,
    Error,
}

impl SaveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SaveStatus::Idle => "idle",
            SaveStatus::Saving => "saving",
            SaveStatus::Success => "success",
            SaveStatus::Error => "error",
        }
    }

    /// Short text for the status badge.
    pub fn label(self) -> &'static str {
        match self {
            SaveStatus::Idle => "Ready",
            SaveStatus::Saving => "Saving...",
            SaveStatus::Success => "Saved",
            SaveStatus::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveEvent {
    /// A save was initiated.
    Begin,
    /// The host accepted the value.
    Succeed,
    /// The host write failed.
    Fail,
}

/// Save-status state machine.
///
/// There is no terminal state; `Success` and `Error` both accept the next
/// `Begin`. `Begin` while `Saving` is rejected rather than queued.
#[derive(Debug, Default)]
pub struct SaveStateMachine {
    status: SaveStatus,
}

impl SaveStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn can_transition(&self, event: SaveEvent) -> bool {
        self.next_status(event).is_some()
    }

    pub fn next_status(&self, event: SaveEvent) -> Option<SaveStatus> {
        use SaveEvent::*;
        match (self.status, event) {
            (SaveStatus::Idle | SaveStatus::Success | SaveStatus::Error, Begin) => {
                Some(SaveStatus::Saving)
            }
            (SaveStatus::Saving, Succeed) => Some(SaveStatus::Success),
            (SaveStatus::Saving, Fail) => Some(SaveStatus::Error),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: SaveEvent) -> StateResult<SaveStatus> {
        tracing::debug!(from = ?self.status, event = ?event, "request save transition");
        let next = self.next_status(event).ok_or_else(|| {
            let from = self.status;
            tracing::warn!(from = ?from, event = ?event, "invalid save transition requested");
            StateError::InvalidSaveTransition { from, event }
        })?;

        self.status = next;
        Ok(self.status)
    }
}

impl fmt::Display for SaveStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SaveStatus::{:?}", self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let machine = SaveStateMachine::new();
        assert_eq!(machine.status(), SaveStatus::Idle);
        assert_eq!(machine.to_string(), "SaveStatus::Idle");
    }

    #[test]
    fn test_successful_save_cycle() {
        let mut machine = SaveStateMachine::new();
        assert_eq!(machine.transition(SaveEvent::Begin), Ok(SaveStatus::Saving));
        assert_eq!(machine.transition(SaveEvent::Succeed), Ok(SaveStatus::Success));
        assert_eq!(machine.transition(SaveEvent::Begin), Ok(SaveStatus::Saving));
    }

    #[test]
    fn test_failed_save_can_be_retried() {
        let mut machine = SaveStateMachine::new();
        machine.transition(SaveEvent::Begin).expect("idle -> saving");
        assert_eq!(machine.transition(SaveEvent::Fail), Ok(SaveStatus::Error));
        assert!(machine.can_transition(SaveEvent::Begin));
        assert_eq!(machine.transition(SaveEvent::Begin), Ok(SaveStatus::Saving));
    }

    #[test]
    fn test_begin_while_saving_is_rejected() {
        let mut machine = SaveStateMachine::new();
        machine.transition(SaveEvent::Begin).expect("idle -> saving");

        let err = machine.transition(SaveEvent::Begin).unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidSaveTransition {
                from: SaveStatus::Saving,
                event: SaveEvent::Begin,
            }
        );
        assert_eq!(machine.status(), SaveStatus::Saving);
    }

    #[test]
    fn test_results_without_save_are_rejected() {
        let machine = SaveStateMachine::new();
        assert!(!machine.can_transition(SaveEvent::Succeed));
        assert!(!machine.can_transition(SaveEvent::Fail));
    }

    #[test]
    fn test_labels() {
        assert_eq!(SaveStatus::Idle.label(), "Ready");
        assert_eq!(SaveStatus::Saving.label(), "Saving...");
        assert_eq!(SaveStatus::Success.as_str(), "success");
        assert_eq!(SaveStatus::Error.label(), "Error");
    }
}

//! Enumerations and field types for tasks.
//!
//! The on-disk and over-the-wire spelling of each status is the human readable
//! one (`"Not Completed"`, `"In Progress"`, `"Completed"`), so files written by
//! older builds stay readable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task completion status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    #[default]
    #[serde(rename = "Not Completed")]
    NotCompleted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl Status {
    /// Human readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Status::NotCompleted => "Not Completed",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Map a 1-based picker choice (`"1"`..`"3"`) to a status.
    pub fn from_choice(choice: &str) -> Option<Status> {
        match choice.trim() {
            "1" => Some(Status::NotCompleted),
            "2" => Some(Status::InProgress),
            "3" => Some(Status::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_with_spaces() {
        assert_eq!(serde_json::to_string(&Status::NotCompleted).unwrap(), "\"Not Completed\"");
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"In Progress\"");
        assert_eq!(serde_json::to_string(&Status::Completed).unwrap(), "\"Completed\"");
    }

    #[test]
    fn test_status_rejects_unknown_label() {
        assert!(serde_json::from_str::<Status>("\"Done\"").is_err());
    }

    #[test]
    fn test_status_from_choice() {
        assert_eq!(Status::from_choice("1"), Some(Status::NotCompleted));
        assert_eq!(Status::from_choice("2"), Some(Status::InProgress));
        assert_eq!(Status::from_choice(" 3 "), Some(Status::Completed));
        assert_eq!(Status::from_choice("4"), None);
        assert_eq!(Status::from_choice(""), None);
    }

    #[test]
    fn test_labels_match_display() {
        for status in [Status::NotCompleted, Status::InProgress, Status::Completed] {
            assert_eq!(status.to_string(), status.label());
        }
    }
}

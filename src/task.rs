//! Task data structure and its forgiving decoder.
//!
//! `Task` is what the store persists and what the HTTP API returns. Request
//! bodies are decoded into `TaskPayload` first, because clients may leave out
//! the fields the server fills in.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::Status;

/// A single unit of work.
///
/// Field order here is the field order in the task file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub status: Status,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Local>,
}

impl Task {
    /// Decode one element of the task file, keeping whatever fields parse.
    ///
    /// Missing or mistyped fields fall back to their zero value (`0`, `""`,
    /// `Not Completed`, the Unix epoch). A value that is not an object yields
    /// an all-zero task.
    pub fn from_value_lenient(value: &Value) -> Task {
        let mut task = Task::default();
        let Some(fields) = value.as_object() else {
            return task;
        };

        if let Some(id) = fields.get("id").and_then(Value::as_i64) {
            task.id = id;
        }
        if let Some(description) = fields.get("description").and_then(Value::as_str) {
            task.description = description.to_string();
        }
        if let Some(status) = fields.get("status").and_then(|v| Status::deserialize(v).ok()) {
            task.status = status;
        }
        if let Some(created_at) = fields
            .get("createdAt")
            .and_then(|v| DateTime::<Local>::deserialize(v).ok())
        {
            task.created_at = created_at;
        }
        task
    }
}

/// Task as sent by HTTP clients.
///
/// Unlike the file decoder this one is strict about types: a body that does
/// not fit is rejected with the decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPayload {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Local>>,
}

impl TaskPayload {
    /// Turn a full update body into the task that replaces the stored one.
    /// An omitted timestamp becomes the zero value, like any other field.
    pub fn into_task(self) -> Task {
        Task {
            id: self.id,
            description: self.description,
            status: self.status,
            created_at: self.created_at.unwrap_or_default(),
        }
    }
}

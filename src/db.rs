//! File-backed task store and helpers shared by both front ends.
//!
//! The whole collection lives in one JSON file. Every operation reads the
//! file, works on the in-memory copy and writes the whole file back. Nothing
//! is cached between operations.
//!
//! Writes go straight over the existing file: there is no temp file and no
//! rename, so a crash mid-write can leave a truncated file behind (which then
//! loads as an empty collection). Write failures are logged and otherwise
//! ignored. Both are known weak spots of the flat-file format.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::fields::Status;
use crate::task::Task;

/// Default task file name.
pub const DEFAULT_FILE: &str = "tasks.json";

/// Handle to the task file.
///
/// One `TaskStore` is shared (behind an `Arc`) by the terminal and HTTP
/// front ends. Its mutex serialises load-mutate-save cycles within this
/// process; other processes writing the same file are not guarded.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TaskStore {
    /// Create a store for the given file. The file does not need to exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TaskStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the task file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the full collection.
    ///
    /// A missing or unreadable file is an empty collection. Malformed content
    /// is decoded as far as it goes, see `decode_tasks`.
    pub fn load(&self) -> Vec<Task> {
        let _guard = self.guard();
        self.read_tasks()
    }

    /// Overwrite the file with `tasks`. Failures are logged, not returned.
    pub fn save(&self, tasks: &[Task]) {
        let _guard = self.guard();
        self.write_tasks(tasks);
    }

    /// Run one load-mutate-save cycle under the store lock.
    ///
    /// The file is rewritten only when `f` returns `Some`.
    pub fn update<T>(&self, f: impl FnOnce(&mut Vec<Task>) -> Option<T>) -> Option<T> {
        let _guard = self.guard();
        let mut tasks = self.read_tasks();
        let outcome = f(&mut tasks);
        if outcome.is_some() {
            self.write_tasks(&tasks);
        }
        outcome
    }

    /// Append a new task and return it as stored.
    pub fn add(&self, description: String, status: Status) -> Task {
        let _guard = self.guard();
        let mut tasks = self.read_tasks();
        let task = Task {
            id: next_id(&tasks),
            description,
            status,
            created_at: Local::now(),
        };
        tasks.push(task.clone());
        self.write_tasks(&tasks);
        task
    }

    /// Replace the first task whose id matches `task.id`.
    pub fn replace(&self, task: Task) -> Option<Task> {
        self.update(|tasks| {
            let slot = tasks.iter_mut().find(|t| t.id == task.id)?;
            *slot = task.clone();
            Some(task)
        })
    }

    /// Change the status of the first task with `id`.
    pub fn set_status(&self, id: i64, status: Status) -> Option<Task> {
        self.update(|tasks| {
            let task = tasks.iter_mut().find(|t| t.id == id)?;
            task.status = status;
            Some(task.clone())
        })
    }

    /// Delete the first task with `id`, returning it.
    pub fn delete(&self, id: i64) -> Option<Task> {
        self.update(|tasks| remove_first(tasks, id))
    }

    fn read_tasks(&self) -> Vec<Task> {
        match fs::read_to_string(&self.path) {
            Ok(text) => decode_tasks(&text),
            Err(e) => {
                debug!(path = %self.path.display(), "no readable task file, starting empty: {e}");
                Vec::new()
            }
        }
    }

    fn write_tasks(&self, tasks: &[Task]) {
        if let Err(e) = self.try_write(tasks) {
            warn!(path = %self.path.display(), "failed to save tasks: {e}");
        }
    }

    fn try_write(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(tasks)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Decode the task file contents.
///
/// Anything that is not a JSON array is an empty collection. Each element is
/// decoded with `Task::from_value_lenient`, so one bad field never drops the
/// rest of the file.
pub fn decode_tasks(text: &str) -> Vec<Task> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items.iter().map(Task::from_value_lenient).collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            warn!("task file is not valid JSON, treating it as empty: {e}");
            Vec::new()
        }
    }
}

/// Id for a task about to be appended to `tasks`.
///
/// This is the collection length plus one, not a running counter: after a
/// delete the next add can reuse an id that is still in the file.
pub fn next_id(tasks: &[Task]) -> i64 {
    tasks.len() as i64 + 1
}

/// Tasks with the given status, in collection order.
pub fn filter_by_status(tasks: &[Task], status: Status) -> Vec<Task> {
    tasks.iter().filter(|t| t.status == status).cloned().collect()
}

/// Remove the first task with `id`. Later duplicates are left alone.
pub fn remove_first(tasks: &mut Vec<Task>, id: i64) -> Option<Task> {
    let idx = tasks.iter().position(|t| t.id == id)?;
    Some(tasks.remove(idx))
}

/// Format a creation time the way task lists show it, e.g. `02 Jan 06 15:04 +0100`.
pub fn format_created_at(created_at: &DateTime<Local>) -> String {
    created_at.format("%d %b %y %H:%M %z").to_string()
}

/// One line of a task listing.
pub fn format_task_line(task: &Task) -> String {
    format!(
        "ID: {}, Description: {}, Status: {}, Created At: {}",
        task.id,
        task.description,
        task.status,
        format_created_at(&task.created_at)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn temp_store() -> (tempfile::TempDir, TaskStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path().join(DEFAULT_FILE));
        (dir, store)
    }

    fn task(id: i64, description: &str, status: Status) -> Task {
        Task {
            id,
            description: description.to_string(),
            status,
            created_at: Local::now(),
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_garbage_file_loads_empty() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "not json at all").unwrap();
        assert!(store.load().is_empty());
        fs::write(store.path(), r#"{"id": 1}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_fields_load_as_zero_values() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            r#"[{"id": 1, "description": "ok", "status": "Completed", "createdAt": "2024-01-01T00:00:00Z"},
                {"id": "two", "description": 5, "status": "In Progress"}]"#,
        )
        .unwrap();
        let tasks = store.load();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].description, "ok");
        assert_eq!(tasks[0].status, Status::Completed);
        assert_eq!(tasks[1].id, 0);
        assert_eq!(tasks[1].description, "");
        assert_eq!(tasks[1].status, Status::InProgress);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, store) = temp_store();
        let tasks = vec![
            task(1, "write report", Status::Completed),
            task(2, "review PR", Status::InProgress),
            task(3, "plan week", Status::NotCompleted),
        ];
        store.save(&tasks);
        let loaded = store.load();
        assert_eq!(loaded, tasks);

        store.save(&loaded);
        assert_eq!(store.load(), tasks);
    }

    #[test]
    fn test_save_is_indented_json_array() {
        let (_dir, store) = temp_store();
        store.save(&[task(1, "a", Status::NotCompleted)]);
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": 1,"));
        assert!(text.contains("\"status\": \"Not Completed\""));

        store.save(&[]);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn test_save_to_unwritable_path_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("missing").join("tasks.json"));
        store.save(&[task(1, "lost", Status::NotCompleted)]);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_add_assigns_position_based_ids() {
        let (_dir, store) = temp_store();
        for n in 1..=4 {
            let added = store.add(format!("task {n}"), Status::NotCompleted);
            assert_eq!(added.id, n);
        }
        let tasks = store.load();
        assert_eq!(tasks.len(), 4);
        for (i, t) in tasks.iter().enumerate() {
            assert_eq!(t.id, i as i64 + 1);
        }
    }

    #[test]
    fn test_add_after_delete_can_duplicate_id() {
        let (_dir, store) = temp_store();
        store.add("one".into(), Status::NotCompleted);
        store.add("two".into(), Status::NotCompleted);
        store.add("three".into(), Status::NotCompleted);
        assert!(store.delete(1).is_some());

        let added = store.add("four".into(), Status::NotCompleted);
        assert_eq!(added.id, 3);
        let ids: Vec<i64> = store.load().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 3]);
    }

    #[test]
    fn test_delete_removes_only_first_match() {
        let (_dir, store) = temp_store();
        store.save(&[
            task(1, "a", Status::NotCompleted),
            task(2, "b", Status::InProgress),
            task(2, "c", Status::Completed),
        ]);
        let removed = store.delete(2).unwrap();
        assert_eq!(removed.description, "b");
        let left: Vec<String> = store.load().into_iter().map(|t| t.description).collect();
        assert_eq!(left, vec!["a", "c"]);
    }

    #[test]
    fn test_delete_missing_id_leaves_file_untouched() {
        let (_dir, store) = temp_store();
        store.save(&[task(1, "a", Status::NotCompleted)]);
        let before = fs::read(store.path()).unwrap();
        assert!(store.delete(9).is_none());
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_replace_and_set_status() {
        let (_dir, store) = temp_store();
        store.save(&[task(1, "a", Status::NotCompleted), task(2, "b", Status::NotCompleted)]);

        let replacement = task(2, "b, reworded", Status::Completed);
        assert_eq!(store.replace(replacement.clone()), Some(replacement.clone()));
        assert!(store.replace(task(7, "nope", Status::Completed)).is_none());

        let updated = store.set_status(1, Status::InProgress).unwrap();
        assert_eq!(updated.status, Status::InProgress);
        assert!(store.set_status(42, Status::Completed).is_none());

        let tasks = store.load();
        assert_eq!(tasks[0].status, Status::InProgress);
        assert_eq!(tasks[1], replacement);
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let (_dir, store) = temp_store();
        let store = Arc::new(store);
        let workers: Vec<_> = (0..4)
            .map(|w| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for n in 0..10 {
                        store.add(format!("worker {w} item {n}"), Status::NotCompleted);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(store.load().len(), 40);
    }

    #[test]
    fn test_filter_by_status_keeps_order() {
        let tasks = vec![
            task(1, "a", Status::Completed),
            task(2, "b", Status::InProgress),
            task(3, "c", Status::Completed),
            task(4, "d", Status::NotCompleted),
        ];
        let done = filter_by_status(&tasks, Status::Completed);
        assert_eq!(done.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(filter_by_status(&tasks[..1], Status::InProgress).is_empty());
    }

    #[test]
    fn test_next_id_is_length_plus_one() {
        assert_eq!(next_id(&[]), 1);
        assert_eq!(next_id(&[task(9, "x", Status::NotCompleted)]), 2);
    }

    #[test]
    fn test_format_task_line() {
        let created_at = DateTime::parse_from_rfc3339("2024-05-06T07:08:00+00:00")
            .unwrap()
            .with_timezone(&Local);
        let line = format_task_line(&Task {
            id: 5,
            description: "buy milk".into(),
            status: Status::InProgress,
            created_at,
        });
        assert!(line.starts_with("ID: 5, Description: buy milk, Status: In Progress, Created At: "));
        assert_eq!(format_created_at(&created_at), created_at.format("%d %b %y %H:%M %z").to_string());
    }
}

//! Main application logic for the terminal user interface.
//!
//! `App` runs the menu loop: show the menu, wait for a key, run the chosen
//! subflow to completion, show the menu again. Subflows talk to the store
//! directly and describe what to show as `Scene`s sent to the painter.

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::style::Color;
use tracing::{info, warn};

use crate::db::{filter_by_status, TaskStore};
use crate::fields::Status;
use crate::task::Task;
use crate::tui::{
    colors,
    enums::{AppState, Subflow},
    input::{InputField, KeySource},
    painter::Canvas,
    scene::{Scene, STATUS_OPTIONS},
    spinner::Spinner,
};

/// Main application state for the terminal user interface.
pub struct App<K: KeySource> {
    state: AppState,
    store: Arc<TaskStore>,
    canvas: Canvas,
    keys: K,
    flash: Duration,
}

impl<K: KeySource> App<K> {
    /// `flash` is how long result messages stay up before the menu returns.
    pub fn new(store: Arc<TaskStore>, canvas: Canvas, keys: K, flash: Duration) -> Self {
        App {
            state: AppState::MenuDisplayed,
            store,
            canvas,
            keys,
            flash,
        }
    }

    /// Run the menu loop until the user picks Exit.
    pub fn run(mut self) -> io::Result<()> {
        loop {
            match self.state {
                AppState::MenuDisplayed => {
                    self.canvas.show(Scene::Menu);
                    if let KeyCode::Char(c) = self.keys.next_key()?.code {
                        if let Some(next) = AppState::on_menu_key(c) {
                            self.state = next;
                        }
                    }
                }
                AppState::AwaitingInput(subflow) => {
                    self.run_subflow(subflow)?;
                    self.state = AppState::MenuDisplayed;
                }
                AppState::Exiting => return Ok(()),
            }
        }
    }

    fn run_subflow(&mut self, subflow: Subflow) -> io::Result<()> {
        match subflow {
            Subflow::Add => self.add_task(),
            Subflow::Update => self.update_task(),
            Subflow::ShowAll => {
                let tasks = self.store.load();
                self.show_tasks(tasks)
            }
            Subflow::ShowByStatus(status) => {
                let tasks = filter_by_status(&self.store.load(), status);
                self.show_tasks(tasks)
            }
            Subflow::Delete => self.delete_task(),
        }
    }

    fn add_task(&mut self) -> io::Result<()> {
        let description = self.read_line(&[], "Enter task description: ")?;
        let task = self.with_spinner(|store| store.add(description, Status::NotCompleted));
        info!(id = task.id, "task added from terminal");
        self.flash("Task added successfully.", colors::SUCCESS);
        Ok(())
    }

    fn update_task(&mut self) -> io::Result<()> {
        let tasks = self.store.load();
        self.show_tasks(tasks.clone())?;

        let input = self.read_line(&[], "Enter task ID to update: ")?;
        let Some(id) = parse_id(&input).filter(|id| tasks.iter().any(|t| t.id == *id)) else {
            self.flash("Task not found.", colors::FAILURE);
            return Ok(());
        };

        let choice = self.read_line(&STATUS_OPTIONS, "Enter new status (1-3): ")?;
        let Some(status) = Status::from_choice(&choice) else {
            self.flash("Invalid choice. Status not updated.", colors::FAILURE);
            return Ok(());
        };

        // The task can vanish through the HTTP API while the user is typing.
        match self.with_spinner(|store| store.set_status(id, status)) {
            Some(_) => {
                info!(id, %status, "task status changed from terminal");
                self.flash("Task updated successfully.", colors::SUCCESS);
            }
            None => self.flash("Task not found.", colors::FAILURE),
        }
        Ok(())
    }

    fn delete_task(&mut self) -> io::Result<()> {
        let tasks = self.store.load();
        self.show_tasks(tasks)?;

        let input = self.read_line(&[], "Enter task ID to delete: ")?;
        let removed = match parse_id(&input) {
            Some(id) => self.with_spinner(|store| store.delete(id)),
            None => None,
        };
        match removed {
            Some(task) => {
                info!(id = task.id, "task deleted from terminal");
                self.flash("Task deleted successfully.", colors::SUCCESS);
            }
            None => self.flash("Task not found.", colors::FAILURE),
        }
        Ok(())
    }

    /// List `tasks` and wait for any key, or flash a notice when there are none.
    fn show_tasks(&mut self, tasks: Vec<Task>) -> io::Result<()> {
        if tasks.is_empty() {
            self.flash("No tasks found.", colors::NOTICE);
            return Ok(());
        }
        self.canvas.show(Scene::Tasks(tasks));
        self.keys.next_key()?;
        Ok(())
    }

    /// Line editor: redraws after every key until Enter.
    fn read_line(&mut self, header: &'static [&'static str], prompt: &'static str) -> io::Result<String> {
        let mut field = InputField::new();
        loop {
            self.canvas.show(Scene::Prompt {
                header,
                prompt,
                input: field.value.clone(),
            });
            if field.handle_key(self.keys.next_key()?) {
                return Ok(field.value);
            }
        }
    }

    /// Run a store write with the loading indicator up.
    fn with_spinner<T>(&self, write: impl FnOnce(&TaskStore) -> T) -> T {
        let spinner = match Spinner::start(self.canvas.clone()) {
            Ok(spinner) => Some(spinner),
            Err(e) => {
                warn!("could not start spinner: {e}");
                None
            }
        };
        let result = write(&self.store);
        if let Some(spinner) = spinner {
            spinner.stop();
        }
        result
    }

    fn flash(&self, text: &'static str, color: Color) {
        self.canvas.show(Scene::Flash { text, color });
        thread::sleep(self.flash);
    }
}

/// Parse an id typed at a prompt.
fn parse_id(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

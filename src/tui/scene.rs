//! Full-screen draw requests and how each one is rendered.
//!
//! Every screen is a stack of centered lines starting at the top row. A
//! `Scene` owns its data so it can be sent to the painter thread.

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::db::format_task_line;
use crate::task::Task;
use crate::tui::colors::{self, status_color};
use crate::tui::spinner::FRAMES;

/// Main menu entries, in key order.
pub const MENU_OPTIONS: [&str; 8] = [
    "1. Add Task",
    "2. Update Task",
    "3. Show All Tasks",
    "4. Show Completed Tasks",
    "5. Show In Progress Tasks",
    "6. Show Not Completed Tasks",
    "7. Delete Task",
    "8. Exit",
];

/// Status picker shown above the status prompt.
pub const STATUS_OPTIONS: [&str; 3] = ["1. Not Completed", "2. In Progress", "3. Completed"];

/// One screen's worth of content.
#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    Menu,
    /// A line editor. `header` lines are shown above the prompt.
    Prompt {
        header: &'static [&'static str],
        prompt: &'static str,
        input: String,
    },
    Tasks(Vec<Task>),
    Flash {
        text: &'static str,
        color: Color,
    },
    /// Loading indicator at the given frame index.
    Spinner(usize),
}

impl Scene {
    /// The lines this scene draws, top to bottom.
    pub fn lines(&self) -> Vec<Line<'_>> {
        match self {
            Scene::Menu => {
                let mut lines = vec![
                    Line::styled("--- Task Manager ---", Style::default().fg(colors::TITLE)),
                    Line::from(""),
                ];
                let exit = MENU_OPTIONS.len() - 1;
                lines.extend(MENU_OPTIONS.iter().enumerate().map(|(i, option)| {
                    let color = if i == exit { colors::EXIT } else { colors::OPTION };
                    Line::styled(*option, Style::default().fg(color))
                }));
                lines
            }
            Scene::Prompt { header, prompt, input } => {
                let mut lines: Vec<Line> = header
                    .iter()
                    .map(|option| Line::styled(*option, Style::default().fg(colors::OPTION)))
                    .collect();
                if !lines.is_empty() {
                    lines.push(Line::from(""));
                }
                lines.push(Line::styled(*prompt, Style::default().fg(colors::PROMPT)));
                lines.push(Line::from(""));
                lines.push(Line::styled(input.as_str(), Style::default().fg(colors::OPTION)));
                lines
            }
            Scene::Tasks(tasks) => tasks
                .iter()
                .map(|task| Line::styled(format_task_line(task), Style::default().fg(status_color(task.status))))
                .collect(),
            Scene::Flash { text, color } => vec![Line::styled(*text, Style::default().fg(*color))],
            Scene::Spinner(frame) => vec![Line::styled(
                format!("Loading {}", FRAMES[frame % FRAMES.len()]),
                Style::default().fg(colors::TITLE),
            )],
        }
    }
}

/// Draw `scene` over the whole frame.
pub fn render(f: &mut Frame, scene: &Scene) {
    let paragraph = Paragraph::new(scene.lines()).alignment(Alignment::Center);
    f.render_widget(paragraph, f.area());
}

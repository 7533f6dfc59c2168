//! Terminal front end entry point and setup.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::db::TaskStore;
use crate::tui::{app::App, input::TerminalKeys, painter::Painter};

/// Initialise the terminal, run the menu loop until Exit, restore the terminal.
pub fn run_tui(store: Arc<TaskStore>, flash: Duration) -> io::Result<()> {
    enable_raw_mode()?;
    let result = run_on_alternate_screen(store, flash);
    let restored = restore();
    result?;
    restored
}

fn run_on_alternate_screen(store: Arc<TaskStore>, flash: Duration) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let painter = Painter::spawn(terminal)?;
    let app = App::new(store, painter.canvas(), TerminalKeys, flash);
    let result = app.run();
    painter.finish()?;
    result
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

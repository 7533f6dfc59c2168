//! The thread that owns the terminal.
//!
//! Only the painter calls into ratatui. The menu loop and the spinner hand it
//! scenes through a `Canvas`, so two threads never draw at the same time.

use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use ratatui::{backend::Backend, Terminal};
use tracing::error;

use crate::tui::scene::{render, Scene};

/// Cheap, cloneable handle for sending scenes to the painter.
#[derive(Clone)]
pub struct Canvas {
    tx: Sender<Scene>,
}

impl Canvas {
    /// Queue `scene` for drawing. Dropped silently if the painter has stopped.
    pub fn show(&self, scene: Scene) {
        let _ = self.tx.send(scene);
    }
}

/// Running painter thread.
pub struct Painter<B: Backend + Send + 'static> {
    canvas: Canvas,
    thread: JoinHandle<io::Result<Terminal<B>>>,
}

impl<B: Backend + Send + 'static> Painter<B> {
    /// Move `terminal` onto a new painter thread.
    pub fn spawn(mut terminal: Terminal<B>) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<Scene>();
        let thread = thread::Builder::new().name("painter".to_string()).spawn(move || {
            for scene in rx {
                if let Err(e) = terminal.draw(|f| render(f, &scene)) {
                    error!("failed to draw: {e}");
                    return Err(e);
                }
            }
            Ok(terminal)
        })?;
        Ok(Painter {
            canvas: Canvas { tx },
            thread,
        })
    }

    /// A new handle for sending scenes.
    pub fn canvas(&self) -> Canvas {
        self.canvas.clone()
    }

    /// Draw what is still queued and take the terminal back.
    ///
    /// Blocks until every other `Canvas` clone has been dropped.
    pub fn finish(self) -> io::Result<Terminal<B>> {
        drop(self.canvas);
        self.thread
            .join()
            .map_err(|_| io::Error::other("painter thread panicked"))?
    }
}

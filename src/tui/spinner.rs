//! Loading indicator shown while the task file is being written.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::tui::painter::Canvas;
use crate::tui::scene::Scene;

pub const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// A running spinner. Stop it with `stop`; it sends one stop signal and waits
/// for the thread, so no frame is queued after `stop` returns.
pub struct Spinner {
    stop: Sender<()>,
    thread: JoinHandle<()>,
}

impl Spinner {
    pub fn start(canvas: Canvas) -> io::Result<Self> {
        let (stop, stopped) = mpsc::channel::<()>();
        let thread = thread::Builder::new().name("spinner".to_string()).spawn(move || {
            let mut frame = 0;
            loop {
                canvas.show(Scene::Spinner(frame));
                match stopped.recv_timeout(FRAME_INTERVAL) {
                    Err(RecvTimeoutError::Timeout) => frame = (frame + 1) % FRAMES.len(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                }
            }
        })?;
        Ok(Spinner { stop, thread })
    }

    pub fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.thread.join();
    }
}

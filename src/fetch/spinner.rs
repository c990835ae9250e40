use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const SPINNER_CHARS: [char; 4] = ['|', '/', '-', '\\'];
const SPINNER_DELAY: Duration = Duration::from_millis(100);

/// Animates `<message>... |` on stderr until dropped.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let message = message.to_string();

        let handle = thread::spawn(move || {
            let mut stderr = io::stderr();
            for frame in SPINNER_CHARS.iter().cycle() {
                if !flag.load(Ordering::Relaxed) {
                    break;
                }
                let _ = write!(stderr, "\r{message}... {frame}");
                let _ = stderr.flush();
                thread::sleep(SPINNER_DELAY);
            }
        });

        Self {
            running,
            handle: Some(handle),
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        let mut stderr = io::stderr();
        let _ = write!(stderr, "\r{}\r", " ".repeat(40));
        let _ = stderr.flush();
    }
}

use std::{
    io,
    process::{Child, Command},
    sync::Mutex,
};

use tracing::debug;
use umrs_shared::LaunchDescriptor;

/// Starts a child process and returns its pid without waiting on it.
pub trait ProcessSpawner: Send + Sync {
    fn spawn(&self, descriptor: &LaunchDescriptor) -> io::Result<u32>;

    /// Collects children that have already exited. Never blocks.
    fn reap_finished(&self) -> usize {
        0
    }
}

/// Spawns through `std::process::Command`. The child inherits stdio. Handles
/// are kept only so exited children can be collected with `try_wait`; their
/// exit status is discarded.
#[derive(Debug, Default)]
pub struct SystemSpawner {
    running: Mutex<Vec<Child>>,
}

impl SystemSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(&self) -> usize {
        self.running.lock().map(|children| children.len()).unwrap_or(0)
    }
}

impl ProcessSpawner for SystemSpawner {
    fn spawn(&self, descriptor: &LaunchDescriptor) -> io::Result<u32> {
        self.reap_finished();
        let child = Command::new(&descriptor.program)
            .args(&descriptor.args)
            .spawn()?;
        let pid = child.id();
        if let Ok(mut running) = self.running.lock() {
            running.push(child);
        }
        Ok(pid)
    }

    fn reap_finished(&self) -> usize {
        let Ok(mut running) = self.running.lock() else {
            return 0;
        };
        let before = running.len();
        // Errors from try_wait leave the handle in place for the next pass.
        running.retain_mut(|child| !matches!(child.try_wait(), Ok(Some(_))));
        let reaped = before - running.len();
        if reaped > 0 {
            debug!(reaped, still_running = running.len(), "collected exited tools");
        }
        reaped
    }
}

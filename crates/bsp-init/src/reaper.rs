use log::debug;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;
use std::thread;
use std::time::Duration;

/// How long the silent init sleeps between reaping passes
pub const IDLE_INTERVAL: Duration = Duration::from_secs(3600);

/// Collect every child that has already terminated without blocking.
/// Returns how many were reaped.
pub fn reap_children() -> usize {
    let mut reaped = 0;
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(pid, status)) => {
                debug!("child {} exited with {}", pid, status);
                reaped += 1;
            }
            Ok(WaitStatus::Signaled(pid, signal, _)) => {
                debug!("child {} killed by {:?}", pid, signal);
                reaped += 1;
            }
            Ok(WaitStatus::StillAlive) => break,
            Ok(_) => continue,
            // ECHILD: nothing left to wait for
            Err(_) => break,
        }
    }
    reaped
}

#[derive(Debug, Clone)]
pub struct SilentLoop {
    pub interval: Duration,
    /// Number of sleep/reap passes; `None` runs forever
    pub cycles: Option<u64>,
}

impl Default for SilentLoop {
    fn default() -> Self {
        Self {
            interval: IDLE_INTERVAL,
            cycles: None,
        }
    }
}

impl SilentLoop {
    /// Sleep, then reap. Produces no output. Returns the total reaped.
    pub fn run(&self) -> usize {
        let mut passes = 0;
        let mut total = 0;
        while self.cycles.is_none_or(|limit| passes < limit) {
            thread::sleep(self.interval);
            total += reap_children();
            passes += 1;
        }
        total
    }
}

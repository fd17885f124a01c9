//! Print, lock down, print again, then trip the filter with `fork()`

use crate::bpf::SeccompBpf;
use crate::profile::{SeccompFilter, SeccompProfile};
use bsp_core::{BspError, Result};
use log::{debug, info};
use nix::sys::signal::Signal;
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{ForkResult, fork};
use std::fmt;
use std::io::Write;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    pub profile: SeccompProfile,
    pub greetings: u32,
    pub interval: Duration,
}

impl DemoConfig {
    /// WriteOnly greets once; WriteSleep greets five times, 500 ms apart
    pub fn for_profile(profile: SeccompProfile) -> Self {
        match profile {
            SeccompProfile::WriteOnly => Self {
                profile,
                greetings: 1,
                interval: Duration::ZERO,
            },
            SeccompProfile::WriteSleep => Self {
                profile,
                greetings: 5,
                interval: Duration::from_millis(500),
            },
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::for_profile(SeccompProfile::WriteSleep)
    }
}

/// Run the demo in the calling process.
///
/// Only returns if the filter could not be installed or if `fork()` was
/// not stopped; with a working filter the kernel kills the process.
pub fn run_demo(config: &DemoConfig) -> Result<()> {
    println!("Hello, World! init");

    let filter = SeccompFilter::from_profile(config.profile);
    SeccompBpf::load(&filter)?;

    for _ in 0..config.greetings {
        println!("Hello, World!");
        if config.profile == SeccompProfile::WriteSleep && !config.interval.is_zero() {
            std::thread::sleep(config.interval);
        }
    }

    match unsafe { fork() } {
        Ok(ForkResult::Child) => unsafe { libc::_exit(0) },
        Ok(ForkResult::Parent { .. }) => Err(BspError::Seccomp(
            "fork() was not blocked by the filter".to_string(),
        )),
        Err(e) => Err(BspError::Seccomp(format!("fork: {}", e))),
    }
}

/// How the supervised demo process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoOutcome {
    /// Killed by SIGSYS, i.e. the filter caught `fork()`
    KilledBySeccomp,
    Signaled(Signal),
    Exited(i32),
}

impl DemoOutcome {
    pub fn is_expected(&self) -> bool {
        matches!(self, DemoOutcome::KilledBySeccomp)
    }
}

impl fmt::Display for DemoOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoOutcome::KilledBySeccomp => {
                write!(f, "Demo process killed by SIGSYS: fork() blocked by seccomp")
            }
            DemoOutcome::Signaled(sig) => write!(f, "Demo process killed by {}", sig),
            DemoOutcome::Exited(code) => write!(f, "Demo process exited with status {}", code),
        }
    }
}

/// Run the demo in a forked child and report how it terminated
pub fn supervise(config: &DemoConfig) -> Result<DemoOutcome> {
    // Buffered output would otherwise be printed by both processes
    let _ = std::io::stdout().flush();

    match unsafe { fork() }? {
        ForkResult::Child => {
            let code = match run_demo(config) {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("error: {}", e);
                    1
                }
            };
            let _ = std::io::stdout().flush();
            unsafe { libc::_exit(code) }
        }
        ForkResult::Parent { child } => {
            debug!("demo running as pid {}", child);
            let outcome = match waitpid(child, None)? {
                WaitStatus::Signaled(_, Signal::SIGSYS, _) => DemoOutcome::KilledBySeccomp,
                WaitStatus::Signaled(_, sig, _) => DemoOutcome::Signaled(sig),
                WaitStatus::Exited(_, code) => DemoOutcome::Exited(code),
                other => {
                    return Err(BspError::Seccomp(format!(
                        "unexpected wait status: {:?}",
                        other
                    )));
                }
            };
            info!("{}", outcome);
            Ok(outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_defaults() {
        let write_only = DemoConfig::for_profile(SeccompProfile::WriteOnly);
        assert_eq!(write_only.greetings, 1);
        assert!(write_only.interval.is_zero());

        let sleepy = DemoConfig::default();
        assert_eq!(sleepy.profile, SeccompProfile::WriteSleep);
        assert_eq!(sleepy.greetings, 5);
        assert_eq!(sleepy.interval, Duration::from_millis(500));
    }

    #[test]
    fn outcome_messages() {
        assert!(DemoOutcome::KilledBySeccomp.is_expected());
        assert!(!DemoOutcome::Exited(0).is_expected());
        assert_eq!(
            DemoOutcome::Exited(1).to_string(),
            "Demo process exited with status 1"
        );
        assert!(DemoOutcome::Signaled(Signal::SIGKILL).to_string().contains("SIGKILL"));
    }
}

//! Seccomp filter building

use crate::syscall_table::syscall_number;
use bsp_core::{BspError, Result};
use std::collections::BTreeSet;

/// Built-in allow-lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeccompProfile {
    /// `write` plus what the runtime needs to print and exit
    WriteOnly,
    /// WriteOnly + the sleep family
    WriteSleep,
}

impl SeccompProfile {
    pub fn all() -> [Self; 2] {
        [SeccompProfile::WriteOnly, SeccompProfile::WriteSleep]
    }

    pub fn description(&self) -> &'static str {
        match self {
            SeccompProfile::WriteOnly => "write and exit only",
            SeccompProfile::WriteSleep => "write, exit and sleep",
        }
    }

    fn write_only_syscalls() -> &'static [&'static str] {
        &[
            "write",
            "writev",
            "exit",
            "exit_group",
            "rt_sigreturn",
            "sigreturn",
            "restart_syscall",
            // allocator
            "brk",
            "mmap",
            "mmap2",
            "munmap",
            "mremap",
            "futex",
        ]
    }

    fn sleep_syscalls() -> &'static [&'static str] {
        &["nanosleep", "clock_nanosleep", "clock_nanosleep_time64"]
    }

    /// Names in this profile that exist on the running architecture
    pub fn syscalls(&self) -> BTreeSet<String> {
        let mut names: Vec<&str> = Self::write_only_syscalls().to_vec();
        if *self == SeccompProfile::WriteSleep {
            names.extend_from_slice(Self::sleep_syscalls());
        }
        names
            .into_iter()
            .filter(|n| syscall_number(n).is_some())
            .map(str::to_string)
            .collect()
    }
}

/// What the filter does with a syscall that is not allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultAction {
    /// Kill the whole process with SIGSYS
    #[default]
    KillProcess,
    /// Deliver SIGSYS to the thread, which may handle it
    Trap,
    /// Fail the call with the given errno
    Errno(u16),
}

/// An allow-list filter
#[derive(Debug, Clone)]
pub struct SeccompFilter {
    allowed: BTreeSet<String>,
    blocked: BTreeSet<String>,
    default_action: DefaultAction,
}

impl SeccompFilter {
    pub fn from_profile(profile: SeccompProfile) -> Self {
        Self {
            allowed: profile.syscalls(),
            blocked: BTreeSet::new(),
            default_action: DefaultAction::KillProcess,
        }
    }

    pub fn allow_syscall(&mut self, name: impl Into<String>) {
        self.allowed.insert(name.into());
    }

    /// Block a syscall even if the allow-list has it
    pub fn block_syscall(&mut self, name: impl Into<String>) {
        self.blocked.insert(name.into());
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        !self.blocked.contains(name) && self.allowed.contains(name)
    }

    /// Allowed names minus blocked ones, sorted
    pub fn effective_syscalls(&self) -> Vec<&str> {
        self.allowed
            .iter()
            .filter(|n| !self.blocked.contains(*n))
            .map(String::as_str)
            .collect()
    }

    pub fn default_action(&self) -> DefaultAction {
        self.default_action
    }

    pub fn set_default_action(&mut self, action: DefaultAction) {
        self.default_action = action;
    }

    pub fn validate(&self) -> Result<()> {
        let effective = self.effective_syscalls();
        if effective.is_empty() {
            return Err(BspError::Seccomp(
                "Filter has no allowed syscalls".to_string(),
            ));
        }
        if let Some(unknown) = effective.iter().find(|n| syscall_number(n).is_none()) {
            return Err(BspError::Seccomp(format!(
                "Unknown syscall to allow: '{}'. This syscall is not supported on this architecture.",
                unknown
            )));
        }
        Ok(())
    }
}

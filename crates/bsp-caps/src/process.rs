//! Capability sets and credentials of the calling process

use crate::capability::Capability;
use bsp_core::{BspError, Result};
use log::debug;
use nix::unistd::{getegid, geteuid, getgid, getpid, getuid};

const LINUX_CAPABILITY_VERSION_3: u32 = 0x2008_0522;

#[repr(C)]
struct CapHeader {
    version: u32,
    pid: libc::c_int,
}

#[repr(C)]
#[derive(Default, Clone, Copy)]
struct CapData {
    effective: u32,
    permitted: u32,
    inheritable: u32,
}

/// The three capability sets of a process, one bit per capability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessCaps {
    pub effective: u64,
    pub permitted: u64,
    pub inheritable: u64,
}

const FLAG_E: u8 = 1;
const FLAG_I: u8 = 2;
const FLAG_P: u8 = 4;

fn flag_letters(flags: u8) -> String {
    let mut s = String::new();
    if flags & FLAG_E != 0 {
        s.push('e');
    }
    if flags & FLAG_I != 0 {
        s.push('i');
    }
    if flags & FLAG_P != 0 {
        s.push('p');
    }
    s
}

impl ProcessCaps {
    /// Query the calling thread's sets with `capget(2)`
    pub fn current() -> Result<Self> {
        let mut header = CapHeader {
            version: LINUX_CAPABILITY_VERSION_3,
            pid: 0,
        };
        let mut data = [CapData::default(); 2];

        let ret = unsafe {
            libc::syscall(
                libc::SYS_capget,
                &mut header as *mut CapHeader,
                data.as_mut_ptr(),
            )
        };
        if ret != 0 {
            return Err(BspError::Capability(format!(
                "cap_get_proc: {}",
                std::io::Error::last_os_error()
            )));
        }

        let join = |lo: u32, hi: u32| ((hi as u64) << 32) | lo as u64;
        let caps = Self {
            effective: join(data[0].effective, data[1].effective),
            permitted: join(data[0].permitted, data[1].permitted),
            inheritable: join(data[0].inheritable, data[1].inheritable),
        };
        debug!("capget: {:?}", caps);
        Ok(caps)
    }

    pub fn has_effective(&self, cap: Capability) -> bool {
        self.effective & cap.mask() != 0
    }

    pub fn has_permitted(&self, cap: Capability) -> bool {
        self.permitted & cap.mask() != 0
    }

    /// Classic capabilities present in the effective set
    pub fn effective_list<'a>(&self, caps: &'a [Capability]) -> Vec<&'a Capability> {
        caps.iter().filter(|c| self.has_effective(**c)).collect()
    }

    fn flags_of(&self, index: u8) -> u8 {
        let bit = 1u64 << index;
        let mut flags = 0;
        if self.effective & bit != 0 {
            flags |= FLAG_E;
        }
        if self.inheritable & bit != 0 {
            flags |= FLAG_I;
        }
        if self.permitted & bit != 0 {
            flags |= FLAG_P;
        }
        flags
    }

    /// Render in libcap text form over capabilities `0..=last`.
    ///
    /// The most common flag combination becomes the `=flags` base clause;
    /// capabilities that differ are listed in groups with `+` and `-`
    /// adjustments. An empty process renders as `=`, a full root process
    /// as `=eip` or `=ep`.
    pub fn to_text_upto(&self, last: u8) -> String {
        let last = last.min(63);
        let mut histogram = [0usize; 8];
        for index in 0..=last {
            histogram[self.flags_of(index) as usize] += 1;
        }
        // Ties favour the lower combination, so an even split keeps the
        // empty base
        let mut base = 0u8;
        for (combo, count) in histogram.iter().enumerate() {
            if *count > histogram[base as usize] {
                base = combo as u8;
            }
        }

        // Group differing capabilities by their flag combination, ordered
        // by first appearance
        let mut groups: Vec<(u8, Vec<String>)> = Vec::new();
        for index in 0..=last {
            let flags = self.flags_of(index);
            if flags == base {
                continue;
            }
            let name = cap_text_name(index);
            match groups.iter_mut().find(|(f, _)| *f == flags) {
                Some((_, names)) => names.push(name),
                None => groups.push((flags, vec![name])),
            }
        }

        let mut clauses = Vec::new();
        if base != 0 || groups.is_empty() {
            clauses.push(format!("={}", flag_letters(base)));
        }
        for (flags, names) in groups {
            let list = names.join(",");
            if base == 0 {
                clauses.push(format!("{}={}", list, flag_letters(flags)));
                continue;
            }
            let mut clause = list;
            let added = flags & !base;
            let removed = base & !flags;
            if added != 0 {
                clause.push('+');
                clause.push_str(&flag_letters(added));
            }
            if removed != 0 {
                clause.push('-');
                clause.push_str(&flag_letters(removed));
            }
            clauses.push(clause);
        }
        clauses.join(" ")
    }

    /// Render over the capabilities the running kernel supports
    pub fn to_text(&self) -> String {
        self.to_text_upto(kernel_last_cap())
    }
}

fn cap_text_name(index: u8) -> String {
    match Capability::from_index(index) {
        Some(cap) => cap.name().to_ascii_lowercase(),
        None => index.to_string(),
    }
}

/// Highest capability number known to the kernel
pub fn kernel_last_cap() -> u8 {
    bsp_core::sysfs::read_attr("/proc/sys/kernel/cap_last_cap")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(Capability::LAST.index())
}

/// Credentials of the calling process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessInfo {
    pub uid: u32,
    pub euid: u32,
    pub gid: u32,
    pub egid: u32,
    pub pid: i32,
}

impl ProcessInfo {
    pub fn current() -> Self {
        Self {
            uid: getuid().as_raw(),
            euid: geteuid().as_raw(),
            gid: getgid().as_raw(),
            egid: getegid().as_raw(),
            pid: getpid().as_raw(),
        }
    }

    pub fn report(&self) -> String {
        [
            "=== Process Information ===".to_string(),
            format!("Real UID: {}", self.uid),
            format!("Effective UID: {}", self.euid),
            format!("Real GID: {}", self.gid),
            format!("Effective GID: {}", self.egid),
            format!("PID: {}", self.pid),
        ]
        .join("\n")
    }
}

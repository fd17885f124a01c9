//! Runtime detection of the board facilities the demo programs rely on
//!
//! Probes the running kernel and device tree so the tools can explain up
//! front why a demo is going to fail instead of dying on the first open().

use crate::error::{BspError, Result};
use std::path::Path;

pub const DEFAULT_LED_ROOT: &str = "/sys/class/leds";
pub const DEFAULT_EEPROM_PATH: &str = "/sys/bus/i2c/devices/0-0050/eeprom";
pub const DEFAULT_RTC_DEVICE: &str = "/dev/rtc0";
pub const DEFAULT_REMOTEPROC_ROOT: &str = "/sys/class/remoteproc";

/// Detected host facilities
#[derive(Debug, Clone)]
pub struct HostFeatures {
    /// Running as root (euid == 0)
    pub has_root: bool,
    /// Seccomp filtering is built into the kernel
    pub has_seccomp: bool,
    /// sysfs is mounted at /sys
    pub has_sysfs: bool,
    /// The LED class exists (leds-gpio bound)
    pub has_led_class: bool,
    /// The board ID EEPROM is exposed by the at24 driver
    pub has_eeprom: bool,
    /// An RTC character device exists
    pub has_rtc: bool,
    /// The remoteproc class exists (PRU cores can be driven)
    pub has_remoteproc: bool,
}

impl HostFeatures {
    /// Detect facilities on the current system using the default board paths
    pub fn detect() -> Self {
        Self {
            has_root: detect_root(),
            has_seccomp: detect_seccomp(),
            has_sysfs: Path::new("/sys/kernel").exists(),
            has_led_class: Path::new(DEFAULT_LED_ROOT).exists(),
            has_eeprom: Path::new(DEFAULT_EEPROM_PATH).exists(),
            has_rtc: Path::new(DEFAULT_RTC_DEVICE).exists(),
            has_remoteproc: Path::new(DEFAULT_REMOTEPROC_ROOT).exists(),
        }
    }

    /// Get a human-readable summary of facilities
    pub fn summary(&self) -> String {
        let check = |available: bool| if available { "[ok]" } else { "[--]" };

        [
            (self.has_root, "Root privileges"),
            (self.has_seccomp, "Seccomp BPF"),
            (self.has_sysfs, "sysfs mounted"),
            (self.has_led_class, "LED class (/sys/class/leds)"),
            (self.has_eeprom, "Board EEPROM (at24)"),
            (self.has_rtc, "RTC device"),
            (self.has_remoteproc, "remoteproc (PRU)"),
        ]
        .iter()
        .map(|(ok, label)| format!("{} {}", check(*ok), label))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Ensure we have root privileges
pub fn require_root() -> Result<()> {
    if detect_root() {
        Ok(())
    } else {
        Err(BspError::PermissionDenied(
            "This operation requires root privileges".to_string(),
        ))
    }
}

fn detect_root() -> bool {
    nix::unistd::geteuid().is_root()
}

fn detect_seccomp() -> bool {
    // Returns the current mode (>= 0) when seccomp is built in, EINVAL otherwise
    let ret = unsafe { libc::prctl(libc::PR_GET_SECCOMP, 0, 0, 0, 0) };
    ret >= 0
}

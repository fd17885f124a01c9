use crate::time::RtcTime;
use bsp_core::{BspError, Result};
use chrono::{Local, TimeZone};
use log::{debug, info};
use nix::sys::time::TimeSpec;
use nix::time::{ClockId, clock_settime};
use std::ffi::c_int;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod ioctl {
    use crate::time::RtcTime;

    nix::ioctl_read!(rtc_rd_time, b'p', 0x09, RtcTime);
    nix::ioctl_write_ptr!(rtc_set_time, b'p', 0x0a, RtcTime);
    nix::ioctl_none!(rtc_aie_on, b'p', 0x01);
    nix::ioctl_none!(rtc_aie_off, b'p', 0x02);
    nix::ioctl_none!(rtc_uie_on, b'p', 0x03);
    nix::ioctl_none!(rtc_uie_off, b'p', 0x04);
    nix::ioctl_none!(rtc_pie_on, b'p', 0x05);
    nix::ioctl_none!(rtc_pie_off, b'p', 0x06);
}

/// Interrupt sources a driver may support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcFeature {
    UpdateInterrupts,
    AlarmInterrupts,
    PeriodicInterrupts,
}

impl fmt::Display for RtcFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RtcFeature::UpdateInterrupts => "Update interrupts",
            RtcFeature::AlarmInterrupts => "Alarm interrupts",
            RtcFeature::PeriodicInterrupts => "Periodic interrupts",
        };
        f.write_str(name)
    }
}

type IoctlNone = unsafe fn(c_int) -> nix::Result<c_int>;

/// An open RTC character device
#[derive(Debug)]
pub struct RtcDevice {
    file: File,
    path: PathBuf,
}

impl RtcDevice {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().read(true).open(&path).map_err(|e| {
            BspError::Rtc(format!(
                "Failed to open RTC device: {}\n\
                 Make sure RTC device {} exists and is accessible",
                e,
                path.display()
            ))
        })?;
        debug!("opened {}", path.display());
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_time(&self) -> Result<RtcTime> {
        let mut time = RtcTime::default();
        unsafe { ioctl::rtc_rd_time(self.file.as_raw_fd(), &mut time) }
            .map_err(|e| BspError::Rtc(format!("RTC_RD_TIME ioctl: {}", e)))?;
        Ok(time)
    }

    /// Requires CAP_SYS_TIME
    pub fn set_time(&self, time: &RtcTime) -> Result<()> {
        unsafe { ioctl::rtc_set_time(self.file.as_raw_fd(), time) }.map_err(|e| {
            BspError::Rtc(format!(
                "RTC_SET_TIME ioctl: {}\nNote: Setting RTC time requires root privileges",
                e
            ))
        })?;
        info!("RTC set to {}", time);
        Ok(())
    }

    /// Set the system clock from the RTC, reading the RTC as local time.
    /// Returns the time that was applied.
    pub fn set_system_from_rtc(&self) -> Result<RtcTime> {
        let time = self.read_time()?;
        let naive = time.to_naive()?;
        let local = Local.from_local_datetime(&naive).earliest().ok_or_else(|| {
            BspError::Rtc(format!("RTC time {} does not exist in the local zone", time))
        })?;
        let secs = u64::try_from(local.timestamp()).map_err(|_| {
            BspError::Rtc(format!("RTC time {} is before the epoch", time))
        })?;

        clock_settime(
            ClockId::CLOCK_REALTIME,
            TimeSpec::from_duration(Duration::from_secs(secs)),
        )
        .map_err(|e| {
            BspError::Rtc(format!(
                "Failed to set system time: {}\nNote: Setting system time requires root privileges",
                e
            ))
        })?;
        info!("system clock set from RTC: {}", time);
        Ok(time)
    }

    /// Write the current local system time into the RTC. Returns the time
    /// that was written.
    pub fn set_rtc_from_system(&self) -> Result<RtcTime> {
        let now = RtcTime::from_naive(&Local::now().naive_local());
        self.set_time(&now)?;
        Ok(now)
    }

    /// Probe interrupt support by switching each source on and straight
    /// back off
    pub fn features(&self) -> Vec<RtcFeature> {
        let fd = self.file.as_raw_fd();
        let probes: [(RtcFeature, IoctlNone, IoctlNone); 3] = [
            (RtcFeature::UpdateInterrupts, ioctl::rtc_uie_on, ioctl::rtc_uie_off),
            (RtcFeature::AlarmInterrupts, ioctl::rtc_aie_on, ioctl::rtc_aie_off),
            (RtcFeature::PeriodicInterrupts, ioctl::rtc_pie_on, ioctl::rtc_pie_off),
        ];

        let mut found = Vec::new();
        for (feature, on, off) in probes {
            if unsafe { on(fd) }.is_ok() {
                let _ = unsafe { off(fd) };
                found.push(feature);
            } else {
                debug!("{} not supported", feature);
            }
        }
        found
    }

    /// The lines printed by the `info` command
    pub fn info(&self) -> String {
        let mut lines: Vec<String> = self
            .features()
            .iter()
            .map(|f| format!("RTC supports: {}", f))
            .collect();
        lines.push(format!("RTC Device: {}", self.path.display()));
        lines.join("\n")
    }
}

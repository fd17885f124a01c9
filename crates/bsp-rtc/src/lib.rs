//! bsp-rtc: read and set the board RTC through `/dev/rtcN`
//!
//! The AM335x RTC (and any I2C RTC cape) is driven with the generic Linux
//! RTC ioctls. Times are exchanged as `struct rtc_time`, which uses the
//! `struct tm` conventions: years since 1900 and zero-based months.

pub mod device;
pub mod time;

pub use bsp_core::features::DEFAULT_RTC_DEVICE;
pub use device::{RtcDevice, RtcFeature};
pub use time::{RtcTime, parse_time};

pub fn usage(prog: &str) -> String {
    format!(
        "BBB RTC Read/Write Utility
Usage: {p} [command] [options]

Commands:
  read              Read current RTC time
  write [time]      Write time to RTC (format: YYYY-MM-DD HH:MM:SS)
  set-system        Set system time from RTC
  set-rtc           Set RTC time from system time
  info              Show RTC device information

Examples:
  {p} read
  {p} write \"2025-09-27 15:30:00\"
  {p} set-system
  {p} set-rtc
  {p} info",
        p = prog
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_lists_commands() {
        let text = usage("bbb-rtc");
        assert!(text.contains("Usage: bbb-rtc [command] [options]"));
        for cmd in ["read", "write [time]", "set-system", "set-rtc", "info"] {
            assert!(text.contains(cmd), "missing {}", cmd);
        }
        assert!(text.ends_with("bbb-rtc info"));
    }
}

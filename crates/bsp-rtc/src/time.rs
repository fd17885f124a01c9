//! `struct rtc_time` and conversions to and from wall-clock time

use bsp_core::{BspError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

/// Mirror of the kernel's `struct rtc_time`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RtcTime {
    pub tm_sec: i32,
    pub tm_min: i32,
    pub tm_hour: i32,
    pub tm_mday: i32,
    pub tm_mon: i32,
    pub tm_year: i32,
    pub tm_wday: i32,
    pub tm_yday: i32,
    pub tm_isdst: i32,
}

impl RtcTime {
    /// Build from calendar fields (1-based month, full year).
    /// Weekday, day-of-year and DST are left zero; drivers ignore them
    /// when setting the clock.
    pub fn from_calendar(year: i32, month: i32, day: i32, hour: i32, min: i32, sec: i32) -> Self {
        Self {
            tm_sec: sec,
            tm_min: min,
            tm_hour: hour,
            tm_mday: day,
            tm_mon: month - 1,
            tm_year: year - 1900,
            ..Self::default()
        }
    }

    pub fn from_naive(dt: &NaiveDateTime) -> Self {
        Self {
            tm_sec: dt.second() as i32,
            tm_min: dt.minute() as i32,
            tm_hour: dt.hour() as i32,
            tm_mday: dt.day() as i32,
            tm_mon: dt.month0() as i32,
            tm_year: dt.year() - 1900,
            tm_wday: dt.weekday().num_days_from_sunday() as i32,
            tm_yday: dt.ordinal0() as i32,
            tm_isdst: 0,
        }
    }

    pub fn to_naive(&self) -> Result<NaiveDateTime> {
        let invalid = || BspError::Rtc(format!("RTC holds an invalid date: {}", self));
        let month = u32::try_from(self.tm_mon + 1).map_err(|_| invalid())?;
        let day = u32::try_from(self.tm_mday).map_err(|_| invalid())?;
        let hour = u32::try_from(self.tm_hour).map_err(|_| invalid())?;
        let min = u32::try_from(self.tm_min).map_err(|_| invalid())?;
        let sec = u32::try_from(self.tm_sec).map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(self.tm_year + 1900, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .ok_or_else(invalid)
    }
}

impl fmt::Display for RtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.tm_year + 1900,
            self.tm_mon + 1,
            self.tm_mday,
            self.tm_hour,
            self.tm_min,
            self.tm_sec
        )
    }
}

fn format_error() -> BspError {
    BspError::InvalidArgument(
        "Invalid time format. Use: YYYY-MM-DD HH:MM:SS\nExample: 2025-09-27 15:30:00"
            .to_string(),
    )
}

fn parse_fields(part: &str, sep: char) -> Result<[i32; 3]> {
    let mut fields = [0i32; 3];
    let mut parts = part.split(sep);
    for slot in fields.iter_mut() {
        *slot = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(format_error)?;
    }
    if parts.next().is_some() {
        return Err(format_error());
    }
    Ok(fields)
}

/// Parse `YYYY-MM-DD HH:MM:SS`.
///
/// Fields need not be zero padded. Ranges are checked per field only
/// (years 1900-2100, days 1-31); the driver rejects impossible dates such
/// as 31 February.
pub fn parse_time(input: &str) -> Result<RtcTime> {
    let mut halves = input.split_whitespace();
    let (Some(date), Some(time), None) = (halves.next(), halves.next(), halves.next()) else {
        return Err(format_error());
    };

    let [year, month, day] = parse_fields(date, '-')?;
    let [hour, minute, second] = parse_fields(time, ':')?;

    let in_range = (1900..=2100).contains(&year)
        && (1..=12).contains(&month)
        && (1..=31).contains(&day)
        && (0..=23).contains(&hour)
        && (0..=59).contains(&minute)
        && (0..=59).contains(&second);
    if !in_range {
        return Err(BspError::InvalidArgument("Invalid time values".to_string()));
    }

    Ok(RtcTime::from_calendar(year, month, day, hour, minute, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rtc_time_layout_matches_kernel() {
        assert_eq!(std::mem::size_of::<RtcTime>(), 9 * 4);
    }

    #[test]
    fn parse_and_display() {
        let t = parse_time("2025-09-27 15:30:00").unwrap();
        assert_eq!(t.tm_year, 125);
        assert_eq!(t.tm_mon, 8);
        assert_eq!(t.tm_mday, 27);
        assert_eq!(t.to_string(), "2025-09-27 15:30:00");
    }

    #[test]
    fn parse_accepts_unpadded_fields() {
        let t = parse_time("2025-1-2 3:4:5").unwrap();
        assert_eq!(t.to_string(), "2025-01-02 03:04:05");
    }

    #[test]
    fn parse_rejects_bad_format() {
        for input in ["", "2025-09-27", "2025/09/27 15:30:00", "2025-09-27 15:30", "a-b-c d:e:f"] {
            let err = parse_time(input).unwrap_err();
            assert!(
                err.to_string().contains("Invalid time format"),
                "input {:?} gave {}",
                input,
                err
            );
        }
    }

    #[test]
    fn parse_rejects_out_of_range() {
        for input in [
            "1899-12-31 23:59:59",
            "2101-01-01 00:00:00",
            "2025-13-01 00:00:00",
            "2025-00-10 00:00:00",
            "2025-01-32 00:00:00",
            "2025-01-01 24:00:00",
            "2025-01-01 00:60:00",
            "2025-01-01 00:00:60",
        ] {
            let err = parse_time(input).unwrap_err();
            assert!(err.to_string().contains("Invalid time values"), "{}", input);
        }
    }

    #[test]
    fn naive_round_trip_fills_weekday() {
        let dt = NaiveDate::from_ymd_opt(2025, 9, 27)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();
        let t = RtcTime::from_naive(&dt);
        // 27 Sep 2025 is a Saturday
        assert_eq!(t.tm_wday, 6);
        assert_eq!(t.tm_yday, 269);
        assert_eq!(t.to_naive().unwrap(), dt);
    }

    #[test]
    fn impossible_date_is_not_convertible() {
        let t = parse_time("2025-02-31 00:00:00").unwrap();
        assert!(t.to_naive().is_err());
    }
}

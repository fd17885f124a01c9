use bsp_core::Result;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::io::Write;
use std::thread;
use std::time::Duration;

pub const HELLO_INTERVAL: Duration = Duration::from_secs(1);

/// `Hello World YYYY-MM-DD HH:MM:SS`
pub fn hello_line<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("Hello World {}", now.format("%Y-%m-%d %H:%M:%S"))
}

#[derive(Debug, Clone)]
pub struct HelloLoop {
    pub interval: Duration,
    /// Stop after this many lines; `None` runs forever
    pub cycles: Option<u64>,
}

impl Default for HelloLoop {
    fn default() -> Self {
        Self {
            interval: HELLO_INTERVAL,
            cycles: None,
        }
    }
}

impl HelloLoop {
    /// Print one local-time line per interval, flushing each line so it
    /// reaches the serial console immediately. Returns the lines written.
    pub fn run(&self, out: &mut dyn Write) -> Result<u64> {
        let mut written = 0;
        while self.cycles.is_none_or(|limit| written < limit) {
            writeln!(out, "{}", hello_line(&Local::now()))?;
            out.flush()?;
            written += 1;
            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }
        Ok(written)
    }
}

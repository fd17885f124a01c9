//! Blink patterns driven over an LED bank
//!
//! Patterns report progress through a callback instead of printing, so the
//! binaries decide what the console sees and tests can assert on the order
//! of events.

use crate::delay::Delay;
use crate::led::{Brightness, Led, LedBank};
use bsp_core::Result;
use log::warn;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use std::time::Duration;

/// Progress reported by a running pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlinkEvent {
    LedOn(u8),
    LedOff(u8),
    /// A full pass finished; carries the 1-based cycle number
    CycleComplete(u64),
    Opened(u8),
    OpenFailed(u8),
    Phase(FlashPhase),
}

/// Stages of one [`FlashPattern`] cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashPhase {
    Opening,
    AllOn(Duration),
    AllOff(Duration),
    DoubleBlink(Duration),
    Closing,
    LoopComplete,
}

impl fmt::Display for FlashPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashPhase::Opening => write!(f, "Opening LEDs..."),
            FlashPhase::AllOn(d) => write!(f, "LEDs ON for {}s", d.as_secs()),
            FlashPhase::AllOff(d) => write!(f, "LEDs OFF for {}s", d.as_secs()),
            FlashPhase::DoubleBlink(d) => write!(f, "Double blink ({}s each)...", d.as_secs()),
            FlashPhase::Closing => write!(f, "Closing LEDs..."),
            FlashPhase::LoopComplete => write!(f, "Loop complete"),
        }
    }
}

fn cycle_limit_reached(done: u64, cycles: Option<u64>) -> bool {
    cycles.is_some_and(|limit| done >= limit)
}

/// Light each available LED in turn
#[derive(Debug, Clone)]
pub struct SequencePattern {
    pub on_time: Duration,
    /// Pause after switching an LED off; zero goes straight to the next LED
    pub off_time: Duration,
}

impl Default for SequencePattern {
    fn default() -> Self {
        Self {
            on_time: Duration::from_secs(1),
            off_time: Duration::ZERO,
        }
    }
}

impl SequencePattern {
    /// Run for `cycles` passes, or forever when `None`.
    /// Returns the number of completed passes.
    pub fn run(
        &self,
        bank: &LedBank,
        delay: Delay,
        cycles: Option<u64>,
        mut on_event: impl FnMut(&BlinkEvent),
    ) -> Result<u64> {
        let mut done = 0;
        while !cycle_limit_reached(done, cycles) {
            for led in bank.available() {
                on_event(&BlinkEvent::LedOn(led.id()));
                led.set_brightness(Brightness::On)?;
                delay.wait(self.on_time);

                led.set_brightness(Brightness::Off)?;
                on_event(&BlinkEvent::LedOff(led.id()));
                if !self.off_time.is_zero() {
                    delay.wait(self.off_time);
                }
            }
            done += 1;
            on_event(&BlinkEvent::CycleComplete(done));
        }
        Ok(done)
    }
}

/// All LEDs together: long on, off, then a double blink.
///
/// Brightness files are reopened every cycle so an LED that appears late
/// (driver probed after init started) is picked up on the next pass.
#[derive(Debug, Clone)]
pub struct FlashPattern {
    pub on_time: Duration,
    pub off_time: Duration,
    pub blink_time: Duration,
    pub blinks: u32,
}

impl Default for FlashPattern {
    fn default() -> Self {
        Self {
            on_time: Duration::from_secs(5),
            off_time: Duration::from_secs(2),
            blink_time: Duration::from_secs(1),
            blinks: 2,
        }
    }
}

impl FlashPattern {
    pub fn run(
        &self,
        root: impl AsRef<Path>,
        count: u8,
        delay: Delay,
        cycles: Option<u64>,
        mut on_event: impl FnMut(&BlinkEvent),
    ) -> Result<u64> {
        let root = root.as_ref();
        let mut done = 0;

        while !cycle_limit_reached(done, cycles) {
            on_event(&BlinkEvent::Phase(FlashPhase::Opening));
            let mut handles: Vec<(u8, File)> = Vec::new();
            for id in 0..count {
                let led = Led::new(root, id);
                match OpenOptions::new().write(true).open(led.brightness_path()) {
                    Ok(file) => {
                        on_event(&BlinkEvent::Opened(id));
                        handles.push((id, file));
                    }
                    Err(e) => {
                        warn!("open {}: {}", led.brightness_path().display(), e);
                        on_event(&BlinkEvent::OpenFailed(id));
                    }
                }
            }

            on_event(&BlinkEvent::Phase(FlashPhase::AllOn(self.on_time)));
            write_all_leds(&mut handles, Brightness::On);
            delay.wait(self.on_time);

            on_event(&BlinkEvent::Phase(FlashPhase::AllOff(self.off_time)));
            write_all_leds(&mut handles, Brightness::Off);
            delay.wait(self.off_time);

            on_event(&BlinkEvent::Phase(FlashPhase::DoubleBlink(self.blink_time)));
            for _ in 0..self.blinks {
                write_all_leds(&mut handles, Brightness::On);
                delay.wait(self.blink_time);
                write_all_leds(&mut handles, Brightness::Off);
                delay.wait(self.blink_time);
            }

            on_event(&BlinkEvent::Phase(FlashPhase::Closing));
            drop(handles);
            on_event(&BlinkEvent::Phase(FlashPhase::LoopComplete));

            done += 1;
            on_event(&BlinkEvent::CycleComplete(done));
        }
        Ok(done)
    }
}

fn write_all_leds(handles: &mut [(u8, File)], brightness: Brightness) {
    for (id, file) in handles.iter_mut() {
        let result = file
            .seek(SeekFrom::Start(0))
            .and_then(|_| file.write_all(brightness.as_str().as_bytes()));
        if let Err(e) = result {
            warn!("LED {}: write {} failed: {}", id, brightness, e);
        }
    }
}

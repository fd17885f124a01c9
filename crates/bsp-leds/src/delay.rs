//! Delay strategies for the blink loops

use std::hint::{black_box, spin_loop};
use std::time::Duration;

/// Spin iterations per second, roughly calibrated for the 1 GHz Cortex-A8
pub const DEFAULT_ITERATIONS_PER_SECOND: u64 = 25_000_000;

/// How a blink loop waits between LED changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delay {
    /// Sleep in the kernel
    #[default]
    Sleep,
    /// Spin on the CPU. Used when the program runs as init and timers are
    /// not yet trustworthy.
    BusyWait { iterations_per_second: u64 },
    /// Do not wait at all
    Skip,
}

impl Delay {
    pub fn busy_wait() -> Self {
        Delay::BusyWait {
            iterations_per_second: DEFAULT_ITERATIONS_PER_SECOND,
        }
    }

    pub fn wait(&self, duration: Duration) {
        match *self {
            Delay::Sleep => std::thread::sleep(duration),
            Delay::BusyWait {
                iterations_per_second,
            } => {
                let iterations = spin_iterations(iterations_per_second, duration);
                let mut count = 0u64;
                while black_box(count) < iterations {
                    spin_loop();
                    count += 1;
                }
            }
            Delay::Skip => {}
        }
    }
}

fn spin_iterations(iterations_per_second: u64, duration: Duration) -> u64 {
    let micros = duration.as_micros().min(u128::from(u64::MAX)) as u64;
    iterations_per_second.saturating_mul(micros) / 1_000_000
}

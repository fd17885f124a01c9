//! bsp-leds: the four BeagleBone Black user LEDs via the sysfs LED class
//!
//! Each LED is a directory `/sys/class/leds/beaglebone:green:usrN` with
//! `trigger` and `brightness` attributes. Taking manual control means
//! switching the trigger to `none`; after that `brightness` drives the pin.

pub mod delay;
pub mod led;
pub mod pattern;

pub use delay::Delay;
pub use led::{Brightness, LED_COUNT, LED_NAME_PREFIX, Led, LedBank, ProbeEntry};
pub use pattern::{BlinkEvent, FlashPattern, FlashPhase, SequencePattern};

//! Single LED and LED bank control

use bsp_core::sysfs::{read_attr, write_attr};
use bsp_core::{BspError, Result};
use log::{debug, info};
use std::fmt;
use std::path::{Path, PathBuf};

/// Number of user LEDs on the board (usr0..usr3)
pub const LED_COUNT: u8 = 4;

/// Directory name prefix of the user LEDs under the LED class
pub const LED_NAME_PREFIX: &str = "beaglebone:green:usr";

/// LED brightness as understood by the gpio-led driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brightness {
    Off,
    On,
}

impl Brightness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Brightness::Off => "0",
            Brightness::On => "1",
        }
    }

    /// Parse a sysfs brightness value; anything non-zero is on
    pub fn parse(raw: &str) -> Result<Self> {
        let value: u32 = raw
            .trim()
            .parse()
            .map_err(|_| BspError::Sysfs(format!("Invalid brightness value: {:?}", raw)))?;
        Ok(if value == 0 {
            Brightness::Off
        } else {
            Brightness::On
        })
    }
}

impl From<bool> for Brightness {
    fn from(on: bool) -> Self {
        if on { Brightness::On } else { Brightness::Off }
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Brightness::Off => write!(f, "OFF"),
            Brightness::On => write!(f, "ON"),
        }
    }
}

/// One user LED below an LED class root
#[derive(Debug, Clone)]
pub struct Led {
    root: PathBuf,
    id: u8,
}

impl Led {
    pub fn new(root: impl AsRef<Path>, id: u8) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            id,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    /// LED directory, e.g. `/sys/class/leds/beaglebone:green:usr0`
    pub fn path(&self) -> PathBuf {
        self.root.join(format!("{}{}", LED_NAME_PREFIX, self.id))
    }

    pub fn brightness_path(&self) -> PathBuf {
        self.path().join("brightness")
    }

    pub fn trigger_path(&self) -> PathBuf {
        self.path().join("trigger")
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    fn ensure_present(&self) -> Result<()> {
        if self.exists() {
            Ok(())
        } else {
            Err(BspError::NotFound(format!(
                "LED {} not found at {}",
                self.id,
                self.path().display()
            )))
        }
    }

    /// Select the kernel trigger driving this LED (`none` for manual control)
    pub fn set_trigger(&self, trigger: &str) -> Result<()> {
        self.ensure_present()?;
        debug!("LED {} trigger -> {}", self.id, trigger);
        write_attr(self.trigger_path(), trigger)
    }

    /// Currently active trigger.
    ///
    /// The kernel lists every trigger and brackets the active one
    /// (`none [heartbeat] timer`); a plain single value is returned as is.
    pub fn trigger(&self) -> Result<String> {
        self.ensure_present()?;
        let raw = read_attr(self.trigger_path())?;
        let active = raw
            .split_whitespace()
            .find(|t| t.starts_with('[') && t.ends_with(']'))
            .map(|t| t.trim_matches(|c| c == '[' || c == ']').to_string());
        Ok(active.unwrap_or(raw))
    }

    pub fn set_brightness(&self, brightness: Brightness) -> Result<()> {
        self.ensure_present()?;
        write_attr(self.brightness_path(), brightness.as_str())
    }

    pub fn brightness(&self) -> Result<Brightness> {
        self.ensure_present()?;
        Brightness::parse(&read_attr(self.brightness_path())?)
    }
}

/// Result of probing one LED slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeEntry {
    pub id: u8,
    pub path: PathBuf,
    pub found: bool,
}

/// The set of user LEDs that actually exist on this system
#[derive(Debug, Clone)]
pub struct LedBank {
    leds: Vec<Led>,
    probe: Vec<ProbeEntry>,
}

impl LedBank {
    /// Probe `usr0..usr{count-1}` below `root`.
    ///
    /// Fails only when none of them exist, which usually means the LED
    /// driver or the device tree nodes are missing from the kernel.
    pub fn probe(root: impl AsRef<Path>, count: u8) -> Result<Self> {
        let root = root.as_ref();
        let mut leds = Vec::new();
        let mut probe = Vec::new();

        for id in 0..count {
            let led = Led::new(root, id);
            let found = led.exists();
            probe.push(ProbeEntry {
                id,
                path: led.path(),
                found,
            });
            if found {
                leds.push(led);
            }
        }

        if leds.is_empty() {
            return Err(BspError::NotFound(
                "No LEDs found! Check kernel configuration and device tree.".to_string(),
            ));
        }

        info!("Probed {} of {} LEDs under {}", leds.len(), count, root.display());
        Ok(Self { leds, probe })
    }

    /// LEDs that were found, in id order
    pub fn available(&self) -> &[Led] {
        &self.leds
    }

    /// Per-slot probe results, including missing LEDs
    pub fn probe_results(&self) -> &[ProbeEntry] {
        &self.probe
    }

    pub fn probed_count(&self) -> usize {
        self.probe.len()
    }

    /// Disable kernel triggers and switch every available LED off
    pub fn take_manual_control(&self) -> Result<()> {
        for led in &self.leds {
            led.set_trigger("none")?;
            led.set_brightness(Brightness::Off)?;
        }
        Ok(())
    }

    pub fn set_all(&self, brightness: Brightness) -> Result<()> {
        for led in &self.leds {
            led.set_brightness(brightness)?;
        }
        Ok(())
    }
}

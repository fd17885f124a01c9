//! Registers driven by the PRU0 blink firmware (USR3 LED on GPIO1_24)

use std::fmt;

pub const GPIO1_BASE: u32 = 0x4804_C000;
pub const GPIO_CLEARDATAOUT: u32 = 0x190;
pub const GPIO_SETDATAOUT: u32 = 0x194;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruBlinkTarget {
    pub gpio_base: u32,
    pub bit: u8,
    /// Busy-loop iterations per half period
    pub delay_cycles: u32,
}

impl PruBlinkTarget {
    /// USR3 is GPIO1_24
    pub const USR3: PruBlinkTarget = PruBlinkTarget {
        gpio_base: GPIO1_BASE,
        bit: 24,
        delay_cycles: 10_000_000,
    };

    pub fn mask(&self) -> u32 {
        1 << self.bit
    }

    pub fn set_register(&self) -> u32 {
        self.gpio_base + GPIO_SETDATAOUT
    }

    pub fn clear_register(&self) -> u32 {
        self.gpio_base + GPIO_CLEARDATAOUT
    }
}

impl Default for PruBlinkTarget {
    fn default() -> Self {
        Self::USR3
    }
}

impl fmt::Display for PruBlinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GPIO bit {} (mask 0x{:08x}) set 0x{:08X} clear 0x{:08X}",
            self.bit,
            self.mask(),
            self.set_register(),
            self.clear_register()
        )
    }
}

//! The LED sequence blinker

use crate::buf::{CBuf, Overflow};
use crate::sys::{self, Errno, O_WRONLY, Timespec, log_msg};

pub const LED_BASE: &str = "/sys/class/leds/beaglebone:green:usr";
pub const LED_COUNT: u8 = 4;

const PATH_CAP: usize = 256;
const LINE_CAP: usize = 64;

/// `<base><n>/brightness`
pub fn brightness_path(base: &str, led: u8) -> Result<CBuf<PATH_CAP>, Overflow> {
    let mut path = CBuf::new();
    path.push_str(base)?.push_digit(led)?.push_str("/brightness")?;
    Ok(path)
}

fn log_led(prefix: &str, led: u8, suffix: &str) {
    let mut line: CBuf<LINE_CAP> = CBuf::new();
    let built = line
        .push_str(prefix)
        .and_then(|l| l.push_digit(led))
        .and_then(|l| l.push_str(suffix));
    if built.is_ok() {
        log_msg(line.as_str());
    }
}

/// Switch one LED, logging `LED n ON` / `LED n OFF`, or
/// `Failed to open LED n` when the attribute cannot be opened
pub fn set_led_brightness(base: &str, led: u8, on: bool) -> Result<(), Errno> {
    let path = brightness_path(base, led).map_err(|_| Errno::EINVAL)?;

    let fd = match sys::open(path.as_cstr(), O_WRONLY) {
        Ok(fd) => fd,
        Err(e) => {
            log_led("Failed to open LED ", led, "");
            return Err(e);
        }
    };

    let written = sys::write(fd, if on { b"1" } else { b"0" });
    log_led("LED ", led, if on { " ON" } else { " OFF" });
    let _ = sys::close(fd);
    written.map(|_| ())
}

/// One pass over all LEDs: on, wait, off, wait
pub fn blink_cycle(base: &str, delay: &Timespec) {
    for led in 0..LED_COUNT {
        let _ = set_led_brightness(base, led, true);
        let _ = sys::nanosleep(delay);
        let _ = set_led_brightness(base, led, false);
        let _ = sys::nanosleep(delay);
    }
}

/// Blink forever (`cycles == None`) or for a fixed number of passes, then
/// exit the process
pub fn run(base: &str, cycles: Option<u32>) -> ! {
    log_msg("BBB LED Blink nolibc application started");
    log_msg("Blinking LEDs 0-3 in sequence");

    let delay = Timespec::from_secs(1);
    let mut done = 0u32;
    while cycles.is_none_or(|limit| done < limit) {
        blink_cycle(base, &delay);
        done = done.wrapping_add(1);
    }
    sys::exit(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fake_leds(root: &std::path::Path) -> String {
        for id in 0..LED_COUNT {
            let dir = root.join(format!("usr{}", id));
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("brightness"), "0").unwrap();
        }
        format!("{}/usr", root.display())
    }

    #[test]
    fn path_for_board_led() {
        let path = brightness_path(LED_BASE, 0).unwrap();
        assert_eq!(
            path.as_str(),
            "/sys/class/leds/beaglebone:green:usr0/brightness"
        );
    }

    #[test]
    fn path_overflow_is_reported() {
        let long = "x".repeat(PATH_CAP);
        assert!(brightness_path(&long, 0).is_err());
        assert!(brightness_path(LED_BASE, 12).is_err());
    }

    #[test]
    fn set_led_writes_brightness() {
        let dir = tempfile::tempdir().unwrap();
        let base = fake_leds(dir.path());

        set_led_brightness(&base, 2, true).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("usr2/brightness")).unwrap(),
            "1"
        );
        set_led_brightness(&base, 2, false).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("usr2/brightness")).unwrap(),
            "0"
        );
    }

    #[test]
    fn set_missing_led_fails_with_enoent() {
        let dir = tempfile::tempdir().unwrap();
        let base = format!("{}/usr", dir.path().display());
        assert_eq!(set_led_brightness(&base, 1, true), Err(Errno::ENOENT));
    }

    #[test]
    fn cycle_leaves_all_leds_off() {
        let dir = tempfile::tempdir().unwrap();
        let base = fake_leds(dir.path());
        blink_cycle(&base, &Timespec::from_secs(0));
        for id in 0..LED_COUNT {
            let value = fs::read_to_string(dir.path().join(format!("usr{}/brightness", id)));
            assert_eq!(value.unwrap(), "0");
        }
    }
}

//! Freestanding LED blinker: no libc startup, no std, suitable as PID 1

#![no_std]
#![no_main]

use bsp_nolibc::blink::{self, LED_BASE};
use bsp_nolibc::sys;
use core::panic::PanicInfo;

#[unsafe(no_mangle)]
pub extern "C" fn _start() -> ! {
    blink::run(LED_BASE, None)
}

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    sys::log_msg("bbb-led-blink-nolibc: panic");
    sys::exit(1)
}

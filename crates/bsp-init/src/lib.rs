//! bsp-init: tiny programs meant to run as PID 1 on a minimal rootfs
//!
//! `helloloop` proves the console and clock work by printing a timestamp
//! every second. `silentloop` is the quiet counterpart: it does nothing but
//! sleep and collect orphaned children, so the kernel has a live init.

pub mod hello;
pub mod reaper;

pub use hello::{HELLO_INTERVAL, HelloLoop, hello_line};
pub use reaper::{IDLE_INTERVAL, SilentLoop, reap_children};

//! bsp-nolibc: talking to the kernel without a C library
//!
//! Everything here is `no_std`: syscalls are issued through inline assembly
//! trampolines, strings are assembled in fixed stack buffers, and output goes
//! straight to file descriptor 1. The standard library is only linked when
//! running the unit tests on a development host.

#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod blink;
pub mod buf;
pub mod sys;

pub use buf::{CBuf, Overflow};
pub use sys::{Errno, Timespec};

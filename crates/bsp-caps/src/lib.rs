//! bsp-caps: inspect the capability sets of the running process
//!
//! Reads the effective, permitted and inheritable sets straight from the
//! kernel with `capget(2)` and renders them the way libcap's
//! `cap_to_text` does, so output lines up with `getcap`/`getpcaps`.

pub mod capability;
pub mod probe;
pub mod process;

pub use capability::{CLASSIC, Capability};
pub use probe::{NET_PROBES, Probe, TIME_PROBES, usage};
pub use process::{ProcessCaps, ProcessInfo};

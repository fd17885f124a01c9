//! bsp-pru: firmware and lifecycle for the AM335x PRU co-processors
//!
//! - `firmware`: minimal ELF32 images the remoteproc loader accepts
//! - `remoteproc`: start/stop/firmware selection through sysfs
//! - `target`: the GPIO registers the blink firmware drives

pub mod firmware;
pub mod remoteproc;
pub mod target;

pub use bsp_core::features::DEFAULT_REMOTEPROC_ROOT;
pub use firmware::{GeneratedFirmware, PruFirmware, firmware_name, hexdump, write_firmware};
pub use remoteproc::{Remoteproc, RemoteprocState};
pub use target::PruBlinkTarget;

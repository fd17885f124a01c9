//! bsp-core: shared types, errors, and host feature detection for the
//! BeagleBone Black example programs
//!
//! This crate provides the pieces every example program leans on:
//! - Error type and Result alias
//! - Small sysfs attribute helpers
//! - Runtime detection of the board facilities the demo programs touch

pub mod error;
pub mod features;
pub mod sysfs;

pub use error::{BspError, Result};
pub use features::{HostFeatures, require_root};

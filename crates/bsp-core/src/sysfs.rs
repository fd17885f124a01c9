//! Helpers for reading and writing sysfs attributes

use crate::error::{BspError, Result};
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Read a sysfs attribute, trimming the trailing newline the kernel appends
pub fn read_attr(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| BspError::io_at(path.display(), e))?;
    Ok(content.trim().to_string())
}

/// Write a value to a sysfs attribute.
///
/// The attribute must already exist; it is never created.
pub fn write_attr(path: impl AsRef<Path>, value: &str) -> Result<()> {
    let path = path.as_ref();
    debug!("sysfs write {} <- {:?}", path.display(), value);

    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| BspError::io_at(path.display(), e))?;
    file.write_all(value.as_bytes())
        .map_err(|e| BspError::io_at(path.display(), e))?;
    Ok(())
}

/// Check whether a sysfs node exists
pub fn exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Outcome of preparing a sysfs mount for an init-style program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountReport {
    /// The mountpoint directory was created by us
    pub created: bool,
    /// The mount(2) call succeeded
    pub mounted: bool,
}

/// Create `mountpoint` (mode 0755) and mount sysfs on it.
///
/// Both steps are best effort: when running as PID 1 before anything else
/// has touched the filesystem either one may legitimately fail, e.g. because
/// the directory exists or sysfs is already mounted.
pub fn mount_sysfs(mountpoint: impl AsRef<Path>) -> MountReport {
    use nix::mount::{MsFlags, mount};
    use nix::sys::stat::Mode;

    let mountpoint = mountpoint.as_ref();
    let created = match nix::unistd::mkdir(mountpoint, Mode::from_bits_truncate(0o755)) {
        Ok(()) => true,
        Err(e) => {
            debug!("mkdir {} failed: {}", mountpoint.display(), e);
            false
        }
    };

    let mounted = match mount(
        Some("sysfs"),
        mountpoint,
        Some("sysfs"),
        MsFlags::empty(),
        None::<&str>,
    ) {
        Ok(()) => true,
        Err(e) => {
            debug!("mount sysfs on {} failed: {}", mountpoint.display(), e);
            false
        }
    };

    MountReport { created, mounted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn read_trims_newline() {
        let dir = tempdir().unwrap();
        let attr = dir.path().join("trigger");
        fs::write(&attr, "none\n").unwrap();
        assert_eq!(read_attr(&attr).unwrap(), "none");
    }

    #[test]
    fn write_replaces_previous_value() {
        let dir = tempdir().unwrap();
        let attr = dir.path().join("trigger");
        fs::write(&attr, "heartbeat").unwrap();
        write_attr(&attr, "none").unwrap();
        assert_eq!(fs::read_to_string(&attr).unwrap(), "none");
    }

    #[test]
    fn write_does_not_create_missing_attribute() {
        let dir = tempdir().unwrap();
        let attr = dir.path().join("missing");
        let err = write_attr(&attr, "1").unwrap_err();
        assert!(err.to_string().contains("missing"));
        assert!(!attr.exists());
    }

    #[test]
    fn read_missing_attribute_fails() {
        let dir = tempdir().unwrap();
        assert!(read_attr(dir.path().join("nope")).is_err());
    }

    /// Requires root: mounts a real sysfs instance on a scratch directory
    #[test]
    #[ignore]
    fn mount_sysfs_on_fresh_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("sys");
        let report = mount_sysfs(&target);
        assert!(report.created);
        assert!(report.mounted);
        assert!(target.join("class").exists());
        nix::mount::umount(&target).unwrap();
    }
}

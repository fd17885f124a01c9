//! Remoteproc sysfs control
//!
//! Each core appears as `<root>/remoteprocN` with `name`, `state` and
//! `firmware` attributes. Writing `start`/`stop` to `state` boots or halts
//! the core; `firmware` names the file under /lib/firmware to load.

use bsp_core::sysfs::{read_attr, write_attr};
use bsp_core::{BspError, Result};
use log::info;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteprocState {
    Offline,
    Running,
    Suspended,
    Crashed,
    Other(String),
}

impl RemoteprocState {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "offline" => RemoteprocState::Offline,
            "running" => RemoteprocState::Running,
            "suspended" => RemoteprocState::Suspended,
            "crashed" => RemoteprocState::Crashed,
            other => RemoteprocState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RemoteprocState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteprocState::Offline => f.write_str("offline"),
            RemoteprocState::Running => f.write_str("running"),
            RemoteprocState::Suspended => f.write_str("suspended"),
            RemoteprocState::Crashed => f.write_str("crashed"),
            RemoteprocState::Other(s) => f.write_str(s),
        }
    }
}

/// One remoteproc instance
#[derive(Debug, Clone)]
pub struct Remoteproc {
    path: PathBuf,
}

impl Remoteproc {
    pub fn new(root: impl AsRef<Path>, index: u32) -> Self {
        Self {
            path: root.as_ref().join(format!("remoteproc{}", index)),
        }
    }

    /// All `remoteprocN` entries under `root`, in index order
    pub fn list(root: impl AsRef<Path>) -> Result<Vec<Self>> {
        let root = root.as_ref();
        let entries = fs::read_dir(root).map_err(|e| BspError::io_at(root.display(), e))?;

        let mut found: Vec<(u32, Self)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let index = name.to_str()?.strip_prefix("remoteproc")?.parse().ok()?;
                Some((index, Self { path: entry.path() }))
            })
            .collect();
        found.sort_by_key(|(index, _)| *index);
        Ok(found.into_iter().map(|(_, rp)| rp).collect())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_exists(&self) -> Result<()> {
        if self.path.is_dir() {
            Ok(())
        } else {
            Err(BspError::NotFound(format!(
                "remoteproc not found at {}",
                self.path.display()
            )))
        }
    }

    /// Device name, e.g. `4a334000.pru`
    pub fn name(&self) -> Result<String> {
        self.ensure_exists()?;
        read_attr(self.path.join("name"))
    }

    pub fn state(&self) -> Result<RemoteprocState> {
        self.ensure_exists()?;
        read_attr(self.path.join("state")).map(|s| RemoteprocState::parse(&s))
    }

    pub fn firmware(&self) -> Result<String> {
        self.ensure_exists()?;
        read_attr(self.path.join("firmware"))
    }

    /// The kernel only accepts a new firmware name while the core is offline
    pub fn set_firmware(&self, name: &str) -> Result<()> {
        if self.state()? == RemoteprocState::Running {
            return Err(BspError::Pru(format!(
                "{} is running; stop it before changing firmware",
                self.path.display()
            )));
        }
        write_attr(self.path.join("firmware"), name)?;
        info!("{}: firmware set to {}", self.path.display(), name);
        Ok(())
    }

    pub fn start(&self) -> Result<()> {
        if self.state()? == RemoteprocState::Running {
            return Err(BspError::Pru(format!(
                "{} is already running",
                self.path.display()
            )));
        }
        write_attr(self.path.join("state"), "start")?;
        info!("{}: started", self.path.display());
        Ok(())
    }

    pub fn stop(&self) -> Result<()> {
        if self.state()? != RemoteprocState::Running {
            return Err(BspError::Pru(format!(
                "{} is not running",
                self.path.display()
            )));
        }
        write_attr(self.path.join("state"), "stop")?;
        info!("{}: stopped", self.path.display());
        Ok(())
    }

    /// `remoteprocN: <name> [<state>] firmware=<file>`
    pub fn status_line(&self) -> Result<String> {
        let index = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(format!(
            "{}: {} [{}] firmware={}",
            index,
            self.name()?,
            self.state()?,
            self.firmware()?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_rproc(root: &Path, index: u32, name: &str, state: &str) -> Remoteproc {
        let dir = root.join(format!("remoteproc{}", index));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("name"), format!("{}\n", name)).unwrap();
        fs::write(dir.join("state"), format!("{}\n", state)).unwrap();
        fs::write(dir.join("firmware"), "am335x-pru0-fw\n").unwrap();
        Remoteproc::new(root, index)
    }

    #[test]
    fn state_parsing() {
        assert_eq!(RemoteprocState::parse("running\n"), RemoteprocState::Running);
        assert_eq!(RemoteprocState::parse("offline"), RemoteprocState::Offline);
        assert_eq!(
            RemoteprocState::parse("deleted"),
            RemoteprocState::Other("deleted".to_string())
        );
        assert_eq!(RemoteprocState::Crashed.to_string(), "crashed");
    }

    #[test]
    fn reads_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let rp = fake_rproc(dir.path(), 1, "4a334000.pru", "offline");
        assert_eq!(rp.name().unwrap(), "4a334000.pru");
        assert_eq!(rp.state().unwrap(), RemoteprocState::Offline);
        assert_eq!(rp.firmware().unwrap(), "am335x-pru0-fw");
        assert_eq!(
            rp.status_line().unwrap(),
            "remoteproc1: 4a334000.pru [offline] firmware=am335x-pru0-fw"
        );
    }

    #[test]
    fn start_writes_state() {
        let dir = tempfile::tempdir().unwrap();
        let rp = fake_rproc(dir.path(), 1, "4a334000.pru", "offline");
        rp.set_firmware("am335x-pru1-fw").unwrap();
        assert_eq!(rp.firmware().unwrap(), "am335x-pru1-fw");
        rp.start().unwrap();
        assert_eq!(
            fs::read_to_string(rp.path().join("state")).unwrap(),
            "start"
        );
    }

    #[test]
    fn running_core_rejects_start_and_firmware() {
        let dir = tempfile::tempdir().unwrap();
        let rp = fake_rproc(dir.path(), 2, "4a338000.pru", "running");
        assert!(rp.start().is_err());
        assert!(rp.set_firmware("other-fw").is_err());
        rp.stop().unwrap();
        assert_eq!(fs::read_to_string(rp.path().join("state")).unwrap(), "stop");
    }

    #[test]
    fn missing_core_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let rp = Remoteproc::new(dir.path(), 7);
        assert!(matches!(rp.state(), Err(BspError::NotFound(_))));
    }

    #[test]
    fn list_sorts_by_index() {
        let dir = tempfile::tempdir().unwrap();
        fake_rproc(dir.path(), 10, "x", "offline");
        fake_rproc(dir.path(), 2, "y", "offline");
        fs::create_dir(dir.path().join("power")).unwrap();

        let all = Remoteproc::list(dir.path()).unwrap();
        let names: Vec<_> = all.iter().map(|rp| rp.name().unwrap()).collect();
        assert_eq!(names, vec!["y", "x"]);
    }
}

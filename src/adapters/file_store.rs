//! JSON file status store.
//!
//! Implements [`StatusStore`] by keeping a [`StatusSnapshot`] in memory
//! and rewriting the whole document after every mutation.
//!
//! # Durability
//!
//! - Writes go to a sibling `*.tmp` file which is then renamed over the
//!   target, so a crash mid-write leaves the previous document intact.
//! - A failed write is reported and the in-memory copy rolled back, so
//!   memory never runs ahead of disk.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{info, warn};

use super::memory_store::StatusSnapshot;
use crate::app::ports::{StatusStore, StoreError};
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

pub struct FileStatusStore {
    path: PathBuf,
    state: StatusSnapshot,
}

impl FileStatusStore {
    /// Open the store at `path`.  A missing file yields the default state;
    /// an unreadable or malformed one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::Corrupted(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("FileStatusStore: {} absent, starting fresh", path.display());
                StatusSnapshot::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, state })
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&self.state)
            .map_err(|e| StoreError::Corrupted(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply `f` to the snapshot and persist, restoring the old snapshot if
    /// the write fails.
    fn mutate(&mut self, f: impl FnOnce(&mut StatusSnapshot)) -> Result<(), StoreError> {
        let before = self.state.clone();
        f(&mut self.state);
        if let Err(e) = self.persist() {
            warn!("FileStatusStore: write to {} failed: {e}", self.path.display());
            self.state = before;
            return Err(e);
        }
        Ok(())
    }
}

impl StatusStore for FileStatusStore {
    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        Ok(self.state.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        self.mutate(|s| s.arming_status = status)
    }

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        Ok(self.state.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        self.mutate(|s| s.alarm_status = status)
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        Ok(self.state.sensors.iter().cloned().collect())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        self.mutate(|s| s.register(sensor))
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.mutate(|s| {
            s.sensors.remove(sensor);
        })
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.mutate(|s| s.upsert(sensor))
    }

    fn find_sensor(&self, sensor: &Sensor) -> Result<Option<Sensor>, StoreError> {
        Ok(self.state.sensors.get(sensor).cloned())
    }
}

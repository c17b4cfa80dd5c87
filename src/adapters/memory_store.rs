//! In-memory status store.
//!
//! Implements [`StatusStore`] over a plain [`StatusSnapshot`].  The
//! snapshot type is shared with the file-backed store, which persists the
//! same structure as JSON.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::app::ports::{StatusStore, StoreError};
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

/// Everything a store persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    pub arming_status: ArmingStatus,
    pub alarm_status: AlarmStatus,
    pub sensors: BTreeSet<Sensor>,
}

impl StatusSnapshot {
    /// Register `sensor` unless it is already known.  A known sensor keeps
    /// its stored flag.
    pub(crate) fn register(&mut self, sensor: Sensor) {
        if !self.sensors.contains(&sensor) {
            self.sensors.insert(sensor);
        }
    }

    pub(crate) fn upsert(&mut self, sensor: &Sensor) {
        if let Some(mut existing) = self.sensors.take(sensor) {
            existing.set_active(sensor.is_active());
            self.sensors.insert(existing);
        } else {
            self.sensors.insert(sensor.clone());
        }
    }
}

/// Process-local store.  Starts DISARMED / NO_ALARM with no sensors.
#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    state: StatusSnapshot,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, e.g. to start a test from a given status.
    pub fn with_snapshot(state: StatusSnapshot) -> Self {
        Self { state }
    }
}

impl StatusStore for MemoryStatusStore {
    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        Ok(self.state.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        self.state.arming_status = status;
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        Ok(self.state.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        self.state.alarm_status = status;
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        Ok(self.state.sensors.iter().cloned().collect())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        self.state.register(sensor);
        Ok(())
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.state.sensors.remove(sensor);
        Ok(())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.state.upsert(sensor);
        Ok(())
    }

    fn find_sensor(&self, sensor: &Sensor) -> Result<Option<Sensor>, StoreError> {
        Ok(self.state.sensors.get(sensor).cloned())
    }
}

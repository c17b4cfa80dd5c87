//! Thread-safe handle around a [`SecurityService`].
//!
//! Every entry point is a read-modify-write of the stored statuses, so
//! concurrent callers are serialised behind one mutex held for the whole
//! call, including listener fan-out and the classifier round trip.
//!
//! The mutex is not re-entrant: a listener that calls back into the same
//! handle deadlocks.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::commands::SecurityCommand;
use super::ports::{Image, ImageClassifier, StatusListener, StatusStore};
use super::service::{ListenerId, SecurityService};
use crate::error::Result;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

/// Cloneable, `Send + Sync` handle to one service instance.
pub struct SharedSecurityService<S, C> {
    inner: Arc<Mutex<SecurityService<S, C>>>,
}

impl<S, C> Clone for SharedSecurityService<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StatusStore, C: ImageClassifier> SharedSecurityService<S, C> {
    pub fn new(service: SecurityService<S, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Hold the lock across several calls that must not interleave.
    pub fn lock(&self) -> MutexGuard<'_, SecurityService<S, C>> {
        self.inner.lock()
    }

    pub fn change_sensor_activation(&self, sensor: &Sensor, active: bool) -> Result<Sensor> {
        self.inner.lock().change_sensor_activation(sensor, active)
    }

    pub fn process_image(&self, image: &Image) -> Result<Option<bool>> {
        self.inner.lock().process_image(image)
    }

    pub fn set_arming_status(&self, status: ArmingStatus) -> Result<()> {
        self.inner.lock().set_arming_status(status)
    }

    pub fn handle_command(&self, cmd: SecurityCommand) -> Result<()> {
        self.inner.lock().handle_command(cmd)
    }

    pub fn add_status_listener(&self, listener: Box<dyn StatusListener>) -> ListenerId {
        self.inner.lock().add_status_listener(listener)
    }

    pub fn remove_status_listener(&self, id: ListenerId) -> bool {
        self.inner.lock().remove_status_listener(id)
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.inner.lock().alarm_status()
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.inner.lock().arming_status()
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        self.inner.lock().sensors()
    }
}

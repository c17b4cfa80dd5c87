//! Port traits: the hexagonal boundary between the alarm rules and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityService (domain)
//! ```
//!
//! Driven adapters (status store, image classifier, status listeners)
//! implement these traits.  The [`SecurityService`](super::service::SecurityService)
//! owns its store and classifier through generics and holds listeners as
//! boxed trait objects, so the domain core never touches a file, a network
//! client or a UI directly.
//!
//! ## Failure contract
//!
//! - **StatusStore** errors propagate out of every controller entry point.
//!   Persistence is the source of truth and is never masked.
//! - **ImageClassifier** errors never propagate.  The controller degrades
//!   them to "no decision" for that single call.

use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

// ───────────────────────────────────────────────────────────────
// Status store (driven adapter: domain ↔ persistent state)
// ───────────────────────────────────────────────────────────────

/// Persists the arming status, the alarm status and the registered sensors.
///
/// Sensors are keyed on name + type; see [`Sensor`]'s equality.
pub trait StatusStore {
    fn arming_status(&self) -> Result<ArmingStatus, StoreError>;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError>;

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError>;

    /// Every registered sensor, ordered by name then type.
    fn sensors(&self) -> Result<Vec<Sensor>, StoreError>;

    /// Register a sensor.  Re-adding a known sensor leaves the stored copy,
    /// and its active flag, untouched.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError>;

    /// Unregister a sensor.  Removing an unknown sensor is a no-op.
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError>;

    /// Persist a sensor's current flag, inserting it if it is not yet known.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError>;

    /// Look up the stored copy of `sensor`.
    fn find_sensor(&self, sensor: &Sensor) -> Result<Option<Sensor>, StoreError> {
        Ok(self.sensors()?.into_iter().find(|s| s.same_device(sensor)))
    }

    /// True if at least one registered sensor is active.
    fn any_sensor_active(&self) -> Result<bool, StoreError> {
        Ok(self.sensors()?.iter().any(Sensor::is_active))
    }
}

// ───────────────────────────────────────────────────────────────
// Image classifier (driven adapter: domain → vision backend)
// ───────────────────────────────────────────────────────────────

/// Opaque camera frame.  The core never inspects pixels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    bytes: Vec<u8>,
}

impl Image {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Answers whether the trigger object (a cat) appears in a frame.
///
/// `confidence_threshold` is a percentage: `90.0` requires 90 % confidence.
/// May block for as long as the backend takes; there is no timeout.
pub trait ImageClassifier {
    fn contains_trigger(&mut self, image: &Image, confidence_threshold: f32) -> Result<bool, ClassifierError>;
}

// ───────────────────────────────────────────────────────────────
// Status listener (driving side: domain → observers)
// ───────────────────────────────────────────────────────────────

/// Observer notified synchronously of status changes.
///
/// Callbacks run on the caller's thread before the triggering entry point
/// returns.  A listener must not call back into the service: re-entering
/// through [`SharedSecurityService`](super::shared::SharedSecurityService)
/// deadlocks, and no other re-entry path exists.
pub trait StatusListener: Send {
    fn on_alarm_status_changed(&mut self, status: AlarmStatus);

    fn on_sensor_status_changed(&mut self, sensor: &Sensor, active: bool);

    fn on_arming_status_changed(&mut self, _status: ArmingStatus) {}

    fn on_trigger_detected(&mut self, _detected: bool) {}
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`StatusStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backing file could not be read or written.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Persisted state failed to deserialise.
    #[error("store corrupted: {0}")]
    Corrupted(String),
    /// The backend refused the write (read-only medium, quota, ...).
    #[error("store rejected write: {0}")]
    Rejected(&'static str),
}

/// Errors from [`ImageClassifier`] calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    /// Image is empty or cannot be decoded.
    #[error("image unusable")]
    UnusableImage,
    /// The classification backend failed.
    #[error("classifier backend failed: {0}")]
    Backend(String),
}

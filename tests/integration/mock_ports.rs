//! Mock port adapters for integration tests.
//!
//! Records every store write and every listener callback so tests can
//! assert on the full history, not just the final status.

use std::collections::VecDeque;
use std::sync::Arc;

use catpoint::adapters::memory_store::{MemoryStatusStore, StatusSnapshot};
use catpoint::app::events::StatusEvent;
use catpoint::app::ports::{ClassifierError, Image, ImageClassifier, StatusListener, StatusStore, StoreError};
use catpoint::config::SecurityConfig;
use catpoint::{AlarmStatus, ArmingStatus, SecurityService, Sensor};
use parking_lot::Mutex;

// ── Store write record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    SetArming(ArmingStatus),
    SetAlarm(AlarmStatus),
    Add(Sensor),
    Remove(Sensor),
    Update { name: String, active: bool },
}

// ── RecordingStore ────────────────────────────────────────────

pub struct RecordingStore {
    inner: MemoryStatusStore,
    pub calls: Vec<StoreCall>,
    /// When set, every write fails with `StoreError::Rejected`.
    pub fail_writes: bool,
    /// When set, only `set_arming_status` fails.
    pub fail_arming_writes: bool,
}

#[allow(dead_code)]
impl RecordingStore {
    pub fn new() -> Self {
        Self::seeded(StatusSnapshot::default())
    }

    pub fn seeded(snapshot: StatusSnapshot) -> Self {
        Self {
            inner: MemoryStatusStore::with_snapshot(snapshot),
            calls: Vec::new(),
            fail_writes: false,
            fail_arming_writes: false,
        }
    }

    /// Every alarm status written, in order.
    pub fn alarm_writes(&self) -> Vec<AlarmStatus> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                StoreCall::SetAlarm(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    fn guard(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            Err(StoreError::Rejected("mock write failure"))
        } else {
            Ok(())
        }
    }
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusStore for RecordingStore {
    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        self.inner.arming_status()
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        self.guard()?;
        if self.fail_arming_writes {
            return Err(StoreError::Rejected("arming write refused"));
        }
        self.calls.push(StoreCall::SetArming(status));
        self.inner.set_arming_status(status)
    }

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        self.inner.alarm_status()
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        self.guard()?;
        self.calls.push(StoreCall::SetAlarm(status));
        self.inner.set_alarm_status(status)
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        self.inner.sensors()
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        self.guard()?;
        self.calls.push(StoreCall::Add(sensor.clone()));
        self.inner.add_sensor(sensor)
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.guard()?;
        self.calls.push(StoreCall::Remove(sensor.clone()));
        self.inner.remove_sensor(sensor)
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.guard()?;
        self.calls.push(StoreCall::Update {
            name: sensor.name().to_string(),
            active: sensor.is_active(),
        });
        self.inner.update_sensor(sensor)
    }
}

// ── ScriptedClassifier ────────────────────────────────────────

/// Hands out queued answers; answers `Ok(false)` once the queue is empty.
pub struct ScriptedClassifier {
    pub answers: VecDeque<Result<bool, ClassifierError>>,
    pub thresholds_seen: Vec<f32>,
}

#[allow(dead_code)]
impl ScriptedClassifier {
    pub fn new() -> Self {
        Self {
            answers: VecDeque::new(),
            thresholds_seen: Vec::new(),
        }
    }

    pub fn answering(answers: impl IntoIterator<Item = Result<bool, ClassifierError>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            thresholds_seen: Vec::new(),
        }
    }
}

impl ImageClassifier for ScriptedClassifier {
    fn contains_trigger(&mut self, _image: &Image, confidence_threshold: f32) -> Result<bool, ClassifierError> {
        self.thresholds_seen.push(confidence_threshold);
        self.answers.pop_front().unwrap_or(Ok(false))
    }
}

// ── RecordingListener ─────────────────────────────────────────

/// Listener that copies every callback into a shared log.
#[derive(Clone, Default)]
pub struct RecordingListener {
    pub events: Arc<Mutex<Vec<StatusEvent>>>,
}

#[allow(dead_code)]
impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn taken(&self) -> Vec<StatusEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn alarm_events(&self) -> Vec<AlarmStatus> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                StatusEvent::AlarmStatusChanged(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }
}

impl StatusListener for RecordingListener {
    fn on_alarm_status_changed(&mut self, status: AlarmStatus) {
        self.events.lock().push(StatusEvent::AlarmStatusChanged(status));
    }

    fn on_sensor_status_changed(&mut self, sensor: &Sensor, active: bool) {
        self.events.lock().push(StatusEvent::SensorStatusChanged {
            sensor: sensor.clone(),
            active,
        });
    }

    fn on_arming_status_changed(&mut self, status: ArmingStatus) {
        self.events.lock().push(StatusEvent::ArmingStatusChanged(status));
    }

    fn on_trigger_detected(&mut self, detected: bool) {
        self.events.lock().push(StatusEvent::TriggerDetected(detected));
    }
}

// ── Builders ──────────────────────────────────────────────────

pub type TestService = SecurityService<RecordingStore, ScriptedClassifier>;

/// Service over a store seeded with the given statuses and sensors.
#[allow(dead_code)]
pub fn service_with(
    arming: ArmingStatus,
    alarm: AlarmStatus,
    sensors: impl IntoIterator<Item = Sensor>,
    classifier: ScriptedClassifier,
) -> TestService {
    let snapshot = StatusSnapshot {
        arming_status: arming,
        alarm_status: alarm,
        sensors: sensors.into_iter().collect(),
    };
    SecurityService::new(
        RecordingStore::seeded(snapshot),
        classifier,
        &SecurityConfig::default(),
    )
}

//! Security service, the hexagonal core.
//!
//! [`SecurityService`] owns the alarm FSM, the injected store and
//! classifier, and the listener registry.  Every entry point reads the
//! current status from the store, asks the FSM for a verdict, persists
//! it, and fans the resulting events out to listeners before returning.
//!
//! ```text
//!   sensor change ──▶ ┌──────────────────────┐ ──▶ StatusListener(s)
//!   arming change ──▶ │   SecurityService    │
//!   camera frame  ──▶ │   AlarmFsm rules     │ ◀─▶ StatusStore
//!                     └──────────────────────┘ ──▶ ImageClassifier
//! ```
//!
//! Entry points take `&mut self`, so a single owner is serialised by the
//! borrow checker.  Share across threads with
//! [`SharedSecurityService`](super::shared::SharedSecurityService).

use log::{debug, info, warn};

use crate::config::SecurityConfig;
use crate::error::Result;
use crate::fsm::{AlarmFsm, AlarmStatus, ArmingStatus, sensor_context};
use crate::sensors::Sensor;

use super::commands::SecurityCommand;
use super::events::StatusEvent;
use super::ports::{Image, ImageClassifier, StatusListener, StatusStore};

/// Handle returned by [`SecurityService::add_status_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

// ───────────────────────────────────────────────────────────────
// SecurityService
// ───────────────────────────────────────────────────────────────

/// The alarm controller.
pub struct SecurityService<S, C> {
    store: S,
    classifier: C,
    fsm: AlarmFsm,
    listeners: Vec<(ListenerId, Box<dyn StatusListener>)>,
    next_listener_id: u64,
    /// Percent confidence the classifier must reach.
    confidence_threshold: f32,
    /// Last successful classifier answer.
    trigger_detected: bool,
}

impl<S: StatusStore, C: ImageClassifier> SecurityService<S, C> {
    /// Construct the service around an existing store and classifier.
    pub fn new(store: S, classifier: C, config: &SecurityConfig) -> Self {
        Self {
            store,
            classifier,
            fsm: AlarmFsm::default(),
            listeners: Vec::new(),
            next_listener_id: 0,
            confidence_threshold: config.confidence_threshold,
            trigger_detected: false,
        }
    }

    // ── Sensor activation ─────────────────────────────────────

    /// Apply a sensor's new active flag and any alarm transition it causes.
    ///
    /// The previous flag is the stored one when the sensor is registered,
    /// otherwise the flag carried by `sensor`.  Returns the sensor as
    /// persisted.
    pub fn change_sensor_activation(&mut self, sensor: &Sensor, active: bool) -> Result<Sensor> {
        let was_active = self
            .store
            .find_sensor(sensor)?
            .map_or(sensor.is_active(), |stored| stored.is_active());
        let arming = self.store.arming_status()?;

        let updated = sensor.with_active(active);
        self.store.update_sensor(&updated)?;
        debug!("sensor {} -> {}", updated.name(), active);

        if !arming.is_armed() {
            return Ok(updated);
        }

        let current = self.store.alarm_status()?;
        let any_active_after = self.store.any_sensor_active()?;
        let ctx = sensor_context(arming, was_active, active, any_active_after);
        if let Some(next) = self.fsm.on_sensor_change(current, &ctx) {
            self.write_alarm_status(current, next)?;
        }

        self.notify(&StatusEvent::SensorStatusChanged {
            sensor: updated.clone(),
            active,
        });
        Ok(updated)
    }

    // ── Image classification ──────────────────────────────────

    /// Classify `image` and apply the result.
    ///
    /// A classifier failure makes no status change and notifies nobody.
    /// Returns the classifier's answer, `None` on failure.
    pub fn process_image(&mut self, image: &Image) -> Result<Option<bool>> {
        let detected = match self
            .classifier
            .contains_trigger(image, self.confidence_threshold)
        {
            Ok(detected) => detected,
            Err(e) => {
                warn!("image classification failed ({e}), leaving status unchanged");
                return Ok(None);
            }
        };
        self.trigger_detected = detected;

        let arming = self.store.arming_status()?;
        let any_active = self.store.any_sensor_active()?;
        if let Some(next) = self.fsm.on_image_result(arming, detected, any_active) {
            let current = self.store.alarm_status()?;
            self.write_alarm_status(current, next)?;
        }

        self.notify(&StatusEvent::TriggerDetected(detected));
        Ok(Some(detected))
    }

    // ── Arming ────────────────────────────────────────────────

    /// Change the arming status.
    ///
    /// Disarming forces NO_ALARM.  Arming in either mode resets every
    /// registered sensor to inactive without routing the reset through the
    /// sensor rules.
    ///
    /// The arming status is written first, so a rejected arming write
    /// leaves everything as it was.  Listeners hear nothing until every
    /// write has succeeded.
    pub fn set_arming_status(&mut self, next: ArmingStatus) -> Result<()> {
        let prev = self.store.arming_status()?;
        self.store.set_arming_status(next)?;
        info!("arming status {} -> {}", prev, next);

        if next.is_armed() {
            for sensor in self.store.sensors()? {
                if sensor.is_active() {
                    self.store.update_sensor(&sensor.with_active(false))?;
                }
            }
        }

        let alarm = self.fsm.on_arming_change(next, self.trigger_detected);
        if let Some(alarm) = alarm {
            let current = self.store.alarm_status()?;
            self.persist_alarm_status(current, alarm)?;
        }

        if let Some(alarm) = alarm {
            self.notify(&StatusEvent::AlarmStatusChanged(alarm));
        }
        self.notify(&StatusEvent::ArmingStatusChanged(next));
        Ok(())
    }

    // ── Registry management ───────────────────────────────────

    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        debug!("registering sensor {sensor}");
        self.store.add_sensor(sensor)?;
        Ok(())
    }

    pub fn remove_sensor(&mut self, sensor: &Sensor) -> Result<()> {
        debug!("unregistering sensor {sensor}");
        self.store.remove_sensor(sensor)?;
        Ok(())
    }

    /// Register a listener.  It hears only about events processed after
    /// this call.
    pub fn add_status_listener(&mut self, listener: Box<dyn StatusListener>) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Unregister a listener.  Returns `false` if `id` was not registered.
    pub fn remove_status_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(&mut self, cmd: SecurityCommand) -> Result<()> {
        match cmd {
            SecurityCommand::SetArmingStatus(status) => self.set_arming_status(status),
            SecurityCommand::ChangeSensorActivation { sensor, active } => {
                self.change_sensor_activation(&sensor, active).map(|_| ())
            }
            SecurityCommand::AddSensor(sensor) => self.add_sensor(sensor),
            SecurityCommand::RemoveSensor(sensor) => self.remove_sensor(&sensor),
            SecurityCommand::ProcessImage(image) => self.process_image(&image).map(|_| ()),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.store.alarm_status()?)
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.store.arming_status()?)
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        Ok(self.store.sensors()?)
    }

    /// Last successful classifier answer (false until the first one).
    pub fn trigger_detected(&self) -> bool {
        self.trigger_detected
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }

    // ── Internal ──────────────────────────────────────────────

    fn persist_alarm_status(&mut self, current: AlarmStatus, next: AlarmStatus) -> Result<()> {
        self.store.set_alarm_status(next)?;
        info!(
            "alarm status {} -> {}",
            self.fsm.state_name(current),
            self.fsm.state_name(next)
        );
        Ok(())
    }

    fn write_alarm_status(&mut self, current: AlarmStatus, next: AlarmStatus) -> Result<()> {
        self.persist_alarm_status(current, next)?;
        self.notify(&StatusEvent::AlarmStatusChanged(next));
        Ok(())
    }

    fn notify(&mut self, event: &StatusEvent) {
        for (_, listener) in &mut self.listeners {
            event.dispatch(listener.as_mut());
        }
    }
}

//! Outbound status events.
//!
//! The [`SecurityService`](super::service::SecurityService) builds one of
//! these for every change and fans it out to each registered
//! [`StatusListener`] through [`StatusEvent::dispatch`].

use serde::Serialize;

use super::ports::StatusListener;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum StatusEvent {
    /// A new alarm status was written.
    AlarmStatusChanged(AlarmStatus),

    /// A new arming status was written.
    ArmingStatusChanged(ArmingStatus),

    /// A sensor's active flag was written.
    SensorStatusChanged { sensor: Sensor, active: bool },

    /// The classifier answered for a frame.
    TriggerDetected(bool),
}

impl StatusEvent {
    /// Route this event to the matching listener callback.
    pub fn dispatch(&self, listener: &mut dyn StatusListener) {
        match self {
            Self::AlarmStatusChanged(status) => listener.on_alarm_status_changed(*status),
            Self::ArmingStatusChanged(status) => listener.on_arming_status_changed(*status),
            Self::SensorStatusChanged { sensor, active } => {
                listener.on_sensor_status_changed(sensor, *active);
            }
            Self::TriggerDetected(detected) => listener.on_trigger_detected(*detected),
        }
    }
}

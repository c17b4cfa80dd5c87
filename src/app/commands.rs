//! Inbound commands to the security service.
//!
//! These represent actions requested by the outside world (control panel,
//! sensor bus, camera feed, replay script) that the
//! [`SecurityService`](super::service::SecurityService) interprets and acts upon.

use super::ports::Image;
use crate::fsm::ArmingStatus;
use crate::sensors::Sensor;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum SecurityCommand {
    /// Disarm, or arm in home/away mode.
    SetArmingStatus(ArmingStatus),

    /// A sensor reported a new active/inactive state.
    ChangeSensorActivation { sensor: Sensor, active: bool },

    /// Register a sensor with the store.
    AddSensor(Sensor),

    /// Unregister a sensor.
    RemoveSensor(Sensor),

    /// Classify a camera frame and apply the result.
    ProcessImage(Image),
}

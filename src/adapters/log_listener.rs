//! Log-based status listener adapter.
//!
//! Implements [`StatusListener`] by writing every status change to the
//! `log` facade.  A control-panel or push-notification adapter would
//! implement the same trait.

use log::info;

use crate::app::ports::StatusListener;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

/// Adapter that logs every status event.
#[derive(Debug, Default)]
pub struct LogStatusListener;

impl LogStatusListener {
    pub fn new() -> Self {
        Self
    }
}

impl StatusListener for LogStatusListener {
    fn on_alarm_status_changed(&mut self, status: AlarmStatus) {
        info!("ALARM  | {status}");
    }

    fn on_sensor_status_changed(&mut self, sensor: &Sensor, active: bool) {
        info!(
            "SENSOR | {} [{}] -> {}",
            sensor.name(),
            sensor.sensor_type(),
            if active { "active" } else { "inactive" }
        );
    }

    fn on_arming_status_changed(&mut self, status: ArmingStatus) {
        info!("ARMING | {status}");
    }

    fn on_trigger_detected(&mut self, detected: bool) {
        info!("CAMERA | cat {}", if detected { "detected" } else { "not seen" });
    }
}

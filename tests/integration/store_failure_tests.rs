//! Store failures propagate; nothing is notified for a write that failed.

use catpoint::app::ports::{Image, StoreError};
use catpoint::{AlarmStatus, ArmingStatus, Error, Sensor, SensorType};

use super::mock_ports::{RecordingListener, ScriptedClassifier, TestService, service_with};

fn window() -> Sensor {
    Sensor::new("Bedroom", SensorType::Window)
}

fn set_failing(svc: &mut TestService, failing: bool) {
    svc.store_mut().fail_writes = failing;
}

#[test]
fn sensor_write_failure_propagates() {
    let mut svc = service_with(ArmingStatus::ArmedAway, AlarmStatus::NoAlarm, [window()], ScriptedClassifier::new());
    let listener = RecordingListener::new();
    svc.add_status_listener(Box::new(listener.clone()));

    set_failing(&mut svc, true);
    let err = svc.change_sensor_activation(&window(), true).unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Rejected(_))));
    assert_eq!(listener.len(), 0);
    assert!(!svc.sensors().unwrap()[0].is_active());

    set_failing(&mut svc, false);
    svc.change_sensor_activation(&window(), true).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
}

#[test]
fn disarm_failure_propagates() {
    let mut svc = service_with(ArmingStatus::ArmedHome, AlarmStatus::Alarm, [], ScriptedClassifier::new());
    set_failing(&mut svc, true);
    assert!(matches!(
        svc.set_arming_status(ArmingStatus::Disarmed),
        Err(Error::Store(_))
    ));
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);
    assert_eq!(svc.arming_status().unwrap(), ArmingStatus::ArmedHome);
}

#[test]
fn rejected_arming_write_leaves_everything_untouched() {
    let mut svc = service_with(
        ArmingStatus::ArmedHome,
        AlarmStatus::Alarm,
        [window().with_active(true)],
        ScriptedClassifier::new(),
    );
    let listener = RecordingListener::new();
    svc.add_status_listener(Box::new(listener.clone()));
    svc.store_mut().fail_arming_writes = true;

    for next in [ArmingStatus::Disarmed, ArmingStatus::ArmedAway] {
        let err = svc.set_arming_status(next).unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Rejected(_))));
    }
    assert_eq!(svc.arming_status().unwrap(), ArmingStatus::ArmedHome);
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);
    assert!(svc.sensors().unwrap()[0].is_active());
    assert!(svc.store().calls.is_empty());
    assert_eq!(listener.len(), 0);
}

#[test]
fn image_write_failure_propagates() {
    let mut svc = service_with(
        ArmingStatus::ArmedHome,
        AlarmStatus::NoAlarm,
        [],
        ScriptedClassifier::answering([Ok(true)]),
    );
    set_failing(&mut svc, true);
    assert!(svc.process_image(&Image::from_bytes(vec![9])).is_err());
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

#[test]
fn registry_write_failure_propagates() {
    let mut svc = service_with(ArmingStatus::Disarmed, AlarmStatus::NoAlarm, [], ScriptedClassifier::new());
    set_failing(&mut svc, true);
    assert!(svc.add_sensor(window()).is_err());
    assert!(svc.remove_sensor(&window()).is_err());
    assert!(svc.sensors().unwrap().is_empty());
}

//! Listener registry and notification fan-out.

use catpoint::app::events::StatusEvent;
use catpoint::app::ports::Image;
use catpoint::{AlarmStatus, ArmingStatus, Sensor, SensorType};

use super::mock_ports::{RecordingListener, ScriptedClassifier, service_with};

fn hall() -> Sensor {
    Sensor::new("Hall", SensorType::Motion)
}

#[test]
fn activation_notifies_alarm_then_sensor() {
    let mut svc = service_with(ArmingStatus::ArmedAway, AlarmStatus::NoAlarm, [hall()], ScriptedClassifier::new());
    let listener = RecordingListener::new();
    svc.add_status_listener(Box::new(listener.clone()));

    svc.change_sensor_activation(&hall(), true).unwrap();
    assert_eq!(
        listener.taken(),
        vec![
            StatusEvent::AlarmStatusChanged(AlarmStatus::PendingAlarm),
            StatusEvent::SensorStatusChanged {
                sensor: hall(),
                active: true
            },
        ]
    );
}

#[test]
fn sensor_change_is_broadcast_without_alarm_change() {
    let mut svc = service_with(ArmingStatus::ArmedAway, AlarmStatus::Alarm, [hall()], ScriptedClassifier::new());
    let listener = RecordingListener::new();
    svc.add_status_listener(Box::new(listener.clone()));

    svc.change_sensor_activation(&hall(), true).unwrap();
    let events = listener.taken();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        StatusEvent::SensorStatusChanged { active: true, .. }
    ));
}

#[test]
fn disarmed_sensor_change_notifies_nobody() {
    let mut svc = service_with(ArmingStatus::Disarmed, AlarmStatus::NoAlarm, [hall()], ScriptedClassifier::new());
    let listener = RecordingListener::new();
    svc.add_status_listener(Box::new(listener.clone()));

    svc.change_sensor_activation(&hall(), true).unwrap();
    assert_eq!(listener.len(), 0);
}

#[test]
fn every_listener_hears_every_event() {
    let mut svc = service_with(ArmingStatus::ArmedHome, AlarmStatus::NoAlarm, [], ScriptedClassifier::new());
    let listeners: Vec<_> = (0..3).map(|_| RecordingListener::new()).collect();
    for l in &listeners {
        svc.add_status_listener(Box::new(l.clone()));
    }

    svc.set_arming_status(ArmingStatus::Disarmed).unwrap();
    for l in &listeners {
        assert_eq!(
            l.taken(),
            vec![
                StatusEvent::AlarmStatusChanged(AlarmStatus::NoAlarm),
                StatusEvent::ArmingStatusChanged(ArmingStatus::Disarmed),
            ]
        );
    }
}

#[test]
fn arming_notifies_arming_only() {
    let mut svc = service_with(
        ArmingStatus::Disarmed,
        AlarmStatus::NoAlarm,
        [hall().with_active(true)],
        ScriptedClassifier::new(),
    );
    let listener = RecordingListener::new();
    svc.add_status_listener(Box::new(listener.clone()));

    svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    assert_eq!(
        listener.taken(),
        vec![StatusEvent::ArmingStatusChanged(ArmingStatus::ArmedAway)]
    );
}

#[test]
fn image_result_notifies_trigger_and_alarm() {
    let mut svc = service_with(
        ArmingStatus::ArmedHome,
        AlarmStatus::NoAlarm,
        [],
        ScriptedClassifier::answering([Ok(true)]),
    );
    let listener = RecordingListener::new();
    svc.add_status_listener(Box::new(listener.clone()));

    svc.process_image(&Image::from_bytes(vec![1, 2, 3])).unwrap();
    assert_eq!(
        listener.taken(),
        vec![
            StatusEvent::AlarmStatusChanged(AlarmStatus::Alarm),
            StatusEvent::TriggerDetected(true),
        ]
    );
}

#[test]
fn adding_a_listener_sends_nothing() {
    let mut svc = service_with(ArmingStatus::ArmedHome, AlarmStatus::Alarm, [], ScriptedClassifier::new());
    let listener = RecordingListener::new();
    svc.add_status_listener(Box::new(listener.clone()));
    assert_eq!(listener.len(), 0);
}

#[test]
fn removed_listener_hears_nothing_more() {
    let mut svc = service_with(ArmingStatus::ArmedAway, AlarmStatus::NoAlarm, [hall()], ScriptedClassifier::new());
    let kept = RecordingListener::new();
    let dropped = RecordingListener::new();
    svc.add_status_listener(Box::new(kept.clone()));
    let id = svc.add_status_listener(Box::new(dropped.clone()));

    assert!(svc.remove_status_listener(id));
    assert_eq!(svc.listener_count(), 1);

    svc.change_sensor_activation(&hall(), true).unwrap();
    svc.set_arming_status(ArmingStatus::Disarmed).unwrap();
    assert_eq!(dropped.len(), 0);
    assert_eq!(
        kept.alarm_events(),
        vec![AlarmStatus::PendingAlarm, AlarmStatus::NoAlarm]
    );
}

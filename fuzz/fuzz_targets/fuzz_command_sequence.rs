//! Fuzz target: `SecurityService::handle_command`
//!
//! Decodes the input as a stream of small opcodes, drives them through the
//! service against the in-memory store, and checks the status invariants
//! after every command.
//!
//! cargo fuzz run fuzz_command_sequence

#![no_main]

use catpoint::adapters::memory_store::MemoryStatusStore;
use catpoint::app::commands::SecurityCommand;
use catpoint::app::ports::{ClassifierError, Image, ImageClassifier};
use catpoint::config::SecurityConfig;
use catpoint::{AlarmStatus, ArmingStatus, SecurityService, Sensor, SensorType};
use libfuzzer_sys::fuzz_target;

/// Reads its answer from the first image byte: 0 = no cat, 1 = cat, else error.
struct ByteClassifier;

impl ImageClassifier for ByteClassifier {
    fn contains_trigger(&mut self, image: &Image, _: f32) -> Result<bool, ClassifierError> {
        match image.as_bytes().first() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(ClassifierError::UnusableImage),
        }
    }
}

fn sensor(b: u8) -> Sensor {
    let ty = [SensorType::Door, SensorType::Window, SensorType::Motion][(b % 3) as usize];
    Sensor::new(format!("s{}", b % 4), ty)
}

fn decode(op: u8, arg: u8) -> SecurityCommand {
    match op % 6 {
        0 => SecurityCommand::SetArmingStatus(match arg % 3 {
            0 => ArmingStatus::Disarmed,
            1 => ArmingStatus::ArmedHome,
            _ => ArmingStatus::ArmedAway,
        }),
        1 => SecurityCommand::AddSensor(sensor(arg)),
        2 => SecurityCommand::RemoveSensor(sensor(arg)),
        3 => SecurityCommand::ProcessImage(Image::from_bytes(vec![arg % 3])),
        _ => SecurityCommand::ChangeSensorActivation {
            sensor: sensor(arg),
            active: arg & 0x80 != 0,
        },
    }
}

fuzz_target!(|data: &[u8]| {
    let mut svc = SecurityService::new(MemoryStatusStore::new(), ByteClassifier, &SecurityConfig::default());

    for pair in data.chunks_exact(2) {
        let cmd = decode(pair[0], pair[1]);
        let was_alarm = svc.alarm_status().unwrap() == AlarmStatus::Alarm;
        let is_sensor_event = matches!(cmd, SecurityCommand::ChangeSensorActivation { .. });

        svc.handle_command(cmd).unwrap();

        let alarm = svc.alarm_status().unwrap();
        let arming = svc.arming_status().unwrap();
        if arming == ArmingStatus::Disarmed {
            assert_eq!(alarm, AlarmStatus::NoAlarm, "disarmed but {alarm}");
        }
        if was_alarm && is_sensor_event {
            assert_eq!(alarm, AlarmStatus::Alarm, "sensor event cleared the alarm");
        }
    }
});

//! Alarm-status finite state machine.
//!
//! The same function-pointer table pattern as a classic embedded FSM, but
//! driven by discrete events instead of a periodic tick:
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  StateTable                                   │
//! │  ┌───────────────┬──────────────────────────┐ │
//! │  │ AlarmStatus   │ on_sensor                │ │
//! │  ├───────────────┼──────────────────────────┤ │
//! │  │ NO_ALARM      │ fn(ctx) -> Option<>      │ │
//! │  │ PENDING_ALARM │ fn(ctx) -> Option<>      │ │
//! │  │ ALARM         │ fn(ctx) -> Option<>      │ │
//! │  └───────────────┴──────────────────────────┘ │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Every entry point returns `Some(next)` when the alarm status must be
//! written, or `None` to leave it alone.  Nothing here touches storage or
//! listeners; the [`SecurityService`](crate::app::service::SecurityService)
//! applies the verdicts.

pub mod context;
pub mod states;

use context::{SensorContext, SensorEdge};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

/// The system's current escalation level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[repr(u8)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AlarmStatus {
    #[default]
    NoAlarm = 0,
    PendingAlarm = 1,
    Alarm = 2,
}

impl AlarmStatus {
    /// Total number of statuses; sizes the state table.
    pub const COUNT: usize = 3;
}

/// Whether the system is disarmed or armed in one of two modes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub const fn is_armed(self) -> bool {
        !matches!(self, Self::Disarmed)
    }
}

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Per-state sensor handler.  Returns `Some(next)` to write a new status.
pub type SensorUpdateFn = fn(&SensorContext) -> Option<AlarmStatus>;

/// Static descriptor for a single alarm status.
pub struct StateDescriptor {
    pub id: AlarmStatus,
    pub name: &'static str,
    pub on_sensor: SensorUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// Transition rules for the alarm status.
///
/// Stateless apart from the handler table: the current status lives in the
/// store and is passed in with every event.
pub struct AlarmFsm {
    table: [StateDescriptor; AlarmStatus::COUNT],
}

impl AlarmFsm {
    pub fn new(table: [StateDescriptor; AlarmStatus::COUNT]) -> Self {
        Self { table }
    }

    /// Verdict for a sensor activation change: the handler for `current`
    /// decides.  Callers only consult this while armed.
    pub fn on_sensor_change(&self, current: AlarmStatus, ctx: &SensorContext) -> Option<AlarmStatus> {
        (self.descriptor(current).on_sensor)(ctx)
    }

    /// Verdict for a classifier answer.
    pub fn on_image_result(
        &self,
        arming: ArmingStatus,
        trigger_present: bool,
        any_sensor_active: bool,
    ) -> Option<AlarmStatus> {
        image_verdict(arming, trigger_present, any_sensor_active)
    }

    /// Verdict for an arming-status change.
    pub fn on_arming_change(&self, next: ArmingStatus, trigger_detected: bool) -> Option<AlarmStatus> {
        arming_verdict(next, trigger_detected)
    }

    /// Display name for a status, as held in the table.
    pub fn state_name(&self, status: AlarmStatus) -> &'static str {
        self.descriptor(status).name
    }

    fn descriptor(&self, status: AlarmStatus) -> &StateDescriptor {
        let desc = &self.table[status as usize];
        debug_assert_eq!(desc.id, status, "state table out of order");
        desc
    }
}

impl Default for AlarmFsm {
    fn default() -> Self {
        Self::new(states::build_state_table())
    }
}

/// The trigger only raises the alarm while armed-home; an absent trigger
/// clears the alarm unless a sensor still justifies it.
pub fn image_verdict(
    arming: ArmingStatus,
    trigger_present: bool,
    any_sensor_active: bool,
) -> Option<AlarmStatus> {
    match (trigger_present, arming) {
        (true, ArmingStatus::ArmedHome) => Some(AlarmStatus::Alarm),
        (true, _) => None,
        (false, _) if !any_sensor_active => Some(AlarmStatus::NoAlarm),
        (false, _) => None,
    }
}

/// Disarming always clears; arming home with the trigger in view alarms.
pub fn arming_verdict(next: ArmingStatus, trigger_detected: bool) -> Option<AlarmStatus> {
    match next {
        ArmingStatus::Disarmed => Some(AlarmStatus::NoAlarm),
        ArmingStatus::ArmedHome if trigger_detected => Some(AlarmStatus::Alarm),
        ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => None,
    }
}

/// Convenience for callers holding raw flags.
pub fn sensor_context(
    arming: ArmingStatus,
    was_active: bool,
    now_active: bool,
    any_active_after: bool,
) -> SensorContext {
    SensorContext::new(
        arming,
        SensorEdge::from_flags(was_active, now_active),
        any_active_after,
    )
}

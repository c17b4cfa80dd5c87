//! Inputs handed to the per-state sensor handlers.
//!
//! The service gathers everything a handler may look at into a
//! [`SensorContext`] before asking the FSM for a verdict, so handlers stay
//! pure functions with no access to the store.

use super::ArmingStatus;

// ---------------------------------------------------------------------------
// Sensor edge
// ---------------------------------------------------------------------------

/// How a single sensor's `active` flag moves for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorEdge {
    /// Inactive → active.
    Activated,
    /// Active → active (fired again while already active).
    Reactivated,
    /// Active → inactive.
    Deactivated,
    /// Inactive → inactive.
    AlreadyInactive,
}

impl SensorEdge {
    /// Classify a flag change.
    pub const fn from_flags(was_active: bool, now_active: bool) -> Self {
        match (was_active, now_active) {
            (false, true) => Self::Activated,
            (true, true) => Self::Reactivated,
            (true, false) => Self::Deactivated,
            (false, false) => Self::AlreadyInactive,
        }
    }

    /// True if the event asserts the sensor (either activation flavour).
    pub const fn is_activation(self) -> bool {
        matches!(self, Self::Activated | Self::Reactivated)
    }
}

// ---------------------------------------------------------------------------
// Sensor context
// ---------------------------------------------------------------------------

/// Everything a sensor handler needs to decide the next alarm status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorContext {
    /// Arming status at the time of the event.
    pub arming: ArmingStatus,
    /// Movement of the triggering sensor's flag.
    pub edge: SensorEdge,
    /// Whether any sensor in the system is active once this event is applied.
    pub any_active_after: bool,
}

impl SensorContext {
    pub const fn new(arming: ArmingStatus, edge: SensorEdge, any_active_after: bool) -> Self {
        Self {
            arming,
            edge,
            any_active_after,
        }
    }
}

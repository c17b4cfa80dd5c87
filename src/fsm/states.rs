//! Per-state sensor handlers and table builder.
//!
//! Each alarm status owns one plain `fn` pointer that decides what a
//! sensor event does while the system sits in that status.  Disarmed
//! sensor events never reach a handler; the service drops them first.
//!
//! ```text
//!  NO_ALARM ──[activated]──▶ PENDING_ALARM ──[any activation]──▶ ALARM
//!     ▲                          │
//!     └──[last sensor cleared]───┘
//!
//!  ALARM ──[sensor churn]──▶ ALARM   (cleared only by disarming)
//! ```

use super::context::{SensorContext, SensorEdge};
use super::{AlarmStatus, StateDescriptor};
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once when the service is built.
pub fn build_state_table() -> [StateDescriptor; AlarmStatus::COUNT] {
    [
        // Index 0: NoAlarm
        StateDescriptor {
            id: AlarmStatus::NoAlarm,
            name: "NO_ALARM",
            on_sensor: no_alarm_on_sensor,
        },
        // Index 1: PendingAlarm
        StateDescriptor {
            id: AlarmStatus::PendingAlarm,
            name: "PENDING_ALARM",
            on_sensor: pending_on_sensor,
        },
        // Index 2: Alarm
        StateDescriptor {
            id: AlarmStatus::Alarm,
            name: "ALARM",
            on_sensor: alarm_on_sensor,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  NO_ALARM
// ═══════════════════════════════════════════════════════════════════════════

fn no_alarm_on_sensor(ctx: &SensorContext) -> Option<AlarmStatus> {
    match ctx.edge {
        SensorEdge::Activated => {
            info!("NO_ALARM: sensor activated while {}, pending", ctx.arming);
            Some(AlarmStatus::PendingAlarm)
        }
        // A sensor that is still active from before does not skip ahead.
        SensorEdge::Reactivated | SensorEdge::Deactivated | SensorEdge::AlreadyInactive => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  PENDING_ALARM
// ═══════════════════════════════════════════════════════════════════════════

fn pending_on_sensor(ctx: &SensorContext) -> Option<AlarmStatus> {
    match ctx.edge {
        edge if edge.is_activation() => {
            info!("PENDING_ALARM: activation confirmed, raising alarm");
            Some(AlarmStatus::Alarm)
        }
        SensorEdge::Deactivated if !ctx.any_active_after => {
            info!("PENDING_ALARM: last active sensor cleared, standing down");
            Some(AlarmStatus::NoAlarm)
        }
        SensorEdge::Deactivated => {
            debug!("PENDING_ALARM: sensor cleared, others still active");
            None
        }
        SensorEdge::Activated | SensorEdge::Reactivated | SensorEdge::AlreadyInactive => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALARM: sticky under sensor churn
// ═══════════════════════════════════════════════════════════════════════════

fn alarm_on_sensor(ctx: &SensorContext) -> Option<AlarmStatus> {
    debug!("ALARM: ignoring sensor edge {:?}", ctx.edge);
    None
}

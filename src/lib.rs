//! Catpoint alarm controller library.
//!
//! Exposes the alarm rules, the hexagonal service core and the stock
//! adapters.  Everything that decides an alarm status lives in [`fsm`]
//! and [`app`]; everything that touches disk or a logger lives in
//! [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod sensors;

pub use app::ports::{Image, ImageClassifier, StatusListener, StatusStore};
pub use app::service::{ListenerId, SecurityService};
pub use app::shared::SharedSecurityService;
pub use error::{Error, Result};
pub use fsm::{AlarmStatus, ArmingStatus};
pub use sensors::{Sensor, SensorType};

//! Application core: alarm rules and orchestration, zero I/O.
//!
//! All interaction with storage, the vision backend and observers happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable with in-memory adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod shared;

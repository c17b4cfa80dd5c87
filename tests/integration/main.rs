//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one concern of the
//! security service against recording mock ports.

mod listener_tests;
mod mock_ports;
mod store_failure_tests;

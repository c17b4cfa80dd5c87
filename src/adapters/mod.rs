//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter           | Implements       | Connects to               |
//! |-------------------|------------------|---------------------------|
//! | `memory_store`    | StatusStore      | process memory            |
//! | `file_store`      | StatusStore      | JSON document on disk     |
//! | `fake_classifier` | ImageClassifier  | seeded random answers     |
//! | `log_listener`    | StatusListener   | `log` facade              |

pub mod fake_classifier;
pub mod file_store;
pub mod log_listener;
pub mod memory_store;

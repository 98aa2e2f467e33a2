//! # DueTask Reminder Library
//!
//! Sends daily SMS reminders for tasks due tomorrow. The API server embeds
//! this crate and runs the service in-process next to the HTTP listener.
//!
//! ## Modules
//!
//! - `schedule` - Computes the next local fire instant for the daily run
//! - `service` - The batch loop: select due tasks, send one SMS per task
//! - `sms` - The sender trait, the HTTP gateway client, and the test mock

pub mod schedule;
pub mod service;
pub mod sms;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

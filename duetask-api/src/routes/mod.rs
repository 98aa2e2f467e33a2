/// Route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `index`: Landing page and health check
/// - `auth`: Registration, login, and logout
/// - `tasks`: Task list, add, search, complete, and delete
/// - `profile`: Profile view and update

pub mod index;
pub mod auth;
pub mod tasks;
pub mod profile;

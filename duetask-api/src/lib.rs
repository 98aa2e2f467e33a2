//! # DueTask API Server Library
//!
//! This library provides the core functionality for the DueTask API server.
//!
//! ## Modules
//!
//! - `app`: Application state, session middleware, and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `forms`: Form deserialization helpers
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod forms;
pub mod routes;

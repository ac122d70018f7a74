//! API route handlers
//!
//! - `health`: liveness and health checks
//! - `auth`: registration and login
//! - `tasks`: owner-scoped task CRUD

pub mod auth;
pub mod health;
pub mod tasks;

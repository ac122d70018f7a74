//! Database models
//!
//! - `user`: user accounts keyed by unique email
//! - `task`: tasks owned by exactly one user

pub mod task;
pub mod user;

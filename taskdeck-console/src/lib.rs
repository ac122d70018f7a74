//! # Taskdeck Console
//!
//! Standalone, non-networked console demo of the task-management logic: a
//! single-user, in-memory task list driven by a numbered text menu. Shares no
//! code or storage with the web backend.
//!
//! ## Modules
//!
//! - `model`: the in-memory task record
//! - `store`: task storage with never-reused auto-increment ids
//! - `validate`: typed input validation
//! - `service`: task operations over the store
//! - `cli`: menu loop and display formatting

pub mod cli;
pub mod model;
pub mod service;
pub mod store;
pub mod validate;

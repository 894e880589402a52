//! Background Tasks Module
//!
//! Contains the tasks that run for the lifetime of the process.
//!
//! # Tasks
//! - Update polling: pulls updates from the transport and dispatches them

mod polling;

pub use polling::spawn_polling_task;

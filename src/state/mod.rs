//! View controller state machine.
//!
//! Transitions take the current `Instant` so load latency is deterministic
//! under test.

pub mod view_controller;

pub use view_controller::{ControllerOptions, StalePolicy, ViewController, ViewSnapshot};

//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod record;

// Re-export for convenience
pub use identifiers::{InvalidUserId, UserId};
pub use record::{Action, LogRecord};

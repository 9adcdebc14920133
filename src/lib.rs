//! logview
//!
//! Query-string driven audit log viewer. The location's query string is the
//! single source of truth for filters, sort and pagination.
//!
//! Layout follows a pure core / impure shell split:
//! - [`view_state`], [`query`] and [`pagination`] are pure functions.
//! - [`state`] sequences navigations and simulated loads with injected time.
//! - [`source`], [`config`] and [`logging`] touch the filesystem.
//! - [`view`] turns a snapshot into text.

pub mod config;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod query;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

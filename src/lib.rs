//! Logidash Client Library
//!
//! Client for a logistics analytics API: typed endpoint access, searchable and sortable
//! local tables, server-paginated remote tables with debounced search, and the system
//! status poller. The `logidash` binary renders each page as text.

pub mod components;
pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod features;
pub mod helpers;
pub mod services;
pub mod state;
pub mod utils;

pub use error::{Error, Result};

//! Service Layer
//!
//! Everything that talks to the analytics backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        ApiClient                         │
//! │   typed endpoints ── error classification ── Notifier ───┼──▶ UiEvent::Toast
//! └──────────────────────────────────────────────────────────┘
//!          │ DataSource                    │ StatusSource
//!          ▼                               ▼
//!   RemoteTableView (per table)       StatusPoller
//! ```

pub mod api;
pub mod endpoints;
mod notify;
mod status_poller;
#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiClient, notification_message};
pub use notify::Notifier;
pub use status_poller::{StatusPoller, StatusSource};

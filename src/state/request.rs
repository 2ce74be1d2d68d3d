//! Request Tokens
//!
//! Every fetch issued for a view carries a token. A container only applies the outcome
//! of the latest token it has seen go pending; anything older arrived out of order.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one issued request, monotonically increasing per tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of request tokens for one view
#[derive(Debug, Default)]
pub struct RequestTracker {
    last: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next token
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

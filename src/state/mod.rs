//! State - Per-View State Containers
//!
//! Each container owns exactly one logical data set and is only changed by
//! applying actions to it. Nothing here is global.

mod paged;
mod request;
mod resource;
mod system_state;

pub use paged::{PagedAction, PagedState};
pub use request::{RequestToken, RequestTracker};
pub use resource::{ResourceAction, ResourceState, ResourceStore};
pub use system_state::{Overlay, SystemState};

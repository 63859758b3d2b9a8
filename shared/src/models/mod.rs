//! Data models
//!
//! Shared between the assignment engine and the host reservation service.
//! Table ids are opaque strings owned by the inventory.

pub mod dining_table;
pub mod pattern;
pub mod recommendation;
pub mod reservation;
pub mod zone;

// Re-exports
pub use dining_table::*;
pub use pattern::*;
pub use recommendation::*;
pub use reservation::*;
pub use zone::*;

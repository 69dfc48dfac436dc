//! Read-only domain projections used by the current-posts block.
//!
//! # Responsibility
//! - Define the item projection read from the content store.
//! - Define the time window that selects "recent" items.
//!
//! # Invariants
//! - Items are never mutated by the query path.
//! - Windows are inclusive on both ends.

pub mod item;
pub mod window;

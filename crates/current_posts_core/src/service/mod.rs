//! Use-case services over the item store.
//!
//! # Responsibility
//! - Turn a point in time into a recent-items query.
//! - Keep block rendering decoupled from storage details.

pub mod recent_items;

//! Item store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the read contract the recent-items query depends on.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Writes validate items before touching SQL.
//! - Reads reject invalid persisted rows instead of masking them.

pub mod item_repo;

//! Block hooks, rendering and registration.
//!
//! # Responsibility
//! - Describe and render the current-posts block through an explicit trait.
//! - Register block modules with an in-process host registry.
//!
//! # Invariants
//! - Hooks are reached through named trait methods, never by string-built
//!   function names.
//! - Block content is only produced for viewers with `access content`.

pub mod current_posts;
pub mod module;
pub mod registry;
pub mod render;

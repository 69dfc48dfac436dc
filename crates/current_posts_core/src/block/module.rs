//! Hook contract between the host and one block-providing module.

use crate::access::AccessPolicy;
use crate::block::render::BlockContent;
use crate::service::recent_items::RecentItemsError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// How the host may cache a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Never cache.
    NoCache,
    /// One cached copy per viewer role set.
    PerRole,
}

/// Admin-facing declaration of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockInfo {
    /// Label shown in block listings.
    pub info: String,
    pub cache: CachePolicy,
}

/// Rendered block handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockView {
    pub subject: String,
    /// `None` when the viewer may not see the block body.
    pub content: Option<BlockContent>,
}

/// Hooks one module exposes to the host.
pub trait BlockModule {
    /// Machine name of the module.
    fn module_id(&self) -> &str;

    /// Help text for one admin help page key.
    fn help_for(&self, page_key: &str) -> Option<String>;

    /// Blocks provided by this module, keyed by delta.
    fn describe_blocks(&self) -> BTreeMap<String, BlockInfo>;

    /// Renders one block for the current viewer at instant `now`.
    ///
    /// Returns `Ok(None)` for a delta this module does not provide.
    fn view_block(
        &self,
        delta: &str,
        access: &dyn AccessPolicy,
        now: DateTime<Utc>,
    ) -> Result<Option<BlockView>, RecentItemsError>;
}

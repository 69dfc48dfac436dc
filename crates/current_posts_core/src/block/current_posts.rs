//! The current-posts block module.
//!
//! # Responsibility
//! - Answer the module help page.
//! - Declare the `current_posts` block.
//! - Render links to recently published items.
//!
//! # Invariants
//! - The subject is always set, even when content is withheld.
//! - Item queries only run for viewers with `access content`.

use crate::access::{AccessPolicy, PERMISSION_ACCESS_CONTENT};
use crate::block::module::{BlockInfo, BlockModule, BlockView, CachePolicy};
use crate::block::render::{escape_html, render_block};
use crate::i18n::{MessageId, Translate};
use crate::repo::item_repo::ItemRepository;
use crate::service::recent_items::{RecentItemsError, RecentItemsService};
use chrono::{DateTime, Local, TimeZone, Utc};
use log::{debug, info};
use std::collections::BTreeMap;

/// Machine name of this module.
pub const MODULE_ID: &str = "current_posts";
/// Delta of the single block this module provides.
pub const BLOCK_DELTA: &str = "current_posts";
/// Admin help page answered by this module.
pub const HELP_PAGE_KEY: &str = "admin/help#current_posts";

/// Recent-posts block bound to one item store, message table and site zone.
///
/// `Z` decides which calendar day "today" is when computing the window.
pub struct CurrentPostsModule<R: ItemRepository, T: Translate, Z: TimeZone = Local> {
    service: RecentItemsService<R>,
    messages: T,
    zone: Z,
}

impl<R: ItemRepository, T: Translate> CurrentPostsModule<R, T, Local> {
    /// Creates the module using the process-local time zone.
    pub fn new(repo: R, messages: T) -> Self {
        Self::with_zone(repo, messages, Local)
    }
}

impl<R: ItemRepository, T: Translate, Z: TimeZone> CurrentPostsModule<R, T, Z> {
    pub fn with_zone(repo: R, messages: T, zone: Z) -> Self {
        Self {
            service: RecentItemsService::new(repo),
            messages,
            zone,
        }
    }

    pub fn service(&self) -> &RecentItemsService<R> {
        &self.service
    }
}

impl<R: ItemRepository, T: Translate, Z: TimeZone> BlockModule for CurrentPostsModule<R, T, Z> {
    fn module_id(&self) -> &str {
        MODULE_ID
    }

    fn help_for(&self, page_key: &str) -> Option<String> {
        match page_key {
            HELP_PAGE_KEY => Some(format!(
                "<p>{}</p>",
                escape_html(&self.messages.translate(MessageId::HelpText))
            )),
            _ => None,
        }
    }

    fn describe_blocks(&self) -> BTreeMap<String, BlockInfo> {
        BTreeMap::from([(
            BLOCK_DELTA.to_string(),
            BlockInfo {
                info: self.messages.translate(MessageId::BlockInfo),
                cache: CachePolicy::PerRole,
            },
        )])
    }

    fn view_block(
        &self,
        delta: &str,
        access: &dyn AccessPolicy,
        now: DateTime<Utc>,
    ) -> Result<Option<BlockView>, RecentItemsError> {
        if delta != BLOCK_DELTA {
            return Ok(None);
        }

        let subject = self.messages.translate(MessageId::BlockSubject);
        if !access.has_permission(PERMISSION_ACCESS_CONTENT) {
            debug!("event=block_view module=block status=denied delta={delta}");
            return Ok(Some(BlockView {
                subject,
                content: None,
            }));
        }

        let items = self
            .service
            .fetch_recent_items(&now.with_timezone(&self.zone))?;
        info!(
            "event=block_view module=block status=ok delta={delta} item_count={}",
            items.len()
        );
        Ok(Some(BlockView {
            subject,
            content: Some(render_block(&items, &self.messages)),
        }))
    }
}

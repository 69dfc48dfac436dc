//! Current-posts block: links to content published in the last two days.
//!
//! The host framework supplies storage, permissions and translations through
//! the traits exported here; this crate owns the query window, the item
//! store schema and the block rendering.

pub mod access;
pub mod block;
pub mod config;
pub mod db;
pub mod i18n;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use access::{AccessPolicy, PermissionSet, PERMISSION_ACCESS_CONTENT};
pub use block::current_posts::{CurrentPostsModule, BLOCK_DELTA, HELP_PAGE_KEY, MODULE_ID};
pub use block::module::{BlockInfo, BlockModule, BlockView, CachePolicy};
pub use block::registry::{ModuleRegistry, RegisteredBlock, RegistryError};
pub use block::render::{render_block, BlockContent, DisplayLink};
pub use config::{ConfigError, ModuleConfig};
pub use i18n::{CatalogError, MessageCatalog, MessageId, SourceText, Translate};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::item::{Item, ItemId, ItemValidationError};
pub use model::window::{TimeWindow, RECENT_WINDOW_DAYS};
pub use repo::item_repo::{ItemRepository, RepoError, RepoResult, SqliteItemRepository};
pub use service::recent_items::{RecentItemsError, RecentItemsService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

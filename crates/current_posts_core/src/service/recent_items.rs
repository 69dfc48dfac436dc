//! Recent-items query service.
//!
//! # Responsibility
//! - Compute the recent window for a caller-supplied `now`.
//! - Fetch published items in that window, newest first.
//!
//! # Invariants
//! - The service is read-only and keeps no state between calls.
//! - Storage failures surface as `StorageUnavailable`; nothing is retried.
//! - An empty result is a normal outcome, not an error.

use crate::model::item::Item;
use crate::model::window::TimeWindow;
use crate::repo::item_repo::{ItemRepository, RepoError};
use chrono::{DateTime, Local, TimeZone};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Failure of the recent-items query.
#[derive(Debug)]
pub enum RecentItemsError {
    /// The item store could not answer the query.
    StorageUnavailable(RepoError),
}

impl Display for RecentItemsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "item storage unavailable: {err}"),
        }
    }
}

impl Error for RecentItemsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
        }
    }
}

impl From<RepoError> for RecentItemsError {
    fn from(value: RepoError) -> Self {
        Self::StorageUnavailable(value)
    }
}

/// Query facade over an item repository.
pub struct RecentItemsService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> RecentItemsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns published items created between local midnight two days
    /// before `now` and `now` itself, newest first.
    pub fn fetch_recent_items<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Result<Vec<Item>, RecentItemsError> {
        let window = TimeWindow::recent(now);
        let started_at = Instant::now();

        match self.repo.list_published_between(&window) {
            Ok(items) => {
                debug!(
                    "event=recent_items_fetch module=service status=ok window_start={} window_end={} count={} duration_ms={}",
                    window.start.to_rfc3339(),
                    window.end.to_rfc3339(),
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(items)
            }
            Err(err) => {
                error!(
                    "event=recent_items_fetch module=service status=error window_start={} window_end={} error_code=storage_unavailable error={err}",
                    window.start.to_rfc3339(),
                    window.end.to_rfc3339()
                );
                Err(err.into())
            }
        }
    }

    /// Same as [`Self::fetch_recent_items`] using the wall clock in the
    /// process-local time zone.
    pub fn fetch_current_items(&self) -> Result<Vec<Item>, RecentItemsError> {
        self.fetch_recent_items(&Local::now())
    }
}

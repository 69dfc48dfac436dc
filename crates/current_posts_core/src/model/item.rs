//! Content item projection.

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of one content item in the host store.
pub type ItemId = i64;

/// Read-only projection of one content record.
///
/// `created_at` is stored with microsecond precision; finer instants are
/// rejected on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub published: bool,
}

impl Item {
    /// Builds a published item.
    pub fn published(id: ItemId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            created_at,
            published: true,
        }
    }

    /// Builds an unpublished item.
    pub fn draft(id: ItemId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            published: false,
            ..Self::published(id, title, created_at)
        }
    }

    /// Checks write-side invariants.
    ///
    /// # Errors
    /// - `NonPositiveId` when `id <= 0`.
    /// - `BlankTitle` when the title is empty after trimming.
    /// - `SubMicrosecondTimestamp` when `created_at` carries nanoseconds the
    ///   store cannot keep.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id <= 0 {
            return Err(ItemValidationError::NonPositiveId(self.id));
        }
        if self.title.trim().is_empty() {
            return Err(ItemValidationError::BlankTitle(self.id));
        }
        if self.created_at.nanosecond() % 1_000 != 0 {
            return Err(ItemValidationError::SubMicrosecondTimestamp(self.id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    NonPositiveId(ItemId),
    BlankTitle(ItemId),
    SubMicrosecondTimestamp(ItemId),
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId(id) => write!(f, "item id must be positive, got {id}"),
            Self::BlankTitle(id) => write!(f, "item {id} has a blank title"),
            Self::SubMicrosecondTimestamp(id) => {
                write!(f, "item {id} created_at is finer than one microsecond")
            }
        }
    }
}

impl Error for ItemValidationError {}

#[cfg(test)]
mod tests {
    use super::{Item, ItemValidationError};
    use chrono::{TimeDelta, TimeZone, Utc};

    #[test]
    fn draft_is_not_published() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let item = Item::draft(4, "Draft", created);
        assert!(!item.published);
        assert_eq!(item.title, "Draft");
    }

    #[test]
    fn validate_rejects_blank_title_and_bad_id() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(
            Item::published(1, "   ", created).validate(),
            Err(ItemValidationError::BlankTitle(1))
        );
        assert_eq!(
            Item::published(0, "Title", created).validate(),
            Err(ItemValidationError::NonPositiveId(0))
        );
        assert!(Item::published(1, "Title", created).validate().is_ok());
    }

    #[test]
    fn validate_rejects_sub_microsecond_created_at() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(
            Item::published(2, "Title", created + TimeDelta::nanoseconds(500)).validate(),
            Err(ItemValidationError::SubMicrosecondTimestamp(2))
        );
        assert!(Item::published(2, "Title", created + TimeDelta::microseconds(3))
            .validate()
            .is_ok());
    }
}

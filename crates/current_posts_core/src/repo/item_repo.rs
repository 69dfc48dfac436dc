//! Item repository contract and SQLite implementation.

use crate::db::DbError;
use crate::model::item::{Item, ItemId, ItemValidationError};
use crate::model::window::TimeWindow;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    title,
    created_at,
    published
FROM items";

const REQUIRED_ITEM_COLUMNS: &[&str] = &["id", "title", "created_at", "published"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    NotFound(ItemId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract over the item projection.
pub trait ItemRepository {
    /// Persists one item and returns its id.
    fn create_item(&self, item: &Item) -> RepoResult<ItemId>;
    /// Loads one item by id regardless of publication state.
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    /// Returns published items created inside `window`, newest first.
    ///
    /// Equal `created_at` values are ordered by descending id.
    fn list_published_between(&self, window: &TimeWindow) -> RepoResult<Vec<Item>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Wraps a migrated connection after checking the `items` table shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_items_table_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, item: &Item) -> RepoResult<ItemId> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO items (id, title, created_at, published)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                item.id,
                item.title.as_str(),
                item.created_at.timestamp_micros(),
                i64::from(item.published),
            ],
        )?;

        Ok(item.id)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn list_published_between(&self, window: &TimeWindow) -> RepoResult<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE published = 1
               AND created_at BETWEEN ?1 AND ?2
             ORDER BY created_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query(params![
            window.start.timestamp_micros(),
            window.end.timestamp_micros(),
        ])?;

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let id: ItemId = row.get("id")?;

    let created_micros: i64 = row.get("created_at")?;
    let created_at = DateTime::<Utc>::from_timestamp_micros(created_micros).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "created_at `{created_micros}` out of range for item {id}"
        ))
    })?;

    let published = match row.get::<_, i64>("published")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid published flag `{other}` for item {id}"
            )));
        }
    };

    Ok(Item {
        id,
        title: row.get("title")?,
        created_at,
        published,
    })
}

fn ensure_items_table_ready(conn: &Connection) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'items'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable("items"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(items);")?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(1)?);
    }

    for &column in REQUIRED_ITEM_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "items",
                column,
            });
        }
    }
    Ok(())
}

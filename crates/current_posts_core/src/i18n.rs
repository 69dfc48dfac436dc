//! Injected message lookup for user-facing strings.
//!
//! # Responsibility
//! - Name every user-facing string by a stable message id.
//! - Resolve ids against a caller-supplied table with source-text fallback.
//!
//! # Invariants
//! - Unknown message ids in a catalog are rejected at load time.
//! - A missing override always falls back to the English source text.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifiers for user-facing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageId {
    /// Admin label of the block in block listings.
    BlockInfo,
    /// Title shown above the rendered block.
    BlockSubject,
    /// Body shown when no recent items exist.
    NoPosts,
    /// Admin help page body.
    HelpText,
}

const ALL_MESSAGE_IDS: &[MessageId] = &[
    MessageId::BlockInfo,
    MessageId::BlockSubject,
    MessageId::NoPosts,
    MessageId::HelpText,
];

impl MessageId {
    /// Returns every known message id.
    pub fn all() -> &'static [MessageId] {
        ALL_MESSAGE_IDS
    }

    /// Key used in message tables.
    pub fn key(self) -> &'static str {
        match self {
            Self::BlockInfo => "block.info",
            Self::BlockSubject => "block.subject",
            Self::NoPosts => "block.empty",
            Self::HelpText => "help.current_posts",
        }
    }

    /// Untranslated English text.
    pub fn source_text(self) -> &'static str {
        match self {
            Self::BlockInfo | Self::BlockSubject => "Current posts",
            Self::NoPosts => "No posts available.",
            Self::HelpText => "Displays links to nodes created on this date",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        ALL_MESSAGE_IDS
            .iter()
            .copied()
            .find(|id| id.key() == key.trim())
    }
}

/// Resolves message ids into display text.
pub trait Translate {
    fn translate(&self, id: MessageId) -> String;
}

/// Identity lookup returning English source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceText;

impl Translate for SourceText {
    fn translate(&self, id: MessageId) -> String {
        id.source_text().to_string()
    }
}

/// Message table keyed by id with source-text fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    overrides: BTreeMap<MessageId, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text for one message id.
    pub fn with_override(mut self, id: MessageId, text: impl Into<String>) -> Self {
        self.overrides.insert(id, text.into());
        self
    }

    /// Builds a catalog from `key -> text` pairs.
    ///
    /// # Errors
    /// - `UnknownMessageKey` when a key names no known message.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for (key, text) in entries {
            let id = MessageId::parse(key)
                .ok_or_else(|| CatalogError::UnknownMessageKey(key.to_string()))?;
            catalog.overrides.insert(id, text.to_string());
        }
        Ok(catalog)
    }

    /// Parses a flat JSON object of `key -> text` pairs.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog =
            serde_json::from_str(json).map_err(|err| CatalogError::Parse(err.to_string()))?;
        Self::from_entries(raw.0.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl Translate for MessageCatalog {
    fn translate(&self, id: MessageId) -> String {
        self.overrides
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.source_text().to_string())
    }
}

#[derive(Deserialize)]
struct RawCatalog(BTreeMap<String, String>);

/// Message catalog load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownMessageKey(String),
    Parse(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMessageKey(key) => write!(f, "unknown message key `{key}`"),
            Self::Parse(message) => write!(f, "invalid message catalog: {message}"),
        }
    }
}

impl Error for CatalogError {}

//! Item list presentation for the current-posts block.
//!
//! # Invariants
//! - Rendering never filters or reorders its input.
//! - An empty input always renders the "no posts" message.
//! - Every label and attribute is HTML-escaped on output.

use crate::i18n::{MessageId, Translate};
use crate::model::item::{Item, ItemId};
use serde::Serialize;

/// Link path prefix for one item page.
pub const ITEM_PATH_PREFIX: &str = "node/";

/// One rendered entry of the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLink {
    pub label: String,
    /// Site-relative path, without leading slash.
    pub target: String,
}

impl DisplayLink {
    pub fn for_item(item: &Item) -> Self {
        Self {
            label: item.title.clone(),
            target: item_path(item.id),
        }
    }
}

/// Canonical site-relative path of one item.
pub fn item_path(id: ItemId) -> String {
    format!("{ITEM_PATH_PREFIX}{id}")
}

/// Body of the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BlockContent {
    Message(String),
    ItemList(Vec<DisplayLink>),
}

/// Maps query output to block content.
pub fn render_block(items: &[Item], messages: &impl Translate) -> BlockContent {
    if items.is_empty() {
        return BlockContent::Message(messages.translate(MessageId::NoPosts));
    }
    BlockContent::ItemList(items.iter().map(DisplayLink::for_item).collect())
}

impl BlockContent {
    /// Renders HTML, prefixing link targets with `base_path`.
    ///
    /// `base_path` is expected to end with `/`.
    pub fn to_html(&self, base_path: &str) -> String {
        match self {
            Self::Message(text) => escape_html(text),
            Self::ItemList(links) => render_item_list(links, base_path),
        }
    }
}

fn render_item_list(links: &[DisplayLink], base_path: &str) -> String {
    let last_index = links.len().saturating_sub(1);
    let mut html = String::from("<div class=\"item-list\"><ul>");
    for (index, link) in links.iter().enumerate() {
        let class = match (index == 0, index == last_index) {
            (true, true) => " class=\"first last\"",
            (true, false) => " class=\"first\"",
            (false, true) => " class=\"last\"",
            (false, false) => "",
        };
        html.push_str(&format!(
            "<li{class}><a href=\"{}\">{}</a></li>",
            escape_html(&format!("{base_path}{}", link.target)),
            escape_html(&link.label)
        ));
    }
    html.push_str("</ul></div>");
    html
}

/// Escapes text for HTML body and double-quoted attribute contexts.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_html, render_block, BlockContent, DisplayLink};
    use crate::i18n::{MessageCatalog, MessageId, SourceText};
    use crate::model::item::Item;
    use chrono::{TimeZone, Utc};

    fn sample_items() -> Vec<Item> {
        let created = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        vec![
            Item::published(7, "Newest", created),
            Item::published(3, "Older", created),
        ]
    }

    #[test]
    fn empty_items_render_no_posts_message_every_time() {
        for _ in 0..3 {
            assert_eq!(
                render_block(&[], &SourceText),
                BlockContent::Message("No posts available.".to_string())
            );
        }
    }

    #[test]
    fn empty_message_is_localized() {
        let catalog = MessageCatalog::new().with_override(MessageId::NoPosts, "Rien de neuf.");
        assert_eq!(
            render_block(&[], &catalog),
            BlockContent::Message("Rien de neuf.".to_string())
        );
    }

    #[test]
    fn items_render_links_in_input_order() {
        let content = render_block(&sample_items(), &SourceText);
        assert_eq!(
            content,
            BlockContent::ItemList(vec![
                DisplayLink {
                    label: "Newest".to_string(),
                    target: "node/7".to_string(),
                },
                DisplayLink {
                    label: "Older".to_string(),
                    target: "node/3".to_string(),
                },
            ])
        );
    }

    #[test]
    fn item_list_html_marks_first_and_last_entries() {
        let html = render_block(&sample_items(), &SourceText).to_html("/");
        assert_eq!(
            html,
            "<div class=\"item-list\"><ul>\
             <li class=\"first\"><a href=\"/node/7\">Newest</a></li>\
             <li class=\"last\"><a href=\"/node/3\">Older</a></li>\
             </ul></div>"
        );
    }

    #[test]
    fn single_entry_is_both_first_and_last() {
        let created = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let html = render_block(&[Item::published(1, "Only", created)], &SourceText)
            .to_html("/site/");
        assert!(html.contains("<li class=\"first last\"><a href=\"/site/node/1\">Only</a></li>"));
    }

    #[test]
    fn html_output_escapes_titles() {
        let created = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let html = render_block(
            &[Item::published(2, "<script>\"x\" & 'y'</script>", created)],
            &SourceText,
        )
        .to_html("/");
        assert!(html.contains("&lt;script&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn escape_html_leaves_plain_text_untouched() {
        assert_eq!(escape_html("No posts available."), "No posts available.");
    }
}

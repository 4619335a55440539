//! Ingestion pipeline: raw text to tagged knowledge items.

use chrono::Utc;
use tracing::debug;

use super::tagger::classify;
use super::types::{KnowledgeItem, SourceType};

/// Maximum number of lines turned into items per batch. Later lines are dropped.
pub const MAX_ITEMS_PER_BATCH: usize = 50;

/// Line boundaries: `\n`, `\r`, vertical tab, form feed, the file/group/record
/// separators, NEL and the Unicode line and paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Extract knowledge items from raw text, stamped with the current time.
///
/// Blank input yields an empty list. Appending the items to the knowledge
/// store is the caller's job.
pub fn extract(source: SourceType, raw: &str) -> Vec<KnowledgeItem> {
    extract_at(source, raw, Utc::now().timestamp_millis())
}

/// Extract with an explicit batch timestamp (milliseconds since the epoch).
pub fn extract_at(source: SourceType, raw: &str, batch_millis: i64) -> Vec<KnowledgeItem> {
    let items: Vec<KnowledgeItem> = raw
        .split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_ITEMS_PER_BATCH)
        .enumerate()
        .map(|(idx, line)| KnowledgeItem {
            id: format!("{}-{}-{}", source, batch_millis, idx),
            source,
            tag: classify(line),
            text: line.to_string(),
        })
        .collect();

    debug!(source = %source, items = items.len(), "Extracted knowledge batch");
    items
}

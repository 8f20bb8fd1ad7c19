//! Paged, append-only comment logs
//!
//! A page is a run of records, each a fixed 48-byte prefix (index, author,
//! timestamp) followed by NUL-terminated text. Pages are filled front to back
//! and the unwritten tail is zero, so decoding a page stops quietly at the
//! first slot that cannot hold a complete record.

use ivy_config::comments::{COMMENT_MAX_LEN, RECORD_PREFIX_LEN};
use ivy_types::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reader::ByteReader;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub index: u64,
    pub user: Address,
    /// Unix seconds
    pub timestamp: u64,
    pub text: String,
}

impl Comment {
    /// Longest text, in characters, the program accepts
    pub const MAX_LEN: usize = COMMENT_MAX_LEN;

    pub fn is_within_limit(&self) -> bool {
        self.text.chars().count() <= Self::MAX_LEN
    }
}

/// Per-page framing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLayout {
    /// Bytes skipped at the start of every page before the first record
    pub header_len: usize,
}

impl PageLayout {
    pub const fn new(header_len: usize) -> Self {
        Self { header_len }
    }
}

/// Decode every complete record in one page
pub fn decode_page(page: &[u8], layout: &PageLayout) -> Vec<Comment> {
    let mut comments = Vec::new();
    if page.len() < layout.header_len {
        debug!(
            page_len = page.len(),
            header_len = layout.header_len,
            "page shorter than its header"
        );
        return comments;
    }

    let mut reader = ByteReader::at(page, layout.header_len);
    while let Some(comment) = next_comment(&mut reader) {
        comments.push(comment);
    }
    comments
}

/// Decode pages in order and concatenate their records
pub fn decode_paged_log<P: AsRef<[u8]>>(pages: &[P], layout: &PageLayout) -> Vec<Comment> {
    pages
        .iter()
        .flat_map(|page| decode_page(page.as_ref(), layout))
        .collect()
}

fn next_comment(reader: &mut ByteReader<'_>) -> Option<Comment> {
    let start = reader.offset();
    if reader.remaining() < RECORD_PREFIX_LEN {
        debug!(offset = start, remaining = reader.remaining(), "page end");
        return None;
    }

    // The prefix fits, so these reads cannot fail
    let index = reader.read_u64().ok()?;
    let user = reader.read_address().ok()?;
    let timestamp = reader.read_u64().ok()?;
    if timestamp == 0 {
        debug!(offset = start, "unwritten slot");
        return None;
    }

    let tail = reader.clone().read_bytes(reader.remaining()).ok()?;
    let Some(text_len) = tail.iter().position(|&b| b == 0) else {
        debug!(offset = start, index, "unterminated comment text");
        return None;
    };
    reader.skip(text_len + 1).ok()?;

    let comment = Comment {
        index,
        user,
        timestamp,
        text: String::from_utf8_lossy(&tail[..text_len]).into_owned(),
    };
    if !comment.is_within_limit() {
        debug!(index, "comment longer than the program allows");
    }
    Some(comment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: u64, user: u8, timestamp: u64, text: &str) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&index.to_le_bytes());
        bytes.extend_from_slice(&[user; 32]);
        bytes.extend_from_slice(&timestamp.to_le_bytes());
        bytes.extend_from_slice(text.as_bytes());
        bytes.push(0);
        bytes
    }

    #[test]
    fn test_two_records_then_zero_tail() {
        let mut page = record(0, 1, 1_700_000_000, "first");
        page.extend(record(1, 2, 1_700_000_060, "gm"));
        page.extend([0u8; 5]);

        let comments = decode_page(&page, &PageLayout::default());
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "first");
        assert_eq!(comments[1].index, 1);
        assert_eq!(comments[1].user, Address::new([2; 32]));
        assert_eq!(comments[1].timestamp, 1_700_000_060);
    }

    #[test]
    fn test_unterminated_record_dropped() {
        let mut page = record(0, 1, 10, "kept");
        let mut partial = record(1, 1, 11, "cut off");
        partial.pop();
        page.extend(partial);

        let comments = decode_page(&page, &PageLayout::default());
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "kept");
    }

    #[test]
    fn test_zero_filled_slot_stops_page() {
        let mut page = record(0, 1, 10, "a");
        page.extend([0u8; 128]);
        assert_eq!(decode_page(&page, &PageLayout::default()).len(), 1);
    }

    #[test]
    fn test_empty_text() {
        let page = record(4, 9, 99, "");
        let comments = decode_page(&page, &PageLayout::default());
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "");
    }

    #[test]
    fn test_header_skipped_per_page() {
        let mut first = vec![0xff; 8];
        first.extend(record(0, 1, 10, "one"));
        let mut second = vec![0xee; 8];
        second.extend(record(1, 1, 11, "two"));
        second.extend(record(2, 3, 12, "three"));

        let comments = decode_paged_log(&[first, second], &PageLayout::new(8));
        let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn test_length_limit() {
        let long = "x".repeat(Comment::MAX_LEN + 1);
        let page = record(0, 1, 10, &long);
        let comments = decode_page(&page, &PageLayout::default());
        // decoded regardless, only flagged
        assert_eq!(comments[0].text.len(), 281);
        assert!(!comments[0].is_within_limit());
    }

    #[test]
    fn test_short_pages() {
        assert!(decode_page(&[], &PageLayout::default()).is_empty());
        assert!(decode_page(&[1, 2, 3], &PageLayout::new(8)).is_empty());
        assert!(decode_page(&[1u8; 47], &PageLayout::default()).is_empty());
    }
}

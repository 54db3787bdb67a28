//! Rank buckets for search results.
//!
//! Lower is better. The buckets, in order:
//! 0. the glyph is exactly the raw query (pasted emoji)
//! 1. the glyph contains the raw query
//! 2. the English or localized name starts with the first query token
//! 3. everything else: `10 + p`, where `p` is the largest first-occurrence
//!    offset of any query token in the search index (UTF-16 units)

use crate::interface::EmojiMeta;

pub const EXACT_GLYPH: usize = 0;
pub const GLYPH_CONTAINS: usize = 1;
pub const NAME_PREFIX: usize = 2;
pub const POSITION_BASE: usize = 10;
/// Used when no token occurs in the search index (glyph-only match)
pub const NO_POSITION: usize = 9999;

/// Offset of the first occurrence of `needle` in `haystack`, in UTF-16 units
fn utf16_position(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].encode_utf16().count())
}

/// Largest first-occurrence offset across all tokens, ignoring tokens that
/// don't occur at all.
pub fn rightmost_token_position(search_index: &str, tokens: &[String]) -> Option<usize> {
    tokens
        .iter()
        .filter_map(|t| utf16_position(search_index, t))
        .max()
}

fn name_starts_with(name: Option<&str>, token: &str) -> bool {
    name.map_or(false, |n| n.to_lowercase().starts_with(token))
}

/// Rank a candidate that already passed `search::matches`.
///
/// `raw` is the trimmed query as typed; `tokens` its lowercase whitespace split.
pub fn score(emoji: &str, meta: Option<&EmojiMeta>, raw: &str, tokens: &[String]) -> usize {
    if emoji == raw {
        return EXACT_GLYPH;
    }
    if emoji.contains(raw) {
        return GLYPH_CONTAINS;
    }

    let first = tokens.first().map(String::as_str).unwrap_or("");
    if let Some(meta) = meta {
        if name_starts_with(Some(&meta.name), first)
            || name_starts_with(meta.localized_name.as_deref(), first)
        {
            return NAME_PREFIX;
        }
    }

    let search_index = meta.map(|m| m.search.as_str()).unwrap_or("");
    POSITION_BASE + rightmost_token_position(search_index, tokens).unwrap_or(NO_POSITION)
}

//! Client-side search over the generated table
//!
//! The table carries a precomputed lowercase `search` string per emoji, so a
//! query is a substring scan with no tokenization of the data at query time.
//! An empty query is not a search: it yields the category-partitioned view.

use crate::interface::{EmojiMeta, EmojiTable};
use crate::ranking;
use crate::table::utf16_cmp;

/// A parsed user query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Trimmed, case preserved (compared against glyphs)
    pub raw: String,
    /// Lowercase whitespace-separated tokens
    pub tokens: Vec<String>,
}

impl Query {
    pub fn parse(input: &str) -> Self {
        let raw = input.trim().to_string();
        let tokens = raw.to_lowercase().split_whitespace().map(str::to_string).collect();
        Self { raw, tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// One category block of the browse view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub emojis: &'a [String],
}

/// What the grid should display for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView<'a> {
    /// No query: every category in table order
    Categories(Vec<CategorySection<'a>>),
    /// Flat ranked results
    Results(Vec<&'a str>),
}

impl<'a> SearchView<'a> {
    pub fn is_searching(&self) -> bool {
        matches!(self, SearchView::Results(_))
    }

    /// Number of emoji displayed
    pub fn total(&self) -> usize {
        match self {
            SearchView::Categories(sections) => sections.iter().map(|s| s.emojis.len()).sum(),
            SearchView::Results(results) => results.len(),
        }
    }
}

/// A candidate matches when its glyph contains any token (pasted emoji), or
/// when every token occurs in its search index.
pub fn matches(emoji: &str, meta: Option<&EmojiMeta>, query: &Query) -> bool {
    if query.tokens.iter().any(|t| emoji.contains(t.as_str())) {
        return true;
    }
    let Some(meta) = meta else {
        return false;
    };
    let haystack = meta.search.to_lowercase();
    query.tokens.iter().all(|t| haystack.contains(t.as_str()))
}

/// Matching emoji, best rank first, ties in UTF-16 glyph order
pub fn ranked_results<'a>(table: &'a EmojiTable, query: &Query) -> Vec<&'a str> {
    let mut scored: Vec<(usize, &'a str)> = table
        .all_emojis()
        .into_iter()
        .filter_map(|emoji| {
            let meta = table.meta(emoji);
            if !matches(emoji, meta, query) {
                return None;
            }
            Some((ranking::score(emoji, meta, &query.raw, &query.tokens), emoji))
        })
        .collect();

    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| utf16_cmp(a.1, b.1)));
    scored.into_iter().map(|(_, emoji)| emoji).collect()
}

pub fn category_sections(table: &EmojiTable) -> Vec<CategorySection<'_>> {
    table
        .categories
        .iter()
        .map(|slug| CategorySection {
            slug,
            title: table.category_meta.get(slug).map_or(slug.as_str(), |m| m.title.as_str()),
            emojis: table.emojis.get(slug).map_or(&[][..], Vec::as_slice),
        })
        .collect()
}

/// Run a query against the table
pub fn search<'a>(table: &'a EmojiTable, input: &str) -> SearchView<'a> {
    let query = Query::parse(input);
    if query.is_empty() {
        return SearchView::Categories(category_sections(table));
    }
    let results = ranked_results(table, &query);
    tracing::trace!(query = %query.raw, results = results.len(), "search");
    SearchView::Results(results)
}

//! Browser view state: which section is highlighted, and the tab strip
//!
//! Visibility callbacks arrive independently of typing. While a query is
//! active the highlight is pinned to the search tab and those callbacks are
//! ignored, so a late scroll event can't pull the view out of search mode.

use crate::interface::EmojiTable;
use crate::search::SearchView;

pub const RECENTS_SECTION: &str = "recents";
pub const SEARCH_SECTION: &str = "search";
const SECTION_PREFIX: &str = "sec-";

/// Display order for the hub page
pub const CATEGORY_ORDER: &[&str] = &[
    "smileys-and-emotion",
    "people-and-body",
    "animals-and-nature",
    "food-and-drink",
    "activities",
    "travel-and-places",
    "objects",
    "symbols",
    "flags",
];

pub fn section_id(slug: &str) -> String {
    format!("{}{}", SECTION_PREFIX, slug)
}

pub fn slug_from_section_id(id: &str) -> Option<&str> {
    id.strip_prefix(SECTION_PREFIX)
}

/// `CATEGORY_ORDER` restricted to non-empty categories present in the table
pub fn ordered_categories(table: &EmojiTable) -> Vec<&str> {
    CATEGORY_ORDER
        .iter()
        .copied()
        .filter(|slug| table.emojis.get(*slug).map_or(false, |l| !l.is_empty()))
        .collect()
}

/// A section currently intersecting the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSection<'a> {
    /// DOM id, `sec-{slug}`
    pub id: &'a str,
    /// Distance from the viewport top
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserView {
    query: String,
    active: String,
}

impl Default for BrowserView {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserView {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            active: RECENTS_SECTION.to_string(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn is_searching(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn set_query(&mut self, query: &str) {
        let was_searching = self.is_searching();
        self.query = query.to_string();
        if self.is_searching() {
            self.active = SEARCH_SECTION.to_string();
        } else if was_searching {
            self.active = RECENTS_SECTION.to_string();
        }
    }

    /// Visibility callback. The topmost visible section becomes active.
    /// Returns whether the highlight changed.
    pub fn on_sections_visible(&mut self, visible: &[VisibleSection<'_>]) -> bool {
        if self.is_searching() {
            return false;
        }
        let top = visible
            .iter()
            .filter(|s| !s.top.is_nan())
            .min_by(|a, b| a.top.total_cmp(&b.top));
        let Some(slug) = top.and_then(|s| slug_from_section_id(s.id)) else {
            return false;
        };
        if self.active == slug {
            return false;
        }
        self.active = slug.to_string();
        true
    }

    /// Tab click. Ignored in search mode.
    pub fn jump_to(&mut self, id: &str) -> bool {
        if self.is_searching() {
            return false;
        }
        self.active = id.to_string();
        true
    }
}

/// "12345" -> "12,345"
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Tab strip for the current view: one results tab while searching,
/// otherwise recents followed by every category.
pub fn tabs(table: &EmojiTable, view: &SearchView<'_>) -> Vec<Tab> {
    match view {
        SearchView::Results(results) => vec![Tab {
            id: SEARCH_SECTION.to_string(),
            label: format!("검색 결과 ({})", group_thousands(results.len())),
        }],
        SearchView::Categories(sections) => {
            let mut tabs = vec![Tab { id: RECENTS_SECTION.to_string(), label: "최근".to_string() }];
            tabs.extend(sections.iter().map(|s| Tab {
                id: s.slug.to_string(),
                label: table
                    .category_meta
                    .get(s.slug)
                    .map_or_else(|| s.slug.to_string(), |m| m.title.clone()),
            }));
            tabs
        }
    }
}

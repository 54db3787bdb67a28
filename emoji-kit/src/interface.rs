//! Emoji Kit Interface Definition
//!
//! This file defines the types shared between the data generator and the
//! browser front end. It acts as the source of truth for the generated table
//! layout: the JSON artifact is a direct serde rendering of [`EmojiTable`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// Display strings for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeta {
    pub title: String,
    pub description: String,
}

/// Searchable metadata for a single emoji
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiMeta {
    /// English CLDR short name, e.g. "grinning face"
    pub name: String,
    /// Lowercase word tokens from name, group and subgroup
    pub keywords: Vec<String>,
    #[serde(rename = "koName", default, skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,
    #[serde(rename = "koKeywords", default, skip_serializing_if = "Option::is_none")]
    pub localized_keywords: Option<Vec<String>>,
    /// Category slug
    pub category: String,
    pub subgroup: String,
    /// Precomputed lowercase haystack for substring search
    pub search: String,
}

/// The generated lookup table.
///
/// Every map is a `BTreeMap` so serialization order never depends on hashing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiTable {
    /// Registry the table was generated from (URL or path)
    pub source: String,
    /// Category slugs, sorted
    pub categories: Vec<String>,
    pub category_meta: BTreeMap<String, CategoryMeta>,
    /// Category slug -> emoji list in UTF-16 code-unit order
    pub emojis: BTreeMap<String, Vec<String>>,
    pub emoji_meta: BTreeMap<String, EmojiMeta>,
}

impl EmojiTable {
    /// Parse a table previously written by `artifact::render_json`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Flattened, deduplicated list of every emoji, in category order
    pub fn all_emojis(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.categories
            .iter()
            .filter_map(|slug| self.emojis.get(slug))
            .flatten()
            .map(String::as_str)
            .filter(|e| seen.insert(*e))
            .collect()
    }

    pub fn meta(&self, emoji: &str) -> Option<&EmojiMeta> {
        self.emoji_meta.get(emoji)
    }

    pub fn len(&self) -> usize {
        self.emoji_meta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emoji_meta.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Fatal errors while building the table
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Parsed 0 emojis. Check URL/version or parser.")]
    EmptyRegistry,
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from a key-value persistence backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed store file: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Clipboard write failures. Never surfaced to callers of `copy_emoji`.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard permission denied")]
    PermissionDenied,
    #[error("Clipboard unsupported")]
    Unsupported,
    #[error("Clipboard write failed: {0}")]
    Write(String),
}

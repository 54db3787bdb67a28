//! Intermediate records that only live for one generation run
//!
//! These never reach the generated artifact directly; `table::build_table`
//! joins them into the types in `interface`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// REGISTRY RECORDS
// ─────────────────────────────────────────────────────────────────────────────

/// Qualification status column of `emoji-test.txt`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualificationStatus {
    FullyQualified,
    MinimallyQualified,
    Unqualified,
    Component,
}

impl QualificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualificationStatus::FullyQualified => "fully-qualified",
            QualificationStatus::MinimallyQualified => "minimally-qualified",
            QualificationStatus::Unqualified => "unqualified",
            QualificationStatus::Component => "component",
        }
    }
}

impl FromStr for QualificationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fully-qualified" => Ok(QualificationStatus::FullyQualified),
            "minimally-qualified" => Ok(QualificationStatus::MinimallyQualified),
            "unqualified" => Ok(QualificationStatus::Unqualified),
            "component" => Ok(QualificationStatus::Component),
            _ => Err(()),
        }
    }
}

impl fmt::Display for QualificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One data line of the registry, after header state has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub group: String,
    pub subgroup: String,
    pub codepoints: Vec<u32>,
    /// Decoded from `codepoints`, never taken from the comment glyph
    pub emoji: String,
    pub name: String,
    pub status: QualificationStatus,
}

// ─────────────────────────────────────────────────────────────────────────────
// CLDR ANNOTATIONS
// ─────────────────────────────────────────────────────────────────────────────

/// Localized name and keywords for one emoji
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotation {
    /// The `type="tts"` label
    pub name: Option<String>,
    pub keywords: Vec<String>,
}

impl Annotation {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.keywords.is_empty()
    }

    /// Append keywords not already present, keeping first-seen order
    pub(crate) fn extend_keywords<I: IntoIterator<Item = String>>(&mut self, keywords: I) {
        for kw in keywords {
            if !self.keywords.contains(&kw) {
                self.keywords.push(kw);
            }
        }
    }
}

/// Emoji character (as written in the CLDR `cp` attribute) -> annotation
pub type AnnotationMap = BTreeMap<String, Annotation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_names() {
        for status in [
            QualificationStatus::FullyQualified,
            QualificationStatus::MinimallyQualified,
            QualificationStatus::Unqualified,
            QualificationStatus::Component,
        ] {
            assert_eq!(status.as_str().parse::<QualificationStatus>(), Ok(status));
        }
        assert_eq!("Fully-Qualified".parse(), Ok(QualificationStatus::FullyQualified));
        assert!("qualified".parse::<QualificationStatus>().is_err());
    }

    #[test]
    fn test_extend_keywords_dedups() {
        let mut a = Annotation::default();
        a.extend_keywords(vec!["웃음".to_string(), "얼굴".to_string()]);
        a.extend_keywords(vec!["얼굴".to_string(), "행복".to_string()]);
        assert_eq!(a.keywords, vec!["웃음", "얼굴", "행복"]);
    }
}

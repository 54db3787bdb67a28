//! Parser for the Unicode `emoji-test.txt` registry
//!
//! The file is a flat list of data lines interleaved with `# group:` and
//! `# subgroup:` header comments. Headers apply to every following data line
//! until overridden, so parsing is a single pass driven by [`ScanState`].
//!
//! ```text
//! # group: Smileys & Emotion
//! # subgroup: face-smiling
//! 1F600     ; fully-qualified     # 😀 E1.0 grinning face
//! ```

use crate::interface::BuildError;
use crate::models::{QualificationStatus, SourceRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// `<hex codepoints> ; <status> # <comment>`
static DATA_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9A-Fa-f ]+)\s*;\s*([A-Za-z-]+)\s*#\s*(.+)$").unwrap()
});

/// Version tag like `E15.1` followed by the descriptive name
static VERSION_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bE\d+(?:\.\d+)?\b\s+(.+)$").unwrap()
});

const GROUP_HEADER: &str = "# group:";
const SUBGROUP_HEADER: &str = "# subgroup:";
const UNKNOWN_SUBGROUP: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop every record whose status is not `fully-qualified`
    pub only_fully_qualified: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { only_fully_qualified: true }
    }
}

/// Classification of a single registry line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Group,
    Subgroup,
    Data(SourceRecord),
    Skip,
}

/// Running header state: the most recent group and subgroup seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    pub current_group: Option<String>,
    pub current_subgroup: Option<String>,
}

impl ScanState {
    /// Consume one line, updating header state and classifying it.
    /// Data lines before the first group header are skipped.
    pub fn feed(&mut self, line: &str) -> Line {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Line::Skip;
        }

        if let Some(group) = trimmed.strip_prefix(GROUP_HEADER) {
            self.current_group = Some(group.trim().to_string());
            self.current_subgroup = None;
            return Line::Group;
        }
        if let Some(subgroup) = trimmed.strip_prefix(SUBGROUP_HEADER) {
            self.current_subgroup = Some(subgroup.trim().to_string());
            return Line::Subgroup;
        }

        let Some(group) = self.current_group.as_deref() else {
            return Line::Skip;
        };
        match parse_data_line(trimmed) {
            Some((codepoints, emoji, status, name)) => Line::Data(SourceRecord {
                group: group.to_string(),
                subgroup: self
                    .current_subgroup
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_SUBGROUP.to_string()),
                codepoints,
                emoji,
                name,
                status,
            }),
            None => Line::Skip,
        }
    }
}

/// Split a data line into (codepoints, decoded emoji, status, name)
fn parse_data_line(line: &str) -> Option<(Vec<u32>, String, QualificationStatus, String)> {
    let caps = DATA_LINE_REGEX.captures(line)?;
    let codepoints = parse_codepoints(&caps[1])?;
    let emoji = decode_codepoints(&codepoints)?;
    let status = caps[2].trim().parse::<QualificationStatus>().ok()?;
    let comment = caps[3].trim();
    let name = VERSION_NAME_REGEX
        .captures(comment)
        .map(|m| m[1].trim().to_string())
        .unwrap_or_else(|| comment.to_string());
    Some((codepoints, emoji, status, name))
}

/// "1F469 200D 1F4BB" -> [0x1F469, 0x200D, 0x1F4BB]
pub fn parse_codepoints(hex_seq: &str) -> Option<Vec<u32>> {
    let codepoints = hex_seq
        .split_whitespace()
        .map(|h| u32::from_str_radix(h, 16).ok())
        .collect::<Option<Vec<_>>>()?;
    if codepoints.is_empty() {
        return None;
    }
    Some(codepoints)
}

/// Decode a codepoint sequence. Fails on surrogates or out-of-range values.
pub fn decode_codepoints(codepoints: &[u32]) -> Option<String> {
    codepoints.iter().map(|&cp| char::from_u32(cp)).collect()
}

/// Parse the full registry text into records, deduplicated by emoji (first wins).
pub fn parse_emoji_test(text: &str, options: ParseOptions) -> Result<Vec<SourceRecord>, BuildError> {
    let mut state = ScanState::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();
    let mut filtered = 0usize;

    for line in text.lines() {
        let Line::Data(record) = state.feed(line) else {
            continue;
        };
        if options.only_fully_qualified && record.status != QualificationStatus::FullyQualified {
            filtered += 1;
            continue;
        }
        if seen.insert(record.emoji.clone()) {
            records.push(record);
        }
    }

    tracing::debug!(records = records.len(), filtered, "parsed emoji registry");

    if records.is_empty() {
        return Err(BuildError::EmptyRegistry);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# emoji-test.txt
# Version: 16.0

# group: Smileys & Emotion

# subgroup: face-smiling
1F600                                                  ; fully-qualified     # 😀 E1.0 grinning face
263A FE0F                                              ; fully-qualified     # ☺️ E0.6 smiling face
263A                                                   ; unqualified         # ☺ E0.6 smiling face

# subgroup: face-affection
1F970                                                  ; fully-qualified     # 🥰 E11.0 smiling face with hearts

# group: People & Body
# subgroup: person-role
1F469 200D 1F4BB                                       ; fully-qualified     # 👩‍💻 E4.0 woman technologist
1F600                                                  ; fully-qualified     # 😀 E1.0 duplicate
";

    #[test]
    fn test_headers_apply_to_following_lines() {
        let records = parse_emoji_test(SAMPLE, ParseOptions::default()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].group, "Smileys & Emotion");
        assert_eq!(records[0].subgroup, "face-smiling");
        assert_eq!(records[2].subgroup, "face-affection");
        assert_eq!(records[3].group, "People & Body");
        assert_eq!(records[3].subgroup, "person-role");
    }

    #[test]
    fn test_emoji_decoded_from_codepoints() {
        let records = parse_emoji_test(SAMPLE, ParseOptions::default()).unwrap();
        let tech = &records[3];
        assert_eq!(tech.codepoints, vec![0x1F469, 0x200D, 0x1F4BB]);
        assert_eq!(tech.emoji, "\u{1F469}\u{200D}\u{1F4BB}");
        assert_eq!(tech.name, "woman technologist");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let records = parse_emoji_test(SAMPLE, ParseOptions::default()).unwrap();
        let grinning: Vec<_> = records.iter().filter(|r| r.emoji == "😀").collect();
        assert_eq!(grinning.len(), 1);
        assert_eq!(grinning[0].name, "grinning face");
        assert_eq!(grinning[0].group, "Smileys & Emotion");
    }

    #[test]
    fn test_unqualified_filtered_by_default() {
        let records = parse_emoji_test(SAMPLE, ParseOptions::default()).unwrap();
        assert!(records.iter().all(|r| r.status == QualificationStatus::FullyQualified));
        assert!(!records.iter().any(|r| r.emoji == "\u{263A}"));
    }

    #[test]
    fn test_include_non_fully_qualified() {
        let options = ParseOptions { only_fully_qualified: false };
        let records = parse_emoji_test(SAMPLE, options).unwrap();
        let bare = records.iter().find(|r| r.emoji == "\u{263A}").unwrap();
        assert_eq!(bare.status, QualificationStatus::Unqualified);
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(
            parse_emoji_test("", ParseOptions::default()),
            Err(BuildError::EmptyRegistry)
        ));
        // Only unqualified data: filtered down to nothing
        let text = "# group: Symbols\n# subgroup: x\n263A ; unqualified # ☺ E0.6 smiling face\n";
        assert!(matches!(
            parse_emoji_test(text, ParseOptions::default()),
            Err(BuildError::EmptyRegistry)
        ));
    }

    #[test]
    fn test_data_before_group_is_skipped() {
        let mut state = ScanState::default();
        assert_eq!(state.feed("1F600 ; fully-qualified # 😀 E1.0 grinning face"), Line::Skip);
        assert_eq!(state.feed("# group: Flags"), Line::Group);
        match state.feed("1F3C1 ; fully-qualified # 🏁 E0.6 chequered flag") {
            Line::Data(r) => assert_eq!(r.subgroup, "unknown"),
            other => panic!("Expected data line, got {:?}", other),
        }
    }

    #[test]
    fn test_group_header_resets_subgroup() {
        let mut state = ScanState::default();
        state.feed("# group: A");
        state.feed("# subgroup: a-sub");
        state.feed("# group: B");
        assert_eq!(state.current_group.as_deref(), Some("B"));
        assert_eq!(state.current_subgroup, None);
    }

    #[test]
    fn test_name_without_version_tag_keeps_comment() {
        let mut state = ScanState::default();
        state.feed("# group: Symbols");
        match state.feed("2764 FE0F ; fully-qualified # ❤️ red heart") {
            Line::Data(r) => assert_eq!(r.name, "❤️ red heart"),
            other => panic!("Expected data line, got {:?}", other),
        }
    }

    #[test]
    fn test_crlf_and_invalid_codepoints() {
        let text = "# group: Symbols\r\n# subgroup: heart\r\nD800 ; fully-qualified # ? E1.0 surrogate\r\n2764 FE0F ; fully-qualified # ❤️ E0.6 red heart\r\n";
        let records = parse_emoji_test(text, ParseOptions::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subgroup, "heart");
        assert_eq!(records[0].name, "red heart");
    }

    #[test]
    fn test_parse_codepoints() {
        assert_eq!(parse_codepoints("1F600"), Some(vec![0x1F600]));
        assert_eq!(parse_codepoints("  "), None);
        assert_eq!(parse_codepoints("XYZ"), None);
        assert_eq!(decode_codepoints(&[0x110000]), None);
    }
}

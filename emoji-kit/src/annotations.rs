//! CLDR annotation parsing
//!
//! CLDR ships localized emoji names as flat XML:
//!
//! ```text
//! <annotation cp="😀">얼굴 | 웃는 얼굴 | 웃음</annotation>
//! <annotation cp="😀" type="tts">활짝 웃는 얼굴</annotation>
//! ```
//!
//! The format never nests, so elements are matched with a regex instead of
//! building a DOM.

use crate::models::{Annotation, AnnotationMap};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ANNOTATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<annotation\b([^>]*)>(.*?)</annotation\s*>").unwrap()
});

static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9A-Fa-f]+|#[0-9]+|amp|lt|gt|quot|apos);").unwrap()
});

/// `type` attribute value marking the primary (text-to-speech) name
pub const TTS_TYPE: &str = "tts";

/// CLDR keyword delimiter
const KEYWORD_DELIMITER: char = '|';

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// Decode the five predefined XML entities and numeric character references.
/// Anything else is left as written.
pub fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let number = &entity[1..];
                    let parsed = match number.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => number.parse::<u32>().ok(),
                    };
                    parsed.and_then(char::from_u32)
                }
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Split a `|`-delimited keyword list, trimming and dropping empties and repeats
pub fn split_keywords(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for kw in text.split(KEYWORD_DELIMITER).map(str::trim).filter(|k| !k.is_empty()) {
        if !out.iter().any(|k| k == kw) {
            out.push(kw.to_string());
        }
    }
    out
}

fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    ATTRIBUTE_REGEX.captures_iter(attrs).find_map(|caps| {
        if &caps[1] != name {
            return None;
        }
        caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str())
    })
}

/// Extract every `<annotation>` element into a per-emoji map.
///
/// Elements without a `cp` attribute are ignored, as are typed elements
/// other than `tts`. Repeated elements for the same emoji accumulate.
pub fn parse_annotations(xml: &str) -> AnnotationMap {
    let mut map = AnnotationMap::new();

    for caps in ANNOTATION_REGEX.captures_iter(xml) {
        let attrs = &caps[1];
        let Some(cp) = attribute(attrs, "cp") else {
            continue;
        };
        let cp = decode_entities(cp);
        if cp.is_empty() {
            continue;
        }
        let body = decode_entities(caps[2].trim());

        match attribute(attrs, "type") {
            None => {
                let keywords = split_keywords(&body);
                if !keywords.is_empty() {
                    map.entry(cp).or_default().extend_keywords(keywords);
                }
            }
            Some(TTS_TYPE) => {
                let name = body.trim();
                if !name.is_empty() {
                    let entry = map.entry(cp).or_default();
                    if entry.name.is_none() {
                        entry.name = Some(name.to_string());
                    }
                }
            }
            Some(_) => {}
        }
    }

    map
}

/// Merge the base and derived annotation sets.
///
/// The name is taken from `base` when present, otherwise from `derived`.
/// Keywords are the union, base order first.
pub fn merge_annotations(base: AnnotationMap, derived: AnnotationMap) -> AnnotationMap {
    let mut merged = base;
    for (cp, extra) in derived {
        let entry = merged.entry(cp).or_default();
        if entry.name.as_deref().map_or(true, str::is_empty) {
            entry.name = extra.name;
        }
        entry.extend_keywords(extra.keywords);
    }
    merged.retain(|_, a| !a.is_empty());
    merged
}

/// Find the annotation for a registry emoji.
///
/// CLDR usually keys emoji without the U+FE0F presentation selector, so a
/// miss on the exact sequence retries with it stripped.
pub fn lookup<'a>(map: &'a AnnotationMap, emoji: &str) -> Option<&'a Annotation> {
    if let Some(found) = map.get(emoji) {
        return Some(found);
    }
    if !emoji.contains(VARIATION_SELECTOR_16) {
        return None;
    }
    let stripped: String = emoji.chars().filter(|&c| c != VARIATION_SELECTOR_16).collect();
    map.get(&stripped)
}

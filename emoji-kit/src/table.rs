//! Joins registry records and CLDR annotations into the lookup table
//!
//! `build_table` is a pure function of its inputs: every collection it
//! produces is ordered explicitly, so identical inputs always serialize to
//! identical bytes.

use crate::annotations;
use crate::interface::{CategoryMeta, EmojiMeta, EmojiTable};
use crate::models::{AnnotationMap, SourceRecord};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Hand-maintained Korean labels: Unicode group -> (title, description)
const KO_GROUP_META: &[(&str, &str, &str)] = &[
    ("Smileys & Emotion", "표정 · 감정", "웃음, 감정, 분위기를 표현하는 이모지"),
    ("People & Body", "사람 · 신체", "사람, 손/제스처, 신체 관련 이모지"),
    ("Animals & Nature", "동물 · 자연", "동물, 식물, 자연/날씨 이모지"),
    ("Food & Drink", "음식 · 음료", "음식, 음료, 디저트 이모지"),
    ("Travel & Places", "여행 · 장소", "교통, 건물, 지역/장소 이모지"),
    ("Activities", "활동", "운동, 게임, 이벤트/취미 이모지"),
    ("Objects", "사물", "도구, 기기, 생활용품 이모지"),
    ("Symbols", "기호", "체크, 경고, 아이콘/기호 이모지"),
    ("Flags", "국기", "국가/지역 국기 이모지"),
];

/// "Smileys & Emotion" -> "smileys-and-emotion"
pub fn slugify_group_name(name: &str) -> String {
    let lower = name.to_lowercase().replace('&', "and");
    let mut slug = String::with_capacity(lower.len());
    let mut pending_hyphen = false;
    for c in lower.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Lowercase alphanumeric word tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Compare by UTF-16 code units, the order the browser sorts strings in
pub fn utf16_cmp(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Title and description for a Unicode group, falling back to the raw name
pub fn category_meta(group: &str) -> CategoryMeta {
    let (ko_title, ko_desc) = KO_GROUP_META
        .iter()
        .find(|(g, _, _)| *g == group)
        .map(|(_, t, d)| (t.to_string(), d.to_string()))
        .unwrap_or_else(|| (group.to_string(), format!("Unicode group: {}", group)));
    CategoryMeta {
        title: format!("{} ({})", ko_title, group),
        description: format!("{} ({})", ko_desc, group),
    }
}

fn english_keywords(record: &SourceRecord) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    let sources = [&record.name, &record.group, &record.subgroup];
    for token in sources.iter().flat_map(|s| tokenize(s)) {
        if !keywords.contains(&token) {
            keywords.push(token);
        }
    }
    keywords
}

/// Single lowercase haystack: emoji, name, keywords, localized fields, group, subgroup
fn build_search_index(
    record: &SourceRecord,
    keywords: &[String],
    localized_name: Option<&str>,
    localized_keywords: Option<&[String]>,
) -> String {
    let mut parts: Vec<&str> = vec![record.emoji.as_str(), record.name.as_str()];
    parts.extend(keywords.iter().map(String::as_str));
    parts.extend(localized_name);
    parts.extend(localized_keywords.unwrap_or_default().iter().map(String::as_str));
    parts.push(&record.group);
    parts.push(&record.subgroup);
    parts.join(" ").to_lowercase()
}

fn meta_for_record(record: &SourceRecord, slug: &str, annotations: &AnnotationMap) -> EmojiMeta {
    let annotation = annotations::lookup(annotations, &record.emoji);
    let localized_name = annotation.and_then(|a| a.name.clone());
    let localized_keywords = annotation
        .map(|a| a.keywords.clone())
        .filter(|k| !k.is_empty());

    let keywords = english_keywords(record);
    let search = build_search_index(
        record,
        &keywords,
        localized_name.as_deref(),
        localized_keywords.as_deref(),
    );

    EmojiMeta {
        name: record.name.clone(),
        keywords,
        localized_name,
        localized_keywords,
        category: slug.to_string(),
        subgroup: record.subgroup.clone(),
        search,
    }
}

/// Group, sort and index the records into the final table.
///
/// `records` are expected deduplicated by emoji; if a duplicate slips
/// through, the first record keeps the metadata.
pub fn build_table(records: &[SourceRecord], annotations: &AnnotationMap, source: &str) -> EmojiTable {
    let mut groups: BTreeMap<String, (String, Vec<String>)> = BTreeMap::new();
    let mut emoji_meta: BTreeMap<String, EmojiMeta> = BTreeMap::new();

    for record in records {
        if emoji_meta.contains_key(&record.emoji) {
            continue;
        }
        let slug = slugify_group_name(&record.group);
        let meta = meta_for_record(record, &slug, annotations);
        emoji_meta.insert(record.emoji.clone(), meta);
        groups
            .entry(slug)
            .or_insert_with(|| (record.group.clone(), Vec::new()))
            .1
            .push(record.emoji.clone());
    }

    let mut table = EmojiTable {
        source: source.to_string(),
        ..EmojiTable::default()
    };

    // BTreeMap iteration is already slug order
    for (slug, (group, mut emojis)) in groups {
        emojis.sort_by(|a, b| utf16_cmp(a, b));
        emojis.dedup();
        table.categories.push(slug.clone());
        table.category_meta.insert(slug.clone(), category_meta(&group));
        table.emojis.insert(slug, emojis);
    }
    table.emoji_meta = emoji_meta;

    table
}

//! Rendering the lookup table into the static artifact
//!
//! Two formats are produced from the same `EmojiTable`:
//! - `Ts`: a TypeScript module imported by the web front end at build time
//! - `Json`: the serde form of the table, loadable with `EmojiTable::from_json`
//!
//! Neither embeds timestamps, so output is byte-identical for identical tables.

use crate::interface::{BuildError, EmojiTable};
use std::fmt::Write as _;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Ts,
    Json,
}

impl OutputFormat {
    /// `.json` selects JSON, anything else the TypeScript module
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Ts,
        }
    }
}

/// Encode a string as a JS/JSON literal
fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

pub fn render(table: &EmojiTable, format: OutputFormat) -> Result<String, BuildError> {
    match format {
        OutputFormat::Ts => render_typescript(table),
        OutputFormat::Json => render_json(table),
    }
}

pub fn render_json(table: &EmojiTable) -> Result<String, BuildError> {
    let mut out = serde_json::to_string_pretty(table)?;
    out.push('\n');
    Ok(out)
}

pub fn render_typescript(table: &EmojiTable) -> Result<String, BuildError> {
    let mut out = String::new();
    let source = table.source.replace("*/", "*\\/");

    // Writing into a String cannot fail
    let _ = write!(
        out,
        "/**
 * AUTO-GENERATED FILE. DO NOT EDIT BY HAND.
 * Generated from: {source}
 */

"
    );

    let cats = table.categories.iter().map(|c| js_string(c)).collect::<Vec<_>>().join(", ");
    let _ = writeln!(out, "export const ALL_CATEGORIES = [{}] as const;", cats);
    out.push_str("export type EmojiCategory = (typeof ALL_CATEGORIES)[number];\n\n");

    out.push_str(
        "export type EmojiMeta = {
  name: string;
  keywords: string[];
  koName?: string;
  koKeywords?: string[];
  category: EmojiCategory;
  subgroup: string;
  search: string;
};\n\n",
    );

    out.push_str("export const CATEGORY_META: Record<EmojiCategory, { title: string; description: string }> = {\n");
    for slug in &table.categories {
        if let Some(meta) = table.category_meta.get(slug) {
            let _ = writeln!(
                out,
                "  {}: {{ title: {}, description: {} }},",
                js_string(slug),
                js_string(&meta.title),
                js_string(&meta.description)
            );
        }
    }
    out.push_str("};\n\n");

    out.push_str("export const EMOJIS: Record<EmojiCategory, string[]> = {\n");
    for slug in &table.categories {
        let list = table
            .emojis
            .get(slug)
            .map(|l| l.iter().map(|e| js_string(e)).collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        let _ = writeln!(out, "  {}: [{}],", js_string(slug), list);
    }
    out.push_str("};\n\n");

    out.push_str("export const EMOJI_META: Record<string, EmojiMeta> = {\n");
    for emoji in table.all_emojis() {
        if let Some(meta) = table.meta(emoji) {
            let _ = writeln!(out, "  {}: {},", js_string(emoji), serde_json::to_string(meta)?);
        }
    }
    out.push_str("};\n\n");

    out.push_str(
        "export function getAllEmojiFlat(): string[] {
  const set = new Set<string>();
  for (const cat of ALL_CATEGORIES) {
    for (const e of EMOJIS[cat]) set.add(e);
  }
  return Array.from(set);
}
",
    );

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::{CategoryMeta, EmojiMeta};

    fn sample_table() -> EmojiTable {
        let mut table = EmojiTable {
            source: "https://unicode.org/Public/emoji/16.0/emoji-test.txt".into(),
            categories: vec!["smileys-and-emotion".into()],
            ..EmojiTable::default()
        };
        table.category_meta.insert(
            "smileys-and-emotion".into(),
            CategoryMeta { title: "표정 · 감정 (Smileys & Emotion)".into(), description: "d \"q\"".into() },
        );
        table.emojis.insert("smileys-and-emotion".into(), vec!["😀".into()]);
        table.emoji_meta.insert(
            "😀".into(),
            EmojiMeta {
                name: "grinning face".into(),
                keywords: vec!["grinning".into(), "face".into()],
                localized_name: Some("활짝 웃는 얼굴".into()),
                localized_keywords: None,
                category: "smileys-and-emotion".into(),
                subgroup: "face-smiling".into(),
                search: "😀 grinning face".into(),
            },
        );
        table
    }

    #[test]
    fn test_typescript_exports() {
        let ts = render_typescript(&sample_table()).unwrap();
        assert!(ts.contains("export const ALL_CATEGORIES = [\"smileys-and-emotion\"] as const;"));
        assert!(ts.contains("\"smileys-and-emotion\": { title: \"표정 · 감정 (Smileys & Emotion)\", description: \"d \\\"q\\\"\" },"));
        assert!(ts.contains("\"smileys-and-emotion\": [\"😀\"],"));
        assert!(ts.contains("\"😀\": {\"name\":\"grinning face\""));
        assert!(ts.contains("\"koName\":\"활짝 웃는 얼굴\""));
        assert!(!ts.contains("koKeywords\":"));
        assert!(ts.contains("export function getAllEmojiFlat(): string[]"));
        assert!(ts.contains("Generated from: https://unicode.org/Public/emoji/16.0/emoji-test.txt"));
    }

    #[test]
    fn test_json_loads_back() {
        let table = sample_table();
        let json = render_json(&table).unwrap();
        assert_eq!(EmojiTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let a = render(&sample_table(), OutputFormat::Ts).unwrap();
        let b = render(&sample_table(), OutputFormat::Ts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("lib/emoji-data.ts")), OutputFormat::Ts);
        assert_eq!(OutputFormat::from_path(Path::new("out/table.JSON")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), OutputFormat::Ts);
    }

    #[test]
    fn test_comment_terminator_in_source_is_escaped() {
        let mut table = sample_table();
        table.source = "evil*/path".into();
        let ts = render_typescript(&table).unwrap();
        assert!(ts.contains("evil*\\/path"));
    }
}

//! The generation pipeline without any IO: registry text and optional
//! annotation XML in, lookup table out.

use crate::annotations::{merge_annotations, parse_annotations};
use crate::interface::{BuildError, EmojiTable};
use crate::models::AnnotationMap;
use crate::registry::{parse_emoji_test, ParseOptions};
use crate::table::build_table;

#[derive(Debug, Clone, Default)]
pub struct AnnotationInputs<'a> {
    pub base: Option<&'a str>,
    pub derived: Option<&'a str>,
}

impl<'a> AnnotationInputs<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse and merge whichever sources are present. A source that yields
    /// no annotations is logged and treated as absent.
    pub fn parse(&self) -> AnnotationMap {
        let base = parse_source("base", self.base);
        let derived = parse_source("derived", self.derived);
        merge_annotations(base, derived)
    }
}

fn parse_source(label: &'static str, xml: Option<&str>) -> AnnotationMap {
    let Some(xml) = xml else {
        return AnnotationMap::new();
    };
    let map = parse_annotations(xml);
    if map.is_empty() {
        tracing::warn!(
            source = label,
            bytes = xml.len(),
            "annotation source has no <annotation> entries, continuing without it"
        );
    }
    map
}

/// Parse, join and index. Pure: identical inputs give identical tables.
pub fn generate(
    registry_text: &str,
    annotations: &AnnotationInputs<'_>,
    options: ParseOptions,
    source: &str,
) -> Result<EmojiTable, BuildError> {
    let records = parse_emoji_test(registry_text, options)?;
    let annotations = annotations.parse();
    let table = build_table(&records, &annotations, source);

    tracing::info!(
        emojis = table.len(),
        categories = table.categories.len(),
        annotated = annotations.len(),
        "built emoji table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;

    const REGISTRY: &str = "# group: Smileys & Emotion\n# subgroup: face-smiling\n1F600 ; fully-qualified # 😀 E1.0 grinning face\n";
    const KO: &str = r#"<annotation cp="😀" type="tts">활짝 웃는 얼굴</annotation>"#;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a WARN-level subscriber and return what it logged
    fn captured_warnings<F: FnOnce()>(f: F) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_html_error_pages_are_warned_about() {
        let inputs = AnnotationInputs {
            base: Some("<html>404 Not Found</html>"),
            derived: Some("<html>oops</html>"),
        };
        let log = captured_warnings(|| {
            let table = generate(REGISTRY, &inputs, ParseOptions::default(), "x").unwrap();
            assert!(table.meta("😀").unwrap().localized_name.is_none());
        });
        assert!(log.contains("WARN"), "{}", log);
        assert!(log.contains("source=\"base\""), "{}", log);
        assert!(log.contains("source=\"derived\""), "{}", log);
    }

    #[test]
    fn test_only_the_empty_source_is_warned_about() {
        let inputs = AnnotationInputs { base: Some(KO), derived: Some("") };
        let log = captured_warnings(|| {
            let table = generate(REGISTRY, &inputs, ParseOptions::default(), "x").unwrap();
            assert_eq!(table.meta("😀").unwrap().localized_name.as_deref(), Some("활짝 웃는 얼굴"));
        });
        assert!(!log.contains("source=\"base\""), "{}", log);
        assert!(log.contains("source=\"derived\""), "{}", log);
    }

    #[test]
    fn test_absent_sources_are_silent() {
        let log = captured_warnings(|| {
            generate(REGISTRY, &AnnotationInputs::none(), ParseOptions::default(), "x").unwrap();
        });
        assert!(log.is_empty(), "{}", log);
    }
}

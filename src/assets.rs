//! Asset selection: pairing emitted bundles with their source maps.
//!
//! Pure functions over the build snapshot. A chunk contributes a pair only
//! when it carries both a `.js` bundle and a `.js.map`; anything else is
//! silently skipped, never an error.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::config::UploadConfig;
use crate::output::Chunk;

/// Characters escaped when `encode_filename` is set.
///
/// Matches JavaScript's `encodeURI`: everything except alphanumerics and
/// `; , / ? : @ & = + $ - _ . ! ~ * ' ( ) #` is percent-encoded.
const ENCODE_URI: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A bundle file and its source map, matched within the same chunk.
///
/// Derived per upload cycle; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPair {
    /// Bundle file name (percent-encoded when `encode_filename` is set).
    pub source_file: String,
    /// Source-map file name, always verbatim.
    pub source_map: String,
}

/// Selects the asset pairs eligible for upload.
///
/// Chunk iteration order is preserved. When `include_chunks` is non-empty,
/// only chunks whose display name is an exact member survive; unnamed
/// chunks can never match a non-empty allow-list.
pub fn select_assets(chunks: &[Chunk], config: &UploadConfig) -> Vec<AssetPair> {
    chunks
        .iter()
        .filter(|chunk| included(chunk, &config.include_chunks))
        .filter_map(|chunk| {
            let source_file = chunk.files.iter().find(|f| f.ends_with(".js"))?;
            let source_map = chunk.files.iter().find(|f| f.ends_with(".js.map"))?;

            let source_file = if config.encode_filename {
                utf8_percent_encode(source_file, ENCODE_URI).to_string()
            } else {
                source_file.clone()
            };

            Some(AssetPair {
                source_file,
                source_map: source_map.clone(),
            })
        })
        .collect()
}

fn included(chunk: &Chunk, include_chunks: &[String]) -> bool {
    if include_chunks.is_empty() {
        return true;
    }
    chunk
        .name
        .as_deref()
        .is_some_and(|name| include_chunks.iter().any(|c| c == name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;

    fn config() -> UploadConfig {
        UploadConfig::new("svc", "1.0", "https://cdn.example.com/")
    }

    #[test]
    fn pairs_bundle_with_map() {
        let chunks = vec![Chunk::new(
            "main",
            vec!["main.abc123.js".into(), "main.abc123.js.map".into()],
        )];
        let pairs = select_assets(&chunks, &config());
        assert_eq!(
            pairs,
            vec![AssetPair {
                source_file: "main.abc123.js".into(),
                source_map: "main.abc123.js.map".into(),
            }]
        );
    }

    #[test]
    fn skips_chunk_missing_map() {
        let chunks = vec![Chunk::new("main", vec!["main.js".into()])];
        assert!(select_assets(&chunks, &config()).is_empty());
    }

    #[test]
    fn skips_chunk_missing_bundle() {
        // A lone .js.map must not match the bundle pattern.
        let chunks = vec![Chunk::new("main", vec!["main.js.map".into()])];
        assert!(select_assets(&chunks, &config()).is_empty());
    }

    #[test]
    fn non_js_files_are_ignored() {
        let chunks = vec![Chunk::new(
            "styles",
            vec!["styles.css".into(), "styles.css.map".into()],
        )];
        assert!(select_assets(&chunks, &config()).is_empty());
    }

    #[test]
    fn takes_first_matching_files() {
        let chunks = vec![Chunk::new(
            "main",
            vec![
                "runtime.js".into(),
                "main.js".into(),
                "runtime.js.map".into(),
                "main.js.map".into(),
            ],
        )];
        let pairs = select_assets(&chunks, &config());
        assert_eq!(pairs[0].source_file, "runtime.js");
        assert_eq!(pairs[0].source_map, "runtime.js.map");
    }

    #[test]
    fn allow_list_filters_by_exact_name() {
        let chunks = vec![
            Chunk::new("main", vec!["main.js".into(), "main.js.map".into()]),
            Chunk::new("vendor", vec!["vendor.js".into(), "vendor.js.map".into()]),
            Chunk::new("Main", vec!["Main.js".into(), "Main.js.map".into()]),
        ];
        let config = config().include_chunks(["main"]);
        let pairs = select_assets(&chunks, &config);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].source_file, "main.js");
    }

    #[test]
    fn empty_allow_list_includes_all_chunks() {
        let chunks = vec![
            Chunk::new("main", vec!["main.js".into(), "main.js.map".into()]),
            Chunk::new("vendor", vec!["vendor.js".into(), "vendor.js.map".into()]),
        ];
        let pairs = select_assets(&chunks, &config());
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn unnamed_chunk_never_matches_non_empty_allow_list() {
        let chunks = vec![Chunk {
            name: None,
            files: vec!["chunk.js".into(), "chunk.js.map".into()],
        }];
        let allow = config().include_chunks(["main"]);
        assert!(select_assets(&chunks, &allow).is_empty());
        // But it survives an empty allow-list.
        assert_eq!(select_assets(&chunks, &config()).len(), 1);
    }

    #[test]
    fn preserves_chunk_order() {
        let chunks = vec![
            Chunk::new("b", vec!["b.js".into(), "b.js.map".into()]),
            Chunk::new("a", vec!["a.js".into(), "a.js.map".into()]),
        ];
        let pairs = select_assets(&chunks, &config());
        assert_eq!(pairs[0].source_file, "b.js");
        assert_eq!(pairs[1].source_file, "a.js");
    }

    #[test]
    fn encode_filename_encodes_bundle_only() {
        let chunks = vec![Chunk::new(
            "main",
            vec!["main [v2].js".into(), "main [v2].js.map".into()],
        )];
        let config = config().encode_filename(true);
        let pairs = select_assets(&chunks, &config);
        assert_eq!(pairs[0].source_file, "main%20%5Bv2%5D.js");
        assert_eq!(pairs[0].source_map, "main [v2].js.map");
    }

    #[test]
    fn encode_filename_round_trips() {
        let original = "über app.js";
        let chunks = vec![Chunk::new(
            "main",
            vec![original.to_string(), "über app.js.map".into()],
        )];
        let config = config().encode_filename(true);
        let pairs = select_assets(&chunks, &config);
        let decoded = percent_encoding::percent_decode_str(&pairs[0].source_file)
            .decode_utf8()
            .unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn encode_filename_keeps_uri_significant_characters() {
        let chunks = vec![Chunk::new(
            "main",
            vec!["js/app~main.js".into(), "js/app~main.js.map".into()],
        )];
        let config = config().encode_filename(true);
        let pairs = select_assets(&chunks, &config);
        assert_eq!(pairs[0].source_file, "js/app~main.js");
    }
}

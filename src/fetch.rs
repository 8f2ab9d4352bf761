//! Schema Fetcher
//!
//! Downloads `types.proto` from a revision of the upstream schema repository
//! and stores it locally with a provenance header, so the stored copy always
//! says where and when it came from.

use std::io::Read as _;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::layout::ProjectLayout;

/// Default revision to fetch from.
pub const DEFAULT_REVISION: &str = "main";

const URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/aas-core-works/aas-core-protobuf/{revision}/v3/types.proto";

/// Construct the download URL for a revision hash or branch name.
pub fn download_url(revision: &str) -> String {
    URL_TEMPLATE.replacen("{revision}", revision, 1)
}

/// Prepend the provenance header to the fetched text.
///
/// The header is two comment lines (source URL, retrieval time) and a blank
/// line; the schema compiler skips it as ordinary comments.
pub fn with_provenance(url: &str, at: DateTime<Utc>, text: &str) -> String {
    format!(
        "// Downloaded from: {}\n// At: {}\n\n{}",
        url,
        at.format("%Y-%m-%d %H:%M:%SZ"),
        text
    )
}

/// Fetch the schema at `revision` and overwrite the stored copy.
///
/// A single blocking GET, no retry.
pub fn fetch_schema(layout: &ProjectLayout, revision: &str) -> Result<PathBuf> {
    fetch_schema_with(layout, revision, |url| {
        let resp = ureq::get(url).call()?;
        let mut text = String::new();
        resp.into_body().into_reader().read_to_string(&mut text)?;
        Ok(text)
    })
}

/// Fetch the schema through `fetch`, the transport seam.
///
/// The local file is only written after `fetch` has returned the whole text
/// successfully, so a failed fetch leaves any prior copy untouched.
pub fn fetch_schema_with(
    layout: &ProjectLayout,
    revision: &str,
    fetch: impl Fn(&str) -> Result<String>,
) -> Result<PathBuf> {
    let url = download_url(revision);
    let target_path = layout.schema_path();

    println!("Downloading from: {}", url);
    let now = Utc::now();

    let text = fetch(&url)?;

    println!("Saving to: {}", target_path.display());
    if let Some(parent) = target_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target_path, with_provenance(&url, now, &text))?;

    Ok(target_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_url_substitutes_revision_once() {
        assert_eq!(
            download_url("main"),
            "https://raw.githubusercontent.com/aas-core-works/aas-core-protobuf/main/v3/types.proto"
        );
        assert_eq!(
            download_url("8b0c1d2"),
            "https://raw.githubusercontent.com/aas-core-works/aas-core-protobuf/8b0c1d2/v3/types.proto"
        );
    }

    #[test]
    fn test_url_revision_is_the_only_changed_field() {
        let a = download_url("aaaa");
        let b = download_url("bbbb");
        assert_eq!(a.replacen("aaaa", "bbbb", 1), b);
    }

    #[test]
    fn test_provenance_header_shape() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 12, 30, 5).unwrap();
        let out = with_provenance("https://example.com/types.proto", at, "message A {}\n");

        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("// Downloaded from: https://example.com/types.proto")
        );
        assert_eq!(lines.next(), Some("// At: 2024-03-07 12:30:05Z"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("message A {}"));
    }

    #[test]
    fn test_provenance_header_for_empty_text() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let out = with_provenance("https://example.com/types.proto", at, "");
        assert!(out.ends_with("\n\n"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "");
    }

    #[test]
    fn test_failed_fetch_leaves_prior_schema_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        std::fs::create_dir_all(layout.proto_dir()).unwrap();
        let prior = "// Downloaded from: earlier\n// At: earlier\n\nmessage Old {}\n";
        std::fs::write(layout.schema_path(), prior).unwrap();

        let result = fetch_schema_with(&layout, "main", |_url| {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "remote unreachable",
            )
            .into())
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(layout.schema_path()).unwrap(), prior);
    }

    #[test]
    fn test_successful_fetch_overwrites_with_provenance() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());

        let written = fetch_schema_with(&layout, "8b0c1d2", |url| {
            assert_eq!(url, download_url("8b0c1d2"));
            Ok("message A {}\n".to_string())
        })
        .unwrap();

        assert_eq!(written, layout.schema_path());
        let stored = std::fs::read_to_string(&written).unwrap();
        assert!(stored.starts_with(&format!("// Downloaded from: {}\n// At: ", download_url("8b0c1d2"))));
        assert!(stored.ends_with("\n\nmessage A {}\n"));
    }

    #[test]
    fn test_raw_text_is_verbatim() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let raw = "// leading comment of the schema itself\nsyntax = \"proto3\";\n";
        let out = with_provenance("https://example.com/x", at, raw);
        let (_header, body) = out.split_once("\n\n").unwrap();
        assert_eq!(body, raw);
    }
}

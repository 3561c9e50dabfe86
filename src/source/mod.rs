// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Passage sources.
//!
//! Parsing Twee is someone else's job; a source hands over the already parsed passage list.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::Passage;

pub trait PassageSource {
    fn load(&self, path: &Path) -> Result<Vec<Passage>, SourceError>;
}

#[derive(Debug)]
pub enum SourceError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    EmptyName {
        path: PathBuf,
        index: usize,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read passages from {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "invalid passage list in {path:?}: {source}"),
            Self::EmptyName { path, index } => {
                write!(f, "passage #{index} in {path:?} has an empty name")
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::EmptyName { .. } => None,
        }
    }
}

/// Reads the JSON passage list a Twee parser emits:
/// `[{"name", "tags", "content", "line", "position", "size"}]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPassageFile;

#[derive(Debug, Deserialize)]
struct PassageJson {
    name: String,
    #[serde(default)]
    tags: Option<String>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    line: u32,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    size: Option<String>,
}

impl JsonPassageFile {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(path: &Path, raw: &str) -> Result<Vec<Passage>, SourceError> {
        let list: Vec<PassageJson> = serde_json::from_str(raw)
            .map_err(|source| SourceError::Json { path: path.to_path_buf(), source })?;

        list.into_iter()
            .enumerate()
            .map(|(index, p)| {
                if p.name.trim().is_empty() {
                    return Err(SourceError::EmptyName { path: path.to_path_buf(), index });
                }
                Ok(Passage::new(p.name, p.content)
                    .with_tags(p.tags)
                    .with_line(p.line)
                    .with_position(p.position)
                    .with_size(p.size))
            })
            .collect()
    }
}

impl PassageSource for JsonPassageFile {
    fn load(&self, path: &Path) -> Result<Vec<Passage>, SourceError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;
        let passages = Self::parse(path, &raw)?;
        log::info!("event=passages_read path={} count={}", path.display(), passages.len());
        Ok(passages)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::{JsonPassageFile, PassageSource, SourceError};
    use crate::model::fixtures::TempDir;

    #[test]
    fn parses_full_and_sparse_entries() {
        let raw = r#"[
            {"name": "Start", "tags": "intro", "content": "Hi [[Next]]", "line": 3,
             "position": "100,200", "size": "100,100"},
            {"name": "Next", "tags": null, "content": "Bye"}
        ]"#;

        let passages = JsonPassageFile::parse(Path::new("story.json"), raw).unwrap();

        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].name(), "Start");
        assert_eq!(passages[0].tags(), Some("intro"));
        assert_eq!(passages[0].line(), 3);
        assert_eq!(passages[0].position(), Some("100,200"));
        assert_eq!(passages[0].size(), Some("100,100"));
        assert_eq!(passages[1].tags(), None);
        assert_eq!(passages[1].line(), 0);
        assert_eq!(passages[1].position(), None);
    }

    #[test]
    fn empty_name_is_rejected() {
        let raw = r#"[{"name": "A"}, {"name": " "}]"#;

        let err = JsonPassageFile::parse(Path::new("story.json"), raw).unwrap_err();

        assert!(matches!(err, SourceError::EmptyName { index: 1, .. }));
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let tmp = TempDir::new("source");
        let missing = tmp.path().join("missing.json");
        assert!(matches!(JsonPassageFile.load(&missing), Err(SourceError::Io { .. })));

        let broken = tmp.path().join("broken.json");
        fs::write(&broken, "[{").unwrap();
        assert!(matches!(JsonPassageFile.load(&broken), Err(SourceError::Json { .. })));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let tmp = TempDir::new("source-ok");
        let path = tmp.path().join("story.json");
        fs::write(&path, r#"[{"name": "Only", "content": "text"}]"#).unwrap();

        let passages = JsonPassageFile::new().load(&path).unwrap();

        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].content(), "text");
    }
}

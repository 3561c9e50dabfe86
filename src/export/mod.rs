// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Export of the split: one Twee file per group.
//!
//! [`ExportPlan::build`] validates the group list up front; an [`ExportTarget`] then writes
//! the plan without looking at the group store again.

pub mod twee_writer;

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::model::{Group, GroupId};

pub use twee_writer::TweeExporter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    /// One file per group inside this directory (created if missing).
    Directory(PathBuf),
    /// One zip archive holding every group file.
    Archive(PathBuf),
}

impl ExportDestination {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportGroup {
    filename: String,
    passage_names: Vec<String>,
}

impl ExportGroup {
    pub fn new(filename: impl Into<String>, passage_names: Vec<String>) -> Self {
        Self { filename: filename.into(), passage_names }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn passage_names(&self) -> &[String] {
        &self.passage_names
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    source_path: String,
    destination: ExportDestination,
    groups: Vec<ExportGroup>,
}

impl ExportPlan {
    /// Validates the current groups and freezes them into a plan.
    pub fn build(
        source_path: Option<&str>,
        groups: &[Group],
        destination: ExportDestination,
    ) -> Result<Self, ExportValidationError> {
        let Some(source_path) = source_path else {
            return Err(ExportValidationError::NoFileLoaded);
        };
        if groups.is_empty() {
            return Err(ExportValidationError::NoGroups);
        }

        let mut seen = HashSet::<&str>::new();
        for group in groups {
            validate_filename(group.id(), group.filename())?;
            if !seen.insert(group.filename()) {
                return Err(ExportValidationError::DuplicateFilename {
                    filename: group.filename().to_owned(),
                });
            }
        }

        Ok(Self {
            source_path: source_path.to_owned(),
            destination,
            groups: groups
                .iter()
                .map(|group| ExportGroup::new(group.filename(), group.passage_names().to_vec()))
                .collect(),
        })
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn destination(&self) -> &ExportDestination {
        &self.destination
    }

    pub fn groups(&self) -> &[ExportGroup] {
        &self.groups
    }
}

fn validate_filename(group_id: &GroupId, filename: &str) -> Result<(), ExportValidationError> {
    if filename.trim().is_empty() {
        return Err(ExportValidationError::EmptyFilename { group_id: group_id.clone() });
    }
    if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
        return Err(ExportValidationError::InvalidFilename { filename: filename.to_owned() });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    pub files_written: usize,
    pub total_passages: usize,
}

pub trait ExportTarget {
    fn export(&self, plan: &ExportPlan) -> Result<ExportSummary, ExportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportValidationError {
    NoFileLoaded,
    NoGroups,
    EmptyFilename { group_id: GroupId },
    InvalidFilename { filename: String },
    DuplicateFilename { filename: String },
}

impl fmt::Display for ExportValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFileLoaded => write!(f, "no file loaded"),
            Self::NoGroups => write!(f, "no groups to export"),
            Self::EmptyFilename { group_id } => write!(f, "group {group_id} has an empty filename"),
            Self::InvalidFilename { filename } => {
                write!(f, "filename must not contain path components: {filename:?}")
            }
            Self::DuplicateFilename { filename } => write!(f, "duplicate filename: {filename:?}"),
        }
    }
}

impl std::error::Error for ExportValidationError {}

#[derive(Debug)]
pub enum ExportError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Zip {
        path: PathBuf,
        source: zip::result::ZipError,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Zip { path, source } => write!(f, "zip error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Zip { source, .. } => Some(source),
        }
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::GroupId;

/// A named destination collecting passages for one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    filename: String,
    passage_names: Vec<String>,
}

impl Group {
    pub fn new(id: GroupId, filename: impl Into<String>) -> Self {
        Self { id, filename: filename.into(), passage_names: Vec::new() }
    }

    pub fn with_passage_names(mut self, passage_names: Vec<String>) -> Self {
        self.passage_names = passage_names;
        self
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn passage_names(&self) -> &[String] {
        &self.passage_names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.passage_names.iter().any(|candidate| candidate == name)
    }

    pub(crate) fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    pub(crate) fn passage_names_mut(&mut self) -> &mut Vec<String> {
        &mut self.passage_names
    }
}

/// Persisted application state: the loaded document path plus the group list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub file_path: Option<String>,
    pub groups: Vec<Group>,
}

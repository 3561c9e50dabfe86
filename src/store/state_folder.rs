// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::atomic::{write_atomic, WriteDurability};
use super::StatePersistence;
use crate::model::{AppState, Group, GroupId, IdError};

const STATE_FILE: &str = "state.json";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::InvalidId { field, value, source } => {
                write!(f, "invalid id for {field}: {value:?}: {source}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
        }
    }
}

/// Directory holding `state.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFolder {
    root: PathBuf,
    durability: WriteDurability,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppStateJson {
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    groups: Vec<GroupJson>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupJson {
    id: String,
    filename: String,
    #[serde(default)]
    passage_names: Vec<String>,
}

impl StateFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    pub fn load_state(&self) -> Result<Option<AppState>, StoreError> {
        let path = self.state_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let json: AppStateJson =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json { path: path.clone(), source })?;
        let state = app_state_from_json(json)?;

        log::info!(
            "event=state_loaded path={} groups={}",
            path.display(),
            state.groups.len()
        );
        Ok(Some(state))
    }

    pub fn save_state(&self, state: &AppState) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .map_err(|source| StoreError::Io { path: self.root.clone(), source })?;

        let path = self.state_path();
        let json = app_state_to_json(state);
        let raw = serde_json::to_string_pretty(&json)
            .map_err(|source| StoreError::Json { path: path.clone(), source })?;

        write_atomic(&path, format!("{raw}\n").as_bytes(), self.durability)
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;

        log::info!(
            "event=state_saved path={} groups={} durability={:?}",
            path.display(),
            state.groups.len(),
            self.durability
        );
        Ok(())
    }
}

impl StatePersistence for StateFolder {
    fn load(&self) -> Result<Option<AppState>, StoreError> {
        self.load_state()
    }

    fn save(&self, state: &AppState) -> Result<(), StoreError> {
        self.save_state(state)
    }
}

fn app_state_to_json(state: &AppState) -> AppStateJson {
    AppStateJson {
        file_path: state.file_path.clone(),
        groups: state
            .groups
            .iter()
            .map(|group| GroupJson {
                id: group.id().to_string(),
                filename: group.filename().to_owned(),
                passage_names: group.passage_names().to_vec(),
            })
            .collect(),
    }
}

fn app_state_from_json(json: AppStateJson) -> Result<AppState, StoreError> {
    let mut groups = Vec::with_capacity(json.groups.len());
    for group in json.groups {
        let id = GroupId::new(group.id.clone()).map_err(|source| StoreError::InvalidId {
            field: "groups[].id",
            value: group.id,
            source,
        })?;
        groups.push(Group::new(id, group.filename).with_passage_names(group.passage_names));
    }
    Ok(AppState { file_path: json.file_path, groups })
}

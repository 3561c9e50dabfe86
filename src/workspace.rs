// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Host-side coordinator.
//!
//! Owns the loaded document and everything derived from it, and applies the load and
//! persistence rules: a load replaces passages, groups, selection and file path in one step;
//! nothing is persisted while a load is in flight; collaborator failures become [`Notice`]s.

use std::collections::HashSet;
use std::path::Path;

use crate::export::{ExportDestination, ExportPlan, ExportSummary, ExportTarget};
use crate::format::links::{extract_links, incoming, outgoing};
use crate::format::twee::passage_to_twee;
use crate::groups::GroupStore;
use crate::layout::{layout_passages_with, CanvasLayout, LayoutConfig};
use crate::model::{AppState, GroupId, Link, Passage, Position};
use crate::selection::{CanvasView, PointerEvent, SelectionConfig, SelectionController};
use crate::source::{PassageSource, SourceError};
use crate::store::StatePersistence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// Non-fatal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

/// Ticket for a load started with [`Workspace::begin_open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    ticket: u64,
    path: String,
}

impl PendingLoad {
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { passages: usize },
    Failed,
    /// A newer load was started after this one; its result was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved,
    Unchanged,
    Suppressed,
    Failed,
}

/// One passage as the canvas should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasNode {
    pub name: String,
    pub position: Position,
    pub group: Option<GroupId>,
    /// Index of the owning group in the group list; hosts map it onto a color palette.
    pub group_slot: Option<usize>,
    pub selected: bool,
    pub highlighted: bool,
}

/// Preview pane contents for one passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassagePreview {
    pub twee: String,
    pub links_out: Vec<String>,
    pub links_in: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PersistedMark {
    rev: u64,
    file_path: Option<String>,
}

#[derive(Debug)]
pub struct Workspace {
    passages: Vec<Passage>,
    links: Vec<Link>,
    layout: CanvasLayout,
    layout_config: LayoutConfig,
    groups: GroupStore,
    selection: SelectionController,
    file_path: Option<String>,
    pending: Option<u64>,
    next_ticket: u64,
    persisted: Option<PersistedMark>,
    notices: Vec<Notice>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            passages: Vec::new(),
            links: Vec::new(),
            layout: CanvasLayout::default(),
            layout_config: LayoutConfig::default(),
            groups: GroupStore::new(),
            selection: SelectionController::default(),
            file_path: None,
            pending: None,
            next_ticket: 1,
            persisted: None,
            notices: Vec::new(),
        }
    }

    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout_config = config;
        self.layout = layout_passages_with(&self.passages, &self.layout_config);
        self
    }

    pub fn with_selection_config(mut self, config: SelectionConfig) -> Self {
        self.selection = SelectionController::new(config);
        self
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn passage(&self, name: &str) -> Option<&Passage> {
        self.passages.iter().find(|p| p.name() == name)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn layout(&self) -> &CanvasLayout {
        &self.layout
    }

    pub fn groups(&self) -> &GroupStore {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut GroupStore {
        &mut self.groups
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionController {
        &mut self.selection
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Starts a load. Any earlier ticket becomes stale.
    pub fn begin_open(&mut self, path: impl Into<String>) -> PendingLoad {
        let ticket = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending = Some(ticket);
        let path = path.into();
        log::debug!("event=load_started path={path} ticket={ticket}");
        PendingLoad { ticket, path }
    }

    /// Applies the result of a load started with [`Self::begin_open`].
    pub fn finish_open(
        &mut self,
        load: PendingLoad,
        result: Result<Vec<Passage>, SourceError>,
    ) -> LoadOutcome {
        if self.pending != Some(load.ticket) {
            log::debug!("event=load_discarded path={} ticket={}", load.path, load.ticket);
            return LoadOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(passages) => {
                let count = passages.len();
                self.apply_document(load.path, passages);
                LoadOutcome::Applied { passages: count }
            }
            Err(err) => {
                log::warn!("event=load_failed path={} error={err}", load.path);
                self.notify(NoticeKind::Error, format!("Failed to open {}: {err}", load.path));
                LoadOutcome::Failed
            }
        }
    }

    /// Synchronous `begin_open` + `finish_open`.
    pub fn open_file(&mut self, source: &dyn PassageSource, path: &Path) -> LoadOutcome {
        let load = self.begin_open(path.display().to_string());
        let result = source.load(path);
        self.finish_open(load, result)
    }

    /// Startup: reopens the saved file and puts the saved groups back.
    ///
    /// An unreadable state counts as no saved state. Saved groups are restored even when the
    /// file itself can no longer be opened.
    pub fn restore(&mut self, persistence: &dyn StatePersistence, source: &dyn PassageSource) {
        let saved = match persistence.load() {
            Ok(saved) => saved,
            Err(err) => {
                log::warn!("event=state_load_failed error={err}");
                self.notify(NoticeKind::Warning, format!("Saved state ignored: {err}"));
                None
            }
        };

        if let Some(AppState { file_path, groups }) = saved {
            if let Some(path) = file_path {
                self.open_file(source, Path::new(&path));
            }
            if !groups.is_empty() {
                self.groups.replace_all(groups);
            }
        }

        self.persisted = Some(self.mark());
    }

    pub fn app_state(&self) -> AppState {
        AppState { file_path: self.file_path.clone(), groups: self.groups.snapshot().to_vec() }
    }

    /// Saves the file path and groups if either changed since the last save.
    pub fn persist(&mut self, persistence: &dyn StatePersistence) -> PersistOutcome {
        if self.is_loading() {
            log::debug!("event=persist_suppressed reason=load_pending");
            return PersistOutcome::Suppressed;
        }
        let mark = self.mark();
        if self.persisted.as_ref() == Some(&mark) {
            return PersistOutcome::Unchanged;
        }

        match persistence.save(&self.app_state()) {
            Ok(()) => {
                self.persisted = Some(mark);
                PersistOutcome::Saved
            }
            Err(err) => {
                log::warn!("event=state_save_failed error={err}");
                self.notify(NoticeKind::Warning, format!("Failed to save state: {err}"));
                PersistOutcome::Failed
            }
        }
    }

    /// Validates and exports the current groups. Failures become notices.
    pub fn export(
        &mut self,
        target: &dyn ExportTarget,
        destination: ExportDestination,
    ) -> Option<ExportSummary> {
        let plan = match ExportPlan::build(self.file_path(), self.groups.groups(), destination) {
            Ok(plan) => plan,
            Err(err) => {
                self.notify(NoticeKind::Error, format!("Export refused: {err}"));
                return None;
            }
        };

        match target.export(&plan) {
            Ok(summary) => {
                self.notify(
                    NoticeKind::Info,
                    format!(
                        "Done! {} files, {} passages.",
                        summary.files_written, summary.total_passages
                    ),
                );
                Some(summary)
            }
            Err(err) => {
                log::warn!("event=export_failed error={err}");
                self.notify(NoticeKind::Error, format!("Export failed: {err}"));
                None
            }
        }
    }

    pub fn auto_group(&mut self) {
        self.groups.group_by_tag(&self.passages);
    }

    pub fn handle_pointer(&mut self, event: PointerEvent, view: &dyn CanvasView) {
        self.selection.handle(event, view);
    }

    /// Context menu "new group".
    pub fn create_group_from_selection(&mut self) -> Option<GroupId> {
        self.selection.create_group_and_assign(&mut self.groups)
    }

    /// Context menu "move to".
    pub fn assign_selection_to(&mut self, id: &GroupId) -> bool {
        self.selection.assign_to_existing(&mut self.groups, id)
    }

    /// Nodes in document order, positioned by the current layout.
    pub fn canvas_nodes(&self) -> Vec<CanvasNode> {
        let groups = self.groups.groups();
        let mut seen = HashSet::<&str>::new();
        self.passages
            .iter()
            .map(Passage::name)
            .filter(|name| seen.insert(*name))
            .filter_map(|name| self.layout.position(name).map(|position| (name, position)))
            .map(|(name, position)| {
                let slot = groups.iter().position(|group| group.contains(name));
                CanvasNode {
                    name: name.to_owned(),
                    position,
                    group: slot.map(|index| groups[index].id().clone()),
                    group_slot: slot,
                    selected: self.selection.is_selected(name),
                    highlighted: self.selection.highlighted() == Some(name),
                }
            })
            .collect()
    }

    pub fn preview(&self, name: &str) -> Option<PassagePreview> {
        let passage = self.passage(name)?;
        Some(PassagePreview {
            twee: passage_to_twee(passage),
            links_out: outgoing(&self.links, name).map(|l| l.target().to_owned()).collect(),
            links_in: incoming(&self.links, name).map(|l| l.source().to_owned()).collect(),
        })
    }

    /// Preview of the highlighted passage, if any.
    pub fn highlighted_preview(&self) -> Option<PassagePreview> {
        self.selection.highlighted().and_then(|name| self.preview(name))
    }

    fn apply_document(&mut self, path: String, passages: Vec<Passage>) {
        self.links = extract_links(&passages);
        self.layout = layout_passages_with(&passages, &self.layout_config);
        self.passages = passages;
        self.groups.reset();
        self.selection.reset();
        log::info!(
            "event=file_opened path={path} passages={} links={}",
            self.passages.len(),
            self.links.len()
        );
        self.file_path = Some(path);
    }

    fn mark(&self) -> PersistedMark {
        PersistedMark { rev: self.groups.rev(), file_path: self.file_path.clone() }
    }

    fn notify(&mut self, kind: NoticeKind, message: String) {
        self.notices.push(Notice::new(kind, message));
    }
}

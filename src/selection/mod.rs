// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rectangle selection on the passage canvas.
//!
//! A secondary-button drag sweeps a screen-space rectangle; nodes whose bounding-box center
//! falls inside it (after mapping the rectangle into canvas space) are selected. Releasing
//! over a non-empty selection opens the context menu, whose actions hand the selection to
//! the [`GroupStore`].
//!
//! The selection keeps the order in which the surface lists its nodes, so a group built from
//! a drag lists its passages in document order.
//!
//! ```text
//! Idle --secondary down--> Dragging --secondary up--> MenuOpen | Idle
//! MenuOpen --primary down / action / cancel--> Idle
//! MenuOpen --secondary down--> Dragging
//! ```

use std::collections::HashSet;

use crate::groups::GroupStore;
use crate::model::{CanvasPoint, GroupId, NodeGeometry, ScreenPoint, ScreenRect, Size};

/// Host rendering surface, as far as selection needs it.
pub trait CanvasView {
    /// Maps a screen point into canvas space using the current pan/zoom.
    fn screen_to_canvas(&self, point: ScreenPoint) -> CanvasPoint;

    /// The freshest node geometry the surface knows about.
    fn nodes(&self) -> Vec<NodeGeometry>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionConfig {
    /// Movement on either axis beyond this (screen units) turns a click into a drag.
    pub drag_threshold: f64,
    /// Bounding box assumed for nodes the surface has not measured yet.
    pub default_node_size: Size,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { drag_threshold: 5.0, default_node_size: Size::new(150.0, 40.0) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(PointerButton, ScreenPoint),
    Move(ScreenPoint),
    Up(PointerButton, ScreenPoint),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionState {
    Idle,
    Dragging { anchor: ScreenPoint, current: ScreenPoint },
    MenuOpen { at: ScreenPoint },
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    config: SelectionConfig,
    state: SelectionState,
    /// Canvas node order for drags, insertion order otherwise; never holds duplicates.
    selected: Vec<String>,
    pre_drag: Vec<String>,
    highlighted: Option<String>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

impl SelectionController {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            state: SelectionState::Idle,
            selected: Vec::new(),
            pre_drag: Vec::new(),
            highlighted: None,
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|selected| selected == name)
    }

    /// The passage shown in the preview pane; independent of the multi-selection.
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn is_menu_open(&self) -> bool {
        matches!(self.state, SelectionState::MenuOpen { .. })
    }

    /// The live drag rectangle in screen space, for the host to draw.
    pub fn selection_box(&self) -> Option<ScreenRect> {
        match self.state {
            SelectionState::Dragging { anchor, current } => Some(ScreenRect::spanning(anchor, current)),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: PointerEvent, view: &dyn CanvasView) {
        match event {
            PointerEvent::Down(button, at) => self.pointer_down(button, at),
            PointerEvent::Move(at) => self.pointer_move(at, view),
            PointerEvent::Up(button, at) => self.pointer_up(button, at, view),
        }
    }

    pub fn pointer_down(&mut self, button: PointerButton, at: ScreenPoint) {
        match (button, self.state) {
            (PointerButton::Secondary, SelectionState::Dragging { .. }) => {
                self.state = SelectionState::Dragging { anchor: at, current: at };
            }
            (PointerButton::Secondary, _) => {
                self.pre_drag = self.selected.clone();
                self.state = SelectionState::Dragging { anchor: at, current: at };
            }
            (PointerButton::Primary, SelectionState::MenuOpen { .. }) => {
                self.state = SelectionState::Idle;
            }
            (PointerButton::Primary, _) => {}
        }
    }

    /// Tracks the drag and re-selects every node under the rectangle.
    pub fn pointer_move(&mut self, at: ScreenPoint, view: &dyn CanvasView) {
        let SelectionState::Dragging { anchor, .. } = self.state else {
            return;
        };
        self.state = SelectionState::Dragging { anchor, current: at };
        self.selected = self.nodes_in_rect(anchor, at, view);
    }

    pub fn pointer_up(&mut self, button: PointerButton, at: ScreenPoint, view: &dyn CanvasView) {
        if button != PointerButton::Secondary {
            return;
        }
        let SelectionState::Dragging { anchor, .. } = self.state else {
            return;
        };

        let dx = (at.x - anchor.x).abs();
        let dy = (at.y - anchor.y).abs();
        let dragged = dx > self.config.drag_threshold || dy > self.config.drag_threshold;

        if dragged {
            // Node geometry may have moved under the pointer mid-drag; ask again.
            self.selected = self.nodes_in_rect(anchor, at, view);
            if self.selected.len() == 1 {
                self.highlighted = self.selected.first().cloned();
            }
        } else {
            self.selected = std::mem::take(&mut self.pre_drag);
        }
        self.pre_drag.clear();

        self.state = if self.selected.is_empty() {
            SelectionState::Idle
        } else {
            log::debug!("event=selection_menu_opened selected={}", self.selected.len());
            SelectionState::MenuOpen { at }
        };
    }

    /// Closes the menu without touching the selection.
    pub fn primary_click(&mut self, at: ScreenPoint) {
        self.pointer_down(PointerButton::Primary, at);
    }

    /// Drops the selection and any drag or menu in progress.
    pub fn cancel(&mut self) {
        self.selected.clear();
        self.pre_drag.clear();
        self.state = SelectionState::Idle;
    }

    /// Forgets everything, including the highlighted passage. Used on document load.
    pub fn reset(&mut self) {
        self.cancel();
        self.highlighted = None;
    }

    /// "New group" menu action.
    ///
    /// Creates the group first and assigns the selection to it afterwards. Returns the new
    /// group's id, or `None` when there was nothing to assign.
    pub fn create_group_and_assign(&mut self, store: &mut GroupStore) -> Option<GroupId> {
        let names = self.take_for_commit()?;
        let id = store.create_group();
        store.assign(&id, names);
        Some(id)
    }

    /// "Move to <group>" menu action. Returns whether anything was assigned.
    pub fn assign_to_existing(&mut self, store: &mut GroupStore, id: &GroupId) -> bool {
        if store.get(id).is_none() {
            return false;
        }
        let Some(names) = self.take_for_commit() else {
            return false;
        };
        store.assign(id, names);
        true
    }

    /// Single-node click: updates the preview highlight only.
    pub fn click_node(&mut self, name: impl Into<String>) {
        self.highlighted = Some(name.into());
    }

    pub fn set_highlighted(&mut self, name: Option<String>) {
        self.highlighted = name;
    }

    /// List-view checkbox toggle.
    pub fn toggle(&mut self, name: &str) {
        match self.selected.iter().position(|selected| selected == name) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(name.to_owned()),
        }
    }

    pub fn select_many<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::<String>::new();
        self.selected =
            names.into_iter().map(Into::into).filter(|name| seen.insert(name.clone())).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    fn take_for_commit(&mut self) -> Option<Vec<String>> {
        if matches!(self.state, SelectionState::Dragging { .. }) || self.selected.is_empty() {
            return None;
        }
        let names = std::mem::take(&mut self.selected);
        self.state = SelectionState::Idle;
        Some(names)
    }

    fn nodes_in_rect(
        &self,
        a: ScreenPoint,
        b: ScreenPoint,
        view: &dyn CanvasView,
    ) -> Vec<String> {
        let rect = ScreenRect::spanning(a, b);
        let top_left = view.screen_to_canvas(rect.min);
        let bottom_right = view.screen_to_canvas(rect.max);

        let mut seen = HashSet::<String>::new();
        view.nodes()
            .into_iter()
            .filter(|node| {
                let center = node.center(self.config.default_node_size);
                center.x >= top_left.x
                    && center.x <= bottom_right.x
                    && center.y >= top_left.y
                    && center.y <= bottom_right.y
            })
            .map(|node| node.id)
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }
}

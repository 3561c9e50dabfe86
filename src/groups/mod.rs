// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Group store: the ordered group list and each group's assigned passages.
//!
//! A passage name belongs to at most one group at any time. Every mutation keeps that
//! invariant before returning and hands back a fresh snapshot; snapshots handed out earlier
//! never change. Unknown group ids are silently ignored.

use std::collections::{HashMap, HashSet};
use std::ops::Deref;
use std::sync::Arc;

use crate::model::{Group, GroupId, Passage};

const UNTAGGED: &str = "untagged";
const STORY_METADATA_PASSAGES: [&str; 2] = ["StoryData", "StoryTitle"];

/// Immutable view of the group list at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSnapshot(Arc<Vec<Group>>);

impl GroupSnapshot {
    pub fn groups(&self) -> &[Group] {
        &self.0
    }

    pub fn get(&self, id: &GroupId) -> Option<&Group> {
        self.0.iter().find(|group| group.id() == id)
    }

    pub fn to_vec(&self) -> Vec<Group> {
        self.0.as_ref().clone()
    }
}

impl Deref for GroupSnapshot {
    type Target = [Group];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct GroupStore {
    groups: Arc<Vec<Group>>,
    next_id: u64,
    rev: u64,
}

impl Default for GroupStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupStore {
    pub fn new() -> Self {
        Self { groups: Arc::new(Vec::new()), next_id: 1, rev: 0 }
    }

    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot(self.groups.clone())
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Bumped on every effective change.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// The id the next `create_group` will issue.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn get(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id() == id)
    }

    /// The group a passage is currently assigned to.
    pub fn group_of(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.contains(name))
    }

    pub fn assigned_names(&self) -> HashSet<&str> {
        self.groups
            .iter()
            .flat_map(|group| group.passage_names().iter().map(String::as_str))
            .collect()
    }

    /// Appends an empty group with a fresh id and a filename derived from it.
    pub fn create_group(&mut self) -> GroupId {
        let id = self.issue_id();
        let filename = format!("group{id}.twee");
        Arc::make_mut(&mut self.groups).push(Group::new(id.clone(), filename));
        log::debug!("event=group_created group_id={id}");
        self.commit();
        id
    }

    pub fn remove(&mut self, id: &GroupId) -> GroupSnapshot {
        let Some(index) = self.position(id) else {
            return self.snapshot();
        };
        Arc::make_mut(&mut self.groups).remove(index);
        self.commit()
    }

    /// Replaces the filename only. Uniqueness is checked at export time.
    pub fn rename(&mut self, id: &GroupId, filename: impl Into<String>) -> GroupSnapshot {
        let Some(index) = self.position(id) else {
            return self.snapshot();
        };
        let filename = filename.into();
        if self.groups[index].filename() == filename {
            return self.snapshot();
        }
        Arc::make_mut(&mut self.groups)[index].set_filename(filename);
        self.commit()
    }

    /// Moves `names` into the group `id`.
    ///
    /// Every listed name is first removed from every group, then the whole list is appended
    /// to the target in the given order. Repeats within `names` are kept as given.
    pub fn assign<I, S>(&mut self, id: &GroupId, names: I) -> GroupSnapshot
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(index) = self.position(id) else {
            return self.snapshot();
        };
        let names = names.into_iter().map(Into::into).collect::<Vec<String>>();
        if names.is_empty() {
            return self.snapshot();
        }

        let moving = names.iter().map(String::as_str).collect::<HashSet<_>>();
        let groups = Arc::make_mut(&mut self.groups);
        for group in groups.iter_mut() {
            group.passage_names_mut().retain(|name| !moving.contains(name.as_str()));
        }
        log::debug!("event=passages_assigned group_id={id} count={}", names.len());
        groups[index].passage_names_mut().extend(names);
        self.commit()
    }

    /// Removes one name from one group.
    pub fn unassign(&mut self, id: &GroupId, name: &str) -> GroupSnapshot {
        let Some(index) = self.position(id) else {
            return self.snapshot();
        };
        if !self.groups[index].contains(name) {
            return self.snapshot();
        }
        Arc::make_mut(&mut self.groups)[index].passage_names_mut().retain(|n| n != name);
        self.commit()
    }

    /// Replaces the list with groups loaded from persistence.
    ///
    /// The id counter moves past the largest numeric id in the loaded set. A passage listed
    /// in several groups stays only in the first one; a repeated group id keeps its first
    /// group.
    pub fn replace_all(&mut self, groups: Vec<Group>) -> GroupSnapshot {
        let mut ids = HashSet::<GroupId>::new();
        let mut owner = HashMap::<String, usize>::new();
        let mut normalized = Vec::<Group>::with_capacity(groups.len());

        for mut group in groups {
            if !ids.insert(group.id().clone()) {
                log::warn!("event=duplicate_group_id_dropped group_id={}", group.id());
                continue;
            }
            let index = normalized.len();
            group.passage_names_mut().retain(|name| {
                let first = *owner.entry(name.clone()).or_insert(index);
                first == index
            });
            normalized.push(group);
        }

        let max_loaded = normalized.iter().filter_map(|group| group.id().numeric()).max();
        if let Some(max_loaded) = max_loaded {
            self.next_id = self.next_id.max(max_loaded.saturating_add(1));
        }

        self.groups = Arc::new(normalized);
        self.commit()
    }

    /// Drops every group. The id counter is kept so ids are never reused.
    pub fn reset(&mut self) -> GroupSnapshot {
        if self.groups.is_empty() {
            return self.snapshot();
        }
        self.groups = Arc::new(Vec::new());
        self.commit()
    }

    /// Replaces the list with one group per first tag.
    ///
    /// Story metadata passages are skipped; untagged passages share an `untagged` group.
    /// Groups appear in the order their tag is first seen.
    pub fn group_by_tag(&mut self, passages: &[Passage]) -> GroupSnapshot {
        let mut order = Vec::<&str>::new();
        let mut buckets = HashMap::<&str, Vec<String>>::new();

        for passage in passages {
            if STORY_METADATA_PASSAGES.contains(&passage.name()) {
                continue;
            }
            let tag = passage.first_tag().unwrap_or(UNTAGGED);
            buckets
                .entry(tag)
                .or_insert_with(|| {
                    order.push(tag);
                    Vec::new()
                })
                .push(passage.name().to_owned());
        }

        let mut groups = Vec::with_capacity(order.len());
        for tag in order {
            let names = buckets.remove(tag).unwrap_or_default();
            let id = self.issue_id();
            groups.push(Group::new(id, format!("{tag}.twee")).with_passage_names(names));
        }

        log::info!("event=auto_grouped groups={}", groups.len());
        self.replace_all(groups)
    }

    fn issue_id(&mut self) -> GroupId {
        let id = GroupId::from_counter(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn position(&self, id: &GroupId) -> Option<usize> {
        self.groups.iter().position(|group| group.id() == id)
    }

    fn commit(&mut self) -> GroupSnapshot {
        self.rev = self.rev.wrapping_add(1);
        self.snapshot()
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::geometry::Position;

/// A named unit of story content as delivered by the passage source.
///
/// Passages are immutable once loaded; a new document load replaces the whole list.
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    name: String,
    tags: Option<String>,
    content: String,
    line: u32,
    position: Option<String>,
    size: Option<String>,
}

impl Passage {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: None,
            content: content.into(),
            line: 0,
            position: None,
            size: None,
        }
    }

    pub fn with_tags<T: Into<String>>(mut self, tags: Option<T>) -> Self {
        self.tags = tags.map(Into::into);
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    pub fn with_position<T: Into<String>>(mut self, position: Option<T>) -> Self {
        self.position = position.map(Into::into);
        self
    }

    pub fn with_size<T: Into<String>>(mut self, size: Option<T>) -> Self {
        self.size = size.map(Into::into);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Source line of the passage header. Diagnostic only.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The raw stored `"x,y"` position string, if the document carried one.
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Space-delimited tag tokens, empty tokens dropped.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.as_deref().unwrap_or("").split(' ').filter(|tag| !tag.is_empty())
    }

    pub fn first_tag(&self) -> Option<&str> {
        self.tag_list().next()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_list().any(|candidate| candidate == tag)
    }

    /// Parses the stored position.
    ///
    /// Valid means exactly two comma-separated parts, each a finite number once trimmed.
    pub fn stored_position(&self) -> Option<Position> {
        parse_stored_position(self.position.as_deref()?)
    }
}

pub(crate) fn parse_stored_position(raw: &str) -> Option<Position> {
    let mut parts = raw.split(',');
    let x = parse_coordinate(parts.next()?)?;
    let y = parse_coordinate(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Position::new(x, y))
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    // An empty part makes the whole position invalid; it is not read as 0.
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

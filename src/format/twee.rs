// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Twee text rendering for passages.
//!
//! This only writes; reading Twee is the passage source's job.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::model::Passage;

const DEFAULT_POSITION: &str = "0,0";
const DEFAULT_SIZE: &str = "100,100";

/// Renders one passage as a Twee block: `:: Name [tags] {metadata}` followed by the content.
pub fn passage_to_twee(passage: &Passage) -> String {
    let mut out = format!(":: {}", passage.name());

    if let Some(tags) = passage.tags().filter(|tags| !tags.is_empty()) {
        let _ = write!(out, " [{tags}]");
    }

    if passage.position().is_some() || passage.size().is_some() {
        let position = passage.position().unwrap_or(DEFAULT_POSITION);
        let size = passage.size().unwrap_or(DEFAULT_SIZE);
        let _ = write!(out, " {{\"position\":\"{position}\",\"size\":\"{size}\"}}");
    }

    out.push('\n');
    out.push_str(passage.content());
    out
}

/// Renders the named passages, in the given order, as one Twee document.
///
/// Names that are not part of `passages` are skipped.
pub fn group_to_twee(names: &[String], passages: &[Passage]) -> String {
    PassageIndex::new(passages).render_group(names).text
}

/// Name lookup over a passage list; the first passage with a given name wins.
#[derive(Debug)]
pub struct PassageIndex<'a> {
    by_name: HashMap<&'a str, &'a Passage>,
}

/// One group's Twee text and the number of passages that went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGroup {
    pub text: String,
    pub passages: usize,
}

impl<'a> PassageIndex<'a> {
    pub fn new(passages: &'a [Passage]) -> Self {
        let by_name = passages.iter().rev().map(|passage| (passage.name(), passage)).collect();
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a Passage> {
        self.by_name.get(name).copied()
    }

    pub fn render_group(&self, names: &[String]) -> RenderedGroup {
        let blocks = names
            .iter()
            .filter_map(|name| self.get(name))
            .map(passage_to_twee)
            .collect::<Vec<_>>();
        RenderedGroup { passages: blocks.len(), text: blocks.join("\n\n") }
    }
}

#[cfg(test)]
mod tests {
    use super::{group_to_twee, passage_to_twee, PassageIndex};
    use crate::model::Passage;

    #[test]
    fn plain_passage_has_bare_header() {
        let passage = Passage::new("Start", "Hello.");
        assert_eq!(passage_to_twee(&passage), ":: Start\nHello.");
    }

    #[test]
    fn header_carries_tags_and_metadata() {
        let passage = Passage::new("Hall", "Dark.")
            .with_tags(Some("indoor dark"))
            .with_position(Some("300,100"));
        assert_eq!(
            passage_to_twee(&passage),
            ":: Hall [indoor dark] {\"position\":\"300,100\",\"size\":\"100,100\"}\nDark."
        );
    }

    #[test]
    fn empty_tags_are_omitted() {
        let passage = Passage::new("Hall", "").with_tags(Some("")).with_size(Some("200,100"));
        assert_eq!(
            passage_to_twee(&passage),
            ":: Hall {\"position\":\"0,0\",\"size\":\"200,100\"}\n"
        );
    }

    #[test]
    fn group_follows_name_order_and_skips_unknown() {
        let passages = vec![Passage::new("A", "a"), Passage::new("B", "b")];
        let names = vec!["B".to_owned(), "Missing".to_owned(), "A".to_owned()];
        assert_eq!(group_to_twee(&names, &passages), ":: B\nb\n\n:: A\na");
    }

    #[test]
    fn rendered_group_counts_only_known_passages() {
        let passages =
            vec![Passage::new("A", "first"), Passage::new("B", "b"), Passage::new("A", "second")];
        let index = PassageIndex::new(&passages);
        let names = vec!["A".to_owned(), "Missing".to_owned(), "A".to_owned()];

        let rendered = index.render_group(&names);

        assert_eq!(rendered.passages, 2);
        assert_eq!(rendered.text, ":: A\nfirst\n\n:: A\nfirst");
        assert!(index.render_group(&["Missing".to_owned()]).text.is_empty());
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeSet, HashSet};

use crate::model::Passage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    /// Case-insensitive substring match; input order is kept.
    #[default]
    Regular,
    /// Subsequence match ranked by similarity.
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PassageFilter {
    query: String,
    tag: Option<String>,
    kind: SearchKind,
}

impl PassageFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Only passages carrying exactly this tag token.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_kind(mut self, kind: SearchKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }
}

/// Every distinct tag token in the document, sorted.
pub fn all_tags(passages: &[Passage]) -> Vec<String> {
    passages
        .iter()
        .flat_map(Passage::tag_list)
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Passages not assigned to any group, in document order.
pub fn unassigned_names<'a>(passages: &'a [Passage], assigned: &HashSet<&str>) -> Vec<&'a str> {
    passages.iter().map(Passage::name).filter(|name| !assigned.contains(name)).collect()
}

/// Applies the tag filter and name search, then moves unassigned passages to the front.
///
/// The partition is stable: within the unassigned and assigned halves, regular search keeps
/// document order and fuzzy search orders by descending score.
pub fn filter_passages<'a>(
    passages: &'a [Passage],
    assigned: &HashSet<&str>,
    filter: &PassageFilter,
) -> Vec<&'a Passage> {
    let needle = filter.query.trim().to_lowercase();

    let mut matches = Vec::<(i64, usize)>::new();
    for (idx, passage) in passages.iter().enumerate() {
        if let Some(tag) = filter.tag.as_deref() {
            if !passage.has_tag(tag) {
                continue;
            }
        }
        if needle.is_empty() {
            matches.push((0, idx));
            continue;
        }
        let haystack = passage.name().to_lowercase();
        let score = match filter.kind {
            SearchKind::Regular => haystack.contains(&needle).then_some(0),
            SearchKind::Fuzzy => fuzzy_score(&needle, &haystack),
        };
        if let Some(score) = score {
            matches.push((score, idx));
        }
    }

    let is_assigned = |idx: usize| assigned.contains(passages[idx].name());
    matches.sort_by(|(score_a, idx_a), (score_b, idx_b)| {
        is_assigned(*idx_a)
            .cmp(&is_assigned(*idx_b))
            .then_with(|| score_b.cmp(score_a))
            .then_with(|| idx_a.cmp(idx_b))
    });

    matches.into_iter().map(|(_, idx)| &passages[idx]).collect()
}

#[derive(Debug, Clone, Copy)]
struct SubsequenceStats {
    first: usize,
    span: usize,
    consecutive: usize,
    start_boundary: bool,
}

fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let subseq = subsequence_stats(needle, haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());
    let ratio_score = (ratio * 1000.0).round() as i64;

    let mut score = ratio_score;
    score -= subseq.span as i64;
    score -= (subseq.first as i64) / 4;
    score += (subseq.consecutive as i64) * 40;
    if subseq.start_boundary {
        score += 150;
    }
    if haystack.contains(needle) {
        score += 2000;
    } else {
        score += 500;
    }

    Some(score)
}

fn subsequence_stats(needle: &str, haystack: &str) -> Option<SubsequenceStats> {
    let mut needle_iter = needle.chars().peekable();
    let mut first: Option<usize> = None;
    let mut last: usize = 0;
    let mut prev_match: Option<usize> = None;
    let mut consecutive: usize = 0;
    let mut start_boundary = false;
    let mut prev_hay: Option<char> = None;

    for (idx, ch) in haystack.chars().enumerate() {
        let Some(&want) = needle_iter.peek() else {
            break;
        };

        if ch == want {
            needle_iter.next();
            if first.is_none() {
                first = Some(idx);
                start_boundary = prev_hay.map_or(true, is_word_boundary);
            }
            if prev_match.is_some_and(|prev| idx == prev + 1) {
                consecutive += 1;
            }
            prev_match = Some(idx);
            last = idx;
        }

        prev_hay = Some(ch);
    }

    if needle_iter.peek().is_some() {
        return None;
    }

    let first = first?;
    Some(SubsequenceStats {
        first,
        span: last.saturating_sub(first).saturating_add(1),
        consecutive,
        start_boundary,
    })
}

fn is_word_boundary(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '_' | '.' | ':' | '/')
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::{all_tags, filter_passages, unassigned_names, PassageFilter, SearchKind};
    use crate::model::Passage;

    #[fixture]
    fn passages() -> Vec<Passage> {
        vec![
            Passage::new("Start", "").with_tags(Some("intro")),
            Passage::new("Dark Forest", "").with_tags(Some("forest  night")),
            Passage::new("Forest Edge", "").with_tags(Some("forest")),
            Passage::new("Ending", ""),
        ]
    }

    fn names<'a>(list: &[&'a Passage]) -> Vec<&'a str> {
        list.iter().map(|p| p.name()).collect()
    }

    #[rstest]
    fn all_tags_are_sorted_and_unique(passages: Vec<Passage>) {
        assert_eq!(all_tags(&passages), vec!["forest", "intro", "night"]);
    }

    #[rstest]
    fn unassigned_names_keep_document_order(passages: Vec<Passage>) {
        let assigned = HashSet::from(["Dark Forest"]);
        assert_eq!(unassigned_names(&passages, &assigned), vec!["Start", "Forest Edge", "Ending"]);
    }

    #[rstest]
    fn empty_filter_lists_unassigned_first(passages: Vec<Passage>) {
        let assigned = HashSet::from(["Start", "Forest Edge"]);

        let out = filter_passages(&passages, &assigned, &PassageFilter::new());

        assert_eq!(names(&out), vec!["Dark Forest", "Ending", "Start", "Forest Edge"]);
    }

    #[rstest]
    #[case::lowercase("forest", vec!["Dark Forest", "Forest Edge"])]
    #[case::mixed_case("FoReSt", vec!["Dark Forest", "Forest Edge"])]
    #[case::padded("  end ", vec!["Ending"])]
    #[case::no_match("cave", vec![])]
    fn regular_search_is_case_insensitive_substring(
        passages: Vec<Passage>,
        #[case] query: &str,
        #[case] expected: Vec<&str>,
    ) {
        let filter = PassageFilter::new().with_query(query);

        let out = filter_passages(&passages, &HashSet::new(), &filter);

        assert_eq!(names(&out), expected);
    }

    #[rstest]
    fn tag_filter_matches_whole_tokens(passages: Vec<Passage>) {
        let filter = PassageFilter::new().with_tag("night");
        let out = filter_passages(&passages, &HashSet::new(), &filter);
        assert_eq!(names(&out), vec!["Dark Forest"]);

        let filter = PassageFilter::new().with_tag("fore");
        assert!(filter_passages(&passages, &HashSet::new(), &filter).is_empty());
    }

    #[rstest]
    fn tag_and_query_combine(passages: Vec<Passage>) {
        let filter = PassageFilter::new().with_tag("forest").with_query("edge");
        let out = filter_passages(&passages, &HashSet::new(), &filter);
        assert_eq!(names(&out), vec!["Forest Edge"]);
    }

    #[rstest]
    fn fuzzy_search_matches_subsequences(passages: Vec<Passage>) {
        let filter = PassageFilter::new().with_query("frst").with_kind(SearchKind::Fuzzy);

        let out = filter_passages(&passages, &HashSet::new(), &filter);

        let mut found = names(&out);
        found.sort_unstable();
        assert_eq!(found, vec!["Dark Forest", "Forest Edge"]);
    }

    #[rstest]
    fn fuzzy_search_ranks_prefix_matches_higher(passages: Vec<Passage>) {
        let filter = PassageFilter::new().with_query("forest").with_kind(SearchKind::Fuzzy);

        let out = filter_passages(&passages, &HashSet::new(), &filter);

        assert_eq!(names(&out), vec!["Forest Edge", "Dark Forest"]);
    }

    #[rstest]
    fn fuzzy_ranking_still_puts_unassigned_first(passages: Vec<Passage>) {
        let assigned = HashSet::from(["Forest Edge"]);
        let filter = PassageFilter::new().with_query("forest").with_kind(SearchKind::Fuzzy);

        let out = filter_passages(&passages, &assigned, &filter);

        assert_eq!(names(&out), vec!["Dark Forest", "Forest Edge"]);
    }
}

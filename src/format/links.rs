// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reference graph extraction from passage markup.
//!
//! Recognized forms (SugarCube/Harlowe style):
//! - `[[Target]]`
//! - `[[display text|Target]]`
//! - `[[display text->Target]]`
//! - `[[Target<-display text]]`

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Link, Passage};

fn link_markup() -> &'static Regex {
    static LINK_MARKUP: OnceLock<Regex> = OnceLock::new();
    LINK_MARKUP.get_or_init(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("link markup regex is valid"))
}

/// Resolves the target passage name from the inner text of one `[[...]]` occurrence.
pub fn resolve_link_target(inner: &str) -> &str {
    let target = if let Some(idx) = inner.rfind('|') {
        &inner[idx + 1..]
    } else if let Some(idx) = inner.rfind("->") {
        &inner[idx + 2..]
    } else if let Some(idx) = inner.find("<-") {
        &inner[..idx]
    } else {
        inner
    };
    target.trim()
}

/// Extracts the directed link graph between `passages`.
///
/// Links are ordered by source passage (input order), then by occurrence in the content.
/// Targets that do not name a loaded passage are dropped, and each ordered
/// `(source, target)` pair is reported once.
pub fn extract_links(passages: &[Passage]) -> Vec<Link> {
    let names = passages.iter().map(Passage::name).collect::<HashSet<_>>();
    let mut seen = HashSet::<(&str, &str)>::new();
    let mut links = Vec::new();

    for passage in passages {
        for captures in link_markup().captures_iter(passage.content()) {
            let Some(inner) = captures.get(1) else {
                continue;
            };
            let target = resolve_link_target(inner.as_str());
            let Some(&target) = names.get(target) else {
                continue;
            };
            if seen.insert((passage.name(), target)) {
                links.push(Link::new(passage.name(), target));
            }
        }
    }

    links
}

pub fn outgoing<'a>(links: &'a [Link], name: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
    links.iter().filter(move |link| link.source() == name)
}

pub fn incoming<'a>(links: &'a [Link], name: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
    links.iter().filter(move |link| link.target() == name)
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use tweesplit::model::{Link, Passage};

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    if prefix.len() >= target_len {
        return prefix[..target_len].to_owned();
    }

    let mut out = String::with_capacity(target_len);
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

pub fn checksum_links(links: &[Link]) -> u64 {
    let mut acc = 0u64;
    for link in links {
        acc = acc.wrapping_mul(131).wrapping_add(link.source().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(link.target().len() as u64);
    }
    acc
}

pub mod story {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Params {
        pub passages: usize,
        pub links_per_passage: usize,
        /// Every n-th passage carries a stored position; 0 means none do.
        pub positioned_every: usize,
        pub prose_len: usize,
    }

    impl Params {
        pub const fn new(
            passages: usize,
            links_per_passage: usize,
            positioned_every: usize,
            prose_len: usize,
        ) -> Self {
            Self { passages, links_per_passage, positioned_every, prose_len }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        Medium,
        LargeLongText,
        Positioned,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::Medium => "medium",
                Self::LargeLongText => "large_long_text",
                Self::Positioned => "positioned",
            }
        }

        pub const fn params(self) -> Params {
            match self {
                Self::Small => Params::new(40, 2, 0, 80),
                Self::Medium => Params::new(400, 4, 0, 240),
                Self::LargeLongText => Params::new(2_000, 6, 0, 2_048),
                Self::Positioned => Params::new(600, 3, 3, 120),
            }
        }
    }

    fn passage_name(idx: usize) -> String {
        format!("Room {idx:05}")
    }

    /// Deterministic passage list.
    ///
    /// Link syntaxes rotate through simple, arrow, back-arrow and pipe so every branch of the
    /// resolver is hit. Stored positions sit on a loose diagonal band.
    pub fn story(params: Params) -> Vec<Passage> {
        assert!(params.passages >= 2, "passages must be >= 2");

        (0..params.passages)
            .map(|idx| {
                let mut content = ascii_repeat_to_len("It is quiet here. ", '.', params.prose_len);
                for k in 0..params.links_per_passage {
                    let target = passage_name((idx + 1 + k * 7) % params.passages);
                    let link = match k % 4 {
                        0 => format!(" [[{target}]]"),
                        1 => format!(" [[Go on->{target}]]"),
                        2 => format!(" [[{target}<-Back]]"),
                        _ => format!(" [[Take it|{target}]]"),
                    };
                    content.push_str(&link);
                }

                let tags = format!("floor{} wing{}", idx % 5, idx % 3);
                let position = (params.positioned_every > 0 && idx % params.positioned_every == 0)
                    .then(|| format!("{},{}", (idx % 40) * 220, (idx / 40) * 120 + (idx % 7) * 30));

                Passage::new(passage_name(idx), content)
                    .with_tags(Some(tags))
                    .with_line(idx as u32 * 3 + 1)
                    .with_position(position)
            })
            .collect()
    }

    pub fn fixture(case: Case) -> Vec<Passage> {
        story(case.params())
    }
}

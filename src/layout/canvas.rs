// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, HashSet};

use crate::model::{Passage, Position};

/// Spacing and search limits for automatic placement.
///
/// Both gaps must be positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub gap_x: f64,
    pub gap_y: f64,
    /// Ring search stops before this Chebyshev radius.
    pub max_rings: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { gap_x: 220.0, gap_y: 120.0, max_rings: 50 }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasLayout {
    placements: BTreeMap<String, PassagePlacement>,
}

impl CanvasLayout {
    pub fn placements(&self) -> &BTreeMap<String, PassagePlacement> {
        &self.placements
    }

    pub fn placement(&self, name: &str) -> Option<&PassagePlacement> {
        self.placements.get(name)
    }

    pub fn position(&self, name: &str) -> Option<Position> {
        self.placement(name).map(PassagePlacement::position)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassagePlacement {
    position: Position,
    origin: PlacementOrigin,
}

impl PassagePlacement {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn origin(&self) -> PlacementOrigin {
        self.origin
    }
}

/// How a passage got its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOrigin {
    /// Authored position carried by the document.
    Stored,
    /// Row-major grid; used when no passage has a stored position.
    Grid,
    /// Nearest free cell around the centroid of the stored positions.
    Ring,
    /// Ring search ran out of radius.
    Fallback,
}

/// A discretized `gap_x * gap_y` bucket of canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    x: i64,
    y: i64,
}

impl GridCell {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    /// The cell a canvas position falls into, rounding each axis half-up.
    pub fn containing(position: Position, config: &LayoutConfig) -> Self {
        Self::new(round_half_up(position.x / config.gap_x), round_half_up(position.y / config.gap_y))
    }

    fn offset(self, dx: i64, dy: i64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    fn origin_position(self, config: &LayoutConfig) -> Position {
        Position::new(self.x as f64 * config.gap_x, self.y as f64 * config.gap_y)
    }
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Lays out `passages` with the default spacing.
pub fn layout_passages(passages: &[Passage]) -> CanvasLayout {
    layout_passages_with(passages, &LayoutConfig::default())
}

/// Assigns a canvas position to every passage.
///
/// Stored positions are kept verbatim. When no passage carries one, everything goes on a
/// square-ish row-major grid. Otherwise each unpositioned passage takes the nearest free
/// grid cell around the centroid of the stored positions, in input order.
///
/// The result depends only on the passages and their order. If a name repeats, its first
/// occurrence wins.
pub fn layout_passages_with(passages: &[Passage], config: &LayoutConfig) -> CanvasLayout {
    let mut seen = HashSet::<&str>::with_capacity(passages.len());
    let mut stored = Vec::<(&str, Position)>::new();
    let mut unpositioned = Vec::<&str>::new();

    for passage in passages {
        if !seen.insert(passage.name()) {
            continue;
        }
        match passage.stored_position() {
            Some(position) => stored.push((passage.name(), position)),
            None => unpositioned.push(passage.name()),
        }
    }

    let mut placements = BTreeMap::<String, PassagePlacement>::new();
    for (name, position) in &stored {
        placements.insert(
            (*name).to_owned(),
            PassagePlacement { position: *position, origin: PlacementOrigin::Stored },
        );
    }

    if unpositioned.is_empty() {
        return CanvasLayout { placements };
    }

    if stored.is_empty() {
        place_on_grid(&unpositioned, config, &mut placements);
    } else {
        place_around_centroid(&stored, &unpositioned, config, &mut placements);
    }

    CanvasLayout { placements }
}

fn place_on_grid(
    names: &[&str],
    config: &LayoutConfig,
    placements: &mut BTreeMap<String, PassagePlacement>,
) {
    let columns = ((names.len() as f64).sqrt().ceil() as usize).max(1);
    for (idx, name) in names.iter().enumerate() {
        let position = Position::new(
            (idx % columns) as f64 * config.gap_x,
            (idx / columns) as f64 * config.gap_y,
        );
        placements.insert(
            (*name).to_owned(),
            PassagePlacement { position, origin: PlacementOrigin::Grid },
        );
    }
}

fn place_around_centroid(
    stored: &[(&str, Position)],
    unpositioned: &[&str],
    config: &LayoutConfig,
    placements: &mut BTreeMap<String, PassagePlacement>,
) {
    let mut occupied = stored
        .iter()
        .map(|(_, position)| GridCell::containing(*position, config))
        .collect::<HashSet<_>>();

    let count = stored.len() as f64;
    let (sum_x, sum_y) =
        stored.iter().fold((0.0, 0.0), |(x, y), (_, position)| (x + position.x, y + position.y));
    let centroid = Position::new(sum_x / count, sum_y / count);
    let centroid_cell = GridCell::containing(centroid, config);

    for name in unpositioned {
        let placement = match find_free_cell(centroid_cell, &occupied, config.max_rings) {
            Some(cell) => {
                occupied.insert(cell);
                PassagePlacement {
                    position: cell.origin_position(config),
                    origin: PlacementOrigin::Ring,
                }
            }
            None => {
                let position = Position::new(centroid.x, centroid.y + config.gap_y);
                log::debug!(
                    "event=layout_ring_exhausted passage={name:?} max_rings={}",
                    config.max_rings
                );
                occupied.insert(GridCell::containing(position, config));
                PassagePlacement { position, origin: PlacementOrigin::Fallback }
            }
        };
        placements.insert((*name).to_owned(), placement);
    }
}

/// Scans square rings around `center`, radius 1 upwards, for the first unoccupied cell.
///
/// Within a ring the scan runs `dx` outer and `dy` inner, both from `-r` to `r`.
fn find_free_cell(center: GridCell, occupied: &HashSet<GridCell>, max_rings: i64) -> Option<GridCell> {
    for r in 1..max_rings {
        for dx in -r..=r {
            for dy in -r..=r {
                if dx.abs() != r && dy.abs() != r {
                    continue;
                }
                let cell = center.offset(dx, dy);
                if !occupied.contains(&cell) {
                    return Some(cell);
                }
            }
        }
    }
    None
}

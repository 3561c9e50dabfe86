// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Points and boxes in the two coordinate spaces the canvas deals with.
//!
//! Screen space is what pointer events report; canvas space is where passages live.

/// A passage position in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub type CanvasPoint = Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in screen space, normalized so `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenRect {
    pub fn spanning(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            min: ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Live geometry of one rendered node, as reported by the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGeometry {
    pub id: String,
    pub position: Position,
    pub measured: Option<Size>,
}

impl NodeGeometry {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self { id: id.into(), position, measured: None }
    }

    pub fn with_measured(mut self, size: Size) -> Self {
        self.measured = Some(size);
        self
    }

    /// Center of the node's bounding box; unmeasured nodes use `fallback`.
    pub fn center(&self, fallback: Size) -> CanvasPoint {
        let size = self.measured.unwrap_or(fallback);
        Position::new(self.position.x + size.width / 2.0, self.position.y + size.height / 2.0)
    }
}

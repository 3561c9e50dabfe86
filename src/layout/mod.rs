// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas placement for passages.
//!
//! Authored positions are kept; everything else lands on the `gap_x * gap_y` grid.

pub mod canvas;

pub use canvas::{
    layout_passages, layout_passages_with, CanvasLayout, GridCell, LayoutConfig,
    PassagePlacement, PlacementOrigin,
};

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Passages come from the passage source; links and positions are derived from them; groups
//! are the only user-authored state.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod group;
pub mod ids;
pub mod link;
pub mod passage;

pub use geometry::{CanvasPoint, NodeGeometry, Position, ScreenPoint, ScreenRect, Size};
pub use group::{AppState, Group};
pub use ids::{GroupId, Id, IdError};
pub use link::Link;
pub use passage::Passage;

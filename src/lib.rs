// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! tweesplit: split a Twee story into several files by grouping its passages.
//!
//! The engine derives a link graph and a canvas layout from the passage list, keeps passages
//! in exclusive groups, and turns rectangle drags on the canvas into group assignments.

pub mod export;
pub mod format;
pub mod groups;
pub mod input;
pub mod layout;
pub mod logging;
pub mod model;
pub mod query;
pub mod selection;
pub mod source;
pub mod store;
pub mod workspace;

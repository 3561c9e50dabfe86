// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the loaded passage list.
//!
//! These power the passage list pane: tag filters, name search and the unassigned view.

pub mod passages;

pub use passages::{all_tags, filter_passages, unassigned_names, PassageFilter, SearchKind};

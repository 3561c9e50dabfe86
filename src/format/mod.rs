// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Story text handling: link extraction from passage markup and Twee output.

pub mod links;
pub mod twee;

pub use links::{extract_links, incoming, outgoing, resolve_link_target};
pub use twee::{group_to_twee, passage_to_twee, PassageIndex, RenderedGroup};

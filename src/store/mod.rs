// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the split state on disk.
//!
//! The state folder holds a single `state.json` with the open file path and the group list.

pub(crate) mod atomic;
pub mod state_folder;

use crate::model::AppState;

pub use atomic::WriteDurability;
pub use state_folder::{StateFolder, StoreError};

/// Where the split state round-trips between sessions.
pub trait StatePersistence {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<AppState>, StoreError>;

    fn save(&self, state: &AppState) -> Result<(), StoreError>;
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::passage::Passage;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Scratch directory removed on drop.
pub(crate) struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub(crate) fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("tweesplit-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Small story with metadata passages, tags, links and one authored position.
pub(crate) fn cave_story() -> Vec<Passage> {
    vec![
        Passage::new("StoryTitle", "The Cave").with_line(1),
        Passage::new("StoryData", "{\"ifid\": \"0000\"}").with_line(4),
        Passage::new("Start", "You wake up. [[Go in|Cave]] or [[Leave]]?")
            .with_tags(Some("intro"))
            .with_line(7)
            .with_position(Some("100,100"))
            .with_size(Some("200,100")),
        Passage::new("Cave", "Dark. [[Back->Start]] [[Deeper]]").with_tags(Some("cave dark")).with_line(10),
        Passage::new("Deeper", "The end. [[Start<-Again]]").with_tags(Some("cave")).with_line(13),
        Passage::new("Leave", "You walk away.").with_line(16),
    ]
}

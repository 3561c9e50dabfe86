// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{ExportDestination, ExportError, ExportPlan, ExportSummary, ExportTarget};
use crate::format::twee::PassageIndex;
use crate::model::Passage;
use crate::store::atomic::write_atomic;
use crate::store::WriteDurability;

/// Writes each planned group as Twee text built from the loaded passages.
///
/// Names that are not in `passages` are skipped and do not count towards
/// [`ExportSummary::total_passages`].
#[derive(Debug, Clone, Copy)]
pub struct TweeExporter<'a> {
    passages: &'a [Passage],
    durability: WriteDurability,
}

impl<'a> TweeExporter<'a> {
    pub fn new(passages: &'a [Passage]) -> Self {
        Self { passages, durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    fn rendered_files<'p>(&self, plan: &'p ExportPlan) -> (Vec<(&'p str, String)>, usize) {
        let index = PassageIndex::new(self.passages);
        let mut total_passages = 0usize;
        let files = plan
            .groups()
            .iter()
            .map(|group| {
                let rendered = index.render_group(group.passage_names());
                total_passages += rendered.passages;
                (group.filename(), rendered.text)
            })
            .collect();
        (files, total_passages)
    }

    fn write_directory(&self, dir: &Path, files: &[(&str, String)]) -> Result<(), ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io { path: dir.to_path_buf(), source })?;
        for (filename, text) in files {
            let path = dir.join(filename);
            write_atomic(&path, text.as_bytes(), self.durability)
                .map_err(|source| ExportError::Io { path: path.clone(), source })?;
        }
        Ok(())
    }

    fn write_archive(&self, path: &Path, files: &[(&str, String)]) -> Result<(), ExportError> {
        let zip_err = |source| ExportError::Zip { path: path.to_path_buf(), source };

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (filename, text) in files {
            zip.start_file(*filename, options).map_err(zip_err)?;
            zip.write_all(text.as_bytes())
                .map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;
        }
        let bytes = zip.finish().map_err(zip_err)?.into_inner();

        write_atomic(path, &bytes, self.durability)
            .map_err(|source| ExportError::Io { path: path.to_path_buf(), source })
    }
}

impl ExportTarget for TweeExporter<'_> {
    fn export(&self, plan: &ExportPlan) -> Result<ExportSummary, ExportError> {
        let (files, total_passages) = self.rendered_files(plan);

        match plan.destination() {
            ExportDestination::Directory(dir) => self.write_directory(dir, &files)?,
            ExportDestination::Archive(path) => self.write_archive(path, &files)?,
        }

        let summary = ExportSummary { files_written: files.len(), total_passages };
        log::info!(
            "event=export_written destination={} files={} passages={}",
            plan.destination().path().display(),
            summary.files_written,
            summary.total_passages
        );
        Ok(summary)
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Logger bootstrap for the binary.
//!
//! Library code only talks to the `log` facade. The binary calls [`init_logging`] once;
//! records go to stderr, or to size-rotated files when a log directory is given.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

const LOG_FILE_BASENAME: &str = "tweesplit";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    level: &'static str,
    log_dir: Option<PathBuf>,
    _logger: LoggerHandle,
}

/// Starts the global logger.
///
/// Calling it again with the same settings is a no-op; different settings are rejected.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        return check_same(state, level, log_dir);
    }

    let logger = Logger::try_with_str(level).map_err(|err| format!("invalid log level `{level}`: {err}"))?;
    let logger = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|err| format!("failed to create log directory `{}`: {err}", dir.display()))?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        None => logger.log_to_stderr().format_for_stderr(flexi_logger::default_format),
    };
    let handle = logger.start().map_err(|err| format!("failed to start logger: {err}"))?;

    let state = LOGGING_STATE.get_or_init(|| LoggingState {
        level,
        log_dir: log_dir.map(Path::to_path_buf),
        _logger: handle,
    });

    log::info!(
        "event=app_start version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        state.level,
        state.log_dir.as_deref().map_or_else(|| "stderr".to_owned(), |d| d.display().to_string())
    );
    check_same(state, level, log_dir)
}

/// `(level, log_dir)` of the running logger.
pub fn logging_status() -> Option<(&'static str, Option<PathBuf>)> {
    LOGGING_STATE.get().map(|state| (state.level, state.log_dir.clone()))
}

fn check_same(state: &LoggingState, level: &str, log_dir: Option<&Path>) -> Result<(), String> {
    if state.log_dir.as_deref() != log_dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch",
            state.log_dir.as_deref().map_or_else(|| "stderr".to_owned(), |d| d.display().to_string())
        ));
    }
    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{level}`",
            state.level
        ));
    }
    Ok(())
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!("unsupported log level `{other}`; expected trace|debug|info|warn|error|off")),
    }
}

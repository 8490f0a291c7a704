// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, Timelike};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SalesError;
use crate::models::Session;
use crate::snapshot;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Salestrack", "salestrack"));

pub const DATA_ENV: &str = "SALESTRACK_DATA";
pub const SESSION_FILE: &str = "session.json";
/// Upper bound on any file handed to an importer.
pub const MAX_IMPORT_BYTES: u64 = 10 * 1024 * 1024;

/// Resolves the session file: explicit path, then `SALESTRACK_DATA`, then the
/// platform data dir.
pub fn data_path(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(p) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    if let Some(p) = std::env::var_os(DATA_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join(SESSION_FILE))
}

/// Loads the saved session, or starts an empty one with default settings.
pub fn open_or_init(path: &Path) -> Result<Session> {
    if !path.exists() {
        log::debug!("no session at {}, starting empty", path.display());
        return Ok(Session::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Read session at {}", path.display()))?;
    let session = snapshot::parse_full(&text)
        .with_context(|| format!("Load session at {}", path.display()))?;
    log::debug!(
        "loaded {} record(s) from {}",
        session.ledger.len(),
        path.display()
    );
    Ok(session)
}

pub fn save(session: &Session, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Create {}", dir.display()))?;
    }
    let text = snapshot::export_full(session, now())?;
    fs::write(path, text).with_context(|| format!("Write session to {}", path.display()))?;
    Ok(())
}

/// Reads an import file after checking it against [`MAX_IMPORT_BYTES`].
pub fn read_import(path: &str) -> Result<String> {
    let size = fs::metadata(path)
        .with_context(|| format!("Open {}", path))?
        .len();
    if size > MAX_IMPORT_BYTES {
        return Err(SalesError::TooLarge {
            size,
            limit: MAX_IMPORT_BYTES,
        }
        .into());
    }
    fs::read_to_string(path).with_context(|| format!("Read {}", path))
}

/// Local wall-clock time at whole-second precision.
pub fn now() -> NaiveDateTime {
    let t = Local::now().naive_local();
    t.with_nanosecond(0).unwrap_or(t)
}

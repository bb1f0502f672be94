//! # File I/O Module
//!
//! Reads and writes geometry documents as JSON:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Validated loads**: Documents go through the same checks as the constructors
//!
//! ## Example
//!
//! ```rust,no_run
//! use pile_core::file_io::{load_geometry, save_geometry};
//! use std::path::Path;
//!
//! let geometry = load_geometry(Path::new("pile.json"))?;
//! println!("tip diameter: {:.3} m", geometry.equivalent_tip_diameter());
//!
//! save_geometry(&geometry, Path::new("pile_copy.json"))?;
//! # Ok::<(), pile_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::basic_pile::BasicPileInput;
use crate::errors::{CalcError, CalcResult};
use crate::geometry::PileGeometry;

/// Load a pile geometry document.
///
/// # Returns
///
/// * `Ok(PileGeometry)` - Successfully loaded and validated geometry
/// * `Err(CalcError::SerializationError)` - Invalid JSON or invalid geometry
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_geometry(path: &Path) -> CalcResult<PileGeometry> {
    read_json(path)
}

/// Save a pile geometry document with atomic write semantics.
///
/// The save process:
/// 1. Serialize geometry to JSON
/// 2. Write to a temporary file (`<path>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Read the temporary file back and check that it loads
/// 5. Rename the temporary file over `path`
pub fn save_geometry(geometry: &PileGeometry, path: &Path) -> CalcResult<()> {
    write_json_atomic(geometry, path)
}

/// Load a basic pile input document.
pub fn load_basic_pile_input(path: &Path) -> CalcResult<BasicPileInput> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    debug!("read {} bytes from {}", contents.len(), path.display());

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid document in {}: {}", path.display(), e),
    })
}

fn write_json_atomic<T: Serialize + DeserializeOwned>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_document_atomic::<T>(&json, path)
}

/// Write `json` to `<path>.tmp`, check that it reads back as a `T`, then
/// rename it over `path`. The temp file is removed on every failure.
fn write_document_atomic<T: DeserializeOwned>(json: &str, path: &Path) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let staged = stage_tmp_file::<T>(json, &tmp_path).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| {
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    });
    if staged.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    staged?;

    debug!("saved {} bytes to {}", json.len(), path.display());
    Ok(())
}

fn stage_tmp_file<T: DeserializeOwned>(json: &str, tmp_path: &Path) -> CalcResult<()> {
    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    // the staged document must load before it replaces anything
    read_json::<T>(tmp_path).map(|_| ())
}

/// `pile.json` -> `pile.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

//! Output-path resolution inside the date-partitioned flow tree

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::errors::{TemplateError, TemplateResult};
use crate::sanitize::sanitize;

/// Artifact file extension (KityMinder mindmap).
pub const ARTIFACT_EXT: &str = "km";

const REQUESTS_DIR: &str = "requests";

/// Compute a collision-free artifact path for `title` under `base`.
///
/// Layout: `{base}/{YYYYMM}/{YYYY-MM-DD}/requests/{HHMM}_{title}.km`, with
/// the directory chain created on demand. The returned path never points at
/// an existing file.
pub fn resolve_output_path(title: &str, base: &Path) -> TemplateResult<PathBuf> {
    let now = Local::now();
    let dir = base
        .join(now.format("%Y%m").to_string())
        .join(now.format("%Y-%m-%d").to_string())
        .join(REQUESTS_DIR);
    std::fs::create_dir_all(&dir).map_err(|e| TemplateError::DirCreate {
        path: dir.clone(),
        source: e,
    })?;

    let stem = format!("{}_{}", now.format("%H%M"), sanitize(title));
    let path = unique_path(&dir, &stem);
    debug!("resolved output path {}", path.display());
    Ok(path)
}

/// First unused of `{stem}.km`, `{stem}_2.km`, `{stem}_3.km`, ... in `dir`.
///
/// The existence check is not atomic against concurrent external writers;
/// this is a single-shot, single-user tool.
pub fn unique_path(dir: &Path, stem: &str) -> PathBuf {
    let first = dir.join(format!("{stem}.{ARTIFACT_EXT}"));
    if !first.exists() {
        return first;
    }
    let mut counter: u32 = 2;
    loop {
        let candidate = dir.join(format!("{stem}_{counter}.{ARTIFACT_EXT}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Prepare an explicit, caller-supplied output path.
///
/// Only the parent directory is created; no collision renaming happens, an
/// explicit path is the caller's authority and may overwrite.
pub fn prepare_explicit_path(path: &Path) -> TemplateResult<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| TemplateError::DirCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    Ok(path.to_path_buf())
}

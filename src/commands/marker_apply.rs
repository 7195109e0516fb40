use std::path::Path;

use log::{debug, info};

use crate::commands::Status;
use crate::patch::marker::patch_file;
use crate::patch::{MarkerRule, PatchError};
use crate::utils::dir_scan::{FileFilter, scan};

/// Replace the marked block in every file of `dir` accepted by `filter`.
///
/// Files without the marker are left untouched and not reported. Stops at the
/// first read or write failure; files already written stay written.
pub fn run<F>(
    dir: &Path,
    filter: &FileFilter,
    rule: &MarkerRule,
    mut on_status: Option<F>,
) -> Result<Vec<Status>, PatchError>
where
    F: FnMut(&Status),
{
    let files = scan(dir, filter)?;
    info!("patching {} file(s) in {} by marker", files.len(), dir.display());

    let mut statuses = Vec::new();
    for file in files {
        if !patch_file(&dir.join(&file), rule)? {
            debug!("skipping {}: marker not found", file);
            continue;
        }

        let status = Status::Fixed { file };
        if let Some(ref mut callback) = on_status {
            callback(&status);
        }
        statuses.push(status);
    }

    Ok(statuses)
}

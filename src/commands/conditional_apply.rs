use std::path::Path;

use log::info;

use crate::commands::Status;
use crate::patch::{ConditionalPatcher, PatchError};
use crate::utils::dir_scan::{FileFilter, scan};

/// Insert or replace the method in every file of `dir` accepted by `filter`.
///
/// Every selected file is written back and reported, changed or not.
pub fn run<F>(
    dir: &Path,
    filter: &FileFilter,
    patcher: &ConditionalPatcher,
    mut on_status: Option<F>,
) -> Result<Vec<Status>, PatchError>
where
    F: FnMut(&Status),
{
    let files = scan(dir, filter)?;
    info!(
        "patching {} file(s) in {} by signature '{}'",
        files.len(),
        dir.display(),
        patcher.rule().signature
    );

    let mut statuses = Vec::new();
    for file in files {
        let action = patcher.patch_file(&dir.join(&file))?;

        let status = Status::Updated {
            file,
            action,
            label: patcher.rule().label.clone(),
        };
        if let Some(ref mut callback) = on_status {
            callback(&status);
        }
        statuses.push(status);
    }

    Ok(statuses)
}

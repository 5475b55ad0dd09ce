//! Expanding command line paths into feature files.

use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::CliError;

fn is_feature_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("feature"))
}

fn process_dir_entry(entry: DirEntry) -> Option<Result<Utf8PathBuf, CliError>> {
    if !entry.file_type().is_file() || !is_feature_file(entry.path()) {
        return None;
    }
    Some(Utf8PathBuf::from_path_buf(entry.into_path()).map_err(CliError::NonUtf8Path))
}

fn convert_walkdir_error(err: walkdir::Error) -> Option<CliError> {
    if err.loop_ancestor().is_some() {
        return None;
    }
    let err_str = err.to_string();
    Some(CliError::Io(
        err.into_io_error()
            .unwrap_or_else(|| std::io::Error::other(err_str)),
    ))
}

fn collect_from_dir(base: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> Result<(), CliError> {
    let mut found = Vec::new();
    for next in WalkDir::new(base).follow_links(false) {
        match next {
            Ok(entry) => {
                if let Some(result) = process_dir_entry(entry) {
                    found.push(result?);
                }
            }
            Err(err) => {
                if let Some(err) = convert_walkdir_error(err) {
                    return Err(err);
                }
            }
        }
    }
    found.sort();
    debug!(dir = %base, count = found.len(), "discovered feature files");
    files.append(&mut found);
    Ok(())
}

/// Resolve each path to the feature files it names.
///
/// Files are taken as given, whatever their extension. Directories are
/// searched recursively for `*.feature` files (case-insensitive) without
/// following symlinks, and each directory's results are sorted.
///
/// # Errors
///
/// [`CliError::PathNotFound`] for a path that does not exist, and
/// [`CliError::Io`] when a directory cannot be read.
pub fn collect_feature_files(paths: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_from_dir(path, &mut files)?;
        } else if path.exists() {
            files.push(path.clone());
        } else {
            return Err(CliError::PathNotFound(path.clone()));
        }
    }
    Ok(files)
}

use std::fs::{self, DirEntry, Metadata};
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::errors::{ErrorClass, ListingError};
use crate::file_system::entry::DirectoryEntry;
use crate::filter::IgnoreFilter;
use crate::units::time::utc_from_system_time;
use crate::{ok_or, some_or};

/// Which directory members make it into a listing.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions<'a> {
    pub show_dot_files: bool,
    pub hide_symlinks: bool,
    pub ignore: &'a IgnoreFilter,
    /// Count display lengths in code points rather than bytes.
    pub utf8: bool,
}

/// Reads the members of the directory at `path`.
///
/// Failing to open or read the directory aborts with one of the three
/// [`ListingError`] classes. A member whose metadata cannot be read is logged
/// and skipped.
pub fn read_entries(
    path: &Path,
    options: &ReadOptions,
) -> Result<Vec<DirectoryEntry>, ListingError> {
    log::debug!("reading directory '{}'", path.display());

    let it = ok_or!(fs::read_dir(path), err => {
        return Err(open_failed(path, &err));
    });

    let mut entries = Vec::new();
    for dir_entry in it {
        let dir_entry = ok_or!(dir_entry, err => {
            log::error!("dir entry read error for '{}': {err}", path.display());
            return Err(ListingError::internal(path, format!("reading entries: {err}")));
        });

        if let Some(entry) = read_entry(&dir_entry, options) {
            entries.push(entry);
        }
    }

    log::debug!("read {} entries from '{}'", entries.len(), path.display());
    Ok(entries)
}

fn open_failed(path: &Path, err: &io::Error) -> ListingError {
    let listing_err = ListingError::from_io(path, err);
    match listing_err.class() {
        ErrorClass::Internal => log::error!("error opening dir '{}': {err}", path.display()),
        _ => log::warn!("cannot list dir '{}': {err}", path.display()),
    }
    listing_err
}

fn read_entry(dir_entry: &DirEntry, options: &ReadOptions) -> Option<DirectoryEntry> {
    let name = dir_entry.file_name();
    log::trace!("dir entry '{}'", name.to_string_lossy());

    if !options.show_dot_files && name.as_encoded_bytes().first() == Some(&b'.') {
        return None;
    }

    if options.hide_symlinks {
        let file_type = ok_or!(dir_entry.file_type(), err => {
            log::error!("error getting file type for '{}': {err}", dir_entry.path().display());
            return None;
        });
        if file_type.is_symlink() {
            return None;
        }
    }

    if options.ignore.is_ignored(&name) {
        return None;
    }

    let metadata = some_or!(entry_metadata(&dir_entry.path()), return None);
    let modified_at = metadata
        .modified()
        .map(utc_from_system_time)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    let size = i64::try_from(metadata.len()).unwrap_or(i64::MAX);

    Some(DirectoryEntry::from_os_str(
        &name,
        metadata.is_dir(),
        size,
        modified_at,
        options.utf8,
    ))
}

/// Metadata of the link target, or of the link itself when the target is
/// missing.
fn entry_metadata(path: &Path) -> Option<Metadata> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata),
        Err(err) if err.kind() == io::ErrorKind::NotFound => match fs::symlink_metadata(path) {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                log::error!("error getting link metadata for '{}': {err}", path.display());
                None
            }
        },
        Err(err) => {
            log::error!("error getting metadata for '{}': {err}", path.display());
            None
        }
    }
}

use crate::error::Error;
use crate::model::{DirectoryRecord, FileRecord, Inventory};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Depth-first, post-order inventory of `root`.
///
/// Regular files become [`FileRecord`]s. A subdirectory is recorded as empty
/// when a fresh listing taken after its subtree was visited has no entries;
/// the root itself is never a candidate. Entries are visited in file name
/// order so repeated walks over an unchanged tree agree.
///
/// Any listing or metadata failure aborts the walk: a partial inventory would
/// make victim selection unsound.
pub fn walk(root: &Path, follow_links: bool) -> Result<Inventory, Error> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let mut inventory = Inventory::new(root);

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(follow_links)
        .contents_first(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(PathBuf::from)
                .unwrap_or_else(|| root.to_path_buf());
            Error::List {
                path,
                source: io::Error::from(err),
            }
        })?;

        // A followed link reports its target's type and size; only what lies
        // beneath it is inventoried.
        if entry.path_is_symlink() {
            trace!("not inventorying link {}", entry.path().display());
            continue;
        }

        let file_type = entry.file_type();
        if file_type.is_file() {
            let metadata = entry.metadata().map_err(|err| Error::List {
                path: entry.path().to_path_buf(),
                source: io::Error::from(err),
            })?;
            let modified = metadata.modified().unwrap_or(UNIX_EPOCH);
            trace!("file {} ({} bytes)", entry.path().display(), metadata.len());
            inventory.push_file(FileRecord::new(entry.into_path(), metadata.len(), modified));
        } else if file_type.is_dir() {
            if is_empty_dir(entry.path())? {
                debug!("empty directory {}", entry.path().display());
                inventory.push_empty_dir(DirectoryRecord::new(entry.into_path()));
            }
        } else {
            trace!("skipping {} ({:?})", entry.path().display(), file_type);
        }
    }

    Ok(inventory)
}

fn is_empty_dir(dir: &Path) -> Result<bool, Error> {
    let mut entries = fs::read_dir(dir).map_err(|source| Error::List {
        path: dir.to_path_buf(),
        source,
    })?;
    match entries.next() {
        None => Ok(true),
        Some(Ok(_)) => Ok(false),
        Some(Err(source)) => Err(Error::List {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

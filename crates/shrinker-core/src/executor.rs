use crate::error::Error;
use crate::model::{DeletionOutcome, DeletionStatus, DirectoryRecord, EntryKind, FileRecord};
use crate::report::RunReporter;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Delete `files` on a pool of `workers` threads (0 picks one per CPU).
///
/// Each deletion is independent: a failure is reported and recorded, never
/// retried, and never stops the others. Returns once every worker has
/// finished, with outcomes in the same order as `files`. The only error is
/// failing to start the pool, which happens before anything is deleted.
pub fn execute_files(
    files: &[FileRecord],
    workers: usize,
    reporter: &dyn RunReporter,
) -> Result<Vec<DeletionOutcome>, Error> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("shrinker-delete-{index}"))
        .build()?;

    let outcomes: Vec<DeletionOutcome> = pool.install(|| {
        files
            .par_iter()
            .map(|file| {
                let outcome = remove(EntryKind::File, &file.path, file.size, |path| fs::remove_file(path));
                reporter.on_deletion(&outcome);
                outcome
            })
            .collect()
    });

    Ok(outcomes)
}

/// Delete `dirs` one at a time, in the order given.
///
/// Only call this after the file phase has completed. A directory that is no
/// longer empty fails and is reported like any other failure.
pub fn execute_directories(
    dirs: &[DirectoryRecord],
    reporter: &dyn RunReporter,
) -> Vec<DeletionOutcome> {
    dirs.iter()
        .map(|dir| {
            let outcome = remove(EntryKind::Directory, &dir.path, 0, |path| fs::remove_dir(path));
            reporter.on_deletion(&outcome);
            outcome
        })
        .collect()
}

fn remove(
    kind: EntryKind,
    path: &Path,
    bytes: u64,
    op: impl FnOnce(&Path) -> std::io::Result<()>,
) -> DeletionOutcome {
    let status = match op(path) {
        Ok(()) => DeletionStatus::Deleted,
        Err(err) => DeletionStatus::Failed {
            reason: err.to_string(),
        },
    };
    DeletionOutcome {
        kind,
        path: path.to_path_buf(),
        bytes,
        status,
    }
}

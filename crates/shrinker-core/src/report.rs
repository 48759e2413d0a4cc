use crate::engine::RunResult;
use crate::model::{DeletionOutcome, DeletionStatus, EntryKind, Inventory};
use crate::plan::ReclamationPlan;
use crate::units::{to_gib, to_mib};
use crate::volume::VolumeStats;
use chrono::{DateTime, Local};
use std::path::Path;
use tracing::{info, warn};

/// Receives every decision and outcome of a run.
///
/// Deletion outcomes arrive from several worker threads at once, so
/// implementations serialize their own output. All methods default to no-ops.
pub trait RunReporter: Send + Sync {
    fn on_run_start(&self, _root: &Path, _volume: &VolumeStats, _threshold_bytes: u64) {}
    fn on_inventory(&self, _inventory: &Inventory) {}
    fn on_plan(&self, _root: &Path, _plan: &ReclamationPlan, _total_bytes: u64) {}
    fn on_deletion_start(&self, _root: &Path, _kind: EntryKind, _count: usize) {}
    fn on_deletion(&self, _outcome: &DeletionOutcome) {}
    fn on_deletion_complete(&self, _root: &Path, _kind: EntryKind, _deleted: usize, _failed: usize) {}
    fn on_run_end(&self, _root: &Path, _result: &RunResult) {}
}

/// No-op reporter for silent operation.
pub struct SilentReporter;

impl RunReporter for SilentReporter {}

/// Emits one `tracing` event per report.
pub struct TracingReporter;

impl RunReporter for TracingReporter {
    fn on_run_start(&self, root: &Path, volume: &VolumeStats, threshold_bytes: u64) {
        info!("{}", "=".repeat(100));
        info!("Reclaiming space under \"{}\"", root.display());
        info!("Total partition size : {} GB", to_gib(volume.total_bytes));
        info!("Usable space : {} GB", to_gib(volume.usable_bytes));
        info!(
            "Start truncate when available space is less than {} GB",
            to_gib(threshold_bytes)
        );
    }

    fn on_inventory(&self, inventory: &Inventory) {
        let root = inventory.root.display();
        info!(
            "Total number of files in \"{}\" directory is {}",
            root,
            inventory.files.len()
        );
        info!(
            "Total number of empty directories in \"{}\" directory is {}",
            root,
            inventory.empty_dirs.len()
        );
        info!(
            "Size of directory \"{}\" is: {} MB",
            root,
            to_mib(inventory.total_bytes)
        );
    }

    fn on_plan(&self, root: &Path, plan: &ReclamationPlan, total_bytes: u64) {
        if plan.deficit_bytes <= 0 {
            info!(
                "No files need to be deleted from \"{}\" directory",
                root.display()
            );
            return;
        }

        info!(
            "Need to release {} MB from {} GB in directory \"{}\"",
            to_mib(plan.deficit_bytes as u64),
            to_gib(total_bytes),
            root.display()
        );
        if let (Some(first), Some(last)) = (plan.files.first(), plan.files.last()) {
            info!(
                "Selected {} file(s) releasing {} MB, modified between {} and {}",
                plan.files.len(),
                to_mib(plan.release_bytes),
                DateTime::<Local>::from(first.modified).format("%d-%m-%Y %H:%M:%S"),
                DateTime::<Local>::from(last.modified).format("%d-%m-%Y %H:%M:%S"),
            );
        }
        if !plan.deficit_met() {
            warn!(
                "All {} file(s) under \"{}\" release only {} MB, short of the {} MB needed",
                plan.files.len(),
                root.display(),
                to_mib(plan.release_bytes),
                to_mib(plan.deficit_bytes as u64)
            );
        }
    }

    fn on_deletion_start(&self, root: &Path, kind: EntryKind, _count: usize) {
        match kind {
            EntryKind::File => info!(
                "Start removing obsolete files from \"{}\" directory",
                root.display()
            ),
            EntryKind::Directory => info!(
                "Start removing empty directories from \"{}\" directory",
                root.display()
            ),
        }
    }

    fn on_deletion(&self, outcome: &DeletionOutcome) {
        match &outcome.status {
            DeletionStatus::Deleted => {
                info!("Delete {}: \"{}\"", outcome.kind, outcome.path.display())
            }
            DeletionStatus::Failed { reason } => warn!(
                "Can't delete {}: \"{}\": {}",
                outcome.kind,
                outcome.path.display(),
                reason
            ),
        }
    }

    fn on_deletion_complete(&self, root: &Path, kind: EntryKind, deleted: usize, failed: usize) {
        match kind {
            EntryKind::File => info!(
                "Finish removing obsolete files from \"{}\" directory, removed {} file(s), {} failed",
                root.display(),
                deleted,
                failed
            ),
            EntryKind::Directory => info!(
                "Finish removing empty directories from \"{}\", removed {} directory(s), {} failed",
                root.display(),
                deleted,
                failed
            ),
        }
    }

    fn on_run_end(&self, root: &Path, result: &RunResult) {
        if result.dry_run {
            info!(
                "Dry run: would remove {} file(s) ({} MB) and {} directory(s) from \"{}\"",
                result.files_selected,
                to_mib(result.bytes_selected),
                result.empty_dirs_found,
                root.display()
            );
            return;
        }
        info!(
            "Run finished for \"{}\": {} file(s) removed ({} MB), {} directory(s) removed, {} failure(s) in {:.2}s",
            root.display(),
            result.files_deleted(),
            to_mib(result.bytes_released()),
            result.dirs_deleted(),
            result.files_failed() + result.dirs_failed(),
            (result.walk_duration + result.delete_duration).as_secs_f64(),
        );
    }
}

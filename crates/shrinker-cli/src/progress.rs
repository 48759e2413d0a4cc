use indicatif::{ProgressBar, ProgressStyle};
use shrinker_core::model::{DeletionOutcome, EntryKind, Inventory};
use shrinker_core::{ReclamationPlan, RunReporter, RunResult, TracingReporter, VolumeStats};
use std::path::Path;
use std::sync::Mutex;

/// Logs through [`TracingReporter`] and, while files are being deleted,
/// draws a progress bar on stderr. Log lines are printed with the bar
/// suspended so the two never share a terminal line.
pub struct CliReporter {
    log: TracingReporter,
    show_progress: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new(show_progress: bool) -> Self {
        Self {
            log: TracingReporter,
            show_progress,
            bar: Mutex::new(None),
        }
    }
}

impl RunReporter for CliReporter {
    fn on_run_start(&self, root: &Path, volume: &VolumeStats, threshold_bytes: u64) {
        self.log.on_run_start(root, volume, threshold_bytes);
    }

    fn on_inventory(&self, inventory: &Inventory) {
        self.log.on_inventory(inventory);
    }

    fn on_plan(&self, root: &Path, plan: &ReclamationPlan, total_bytes: u64) {
        self.log.on_plan(root, plan, total_bytes);
    }

    fn on_deletion_start(&self, root: &Path, kind: EntryKind, count: usize) {
        self.log.on_deletion_start(root, kind, count);
        if self.show_progress && kind == EntryKind::File {
            let pb = ProgressBar::new(count as u64);
            pb.set_style(
                ProgressStyle::with_template(
                    "  {spinner:.cyan} Deleting [{bar:30.cyan/dim}] {pos}/{len} files ({eta} remaining)",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("━╸─")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
            pb.enable_steady_tick(std::time::Duration::from_millis(80));
            *self.bar.lock().unwrap() = Some(pb);
        }
    }

    fn on_deletion(&self, outcome: &DeletionOutcome) {
        if !self.show_progress {
            self.log.on_deletion(outcome);
            return;
        }
        let guard = self.bar.lock().unwrap();
        match guard.as_ref() {
            Some(pb) => {
                pb.suspend(|| self.log.on_deletion(outcome));
                pb.inc(1);
            }
            None => {
                drop(guard);
                self.log.on_deletion(outcome);
            }
        }
    }

    fn on_deletion_complete(&self, root: &Path, kind: EntryKind, deleted: usize, failed: usize) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_and_clear();
        }
        self.log.on_deletion_complete(root, kind, deleted, failed);
    }

    fn on_run_end(&self, root: &Path, result: &RunResult) {
        self.log.on_run_end(root, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shrinker_core::model::DeletionStatus;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;

    fn deleted(name: &str) -> DeletionOutcome {
        DeletionOutcome {
            kind: EntryKind::File,
            path: PathBuf::from(name),
            bytes: 10,
            status: DeletionStatus::Deleted,
        }
    }

    #[test]
    fn test_deletions_without_progress_never_touch_the_bar() {
        let reporter = Arc::new(CliReporter::new(false));

        // A poisoned bar lock panics on the next `lock().unwrap()`.
        let holder = Arc::clone(&reporter);
        let _ = thread::spawn(move || {
            let _guard = holder.bar.lock().unwrap();
            panic!("poison the bar lock");
        })
        .join();
        assert!(reporter.bar.is_poisoned());

        reporter.on_deletion(&deleted("/tmp/a"));
        reporter.on_deletion(&deleted("/tmp/b"));
    }

    #[test]
    fn test_bar_tracks_file_deletions_and_is_cleared() {
        let reporter = CliReporter::new(true);
        let root = Path::new("/tmp");

        reporter.on_deletion_start(root, EntryKind::File, 2);
        reporter.on_deletion(&deleted("/tmp/a"));
        reporter.on_deletion(&deleted("/tmp/b"));
        assert_eq!(
            reporter.bar.lock().unwrap().as_ref().map(|pb| pb.position()),
            Some(2)
        );

        reporter.on_deletion_complete(root, EntryKind::File, 2, 0);
        assert!(reporter.bar.lock().unwrap().is_none());

        // Directory phases never draw a bar.
        reporter.on_deletion_start(root, EntryKind::Directory, 1);
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}

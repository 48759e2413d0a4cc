use crate::config::AppConfig;
use crate::error::Error;
use crate::executor;
use crate::model::{DeletionOutcome, EntryKind};
use crate::plan;
use crate::report::RunReporter;
use crate::scanner;
use crate::volume::{self, HostVolume, SpaceSource, VolumeStats};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

pub struct ShrinkEngine {
    root: PathBuf,
    threshold_bytes: u64,
    workers: usize,
    dry_run: bool,
    follow_links: bool,
    space: Box<dyn SpaceSource>,
}

#[derive(Debug)]
pub struct RunResult {
    pub volume: VolumeStats,
    pub threshold_bytes: u64,
    pub deficit_bytes: i64,
    pub files_scanned: usize,
    pub empty_dirs_found: usize,
    pub total_bytes: u64,
    pub files_selected: usize,
    pub bytes_selected: u64,
    pub deficit_met: bool,
    pub dry_run: bool,
    pub file_outcomes: Vec<DeletionOutcome>,
    pub dir_outcomes: Vec<DeletionOutcome>,
    pub walk_duration: Duration,
    pub delete_duration: Duration,
}

impl RunResult {
    pub fn files_deleted(&self) -> usize {
        count_deleted(&self.file_outcomes)
    }

    pub fn files_failed(&self) -> usize {
        self.file_outcomes.len() - self.files_deleted()
    }

    pub fn dirs_deleted(&self) -> usize {
        count_deleted(&self.dir_outcomes)
    }

    pub fn dirs_failed(&self) -> usize {
        self.dir_outcomes.len() - self.dirs_deleted()
    }

    /// Walk-time sizes of the files actually removed.
    pub fn bytes_released(&self) -> u64 {
        self.file_outcomes
            .iter()
            .filter(|o| o.is_deleted())
            .map(|o| o.bytes)
            .sum()
    }
}

fn count_deleted(outcomes: &[DeletionOutcome]) -> usize {
    outcomes.iter().filter(|o| o.is_deleted()).count()
}

impl ShrinkEngine {
    pub fn new(root: impl Into<PathBuf>, threshold_bytes: u64) -> Self {
        Self {
            root: root.into(),
            threshold_bytes,
            workers: 0,
            dry_run: false,
            follow_links: false,
            space: Box::new(HostVolume),
        }
    }

    /// Engine for `root` with the remaining settings taken from `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: &AppConfig) -> Result<Self, Error> {
        Ok(Self::new(root, config.threshold_bytes()?)
            .with_workers(config.workers)
            .with_dry_run(config.dry_run)
            .with_follow_links(config.follow_links))
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn with_space_source(mut self, source: impl SpaceSource + 'static) -> Self {
        self.space = Box::new(source);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run the reclamation pipeline:
    /// 1. Query volume statistics and compute the deficit
    /// 2. Walk the tree for files and empty directories
    /// 3. Select the oldest files covering the deficit
    /// 4. Delete selected files in parallel, then empty directories
    ///
    /// Every error returned here happens before the first deletion.
    pub fn run(&self, reporter: &dyn RunReporter) -> Result<RunResult, Error> {
        let root = self.root.as_path();
        if !root.is_dir() {
            return Err(Error::NotADirectory(self.root.clone()));
        }

        // Phase 1: Volume
        let volume = self.space.volume_stats(root)?;
        reporter.on_run_start(root, &volume, self.threshold_bytes);
        let deficit_bytes = volume::compute_deficit(self.threshold_bytes, &volume);
        debug!("deficit for {}: {} bytes", root.display(), deficit_bytes);

        // Phase 2: Walk
        let walk_start = Instant::now();
        let inventory = scanner::walk(root, self.follow_links)?;
        let walk_duration = walk_start.elapsed();
        debug!(
            "Walk completed in {:.2}s: {} files, {} empty directories, {} bytes",
            walk_duration.as_secs_f64(),
            inventory.files.len(),
            inventory.empty_dirs.len(),
            inventory.total_bytes,
        );
        reporter.on_inventory(&inventory);

        // Phase 3: Plan
        let plan = plan::select_victims(&inventory.files, deficit_bytes);
        reporter.on_plan(root, &plan, inventory.total_bytes);

        // Phase 4: Delete
        let delete_start = Instant::now();
        let (file_outcomes, dir_outcomes) = if self.dry_run {
            (Vec::new(), Vec::new())
        } else {
            let file_outcomes = if plan.is_empty() {
                Vec::new()
            } else {
                reporter.on_deletion_start(root, EntryKind::File, plan.files.len());
                let outcomes = executor::execute_files(&plan.files, self.workers, reporter)?;
                let deleted = count_deleted(&outcomes);
                reporter.on_deletion_complete(root, EntryKind::File, deleted, outcomes.len() - deleted);
                outcomes
            };

            let dir_outcomes = if inventory.empty_dirs.is_empty() {
                Vec::new()
            } else {
                reporter.on_deletion_start(root, EntryKind::Directory, inventory.empty_dirs.len());
                let outcomes = executor::execute_directories(&inventory.empty_dirs, reporter);
                let deleted = count_deleted(&outcomes);
                reporter.on_deletion_complete(
                    root,
                    EntryKind::Directory,
                    deleted,
                    outcomes.len() - deleted,
                );
                outcomes
            };

            (file_outcomes, dir_outcomes)
        };
        let delete_duration = delete_start.elapsed();

        let result = RunResult {
            volume,
            threshold_bytes: self.threshold_bytes,
            deficit_bytes,
            files_scanned: inventory.files.len(),
            empty_dirs_found: inventory.empty_dirs.len(),
            total_bytes: inventory.total_bytes,
            files_selected: plan.files.len(),
            bytes_selected: plan.release_bytes,
            deficit_met: plan.deficit_met(),
            dry_run: self.dry_run,
            file_outcomes,
            dir_outcomes,
            walk_duration,
            delete_duration,
        };
        reporter.on_run_end(root, &result);

        Ok(result)
    }
}

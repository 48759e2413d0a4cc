use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "shrinker")]
#[command(
    about = "Delete the oldest files under a directory until the volume has enough free space",
    long_about = None
)]
pub struct Cli {
    /// Root directory to reclaim space from
    pub root: Option<String>,

    /// Keep at least this many gigabytes free (default 20)
    pub threshold_gb: Option<String>,

    /// Deletion worker threads (0 = one per CPU)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Report what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_links: bool,

    /// Show a progress bar on stderr while deleting files
    #[arg(long)]
    pub progress: bool,

    /// Read settings from this file instead of ./Shrinker.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod model;
pub mod plan;
pub mod report;
pub mod scanner;
pub mod units;
pub mod volume;

pub use config::AppConfig;
pub use engine::{RunResult, ShrinkEngine};
pub use error::Error;
pub use model::{DeletionOutcome, DeletionStatus, DirectoryRecord, EntryKind, FileRecord, Inventory};
pub use plan::ReclamationPlan;
pub use report::{RunReporter, SilentReporter, TracingReporter};
pub use volume::{HostVolume, SpaceSource, VolumeStats};

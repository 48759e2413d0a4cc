use crate::error::Error;
use std::path::Path;

/// Capacity figures for the volume holding a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeStats {
    pub total_bytes: u64,
    /// Space available to this process for new writes.
    pub usable_bytes: u64,
}

impl VolumeStats {
    /// Query the host filesystem for the volume containing `path`.
    pub fn query(path: &Path) -> Result<Self, Error> {
        let stat_error = |source| Error::VolumeStat {
            path: path.to_path_buf(),
            source,
        };
        let total_bytes = fs2::total_space(path).map_err(stat_error)?;
        let usable_bytes = fs2::available_space(path).map_err(stat_error)?;
        Ok(Self {
            total_bytes,
            usable_bytes,
        })
    }
}

/// Source of volume statistics. The engine queries it exactly once per run.
pub trait SpaceSource: Send + Sync {
    fn volume_stats(&self, root: &Path) -> Result<VolumeStats, Error>;
}

/// Reads statistics from the host filesystem.
pub struct HostVolume;

impl SpaceSource for HostVolume {
    fn volume_stats(&self, root: &Path) -> Result<VolumeStats, Error> {
        VolumeStats::query(root)
    }
}

/// Returns the same statistics for every root.
pub struct FixedVolume(pub VolumeStats);

impl SpaceSource for FixedVolume {
    fn volume_stats(&self, _root: &Path) -> Result<VolumeStats, Error> {
        Ok(self.0)
    }
}

/// Bytes to free so that usable space reaches `threshold_bytes`.
/// Zero or negative means the volume already has enough room.
pub fn compute_deficit(threshold_bytes: u64, volume: &VolumeStats) -> i64 {
    let deficit = i128::from(threshold_bytes) - i128::from(volume.usable_bytes);
    deficit.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

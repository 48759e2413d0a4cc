use crate::model::FileRecord;

/// The files chosen to cover a deficit, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReclamationPlan {
    pub deficit_bytes: i64,
    pub files: Vec<FileRecord>,
    pub release_bytes: u64,
}

impl ReclamationPlan {
    pub fn empty(deficit_bytes: i64) -> Self {
        Self {
            deficit_bytes,
            files: Vec::new(),
            release_bytes: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether deleting every selected file would cover the deficit.
    pub fn deficit_met(&self) -> bool {
        self.deficit_bytes <= 0 || self.release_bytes >= self.deficit_bytes as u64
    }
}

/// Pick the shortest oldest-first prefix of `files` whose sizes add up to at
/// least `deficit_bytes`.
///
/// Ordering is by modification time with ties kept in walk order, so the same
/// inventory always yields the same plan. When even the whole set falls short,
/// every file is selected and the plan reports the deficit as unmet.
pub fn select_victims(files: &[FileRecord], deficit_bytes: i64) -> ReclamationPlan {
    if deficit_bytes <= 0 {
        return ReclamationPlan::empty(deficit_bytes);
    }
    let target = deficit_bytes as u64;

    let mut oldest_first: Vec<&FileRecord> = files.iter().collect();
    oldest_first.sort_by_key(|file| file.modified);

    let mut plan = ReclamationPlan::empty(deficit_bytes);
    for file in oldest_first {
        plan.release_bytes = plan.release_bytes.saturating_add(file.size);
        plan.files.push(file.clone());
        if plan.release_bytes >= target {
            break;
        }
    }
    plan
}

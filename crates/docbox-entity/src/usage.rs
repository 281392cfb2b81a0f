//! Storage usage summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docbox_core::types::FileKind;

/// Advertised bucket capacity: 2 GiB.
pub const TOTAL_CAPACITY_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Usage of one content category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindUsage {
    /// Summed sizes of the category's files, in bytes.
    pub size: u64,
    /// Most recent update timestamp among the category's files.
    pub latest_date: Option<DateTime<Utc>>,
}

/// Per-category and overall storage usage for one user's owned files.
///
/// A pure aggregation with no persistence of its own; recomputed on every
/// request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalSpace {
    /// Document usage.
    pub document: KindUsage,
    /// Image usage.
    pub image: KindUsage,
    /// Video usage.
    pub video: KindUsage,
    /// Audio usage.
    pub audio: KindUsage,
    /// Usage of uncategorized files.
    pub other: KindUsage,
    /// Sum of all categories, in bytes.
    pub used: u64,
    /// Fixed advertised capacity, in bytes.
    pub all: u64,
}

impl TotalSpace {
    /// An empty summary with the advertised capacity filled in.
    pub fn new() -> Self {
        Self {
            all: TOTAL_CAPACITY_BYTES,
            ..Self::default()
        }
    }

    /// Fold one file into the summary.
    pub fn record(&mut self, kind: FileKind, size: u64, updated_at: DateTime<Utc>) {
        self.used += size;

        let slot = self.slot_mut(kind);
        slot.size += size;
        if slot.latest_date.is_none_or(|latest| updated_at > latest) {
            slot.latest_date = Some(updated_at);
        }
    }

    /// The summary slot for a category.
    pub fn slot(&self, kind: FileKind) -> &KindUsage {
        match kind {
            FileKind::Document => &self.document,
            FileKind::Image => &self.image,
            FileKind::Video => &self.video,
            FileKind::Audio => &self.audio,
            FileKind::Other => &self.other,
        }
    }

    fn slot_mut(&mut self, kind: FileKind) -> &mut KindUsage {
        match kind {
            FileKind::Document => &mut self.document,
            FileKind::Image => &mut self.image,
            FileKind::Video => &mut self.video,
            FileKind::Audio => &mut self.audio,
            FileKind::Other => &mut self.other,
        }
    }
}

//! Three-way diff between the remote folder and the inventory.

use std::collections::HashMap;

use crate::types::{InventoryRecord, RemoteFile};

/// Outcome of comparing the remote listing against the inventory.
///
/// Upload set and delete set are complements over the name join key, so
/// a name can never appear in both; names present on both sides need no
/// action and appear in neither.
#[derive(Debug, Default)]
pub struct ReconciliationDiff {
    /// Remote files with no inventory record yet.
    pub to_upload: Vec<RemoteFile>,
    /// Inventory records whose file no longer exists remotely.
    pub to_delete: Vec<InventoryRecord>,
}

impl ReconciliationDiff {
    /// True when remote and inventory already agree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_upload.is_empty() && self.to_delete.is_empty()
    }
}

/// Computes the diff driving a sync run.
///
/// Pure and order-independent: the result does not depend on the order
/// of either input slice, and callers must not assume any ordering
/// within the returned sets.
#[must_use]
pub fn compute_diff(
    remote_files: &[RemoteFile],
    records: &[InventoryRecord],
) -> ReconciliationDiff {
    let remote_by_name: HashMap<&str, &RemoteFile> =
        remote_files.iter().map(|f| (f.name.as_str(), f)).collect();
    let record_by_name: HashMap<&str, &InventoryRecord> = records
        .iter()
        .map(|r| (r.display_name.as_str(), r))
        .collect();

    let to_upload = remote_files
        .iter()
        .filter(|f| !record_by_name.contains_key(f.name.as_str()))
        .cloned()
        .collect();

    let to_delete = records
        .iter()
        .filter(|r| !remote_by_name.contains_key(r.display_name.as_str()))
        .cloned()
        .collect();

    ReconciliationDiff {
        to_upload,
        to_delete,
    }
}

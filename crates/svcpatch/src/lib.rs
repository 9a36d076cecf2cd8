//! Patches for the generated GTFS service module.
//!
//! Two fixes, meant to be run by hand one after the other: [`add_method`]
//! inserts `getArrivalTime` after the `toRad` helper, [`remove_duplicate`]
//! drops the copy a second insertion leaves behind.

pub mod error;
pub mod file;
pub mod patch;

use std::path::Path;

use tracing::instrument;

pub use error::{PatchError, Result};
pub use patch::{Dedup, DedupPolicy, Insertion};

#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
    /// Fail, without writing, when the anchor is missing.
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOptions {
    pub policy: DedupPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddReport {
    pub anchors: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveReport {
    pub found: usize,
    pub removed: usize,
    pub first_removed_at: Option<usize>,
}

/// Inserts `getArrivalTime` after `toRad` in the file at `path`.
#[instrument(skip(options), fields(strict = options.strict))]
pub fn add_method(path: &Path, options: AddOptions) -> Result<AddReport> {
    file::rewrite(path, |content| {
        let Insertion { content, anchors } = patch::insert_method(content);
        if anchors == 0 {
            if options.strict {
                return Err(PatchError::AnchorNotFound {
                    path: path.to_owned(),
                });
            }
            tracing::warn!("toRad anchor not found, file left unchanged");
        } else {
            tracing::info!(anchors, "inserted {}", patch::METHOD_NAME);
        }
        Ok((content, AddReport { anchors }))
    })
}

/// Removes duplicated `getArrivalTime` blocks from the file at `path`.
#[instrument(skip(options), fields(policy = ?options.policy))]
pub fn remove_duplicate(path: &Path, options: RemoveOptions) -> Result<RemoveReport> {
    file::rewrite(path, |content| {
        let Dedup {
            content,
            found,
            removed,
            first_removed_at,
        } = patch::remove_duplicates(content, options.policy);
        tracing::info!(found, removed, "scanned for {}", patch::METHOD_NAME);
        if removed > 0 && removed + 1 < found {
            tracing::warn!(left = found - removed, "duplicates remain after removal");
        }
        Ok((
            content,
            RemoveReport {
                found,
                removed,
                first_removed_at,
            },
        ))
    })
}

/// Counts `getArrivalTime` blocks without touching the file.
#[instrument]
pub fn count(path: &Path) -> Result<usize> {
    file::inspect(path, patch::count_methods)
}

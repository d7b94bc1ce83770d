//! Change-bar page classification

use crate::constants::DEGENERATE_HEIGHT;
use crate::sections::ChangedPages;
use crate::types::MarginRecord;

/// Classify pages from their trimmed marginal heights.
///
/// A page carries a change bar iff its height is neither the degenerate
/// height (empty crop) nor the full crop height (edge-to-edge content).
/// Records are scanned in page order, so the result is ascending.
pub fn classify(records: &[MarginRecord], full_height: u32) -> ChangedPages {
    let mut records = records.to_vec();
    records.sort_by_key(|record| record.page);
    records.dedup_by_key(|record| record.page);

    let pages = records
        .iter()
        .filter(|record| is_changed(record.height, full_height))
        .map(|record| record.page)
        .collect();

    ChangedPages::from_sorted(pages)
}

fn is_changed(height: u32, full_height: u32) -> bool {
    height != full_height && height != DEGENERATE_HEIGHT
}

//! Phred+33 decoding of quality strings and averaging over captured spans.

use std::ops::Range;

/// The ASCII offset for Phred+33 encoded quality scores.
pub const PHRED_OFFSET: i32 = 33;

/// Decode a quality string into Phred scores, one per byte.
///
/// Each score is the byte's value minus [`PHRED_OFFSET`]; no range checking is done so bytes
/// below `!` produce negative scores.
pub fn phred33_scores(quals: &[u8]) -> Vec<i32> {
    quals.iter().map(|&q| i32::from(q) - PHRED_OFFSET).collect()
}

/// The arithmetic mean of the scores in `span`.
///
/// Returns `None` when `span` is empty or extends past the end of `quals`.
pub fn mean_quality(quals: &[i32], span: Range<usize>) -> Option<f64> {
    let scores = quals.get(span)?;
    if scores.is_empty() {
        return None;
    }
    let sum: i64 = scores.iter().map(|&q| i64::from(q)).sum();
    Some(sum as f64 / scores.len() as f64)
}

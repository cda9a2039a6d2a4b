//! Locate the index and barcode within a read.
//!
//! Reads are expected to have the following layout, starting at the first base:
//!
//! ```text
//! <index:8> <spacer:17> ACGCGT <barcode:24> CTGCAG
//! ```
//!
//! The index, spacer and barcode may be any ASCII word characters; reads are matched as raw
//! bytes so a read need not be valid UTF-8. Anything after the trailing
//! anchor is ignored. A read whose first base does not begin this layout is not a match, even
//! if the layout occurs later in the read.

use std::ops::Range;

use bstr::{BStr, ByteSlice};
use lazy_static::lazy_static;
use regex::bytes::Regex;

/// The anchored pattern used to extract the `index` and `barcode` groups from a read.
pub const BARCODE_PATTERN: &str =
    r"(?-u)^(?P<index>\w{8})\w{17}ACGCGT(?P<barcode>\w{24})CTGCAG";

lazy_static! {
    static ref BARCODE_REGEX: Regex = Regex::new(BARCODE_PATTERN).unwrap();
}

/// The index and barcode found within a read, borrowed from the read's sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeMatch<'a> {
    pub index: &'a BStr,
    pub barcode: &'a BStr,
    /// Offsets of the index within the read.
    pub index_span: Range<usize>,
    /// Offsets of the barcode within the read.
    pub barcode_span: Range<usize>,
}

/// Match `sequence` against [`BARCODE_PATTERN`].
///
/// Returns `None` if the read does not match starting from its first base.
pub fn find(sequence: &[u8]) -> Option<BarcodeMatch<'_>> {
    let caps = BARCODE_REGEX.captures(sequence)?;
    let index = caps.name("index")?;
    let barcode = caps.name("barcode")?;
    Some(BarcodeMatch {
        index: index.as_bytes().as_bstr(),
        barcode: barcode.as_bytes().as_bstr(),
        index_span: index.start()..index.end(),
        barcode_span: barcode.start()..barcode.end(),
    })
}

//! Streaming of the sequence and quality lines out of a FASTQ.
//!
//! A FASTQ record is four lines: header, sequence, quality header and quality string. The
//! [`LineStreamer`] walks the input line by line and only keeps the lines that are needed for
//! barcode extraction: the sequence line (line index `% 4 == 1`) and, when requested, the
//! quality line (line index `% 4 == 3`).
//!
//! Lines are read as raw bytes; nothing is decoded, so header and `+` lines may hold any bytes.
//! No validation of the record structure is done. A trailing partial record (one that ends
//! before its quality line) yields nothing, and no error is raised for it.
//!
//! When quality lines are kept the output is a flat sequence that alternates between sequence
//! and quality lines; [`pair_reads`] groups it back into `(sequence, quality scores)` pairs.

use std::io::{self, BufRead};

use bstr::BString;
use itertools::Itertools;

use crate::quality::phred33_scores;

/// The number of lines in a single FASTQ record.
pub const LINES_PER_RECORD: usize = 4;

/// Offset of the sequence line within a record.
const SEQUENCE_OFFSET: usize = 1;

/// Offset of the quality line within a record.
const QUALITY_OFFSET: usize = 3;

/// A lazy iterator over the sequence (and optionally quality) lines of a FASTQ.
///
/// Line terminators (`\n` or `\r\n`) are stripped. The iterator is single pass; once the
/// underlying reader is exhausted it stays exhausted.
pub struct LineStreamer<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
    /// Zero-based index of the next line to be read.
    line_index: usize,
    with_quality: bool,
    /// Sequence of the current record, held until the record is known to be complete.
    pending_sequence: Option<BString>,
    /// Quality line waiting to be emitted right after its sequence.
    pending_quality: Option<BString>,
}

impl<R: BufRead> LineStreamer<R> {
    /// Create a new [`LineStreamer`] over `reader`.
    ///
    /// If `with_quality` is `true` each record yields its sequence line followed by its quality
    /// line, otherwise only the sequence line is yielded.
    pub fn new(reader: R, with_quality: bool) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_index: 0,
            with_quality,
            pending_sequence: None,
            pending_quality: None,
        }
    }

    /// Read the next line into `self.buffer`, returning `false` at end of input.
    fn read_line(&mut self) -> io::Result<bool> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(false);
        }
        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
        }
        Ok(true)
    }
}

impl<R: BufRead> Iterator for LineStreamer<R> {
    type Item = io::Result<BString>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(quals) = self.pending_quality.take() {
            return Some(Ok(quals));
        }

        loop {
            match self.read_line() {
                Ok(true) => (),
                Ok(false) => return None,
                Err(error) => return Some(Err(error)),
            }
            let offset = self.line_index % LINES_PER_RECORD;
            self.line_index += 1;

            match offset {
                SEQUENCE_OFFSET => {
                    self.pending_sequence = Some(std::mem::take(&mut self.buffer).into());
                }
                QUALITY_OFFSET => {
                    if let Some(sequence) = self.pending_sequence.take() {
                        if self.with_quality {
                            self.pending_quality = Some(std::mem::take(&mut self.buffer).into());
                        }
                        return Some(Ok(sequence));
                    }
                }
                _ => (),
            }
        }
    }
}

/// Group a flat stream into consecutive pairs.
///
/// Elements are taken two at a time; if the stream has an odd number of elements the final
/// element is dropped.
pub fn pair_lines<I>(lines: I) -> impl Iterator<Item = (I::Item, I::Item)>
where
    I: IntoIterator,
{
    lines.into_iter().tuples()
}

/// Pair alternating sequence and quality lines, decoding the quality line to Phred+33 scores.
pub fn pair_reads<I>(lines: I) -> impl Iterator<Item = (BString, Vec<i32>)>
where
    I: IntoIterator<Item = BString>,
{
    pair_lines(lines).map(|(sequence, quals)| (sequence, phred33_scores(&quals)))
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use bstr::BString;
    use itertools::Itertools;
    use rstest::rstest;

    use crate::utils::test_commons::{fastq_text, Fq};

    use super::{pair_lines, pair_reads, LineStreamer};

    fn stream(text: impl AsRef<[u8]>, with_quality: bool) -> Vec<BString> {
        LineStreamer::new(Cursor::new(text.as_ref().to_vec()), with_quality)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    #[case(25)]
    fn test_yields_one_sequence_per_record(#[case] num_records: usize) {
        let records =
            (0..num_records).map(|_| Fq { bases: "ACGT", ..Fq::default() }).collect_vec();
        let lines = stream(fastq_text(&records), false);
        assert_eq!(lines.len(), num_records);
        assert!(lines.iter().all(|l| l == "ACGT"));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(7)]
    fn test_yields_sequence_and_quality_per_record(#[case] num_records: usize) {
        let records = (0..num_records)
            .map(|_| Fq { bases: "ACGT", quals: Some("#5?I"), ..Fq::default() })
            .collect_vec();
        let lines = stream(fastq_text(&records), true);
        assert_eq!(lines.len(), num_records * 2);
        for (seq, qual) in lines.iter().tuples() {
            assert_eq!(seq, "ACGT");
            assert_eq!(qual, "#5?I");
        }
    }

    #[test]
    fn test_only_sequence_lines_are_kept() {
        let text = "@read1\nAAAA\n+\nIIII\n@read2\nCCCC\n+\n####\n";
        assert_eq!(stream(text, false), vec![BString::from("AAAA"), BString::from("CCCC")]);
    }

    #[test]
    fn test_crlf_line_endings_are_stripped() {
        let text = "@read1\r\nACGT\r\n+\r\nIIII\r\n";
        assert_eq!(stream(text, true), vec![BString::from("ACGT"), BString::from("IIII")]);
    }

    #[test]
    fn test_non_utf8_header_and_separator_lines_are_skipped() {
        let mut text: Vec<u8> = vec![];
        text.extend_from_slice(b"@r1 sample=\xe9\nACGT\n+\xff\xfe\nIIII\n");
        text.extend_from_slice(b"@r2\x80\nTTGA\n+\n####\n");
        assert_eq!(stream(&text, false), vec![BString::from("ACGT"), BString::from("TTGA")]);
        assert_eq!(
            stream(&text, true),
            vec![
                BString::from("ACGT"),
                BString::from("IIII"),
                BString::from("TTGA"),
                BString::from("####")
            ]
        );
    }

    #[test]
    fn test_non_utf8_sequence_line_is_yielded_as_bytes() {
        let text = b"@r1\nAC\xe9T\n+\nIIII\n";
        assert_eq!(stream(text, false), vec![BString::from(&b"AC\xe9T"[..])]);
    }

    #[rstest]
    #[case("@read1\nAAAA\n+\nIIII\n@read2", 1)]
    #[case("@read1\nAAAA\n+\nIIII\n@read2\nCCCC", 1)]
    #[case("@read1\nAAAA\n+\nIIII\n@read2\nCCCC\n+", 1)]
    #[case("@read1\nAAAA\n+\nIIII\n@read2\nCCCC\n+\n####", 2)]
    #[case("@read1\nAAAA\n+\nIIII\n@read2\nCCCC\n+\n####\n", 2)]
    #[case("", 0)]
    fn test_trailing_partial_records_are_dropped(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(stream(text, false).len(), expected);
        assert_eq!(stream(text, true).len(), expected * 2);
    }

    #[test]
    fn test_exhausted_streamer_stays_exhausted() {
        let mut streamer = LineStreamer::new(Cursor::new("@r\nAC\n+\nII\n@r2\n"), false);
        assert_eq!(streamer.next().unwrap().unwrap(), "AC");
        assert!(streamer.next().is_none());
        assert!(streamer.next().is_none());
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![1], vec![])]
    #[case(vec![1, 2], vec![(1, 2)])]
    #[case(vec![1, 2, 3], vec![(1, 2)])]
    #[case(vec![1, 2, 3, 4, 5], vec![(1, 2), (3, 4)])]
    fn test_pair_lines_drops_unpaired_final_element(
        #[case] flat: Vec<usize>,
        #[case] expected: Vec<(usize, usize)>,
    ) {
        assert_eq!(pair_lines(flat).collect_vec(), expected);
    }

    #[test]
    fn test_pair_reads_decodes_quality_as_phred33() {
        let records = vec![
            Fq { bases: "ACGT", quals: Some("!+5I"), ..Fq::default() },
            Fq { bases: "GT", quals: Some("I#"), ..Fq::default() },
        ];
        let pairs = pair_reads(stream(fastq_text(&records), true)).collect_vec();
        assert_eq!(
            pairs,
            vec![(BString::from("ACGT"), vec![0, 10, 20, 40]), (BString::from("GT"), vec![40, 2])]
        );
    }

    #[test]
    fn test_pair_reads_drops_unpaired_sequence() {
        let lines = vec![BString::from("ACGT"), BString::from("IIII"), BString::from("TTTT")];
        assert_eq!(pair_reads(lines).collect_vec(), vec![(BString::from("ACGT"), vec![40; 4])]);
    }
}

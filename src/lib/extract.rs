//! The extraction pipeline: stream reads, match them and write one row per matching read.

use std::{
    io::{BufRead, Write},
    ops::Range,
};

use anyhow::{Context, Result};
use bstr::BString;
use itertools::process_results;
use thiserror::Error;

use crate::{
    matcher::{self, BarcodeMatch},
    output::{BarcodeRow, RowWriter, SpanQualities},
    quality::mean_quality,
    stream::{pair_reads, LineStreamer},
};

/// Errors raised while extracting barcodes from otherwise readable input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Record {record} has {found} quality scores but the {field} spans bases {start}..{end}")]
    QualityTooShort { record: usize, field: &'static str, start: usize, end: usize, found: usize },
}

/// Counts collected over a single extraction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractMetrics {
    /// Complete FASTQ records seen.
    pub records: usize,
    /// Rows written, one per record that matched.
    pub rows: usize,
}

impl ExtractMetrics {
    /// The number of records that did not match.
    pub fn unmatched(&self) -> usize {
        self.records - self.rows
    }
}

/// Extracts index and barcode sequences from a FASTQ and writes them as rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct Extractor {
    with_quality: bool,
}

impl Extractor {
    /// Create a new [`Extractor`]; if `with_quality` the mean quality of each span is output.
    pub fn new(with_quality: bool) -> Self {
        Self { with_quality }
    }

    /// Read FASTQ records from `reader` and write the header plus one row per matching read
    /// to `writer`.
    ///
    /// Reads that don't match are skipped without error.
    ///
    /// # Errors
    /// - Reading from `reader` or writing to `writer` fails.
    /// - [`ExtractError::QualityTooShort`] if a matched span is not covered by the quality line.
    pub fn extract<R: BufRead, W: Write>(&self, reader: R, writer: W) -> Result<ExtractMetrics> {
        let mut out = RowWriter::new(writer, self.with_quality);
        out.write_header().context("Failed to write header")?;

        let streamer = LineStreamer::new(reader, self.with_quality);
        let metrics = if self.with_quality {
            process_results(streamer, |lines| write_quality_rows(pair_reads(lines), &mut out))
        } else {
            process_results(streamer, |lines| write_sequence_rows(lines, &mut out))
        }
        .context("Failed to read FASTQ")??;

        out.flush().context("Failed to flush output")?;
        Ok(metrics)
    }
}

/// Write a row for each matching sequence line.
fn write_sequence_rows<I, W>(lines: I, out: &mut RowWriter<W>) -> Result<ExtractMetrics>
where
    I: Iterator<Item = BString>,
    W: Write,
{
    let mut metrics = ExtractMetrics::default();
    for sequence in lines {
        metrics.records += 1;
        if let Some(m) = matcher::find(&sequence) {
            out.write_row(&BarcodeRow { barcode: m.barcode, index: m.index, qualities: None })?;
            metrics.rows += 1;
        }
    }
    Ok(metrics)
}

/// Write a row, with mean qualities, for each matching `(sequence, quality)` pair.
fn write_quality_rows<I, W>(pairs: I, out: &mut RowWriter<W>) -> Result<ExtractMetrics>
where
    I: Iterator<Item = (BString, Vec<i32>)>,
    W: Write,
{
    let mut metrics = ExtractMetrics::default();
    for (sequence, quals) in pairs {
        metrics.records += 1;
        if let Some(m) = matcher::find(&sequence) {
            let qualities = span_qualities(&m, &quals, metrics.records)?;
            out.write_row(&BarcodeRow {
                barcode: m.barcode,
                index: m.index,
                qualities: Some(qualities),
            })?;
            metrics.rows += 1;
        }
    }
    Ok(metrics)
}

/// Mean quality over the barcode and index spans of a match.
fn span_qualities(
    m: &BarcodeMatch,
    quals: &[i32],
    record: usize,
) -> Result<SpanQualities, ExtractError> {
    let mean = |field: &'static str, span: &Range<usize>| {
        mean_quality(quals, span.clone()).ok_or(ExtractError::QualityTooShort {
            record,
            field,
            start: span.start,
            end: span.end,
            found: quals.len(),
        })
    };
    Ok(SpanQualities {
        barcode: mean("barcode", &m.barcode_span)?,
        index: mean("index", &m.index_span)?,
    })
}

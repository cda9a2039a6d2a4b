//! Writing of extracted barcodes as space-delimited rows.

use std::io::Write;

use bstr::BStr;
use csv::{QuoteStyle, WriterBuilder};
use strum::{Display, EnumIter, IntoEnumIterator};

/// The columns that may be written, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Column {
    #[strum(serialize = "barcode")]
    Barcode,
    #[strum(serialize = "index")]
    Index,
    #[strum(serialize = "barcodeq")]
    BarcodeQuality,
    #[strum(serialize = "indexq")]
    IndexQuality,
}

impl Column {
    /// Whether the column holds a mean quality score.
    pub fn is_quality(self) -> bool {
        matches!(self, Column::BarcodeQuality | Column::IndexQuality)
    }

    /// The columns written when quality scoring is on or off.
    pub fn for_output(with_quality: bool) -> Vec<Column> {
        Column::iter().filter(|c| with_quality || !c.is_quality()).collect()
    }
}

/// Mean quality scores of the barcode and index of a single read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanQualities {
    pub barcode: f64,
    pub index: f64,
}

/// A single output row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarcodeRow<'a> {
    pub barcode: &'a BStr,
    pub index: &'a BStr,
    /// Mean qualities, present only when quality scoring is on.
    pub qualities: Option<SpanQualities>,
}

/// Writes [`BarcodeRow`]s separated by single spaces.
pub struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
    columns: Vec<Column>,
    fields: Vec<Vec<u8>>,
}

impl<W: Write> RowWriter<W> {
    /// Create a new [`RowWriter`]; the quality columns are written only if `with_quality`.
    pub fn new(writer: W, with_quality: bool) -> Self {
        let writer = WriterBuilder::new()
            .has_headers(false)
            .delimiter(b' ')
            .quote_style(QuoteStyle::Never)
            .from_writer(writer);
        Self { writer, columns: Column::for_output(with_quality), fields: Vec::new() }
    }

    /// Write the header row.
    pub fn write_header(&mut self) -> Result<(), csv::Error> {
        self.writer.write_record(self.columns.iter().map(ToString::to_string))
    }

    /// Write a row.
    ///
    /// The barcode and index are written as the raw bytes of the read.
    pub fn write_row(&mut self, row: &BarcodeRow) -> Result<(), csv::Error> {
        self.fields.clear();
        self.fields.push(row.barcode.to_vec());
        self.fields.push(row.index.to_vec());
        if let Some(qualities) = row.qualities {
            self.fields.push(format_quality(qualities.barcode).into_bytes());
            self.fields.push(format_quality(qualities.index).into_bytes());
        }
        self.writer.write_record(&self.fields)
    }

    /// Flush any buffered rows to the underlying writer.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

/// Shortest round-trip representation, always with a fractional part (`35.0`, `35.25`).
fn format_quality(quality: f64) -> String {
    format!("{:?}", quality)
}

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    extract::{ExtractMetrics, Extractor},
    opts::Opts,
    utils::open_input,
};

/// Extract barcodes from the FASTQ given in `opts`, writing rows to standard output.
pub fn run(opts: Opts) -> Result<()> {
    let stdout = io::stdout();
    let metrics = run_with_writer(&opts, BufWriter::new(stdout.lock()))?;
    debug!(
        "Processed {} records, wrote {} rows ({} unmatched)",
        metrics.records,
        metrics.rows,
        metrics.unmatched()
    );
    Ok(())
}

/// Extract barcodes from the FASTQ given in `opts`, writing rows to `writer`.
pub fn run_with_writer<W: Write>(opts: &Opts, writer: W) -> Result<ExtractMetrics> {
    info!(
        "Extracting barcodes from {}{}",
        opts.fastq.to_string_lossy(),
        if opts.with_quality { " with base qualities" } else { "" }
    );
    let reader = open_input(&opts.fastq)?;
    Extractor::new(opts.with_quality)
        .extract(reader, writer)
        .with_context(|| format!("Failed to extract barcodes from {}", opts.fastq.to_string_lossy()))
}

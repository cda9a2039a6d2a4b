#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use crate::utils::built_info;

pub static TOOL_NAME: &str = "bcextract";

static SHORT_USAGE: &str = "Extracts anchored index and barcode sequences from FASTQ reads.";

static LONG_USAGE: &str = "
Extracts anchored index and barcode sequences from FASTQ reads.

Each read is matched, from its first base, against the layout:

  <index:8> <spacer:17> ACGCGT <barcode:24> CTGCAG

Reads that do not match are skipped.  For each matching read the barcode and index are
written to standard output as a space-separated row, after a header row.  With
--with-quality the mean Phred+33 base quality of the barcode and of the index are also
written.

The input may be plain text or gzip compressed (`.gz`/`.bgz`); use `-` to read standard input.

Example invocation:

bcextract --with-quality reads.fastq.gz > barcodes.txt
";

#[derive(Parser, Debug, Clone)]
#[clap(name = TOOL_NAME, version = built_info::VERSION.as_str(), about=SHORT_USAGE, long_about=LONG_USAGE, term_width=0)]
pub struct Opts {
    /// Path to the input FASTQ, or `-` for standard input.
    #[clap(display_order = 1)]
    pub fastq: PathBuf,

    /// Also output the mean base quality of the barcode and index.
    #[clap(long, short = 'q', display_order = 2)]
    pub with_quality: bool,
}

/// Implement defaults that match the CLI options to allow for easier testing.
///
/// Note that these defaults exist only within test code.
#[cfg(test)]
impl Default for Opts {
    fn default() -> Self {
        Self { fastq: PathBuf::default(), with_quality: false }
    }
}

/// Logger reading its filter from `RUST_LOG`, falling back to `info`.
fn logger() -> env_logger::Builder {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
}

/// Parse args and set up logging / tracing
pub fn setup() -> Opts {
    logger().init();

    Opts::parse()
}

//! A library for extracting anchored index and barcode sequences from FASTQ reads.
//!
//! # Overview
//!
//! The flow of data is as follows:
//!
//! - The [`stream::LineStreamer`] lazily pulls the raw sequence line, and optionally the quality
//!   line, out of each FASTQ record; [`stream::pair_reads`] groups each sequence with its decoded
//!   quality scores.
//! - [`matcher::find`] matches each sequence from its first base against the fixed
//!   index/anchor/barcode layout.
//! - [`quality::mean_quality`] averages the quality scores over the matched spans.
//! - The [`output::RowWriter`] writes one space-separated row per matching read.
//! - The [`extract::Extractor`] ties these together and [`run::run`] drives it from the CLI
//!   [`opts::Opts`].
#![deny(unsafe_code)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]
pub mod extract;
pub mod matcher;
pub mod opts;
pub mod output;
pub mod quality;
pub mod run;
pub mod stream;
pub mod utils;

//! Utility functions.
use std::{
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use fgoxide::io::Io;

/// The path given on the command line to read from standard input.
pub const STDIN_PATH: &str = "-";

pub mod built_info {
    use lazy_static::lazy_static;
    include!(concat!(env!("OUT_DIR"), "/built.rs"));

    /// Get a software version string including
    ///   - Git commit hash
    ///   - Git dirty info (whether the repo had uncommitted changes)
    ///   - Cargo package version if no git info found
    fn get_software_version() -> String {
        let prefix = if let Some(s) = GIT_COMMIT_HASH {
            format!("{}-{}", PKG_VERSION, &s[0..8])
        } else {
            PKG_VERSION.to_string()
        };
        let suffix = match GIT_DIRTY {
            Some(true) => "-dirty",
            _ => "",
        };
        format!("{}{}", prefix, suffix)
    }

    lazy_static! {
        /// Version of the software with git hash
        pub static ref VERSION: String = get_software_version();
    }
}

/// Open a FASTQ for reading.
///
/// [`STDIN_PATH`] reads from standard input. Paths ending in `.gz` or `.bgz` are decompressed.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    open_input_or(path, BufReader::new(io::stdin()))
}

/// Open a FASTQ for reading, returning `stdin` in place of standard input for [`STDIN_PATH`].
pub fn open_input_or<S: BufRead + 'static>(path: &Path, stdin: S) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == STDIN_PATH {
        return Ok(Box::new(stdin));
    }
    let reader = Io::default()
        .new_reader(&path)
        .with_context(|| format!("Failed to open {}", path.to_string_lossy()))?;
    Ok(Box::new(reader))
}

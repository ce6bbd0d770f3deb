//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why an input file could not be opened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unavailable {
    /// The path does not exist
    NotFound,
    /// The file exists but is not gzip/BGZF compressed
    NotCompressed,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::NotFound => f.write_str("file not found"),
            Unavailable::NotCompressed => f.write_str("not a gzip or BGZF file"),
        }
    }
}

/// Main error type for haplowin operations
#[derive(Error, Debug)]
pub enum HaploError {
    /// I/O errors (permission denied, read failures)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file missing or not in the expected compressed format
    #[error("Input unavailable ({reason}): {path}")]
    InputUnavailable { path: PathBuf, reason: Unavailable },

    /// No `#CHROM` header line within the scanned prefix of the stream
    #[error("Malformed header: no column header line found in the first {lines_scanned} lines")]
    MalformedHeader { lines_scanned: usize },

    /// A data line with too few tab-separated fields
    #[error("Truncated record at line {line}: expected at least 9 fields, got {fields}")]
    TruncatedRecord { line: usize, fields: usize },

    /// A data line whose genotype columns disagree with the header
    #[error("Sample count mismatch at line {line}: header has {expected} samples, record has {found}")]
    SampleCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Allele count does not fit the 4-bit genotype packing
    #[error("Too many alleles at line {line}: {alleles} (at most 15 supported)")]
    TooManyAlleles { line: usize, alleles: usize },

    /// Parse errors
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Configuration errors (invalid window geometry, label ceiling)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Algorithm errors (broken internal invariants)
    #[error("Algorithm error: {message}")]
    Algorithm { message: String },
}

/// Type alias for Results using HaploError
pub type Result<T> = std::result::Result<T, HaploError>;

impl HaploError {
    /// Create an input-unavailable error
    pub fn unavailable(path: impl Into<PathBuf>, reason: Unavailable) -> Self {
        Self::InputUnavailable {
            path: path.into(),
            reason,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an algorithm error
    pub fn algorithm(message: impl Into<String>) -> Self {
        Self::Algorithm {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// True for errors raised while opening the input
    pub fn is_input_unavailable(&self) -> bool {
        matches!(self, Self::InputUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_reason() {
        let err = HaploError::unavailable("/tmp/x.vcf", Unavailable::NotCompressed);
        let msg = err.to_string();
        assert!(msg.contains("not a gzip or BGZF file"));
        assert!(msg.contains("/tmp/x.vcf"));
        assert!(err.is_input_unavailable());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: HaploError = io.into();
        assert!(matches!(err, HaploError::Io(_)));
    }
}

//! # I/O Module
//!
//! Input boundaries: opening compressed streams and parsing VCF records into
//! per-sample genotypes.

pub mod source;
pub mod vcf;

pub use source::{open_input, Compression};
pub use vcf::GenotypeReader;

//! # Data Module
//!
//! In-memory representations shared by the reader, encoder and window assembler.
//!
//! - `genotype`: one-byte packed allele pairs and the genotype field decoder
//! - `record`: a reusable per-locus record produced by the VCF reader
//! - `samples`: sample names and index newtype
//! - `window`: coordinate summaries emitted by the sliding window

pub mod genotype;
pub mod record;
pub mod samples;
pub mod window;

// Re-export commonly used types
pub use genotype::{parse_genotype, Genotype, MAX_ALLELES};
pub use record::GenotypeRecord;
pub use samples::{SampleIdx, Samples};
pub use window::Window;

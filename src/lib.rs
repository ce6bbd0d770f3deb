//! # Haplowin Library
//!
//! Streaming haplotype encoding and sliding-window assembly over compressed
//! VCF files.
//!
//! ## Modules
//! - `config`: CLI argument parsing and parameter validation
//! - `data`: Genotypes, records, samples and window descriptors
//! - `error`: Error types and result aliases
//! - `io`: Compressed input detection and VCF record reading
//! - `model`: Haplotype label space and encoder
//! - `pipelines`: Sliding window assembly
//! - `utils`: Start-locus ring and thread pool setup

pub mod config;
pub mod data;
pub mod error;
pub mod io;
pub mod model;
pub mod pipelines;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, EncoderParams, ReaderParams, WindowParams};
pub use data::{Genotype, GenotypeRecord, SampleIdx, Samples, Window};
pub use error::{HaploError, Result};
pub use io::vcf::GenotypeReader;
pub use model::{HaplotypeEncoder, LabelSpace};
pub use pipelines::SlidingWindows;

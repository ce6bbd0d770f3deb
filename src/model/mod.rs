//! # Model Module
//!
//! Haplotype encoding: mixed-radix codes per sample, kept bounded by
//! periodic label compaction.

pub mod encoder;
pub mod labels;

pub use encoder::HaplotypeEncoder;
pub use labels::LabelSpace;

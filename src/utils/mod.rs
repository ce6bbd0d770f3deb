//! # Utilities Module
//!
//! ## Role
//! Small helpers that don't belong in domain-specific modules.
//!
//! ## Sub-modules
//! - `start_ring`: fixed-capacity ring of pending window start loci
//! - `threading`: Rayon thread pool configuration for multi-file runs

pub mod start_ring;
pub mod threading;

pub use start_ring::StartRing;

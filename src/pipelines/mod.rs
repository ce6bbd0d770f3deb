//! # Pipeline Module
//!
//! Orchestration on top of the reader and encoder: turns a genotype stream
//! into a sequence of window descriptors.

pub mod sliding;

pub use sliding::SlidingWindows;

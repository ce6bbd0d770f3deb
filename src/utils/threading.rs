//! # Threading Configuration
//!
//! A single pipeline is strictly sequential; the unit of parallelism is the
//! input file. This module builds the rayon pool the driver fans files out on.

use crate::error::{HaploError, Result};

/// Create a configured thread pool
pub fn build_thread_pool(n_threads: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("haplowin-worker-{}", i))
        .build()
        .map_err(|e| HaploError::config(format!("Failed to create thread pool: {}", e)))
}

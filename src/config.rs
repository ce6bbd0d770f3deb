//! # Configuration
//!
//! ## Role
//! Pipeline parameters and CLI argument parsing.
//!
//! The library takes explicit parameter structs ([`ReaderParams`],
//! [`EncoderParams`], [`WindowParams`]); the binary builds them from the
//! `clap`-derived [`Config`].
//!
//! ## Example CLI
//! ```bash
//! haplowin cohort.vcf.gz --hap-size 100 --window-size 10 --offset-size 1
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{HaploError, Result};

/// Label-space size that triggers compaction
pub const DEFAULT_MAX_LEAVES: u32 = 1 << 25;

/// Largest accepted compaction ceiling. A label space just below the ceiling
/// multiplied by the widest locus (16 leaves) must still fit in `u32`.
pub const MAX_LEAVES_LIMIT: u32 = 1 << 28;

/// Lines scanned for the `#CHROM` header before giving up
pub const DEFAULT_MAX_HEADER_LINES: usize = 1_000_000;

/// Record reader settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderParams {
    /// Upper bound on lines searched for the column header
    pub max_header_lines: usize,
}

impl Default for ReaderParams {
    fn default() -> Self {
        Self {
            max_header_lines: DEFAULT_MAX_HEADER_LINES,
        }
    }
}

impl ReaderParams {
    pub fn new(max_header_lines: usize) -> Result<Self> {
        if max_header_lines == 0 {
            return Err(HaploError::config("max_header_lines must be at least 1"));
        }
        Ok(Self { max_header_lines })
    }
}

/// Haplotype encoder settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderParams {
    /// Label-space size at which codes are compacted
    pub max_leaves: u32,
}

impl Default for EncoderParams {
    fn default() -> Self {
        Self {
            max_leaves: DEFAULT_MAX_LEAVES,
        }
    }
}

impl EncoderParams {
    pub fn new(max_leaves: u32) -> Result<Self> {
        if !(2..=MAX_LEAVES_LIMIT).contains(&max_leaves) {
            return Err(HaploError::config(format!(
                "max_leaves must be in 2..={}, got {}",
                MAX_LEAVES_LIMIT, max_leaves
            )));
        }
        Ok(Self { max_leaves })
    }
}

/// Sliding-window geometry, all counts in haplotypes except `hap_size`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowParams {
    /// Haplotypes per window (W)
    pub window_size: usize,
    /// Loci per haplotype (H)
    pub hap_size: usize,
    /// Haplotypes between consecutive window starts (O)
    pub offset_size: usize,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            window_size: 10,
            hap_size: 100,
            offset_size: 1,
        }
    }
}

impl WindowParams {
    /// Create validated window parameters
    pub fn new(window_size: usize, hap_size: usize, offset_size: usize) -> Result<Self> {
        let params = Self {
            window_size,
            hap_size,
            offset_size,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 || self.hap_size == 0 || self.offset_size == 0 {
            return Err(HaploError::config(format!(
                "window, haplotype and offset sizes must be positive (got W={}, H={}, O={})",
                self.window_size, self.hap_size, self.offset_size
            )));
        }
        if self.offset_size > self.window_size {
            return Err(HaploError::config(format!(
                "offset size {} exceeds window size {}",
                self.offset_size, self.window_size
            )));
        }
        Ok(())
    }

    /// Number of window starts that can fall inside one window: `ceil(W / O)`
    pub fn start_slots(&self) -> usize {
        (self.window_size - 1) / self.offset_size + 1
    }

    /// Loci dropped from the front of a window when sliding: `H * O`
    pub fn step_loci(&self) -> usize {
        self.hap_size * self.offset_size
    }
}

/// Output format of the driver binary
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Tab-separated rows with a header line
    Tsv,
    /// One JSON object per window
    Json,
}

/// Command-line configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "haplowin", version, about = "Encode VCF haplotypes and slide windows along the genome")]
pub struct Config {
    /// Input VCF files (gzip or BGZF compressed)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Loci per haplotype
    #[arg(long, default_value_t = 100)]
    pub hap_size: usize,

    /// Haplotypes per window
    #[arg(long, default_value_t = 10)]
    pub window_size: usize,

    /// Haplotypes between consecutive window starts
    #[arg(long, default_value_t = 1)]
    pub offset_size: usize,

    /// Label-space size that triggers compaction
    #[arg(long, default_value_t = DEFAULT_MAX_LEAVES)]
    pub max_leaves: u32,

    /// Lines scanned for the column header
    #[arg(long, default_value_t = DEFAULT_MAX_HEADER_LINES)]
    pub max_header_lines: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,

    /// Worker threads for processing several inputs (default: all cores)
    #[arg(long)]
    pub nthreads: Option<usize>,

    /// Print span timings to stderr
    #[arg(long)]
    pub profile: bool,
}

impl Config {
    /// Parse from the process arguments and validate
    pub fn parse_and_validate() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.window_params()?;
        self.encoder_params()?;
        self.reader_params()?;
        if self.nthreads == Some(0) {
            return Err(HaploError::config("nthreads must be at least 1"));
        }
        Ok(())
    }

    pub fn window_params(&self) -> Result<WindowParams> {
        WindowParams::new(self.window_size, self.hap_size, self.offset_size)
    }

    pub fn encoder_params(&self) -> Result<EncoderParams> {
        EncoderParams::new(self.max_leaves)
    }

    pub fn reader_params(&self) -> Result<ReaderParams> {
        ReaderParams::new(self.max_header_lines)
    }

    /// Thread count, defaulting to available parallelism
    pub fn nthreads(&self) -> usize {
        self.nthreads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

//! # Window Descriptors
//!
//! A window is a run of consecutive haplotypes on one chromosome. Only its
//! coordinates survive assembly; haplotype codes are not retained.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinates of one assembled window
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Window number among all windows (1-based)
    pub index: usize,
    /// Window number on its chromosome (1-based, resets per chromosome)
    pub index_on_chromosome: usize,
    /// Chromosome the window lies on
    pub chromosome: String,
    /// Position of the first locus
    pub start_locus: u32,
    /// Position of the last locus
    pub end_locus: u32,
    /// Loci covered
    pub num_loci: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            index: 1,
            index_on_chromosome: 1,
            chromosome: String::new(),
            start_locus: 0,
            end_locus: 0,
            num_loci: 0,
        }
    }
}

impl Window {
    /// The window started after this one.
    ///
    /// On the same chromosome it inherits the overlap (`num_loci - step_loci`);
    /// on a new chromosome it starts empty.
    pub fn successor(&self, same_chromosome: bool, step_loci: usize) -> Self {
        if same_chromosome {
            debug_assert!(self.num_loci >= step_loci);
            Self {
                index: self.index + 1,
                index_on_chromosome: self.index_on_chromosome + 1,
                num_loci: self.num_loci - step_loci,
                ..Self::default()
            }
        } else {
            Self {
                index: self.index + 1,
                index_on_chromosome: 1,
                num_loci: 0,
                ..Self::default()
            }
        }
    }

    /// TSV column names matching [`Window::write_tsv`]
    pub const TSV_HEADER: &'static str =
        "window\twindow_on_chromosome\tchromosome\tstart\tend\tnum_loci";

    /// Write the window as one tab-separated row
    pub fn write_tsv<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.index,
            self.index_on_chromosome,
            self.chromosome,
            self.start_locus,
            self.end_locus,
            self.num_loci
        )
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "window {} ({} on {}): {}-{}, {} loci",
            self.index,
            self.index_on_chromosome,
            self.chromosome,
            self.start_locus,
            self.end_locus,
            self.num_loci
        )
    }
}

//! # Genotype Records
//!
//! One VCF data line reduced to what the encoder needs. Records are reused:
//! the reader refills the same buffers line after line and exchanges the
//! genotype vector with the caller instead of copying it.

use crate::data::genotype::Genotype;

/// Chromosome, position, allele count and packed genotypes of one locus
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenotypeRecord {
    /// Chromosome name (CHROM column)
    pub chromosome: String,
    /// 1-based position (POS column)
    pub position: u32,
    /// REF plus listed ALT alleles; the missing allele is not counted
    pub num_alleles: u8,
    /// One packed genotype per sample
    pub genotypes: Vec<Genotype>,
}

impl GenotypeRecord {
    /// Empty record with a genotype buffer sized for `n_samples`
    pub fn with_samples(n_samples: usize) -> Self {
        Self {
            chromosome: String::new(),
            position: 0,
            num_alleles: 0,
            genotypes: vec![Genotype::default(); n_samples],
        }
    }
}

//! # Haplotype Encoder
//!
//! Pulls records from a [`GenotypeReader`] and folds them into per-sample
//! haplotype codes, one haplotype (a run of at most `max_loci` consecutive loci
//! on one chromosome) at a time.

use crate::config::EncoderParams;
use crate::data::record::GenotypeRecord;
use crate::data::samples::SampleIdx;
use crate::error::Result;
use crate::io::vcf::GenotypeReader;
use crate::model::labels::LabelSpace;

/// Encodes consecutive loci into left/right haplotype codes
pub struct HaplotypeEncoder {
    /// Last record pulled from the reader; its genotype buffer is exchanged
    /// with the reader's lookahead on every pull
    record: GenotypeRecord,
    /// Codes of the haplotype under construction
    space: LabelSpace,
    /// Chromosome of the haplotype
    chromosome: String,
    /// Position of the first locus
    start_locus: u32,
    /// Position of the last locus
    end_locus: u32,
    /// Loci folded into the haplotype
    num_loci: usize,
}

impl HaplotypeEncoder {
    pub fn new(n_samples: usize, params: &EncoderParams) -> Self {
        Self {
            record: GenotypeRecord::with_samples(n_samples),
            space: LabelSpace::new(n_samples, params.max_leaves),
            chromosome: String::new(),
            start_locus: 0,
            end_locus: 0,
            num_loci: 0,
        }
    }

    /// Encoder sized for the reader's samples
    pub fn for_reader(reader: &GenotypeReader, params: &EncoderParams) -> Self {
        Self::new(reader.num_samples(), params)
    }

    /// Fold the genotypes of the last pulled record into the codes
    pub fn extend(&mut self, n_alleles: u8, collapse_missing: bool) {
        self.space
            .extend(&self.record.genotypes, n_alleles, collapse_missing);
    }

    /// Encode the next haplotype of up to `max_loci` loci.
    ///
    /// Stops early at end of stream or when the following record lies on another
    /// chromosome. Returns `true` only if `max_loci` loci were folded and another
    /// haplotype can start on the same chromosome right away. At end of stream
    /// returns `false` without touching the encoder.
    pub fn next_haplotype(
        &mut self,
        reader: &mut GenotypeReader,
        max_loci: usize,
        collapse_missing: bool,
    ) -> Result<bool> {
        if reader.is_eof() {
            return Ok(false);
        }

        self.chromosome.clear();
        self.chromosome.push_str(reader.next_chromosome());
        self.start_locus = reader.next_position();
        self.space.reset();
        self.num_loci = 0;

        let mut same_chromosome = true;
        while !reader.is_eof() && self.num_loci < max_loci && same_chromosome {
            reader.next_record(&mut self.record)?;
            self.end_locus = self.record.position;
            self.extend(self.record.num_alleles, collapse_missing);
            same_chromosome = reader.next_chromosome() == self.chromosome;
            self.num_loci += 1;
        }

        Ok(!reader.is_eof() && self.num_loci == max_loci && same_chromosome)
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn start_locus(&self) -> u32 {
        self.start_locus
    }

    pub fn end_locus(&self) -> u32 {
        self.end_locus
    }

    pub fn num_loci(&self) -> usize {
        self.num_loci
    }

    pub fn num_samples(&self) -> usize {
        self.space.num_samples()
    }

    /// Size of the current label space
    pub fn num_leaves(&self) -> u32 {
        self.space.num_leaves()
    }

    pub fn left_codes(&self) -> &[u32] {
        self.space.left()
    }

    pub fn right_codes(&self) -> &[u32] {
        self.space.right()
    }

    /// (left, right) codes of one sample
    pub fn codes(&self, sample: SampleIdx) -> (u32, u32) {
        self.space.codes(sample)
    }
}

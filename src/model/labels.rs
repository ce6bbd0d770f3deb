//! # Haplotype Label Space
//!
//! ## Role
//! Assigns every sample's left and right haplotype an integer code that is
//! equal for two samples exactly when their allele sequences are equal.
//!
//! ## Algorithm
//! Codes are mixed-radix numbers: folding in a locus with `n` alleles maps
//! `code -> code * (n + 1) + allele`, where digit `n` is the missing allele. The
//! space size `num_leaves` is the product of `(n_i + 1)` over the folded loci,
//! which outgrows `u32` after a few dozen loci. Whenever it reaches
//! `max_leaves`, [`LabelSpace::compact`] renames the observed codes to
//! `0..k` in first-seen order and keeps the collapsed sentinel as the last
//! label, so the space shrinks to at most `2 * n_samples + 1` leaves.
//!
//! ## Collapsing
//! With collapsing on, any haplotype that has seen a missing allele is pinned
//! to the rightmost leaf (`num_leaves - 1`), so missing data never fans out into
//! distinct codes.

use std::collections::HashMap;

use crate::data::genotype::Genotype;
use crate::data::samples::SampleIdx;

/// Target of a code during compaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Label {
    /// Dense label in first-seen order
    Dense(u32),
    /// The rightmost leaf of the old space; becomes the last dense label
    Collapsed,
}

/// Per-sample left/right codes and the size of the space they live in
#[derive(Clone, Debug)]
pub struct LabelSpace {
    left: Vec<u32>,
    right: Vec<u32>,
    /// Number of leaves; every code is `< num_leaves`
    num_leaves: u32,
    /// Loci folded since the last reset
    depth: usize,
    /// Compaction ceiling
    max_leaves: u32,
    /// Relabeling map, reused across compactions
    labels: HashMap<u32, Label>,
}

impl LabelSpace {
    pub fn new(n_samples: usize, max_leaves: u32) -> Self {
        Self {
            left: vec![0; n_samples],
            right: vec![0; n_samples],
            num_leaves: 1,
            depth: 0,
            max_leaves,
            labels: HashMap::new(),
        }
    }

    /// Start a new haplotype: a single leaf, the empty sequence
    pub fn reset(&mut self) {
        self.num_leaves = 1;
        self.depth = 0;
    }

    pub fn num_samples(&self) -> usize {
        self.left.len()
    }

    pub fn num_leaves(&self) -> u32 {
        self.num_leaves
    }

    /// Loci folded since the last reset
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn left(&self) -> &[u32] {
        &self.left
    }

    pub fn right(&self) -> &[u32] {
        &self.right
    }

    /// (left, right) codes of one sample
    pub fn codes(&self, sample: SampleIdx) -> (u32, u32) {
        (self.left[sample.as_usize()], self.right[sample.as_usize()])
    }

    /// The collapsed/missing sentinel of the current space
    pub fn sentinel(&self) -> u32 {
        self.num_leaves - 1
    }

    /// Fold one locus into every sample's codes
    pub fn extend(&mut self, genotypes: &[Genotype], n_alleles: u8, collapse_missing: bool) {
        debug_assert_eq!(genotypes.len(), self.left.len());
        let radix = n_alleles as u32 + 1;
        let n = n_alleles as u32;

        if self.depth == 0 {
            for ((l, r), &gt) in self.left.iter_mut().zip(self.right.iter_mut()).zip(genotypes) {
                if collapse_missing && gt.has_missing(n_alleles) {
                    *l = n;
                    *r = n;
                } else {
                    *l = gt.left() as u32;
                    *r = gt.right() as u32;
                }
            }
        } else {
            let old_sentinel = self.num_leaves - 1;
            let new_sentinel = self.num_leaves * radix - 1;
            for ((l, r), &gt) in self.left.iter_mut().zip(self.right.iter_mut()).zip(genotypes) {
                if collapse_missing
                    && (*l == old_sentinel || *r == old_sentinel || gt.has_missing(n_alleles))
                {
                    *l = new_sentinel;
                    *r = new_sentinel;
                } else {
                    *l = *l * radix + gt.left() as u32;
                    *r = *r * radix + gt.right() as u32;
                }
            }
        }

        self.num_leaves *= radix;
        self.depth += 1;

        if self.num_leaves >= self.max_leaves {
            self.compact();
        }
    }

    /// Replace the sparse code space with a dense one.
    ///
    /// Codes are renamed in first-seen order (sample 0 left, sample 0 right,
    /// sample 1 left, ...). The old sentinel becomes the largest new label.
    pub fn compact(&mut self) {
        self.labels.clear();
        self.labels.insert(self.num_leaves - 1, Label::Collapsed);

        let mut next_label: u32 = 0;
        for (&l, &r) in self.left.iter().zip(self.right.iter()) {
            for code in [l, r] {
                self.labels.entry(code).or_insert_with(|| {
                    let label = Label::Dense(next_label);
                    next_label += 1;
                    label
                });
            }
        }

        let collapsed = next_label;
        for code in self.left.iter_mut().chain(self.right.iter_mut()) {
            *code = match self.labels[&*code] {
                Label::Dense(label) => label,
                Label::Collapsed => collapsed,
            };
        }

        tracing::debug!(
            old_leaves = self.num_leaves,
            new_leaves = collapsed + 1,
            "compacted haplotype labels"
        );
        self.num_leaves = collapsed + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gts(pairs: &[(u8, u8)]) -> Vec<Genotype> {
        pairs.iter().map(|&(l, r)| Genotype::new(l, r)).collect()
    }

    #[test]
    fn test_first_locus_takes_raw_alleles() {
        let mut space = LabelSpace::new(2, 1 << 25);
        space.extend(&gts(&[(0, 1), (1, 1)]), 2, false);
        assert_eq!(space.left(), &[0, 1]);
        assert_eq!(space.right(), &[1, 1]);
        assert_eq!(space.num_leaves(), 3);
        assert_eq!(space.depth(), 1);
    }

    #[test]
    fn test_mixed_radix_codes() {
        let mut space = LabelSpace::new(1, 1 << 25);
        // bases 3, 4, 3
        space.extend(&gts(&[(1, 0)]), 2, false);
        space.extend(&gts(&[(2, 3)]), 3, false);
        space.extend(&gts(&[(0, 1)]), 2, false);
        assert_eq!(space.codes(SampleIdx::new(0)), ((1 * 4 + 2) * 3, (0 * 4 + 3) * 3 + 1));
        assert_eq!(space.num_leaves(), 36);
    }

    #[test]
    fn test_collapse_first_locus_pins_both_sides() {
        let mut space = LabelSpace::new(2, 1 << 25);
        space.extend(&gts(&[(0, 1), (2, 2)]), 2, true);
        assert_eq!(space.codes(SampleIdx::new(0)), (0, 1));
        assert_eq!(space.codes(SampleIdx::new(1)), (2, 2));

        let mut space = LabelSpace::new(1, 1 << 25);
        space.extend(&gts(&[(0, 2)]), 2, true);
        assert_eq!(space.codes(SampleIdx::new(0)), (2, 2));
    }

    #[test]
    fn test_collapsed_stays_on_rightmost_leaf() {
        let mut space = LabelSpace::new(2, 1 << 25);
        space.extend(&gts(&[(2, 2), (0, 0)]), 2, true);
        space.extend(&gts(&[(0, 1), (1, 2)]), 2, true);
        assert_eq!(space.num_leaves(), 9);
        // Already collapsed, and newly missing, both land on the sentinel
        assert_eq!(space.codes(SampleIdx::new(0)), (8, 8));
        assert_eq!(space.codes(SampleIdx::new(1)), (8, 8));
        assert_eq!(space.sentinel(), 8);
    }

    #[test]
    fn test_compact_first_seen_order() {
        let mut space = LabelSpace::new(3, 1 << 25);
        space.extend(&gts(&[(1, 0), (0, 1), (1, 1)]), 2, true);
        space.extend(&gts(&[(1, 1), (2, 0), (1, 1)]), 2, true);
        // codes: s0 (4, 1), s1 (8, 8), s2 (4, 4), sentinel 8
        space.compact();
        assert_eq!(space.left(), &[0, 2, 0]);
        assert_eq!(space.right(), &[1, 2, 0]);
        assert_eq!(space.num_leaves(), 3);
        assert_eq!(space.sentinel(), 2);
    }

    #[test]
    fn test_compact_without_collapsed_samples_reserves_sentinel() {
        let mut space = LabelSpace::new(2, 1 << 25);
        space.extend(&gts(&[(0, 1), (1, 0)]), 2, true);
        space.compact();
        assert_eq!(space.left(), &[0, 1]);
        assert_eq!(space.right(), &[1, 0]);
        assert_eq!(space.num_leaves(), 3);
    }

    #[test]
    fn test_ceiling_triggers_compaction() {
        let mut space = LabelSpace::new(2, 27);
        let het = gts(&[(0, 1), (0, 0)]);
        space.extend(&het, 2, false);
        space.extend(&het, 2, false);
        assert_eq!(space.num_leaves(), 9);
        space.extend(&het, 2, false);
        // 27 leaves reached the ceiling; two distinct codes plus the sentinel remain
        assert_eq!(space.num_leaves(), 3);
        assert_eq!(space.left(), &[0, 0]);
        assert_eq!(space.right(), &[1, 0]);
    }

    #[test]
    fn test_single_leaf_after_compaction_is_not_a_first_locus() {
        let mut space = LabelSpace::new(2, 2);
        space.extend(&[Genotype::missing(2), Genotype::missing(2)], 2, true);
        // Every sample collapsed, so compaction leaves only the sentinel
        assert_eq!(space.num_leaves(), 1);
        assert_eq!(space.depth(), 1);

        space.extend(&gts(&[(0, 1), (1, 0)]), 2, true);
        let sentinel = space.sentinel();
        assert_eq!(space.codes(SampleIdx::new(0)), (sentinel, sentinel));
        assert_eq!(space.codes(SampleIdx::new(1)), (sentinel, sentinel));
        assert_eq!(space.depth(), 2);
    }

    #[test]
    fn test_reset_keeps_codes_but_restarts_space() {
        let mut space = LabelSpace::new(1, 1 << 25);
        space.extend(&gts(&[(1, 1)]), 2, false);
        space.extend(&gts(&[(1, 1)]), 2, false);
        space.reset();
        assert_eq!(space.num_leaves(), 1);
        assert_eq!(space.depth(), 0);
        space.extend(&gts(&[(0, 1)]), 2, false);
        assert_eq!(space.codes(SampleIdx::new(0)), (0, 1));
    }
}

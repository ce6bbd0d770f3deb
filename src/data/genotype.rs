//! # Packed Genotypes
//!
//! A sample's genotype at one locus packed into a single byte: the high nibble
//! holds the left allele index, the low nibble the right one. For a locus with
//! `n` alleles the indices run `0..n` and the value `n` itself marks a missing
//! allele, so at most 15 alleles fit.

/// Largest allele count representable with 4-bit packing
pub const MAX_ALLELES: u8 = 15;

/// Two allele indices in one byte
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Genotype(u8);

impl Genotype {
    /// Pack a left/right allele pair. Both must be `<= 15`.
    #[inline]
    pub fn new(left: u8, right: u8) -> Self {
        debug_assert!(left <= MAX_ALLELES && right <= MAX_ALLELES);
        Self((left << 4) | (right & 0x0F))
    }

    /// Both alleles missing at a locus with `n_alleles` alleles
    #[inline]
    pub fn missing(n_alleles: u8) -> Self {
        Self::new(n_alleles, n_alleles)
    }

    #[inline]
    pub fn left(self) -> u8 {
        self.0 >> 4
    }

    #[inline]
    pub fn right(self) -> u8 {
        self.0 & 0x0F
    }

    /// True if either allele is the missing index for this locus
    #[inline]
    pub fn has_missing(self, n_alleles: u8) -> bool {
        self.left() == n_alleles || self.right() == n_alleles
    }

    #[inline]
    pub fn with_right(self, right: u8) -> Self {
        Self((self.0 & 0xF0) | (right & 0x0F))
    }
}

/// Decode a VCF genotype field (`0|1`, `1/0`, `./.`, `0|1:35:...`) into a packed
/// genotype for a locus with `n_alleles` alleles.
///
/// Anything that is not a digit in an allele position reads as missing, as does
/// an index outside `0..n_alleles`. Only the first two alleles are read.
#[inline]
pub fn parse_genotype(field: &[u8], n_alleles: u8) -> Genotype {
    let mut out_of_range = 0;
    parse_genotype_counted(field, n_alleles, &mut out_of_range)
}

/// [`parse_genotype`], adding the number of out-of-range allele indices to
/// `out_of_range`
#[inline]
pub fn parse_genotype_counted(field: &[u8], n_alleles: u8, out_of_range: &mut usize) -> Genotype {
    let mut genotype = Genotype::missing(n_alleles);

    let (left, next) = parse_allele(field, 0);
    if let Some(left) = left {
        genotype = Genotype::new(clamp_allele(left, n_alleles, out_of_range), n_alleles);
    }

    if let Some(&sep) = field.get(next) {
        if sep == b'|' || sep == b'/' {
            let (right, _) = parse_allele(field, next + 1);
            if let Some(right) = right {
                genotype = genotype.with_right(clamp_allele(right, n_alleles, out_of_range));
            }
        }
    }

    genotype
}

/// Parse leading digits at `start`. Returns the value (if any digit was present)
/// and the index just past the allele token.
#[inline]
fn parse_allele(field: &[u8], start: usize) -> (Option<u32>, usize) {
    let mut i = start;
    let mut value: u32 = 0;
    while let Some(&b) = field.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add((b - b'0') as u32);
        i += 1;
    }
    if i == start {
        // Missing marker is a single character
        (None, start + 1)
    } else {
        (Some(value), i)
    }
}

#[inline]
fn clamp_allele(allele: u32, n_alleles: u8, out_of_range: &mut usize) -> u8 {
    if allele < n_alleles as u32 {
        allele as u8
    } else {
        *out_of_range += 1;
        n_alleles
    }
}

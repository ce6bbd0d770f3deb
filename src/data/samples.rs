//! # Samples
//!
//! Sample names taken from the VCF column header, and the index used to
//! address a sample's pair of haplotype codes.

/// Position of a sample among the header's genotype columns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SampleIdx(pub u32);

impl SampleIdx {
    pub fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Sample names in genotype column order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Samples {
    names: Vec<String>,
}

impl Samples {
    /// Collect the names of the columns following FORMAT
    pub fn from_header_fields<'a>(fields: impl Iterator<Item = &'a str>) -> Self {
        Self {
            names: fields.map(str::to_owned).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_fields() {
        let samples = Samples::from_header_fields("NA12878\tNA12891".split('\t'));
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.names(), ["NA12878", "NA12891"]);
    }

    #[test]
    fn test_header_without_samples() {
        let samples = Samples::from_header_fields(std::iter::empty());
        assert!(samples.is_empty());
        assert_eq!(samples, Samples::default());
    }
}

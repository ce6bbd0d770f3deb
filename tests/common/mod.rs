//! Synthetic VCF fixtures shared by the integration tests.

#![allow(dead_code)]

use std::io::Write;

use flate2::write::GzEncoder;
use noodles::bgzf;
use tempfile::NamedTempFile;

/// Allele value written as `.`
pub const MISSING: u8 = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container {
    Bgzf,
    Gzip,
    Plain,
}

pub struct SyntheticVcfBuilder {
    n_samples: usize,
    /// (chromosome, position) per locus
    loci: Vec<(String, u32)>,
    container: Container,
    /// (locus_idx, hap_idx) -> allele
    allele_generator: Box<dyn Fn(usize, usize) -> u8>,
    /// locus_idx -> allele count including REF
    allele_counts: Box<dyn Fn(usize) -> u8>,
    header: bool,
}

impl SyntheticVcfBuilder {
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            loci: Vec::new(),
            container: Container::Bgzf,
            allele_generator: Box::new(|_, _| 0),
            allele_counts: Box::new(|_| 2),
            header: true,
        }
    }

    /// Append `n` loci on `chrom` at positions `first, first + step, ...`
    pub fn chromosome(mut self, chrom: &str, n: usize, first: u32, step: u32) -> Self {
        for i in 0..n {
            self.loci.push((chrom.to_string(), first + i as u32 * step));
        }
        self
    }

    pub fn allele_generator(mut self, generator: impl Fn(usize, usize) -> u8 + 'static) -> Self {
        self.allele_generator = Box::new(generator);
        self
    }

    pub fn allele_counts(mut self, counts: impl Fn(usize) -> u8 + 'static) -> Self {
        self.allele_counts = Box::new(counts);
        self
    }

    pub fn container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    /// Leave out the `#CHROM` line
    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    pub fn text(&self) -> String {
        let mut text = String::new();
        text.push_str("##fileformat=VCFv4.2\n");
        text.push_str("##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n");
        if self.header {
            text.push_str("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT");
            for s in 0..self.n_samples {
                text.push_str(&format!("\tSample{}", s));
            }
            text.push('\n');
        }

        const ALTS: [&str; 4] = ["C", "G", "T", "N"];
        for (m, (chrom, pos)) in self.loci.iter().enumerate() {
            let n_alleles = (self.allele_counts)(m) as usize;
            let alt = ALTS[..n_alleles - 1].join(",");
            text.push_str(&format!("{}\t{}\trs{}\tA\t{}\t.\tPASS\t.\tGT", chrom, pos, m, alt));
            for s in 0..self.n_samples {
                let gt: Vec<String> = (0..2)
                    .map(|p| match (self.allele_generator)(m, 2 * s + p) {
                        MISSING => ".".to_string(),
                        a => a.to_string(),
                    })
                    .collect();
                text.push('\t');
                text.push_str(&gt.join("|"));
            }
            text.push('\n');
        }
        text
    }

    pub fn build(self) -> NamedTempFile {
        let text = self.text();
        let bytes = match self.container {
            Container::Bgzf => {
                let mut writer = bgzf::Writer::new(Vec::new());
                writer.write_all(text.as_bytes()).unwrap();
                writer.finish().unwrap()
            }
            Container::Gzip => {
                let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
                enc.write_all(text.as_bytes()).unwrap();
                enc.finish().unwrap()
            }
            Container::Plain => text.into_bytes(),
        };

        let mut file = tempfile::Builder::new()
            .suffix(".vcf.gz")
            .tempfile()
            .expect("Create temp file");
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();
        file
    }
}

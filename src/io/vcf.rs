//! # Streaming VCF Genotype Reader
//!
//! Reads a VCF line stream one record at a time, keeping the *next* record
//! parsed in a lookahead slot. Callers can therefore ask which chromosome the
//! following record is on before consuming it, which is how haplotypes and
//! windows detect chromosome boundaries.
//!
//! Only CHROM, POS, ALT and the sample columns are read. ALT determines the
//! allele count (`2 + commas`), and each sample column is packed into one
//! [`Genotype`](crate::data::Genotype) byte.

use std::io::BufRead;
use std::path::Path;

use tracing::info_span;

use crate::config::ReaderParams;
use crate::data::genotype::{parse_genotype_counted, MAX_ALLELES};
use crate::data::record::GenotypeRecord;
use crate::data::samples::Samples;
use crate::error::{HaploError, Result};
use crate::io::source::open_input;

/// Fixed columns before the first sample (CHROM .. FORMAT)
const FIXED_COLUMNS: usize = 9;

/// Column holding the ALT allele list
const ALT_COLUMN: usize = 4;

/// VCF reader with a one-record lookahead
pub struct GenotypeReader {
    /// Decoded line stream
    reader: Box<dyn BufRead + Send>,
    /// Sample names from the column header
    samples: Samples,
    /// The primed record returned by the next `next_record` call
    next: GenotypeRecord,
    /// Set once no further record can be primed
    eof: bool,
    /// Raw bytes of the current line
    line_buf: Vec<u8>,
    /// 1-based line number of the last line read
    line_num: usize,
}

impl GenotypeReader {
    /// Open a gzip/BGZF compressed VCF file
    pub fn open(path: &Path, params: &ReaderParams) -> Result<Self> {
        let reader = open_input(path)?;
        Self::from_reader(reader, params)
    }

    /// Create from an already decoded line stream
    pub fn from_reader(mut reader: Box<dyn BufRead + Send>, params: &ReaderParams) -> Result<Self> {
        let mut line_buf = Vec::new();
        let (samples, line_num) = info_span!("vcf_header").in_scope(|| {
            read_header(&mut reader, &mut line_buf, params.max_header_lines)
        })?;

        tracing::debug!(
            n_samples = samples.len(),
            first_sample = samples.names().first().map(String::as_str),
            "parsed VCF header"
        );

        let n_samples = samples.len();
        let mut parser = Self {
            reader,
            samples,
            next: GenotypeRecord::with_samples(n_samples),
            eof: false,
            line_buf,
            line_num,
        };
        parser.prime()?;
        Ok(parser)
    }

    /// Sample information
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// True once every record has been handed out
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Chromosome of the record the next call to `next_record` will return.
    /// After end of stream this still holds the last record's chromosome.
    pub fn next_chromosome(&self) -> &str {
        &self.next.chromosome
    }

    pub fn next_position(&self) -> u32 {
        self.next.position
    }

    pub fn next_num_alleles(&self) -> u8 {
        self.next.num_alleles
    }

    /// Move the primed record into `out` and prime the following one.
    ///
    /// The genotype vectors of `out` and the lookahead are exchanged rather than
    /// copied, so `out.genotypes` must not be relied on after the call other
    /// than as the new record's genotypes. Returns `Ok(false)` without touching
    /// `out` once the stream is exhausted.
    pub fn next_record(&mut self, out: &mut GenotypeRecord) -> Result<bool> {
        if self.eof {
            return Ok(false);
        }

        out.chromosome.clone_from(&self.next.chromosome);
        out.position = self.next.position;
        out.num_alleles = self.next.num_alleles;
        std::mem::swap(&mut out.genotypes, &mut self.next.genotypes);

        self.prime()?;
        Ok(true)
    }

    /// Read and parse the next line into the lookahead slot
    fn prime(&mut self) -> Result<()> {
        self.line_buf.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.line_buf)?;
        if bytes_read == 0 {
            self.eof = true;
            return Ok(());
        }
        self.line_num += 1;

        let line = trim_line_end(&self.line_buf);
        if line.is_empty() {
            self.eof = true;
            return Ok(());
        }

        let out_of_range = parse_record(line, self.line_num, self.samples.len(), &mut self.next)?;
        if out_of_range > 0 {
            tracing::warn!(
                line = self.line_num,
                alleles = out_of_range,
                "allele index out of range; treating as missing"
            );
        }
        Ok(())
    }
}

/// Parse one data line into `record`, reusing its buffers. Returns the number
/// of allele indices beyond the allele count.
fn parse_record(
    line: &[u8],
    line_num: usize,
    n_samples: usize,
    record: &mut GenotypeRecord,
) -> Result<usize> {
    let n_fields = line.split(|&b| b == b'\t').count();
    if n_fields < FIXED_COLUMNS {
        return Err(HaploError::TruncatedRecord {
            line: line_num,
            fields: n_fields,
        });
    }
    if n_fields - FIXED_COLUMNS != n_samples {
        return Err(HaploError::SampleCountMismatch {
            line: line_num,
            expected: n_samples,
            found: n_fields - FIXED_COLUMNS,
        });
    }

    record.genotypes.clear();
    let mut num_alleles: u8 = 2;
    let mut out_of_range = 0;

    for (i, field) in line.split(|&b| b == b'\t').enumerate() {
        match i {
            0 => {
                let chrom = std::str::from_utf8(field)
                    .map_err(|_| HaploError::parse(line_num, "CHROM is not valid UTF-8"))?;
                record.chromosome.clear();
                record.chromosome.push_str(chrom);
            }
            1 => {
                record.position = parse_position(field)
                    .ok_or_else(|| HaploError::parse(line_num, "Invalid POS field"))?;
            }
            ALT_COLUMN => {
                let alleles = 2 + field.iter().filter(|&&b| b == b',').count();
                if alleles > MAX_ALLELES as usize {
                    return Err(HaploError::TooManyAlleles {
                        line: line_num,
                        alleles,
                    });
                }
                num_alleles = alleles as u8;
            }
            i if i >= FIXED_COLUMNS => {
                record.genotypes.push(parse_genotype_counted(field, num_alleles, &mut out_of_range));
            }
            _ => {}
        }
    }

    record.num_alleles = num_alleles;
    Ok(out_of_range)
}

/// Skip meta lines up to the `#CHROM` column header and collect sample names.
/// Returns the samples and the number of lines consumed.
fn read_header(
    reader: &mut Box<dyn BufRead + Send>,
    line_buf: &mut Vec<u8>,
    max_lines: usize,
) -> Result<(Samples, usize)> {
    let mut lines = 0usize;
    while lines < max_lines {
        line_buf.clear();
        if reader.read_until(b'\n', line_buf)? == 0 {
            break;
        }
        lines += 1;

        let line = trim_line_end(line_buf);
        if line.starts_with(b"#C") {
            let header = std::str::from_utf8(line)
                .map_err(|_| HaploError::parse(lines, "Column header is not valid UTF-8"))?;
            let samples = Samples::from_header_fields(header.split('\t').skip(FIXED_COLUMNS));
            return Ok((samples, lines));
        }
    }

    Err(HaploError::MalformedHeader {
        lines_scanned: lines,
    })
}

/// Strip a trailing `\n` or `\r\n`
#[inline]
fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[inline]
fn parse_position(field: &[u8]) -> Option<u32> {
    if field.is_empty() {
        return None;
    }
    let mut value: u32 = 0;
    for &b in field {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add((b - b'0') as u32)?;
    }
    Some(value)
}

//! # Sliding Window Assembly
//!
//! ## Role
//! Groups consecutive haplotypes into overlapping windows of `W` haplotypes,
//! advancing `O` haplotypes per window. Windows never cross a chromosome
//! boundary: the last window of a chromosome may hold fewer than `W`
//! haplotypes, and the first window of the next chromosome starts empty.
//!
//! ## Carry-over
//! Haplotypes are encoded once. After a full window, the last `W - O`
//! haplotypes are carried into the next window, so only `O` new haplotypes
//! are pulled per window. A haplotype that opens a later window has its start
//! locus parked in a [`StartRing`] until that window is finalized.
//!
//! A window whose construction begins after the stream is exhausted is
//! dropped, even if it inherited carried haplotypes.

use std::path::Path;

use tracing::info_span;

use crate::config::{EncoderParams, ReaderParams, WindowParams};
use crate::data::window::Window;
use crate::error::{HaploError, Result};
use crate::io::vcf::GenotypeReader;
use crate::model::encoder::HaplotypeEncoder;
use crate::utils::start_ring::StartRing;

/// Streaming window assembler over one genotype stream
pub struct SlidingWindows {
    reader: GenotypeReader,
    encoder: HaplotypeEncoder,
    params: WindowParams,
    starts: StartRing,
    /// Window under construction; carries the overlap of the previous one
    current: Window,
    /// Set after an error; the iterator is fused from then on
    done: bool,
}

impl SlidingWindows {
    pub fn new(reader: GenotypeReader, encoder: HaplotypeEncoder, params: WindowParams) -> Result<Self> {
        params.validate()?;
        if encoder.num_samples() != reader.num_samples() {
            return Err(HaploError::config(format!(
                "encoder sized for {} samples, stream has {}",
                encoder.num_samples(),
                reader.num_samples()
            )));
        }
        Ok(Self {
            starts: StartRing::new(params.start_slots()),
            reader,
            encoder,
            params,
            current: Window::default(),
            done: false,
        })
    }

    /// Open a compressed VCF and set up reader and encoder for it
    pub fn open(
        path: &Path,
        reader_params: &ReaderParams,
        encoder_params: &EncoderParams,
        params: WindowParams,
    ) -> Result<Self> {
        let reader = GenotypeReader::open(path, reader_params)?;
        let encoder = HaplotypeEncoder::for_reader(&reader, encoder_params);
        Self::new(reader, encoder, params)
    }

    pub fn params(&self) -> &WindowParams {
        &self.params
    }

    pub fn reader(&self) -> &GenotypeReader {
        &self.reader
    }

    pub fn encoder(&self) -> &HaplotypeEncoder {
        &self.encoder
    }

    /// Give back the reader and encoder
    pub fn into_parts(self) -> (GenotypeReader, HaplotypeEncoder) {
        (self.reader, self.encoder)
    }

    /// Assemble the next window, or `None` once the stream is exhausted
    pub fn next_window(&mut self) -> Result<Option<Window>> {
        if self.reader.is_eof() {
            return Ok(None);
        }

        let hap_size = self.params.hap_size;
        let window_size = self.params.window_size;
        let offset = self.params.offset_size;

        let mut window = std::mem::take(&mut self.current);
        window.chromosome.clear();
        window.chromosome.push_str(self.reader.next_chromosome());

        let mut carried = window.num_loci / hap_size;
        let mut same_chromosome = true;

        info_span!("assemble_window", index = window.index, carried).in_scope(|| -> Result<()> {
            while carried < window_size && same_chromosome {
                same_chromosome = self.encoder.next_haplotype(&mut self.reader, hap_size, true)?;
                if carried % offset == 0 {
                    self.starts.record_start(
                        window.index_on_chromosome + carried / offset,
                        self.encoder.start_locus(),
                    );
                }
                window.num_loci += self.encoder.num_loci();
                carried += 1;
            }
            Ok(())
        })?;

        window.start_locus = self
            .starts
            .take_start(window.index_on_chromosome)
            .ok_or_else(|| {
                HaploError::algorithm(format!(
                    "no start locus recorded for window {} on {}",
                    window.index_on_chromosome, window.chromosome
                ))
            })?;
        window.end_locus = self.encoder.end_locus();

        if !same_chromosome {
            self.starts.clear();
        }
        self.current = window.successor(same_chromosome, self.params.step_loci());

        tracing::debug!(
            index = window.index,
            chromosome = %window.chromosome,
            start = window.start_locus,
            end = window.end_locus,
            num_loci = window.num_loci,
            "window assembled"
        );
        Ok(Some(window))
    }

    /// Drain the stream into a vector of windows
    pub fn collect_windows(mut self) -> Result<Vec<Window>> {
        let mut windows = Vec::new();
        while let Some(window) = self.next_window()? {
            windows.push(window);
        }
        Ok(windows)
    }
}

impl Iterator for SlidingWindows {
    type Item = Result<Window>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_window() {
            Ok(Some(window)) => Some(Ok(window)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

//! # Haplowin: Haplotype Windows over VCF Files
//!
//! ## Usage
//! ```bash
//! # Windows of 10 haplotypes of 100 loci, advancing one haplotype at a time
//! haplowin input.vcf.gz
//!
//! # Several files in parallel, JSON lines
//! haplowin --format json --nthreads 4 chr1.vcf.gz chr2.vcf.gz
//!
//! # With profiling output
//! haplowin input.vcf.gz --profile
//! ```

use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;

use haplowin::config::{Config, OutputFormat};
use haplowin::utils::threading::build_thread_pool;
use haplowin::{SlidingWindows, Window};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber for hierarchical profiling output
fn init_profiling() {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_timer(fmt::time::uptime()),
        )
        .init();
}

/// Plain stderr logging, filtered by `RUST_LOG` (default `warn`)
fn init_logging() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Run one pipeline over one file
fn windows_for(path: &Path, config: &Config) -> Result<Vec<Window>> {
    let pipeline = SlidingWindows::open(
        path,
        &config.reader_params()?,
        &config.encoder_params()?,
        config.window_params()?,
    )
    .with_context(|| format!("opening {}", path.display()))?;

    let samples = pipeline.reader().samples();
    tracing::info!(
        path = %path.display(),
        n_samples = samples.len(),
        first_sample = samples.names().first().map(String::as_str),
        "opened input"
    );

    pipeline
        .collect_windows()
        .with_context(|| format!("assembling windows for {}", path.display()))
}

fn write_windows<W: Write>(out: &mut W, format: OutputFormat, windows: &[Window]) -> Result<()> {
    for window in windows {
        match format {
            OutputFormat::Tsv => window.write_tsv(out)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, window)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn run() -> Result<()> {
    let start = Instant::now();

    let config = Config::parse_and_validate()?;

    if config.profile {
        init_profiling();
        eprintln!("=== Profiling enabled ===\n");
    } else {
        init_logging();
    }

    let n_threads = config.nthreads();
    let pool = build_thread_pool(n_threads)?;

    eprintln!("Haplowin v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Threads: {}", n_threads);
    eprintln!(
        "Haplotype: {} loci, window: {} haplotypes, offset: {}",
        config.hap_size, config.window_size, config.offset_size
    );

    // One independent pipeline per file; output keeps input order
    let results: Vec<Result<Vec<Window>>> = pool.install(|| {
        config
            .inputs
            .par_iter()
            .map(|path| windows_for(path, &config))
            .collect()
    });

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if config.format == OutputFormat::Tsv {
        writeln!(out, "{}", Window::TSV_HEADER)?;
    }

    let mut n_windows = 0;
    for (path, result) in config.inputs.iter().zip(results) {
        let windows = result?;
        tracing::info!(path = %path.display(), windows = windows.len(), "file done");
        n_windows += windows.len();
        write_windows(&mut out, config.format, &windows)?;
    }
    out.flush()?;

    eprintln!(
        "\n{} windows from {} file(s) in {:.2}s",
        n_windows,
        config.inputs.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use haplowin::{config, data, error, io, model, pipelines, utils};

    #[test]
    fn test_module_imports() {
        // Verify all modules are accessible
        let _ = config::Config::parse_and_validate;
        let _ = error::HaploError::config("test");
        let _ = data::SampleIdx::new;
        let _ = io::vcf::GenotypeReader::open;
        let _ = model::LabelSpace::new;
        let _ = pipelines::SlidingWindows::new;
        let _ = utils::StartRing::new;
    }

    #[test]
    fn test_write_windows_formats() {
        let window = Window {
            chromosome: "chr1".to_string(),
            start_locus: 10,
            end_locus: 20,
            num_loci: 3,
            ..Window::default()
        };

        let mut tsv = Vec::new();
        write_windows(&mut tsv, OutputFormat::Tsv, std::slice::from_ref(&window)).unwrap();
        assert_eq!(String::from_utf8(tsv).unwrap(), "1\t1\tchr1\t10\t20\t3\n");

        let mut json = Vec::new();
        write_windows(&mut json, OutputFormat::Json, std::slice::from_ref(&window)).unwrap();
        let parsed: Window = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, window);
    }
}

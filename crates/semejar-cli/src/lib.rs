//! Command-line front end for the semejar similarity engine.
//!
//! Reads a catalog JSON array, builds the similarity index, runs the full
//! pairwise pass, and writes one JSON result line per source entry.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use semejar::catalog::CatalogEntry;
use semejar::engine::{EngineConfig, SimilarityEngine};
use semejar::sink::{SimilarityResult, SimilaritySink};
use semejar::{Result as SemejarResult, SemejarError};

/// semejar - batch "similar entries" computation over a catalog dump
#[derive(Parser, Debug)]
#[command(name = "semejar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog dump: a JSON array of entries
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file, one JSON result per line
    #[arg(short, long, value_name = "FILE", default_value = "similar.jsonl")]
    pub output: PathBuf,

    /// Catalog language for titles, descriptions, and tag names
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Matches kept per entry
    #[arg(long, default_value_t = 20)]
    pub top_k: usize,

    /// Worker threads (0 = one per core)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Recompute only these entry ids, leaving other stored results intact
    #[arg(long, value_name = "ID")]
    pub only: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Sink appending one JSON line per result to a file.
///
/// `clear_all` truncates the file in place, so a full run starts from an
/// empty output while an `--only` run appends to the existing one.
pub struct JsonLinesSink {
    file: Mutex<File>,
}

impl JsonLinesSink {
    /// Open (or create) the output file for appending.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening output file {}", path.display()))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl SimilaritySink for JsonLinesSink {
    fn clear_all(&self) -> SemejarResult<()> {
        let mut file = self.file.lock().map_err(SemejarError::sink)?;
        file.set_len(0).map_err(SemejarError::Io)?;
        file.seek(SeekFrom::Start(0)).map_err(SemejarError::Io)?;
        Ok(())
    }

    fn store(&self, result: &SimilarityResult) -> SemejarResult<()> {
        let mut line = serde_json::to_string(result).map_err(SemejarError::sink)?;
        line.push('\n');
        let mut file = self.file.lock().map_err(SemejarError::sink)?;
        file.write_all(line.as_bytes()).map_err(SemejarError::Io)?;
        Ok(())
    }
}

/// Load the catalog dump from disk.
pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<CatalogEntry>> {
    let file = File::open(path).with_context(|| format!("opening catalog {}", path.display()))?;
    let catalog: Vec<CatalogEntry> = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    Ok(catalog)
}

/// Run the full pipeline for a parsed command line.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let catalog = load_catalog(&cli.input)?;
    info!(entries = catalog.len(), "catalog loaded");

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} ({eta})")
            .expect("progress template is valid"),
    );
    let progress = bar.clone();

    let mut config = EngineConfig::new()
        .with_language(&cli.language)
        .with_top_k(cli.top_k)
        .with_threads(cli.threads)
        .with_progress(Arc::new(move |done, total| {
            progress.set_length(total as u64);
            progress.set_position(done as u64);
        }));
    if !cli.only.is_empty() {
        config = config.with_only_ids(cli.only.iter().cloned());
    }

    let engine = SimilarityEngine::new(config);
    let index = engine
        .build_index(catalog)
        .context("building similarity index")?;
    info!(indexed = index.len(), "similarity index built");

    let sink = JsonLinesSink::open(&cli.output)?;
    engine
        .run(&index, &sink)
        .context("running similarity pass")?;
    bar.finish_and_clear();

    info!(output = %cli.output.display(), "results written");
    Ok(())
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use kmer_table::{IndexConfig, KmerIndex, QueryOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Index a DNA sequence by non-overlapping k-mers and look up query k-mers.
#[derive(Parser, Debug)]
#[command(name = "kmer-table", version, about)]
struct Cli {
    /// Window (k-mer) length
    #[arg(short, long = "kmer-len", default_value_t = 4)]
    k: usize,

    /// Table capacity; defaults to 4^k
    #[arg(long)]
    capacity: Option<usize>,

    /// Sequence to index
    #[arg(short, long, conflicts_with = "sequence_file")]
    sequence: Option<String>,

    /// File holding the sequence to index (whitespace is ignored)
    #[arg(long)]
    sequence_file: Option<PathBuf>,

    /// Query sequence; may be repeated
    #[arg(short, long)]
    query: Vec<String>,

    /// File holding a query sequence; may be repeated
    #[arg(long)]
    query_file: Vec<PathBuf>,

    /// Print every slot of the table after indexing
    #[arg(long)]
    dump: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_sequence(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read sequence from {}", path.display()))?;
    Ok(text.split_whitespace().collect())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let sequence = match (&cli.sequence, &cli.sequence_file) {
        (Some(seq), _) => seq.trim().to_owned(),
        (None, Some(path)) => read_sequence(path)?,
        (None, None) => bail!("either --sequence or --sequence-file is required"),
    };

    let mut config = IndexConfig::new(cli.k);
    if let Some(capacity) = cli.capacity {
        config = config.with_capacity(capacity);
    }
    let mut index = KmerIndex::new(config).context("failed to create k-mer table")?;

    let windows = index
        .insert_sequence(sequence.as_bytes())
        .context("failed to index sequence")?;
    info!(
        k = index.k(),
        windows,
        capacity = index.table().capacity(),
        "built k-mer table"
    );

    if cli.dump {
        print!("{}", index.table());
    }

    let mut queries: Vec<String> = cli.query.iter().map(|q| q.trim().to_owned()).collect();
    for path in &cli.query_file {
        queries.push(read_sequence(path)?);
    }

    let mut malformed = 0usize;
    for query in &queries {
        for hit in index.query(query.as_bytes())? {
            if matches!(hit.outcome, QueryOutcome::Malformed(_)) {
                malformed += 1;
                eprintln!("{}", hit.window);
                eprintln!("{}", hit.outcome);
            } else {
                println!("{}", hit.window);
                println!("{}", hit.outcome);
            }
        }
    }
    if malformed > 0 {
        bail!("{malformed} query window(s) contained symbols outside A, T, G, C");
    }

    Ok(())
}

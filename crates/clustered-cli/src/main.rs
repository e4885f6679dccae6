use clap::Parser;
use clustered_core::{try_group_values_by, ClusterError, ClusterSettings, ClusterStats, GroupingExt};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clustered")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
#[command(about = "Group delimited records that are clustered by key", long_about = None)]
struct Cli {
    /// Input file. Reads stdin when omitted.
    input: Option<PathBuf>,

    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Zero-based index of the field holding the key.
    #[arg(short, long, default_value_t = 0)]
    key_field: usize,

    /// Group the whole input eagerly, merging non-adjacent keys.
    #[arg(long)]
    eager: bool,

    #[arg(long)]
    json: bool,

    /// Print grouping counters as JSON to stderr when done.
    #[arg(long)]
    stats: bool,

    /// JSON file with cluster settings.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long)]
    max_cluster_len: Option<usize>,

    #[arg(long)]
    initial_capacity: Option<usize>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("line {line}: no field {field} in {record:?}")]
    MissingField {
        line: usize,
        field: usize,
        record: String,
    },

    #[error("invalid settings file {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A line of input with its 1-based line number.
type Record = (usize, String);

#[derive(Serialize)]
struct GroupOutput<'a> {
    key: &'a str,
    records: Vec<&'a str>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(&cli) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let settings = load_settings(cli)?;
    tracing::debug!(?settings, eager = cli.eager, "grouping settings");

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let records = reader
        .lines()
        .enumerate()
        .map(|(index, line)| line.map(|text| (index + 1, text)).map_err(CliError::from));
    let key_of = |record: &Record| record_key(record, cli.delimiter, cli.key_field);

    let mut out = BufWriter::new(io::stdout().lock());

    if cli.eager {
        if cli.stats {
            tracing::warn!("--stats only applies to streaming grouping");
        }
        let groups = try_group_values_by(records, |record| {
            let record = record?;
            let key = key_of(&record)?;
            Ok::<_, CliError>((key, record))
        })?;
        tracing::info!(groups = groups.len(), "eager grouping finished");

        for (key, rows) in &groups {
            write_group(&mut out, key, rows, cli.json)?;
        }
    } else {
        let mut groups = records.try_group_clustered_by_with(key_of, &settings);
        for group in groups.by_ref() {
            let (key, rows) = group?;
            write_group(&mut out, &key, &rows, cli.json)?;
        }

        let stats = groups.stats();
        tracing::info!(
            groups = stats.groups_emitted,
            items = stats.items_pulled,
            largest = stats.largest_cluster,
            "clustered grouping finished"
        );
        if cli.stats {
            write_stats(&stats)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<ClusterSettings, CliError> {
    let mut settings = match &cli.settings {
        Some(path) => {
            let file = File::open(path)?;
            serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Settings {
                path: path.clone(),
                source,
            })?
        }
        None => ClusterSettings::default(),
    };

    if let Some(capacity) = cli.initial_capacity {
        settings.initial_capacity = capacity;
    }
    if let Some(limit) = cli.max_cluster_len {
        settings.max_cluster_len = Some(limit);
    }

    settings.validate()?;
    Ok(settings)
}

fn record_key(record: &Record, delimiter: char, field: usize) -> Result<String, CliError> {
    let (line, text) = record;
    text.split(delimiter)
        .nth(field)
        .map(str::to_string)
        .ok_or_else(|| CliError::MissingField {
            line: *line,
            field,
            record: text.clone(),
        })
}

fn write_group(
    out: &mut impl Write,
    key: &str,
    rows: &[Record],
    json: bool,
) -> Result<(), CliError> {
    if json {
        let group = GroupOutput {
            key,
            records: rows.iter().map(|(_, text)| text.as_str()).collect(),
        };
        serde_json::to_writer(&mut *out, &group)?;
        writeln!(out)?;
    } else {
        let joined = rows
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join("|");
        writeln!(out, "{}\t{}\t{}", key, rows.len(), joined)?;
    }
    Ok(())
}

fn write_stats(stats: &ClusterStats) -> Result<(), CliError> {
    let mut err = io::stderr().lock();
    serde_json::to_writer(&mut err, stats)?;
    writeln!(err)?;
    Ok(())
}

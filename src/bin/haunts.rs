//! haunts CLI - infer home and work from GPX location history
//!
//! Usage:
//!   haunts <file.gpx>... [--clusters <k>] [--seed <n>] [--output <map.geojson>]
//!
//! All files are merged into one trail before inference.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use haunts::export::write_geojson;
use haunts::ingest::read_gpx_file;
use haunts::{infer_haunts, GpsFix, LabeledLocation, LocateConfig, Result};

#[derive(Parser)]
#[command(name = "haunts")]
#[command(about = "Infer home and work locations from GPX location history", long_about = None)]
struct Cli {
    /// GPX files with timestamped fixes
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// JSON config file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of k-means clusters per label
    #[arg(short = 'k', long)]
    clusters: Option<usize>,

    /// RNG seed for reproducible results
    #[arg(short, long)]
    seed: Option<u64>,

    /// K-means iteration cap
    #[arg(long)]
    max_iter: Option<usize>,

    /// Geofence radius around the median position, in miles
    #[arg(long)]
    geofence_miles: Option<f64>,

    /// Local time offset from UTC in minutes (e.g. -300 for UTC-5)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,

    /// Write the locations as GeoJSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn locate_config(&self) -> Result<LocateConfig> {
        let mut config = match &self.config {
            Some(path) => LocateConfig::from_json_file(path)?,
            None => LocateConfig::default(),
        };
        if let Some(k) = self.clusters {
            config.clusters = k;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max_iter) = self.max_iter {
            config.max_iter = max_iter;
        }
        if let Some(miles) = self.geofence_miles {
            config.geofence_miles = miles;
        }
        if let Some(minutes) = self.utc_offset {
            config.utc_offset_minutes = minutes;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    match run(&cli) {
        Ok(found) if found > 0 => ExitCode::SUCCESS,
        Ok(_) => {
            error!("no location could be inferred");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns the number of labels that produced a location.
fn run(cli: &Cli) -> Result<usize> {
    let config = cli.locate_config()?;
    let fixes = load_fixes(&cli.files)?;
    info!("Loaded {} fixes from {} files", fixes.len(), cli.files.len());

    let haunts = infer_haunts(&fixes, &config)?;

    for (name, result) in [("Work", &haunts.work), ("Home", &haunts.home)] {
        match result {
            Ok(loc) => print_location(loc),
            Err(e) => println!("{:<5} unavailable: {}", name, e),
        }
    }

    let locations = haunts.locations();
    if let Some(path) = &cli.output {
        write_geojson(path, &locations)?;
        info!("Wrote {} locations to {}", locations.len(), path.display());
    }
    Ok(locations.len())
}

fn load_fixes(files: &[PathBuf]) -> Result<Vec<GpsFix>> {
    let mut fixes = Vec::new();
    for path in files {
        let loaded = read_gpx_file(path)?;
        if loaded.is_empty() {
            warn!("{}: no timestamped points", path.display());
        }
        fixes.extend(loaded);
    }
    fixes.sort_by_key(|f| f.timestamp);
    Ok(fixes)
}

fn print_location(loc: &LabeledLocation) {
    let note = if loc.converged { "" } else { " (not converged)" };
    println!(
        "{:<5} {:.6}, {:.6}  [{} fixes, {} iterations]{}",
        loc.label.as_str(),
        loc.location.latitude(),
        loc.location.longitude(),
        loc.support,
        loc.iterations,
        note
    );
}

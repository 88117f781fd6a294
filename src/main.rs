//! NBA player salary preprocessing CLI
//!
//! Thin driver around the library: load a player CSV, run the pipeline,
//! print the resulting matrix shape and a preview.

use clap::Parser;
use hoops::data::loader;
use hoops::pipeline;
use hoops::{Config, Result};
use std::path::Path;

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "Preprocess NBA player records into a model-ready feature matrix", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// CSV input path (overrides the config)
    #[arg(short, long)]
    input: Option<String>,

    /// Number of preview rows to print
    #[arg(long, default_value = "5")]
    preview: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let path = cli.input.as_deref().unwrap_or(&config.data.csv_path);
    let raw = loader::load_csv(Path::new(path))?;
    log::info!(
        "loaded {} rows x {} columns from {}",
        raw.n_rows(),
        raw.n_cols(),
        path
    );

    let (matrix, target) = pipeline::preprocess(raw, &config.pipeline)?;

    println!(
        "Feature matrix: {} rows x {} columns",
        matrix.n_rows(),
        matrix.n_cols()
    );
    println!("Columns: {}", matrix.column_names().join(", "));

    for i in 0..cli.preview.min(matrix.n_rows()) {
        let cells: Vec<String> = matrix.row(i).iter().map(|v| format!("{:.3}", v)).collect();
        println!("[{}] {}  salary={}", i, cells.join(" "), target[i]);
    }

    Ok(())
}

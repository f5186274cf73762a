use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sales_data_cleaning::config::PipelineConfig;
use sales_data_cleaning::pipeline::{EventLogObserver, LogObserver, Pipeline};
use sales_data_cleaning::preview::Preview;

/// Clean a raw sales CSV: normalize column names, trim text, drop rows with missing values or
/// invalid price/qty, and write the result.
///
/// With no flags, reads `Data/Raw/sales_data_raw.csv` and writes
/// `Data/processed/sales_data_clean.csv`.
#[derive(Parser, Debug)]
#[command(name = "sales-data-cleaning", version)]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Raw input file.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Cleaned output file (its directory must exist).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Field delimiter for both input and output.
    #[arg(long)]
    delimiter: Option<char>,
    /// Also write a JSON report of per-stage row counts here.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Number of rows to print after cleaning.
    #[arg(long)]
    preview_rows: Option<usize>,
    /// Append a one-line summary of each run (per-stage drop counts, or the failure) here.
    #[arg(long)]
    event_log: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<(PipelineConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_path(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(input) = self.input {
            config.input_path = input;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(report) = self.report {
            config.report_path = Some(report);
        }
        if let Some(rows) = self.preview_rows {
            config.preview_rows = rows;
        }
        Ok((config, self.event_log))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let (config, event_log) = Cli::parse().into_config()?;

    let mut pipeline = Pipeline::new(config).with_observer(Arc::new(LogObserver));
    if let Some(path) = event_log {
        pipeline = pipeline.with_observer(Arc::new(EventLogObserver::new(path)));
    }

    let run = pipeline.run().with_context(|| {
        format!(
            "cleaning {} into {}",
            pipeline.config().input_path.display(),
            pipeline.config().output_path.display()
        )
    })?;

    println!("Cleaning complete. First few rows:");
    println!("{}", Preview::new(&run.dataset, pipeline.config().preview_rows));
    Ok(())
}

//! End-to-end pipeline: load → clean → write.
//!
//! [`Pipeline::run`] loads the configured input file, runs every cleaning stage, and writes the
//! result. The output file is only created once every cleaning stage has succeeded, so a failed
//! run never leaves a partially cleaned file behind.
//!
//! Every registered [`CleaningObserver`] receives per-stage row counts, success, failure, and
//! alerts, in registration order.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sales_data_cleaning::config::PipelineConfig;
//! use sales_data_cleaning::pipeline::{LogObserver, Pipeline};
//!
//! # fn main() -> Result<(), sales_data_cleaning::CleaningError> {
//! let run = Pipeline::new(PipelineConfig::default())
//!     .with_observer(Arc::new(LogObserver))
//!     .run()?;
//! println!("rows written={}", run.report.rows_written);
//! # Ok(())
//! # }
//! ```

mod observer;

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::cleaning;
use crate::config::PipelineConfig;
use crate::error::{CleaningError, CleaningResult};
use crate::ingestion::load_csv_from_path;
use crate::output::write_csv_to_path;
use crate::report::{CleaningReport, Stage, StageStats};
use crate::types::DataSet;

pub use observer::{CleaningObserver, EventLogObserver, LogObserver, RunContext, Severity};

/// Result of a successful [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningRun {
    /// The cleaned table, as written to the output file.
    pub dataset: DataSet,
    /// Row counts for every stage.
    pub report: CleaningReport,
}

/// A configured load → clean → write run.
#[derive(Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    observers: Vec<Arc<dyn CleaningObserver>>,
    alert_at_or_above: Severity,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("observers_len", &self.observers.len())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline with no observers and an alert threshold of [`Severity::Critical`].
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            alert_at_or_above: Severity::Critical,
        }
    }

    /// Also report progress and outcomes to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn CleaningObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Severity threshold at which `on_alert` is invoked.
    pub fn with_alert_threshold(mut self, severity: Severity) -> Self {
        self.alert_at_or_above = severity;
        self
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load, clean, and write.
    ///
    /// Each observer receives:
    ///
    /// - `on_stage` after every stage (load, each cleaning step, write)
    /// - `on_success` with the final [`CleaningReport`]
    /// - `on_failure` on failure, with a computed severity
    /// - `on_alert` on failure when the severity is >= the alert threshold
    pub fn run(&self) -> CleaningResult<CleaningRun> {
        let ctx = RunContext {
            input_path: self.config.input_path.clone(),
            output_path: self.config.output_path.clone(),
        };

        let result = self.run_stages(&ctx);

        match &result {
            Ok(run) => {
                for obs in &self.observers {
                    obs.on_success(&ctx, &run.report);
                }
            }
            Err(e) => {
                let sev = severity_for_error(e);
                for obs in &self.observers {
                    obs.on_failure(&ctx, sev, e);
                    if sev >= self.alert_at_or_above {
                        obs.on_alert(&ctx, sev, e);
                    }
                }
            }
        }

        result
    }

    fn run_stages(&self, ctx: &RunContext) -> CleaningResult<CleaningRun> {
        let mut stages = Vec::new();
        let mut record = |stats: StageStats| {
            for obs in &self.observers {
                obs.on_stage(ctx, stats);
            }
            stages.push(stats);
        };

        let options = self.config.load_options()?;
        let raw = load_csv_from_path(&self.config.input_path, &options)?;
        let rows_loaded = raw.row_count();
        record(StageStats {
            stage: Stage::Load,
            rows_in: rows_loaded,
            rows_out: rows_loaded,
        });

        let dataset = cleaning::clean_observed(&raw, options.na_values.as_slice(), &mut record)?;

        write_csv_to_path(&dataset, &self.config.output_path, options.delimiter)?;
        let rows_written = dataset.row_count();
        record(StageStats {
            stage: Stage::Write,
            rows_in: rows_written,
            rows_out: rows_written,
        });

        let report = CleaningReport {
            input_path: self.config.input_path.clone(),
            output_path: self.config.output_path.clone(),
            stages,
            rows_loaded,
            rows_written,
        };
        if let Some(path) = self.config.report_path.as_ref() {
            report.write_json(path)?;
        }

        Ok(CleaningRun { dataset, report })
    }
}

/// Severity used for observer callbacks: I/O failures are `Critical`, everything else `Error`.
pub fn severity_for_error(e: &CleaningError) -> Severity {
    match e {
        CleaningError::Io(_) => Severity::Critical,
        CleaningError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        CleaningError::Json(err) => {
            if error_chain_contains_io(err) {
                Severity::Critical
            } else {
                Severity::Error
            }
        }
        CleaningError::SchemaMismatch { .. } => Severity::Error,
        CleaningError::ColumnCollision { .. } => Severity::Error,
        CleaningError::Config { .. } => Severity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::CleaningError;
use crate::report::{CleaningReport, StageStats};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (run failed).
    Error,
    /// Critical error (I/O failures reading input or writing output).
    Critical,
}

/// Context about a pipeline run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Input file being cleaned.
    pub input_path: PathBuf,
    /// Output file being written.
    pub output_path: PathBuf,
}

/// Observer interface for pipeline progress and outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts. Every method defaults to a no-op.
pub trait CleaningObserver: Send + Sync {
    /// Called after each stage with its row counts.
    fn on_stage(&self, _ctx: &RunContext, _stats: StageStats) {}

    /// Called when the run succeeds, after the output file is written.
    fn on_success(&self, _ctx: &RunContext, _report: &CleaningReport) {}

    /// Called when the run fails.
    fn on_failure(&self, _ctx: &RunContext, _severity: Severity, _error: &CleaningError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards events to the [`log`] facade.
///
/// Stages that drop rows log at `info`, the rest at `debug`; failures log at `error`.
#[derive(Debug, Default)]
pub struct LogObserver;

impl CleaningObserver for LogObserver {
    fn on_stage(&self, ctx: &RunContext, stats: StageStats) {
        let level = if stats.rows_dropped() > 0 {
            log::Level::Info
        } else {
            log::Level::Debug
        };
        log::log!(
            level,
            "[clean][{}] path={} rows_in={} rows_out={} dropped={}",
            stats.stage,
            ctx.input_path.display(),
            stats.rows_in,
            stats.rows_out,
            stats.rows_dropped()
        );
    }

    fn on_success(&self, ctx: &RunContext, report: &CleaningReport) {
        log::info!(
            "[clean][ok] input={} output={} rows_loaded={} rows_written={} dropped={}",
            ctx.input_path.display(),
            ctx.output_path.display(),
            report.rows_loaded,
            report.rows_written,
            format_drops(report)
        );
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        log::error!(
            "[clean][{:?}] input={} output={} err={}",
            severity,
            ctx.input_path.display(),
            ctx.output_path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        log::error!(
            "[ALERT][clean][{:?}] input={} output={} err={}",
            severity,
            ctx.input_path.display(),
            ctx.output_path.display(),
            error
        );
    }
}

/// Appends one line per run to an event log file.
///
/// A successful run is written as
///
/// ```text
/// <unix secs> ok input=<path> output=<path> rows_loaded=8 rows_written=3 dropped=drop_missing:2,drop_missing_price:1
/// ```
///
/// where `dropped` lists only the stages that removed rows (`none` for a clean input). A failed
/// run is written as `<unix secs> fail severity=<severity> input=<path> err=<error>`, followed by
/// an `alert` line when the failure met the pipeline's alert threshold.
///
/// Writes are best-effort: a log file that cannot be opened or written is ignored.
#[derive(Debug)]
pub struct EventLogObserver {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl EventLogObserver {
    /// Log runs to `path`. The file is created on the first event and appended to afterwards.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Mutex::new(None),
        }
    }

    /// Path of the event log.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &str) {
        let Ok(mut slot) = self.file.lock() else {
            return;
        };
        if slot.is_none() {
            *slot = OpenOptions::new().create(true).append(true).open(&self.path).ok();
        }
        if let Some(file) = slot.as_mut() {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            let _ = writeln!(file, "{secs} {event}");
        }
    }
}

impl CleaningObserver for EventLogObserver {
    fn on_success(&self, ctx: &RunContext, report: &CleaningReport) {
        self.append(&format!(
            "ok input={} output={} rows_loaded={} rows_written={} dropped={}",
            ctx.input_path.display(),
            ctx.output_path.display(),
            report.rows_loaded,
            report.rows_written,
            format_drops(report)
        ));
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        self.append(&format!(
            "fail severity={:?} input={} err={}",
            severity,
            ctx.input_path.display(),
            error
        ));
    }

    fn on_alert(&self, _ctx: &RunContext, severity: Severity, _error: &CleaningError) {
        self.append(&format!("alert severity={severity:?}"));
    }
}

/// `stage:count` pairs for every stage that dropped rows, or `none`.
fn format_drops(report: &CleaningReport) -> String {
    let drops: Vec<String> = report
        .drops_by_stage()
        .map(|(stage, dropped)| format!("{stage}:{dropped}"))
        .collect();
    if drops.is_empty() {
        "none".to_string()
    } else {
        drops.join(",")
    }
}

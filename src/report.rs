//! Aggregate row counts for a pipeline run.
//!
//! Rows dropped by the cleaning stages are never reported individually; a [`CleaningReport`]
//! only records how many rows went into and came out of each [`Stage`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::CleaningResult;

/// A step of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    NormalizeColumns,
    TrimText,
    DropMissing,
    CoerceNumeric,
    DropMissingPrice,
    DropNegativePrice,
    DropNegativeQty,
    Write,
}

impl Stage {
    /// Stable snake_case name, matching the JSON report.
    pub fn name(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::NormalizeColumns => "normalize_columns",
            Self::TrimText => "trim_text",
            Self::DropMissing => "drop_missing",
            Self::CoerceNumeric => "coerce_numeric",
            Self::DropMissingPrice => "drop_missing_price",
            Self::DropNegativePrice => "drop_negative_price",
            Self::DropNegativeQty => "drop_negative_qty",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row counts around a single [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageStats {
    pub stage: Stage,
    pub rows_in: usize,
    pub rows_out: usize,
}

impl StageStats {
    /// Number of rows the stage removed.
    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}

/// Summary of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    /// File the raw data was loaded from.
    pub input_path: PathBuf,
    /// File the cleaned data was written to.
    pub output_path: PathBuf,
    /// Per-stage counts, in execution order.
    pub stages: Vec<StageStats>,
    /// Data rows in the input file.
    pub rows_loaded: usize,
    /// Data rows in the output file.
    pub rows_written: usize,
}

impl CleaningReport {
    /// Total rows removed by cleaning.
    pub fn rows_dropped(&self) -> usize {
        self.rows_loaded.saturating_sub(self.rows_written)
    }

    /// Counts for `stage`, if it ran.
    pub fn stage(&self, stage: Stage) -> Option<&StageStats> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// Stages that removed rows, with how many, in execution order.
    pub fn drops_by_stage(&self) -> impl Iterator<Item = (Stage, usize)> + '_ {
        self.stages
            .iter()
            .filter(|s| s.rows_dropped() > 0)
            .map(|s| (s.stage, s.rows_dropped()))
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json_pretty(&self) -> CleaningResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON form of the report to `path`, replacing any existing file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> CleaningResult<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{CleaningReport, Stage, StageStats};

    fn sample_report() -> CleaningReport {
        CleaningReport {
            input_path: PathBuf::from("in.csv"),
            output_path: PathBuf::from("out.csv"),
            stages: vec![
                StageStats { stage: Stage::Load, rows_in: 4, rows_out: 4 },
                StageStats { stage: Stage::DropMissing, rows_in: 4, rows_out: 3 },
                StageStats { stage: Stage::Write, rows_in: 3, rows_out: 3 },
            ],
            rows_loaded: 4,
            rows_written: 3,
        }
    }

    #[test]
    fn counts_dropped_rows() {
        let report = sample_report();
        assert_eq!(report.rows_dropped(), 1);
        assert_eq!(report.stage(Stage::DropMissing).map(|s| s.rows_dropped()), Some(1));
        assert_eq!(report.stage(Stage::TrimText), None);
        assert_eq!(
            report.drops_by_stage().collect::<Vec<_>>(),
            vec![(Stage::DropMissing, 1)]
        );
    }

    #[test]
    fn json_uses_snake_case_stage_names() {
        let json = sample_report().to_json_pretty().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["stages"][1]["stage"], "drop_missing");
        assert_eq!(parsed["rows_written"], 3);
        assert_eq!(parsed["input_path"], "in.csv");
    }
}

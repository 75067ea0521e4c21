// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use spendlog::{FormConfig, LedgerForm};
use tempfile::TempDir;

/// Helper to create a form backed by a log file in a temporary directory
pub fn test_form() -> Result<(LedgerForm, TempDir)> {
    let temp_dir = TempDir::new()?;
    let form = LedgerForm::open(config_for(&temp_dir))?;
    Ok((form, temp_dir))
}

/// Configuration pointing at `expenses.csv` inside `temp_dir`
pub fn config_for(temp_dir: &TempDir) -> FormConfig {
    FormConfig {
        log_path: log_path(temp_dir),
        ..FormConfig::default()
    }
}

pub fn log_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("expenses.csv")
}

/// Open the same log again, as a restarted program would
pub fn reopen(temp_dir: &TempDir) -> Result<LedgerForm> {
    Ok(LedgerForm::open(config_for(temp_dir))?)
}

/// Helper to build a fixed timestamp on 2024-01-01
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

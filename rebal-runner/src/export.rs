//! Artifact export: per-day policy CSV and summary report JSON.
//!
//! Artifacts for a run land under `<output_dir>/<run_id>/`, keyed by the
//! content-addressed run id so re-runs with the same config overwrite their
//! own directory and nothing else.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::runner::{RebalanceReport, RunOutcome};

/// Paths of the written artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub policy_csv: PathBuf,
    pub report_json: PathBuf,
}

/// Write the per-day policy tape: realized state, band, and decision.
///
/// `dates` is per-day and optional; synthetic runs pass `None` for every day
/// and the column is left empty.
pub fn write_policy_csv(
    path: &Path,
    outcome: &RunOutcome,
    dates: &[Option<NaiveDate>],
) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create policy CSV {}", path.display()))?;

    writeln!(
        file,
        "day,date,weight_a,investment_a,investment_b,total_return,\
         min_cost_weight,tc,cec,low_bound,high_bound,cumulative_future_cost,rebalance"
    )?;

    for (state, decision) in outcome.result.states.iter().zip(&outcome.result.decisions) {
        let date = dates
            .get(decision.day)
            .and_then(|d| d.map(|d| d.to_string()))
            .unwrap_or_default();
        writeln!(
            file,
            "{},{},{:.6},{:.4},{:.4},{:.8},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{}",
            decision.day,
            date,
            state.weight_a,
            state.investment_a,
            state.investment_b,
            state.total_return,
            decision.min_cost_weight,
            decision.tc,
            decision.cec,
            decision.low_bound,
            decision.high_bound,
            decision.cumulative_future_cost,
            decision.rebalance,
        )?;
    }
    Ok(())
}

/// Write the summary report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &RebalanceReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report JSON {}", path.display()))?;
    Ok(())
}

/// Write all artifacts for a run under `<output_dir>/<run_id>/`.
pub fn save_artifacts(
    output_dir: &Path,
    outcome: &RunOutcome,
    dates: &[Option<NaiveDate>],
) -> Result<ArtifactPaths> {
    let run_dir = output_dir.join(&outcome.report.run_id);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create run directory {}", run_dir.display()))?;

    let policy_csv = run_dir.join("policy.csv");
    write_policy_csv(&policy_csv, outcome, dates)?;

    let report_json = run_dir.join("report.json");
    write_report_json(&report_json, &outcome.report)?;

    Ok(ArtifactPaths { policy_csv, report_json })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::data_loader::synthetic_prices;
    use crate::runner::run_rebalance;

    fn outcome() -> RunOutcome {
        let prices = synthetic_prices(30, 11);
        run_rebalance(&RunConfig::new("export-test"), &prices).unwrap()
    }

    #[test]
    fn policy_csv_has_one_row_per_day() {
        let outcome = outcome();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.csv");
        write_policy_csv(&path, &outcome, &vec![None; 30]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 31);
        assert!(lines[0].starts_with("day,date,weight_a"));
        assert!(lines[1].starts_with("0,,"));
    }

    #[test]
    fn report_json_round_trips() {
        let outcome = outcome();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report_json(&path, &outcome.report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: RebalanceReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.run_id, outcome.report.run_id);
        assert_eq!(parsed.days, outcome.report.days);
        assert_eq!(parsed.rebalance_count, outcome.report.rebalance_count);
    }

    #[test]
    fn artifacts_land_under_the_run_id() {
        let outcome = outcome();
        let dir = tempfile::tempdir().unwrap();
        let paths = save_artifacts(dir.path(), &outcome, &vec![None; 30]).unwrap();

        assert!(paths.policy_csv.starts_with(dir.path().join(&outcome.report.run_id)));
        assert!(paths.policy_csv.exists());
        assert!(paths.report_json.exists());
    }

    #[test]
    fn dated_rows_carry_the_date() {
        let outcome = outcome();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.csv");
        let mut dates = vec![None; 30];
        dates[0] = NaiveDate::from_ymd_opt(2024, 1, 2);
        write_policy_csv(&path, &outcome, &dates).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("0,2024-01-02,"));
    }
}

//! Reporting and export: JSON, CSV, and Markdown artifact generation.
//!
//! - **JSON**: full round-trip serialization of an `AnalysisReport`, with schema versioning
//! - **CSV**: formatted candidate rows for spreadsheets
//! - **Markdown**: human-readable analysis and leaderboard reports
//!
//! Unknown schema versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use optlab_core::{AnalysisResult, Candidate, FormattedCandidate};

use crate::leaderboard::FamilyLeaderboard;
use crate::runner::{AnalysisReport, SCHEMA_VERSION};
use crate::sweep::SweepReport;

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `AnalysisReport` to pretty JSON.
pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize an `AnalysisReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

/// Serialize a sweep to pretty JSON.
pub fn export_sweep_json(report: &SweepReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize SweepReport to JSON")
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export candidates as CSV using their display formatting.
///
/// Columns follow `FormattedCandidate::HEADERS`.
pub fn export_candidates_csv(candidates: &[Candidate]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(FormattedCandidate::HEADERS)?;
    for c in candidates {
        let row = FormattedCandidate::from(c);
        wtr.write_record(row.row())?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one analysis.
///
/// Creates `{family}_{short id}/` under `output_dir` containing:
/// - `report.json`: the full `AnalysisReport`
/// - `candidates.csv`: the `all` view
/// - `report.md`: the Markdown report
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &AnalysisReport, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!("{}_{}", report.family, report.analysis_id.short());
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("report.json"), export_json(report)?)?;
    std::fs::write(run_dir.join("candidates.csv"), export_candidates_csv(&report.result.all)?)?;
    std::fs::write(run_dir.join("report.md"), generate_report(report))?;

    Ok(run_dir)
}

/// Load an `AnalysisReport` from an artifact directory's report.json.
pub fn load_artifacts(dir: &Path) -> Result<AnalysisReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown reports ───────────────────────────────────────────────

fn candidate_table(md: &mut String, candidates: &[Candidate]) {
    if candidates.is_empty() {
        md.push_str("_No candidates._\n\n");
        return;
    }
    md.push_str("| Strategy | Entry | Max Gain | Max Loss | % Gain | % Loss | Reward/Risk |\n");
    md.push_str("| --- | ---: | ---: | ---: | ---: | ---: | ---: |\n");
    for c in candidates {
        let f = FormattedCandidate::from(c);
        md.push_str(&format!(
            "| {} | {} {} | {} | {} | {}% | {}% | {} |\n",
            f.description,
            f.entry_kind,
            f.entry_amount,
            f.max_gain,
            f.max_loss,
            f.percent_gain,
            f.percent_loss,
            f.reward_risk_ratio
        ));
    }
    md.push('\n');
}

fn result_sections(md: &mut String, result: &AnalysisResult) {
    md.push_str("### Best by % Gain\n\n");
    candidate_table(md, &result.by_reward);
    md.push_str("### Best by Reward/Risk\n\n");
    candidate_table(md, &result.by_ratio);
    md.push_str("### All Candidates\n\n");
    candidate_table(md, &result.all);
}

/// Generate a Markdown report for one analysis.
pub fn generate_report(report: &AnalysisReport) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str(&format!("# {} Analysis\n\n", report.family.label()));

    md.push_str("## Inputs\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    if let Some(symbol) = &report.symbol {
        md.push_str(&format!("| Symbol | {symbol} |\n"));
    }
    md.push_str(&format!("| Spot | {:.2} |\n", report.inputs.spot_price));
    md.push_str(&format!("| Implied Vol | {:.1}% |\n", report.inputs.implied_vol * 100.0));
    md.push_str(&format!("| Days to Expiration | {} |\n", report.inputs.days_to_expiration));
    md.push_str(&format!("| Risk-Free Rate | {:.2}% |\n", report.options.risk_free_rate * 100.0));
    md.push_str(&format!("| Strikes | {} |\n", report.strike_count));
    md.push_str(&format!("| Analysis ID | {} |\n", report.analysis_id.short()));
    md.push('\n');

    if let Some(first) = report.result.all.first() {
        md.push_str(&format!(
            "Scenario prices: up {:.2}, down {:.2}\n\n",
            first.outcome.stock_up, first.outcome.stock_down
        ));
    }

    md.push_str("## Results\n\n");
    result_sections(&mut md, &report.result);
    md
}

/// Generate a Markdown table for a cross-family leaderboard.
pub fn generate_leaderboard_report(board: &FamilyLeaderboard) -> String {
    let mut md = String::with_capacity(1024);
    md.push_str(&format!("# Leaderboard ({})\n\n", board.metric()));
    if board.is_empty() {
        md.push_str("_No candidates._\n");
        return md;
    }
    md.push_str("| Rank | Family | Strategy | Score |\n");
    md.push_str("| ---: | --- | --- | ---: |\n");
    for (i, e) in board.entries().iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            i + 1,
            e.family().label(),
            e.candidate.description,
            e.score
        ));
    }
    md
}

//! ABOM CLI - offline risk scoring
//!
//! The `abom` command scores Agentic Bill of Materials files without the
//! HTTP service.
//!
//! ## Commands
//!
//! - `score`: Print the risk result for an ABOM file
//! - `report`: Write the full risk report for an ABOM file
//! - `thresholds`: Show the UART tier table in effect

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use abom_core::scoring::threshold_table;
use abom_core::{AbomDocument, RiskAssessment, RiskReport, RiskScorer, ScoringConfig};

#[derive(Parser)]
#[command(name = "abom")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "ABOM Risk Scoring Engine", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an ABOM file and print the result as JSON
    Score {
        /// Path to the ABOM document (JSON)
        path: PathBuf,
    },

    /// Generate the full risk report for an ABOM file
    Report {
        /// Path to the ABOM document (JSON)
        path: PathBuf,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the tier thresholds in effect
    Thresholds,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    abom_core::init_tracing(cli.json, level);

    let scorer = RiskScorer::new(ScoringConfig::default()).context("build risk scorer")?;

    match cli.command {
        Commands::Score { path } => {
            println!("{}", cmd_score(&scorer, &path)?);
            Ok(())
        }
        Commands::Report { path, output } => {
            let report = cmd_report(&scorer, &path)?;
            match output {
                Some(out) => {
                    std::fs::write(&out, report).with_context(|| format!("write {:?}", out))?;
                    info!(path = %out.display(), "report written");
                }
                None => println!("{report}"),
            }
            Ok(())
        }
        Commands::Thresholds => {
            print!("{}", cmd_thresholds(scorer.config()));
            Ok(())
        }
    }
}

fn load(scorer: &RiskScorer, path: &Path) -> Result<(AbomDocument, RiskAssessment)> {
    let bytes = std::fs::read(path).with_context(|| format!("read {:?}", path))?;
    scorer
        .assess_bytes(&bytes)
        .with_context(|| format!("score {:?}", path))
}

fn cmd_score(scorer: &RiskScorer, path: &Path) -> Result<String> {
    let (_, assessment) = load(scorer, path)?;
    abom_core::emit_assessment_scored(&assessment);
    serde_json::to_string_pretty(&assessment.response()).context("serialize risk result")
}

fn cmd_report(scorer: &RiskScorer, path: &Path) -> Result<String> {
    let (document, assessment) = load(scorer, path)?;
    let report = RiskReport::build(&document, &assessment, scorer.config(), Utc::now())?;
    Ok(report.to_json_pretty()?)
}

fn cmd_thresholds(config: &ScoringConfig) -> String {
    threshold_table(&config.thresholds)
        .into_iter()
        .map(|(tier, range)| {
            let name = format!("Tier {}", tier.number());
            format!("{:<8} {:<10} {}\n", name, tier.label(), range)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn write_doc(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_cmd_score_outputs_risk_result() {
        let dir = tempfile::tempdir().unwrap();
        let doc = json!({
            "agency_profile": {"tools": [{"name": "search", "permission": "read"}]},
            "autonomy_leash": "HOTL",
            "persistence_layer": {"memory_type": "session", "retention": "session"}
        });
        let path = write_doc(&dir, "abom.json", &doc.to_string());

        let out = cmd_score(&RiskScorer::default(), &path).unwrap();
        let out: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(out["score"], 10.87);
        assert_eq!(out["tier"], 2);
        assert_eq!(out["tier_4_overrides"], Value::Null);
    }

    #[test]
    fn test_cmd_score_reports_missing_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, "abom.json", r#"{"agency_profile": {"tools": []}}"#);

        let err = cmd_score(&RiskScorer::default(), &path).unwrap_err();
        assert!(format!("{err:#}").contains("Missing 'autonomy_leash' field"));
    }

    #[test]
    fn test_cmd_score_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = cmd_score(&RiskScorer::default(), &dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("read"));
    }

    #[test]
    fn test_cmd_report_embeds_input() {
        let dir = tempfile::tempdir().unwrap();
        let doc = json!({
            "agency_profile": {"tools": ["search"]},
            "autonomy_leash": {"mode": "HITL"},
            "persistence_layer": {"memory_type": "none"}
        });
        let path = write_doc(&dir, "abom.json", &doc.to_string());

        let report = cmd_report(&RiskScorer::default(), &path).unwrap();
        let report: Value = serde_json::from_str(&report).unwrap();
        assert_eq!(report["abom_input"], doc);
        assert_eq!(report["risk_assessment"]["tier_description"], "UART Tier 1 (Low)");
    }

    #[test]
    fn test_cmd_thresholds_lists_every_tier() {
        let table = cmd_thresholds(&ScoringConfig::default());
        assert_eq!(table.lines().count(), 5);
        assert!(table.contains("5 ≤ R < 20"));
        assert!(table.starts_with("Tier 0"));
    }
}

//! The `mockview grade` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mockview_core::engine::{GradingConfig, GradingEngine, ProgressReporter};
use mockview_core::parser::{load_sheets, validate_sheet};
use mockview_core::report::GradeReport;
use mockview_core::results::GradeResult;
use mockview_report::html::write_html_report;

use super::build_evaluator;

pub struct GradeArgs {
    pub sheet: PathBuf,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub parallelism: Option<usize>,
    pub output: Option<PathBuf>,
    pub format: String,
    pub filter: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Json,
    Html,
}

fn parse_formats(list: &str) -> Result<Vec<ReportFormat>> {
    if list == "all" {
        return Ok(vec![ReportFormat::Json, ReportFormat::Html]);
    }
    list.split(',')
        .map(|f| match f.trim() {
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            other => Err(anyhow::anyhow!(
                "unknown format '{other}' (expected json, html, or all)"
            )),
        })
        .collect()
}

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_grade_start(&self, answer_id: &str) {
        eprintln!("  Grading: {answer_id}");
    }

    fn on_grade_complete(&self, result: &GradeResult) {
        eprintln!(
            "  Done: {} {} [{}] ({}ms)",
            result.answer_id,
            result.evaluation.display_score(),
            result.evaluation.band,
            result.latency_ms,
        );
    }

    fn on_grade_error(&self, answer_id: &str, error: &str) {
        eprintln!("  ERROR: {answer_id}: {error}");
    }

    fn on_sheet_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {completed}/{total} graded, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(args: GradeArgs, config_path: Option<&Path>) -> Result<()> {
    if let Some(p) = args.parallelism {
        anyhow::ensure!(p >= 1, "parallelism must be at least 1");
    }

    let formats = parse_formats(&args.format)?;

    let (config, evaluator) =
        build_evaluator(config_path, args.provider.as_deref(), args.model.as_deref())?;
    let evaluator = match args.seed {
        Some(seed) => evaluator.with_seed(seed),
        None => evaluator,
    };

    let mut sheets = load_sheets(&args.sheet)?;
    anyhow::ensure!(
        !sheets.is_empty(),
        "no answer sheets found in {}",
        args.sheet.display()
    );

    if let Some(filter_tags) = &args.filter {
        let tags: Vec<&str> = filter_tags.split(',').map(|s| s.trim()).collect();
        for sheet in &mut sheets {
            sheet
                .answers
                .retain(|a| a.tags.iter().any(|t| tags.contains(&t.as_str())));
        }
    }

    let engine = GradingEngine::new(
        Arc::new(evaluator),
        GradingConfig {
            parallelism: args.parallelism.unwrap_or(config.parallelism),
        },
    );
    let output = args.output.unwrap_or_else(|| config.output_dir.clone());
    let reporter = ConsoleReporter;

    for sheet in &sheets {
        for w in validate_sheet(sheet) {
            let id = w.answer_id.as_deref().unwrap_or(&sheet.id);
            tracing::warn!("[{id}] {}", w.message);
        }

        eprintln!(
            "mockview v{} - Grading {} answers from '{}'",
            env!("CARGO_PKG_VERSION"),
            sheet.answers.len(),
            sheet.name
        );
        eprintln!();

        let report = engine.grade(sheet, &reporter).await?;

        print_summary(&report);

        std::fs::create_dir_all(&output)?;
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let stem = format!("report-{}-{timestamp}", sheet.id);

        for fmt in &formats {
            match fmt {
                ReportFormat::Json => {
                    let path = output.join(format!("{stem}.json"));
                    report.save_json(&path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                ReportFormat::Html => {
                    let path = output.join(format!("{stem}.html"));
                    write_html_report(&report, &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn print_summary(report: &GradeReport) {
    let mut table = Table::new();
    table.set_header(vec!["Answer", "Score", "Band", "Similarity", "Concepts"]);

    for r in &report.results {
        let e = &r.evaluation;
        table.add_row(vec![
            Cell::new(&r.answer_id),
            Cell::new(format!("{:.1}", e.score)),
            Cell::new(e.band),
            Cell::new(format!("{:.2}", e.semantic_similarity)),
            Cell::new(e.found_concepts.join(", ")),
        ]);
    }

    let overall = &report.stats.overall;
    println!("{table}");
    println!(
        "Mean {:.1} | median {:.1} | min {:.1} | max {:.1} | high {} / medium {} / low {}",
        overall.mean,
        overall.median,
        overall.min,
        overall.max,
        overall.bands.high,
        overall.bands.medium,
        overall.bands.low
    );
}

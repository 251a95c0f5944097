//! CLI entrypoint for the frankenvm conformance harness.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use frankenvm_harness::structured_log::{LogEmitter, LogEntry, LogLevel};
use frankenvm_harness::{Driver, Outcome, suite};

/// Conformance tooling for frankenvm.
#[derive(Debug, Parser)]
#[command(name = "frankenvm-harness")]
#[command(about = "Runtime-semantics conformance harness for frankenvm")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the conformance suite (or a single scenario).
    Run {
        /// Run only the named scenario.
        #[arg(long)]
        scenario: Option<String>,
        /// Output path for the machine-readable JSON report.
        #[arg(long)]
        report_json: Option<PathBuf>,
        /// Output path for the human-readable markdown report.
        #[arg(long)]
        report_md: Option<PathBuf>,
        /// Output path for structured JSONL evidence lines.
        #[arg(long)]
        log_jsonl: Option<PathBuf>,
        /// Suppress the framed observation stream on stdout.
        #[arg(long)]
        quiet: bool,
    },
    /// List the scenarios in suite order.
    List,
}

const SUITE_NAME: &str = "runtime";

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            scenario,
            report_json,
            report_md,
            log_jsonl,
            quiet,
        } => run(
            scenario.as_deref(),
            report_json.as_deref(),
            report_md.as_deref(),
            log_jsonl.as_deref(),
            quiet,
        ),
        Command::List => {
            for scenario in suite() {
                println!("{}", scenario.name);
            }
            ExitCode::SUCCESS
        }
    }
}

fn run(
    scenario: Option<&str>,
    report_json: Option<&std::path::Path>,
    report_md: Option<&std::path::Path>,
    log_jsonl: Option<&std::path::Path>,
    quiet: bool,
) -> ExitCode {
    let mut scenarios = suite();
    if let Some(name) = scenario {
        scenarios.retain(|s| s.name == name);
        if scenarios.is_empty() {
            eprintln!("unknown scenario: {name}");
            return ExitCode::from(2);
        }
    }

    let driver = Driver::new(SUITE_NAME);
    let mut sink: Box<dyn Write> = if quiet {
        Box::new(std::io::sink())
    } else {
        Box::new(std::io::stdout().lock())
    };
    let report = match driver.run(&scenarios, &mut sink) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("suite run failed: {err}");
            return ExitCode::from(2);
        }
    };

    if let Some(path) = report_json
        && let Err(err) = write_report(path, report.to_json().unwrap_or_default())
    {
        eprintln!("failed to write {}: {err}", path.display());
        return ExitCode::from(2);
    }
    if let Some(path) = report_md
        && let Err(err) = write_report(path, report.render_markdown())
    {
        eprintln!("failed to write {}: {err}", path.display());
        return ExitCode::from(2);
    }
    if let Some(path) = log_jsonl
        && let Err(err) = write_evidence_log(path, &report)
    {
        eprintln!("failed to write {}: {err}", path.display());
        return ExitCode::from(2);
    }

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn write_report(path: &std::path::Path, content: String) -> std::io::Result<()> {
    std::fs::write(path, content)
}

fn write_evidence_log(
    path: &std::path::Path,
    report: &frankenvm_harness::SuiteReport,
) -> std::io::Result<()> {
    let run_id = format!("run-{}", std::process::id());
    let mut emitter = LogEmitter::to_file(path, SUITE_NAME, &run_id)?;
    emitter.emit(LogLevel::Info, "suite_start")?;
    for scenario in &report.scenarios {
        let level = match scenario.outcome {
            Outcome::Pass => LogLevel::Info,
            Outcome::Fail | Outcome::Error => LogLevel::Error,
        };
        emitter.emit_entry(
            LogEntry::new("", level, "scenario_end")
                .with_scenario(&scenario.name)
                .with_outcome(scenario.outcome)
                .with_status(scenario.status_code)
                .with_mismatches(scenario.mismatches.len()),
        )?;
    }
    let level = if report.all_passed() {
        LogLevel::Info
    } else {
        LogLevel::Error
    };
    emitter.emit_entry(LogEntry::new("", level, "suite_end").with_details(serde_json::json!({
        "total": report.total,
        "passed": report.passed,
        "failed": report.failed,
        "errors": report.errors,
    })))?;
    emitter.flush()
}

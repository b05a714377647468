//! CLI entry point for the salary report pipeline.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use salary_report::{
    CategoryMappings, DatasetOverview, GroupOrder, PipelineResult, ReportConfig, ReportExporter,
    ReportPipeline, RunReport, load_employees, select_renderer,
};
use std::path::Path;
use tracing::{debug, error, info};

/// CLI-compatible group ordering enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliGroupOrder {
    /// Summary rows in ascending key order
    Sorted,
    /// Summary rows in order of first appearance
    FirstSeen,
}

impl From<CliGroupOrder> for GroupOrder {
    fn from(cli: CliGroupOrder) -> Self {
        match cli {
            CliGroupOrder::Sorted => GroupOrder::Sorted,
            CliGroupOrder::FirstSeen => GroupOrder::FirstSeen,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Employee salary cleaning and summary reports",
    long_about = "Deduplicates and cleans an employee CSV, then writes department and \
                  job-title salary summaries.\n\n\
                  OUTPUT FILES:\n  \
                  dept_summary.csv, job_summary.csv, highest_paid_per_dept.csv\n\n\
                  EXAMPLES:\n  \
                  # Default input (employee.csv) into the current directory\n  \
                  salary-report\n\n  \
                  # Reproducible run with a pinned reference date\n  \
                  salary-report -i data/employee.csv -o out/ --reference-date 2024-01-01\n\n  \
                  # Extra spellings and a JSON run report\n  \
                  salary-report --mappings mappings.json -r"
)]
struct Args {
    /// Path to the employee CSV file
    #[arg(short, long, default_value = "employee.csv")]
    input: String,

    /// Output directory for the summary files
    #[arg(short, long, default_value = ".")]
    output: String,

    /// Date years of service are measured against (YYYY-MM-DD)
    ///
    /// Defaults to today's local date
    #[arg(long, value_parser = parse_reference_date)]
    reference_date: Option<NaiveDate>,

    /// Ordering of rows in the summary tables
    #[arg(long, value_enum, default_value = "sorted")]
    group_order: CliGroupOrder,

    /// Salary imputed when no salary in the file parses
    #[arg(long, default_value = "0")]
    salary_fallback: f64,

    /// JSON file with extra department and job-title mappings
    #[arg(long)]
    mappings: Option<String>,

    /// Also write the full cleaned table to cleaned_employees.csv
    #[arg(long)]
    emit_cleaned: bool,

    /// Write a JSON run report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Print an overview of the raw dataset before cleaning
    #[arg(long)]
    inspect: bool,

    /// Print summaries as plain lines even on a terminal
    #[arg(long)]
    plain: bool,

    /// Do not print the summaries
    #[arg(long)]
    no_render: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only show warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn parse_reference_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", value, e))
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);

    let data = load_employees(&args.input)?;

    let overview = DatasetOverview::from_frame(&data)?;
    if args.inspect {
        println!("{}", overview);
    } else {
        debug!(
            "Raw dataset: {} rows, {} columns",
            overview.rows, overview.columns
        );
    }

    let config = build_config(&args)?;
    let pipeline = ReportPipeline::builder().config(config).build()?;

    info!("{}", "=".repeat(60));
    info!("Starting salary report pipeline...");
    info!("{}", "=".repeat(60));

    match pipeline.process(data) {
        Ok(result) => handle_pipeline_output(&result, pipeline.config(), &args),
        Err(e) => {
            error!("Pipeline failed: {}", e);
            Err(anyhow!("Pipeline failed: {}", e))
        }
    }
}

fn build_config(args: &Args) -> Result<ReportConfig> {
    let mut builder = ReportConfig::builder()
        .output_dir(&args.output)
        .group_order(args.group_order.into())
        .salary_fallback(args.salary_fallback)
        .emit_cleaned(args.emit_cleaned)
        .emit_report(args.emit_report);

    if let Some(date) = args.reference_date {
        builder = builder.reference_date(date);
    }
    if let Some(ref path) = args.mappings {
        let mappings = CategoryMappings::from_overrides_file(Path::new(path))
            .with_context(|| format!("Loading mappings from {}", path))?;
        builder = builder.mappings(mappings);
    }

    Ok(builder.build()?)
}

/// Write the output files, then render the summaries.
fn handle_pipeline_output(
    result: &PipelineResult,
    config: &ReportConfig,
    args: &Args,
) -> Result<()> {
    let exporter = ReportExporter::new(&config.output_dir);

    let files = exporter.write_summaries(result)?;
    for path in files.paths() {
        info!("Wrote {}", path.display());
    }

    if config.emit_cleaned {
        let path = exporter.write_cleaned(result)?;
        info!("Cleaned table written to: {}", path.display());
    }

    if config.emit_report {
        let report = RunReport::from_result(&args.input, result);
        let report_path = exporter.write_report(&report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    for step in &result.processing_steps {
        debug!("  - {}", step);
    }

    if !args.no_render {
        let mut stdout = std::io::stdout().lock();
        select_renderer(args.plain).render(result, &mut stdout)?;
    }

    Ok(())
}

/// File name without extension, used to name the JSON report.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("employees")
        .to_string()
}

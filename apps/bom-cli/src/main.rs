use bom_app::{
    AppResult, AppSettings, ExplodeRequest, OrderReport, RunTimingSummary, TracePath,
    explode_service, query, settings, table_service,
};
use bom_explode::EntryKind;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bom-cli")]
#[command(about = "BOM explosion - flatten a multi-level bill of materials into an order list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explode a BOM table into order and length lists
    Explode {
        /// Path to the BOM export file
        table_path: PathBuf,
        /// Settings YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Maximum phantom nesting depth (overrides the settings file)
        #[arg(long)]
        max_depth: Option<usize>,
        /// Report directory to save the result into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show every path that produced an item
    Trace {
        /// Path to the BOM export file
        table_path: PathBuf,
        /// Item code to trace
        item: String,
        /// Settings YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Check a BOM table and print a summary without exploding it
    Validate {
        /// Path to the BOM export file
        table_path: PathBuf,
        /// Settings YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List saved reports
    Reports {
        /// Report directory
        report_dir: PathBuf,
    },
    /// Show a saved report
    ShowReport {
        /// Report directory
        report_dir: PathBuf,
        /// Report ID to display
        report_id: String,
        /// Also print the paths of this item
        #[arg(long)]
        trace: Option<String>,
    },
}

fn main() -> AppResult<()> {
    // Logs go to stderr so the lists on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Explode {
            table_path,
            config,
            max_depth,
            out,
        } => cmd_explode(&table_path, config.as_deref(), max_depth, out.as_deref()),
        Commands::Trace {
            table_path,
            item,
            config,
        } => cmd_trace(&table_path, &item, config.as_deref()),
        Commands::Validate { table_path, config } => cmd_validate(&table_path, config.as_deref()),
        Commands::Reports { report_dir } => cmd_reports(&report_dir),
        Commands::ShowReport {
            report_dir,
            report_id,
            trace,
        } => cmd_show_report(&report_dir, &report_id, trace.as_deref()),
    }
}

fn load_settings(config: Option<&Path>, max_depth: Option<usize>) -> AppResult<AppSettings> {
    Ok(settings::load_optional_settings(config)?.with_max_depth(max_depth))
}

fn cmd_explode(
    table_path: &Path,
    config: Option<&Path>,
    max_depth: Option<usize>,
    out: Option<&Path>,
) -> AppResult<()> {
    let settings = load_settings(config, max_depth)?;
    println!("Exploding BOM: {}", table_path.display());

    let response = explode_service::run_explode(&ExplodeRequest {
        table_path,
        settings: &settings,
        output_dir: out,
    })?;
    let report = &response.report;

    println!("✓ Root: {} {}", report.root, report.root_name);
    print_order_list(report);
    print_length_list(report);

    let counters = &report.counters;
    println!();
    println!("  Skipped (unknown class): {}", counters.skipped_unknown);
    println!("  Rejected (bad quantity): {}", counters.rejected_rows);
    println!("  Duplicate paths:         {}", counters.duplicate_paths);

    if let Some(dir) = &response.saved_to {
        println!("✓ Report saved: {} ({})", report.report_id, dir.display());
    }

    print_timing_summary(&response.timing);
    Ok(())
}

fn print_order_list(report: &OrderReport) {
    println!("\nOrder list ({} items):", report.orders.len());
    for line in &report.orders {
        println!(
            "  {:<16} {:<40} {:>12}",
            line.item.as_str(),
            line.name,
            format_quantity(line.total_quantity)
        );
    }
}

fn print_length_list(report: &OrderReport) {
    println!("\nLength list ({} items):", report.lengths.len());
    for line in &report.lengths {
        println!(
            "  {:<16} {:<40} {:>12} mm {:>10} m",
            line.item.as_str(),
            line.name,
            format_quantity(line.total_mm),
            format_quantity(line.total_m())
        );
    }
}

fn print_timing_summary(timing: &RunTimingSummary) {
    println!("\nTiming summary:");
    println!("  Load:    {:.3}s", timing.load_time_s);
    println!("  Build:   {:.3}s", timing.build_time_s);
    println!("  Explode: {:.3}s", timing.explode_time_s);
    if timing.save_time_s > 0.0 {
        println!("  Save:    {:.3}s", timing.save_time_s);
    }
    println!("  Total:   {:.3}s", timing.total_time_s);
}

fn cmd_trace(table_path: &Path, item: &str, config: Option<&Path>) -> AppResult<()> {
    let settings = load_settings(config, None)?;
    let response = explode_service::run_explode(&ExplodeRequest {
        table_path,
        settings: &settings,
        output_dir: None,
    })?;

    let paths = query::trace_item(&response.aggregation, item)?;
    println!("Paths to {} ({}):", item, paths.len());
    print_trace_paths(&paths);
    Ok(())
}

fn print_trace_paths(paths: &[TracePath]) {
    for p in paths {
        println!("{}", format_trace_line(p));
    }
}

fn format_trace_line(p: &TracePath) -> String {
    let quantity = match p.kind {
        EntryKind::Count => format_quantity(p.quantity),
        EntryKind::Length => format!("{} mm", format_quantity(p.quantity)),
    };
    format!("  {:>3}. {:<14} {}", p.number, quantity, p.path)
}

fn cmd_validate(table_path: &Path, config: Option<&Path>) -> AppResult<()> {
    println!("Validating BOM table: {}", table_path.display());
    let settings = load_settings(config, None)?;
    let rows = table_service::load_rows(table_path, &settings)?;
    let summary = table_service::summarize_table(rows, &settings)?;

    println!("✓ Table is valid");
    println!("  Rows:    {}", summary.row_count);
    println!("  Root:    {} {}", summary.root, summary.root_name);
    println!("  Items:   {}", summary.item_count);
    println!("  Parents: {}", summary.parent_count);
    println!(
        "  Classes: buy {}, make {}, phantom {}, unknown {}",
        summary.classes.buy, summary.classes.make, summary.classes.phantom, summary.classes.unknown
    );
    println!("  Length rows:   {}", summary.length_rows);
    println!("  Rejected rows: {}", summary.rejected_rows);
    Ok(())
}

fn cmd_reports(report_dir: &Path) -> AppResult<()> {
    let reports = explode_service::list_reports(report_dir)?;

    if reports.is_empty() {
        println!("No reports found in {}", report_dir.display());
    } else {
        println!("Reports in {}:", report_dir.display());
        for report in reports {
            println!(
                "  {} - {} {} ({} orders, {} lengths) - {}",
                report.report_id,
                report.root,
                report.root_name,
                report.orders.len(),
                report.lengths.len(),
                report.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_report(report_dir: &Path, report_id: &str, trace: Option<&str>) -> AppResult<()> {
    let report = explode_service::load_report(report_dir, report_id)?;

    println!("Report: {}", report.report_id);
    println!("  Root: {} {}", report.root, report.root_name);
    println!("  Generated: {}", report.timestamp);
    print_order_list(&report);
    print_length_list(&report);

    if let Some(item) = trace {
        let paths = query::trace_stored_item(report_dir, report_id, item)?;
        println!("\nPaths to {} ({}):", item, paths.len());
        print_trace_paths(&paths);
    }
    Ok(())
}

/// Whole numbers without decimals, others with up to 3.
fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.3}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

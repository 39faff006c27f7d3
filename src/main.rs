use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use u_station::allocator::{AllocatorConfig, StationAllocator, DEFAULT_THROUGHPUT_TARGET};
use u_station::io::{
    load_processes, write_allocation, write_text, GanttChart, SummaryReport,
    DEFAULT_WASTE_TOLERANCE,
};
use u_station::logging::init_logging;

/// Allocate production line processes to throughput-bounded stations
#[derive(Parser, Debug)]
#[command(name = "u-station", version)]
#[command(about = "Optimize production line station allocation", long_about = None)]
struct Cli {
    /// Path to the JSON file containing the process list
    json_file: PathBuf,

    /// Respect process dependencies (otherwise group by machine type only)
    #[arg(short = 'd', long)]
    respect_dependencies: bool,

    /// Maximum work per station in minutes
    #[arg(short = 't', long, default_value_t = DEFAULT_THROUGHPUT_TARGET)]
    throughput_target: f64,

    /// Waste time above which a station is flagged in the summary (minutes)
    #[arg(long, default_value_t = DEFAULT_WASTE_TOLERANCE)]
    max_waste_tolerance: f64,

    /// Fail when dependencies leave processes unallocated
    #[arg(long)]
    strict: bool,

    /// Allocation JSON output path
    #[arg(short, long, default_value = "station_allocation_output.json")]
    output: PathBuf,

    /// Summary report output path
    #[arg(long, default_value = "summary_report.txt")]
    summary: PathBuf,

    /// Gantt chart (SVG) output path
    #[arg(long, default_value = "station_allocation.svg")]
    chart: PathBuf,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: &Cli) -> Result<()> {
    let table = load_processes(&cli.json_file)
        .with_context(|| format!("Failed to load processes from {}", cli.json_file.display()))?;

    let config = AllocatorConfig::new()
        .with_respect_dependencies(cli.respect_dependencies)
        .with_throughput_target(cli.throughput_target)
        .with_strict(cli.strict);
    let allocation = StationAllocator::new(config)
        .allocate(&table)
        .context("Station allocation failed")?;

    write_allocation(&allocation, &cli.output)?;
    println!("Station allocation saved to {}", cli.output.display());

    let report = SummaryReport::new(&allocation).with_waste_tolerance(cli.max_waste_tolerance);
    write_text(&cli.summary, &report.to_string())?;
    println!("Summary report saved to {}", cli.summary.display());

    let chart = GanttChart::new(&allocation, &table);
    write_text(&cli.chart, &chart.render_svg())?;
    println!("Visualization saved to {}", cli.chart.display());

    info!(
        stations = report.summary().total_stations,
        waste = report.summary().total_waste_time,
        machines = report.summary().total_machines_required,
        "run complete"
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

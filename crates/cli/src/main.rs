use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{DataLoadError, NumericCoercion, SourceResolver, Table, DEFAULT_INPUT_FILE, PATH_ENV_VAR};
use pipeline::{
    build_report, filter, Bounds, CsvCache, DashboardReport, FilterCriteria, FilterOptions,
    EXPORT_FILE_NAME, EXPORT_MIME_TYPE,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// insurance-dash - Insurance charges analytics from the command line
#[derive(Parser)]
#[command(name = "insurance-dash")]
#[command(about = "Filter, summarize and export insurance charge tables", long_about = None)]
struct Cli {
    /// CSV file to analyze (defaults to $INS_ABS_PATH, then ./insurance.csv)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Fail on malformed numeric cells instead of dropping the row
    #[arg(long, global = true)]
    strict: bool,

    #[command(flatten)]
    filters: FilterArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Filter controls. Anything left unset selects the whole domain.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long, global = true)]
    age_min: Option<i64>,
    #[arg(long, global = true)]
    age_max: Option<i64>,
    #[arg(long, global = true)]
    bmi_min: Option<f64>,
    #[arg(long, global = true)]
    bmi_max: Option<f64>,
    #[arg(long, global = true)]
    children_min: Option<i64>,
    #[arg(long, global = true)]
    children_max: Option<i64>,

    /// Sexes to keep (comma separated, repeatable)
    #[arg(long, global = true, value_delimiter = ',')]
    sex: Vec<String>,
    /// Smoker statuses to keep (comma separated, repeatable)
    #[arg(long, global = true, value_delimiter = ',')]
    smoker: Vec<String>,
    /// Regions to keep (comma separated, repeatable)
    #[arg(long, global = true, value_delimiter = ',')]
    region: Vec<String>,

    /// Deselect every value of a field, keeping no records (comma separated)
    #[arg(long, global = true, value_enum, value_delimiter = ',')]
    none_of: Vec<CategoryField>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CategoryField {
    Sex,
    Smoker,
    Region,
}

#[derive(Subcommand)]
enum Commands {
    /// Show metrics, per-region averages, the smoker/region pivot and chart series
    Summary {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write the filtered records as CSV
    Export {
        /// Destination file
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// List the selectable range of every filter control
    Options {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let table = load_table(cli.input.clone(), cli.strict)?;
    let options = FilterOptions::from_table(&table);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Summary { format } => {
            let criteria = cli.filters.to_criteria(&options);
            handle_summary(&table, &criteria, format)?
        }
        Commands::Export { ref output } => {
            let criteria = cli.filters.to_criteria(&options);
            handle_export(&table, &criteria, output)?
        }
        Commands::Options { format } => handle_options(&options, format)?,
    }

    Ok(())
}

/// Resolve the input file and load it, turning the two caller-level
/// failures into actionable messages.
fn load_table(input: Option<PathBuf>, strict: bool) -> Result<Table> {
    let path = match SourceResolver::from_env().with_explicit(input).resolve() {
        Ok(path) => path,
        Err(err @ DataLoadError::EmptyInput { .. }) => {
            return Err(err).with_context(|| {
                format!(
                    "Pass --input, set {}, or place {} in the working directory",
                    PATH_ENV_VAR, DEFAULT_INPUT_FILE
                )
            });
        }
        Err(err) => return Err(err.into()),
    };

    let coercion = if strict {
        NumericCoercion::Strict
    } else {
        NumericCoercion::DropRow
    };

    let start = Instant::now();
    let table = Table::load(&path, coercion)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    tracing::debug!("Load took {:?}", start.elapsed());
    Ok(table)
}

impl FilterArgs {
    /// Overlay the explicit flags on the "everything selected" criteria.
    ///
    /// ## Algorithm
    /// 1. Start from every option selected
    /// 2. Replace each range bound that was given on the command line
    /// 3. Replace each selection that was given, trimming every value
    /// 4. Empty the selections named by `--none-of`
    fn to_criteria(&self, options: &FilterOptions) -> FilterCriteria {
        let mut criteria = FilterCriteria::select_all(options);

        criteria.age = overlay(criteria.age, self.age_min, self.age_max);
        criteria.bmi = overlay(criteria.bmi, self.bmi_min, self.bmi_max);
        criteria.children = overlay(criteria.children, self.children_min, self.children_max);

        if let Some(sexes) = selection(&self.sex) {
            criteria = criteria.with_sexes(sexes);
        }
        if let Some(smokers) = selection(&self.smoker) {
            criteria = criteria.with_smokers(smokers);
        }
        if let Some(regions) = selection(&self.region) {
            criteria = criteria.with_regions(regions);
        }

        for field in &self.none_of {
            match field {
                CategoryField::Sex => criteria.sexes.clear(),
                CategoryField::Smoker => criteria.smokers.clear(),
                CategoryField::Region => criteria.regions.clear(),
            }
        }
        criteria
    }
}

/// Trimmed, non-blank values of a list flag; `None` when nothing was given
fn selection(values: &[String]) -> Option<Vec<String>> {
    let values: Vec<String> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() { None } else { Some(values) }
}

fn overlay<T: PartialOrd + Copy>(bounds: Bounds<T>, min: Option<T>, max: Option<T>) -> Bounds<T> {
    Bounds::new(min.unwrap_or(bounds.min), max.unwrap_or(bounds.max))
}

/// Handle the 'summary' command
fn handle_summary(table: &Table, criteria: &FilterCriteria, format: OutputFormat) -> Result<()> {
    let report = build_report(table, criteria);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_report(&report),
    }
    Ok(())
}

/// Handle the 'export' command
fn handle_export(table: &Table, criteria: &FilterCriteria, output: &Path) -> Result<()> {
    let filtered = filter(table, criteria);
    let mut cache = CsvCache::new();
    let bytes = cache.get_or_encode(&filtered)?;
    std::fs::write(output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Wrote {} records to {} ({}, {} bytes)",
        "✓".green(),
        filtered.len(),
        output.display(),
        EXPORT_MIME_TYPE,
        bytes.len()
    );
    Ok(())
}

/// Handle the 'options' command
fn handle_options(options: &FilterOptions, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(options)?),
        OutputFormat::Text => {
            println!("{}", "Filter options:".bold().blue());
            println!("{}Age: {}", "• ".green(), describe_bounds(options.age));
            println!("{}BMI: {}", "• ".green(), describe_bounds(options.bmi));
            println!("{}Children: {}", "• ".green(), describe_bounds(options.children));
            println!("{}Sex: {}", "• ".cyan(), join(&options.sexes));
            println!("{}Smoker: {}", "• ".cyan(), join(&options.smokers));
            println!("{}Region: {}", "• ".cyan(), join(&options.regions));
        }
    }
    Ok(())
}

fn describe_bounds<T: std::fmt::Display>(bounds: Option<Bounds<T>>) -> String {
    match bounds {
        Some(b) => format!("{} to {}", b.min, b.max),
        None => "(no records)".to_string(),
    }
}

fn join<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Round for display, as the dashboard tables did
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Helper function to format and print a report
fn print_report(report: &DashboardReport) {
    let metrics = &report.metrics;
    println!("{}", "Key metrics (filtered):".bold().blue());
    println!("{}Records: {}", "• ".green(), metrics.count);
    println!("{}Avg charges: ${:.2}", "• ".green(), metrics.mean_charges);
    println!("{}Median charges: ${:.2}", "• ".green(), metrics.median_charges);
    println!("{}Smoker: {:.1}%", "• ".green(), metrics.smoker_rate * 100.0);

    if report.filtered.is_empty() {
        println!("\n{}", "No records match the current filters.".yellow());
        return;
    }

    println!("\n{}", "Average charges by region:".bold().blue());
    for (rank, region) in report.by_region.iter().enumerate() {
        println!(
            "{}. {:<12} {:>12.2} ({} records)",
            (rank + 1).to_string().green(),
            region.region,
            region.mean_charges,
            region.count
        );
    }

    println!("\n{}", "Avg charges by smoker & region:".bold().blue());
    for (region, by_smoker) in &report.pivot {
        let cells = by_smoker
            .iter()
            .map(|(smoker, mean)| format!("{}={}", smoker, round_to(*mean, 2)))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {:<12} {}", region, cells);
    }

    println!("\n{}", "Charges distribution:".bold().blue());
    let widest = report.histogram.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for bin in report.histogram.iter().filter(|b| b.count > 0) {
        let bar = "#".repeat((bin.count * 40).div_ceil(widest));
        println!("  {:>10.0} - {:<10.0} {:>5} {}", bin.start, bin.end, bin.count, bar.cyan());
    }

    if !report.trend.is_empty() {
        println!("\n{}", "Charges vs age trend:".bold().blue());
        for (smoker, fit) in &report.trend {
            println!(
                "  smoker={:<4} charges = {:.2} * age + {:.2} (n={})",
                smoker, fit.slope, fit.intercept, fit.count
            );
        }
    }
}

use std::io;

use anyhow::{Context, Result, bail};
use comfy_table::Table as Grid;
use tracing::{info, info_span, warn};

use tidy_ingest::{Loader, resolve_inputs};
use tidy_model::{ChartSpec, Renderer, SemanticType, Table};
use tidy_transform::{Aggregation, GroupKey, cast_column, group_by, value_counts};

use tidy_cli::config::{PipelineConfig, load_pipeline};
use tidy_cli::pipeline::{clean_file, output_path};
use tidy_cli::render::TerminalRenderer;
use tidy_cli::summary::{apply_table_style, profile_table};
use tidy_cli::types::CleanReport;

use crate::cli::{CleanArgs, InspectArgs, SummarizeArgs};

pub fn run_clean(args: &CleanArgs) -> Result<CleanReport> {
    let config = load_pipeline(args.pipeline.as_deref())?;
    if config.rules.is_empty() {
        warn!("pipeline has no rules; output will only be re-encoded");
    }

    let inputs = resolve_inputs(&args.input)
        .with_context(|| format!("resolve input {}", args.input.display()))?;
    if inputs.is_empty() {
        bail!("no CSV files found in {}", args.input.display());
    }
    let batch = args.input.is_dir();

    let _span = info_span!("clean", input = %args.input.display(), files = inputs.len()).entered();
    let mut report = CleanReport {
        dry_run: args.dry_run,
        ..CleanReport::default()
    };
    for input in &inputs {
        let target = output_path(input, args.output.as_deref(), batch);
        match clean_file(input, &config, &target, args.dry_run) {
            Ok(summary) => report.files.push(summary),
            Err(error) => {
                tracing::error!(path = %input.display(), error = %format!("{error:#}"), "file failed");
                report.errors.push(format!("{}: {error:#}", input.display()));
            }
        }
    }
    info!(
        files = report.files.len(),
        failed = report.errors.len(),
        "clean run complete"
    );
    Ok(report)
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let config = load_pipeline(args.pipeline.as_deref())?;
    let table = load_table(&config, args)?;

    println!(
        "{}: {} rows x {} columns",
        args.input.display(),
        table.row_count(),
        table.column_count()
    );

    match &args.column {
        Some(column) => {
            let counts = value_counts(&table, column)?;
            let nulls = table.null_count(column)?;
            println!("{}", counts_table(&counts.head(args.top)));
            if counts.row_count() > args.top {
                println!("... {} more values", counts.row_count() - args.top);
            }
            println!("null: {nulls}");
        }
        None => println!("{}", profile_table(&table)),
    }
    Ok(())
}

pub fn run_summarize(args: &SummarizeArgs) -> Result<()> {
    let config = load_pipeline(args.pipeline.as_deref())?;
    let table = config
        .loader()
        .load(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    let table = config
        .cleaner()
        .apply(&table)
        .with_context(|| format!("clean {}", args.input.display()))?;
    let table = prepare_for_grouping(table, args)?;

    let grouped = group_by(&table, &args.by, args.key, &args.value, args.agg)
        .with_context(|| format!("group {} by {}", args.value, args.by))?;

    let x = grouped
        .column_names()
        .first()
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| args.by.clone());
    let mut spec = ChartSpec::new(args.chart.into(), x, args.value.clone())
        .with_axis_labels(axis_label(args), format!("{} of {}", args.agg, args.value));
    if let Some(title) = &args.title {
        spec = spec.with_title(title.clone());
    }

    let mut renderer = TerminalRenderer::new(io::stdout().lock());
    renderer.render(&grouped, &spec).context("render chart")?;
    Ok(())
}

fn load_table(config: &PipelineConfig, args: &InspectArgs) -> Result<Table> {
    let table = config
        .loader()
        .load(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    if args.clean {
        return config
            .cleaner()
            .apply(&table)
            .with_context(|| format!("clean {}", args.input.display()));
    }
    Ok(table)
}

/// Cast text columns so that grouping can use them.
///
/// Temporal keys need a datetime `by` column and numeric aggregations a
/// float `value` column; unparseable cells become null.
fn prepare_for_grouping(mut table: Table, args: &SummarizeArgs) -> Result<Table> {
    if args.key != GroupKey::Column && table.column(&args.by)?.dtype() == SemanticType::String {
        table = cast_column(&table, &args.by, SemanticType::DateTime, true)?;
    }
    let needs_numbers = args.agg != Aggregation::Count;
    if needs_numbers && table.column(&args.value)?.dtype() == SemanticType::String {
        table = cast_column(&table, &args.value, SemanticType::Float, true)?;
    }
    Ok(table)
}

fn axis_label(args: &SummarizeArgs) -> String {
    match args.key {
        GroupKey::Column => args.by.clone(),
        key => format!("{key} of {}", args.by),
    }
}

fn counts_table(counts: &Table) -> Grid {
    let mut grid = Grid::new();
    grid.set_header(counts.column_names());
    apply_table_style(&mut grid);
    for row in 0..counts.row_count() {
        let cells: Vec<String> = counts
            .row(row)
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect();
        grid.add_row(cells);
    }
    grid
}

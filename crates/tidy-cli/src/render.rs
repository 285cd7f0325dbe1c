//! Terminal chart renderer.
//!
//! Draws an aggregated table as a comfy-table with one row per x value and
//! a bar (or, for line charts, a marker) scaled to the y value.

use std::io::{self, Write};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table as Grid};
use thiserror::Error;
use tidy_model::{ChartKind, ChartSpec, ModelError, Renderer, Table, Value, format_numeric};

/// Default width of the bar column, in characters.
pub const DEFAULT_BAR_WIDTH: usize = 40;

const BAR: char = '█';
const MARKER: char = '●';

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid chart: {0}")]
    Chart(#[from] ModelError),
    #[error("failed to write chart: {0}")]
    Io(#[from] io::Error),
}

/// One plotted row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub label: String,
    pub value: String,
    pub bar: String,
}

/// Compute the plotted rows for `table` under `spec`.
///
/// Bars are scaled so the largest magnitude fills `width`. Line markers
/// are placed between the minimum and maximum. Null y values get an
/// empty bar.
pub fn chart_rows(table: &Table, spec: &ChartSpec, width: usize) -> Result<Vec<ChartRow>, RenderError> {
    spec.validate(table)?;
    let xs = table.column(&spec.x)?.values();
    let ys: Vec<Option<f64>> = table.column(&spec.y)?.values().iter().map(Value::as_f64).collect();

    let present = ys.iter().flatten().copied();
    let min = present.clone().fold(f64::INFINITY, f64::min);
    let max = present.clone().fold(f64::NEG_INFINITY, f64::max);
    let magnitude = present.map(f64::abs).fold(0.0, f64::max);

    let rows = xs
        .iter()
        .zip(table.column(&spec.y)?.values())
        .zip(&ys)
        .map(|((x, y), number)| {
            let bar = match (spec.kind, number) {
                (_, None) => String::new(),
                (ChartKind::Bar, Some(v)) => BAR.to_string().repeat(scale(v.abs(), magnitude, width)),
                (ChartKind::Line, Some(v)) => {
                    let offset = if max > min {
                        scale(v - min, max - min, width.saturating_sub(1))
                    } else {
                        0
                    };
                    format!("{}{MARKER}", " ".repeat(offset))
                }
            };
            ChartRow {
                label: display(x),
                value: display(y),
                bar,
            }
        })
        .collect();
    Ok(rows)
}

fn scale(value: f64, full: f64, width: usize) -> usize {
    if full <= 0.0 || !value.is_finite() {
        return 0;
    }
    ((value / full) * width as f64).round().clamp(0.0, width as f64) as usize
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Float(f) => format_numeric((f * 1000.0).round() / 1000.0),
        other => other.to_string(),
    }
}

/// Writes charts as tables to any writer.
pub struct TerminalRenderer<W: Write> {
    out: W,
    bar_width: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    #[must_use]
    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = RenderError;

    fn render(&mut self, table: &Table, spec: &ChartSpec) -> Result<(), Self::Error> {
        let rows = chart_rows(table, spec, self.bar_width)?;

        let mut grid = Grid::new();
        grid.load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(vec![
                header_cell(spec.x_label()),
                header_cell(spec.y_label()),
                header_cell(""),
            ]);
        for row in rows {
            grid.add_row(vec![
                Cell::new(row.label),
                Cell::new(row.value).set_alignment(CellAlignment::Right),
                Cell::new(row.bar).fg(Color::Green),
            ]);
        }

        if let Some(title) = &spec.title {
            writeln!(self.out, "{title}")?;
        }
        writeln!(self.out, "{grid}")?;
        tracing::debug!(x = %spec.x, y = %spec.y, rows = table.row_count(), "rendered chart");
        Ok(())
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table as Grid};

use tidy_model::Table;

use crate::types::CleanReport;

/// Unique values listed per column in a profile.
const SAMPLE_VALUES: usize = 5;

pub fn print_clean_summary(report: &CleanReport) {
    if report.dry_run {
        println!("Dry run: no files written");
    }
    println!("{}", clean_summary_table(report));
    if report.has_errors() {
        eprintln!("Errors:");
        for error in &report.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn clean_summary_table(report: &CleanReport) -> Grid {
    let mut table = Grid::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Rejected"),
        header_cell("Columns"),
        header_cell("Nulls"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    for column in 1..=5 {
        align_column(&mut table, column, CellAlignment::Right);
    }

    let mut total_in = 0usize;
    let mut total_out = 0usize;
    let mut total_rejected = 0usize;
    for file in &report.files {
        total_in += file.rows_in;
        total_out += file.rows_out;
        total_rejected += file.rows_rejected;
        let name = file
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.input.display().to_string());
        let output = match &file.output {
            Some(path) => Cell::new(path.display()),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(file.rows_in),
            Cell::new(file.rows_out),
            count_cell(file.rows_rejected, Color::Yellow),
            Cell::new(format!("{} -> {}", file.columns_in, file.columns_out)),
            Cell::new(file.nulls_out),
            output,
        ]);
    }
    if report.files.len() > 1 {
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(total_in).add_attribute(Attribute::Bold),
            Cell::new(total_out).add_attribute(Attribute::Bold),
            count_cell(total_rejected, Color::Yellow).add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    table
}

/// One row per column: type, null count, distinct values and a sample.
pub fn profile_table(table: &Table) -> Grid {
    let mut grid = Grid::new();
    grid.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Nulls"),
        header_cell("Unique"),
        header_cell("Sample"),
    ]);
    apply_table_style(&mut grid);
    align_column(&mut grid, 2, CellAlignment::Right);
    align_column(&mut grid, 3, CellAlignment::Right);

    for column in table.columns() {
        let unique = table.unique(column.name()).unwrap_or_default();
        let sample: Vec<String> = unique
            .iter()
            .filter(|v| !v.is_null())
            .take(SAMPLE_VALUES)
            .map(|v| format!("{:?}", v.to_string()))
            .collect();
        grid.add_row(vec![
            Cell::new(column.name()).fg(Color::Blue),
            Cell::new(column.dtype()),
            count_cell(column.null_count(), Color::Yellow),
            Cell::new(unique.len()),
            Cell::new(sample.join(", ")),
        ]);
    }
    grid
}

pub fn apply_table_style(table: &mut Grid) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Grid, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tidy_model::Column;

    use super::*;
    use crate::types::FileSummary;

    #[test]
    fn test_profile_lists_every_column() {
        let table = Table::new(vec![
            Column::from_strings("Incident Zip", [Some("10001"), None, Some("10001")]),
            Column::from_integers("requests", [Some(1), Some(2), Some(3)]),
        ])
        .unwrap();
        let grid = profile_table(&table);
        assert_eq!(grid.row_count(), 2);
        let text = grid.to_string();
        assert!(text.contains("Incident Zip"));
        assert!(text.contains("\"10001\""));
        assert!(text.contains("integer"));
    }

    #[test]
    fn test_total_row_only_for_batches() {
        let file = FileSummary {
            input: PathBuf::from("data/311.csv"),
            rows_in: 5,
            columns_in: 3,
            rows_out: 4,
            columns_out: 3,
            nulls_out: 2,
            rows_rejected: 1,
            output: None,
            rejected_output: None,
        };
        let mut report = CleanReport {
            files: vec![file.clone()],
            ..CleanReport::default()
        };
        assert_eq!(clean_summary_table(&report).row_count(), 1);
        report.files.push(file);
        assert_eq!(clean_summary_table(&report).row_count(), 3);
    }
}

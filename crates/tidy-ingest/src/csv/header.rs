//! CSV header parsing.

/// Column names found on the first line of a CSV source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Raw column names, untrimmed so that `"Borough "` and `"Borough"` stay distinct.
    pub columns: Vec<String>,
    /// Whether the line was a header (false means names were generated).
    pub has_header: bool,
}

impl CsvHeaders {
    /// Headers taken from the first line.
    pub fn named(columns: Vec<String>) -> Self {
        Self {
            columns,
            has_header: true,
        }
    }

    /// Generated `column_1..column_n` names for headerless input.
    pub fn generated(count: usize) -> Self {
        Self {
            columns: (1..=count).map(|i| format!("column_{i}")).collect(),
            has_header: false,
        }
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of the first blank column name.
    pub fn first_blank(&self) -> Option<usize> {
        self.columns.iter().position(|c| c.trim().is_empty())
    }
}

/// Parses a CSV line into fields, handling quoted values.
///
/// A quote only opens a quoted field at the start of the field; a stray quote
/// in the middle (as in `ï»¿"Longitude (x)"`) is kept as a literal character,
/// matching how the Polars reader treats it.
pub fn parse_csv_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes && current.is_empty() => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            c if c == delimiter && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            '\r' if !in_quotes && chars.peek().is_none() => {}
            _ => {
                current.push(c);
            }
        }
    }

    // Don't forget the last field
    fields.push(current);
    fields
}

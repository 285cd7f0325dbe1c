//! Declarative chart descriptions and the renderer seam.
//!
//! The cleaning crates never draw anything. A caller hands an (usually
//! aggregated) [`Table`] and a [`ChartSpec`] to whatever [`Renderer`] it has.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::table::Table;

/// Chart kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

/// What to plot: x and y columns plus labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default)]
    pub kind: ChartKind,
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub x_label: Option<String>,
    #[serde(default)]
    pub y_label: Option<String>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            kind,
            x: x.into(),
            y: y.into(),
            title: None,
            x_label: None,
            y_label: None,
        }
    }

    pub fn bar(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::new(ChartKind::Bar, x, y)
    }

    pub fn line(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::new(ChartKind::Line, x, y)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    /// Axis label for x, falling back to the column name.
    pub fn x_label(&self) -> &str {
        self.x_label.as_deref().unwrap_or(&self.x)
    }

    /// Axis label for y, falling back to the column name.
    pub fn y_label(&self) -> &str {
        self.y_label.as_deref().unwrap_or(&self.y)
    }

    /// Check that both columns exist and that y is numeric.
    pub fn validate(&self, table: &Table) -> Result<()> {
        table.column(&self.x)?;
        let y = table.column(&self.y)?;
        if !y.dtype().is_numeric() {
            return Err(ModelError::SchemaMismatch {
                reason: format!("chart y column '{}' is {}, not numeric", self.y, y.dtype()),
            });
        }
        Ok(())
    }
}

/// Consumer of a table plus chart description.
pub trait Renderer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn render(&mut self, table: &Table, spec: &ChartSpec) -> std::result::Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_validate_requires_numeric_y() {
        let table = Table::new(vec![
            Column::from_strings("hour", [Some("1"), Some("2")]),
            Column::from_floats("temperature_c", [Some(-1.5), Some(0.5)]),
        ])
        .unwrap();

        assert!(ChartSpec::line("hour", "temperature_c").validate(&table).is_ok());
        assert!(matches!(
            ChartSpec::bar("temperature_c", "hour").validate(&table),
            Err(ModelError::SchemaMismatch { .. })
        ));
        assert!(matches!(
            ChartSpec::bar("hour", "median").validate(&table),
            Err(ModelError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_labels_fall_back_to_columns() {
        let spec = ChartSpec::bar("month", "snowiness");
        assert_eq!(spec.x_label(), "month");
        let spec = spec.with_axis_labels("Month", "Share of hours with snow");
        assert_eq!(spec.y_label(), "Share of hours with snow");
    }

    #[test]
    fn test_deserialize_defaults_to_bar() {
        let spec: ChartSpec = serde_json::from_str(r#"{"x": "City", "y": "count"}"#).unwrap();
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.title, None);
    }
}

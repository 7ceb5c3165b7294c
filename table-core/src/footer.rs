//! Summary (footer) row.
//!
//! The default summary adds up each column numerically. Values are coerced
//! to numbers the way a JavaScript `Number()` call would, and the running
//! sum is rounded to the largest number of decimals seen in the column
//! (capped at 20) so that `0.1 + 0.2` sums to `0.3`.

use std::fmt;
use std::sync::Arc;

use crate::column::{Alignment, Column, FixedColumns, leaf_count};
use crate::layout::{FixedLayout, FixedPosition};
use crate::options::{TableLayout, TableOptions};
use crate::value::{Value, format_js_number};

/// Upper bound on the decimals kept while summing.
pub const MAX_PRECISION: usize = 20;

/// Content of one summary cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryCell {
    Text(String),
    Number(f64),
    Empty,
}

impl fmt::Display for SummaryCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryCell::Text(text) => f.write_str(text),
            SummaryCell::Number(n) => f.write_str(&format_js_number(*n)),
            SummaryCell::Empty => Ok(()),
        }
    }
}

/// Custom summary: receives the leaf columns and all rows, returns one cell
/// per column.
pub type SummaryMethod = Arc<dyn Fn(&[Column], &[Value]) -> Vec<SummaryCell> + Send + Sync>;

/// Coerce a value to a number like JavaScript's `Number()`.
///
/// Missing values and non-numeric strings give `NaN`; `null` and `""` give 0.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => string_to_number(s),
        Some(Value::Array(items)) => match items.as_slice() {
            [] | [Value::Null] => 0.0,
            [single @ (Value::Number(_) | Value::String(_) | Value::Array(_))] => {
                to_number(Some(single))
            }
            _ => f64::NAN,
        },
        Some(Value::Object(_)) => f64::NAN,
    }
}

fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).map_or(f64::NAN, |n| n as f64);
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let numeric = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// Number of digits after the decimal point in the number's string form.
///
/// Exponent forms count everything after the point: `1.5e-7` has 4.
pub fn decimal_places(n: f64) -> usize {
    format_js_number(n)
        .split('.')
        .nth(1)
        .map_or(0, str::len)
}

/// Round to `digits` decimals by formatting and re-parsing.
fn round_to(n: f64, digits: usize) -> f64 {
    if !n.is_finite() || n.abs() >= 1e21 {
        return n;
    }
    format!("{:.*}", digits, n).parse().unwrap_or(n)
}

/// Sum a column's values with precision matching.
///
/// Returns `None` when no value in the column is numeric.
pub fn sum_column(rows: &[Value], property: Option<&str>) -> Option<f64> {
    let values: Vec<f64> = rows
        .iter()
        .map(|row| to_number(property.and_then(|p| row.get(p))))
        .filter(|v| !v.is_nan())
        .collect();
    if values.is_empty() {
        return None;
    }

    let precision = values
        .iter()
        .map(|v| decimal_places(*v))
        .max()
        .unwrap_or(0)
        .min(MAX_PRECISION);

    Some(values.iter().fold(0.0, |sum, v| round_to(sum + v, precision)))
}

/// Default summary: `sum_text` in the first cell, column sums elsewhere.
pub fn compute_sums(columns: &[Column], rows: &[Value], sum_text: &str) -> Vec<SummaryCell> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            if index == 0 {
                return SummaryCell::Text(sum_text.to_string());
            }
            match sum_column(rows, column.property.as_deref()) {
                Some(sum) => SummaryCell::Number(sum),
                None => SummaryCell::Empty,
            }
        })
        .collect()
}

/// Which copy of the footer is being built.
///
/// Fixed columns are drawn by overlay panes; the main pane hides them and
/// each overlay hides everything it does not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Main,
    Left,
    Right,
}

/// Column counts the pane visibility rules depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedCounts {
    /// Leaf columns in the table
    pub columns: usize,
    /// Top-level left-fixed columns
    pub left: usize,
    /// Top-level right-fixed columns
    pub right: usize,
    pub left_leaf: usize,
    pub right_leaf: usize,
}

impl FixedCounts {
    /// Counts for a column forest.
    pub fn from_columns(columns: &[Column]) -> Self {
        let split = FixedColumns::split(columns);
        Self {
            columns: leaf_count(columns),
            left: split.left.len(),
            right: split.right.len(),
            left_leaf: split.left_leaf_count(),
            right_leaf: split.right_leaf_count(),
        }
    }
}

/// Whether the cell at `index` is hidden in `pane`.
pub fn is_cell_hidden(
    pane: Pane,
    index: usize,
    columns: &[Column],
    column: &Column,
    counts: &FixedCounts,
) -> bool {
    match pane {
        Pane::Left => index >= counts.left_leaf,
        Pane::Right => {
            let before: usize = columns.iter().take(index).map(|c| c.col_span as usize).sum();
            before < counts.columns.saturating_sub(counts.right_leaf)
        }
        Pane::Main if column.is_fixed() => true,
        Pane::Main => index < counts.left || index >= counts.columns.saturating_sub(counts.right),
    }
}

/// One cell of the summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct FooterCell {
    pub column_id: String,
    pub col_span: u32,
    pub row_span: u32,
    pub align: Alignment,
    pub class_name: Option<String>,
    pub label_class_name: Option<String>,
    pub content: SummaryCell,
    /// Sticky position for fixed columns
    pub position: Option<FixedPosition>,
    pub is_fixed: bool,
    pub is_leaf: bool,
    pub hidden: bool,
}

/// The summary row of one pane.
#[derive(Debug, Clone, PartialEq)]
pub struct FooterRow {
    pub cells: Vec<FooterCell>,
    /// Whether a trailing gutter cell pads the row under the scrollbar
    pub has_gutter: bool,
}

/// Builds a [`FooterRow`] from leaf columns and rows.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use table_core::{Column, FooterBuilder, SummaryCell};
///
/// let columns = vec![
///     Column::new("Name").id("name").property("name"),
///     Column::new("Amount").id("amount").property("amount"),
/// ];
/// let rows = vec![json!({"name": "a", "amount": 0.1}), json!({"name": "b", "amount": 0.2})];
///
/// let footer = FooterBuilder::new(&columns, &rows).build();
/// assert_eq!(footer.cells[0].content, SummaryCell::Text("Sum".into()));
/// assert_eq!(footer.cells[1].content, SummaryCell::Number(0.3));
/// ```
pub struct FooterBuilder<'a> {
    columns: &'a [Column],
    rows: &'a [Value],
    sum_text: String,
    summary_method: Option<SummaryMethod>,
    pane: Pane,
    fixed: Option<&'a FixedLayout>,
    counts: Option<FixedCounts>,
    layout: TableLayout,
}

impl<'a> FooterBuilder<'a> {
    pub fn new(columns: &'a [Column], rows: &'a [Value]) -> Self {
        Self {
            columns,
            rows,
            sum_text: TableOptions::default().sum_text,
            summary_method: None,
            pane: Pane::Main,
            fixed: None,
            counts: None,
            layout: TableLayout::default(),
        }
    }

    /// Take sum text and layout from table options.
    pub fn options(mut self, options: &TableOptions) -> Self {
        self.sum_text = options.sum_text.clone();
        self.layout = options.layout;
        self
    }

    pub fn sum_text(mut self, text: impl Into<String>) -> Self {
        self.sum_text = text.into();
        self
    }

    /// Replace the default summation.
    pub fn summary_method<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Column], &[Value]) -> Vec<SummaryCell> + Send + Sync + 'static,
    {
        self.summary_method = Some(Arc::new(f));
        self
    }

    pub fn pane(mut self, pane: Pane) -> Self {
        self.pane = pane;
        self
    }

    /// Offsets used to position fixed cells. Right-fixed cells use the
    /// unpatched body offsets.
    pub fn fixed_layout(mut self, layout: &'a FixedLayout) -> Self {
        self.fixed = Some(layout);
        self
    }

    /// Fixed column counts, computed from the leaf columns when not given.
    pub fn counts(mut self, counts: FixedCounts) -> Self {
        self.counts = Some(counts);
        self
    }

    pub fn layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn build(self) -> FooterRow {
        let sums = match &self.summary_method {
            Some(method) => method(self.columns, self.rows),
            None => compute_sums(self.columns, self.rows, &self.sum_text),
        };
        let counts = self
            .counts
            .unwrap_or_else(|| FixedCounts::from_columns(self.columns));

        let cells: Vec<FooterCell> = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let position = self.fixed.and_then(|f| f.body_position(&column.id));
                FooterCell {
                    column_id: column.id.clone(),
                    col_span: column.col_span,
                    row_span: column.row_span,
                    align: column.align,
                    class_name: column.class_name.clone(),
                    label_class_name: column.label_class_name.clone(),
                    content: sums.get(index).cloned().unwrap_or(SummaryCell::Empty),
                    position,
                    is_fixed: position.is_some(),
                    is_leaf: column.is_leaf(),
                    hidden: is_cell_hidden(self.pane, index, self.columns, column, &counts),
                }
            })
            .collect();

        let has_gutter = self.pane == Pane::Main && self.layout.gutter_width > 0.0;

        log::debug!(
            "[footer] {:?} pane: {} cells over {} rows, gutter: {}",
            self.pane,
            cells.len(),
            self.rows.len(),
            has_gutter
        );

        FooterRow { cells, has_gutter }
    }
}

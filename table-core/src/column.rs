//! Column definitions and column lookup helpers.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Minimum column width used when a configured minimum cannot be parsed.
pub const DEFAULT_MIN_WIDTH: f32 = 80.0;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Which edge of the scrollable table a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedSide {
    #[default]
    None,
    Left,
    Right,
}

fn next_column_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(1);
    format!("table_column_{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Column configuration.
///
/// Columns form a tree: a column with children is a header group whose
/// leaves are the columns that actually hold cells.
///
/// # Examples
///
/// ```
/// use table_core::{Column, FixedSide};
///
/// let columns = vec![
///     Column::new("Name").id("name").width(120.0).fixed(FixedSide::Left),
///     Column::new("Address")
///         .id("address")
///         .child(Column::new("City").id("city").width(80.0))
///         .child(Column::new("Zip").id("zip").width(60.0)),
/// ];
/// assert!(columns[1].has_children());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Column {
    /// Unique column identifier
    pub id: String,
    /// Header text
    pub label: String,
    /// Row field displayed in this column
    pub property: Option<String>,
    /// Caller-defined key used to look the column up
    pub column_key: Option<String>,
    /// Configured width in pixels
    pub width: Option<f32>,
    /// Width the column was actually laid out with
    pub real_width: Option<f32>,
    /// Minimum width in pixels
    pub min_width: Option<f32>,
    /// Fixed edge, if any
    pub fixed: FixedSide,
    /// Horizontal alignment
    pub align: Alignment,
    pub class_name: Option<String>,
    pub label_class_name: Option<String>,
    pub col_span: u32,
    pub row_span: u32,
    /// Nested columns (header group)
    pub children: Vec<Column>,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            id: next_column_id(),
            label: String::new(),
            property: None,
            column_key: None,
            width: None,
            real_width: None,
            min_width: None,
            fixed: FixedSide::None,
            align: Alignment::Left,
            class_name: None,
            label_class_name: None,
            col_span: 1,
            row_span: 1,
            children: Vec::new(),
        }
    }
}

impl Column {
    /// Create a new column with a generated id.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the column id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the row field shown in this column.
    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn column_key(mut self, key: impl Into<String>) -> Self {
        self.column_key = Some(key.into());
        self
    }

    /// Set the configured width.
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the realized (laid out) width.
    pub fn real_width(mut self, width: f32) -> Self {
        self.real_width = Some(width);
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Pin the column to an edge.
    pub fn fixed(mut self, side: FixedSide) -> Self {
        self.fixed = side;
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn label_class_name(mut self, class: impl Into<String>) -> Self {
        self.label_class_name = Some(class.into());
        self
    }

    pub fn spans(mut self, col_span: u32, row_span: u32) -> Self {
        self.col_span = col_span;
        self.row_span = row_span;
        self
    }

    /// Append a nested column.
    pub fn child(mut self, column: Column) -> Self {
        self.children.push(column);
        self
    }

    /// Whether this column groups other columns.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this column holds cells (has no children).
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this column is pinned to either edge.
    pub fn is_fixed(&self) -> bool {
        self.fixed != FixedSide::None
    }

    /// Width used for layout: realized width, then configured width, then 0.
    ///
    /// Non-finite and negative widths count as 0.
    pub fn effective_width(&self) -> f32 {
        let width = self.real_width.or(self.width).unwrap_or(0.0);
        if width.is_finite() && width > 0.0 {
            width
        } else {
            0.0
        }
    }
}

/// Top-level columns grouped by fixed side, each group in table order.
#[derive(Debug, Clone, Default)]
pub struct FixedColumns {
    pub left: Vec<Column>,
    pub main: Vec<Column>,
    pub right: Vec<Column>,
}

impl FixedColumns {
    pub fn split(columns: &[Column]) -> Self {
        let mut split = Self::default();
        for column in columns {
            match column.fixed {
                FixedSide::Left => split.left.push(column.clone()),
                FixedSide::None => split.main.push(column.clone()),
                FixedSide::Right => split.right.push(column.clone()),
            }
        }
        split
    }

    /// Number of leaf columns pinned to the left.
    pub fn left_leaf_count(&self) -> usize {
        leaf_count(&self.left)
    }

    /// Number of leaf columns pinned to the right.
    pub fn right_leaf_count(&self) -> usize {
        leaf_count(&self.right)
    }
}

/// Count the leaf columns in a column forest.
pub fn leaf_count(columns: &[Column]) -> usize {
    columns
        .iter()
        .map(|c| if c.is_leaf() { 1 } else { leaf_count(&c.children) })
        .sum()
}

/// Collect the leaf columns of a forest in display order.
pub fn flatten_leaves(columns: &[Column]) -> Vec<&Column> {
    let mut leaves = Vec::new();
    collect_leaves(columns, &mut leaves);
    leaves
}

fn collect_leaves<'a>(columns: &'a [Column], out: &mut Vec<&'a Column>) {
    for column in columns {
        if column.is_leaf() {
            out.push(column);
        } else {
            collect_leaves(&column.children, out);
        }
    }
}

/// Find a top-level column by id. When ids repeat, the last one wins.
pub fn get_column_by_id<'a>(columns: &'a [Column], id: &str) -> Option<&'a Column> {
    columns.iter().rev().find(|c| c.id == id)
}

/// Find the first top-level column with the given column key.
pub fn get_column_by_key<'a>(columns: &'a [Column], key: &str) -> Option<&'a Column> {
    columns
        .iter()
        .find(|c| c.column_key.as_deref() == Some(key))
}

/// Parse a width the way an integer-prefix parser would: `"120px"` is 120.
///
/// Returns `None` when the input has no leading digits.
pub fn parse_width(input: &str) -> Option<f32> {
    let trimmed = input.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    rest[..digits_end].parse::<f32>().ok().map(|w| sign * w)
}

/// Parse a minimum width, falling back to [`DEFAULT_MIN_WIDTH`].
pub fn parse_min_width(input: &str) -> f32 {
    parse_width(input).unwrap_or(DEFAULT_MIN_WIDTH)
}

/// A table height: either a pixel count or a CSS expression kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Height {
    Pixels(f32),
    Css(String),
}

static PIXEL_HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:px)?$").expect("Invalid regex pattern"));

/// Interpret a configured height.
pub fn parse_height(value: &Value) -> Option<Height> {
    match value {
        Value::Number(n) => n.as_f64().map(|h| Height::Pixels(h as f32)),
        Value::String(s) if PIXEL_HEIGHT.is_match(s) => parse_width(s).map(Height::Pixels),
        Value::String(s) => Some(Height::Css(s.clone())),
        _ => None,
    }
}

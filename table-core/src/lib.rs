//! Data helpers for a table widget.
//!
//! Everything here maps plain data to plain data: fixed-column offsets,
//! stable multi-key sorting, row identity indices, tree traversal and the
//! summary row. Binding the results to a renderer is left to the caller.

pub mod column;
pub mod error;
pub mod footer;
pub mod identity;
pub mod layout;
pub mod options;
pub mod sort;
pub mod status;
pub mod tree;
pub mod value;

pub use column::{Alignment, Column, FixedColumns, FixedSide, Height};
pub use error::{Result, TableError};
pub use footer::{FooterBuilder, FooterCell, FooterRow, Pane, SummaryCell};
pub use identity::{KeyedRow, KeysMap, RowKey, get_keys_map, get_row_identity};
pub use layout::{FixedLayout, FixedOffsets, FixedPosition, compute_fixed_offsets};
pub use options::{DefaultSort, TableLayout, TableOptions};
pub use sort::{KeySelector, SortDirection, SortOptions, order_by, stable_sort_by_key};
pub use status::toggle_row_status;
pub use tree::{TreeProps, walk_tree};
pub use value::{KeyPath, Value, get_value_by_path};

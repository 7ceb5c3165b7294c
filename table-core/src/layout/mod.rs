//! Positioning of columns pinned to the table edges.

mod fixed;

pub use fixed::{FixedOffsets, compute_fixed_offsets, compute_fixed_offsets_from};

use crate::column::FixedColumns;
use crate::error::{Result, TableError};
use crate::options::TableLayout;

/// Where a fixed cell sits, in pixels from the edge it is pinned to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixedPosition {
    Left(f32),
    Right(f32),
}

/// Offsets for both fixed sides of a table.
///
/// Header rows use the right-side offsets in `right`, which leave room for
/// the vertical scrollbar gutter. Body and footer rows use `body_right`,
/// which starts at the table edge.
#[derive(Debug, Clone, Default)]
pub struct FixedLayout {
    pub left: FixedOffsets,
    pub right: FixedOffsets,
    pub body_right: FixedOffsets,
    /// Extra right offset reserved for the scrollbar gutter
    pub right_patch_width: f32,
}

impl FixedLayout {
    /// Compute fixed offsets for a split set of columns.
    ///
    /// Fails when the table has not been laid out yet.
    pub fn compute(columns: &FixedColumns, layout: Option<&TableLayout>) -> Result<Self> {
        let layout = layout.ok_or(TableError::MissingLayout)?;

        let right_patch_width = if columns.right.is_empty() || !layout.scroll_y {
            0.0
        } else {
            layout.gutter_width
        };

        Ok(Self {
            left: compute_fixed_offsets(&columns.left, false),
            right: compute_fixed_offsets_from(&columns.right, true, right_patch_width),
            body_right: compute_fixed_offsets(&columns.right, true),
            right_patch_width,
        })
    }

    /// Position of a header cell. Left offsets take precedence.
    pub fn position(&self, column_id: &str) -> Option<FixedPosition> {
        Self::lookup(&self.left, &self.right, column_id)
    }

    /// Position of a body or footer cell.
    pub fn body_position(&self, column_id: &str) -> Option<FixedPosition> {
        Self::lookup(&self.left, &self.body_right, column_id)
    }

    pub fn is_fixed(&self, column_id: &str) -> bool {
        self.left.contains(column_id) || self.right.contains(column_id)
    }

    fn lookup(left: &FixedOffsets, right: &FixedOffsets, id: &str) -> Option<FixedPosition> {
        left.get(id)
            .map(FixedPosition::Left)
            .or_else(|| right.get(id).map(FixedPosition::Right))
    }
}

use std::collections::HashMap;
use std::collections::hash_map;

use crate::column::Column;

/// Offsets of fixed columns, keyed by column id.
///
/// Each offset is the distance in pixels from the fixed edge of the table to
/// the near edge of the column. Header groups share the offset of the first
/// leaf visited beneath them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedOffsets {
    offsets: HashMap<String, f32>,
    extent: f32,
}

impl FixedOffsets {
    /// Offset of the column with the given id.
    pub fn get(&self, id: &str) -> Option<f32> {
        self.offsets.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.offsets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Running offset after the last leaf, i.e. the start offset plus the
    /// width of every leaf.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, f32> {
        self.offsets.iter()
    }

    pub fn into_map(self) -> HashMap<String, f32> {
        self.offsets
    }
}

/// Compute offsets for a forest of fixed columns, starting at 0.
///
/// Columns are visited depth-first, pre-order. With `reverse` set, every
/// level is visited back to front, which yields offsets measured from the
/// right edge.
pub fn compute_fixed_offsets(columns: &[Column], reverse: bool) -> FixedOffsets {
    compute_fixed_offsets_from(columns, reverse, 0.0)
}

/// Like [`compute_fixed_offsets`], with the running offset starting at `start`.
pub fn compute_fixed_offsets_from(columns: &[Column], reverse: bool, start: f32) -> FixedOffsets {
    let mut acc = FixedOffsets {
        offsets: HashMap::with_capacity(columns.len()),
        extent: start,
    };
    visit_level(columns, reverse, &mut acc);

    log::debug!(
        "[fixed] {} offsets computed (reverse: {}), extent {}",
        acc.offsets.len(),
        reverse,
        acc.extent
    );
    acc
}

fn visit_level(columns: &[Column], reverse: bool, acc: &mut FixedOffsets) {
    if reverse {
        columns.iter().rev().for_each(|c| visit(c, reverse, acc));
    } else {
        columns.iter().for_each(|c| visit(c, reverse, acc));
    }
}

fn visit(column: &Column, reverse: bool, acc: &mut FixedOffsets) {
    acc.offsets.insert(column.id.clone(), acc.extent);
    if column.is_leaf() {
        acc.extent += column.effective_width();
    } else {
        visit_level(&column.children, reverse, acc);
    }
}

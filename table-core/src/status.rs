//! Membership lists for row status (selection, expansion).

/// Toggle whether `row` is in `status`, mutating the list in place.
///
/// `Some(true)` adds the row if absent, `Some(false)` removes it if present,
/// and `None` flips membership. Returns whether the list changed.
pub fn toggle_row_status<T>(status: &mut Vec<T>, row: &T, new_value: Option<bool>) -> bool
where
    T: PartialEq + Clone,
{
    let position = status.iter().position(|r| r == row);

    match (new_value, position) {
        (Some(true), Some(_)) | (Some(false), None) => false,
        (Some(true) | None, None) => {
            status.push(row.clone());
            true
        }
        (Some(false) | None, Some(index)) => {
            status.remove(index);
            true
        }
    }
}

//! Row identity resolution and identity indices.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, TableError};
use crate::value::{KeyPath, Value, format_json_number};

/// Callback deriving an identity from a row.
pub type RowKeyFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// How to derive a row's identity.
#[derive(Clone)]
pub enum RowKey {
    /// Dotted path into the row
    Path(KeyPath),
    /// Custom callback
    Func(RowKeyFn),
}

impl RowKey {
    pub fn path(path: impl Into<KeyPath>) -> Self {
        Self::Path(path.into())
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self::Func(Arc::new(f))
    }
}

impl fmt::Debug for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Path(path) => f.debug_tuple("Path").field(path).finish(),
            RowKey::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<&str> for RowKey {
    fn from(path: &str) -> Self {
        Self::Path(KeyPath::parse(path))
    }
}

impl From<String> for RowKey {
    fn from(path: String) -> Self {
        Self::Path(KeyPath::parse(&path))
    }
}

/// Resolve the identity of `row`.
///
/// A path that does not resolve yields `Ok(None)`. An absent row (`None` or
/// JSON `null`) is an error: there is nothing to derive an identity from.
pub fn get_row_identity(row: Option<&Value>, key: &RowKey) -> Result<Option<Value>> {
    let row = match row {
        Some(Value::Null) | None => return Err(TableError::MissingRow),
        Some(row) => row,
    };
    Ok(match key {
        RowKey::Path(path) => path.resolve(row).cloned(),
        RowKey::Func(f) => Some(f(row)),
    })
}

/// String form of an identity, used as the key of an identity index.
///
/// Strings are used verbatim, numbers in their shortest form, and a missing
/// identity becomes `"undefined"`. Arrays and objects use their JSON text.
pub fn identity_key(identity: Option<&Value>) -> String {
    match identity {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => format_json_number(n),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// A row and its position in the source slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyedRow<'a> {
    pub row: &'a Value,
    pub index: usize,
}

pub type KeysMap<'a> = HashMap<String, KeyedRow<'a>>;

/// Index `rows` by identity.
///
/// When two rows share an identity, the later row wins.
pub fn get_keys_map<'a>(rows: &'a [Value], key: &RowKey) -> Result<KeysMap<'a>> {
    let mut map = KeysMap::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let identity = get_row_identity(Some(row), key).map_err(|_| TableError::MissingRowAt { index })?;
        let id = identity_key(identity.as_ref());
        if let Some(previous) = map.insert(id, KeyedRow { row, index }) {
            log::debug!(
                "[identity] row {} replaces row {} with the same identity",
                index,
                previous.index
            );
        }
    }
    Ok(map)
}

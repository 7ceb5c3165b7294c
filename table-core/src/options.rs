//! Table configuration.

use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::error::Result;
use crate::identity::RowKey;
use crate::sort::SortDirection;
use crate::tree::TreeProps;
use crate::value::Value;

/// Measured layout state the fixed-column math depends on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableLayout {
    /// Whether the body scrolls vertically (and so shows a scrollbar gutter)
    pub scroll_y: bool,
    /// Width of the vertical scrollbar gutter in pixels
    pub gutter_width: f32,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            scroll_y: false,
            gutter_width: 17.0,
        }
    }
}

/// Initial sort applied before the user picks a column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSort {
    /// Row field to sort by; empty means no initial sort
    pub prop: String,
    /// `"ascending"` or `"descending"`
    pub order: String,
}

impl DefaultSort {
    pub fn is_set(&self) -> bool {
        !self.prop.is_empty()
    }

    pub fn direction(&self) -> SortDirection {
        self.order.parse().unwrap_or_default()
    }
}

/// Options for a table instance.
///
/// Every field has a default, so partial JSON configuration is accepted:
///
/// ```
/// use serde_json::json;
/// use table_core::TableOptions;
///
/// let options = TableOptions::from_json(&json!({"rowKey": "id", "showSummary": true})).unwrap();
/// assert_eq!(options.row_key.as_deref(), Some("id"));
/// assert_eq!(options.sum_text, "Sum");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    /// Dotted path to the row identity
    pub row_key: Option<String>,
    /// Text shown in the first cell of the summary row
    pub sum_text: String,
    pub show_summary: bool,
    pub tree_props: TreeProps,
    pub default_sort: DefaultSort,
    pub layout: TableLayout,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            row_key: None,
            sum_text: "Sum".to_string(),
            show_summary: false,
            tree_props: TreeProps::default(),
            default_sort: DefaultSort::default(),
            layout: TableLayout::default(),
        }
    }
}

impl TableOptions {
    /// Deserialize options from a JSON value.
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Row key built from `row_key`, if one is configured.
    pub fn row_key(&self) -> Option<RowKey> {
        self.row_key.as_deref().map(RowKey::from)
    }
}

/// Overlay `config` on `defaults`.
///
/// Keys absent from `config` keep their default; keys present in `config`
/// replace the default, including explicit `null`.
pub fn merge_options(defaults: &Map<String, Value>, config: &Map<String, Value>) -> Map<String, Value> {
    let mut options = defaults.clone();
    for (key, value) in config {
        options.insert(key.clone(), value.clone());
    }
    options
}

/// Shallow comparison of two objects: same keys, equal values per key.
pub fn object_equals(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len() && a.iter().all(|(key, value)| b.get(key) == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_defaults() {
        let options = TableOptions::default();
        assert_eq!(options.sum_text, "Sum");
        assert_eq!(options.tree_props.children_key, "children");
        assert_eq!(options.tree_props.lazy_key, "hasChildren");
        assert!(!options.layout.scroll_y);
        assert!(options.row_key().is_none());
    }

    #[test]
    fn test_from_json_partial() {
        let options = TableOptions::from_json(&json!({
            "sumText": "Total",
            "treeProps": {"children": "items"},
            "defaultSort": {"prop": "date", "order": "descending"},
            "layout": {"scrollY": true, "gutterWidth": 12.0}
        }))
        .unwrap();

        assert_eq!(options.sum_text, "Total");
        assert_eq!(options.tree_props.children_key, "items");
        assert_eq!(options.tree_props.lazy_key, "hasChildren");
        assert!(options.default_sort.is_set());
        assert_eq!(options.default_sort.direction(), SortDirection::Descending);
        assert_eq!(options.layout.gutter_width, 12.0);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = TableOptions::from_json(&json!({"showSummary": "yes"})).unwrap_err();
        assert!(err.to_string().starts_with("invalid table options"));
    }

    #[test]
    fn test_merge_options() {
        let defaults = object(json!({"a": 1, "b": 2}));
        let config = object(json!({"b": 3, "c": null}));
        let merged = merge_options(&defaults, &config);
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": 3, "c": null}));
    }

    #[test]
    fn test_object_equals() {
        let a = object(json!({"x": 1, "y": "two"}));
        let b = object(json!({"y": "two", "x": 1}));
        let c = object(json!({"x": 1}));
        assert!(object_equals(&a, &b));
        assert!(!object_equals(&a, &c));
    }
}

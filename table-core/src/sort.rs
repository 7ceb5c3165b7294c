//! Stable multi-key sorting.
//!
//! Every sort decorates each element with its original index and a derived
//! key, sorts the decorated elements, and strips the decoration again. Ties
//! are broken by original index, so the result does not depend on the
//! stability of the underlying sort.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::value::{KeyPath, Value};

/// Key field that refers to a wrapped element itself rather than its inner
/// value.
pub const WRAPPER_KEY_FIELD: &str = "$key";

/// Member holding the inner value of a wrapped element.
pub const WRAPPED_VALUE_FIELD: &str = "$value";

/// Custom ordering over raw elements.
pub type Comparator = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Callback deriving one key component from `(element, index, all elements)`.
pub type KeyFn = Arc<dyn Fn(&Value, usize, &[Value]) -> Value + Send + Sync>;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Direction from a signed multiplier: negative means descending.
    pub fn from_sign(sign: i64) -> Self {
        if sign < 0 {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    /// Apply the direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = std::convert::Infallible;

    /// `"descending"` is descending; anything else is ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "descending" {
            Self::Descending
        } else {
            Self::Ascending
        })
    }
}

/// One component of a composite sort key.
#[derive(Clone)]
pub enum KeySelector {
    /// Dotted path evaluated against each element
    Path(KeyPath),
    /// Callback evaluated for each element
    Func(KeyFn),
}

impl KeySelector {
    fn extract(&self, value: &Value, index: usize, all: &[Value]) -> Option<Value> {
        match self {
            KeySelector::Path(path) => path.resolve(value).cloned(),
            KeySelector::Func(f) => Some(f(value, index, all)),
        }
    }
}

impl fmt::Debug for KeySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySelector::Path(path) => f.debug_tuple("Path").field(path).finish(),
            KeySelector::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// An element classified before key extraction.
///
/// Wrapped elements are objects carrying their payload under `"$value"`;
/// their key is read from the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortTarget<'a> {
    Plain(&'a Value),
    Wrapped(&'a Value),
}

impl<'a> SortTarget<'a> {
    /// Classify `value` for sorting by `key_field`.
    ///
    /// Sorting by `"$key"` never unwraps.
    pub fn classify(value: &'a Value, key_field: &str) -> Self {
        if key_field == WRAPPER_KEY_FIELD {
            return Self::Plain(value);
        }
        match value.get(WRAPPED_VALUE_FIELD) {
            Some(inner) => Self::Wrapped(inner),
            None => Self::Plain(value),
        }
    }

    /// The value keys are read from.
    pub fn value(self) -> &'a Value {
        match self {
            Self::Plain(v) | Self::Wrapped(v) => v,
        }
    }
}

/// How to order elements.
///
/// Strategies are tried in order: comparator, key selectors, key field.
/// With none of them set, sorting keeps the input order.
#[derive(Clone, Default)]
pub struct SortOptions {
    key_field: Option<String>,
    comparator: Option<Comparator>,
    selectors: Vec<KeySelector>,
}

impl SortOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort by a single field of each element. An empty field sets no key.
    pub fn key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = Some(field.into());
        self
    }

    /// Sort with a custom comparator over raw elements.
    ///
    /// The comparator must be a total order. Sort direction does not apply
    /// to it.
    pub fn comparator<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(f));
        self
    }

    /// Append a dotted-path component to the composite key.
    pub fn by_path(mut self, path: impl Into<KeyPath>) -> Self {
        self.selectors.push(KeySelector::Path(path.into()));
        self
    }

    /// Append a callback component to the composite key.
    pub fn by<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, usize, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.selectors.push(KeySelector::Func(Arc::new(f)));
        self
    }

    pub fn selectors(&self) -> &[KeySelector] {
        &self.selectors
    }

    /// Whether sorting with these options leaves the input untouched.
    pub fn is_noop(&self) -> bool {
        self.key_field.as_deref().is_none_or(str::is_empty)
            && self.comparator.is_none()
            && self.selectors.is_empty()
    }
}

impl fmt::Debug for SortOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortOptions")
            .field("key_field", &self.key_field)
            .field("comparator", &self.comparator.as_ref().map(|_| ".."))
            .field("selectors", &self.selectors)
            .finish()
    }
}

/// Sort `values` without mutating them.
///
/// Ties (including fully equal keys) fall back to original index, and the
/// direction then flips the whole result. A descending sort is therefore the
/// exact reverse of the ascending one. A comparator, when set, is used as is
/// and `direction` is ignored.
pub fn order_by(values: &[Value], options: &SortOptions, direction: SortDirection) -> Vec<Value> {
    if options.is_noop() {
        return values.to_vec();
    }

    if let Some(comparator) = &options.comparator {
        log::trace!("[sort] {} values by comparator", values.len());
        return sort_decorated(
            values,
            |_, _| (),
            |a, b| comparator(a.value, b.value),
            SortDirection::Ascending,
        );
    }

    if !options.selectors.is_empty() {
        log::trace!(
            "[sort] {} values by {} key selectors ({:?})",
            values.len(),
            options.selectors.len(),
            direction
        );
        return sort_decorated(
            values,
            |value, index| {
                options
                    .selectors
                    .iter()
                    .map(|s| s.extract(value, index, values))
                    .collect::<Vec<_>>()
            },
            |a, b| compare_keys(&a.key, &b.key),
            direction,
        );
    }

    let field = options.key_field.as_deref().unwrap_or_default();
    let path = KeyPath::parse(field);
    log::trace!("[sort] {} values by field '{}' ({:?})", values.len(), field, direction);
    sort_decorated(
        values,
        |value, _| {
            let target = SortTarget::classify(value, field).value();
            if target.is_object() || target.is_array() {
                path.resolve(target).cloned()
            } else {
                Some(target.clone())
            }
        },
        |a, b| compare_values(a.key.as_ref(), b.key.as_ref()),
        direction,
    )
}

/// Stable sort of typed items by an `Ord` key.
///
/// Uses the same tie-break and direction rules as [`order_by`].
pub fn stable_sort_by_key<T, K, F>(items: &[T], mut key: F, direction: SortDirection) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    sort_decorated(items, |item, _| key(item), |a, b| a.key.cmp(&b.key), direction)
}

struct Decorated<'a, T, K> {
    value: &'a T,
    index: usize,
    key: K,
}

fn sort_decorated<T, K, D, C>(items: &[T], mut derive: D, compare: C, direction: SortDirection) -> Vec<T>
where
    T: Clone,
    D: FnMut(&T, usize) -> K,
    C: Fn(&Decorated<'_, T, K>, &Decorated<'_, T, K>) -> Ordering,
{
    let mut decorated: Vec<Decorated<'_, T, K>> = items
        .iter()
        .enumerate()
        .map(|(index, value)| Decorated {
            value,
            index,
            key: derive(value, index),
        })
        .collect();

    decorated.sort_by(|a, b| {
        let order = compare(a, b).then_with(|| a.index.cmp(&b.index));
        direction.apply(order)
    });

    decorated.into_iter().map(|d| d.value.clone()).collect()
}

/// Compare composite keys component by component.
pub fn compare_keys(a: &[Option<Value>], b: &[Option<Value>]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| compare_values(x.as_ref(), y.as_ref()))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Total order over key components.
///
/// Across kinds: missing < null < numbers < strings < booleans < arrays <
/// objects. Within a kind, numbers compare numerically, strings
/// lexicographically and booleans false before true; arrays and objects
/// compare equal.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None => 0,
        Some(Value::Null) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Bool(_)) => 4,
        Some(Value::Array(_)) => 5,
        Some(Value::Object(_)) => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direction_parse() {
        assert_eq!("descending".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert_eq!("ascending".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!(SortDirection::from_sign(-1), SortDirection::Descending);
        assert_eq!(SortDirection::from_sign(0), SortDirection::Ascending);
    }

    #[test]
    fn test_classify_wrapped() {
        let wrapped = json!({"$key": "k", "$value": {"n": 1}});
        assert_eq!(SortTarget::classify(&wrapped, "n"), SortTarget::Wrapped(&json!({"n": 1})));
        assert_eq!(SortTarget::classify(&wrapped, "$key"), SortTarget::Plain(&wrapped));

        let plain = json!({"n": 1});
        assert_eq!(SortTarget::classify(&plain, "n"), SortTarget::Plain(&plain));
    }

    #[test]
    fn test_compare_values_across_kinds() {
        let null = json!(null);
        let num = json!(1);
        let text = json!("a");
        assert_eq!(compare_values(None, Some(&null)), Ordering::Less);
        assert_eq!(compare_values(Some(&null), Some(&num)), Ordering::Less);
        assert_eq!(compare_values(Some(&num), Some(&text)), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(1.5)), Some(&json!(2))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!([1])), Some(&json!([2]))), Ordering::Equal);
    }

    #[test]
    fn test_compare_keys_first_difference_wins() {
        let a = vec![Some(json!(1)), Some(json!("b"))];
        let b = vec![Some(json!(1)), Some(json!("a"))];
        assert_eq!(compare_keys(&a, &b), Ordering::Greater);
        assert_eq!(compare_keys(&a, &a), Ordering::Equal);
    }
}

//! Row comparators for sorting.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Row, Value};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Ascending order
    #[default]
    Asc,
    /// Descending order
    Desc,
}

impl Order {
    /// Returns the opposite direction
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ascending"),
            Self::Desc => f.write_str("descending"),
        }
    }
}

/// Orders `a` before `b` when `b[key] < a[key]`.
///
/// Values of comparable kinds use [`Value::native_cmp`]. Pairs that have no
/// native order (mixed types, nulls, missing fields, NaN) fall back to a fixed
/// ranking of value kinds so the result stays a total order; that ranking is
/// not meaningful and mixed-type columns should not rely on it.
pub fn descending(a: &Row, b: &Row, key: &str) -> Ordering {
    value_cmp(b.get(key), a.get(key))
}

fn value_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(a), Some(b)) = (a, b) {
        if let Some(ordering) = a.native_cmp(b) {
            return ordering;
        }
        if let (Value::Json(a), Value::Json(b)) = (a, b) {
            return a.to_string().cmp(&b.to_string());
        }
    }
    kind_rank(a).cmp(&kind_rank(b))
}

fn kind_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Float(v)) if v.is_nan() => 3,
        Some(Value::Int(_)) | Some(Value::Float(_)) => 2,
        Some(Value::String(_)) => 4,
        Some(Value::DateTime(_)) => 5,
        Some(Value::Json(_)) => 6,
    }
}

/// Build a comparator over `key` in the given direction.
///
/// Ascending is the exact reverse of descending.
pub fn compare(order: Order, key: &str) -> impl Fn(&Row, &Row) -> Ordering + '_ {
    move |a: &Row, b: &Row| match order {
        Order::Desc => descending(a, b, key),
        Order::Asc => descending(a, b, key).reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, value: impl Into<Value>) -> Row {
        Row::new().set("id", id).set("v", value)
    }

    #[test]
    fn test_asc_is_negation_of_desc() {
        let rows = [
            row(1, 3),
            row(2, 7),
            row(3, "apple"),
            row(4, "pear"),
            row(5, 2.5),
            row(6, Value::Null),
        ];
        let asc = compare(Order::Asc, "v");
        let desc = compare(Order::Desc, "v");

        for a in &rows {
            for b in &rows {
                assert_eq!(asc(a, b), desc(a, b).reverse());
            }
        }
    }

    #[test]
    fn test_ordering() {
        let asc = compare(Order::Asc, "v");
        assert_eq!(asc(&row(1, 1), &row(2, 2)), Ordering::Less);
        assert_eq!(asc(&row(1, "b"), &row(2, "a")), Ordering::Greater);
        assert_eq!(asc(&row(1, 5), &row(2, 5)), Ordering::Equal);

        let desc = compare(Order::Desc, "v");
        assert_eq!(desc(&row(1, 1), &row(2, 2)), Ordering::Greater);
    }

    #[test]
    fn test_missing_and_null_tie() {
        let asc = compare(Order::Asc, "v");
        assert_eq!(asc(&Row::new(), &row(2, Value::Null)), Ordering::Equal);
        assert_eq!(asc(&row(1, f64::NAN), &row(2, f64::NAN)), Ordering::Equal);
    }

    #[test]
    fn test_mixed_kinds_sort_without_panicking() {
        let mut rows = vec![
            row(1, "b"),
            row(2, 3),
            row(3, Value::Null),
            row(4, true),
            row(5, 1.5),
            row(6, "a"),
        ];
        rows.sort_by(compare(Order::Asc, "v"));
        let ids: Vec<String> = rows.iter().map(|r| r.text("id")).collect();
        assert_eq!(ids, vec!["3", "4", "5", "2", "6", "1"]);
    }

    #[test]
    fn test_ties_not_reordered_by_repeated_sorts() {
        let mut rows = vec![row(1, 2), row(2, 1), row(3, 2), row(4, 1), row(5, 2)];
        rows.sort_by(compare(Order::Asc, "v"));
        let first: Vec<String> = rows.iter().map(|r| r.text("id")).collect();
        assert_eq!(first, vec!["2", "4", "1", "3", "5"]);

        rows.sort_by(compare(Order::Asc, "v"));
        let second: Vec<String> = rows.iter().map(|r| r.text("id")).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_large_numbers_order_transitively() {
        let above = row(1, (1i64 << 53) + 1);
        let float = row(2, 9_007_199_254_740_992.0);
        let exact = row(3, 1i64 << 53);
        let asc = compare(Order::Asc, "v");

        assert_eq!(asc(&above, &float), Ordering::Greater);
        assert_eq!(asc(&float, &exact), Ordering::Equal);
        assert_eq!(asc(&above, &exact), Ordering::Greater);

        let mut rows = vec![above, float, exact];
        rows.sort_by(compare(Order::Asc, "v"));
        let ids: Vec<String> = rows.iter().map(|r| r.text("id")).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Order::Asc.toggle(), Order::Desc);
        assert_eq!(Order::Desc.toggle(), Order::Asc);
    }
}

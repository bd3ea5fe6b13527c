//! Per-field orderings used to sort projected rows.
//!
//! Orderings only affect enumeration order (and therefore which rows are
//! sampled in reports). Row identity in the differ is always textual.
//!
//! Every ordering must be total: `sort_by` requires it.

use crate::model::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Comparator for the values of one field.
pub trait FieldOrdering: Send + Sync {
    fn compare(&self, a: &Value, b: &Value) -> Ordering;

    /// Name used in diagnostics
    fn name(&self) -> &'static str;
}

/// Numeric-aware ordering.
///
/// - two finite numeric tokens compare numerically, ties broken by text
///   (`1` < `1.0`), so distinct tokens never compare equal
/// - two integer tokens compare exactly, including `count` values beyond
///   the precision of `f64`
/// - numeric tokens sort before non-numeric tokens
/// - non-numeric tokens compare lexically
/// - `Null` sorts last
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrdering;

impl FieldOrdering for NaturalOrdering {
    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match (a, b) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Text(x), Value::Text(y)) => match (a.as_number(), b.as_number()) {
                (Some(p), Some(q)) => match (a.as_integer(), b.as_integer()) {
                    (Some(i), Some(j)) => i.cmp(&j),
                    _ => p.total_cmp(&q),
                }
                .then_with(|| x.cmp(y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => x.cmp(y),
            },
        }
    }

    fn name(&self) -> &'static str {
        "natural"
    }
}

/// Plain byte-wise text ordering, `Null` last.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalOrdering;

impl FieldOrdering for LexicalOrdering {
    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match (a, b) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Text(x), Value::Text(y)) => x.cmp(y),
        }
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}

/// Configuration-level selector for the built-in orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingKind {
    #[default]
    Natural,
    Lexical,
}

static NATURAL: NaturalOrdering = NaturalOrdering;
static LEXICAL: LexicalOrdering = LexicalOrdering;

impl OrderingKind {
    pub fn ordering(&self) -> &'static dyn FieldOrdering {
        match self {
            OrderingKind::Natural => &NATURAL,
            OrderingKind::Lexical => &LEXICAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Value {
        Value::text(s)
    }

    #[test]
    fn test_natural_compares_numbers_numerically() {
        assert_eq!(NaturalOrdering.compare(&t("9"), &t("10")), Ordering::Less);
        assert_eq!(NaturalOrdering.compare(&t("0.5"), &t("1e1")), Ordering::Less);
        assert_eq!(LexicalOrdering.compare(&t("9"), &t("10")), Ordering::Greater);
    }

    #[test]
    fn test_natural_compares_large_counts_exactly() {
        let big = t("10000000000000000000");
        let smaller = t("9999999999999999999");
        assert_eq!(NaturalOrdering.compare(&big, &smaller), Ordering::Greater);
        assert_eq!(
            NaturalOrdering.compare(&t("18446744073709551615"), &t("18446744073709551614")),
            Ordering::Greater
        );
        assert_eq!(NaturalOrdering.compare(&t("-3"), &t("2")), Ordering::Less);
    }

    #[test]
    fn test_natural_tiebreak_is_textual() {
        assert_eq!(NaturalOrdering.compare(&t("1"), &t("1.0")), Ordering::Less);
        assert_eq!(NaturalOrdering.compare(&t("1"), &t("1")), Ordering::Equal);
    }

    #[test]
    fn test_natural_numbers_before_text_and_null_last() {
        assert_eq!(NaturalOrdering.compare(&t("10"), &t("1a")), Ordering::Less);
        assert_eq!(NaturalOrdering.compare(&t("zzz"), &Value::Null), Ordering::Less);
        assert_eq!(LexicalOrdering.compare(&Value::Null, &t("a")), Ordering::Greater);
    }

    #[test]
    fn test_natural_is_transitive_on_mixed_tokens() {
        // 9 < 10 numerically, and both numbers precede "1a"
        let mut values = vec![t("1a"), t("10"), Value::Null, t("9")];
        values.sort_by(|a, b| NaturalOrdering.compare(a, b));
        assert_eq!(values, vec![t("9"), t("10"), t("1a"), Value::Null]);
    }

    #[test]
    fn test_kind_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: OrderingKind,
        }
        let w: Wrapper = serde_json::from_str(r#"{"kind":"lexical"}"#).unwrap();
        assert_eq!(w.kind, OrderingKind::Lexical);
        assert_eq!(w.kind.ordering().name(), "lexical");
    }
}

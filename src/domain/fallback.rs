//! Ordered fallback lists and the lenient coercion rules that build them.
//!
//! A fallback list is whatever an admin typed, minus the garbage. Tokens are
//! coerced to non-negative integers the way a catalog form does it: leading
//! whitespace and an optional sign are skipped, the leading run of digits is
//! read, the sign is discarded. Everything that coerces to zero is dropped.
//! Order and duplicates are kept as given.

use serde::Serialize;
use serde_json::Value;

use super::id::ProductId;

/// Ordered candidate substitutes for one product, highest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FallbackList(Vec<ProductId>);

impl FallbackList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a comma-delimited admin input such as `"5, 12,0,abc,7"`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.split(',')
            .filter_map(|token| ProductId::from_coerced(coerce_str(token)))
            .collect()
    }

    /// Rebuild a list from a stored JSON value.
    ///
    /// Arrays are coerced entry by entry. A bare scalar counts as a
    /// one-element list. Objects, booleans and nulls contribute nothing.
    #[must_use]
    pub fn from_stored(value: &Value) -> Self {
        match value {
            Value::Array(entries) => entries
                .iter()
                .filter_map(|entry| ProductId::from_coerced(coerce_value(entry)))
                .collect(),
            Value::Number(_) | Value::String(_) => {
                ProductId::from_coerced(coerce_value(value)).into_iter().collect()
            }
            _ => Self::new(),
        }
    }

    /// Value written to the metadata store.
    #[must_use]
    pub fn to_stored(&self) -> Value {
        Value::Array(self.0.iter().map(|id| Value::from(id.value())).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ProductId] {
        &self.0
    }
}

impl FromIterator<ProductId> for FallbackList {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<ProductId>> for FallbackList {
    fn from(ids: Vec<ProductId>) -> Self {
        Self(ids)
    }
}

impl<'a> IntoIterator for &'a FallbackList {
    type Item = ProductId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ProductId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

/// Coerce a free-form token to a non-negative integer. Unreadable input is 0.
#[must_use]
pub fn coerce_str(token: &str) -> u64 {
    let trimmed = token.trim_start();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    // Overflowing digit runs saturate rather than wrap.
    match &unsigned[..digits_end] {
        "" => 0,
        digits => digits.parse::<u64>().unwrap_or(u64::MAX),
    }
}

/// Coerce a stored JSON value to a non-negative integer. Unreadable input is 0.
#[must_use]
pub fn coerce_value(value: &Value) -> u64 {
    match value {
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                unsigned
            } else if let Some(signed) = number.as_i64() {
                signed.unsigned_abs()
            } else {
                number
                    .as_f64()
                    .filter(|float| float.is_finite())
                    .map_or(0, |float| float.abs().trunc() as u64)
            }
        }
        Value::String(text) => coerce_str(text),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(list: &FallbackList) -> Vec<u64> {
        list.iter().map(|id| id.value()).collect()
    }

    #[test]
    fn parse_drops_zero_and_non_numeric_tokens_in_order() {
        let list = FallbackList::parse("5, 12,0,abc,7");
        assert_eq!(ids(&list), vec![5, 12, 7]);
    }

    #[test]
    fn parse_preserves_duplicates() {
        let list = FallbackList::parse("5,5,7");
        assert_eq!(ids(&list), vec![5, 5, 7]);
    }

    #[test]
    fn parse_empty_input_is_empty_list() {
        assert!(FallbackList::parse("").is_empty());
        assert!(FallbackList::parse(" , ,").is_empty());
    }

    #[test]
    fn coerce_str_reads_leading_digits_and_drops_sign() {
        assert_eq!(coerce_str(" 12"), 12);
        assert_eq!(coerce_str("12abc"), 12);
        assert_eq!(coerce_str("-3"), 3);
        assert_eq!(coerce_str("+8"), 8);
        assert_eq!(coerce_str("abc12"), 0);
        assert_eq!(coerce_str("4.9"), 4);
        assert_eq!(coerce_str("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn from_stored_coerces_mixed_entries() {
        let stored = json!([101, "102", -103, 4.7, "junk", null, 0, {"id": 9}]);
        let list = FallbackList::from_stored(&stored);
        assert_eq!(ids(&list), vec![101, 102, 103, 4]);
    }

    #[test]
    fn from_stored_treats_scalar_as_single_entry() {
        assert_eq!(ids(&FallbackList::from_stored(&json!(55))), vec![55]);
        assert_eq!(ids(&FallbackList::from_stored(&json!("56"))), vec![56]);
        assert!(FallbackList::from_stored(&json!(true)).is_empty());
    }

    #[test]
    fn to_stored_writes_plain_integer_array() {
        let list = FallbackList::parse("3,1,2");
        assert_eq!(list.to_stored(), json!([3, 1, 2]));
    }
}

//! Response envelope normalization
//!
//! Listing endpoints wrap their results inconsistently: paginated endpoints
//! use `items`, others return the list under one or two `data` levels, and a
//! few return a bare array. The shape can change between calls to the same
//! endpoint, so callers never inspect the body themselves. They go through
//! [`Envelope::parse`] (or [`extract_data`]) which recognizes the known
//! shapes in a fixed priority order:
//!
//! | priority | path                   | variant                          |
//! |----------|------------------------|----------------------------------|
//! | 1        | `data.items`           | [`Envelope::Paginated`]          |
//! | 2        | `data.data.items`      | [`Envelope::NestedPaginated`]    |
//! | 3        | `data.data`            | [`Envelope::NestedList`]         |
//! | 4        | `data`                 | [`Envelope::List`]               |
//! | 5        | the value itself       | [`Envelope::Bare`]               |
//! | -        | anything else / null   | [`Envelope::Unrecognized`]       |
//!
//! The first matching rule wins, so an explicit pagination shape is never
//! misread as a flat list that happens to share a `data` key.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Discriminated view over a listing response.
///
/// Every variant except [`Envelope::Unrecognized`] borrows the entity slice
/// straight out of the response; nothing is copied until
/// [`Envelope::into_entities`] is called.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope<'a> {
    /// `{ data: { items: [...] } }`
    Paginated(&'a [Value]),
    /// `{ data: { data: { items: [...] } } }`
    NestedPaginated(&'a [Value]),
    /// `{ data: { data: [...] } }`
    NestedList(&'a [Value]),
    /// `{ data: [...] }`
    List(&'a [Value]),
    /// `[...]`
    Bare(&'a [Value]),
    /// No known shape matched (including `null`)
    Unrecognized,
}

impl<'a> Envelope<'a> {
    /// Classify a response. Never fails; unknown shapes map to
    /// [`Envelope::Unrecognized`].
    pub fn parse(response: Option<&'a Value>) -> Self {
        let Some(response) = response.filter(|value| !value.is_null()) else {
            return Self::Unrecognized;
        };

        let data = response.get("data");
        let nested = data.and_then(|data| data.get("data"));

        let envelope = if let Some(items) = list_at(data.and_then(|data| data.get("items"))) {
            Self::Paginated(items)
        } else if let Some(items) = list_at(nested.and_then(|nested| nested.get("items"))) {
            Self::NestedPaginated(items)
        } else if let Some(items) = list_at(nested) {
            Self::NestedList(items)
        } else if let Some(items) = list_at(data) {
            Self::List(items)
        } else if let Some(items) = list_at(Some(response)) {
            Self::Bare(items)
        } else {
            Self::Unrecognized
        };

        match envelope {
            Self::Unrecognized => warn!("response matched no known envelope shape"),
            matched => debug!(shape = matched.shape(), len = matched.len(), "envelope matched"),
        }

        envelope
    }

    /// Short name of the matched shape, for diagnostics.
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Paginated(_) => "data.items",
            Self::NestedPaginated(_) => "data.data.items",
            Self::NestedList(_) => "data.data",
            Self::List(_) => "data",
            Self::Bare(_) => "bare",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Borrow the extracted entities (empty for [`Envelope::Unrecognized`]).
    pub const fn entities(&self) -> &'a [Value] {
        match self {
            Self::Paginated(items)
            | Self::NestedPaginated(items)
            | Self::NestedList(items)
            | Self::List(items)
            | Self::Bare(items) => items,
            Self::Unrecognized => &[],
        }
    }

    /// Number of extracted entities.
    pub const fn len(&self) -> usize {
        self.entities().len()
    }

    /// `true` when no entities were extracted.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the entities out in response order.
    pub fn into_entities(self) -> Vec<Value> {
        self.entities().to_vec()
    }
}

fn list_at(value: Option<&Value>) -> Option<&[Value]> {
    value.and_then(Value::as_array).map(Vec::as_slice)
}

/// Extract the entity list from a listing response.
///
/// Order and element values are preserved exactly as the backend sent them.
/// `None`, `null` and unrecognized shapes all yield an empty list.
pub fn extract_data(response: Option<&Value>) -> Vec<Value> {
    Envelope::parse(response).into_entities()
}

/// Typed entities together with how many elements the backend sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    /// Elements in the response, decodable or not
    pub received: usize,
}

impl<T> Listing<T> {
    /// Elements dropped because they did not decode.
    pub fn skipped(&self) -> usize {
        self.received.saturating_sub(self.items.len())
    }
}

/// Typed variant of [`extract_data`].
///
/// Elements that do not deserialize into `T` are skipped and logged; the
/// remaining elements keep their relative order. [`Listing::received`]
/// still counts them.
pub fn extract_listing<T: DeserializeOwned>(response: Option<&Value>) -> Listing<T> {
    let envelope = Envelope::parse(response);

    let items = envelope
        .entities()
        .iter()
        .enumerate()
        .filter_map(|(index, entity)| match T::deserialize(entity) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!(index, error = %err, "skipping entity that does not match the expected type");
                None
            }
        })
        .collect();

    Listing { items, received: envelope.len() }
}

/// [`extract_listing`] without the count.
pub fn extract_entities<T: DeserializeOwned>(response: Option<&Value>) -> Vec<T> {
    extract_listing(response).items
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[test]
    fn paginated_items_under_data() {
        let response = json!({ "data": { "items": [1, 2], "total": 2 } });
        let envelope = Envelope::parse(Some(&response));
        assert!(matches!(envelope, Envelope::Paginated(_)));
        assert_eq!(envelope.into_entities(), vec![json!(1), json!(2)]);
    }

    #[test]
    fn paginated_items_nested_two_levels() {
        let response = json!({ "data": { "data": { "items": [{ "id": 1 }] } } });
        let envelope = Envelope::parse(Some(&response));
        assert!(matches!(envelope, Envelope::NestedPaginated(_)));
        assert_eq!(envelope.into_entities(), vec![json!({ "id": 1 })]);
    }

    #[test]
    fn list_nested_under_data_data() {
        let response = json!({ "status_code": 200, "data": { "data": [{ "id": 4 }, { "id": 5 }] } });
        let envelope = Envelope::parse(Some(&response));
        assert!(matches!(envelope, Envelope::NestedList(_)));
        assert_eq!(envelope.len(), 2);
    }

    #[test]
    fn list_directly_under_data() {
        let response = json!({ "data": ["a", "b", "c"] });
        let envelope = Envelope::parse(Some(&response));
        assert!(matches!(envelope, Envelope::List(_)));
        assert_eq!(extract_data(Some(&response)), vec![json!("a"), json!("b"), json!("c")]);
    }

    #[test]
    fn bare_array() {
        let response = json!([1, 2, 3]);
        assert!(matches!(Envelope::parse(Some(&response)), Envelope::Bare(_)));
        assert_eq!(extract_data(Some(&response)), vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn null_and_missing_yield_empty() {
        assert!(extract_data(None).is_empty());
        assert!(extract_data(Some(&Value::Null)).is_empty());
        assert_eq!(Envelope::parse(None), Envelope::Unrecognized);
    }

    #[test]
    fn unrecognized_shapes_yield_empty() {
        for response in [
            json!({}),
            json!({ "items": "not a list" }),
            json!({ "data": { "items": null } }),
            json!({ "data": 42 }),
            json!("text"),
            json!(17),
        ] {
            assert!(extract_data(Some(&response)).is_empty(), "{response}");
        }
    }

    #[test]
    fn extra_fields_do_not_change_priority() {
        let response = json!({ "data": { "items": [1, 2] }, "extra": "x" });
        assert_eq!(extract_data(Some(&response)), vec![json!(1), json!(2)]);
    }

    #[test]
    fn paginated_wins_over_nested_list() {
        let response = json!({ "data": { "items": [1], "data": [2, 3] } });
        assert_eq!(extract_data(Some(&response)), vec![json!(1)]);
    }

    #[test]
    fn nested_paginated_wins_over_nested_list_fallback() {
        // data.data is an object here, so rule 3 cannot match; rule 2 must.
        let response = json!({ "data": { "data": { "items": [7], "count": 1 } } });
        assert_eq!(Envelope::parse(Some(&response)).shape(), "data.data.items");
    }

    #[test]
    fn nested_list_wins_over_bare_data_checks() {
        let response = json!({ "data": { "data": [1] }, "items": [9] });
        assert_eq!(extract_data(Some(&response)), vec![json!(1)]);
    }

    #[test]
    fn data_list_wins_over_bare() {
        // A bare array can never carry a `data` key, but an object whose
        // `data` is a list must not fall through to rule 5.
        let response = json!({ "data": [1, 2] });
        assert_eq!(Envelope::parse(Some(&response)).shape(), "data");
    }

    #[test]
    fn order_and_values_are_preserved() {
        let response = json!({ "data": [{ "id": 3 }, { "id": 1 }, { "id": 3 }] });
        let entities = extract_data(Some(&response));
        assert_eq!(entities, vec![json!({ "id": 3 }), json!({ "id": 1 }), json!({ "id": 3 })]);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    #[test]
    fn typed_extraction_skips_mismatched_rows() {
        let response = json!([{ "id": 1 }, { "id": "x" }, { "id": 2 }]);
        let rows: Vec<Row> = extract_entities(Some(&response));
        assert_eq!(rows, vec![Row { id: 1 }, Row { id: 2 }]);
    }

    #[test]
    fn listing_counts_rows_that_did_not_decode() {
        let response = json!({ "data": [{ "id": 1 }, { "id": "x" }, { "id": 2 }] });
        let listing: Listing<Row> = extract_listing(Some(&response));
        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.received, 3);
        assert_eq!(listing.skipped(), 1);
    }
}

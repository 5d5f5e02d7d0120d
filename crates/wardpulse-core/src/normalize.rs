//! Defensive normalization at the orchestration boundary.
//!
//! The backend is dynamically typed, so nothing downstream trusts the
//! wire payload: any unexpected shape becomes a typed default here
//! rather than reaching presentation.

use serde_json::Value;

use crate::model::{AnalyticsRow, GeoFeature, GeoFeatureCollection};

/// Coerce an analytics payload to a well-formed row sequence.
///
/// Non-array payloads (null, object, string, number) coerce to the
/// empty vector; array entries that cannot be read as rows are skipped.
pub fn coerce_rows(payload: Value) -> Vec<AnalyticsRow> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Extract ward names from a wards payload.
///
/// `Some` only when the payload is an array; non-string entries are
/// skipped. `None` means the catalogue is left untouched.
pub fn ward_names(payload: &Value) -> Option<Vec<String>> {
    payload.as_array().map(|items| {
        items
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_string))
            .collect()
    })
}

/// Coerce a granular payload to a feature collection.
///
/// Features are read one at a time so a single bad entry cannot sink
/// the whole layer; a payload without a `features` array coerces to the
/// empty collection, which renders as the "no data" placeholder.
pub fn coerce_feature_collection(payload: Value) -> GeoFeatureCollection {
    let features = match payload.get("features") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value::<GeoFeature>(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    };
    GeoFeatureCollection { features }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_array_payloads_coerce_to_empty() {
        assert!(coerce_rows(Value::Null).is_empty());
        assert!(coerce_rows(json!({ "error": "nope" })).is_empty());
        assert!(coerce_rows(json!("not rows")).is_empty());
        assert!(coerce_rows(json!(42)).is_empty());
    }

    #[test]
    fn test_well_formed_rows_parse() {
        let rows = coerce_rows(json!([
            { "id": 1, "text": "water supply", "emotion": "Anger", "drivers": ["pipeline"], "city": "Hyderabad", "timestamp": "2025-08-02 10:00" },
            { "id": 2, "text": "new park", "emotion": "Joy" }
        ]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].drivers, ["pipeline"]);
        assert_eq!(rows[1].city, "");
    }

    #[test]
    fn test_unreadable_entries_are_skipped() {
        let rows = coerce_rows(json!([{ "id": 3 }, "junk", 17, null]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 3);
    }

    #[test]
    fn test_ward_names_only_from_arrays() {
        assert_eq!(
            ward_names(&json!(["Jubilee Hills", "Banjara Hills"])),
            Some(vec!["Jubilee Hills".to_string(), "Banjara Hills".to_string()])
        );
        assert_eq!(ward_names(&json!({ "error": "nope" })), None);
        assert_eq!(ward_names(&Value::Null), None);
    }

    #[test]
    fn test_ward_names_skip_non_strings() {
        assert_eq!(
            ward_names(&json!(["Khairatabad", 7, null])),
            Some(vec!["Khairatabad".to_string()])
        );
    }

    #[test]
    fn test_feature_collection_coercion() {
        let collection = coerce_feature_collection(json!({
            "type": "FeatureCollection",
            "features": [
                { "geometry": { "type": "Polygon", "coordinates": [] }, "properties": { "ward_name": "Khairatabad" } },
                { "geometry": null }
            ]
        }));
        assert_eq!(collection.features.len(), 2);
        assert!(collection.features[1].properties.is_none());
    }

    #[test]
    fn test_featureless_payloads_coerce_to_empty_collection() {
        assert!(coerce_feature_collection(json!([])).is_empty());
        assert!(coerce_feature_collection(Value::Null).is_empty());
        assert!(coerce_feature_collection(json!({ "features": "nope" })).is_empty());
    }
}

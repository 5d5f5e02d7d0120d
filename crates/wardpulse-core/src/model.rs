//! Wire-facing data model.
//!
//! Every field carries `#[serde(default)]` so a partially malformed
//! payload degrades to typed defaults instead of failing the whole
//! response.

use serde::{Deserialize, Serialize};

/// One unit of fetched discourse data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRow {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub drivers: Vec<String>,
    #[serde(default)]
    pub city: String,
    /// Backend-formatted display string, shown verbatim.
    #[serde(default)]
    pub timestamp: String,
}

/// AI-generated strategic brief.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategicSummary {
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub opportunity: String,
    #[serde(default)]
    pub threat: String,
    #[serde(default)]
    pub suggested_post: String,
    /// Generation failure reported inside a structurally valid response.
    #[serde(default)]
    pub error: Option<String>,
}

impl StrategicSummary {
    /// Embedded generation failure, displayed exactly like a transport
    /// failure.
    pub fn failure(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

/// Per-ward aggregate attached to a geographic feature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WardProperties {
    #[serde(default)]
    pub ward_name: String,
    #[serde(default)]
    pub dominant_emotion: String,
    #[serde(default)]
    pub post_count: u64,
    #[serde(default)]
    pub top_drivers: Vec<String>,
}

/// A geographic feature.
///
/// `geometry` stays raw JSON; its shape is only interpreted at render
/// time, and anything unexpected simply contributes no polygon rings.
/// A feature without a `properties` object still deserializes — it
/// styles with the default color and produces no popup content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoFeature {
    #[serde(default)]
    pub geometry: serde_json::Value,
    #[serde(default)]
    pub properties: Option<WardProperties>,
}

/// The ward-level feature collection served by the granular endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoFeatureCollection {
    #[serde(default)]
    pub features: Vec<GeoFeature>,
}

impl GeoFeatureCollection {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_fills_missing_fields_with_defaults() {
        let row: AnalyticsRow =
            serde_json::from_value(json!({ "id": 7, "text": "potholes again" })).unwrap();
        assert_eq!(row.id, 7);
        assert_eq!(row.text, "potholes again");
        assert!(row.emotion.is_empty());
        assert!(row.drivers.is_empty());
    }

    #[test]
    fn test_summary_failure_requires_nonempty_error() {
        let ok = StrategicSummary::default();
        assert!(ok.failure().is_none());

        let blank: StrategicSummary =
            serde_json::from_value(serde_json::json!({ "error": "" })).unwrap();
        assert!(blank.failure().is_none());

        let failed: StrategicSummary =
            serde_json::from_value(serde_json::json!({ "error": "generation failed" })).unwrap();
        assert_eq!(failed.failure(), Some("generation failed"));
    }

    #[test]
    fn test_feature_without_properties_deserializes() {
        let feature: GeoFeature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [] }
        }))
        .unwrap();
        assert!(feature.properties.is_none());
    }

    #[test]
    fn test_feature_properties_default_missing_fields() {
        let feature: GeoFeature = serde_json::from_value(json!({
            "geometry": null,
            "properties": { "ward_name": "Khairatabad" }
        }))
        .unwrap();
        let properties = feature.properties.unwrap();
        assert_eq!(properties.ward_name, "Khairatabad");
        assert_eq!(properties.post_count, 0);
        assert!(properties.top_drivers.is_empty());
    }
}

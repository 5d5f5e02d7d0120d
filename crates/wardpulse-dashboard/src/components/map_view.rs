//! Ward sentiment map.
//!
//! Fetches the granular feature collection once on mount and renders it
//! as an SVG layer: one polygon per ring, filled by the ward's dominant
//! emotion. Clicking a ward with properties opens a popup panel;
//! features without a properties object style with the default color
//! and stay inert.

use dioxus::prelude::*;
use serde_json::Value;

use wardpulse_core::{GeoFeatureCollection, WardProperties};

use crate::api;

const MAP_WIDTH: f64 = 760.0;
const MAP_HEIGHT: f64 = 420.0;
const MAP_MARGIN: f64 = 16.0;

/// Fixed categorical color table for dominant emotions.
pub(crate) const EMOTION_COLORS: &[(&str, &str)] = &[
    ("Hope", "#2ecc71"),
    ("Anger", "#e74c3c"),
    ("Joy", "#3498db"),
    ("Anxiety", "#f1c40f"),
    ("Sadness", "#9b59b6"),
    ("Disgust", "#7f8c8d"),
    ("Apathy", "#bdc3c7"),
];

/// Fill for unrecognized or missing emotion labels.
pub(crate) const DEFAULT_COLOR: &str = "#95a5a6";

#[component]
pub fn MapView() -> Element {
    let selected = use_signal(|| None::<WardProperties>);
    let geo = use_resource(move || async move {
        let result = api().granular().await;
        if let Err(err) = &result {
            tracing::error!("Failed to fetch granular map data: {err}");
        }
        result
    });

    match &*geo.read() {
        None => rsx! {
            div { class: "panel-status", "Loading map data..." }
        },
        Some(Err(_)) => rsx! {
            div { class: "panel-status error-text",
                "Could not load map data. Please try again later."
            }
        },
        Some(Ok(collection)) if collection.is_empty() => rsx! {
            div { class: "panel-status", "No granular data to display." }
        },
        Some(Ok(collection)) => render_layer(collection, selected),
    }
}

/// Render the feature collection as a fresh SVG layer. The layer is
/// keyed to the collection's content so new data replaces it wholesale.
fn render_layer(
    collection: &GeoFeatureCollection,
    mut selected: Signal<Option<WardProperties>>,
) -> Element {
    let feature_rings: Vec<Vec<Vec<(f64, f64)>>> = collection
        .features
        .iter()
        .map(|feature| polygon_rings(&feature.geometry))
        .collect();

    let all_points = feature_rings
        .iter()
        .flatten()
        .flat_map(|ring| ring.iter().copied());
    let projection = match MapProjection::fit(all_points, MAP_WIDTH, MAP_HEIGHT, MAP_MARGIN) {
        Some(projection) => projection,
        None => {
            return rsx! {
                div { class: "panel-status", "No granular data to display." }
            };
        }
    };

    // One entry per ring: (key, path data, fill, css class, popup payload).
    let mut shapes = Vec::new();
    for (index, (feature, rings)) in collection.features.iter().zip(&feature_rings).enumerate() {
        let fill = feature_fill(feature.properties.as_ref());
        let shape_class = if feature.properties.is_some() {
            "ward-shape interactive"
        } else {
            "ward-shape"
        };
        for (ring_index, ring) in rings.iter().enumerate() {
            shapes.push((
                format!("{index}-{ring_index}"),
                projection.ring_path(ring),
                fill,
                shape_class,
                feature.properties.clone(),
            ));
        }
    }

    let layer_key = format!("layer-{}-{}", collection.features.len(), shapes.len());

    rsx! {
        div { class: "map-wrap",
            svg {
                key: "{layer_key}",
                class: "ward-map",
                view_box: "0 0 {MAP_WIDTH} {MAP_HEIGHT}",
                for (key, ring_d, fill, shape_class, properties) in shapes {
                    path {
                        key: "{key}",
                        class: "{shape_class}",
                        d: "{ring_d}",
                        fill: "{fill}",
                        fill_opacity: "0.75",
                        stroke: "var(--bg-card)",
                        stroke_width: "1",
                        onclick: move |_| selected.set(properties.clone()),
                    }
                }
            }
            MapLegend {}
            if let Some(properties) = selected() {
                WardPopup {
                    properties,
                    on_close: move |_| selected.set(None),
                }
            }
        }
    }
}

/// Legend mapping emotions to their map colors.
#[component]
fn MapLegend() -> Element {
    rsx! {
        div { class: "map-legend",
            for (name, color) in EMOTION_COLORS.iter().copied() {
                span { class: "legend-entry",
                    span { class: "legend-dot", style: "background: {color};" }
                    "{name}"
                }
            }
        }
    }
}

/// Popup panel for a selected ward.
#[component]
fn WardPopup(properties: WardProperties, on_close: EventHandler<()>) -> Element {
    let drivers = properties.top_drivers.clone();

    rsx! {
        aside { class: "map-popup",
            button {
                class: "popup-close",
                onclick: move |_| on_close.call(()),
                "Close"
            }
            h3 { "{properties.ward_name}" }
            p {
                b { "Dominant Emotion: " }
                "{properties.dominant_emotion}"
            }
            p {
                b { "Post Count: " }
                "{properties.post_count}"
            }
            p { class: "popup-drivers-title", "Top Drivers:" }
            if drivers.is_empty() {
                p { class: "popup-muted", "No specific drivers identified." }
            } else {
                ul { class: "popup-drivers",
                    for driver in drivers {
                        li { "{driver}" }
                    }
                }
            }
        }
    }
}

/// Fill for a feature: its dominant emotion when properties exist, the
/// default otherwise.
pub(crate) fn feature_fill(properties: Option<&WardProperties>) -> &'static str {
    properties
        .map(|properties| emotion_color(&properties.dominant_emotion))
        .unwrap_or(DEFAULT_COLOR)
}

/// Fill color for a dominant-emotion label; unrecognized labels take
/// the default.
pub(crate) fn emotion_color(label: &str) -> &'static str {
    EMOTION_COLORS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|&(_, color)| color)
        .unwrap_or(DEFAULT_COLOR)
}

/// Extract polygon rings (lon, lat) from a raw GeoJSON geometry value.
///
/// Understands `Polygon` and `MultiPolygon`; anything else (missing
/// type, missing coordinates, junk) yields no rings.
pub(crate) fn polygon_rings(geometry: &Value) -> Vec<Vec<(f64, f64)>> {
    let geometry_type = geometry.get("type").and_then(Value::as_str).unwrap_or("");
    let coordinates = match geometry.get("coordinates") {
        Some(coordinates) => coordinates,
        None => return Vec::new(),
    };

    match geometry_type {
        "Polygon" => rings_from(coordinates),
        "MultiPolygon" => coordinates
            .as_array()
            .map(|polygons| polygons.iter().flat_map(rings_from).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn rings_from(rings: &Value) -> Vec<Vec<(f64, f64)>> {
    rings
        .as_array()
        .map(|entries| entries.iter().filter_map(ring_points).collect())
        .unwrap_or_default()
}

/// A ring needs at least three readable points to enclose area.
fn ring_points(ring: &Value) -> Option<Vec<(f64, f64)>> {
    let points: Vec<(f64, f64)> = ring
        .as_array()?
        .iter()
        .filter_map(|pair| {
            let pair = pair.as_array()?;
            Some((pair.first()?.as_f64()?, pair.get(1)?.as_f64()?))
        })
        .collect();
    (points.len() >= 3).then_some(points)
}

/// Fit-to-bounds linear projection from (lon, lat) into SVG pixels,
/// north up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MapProjection {
    min_lon: f64,
    max_lat: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl MapProjection {
    pub(crate) fn fit(
        points: impl IntoIterator<Item = (f64, f64)>,
        width: f64,
        height: f64,
        margin: f64,
    ) -> Option<Self> {
        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut any = false;
        for (lon, lat) in points {
            any = true;
            min_lon = min_lon.min(lon);
            max_lon = max_lon.max(lon);
            min_lat = min_lat.min(lat);
            max_lat = max_lat.max(lat);
        }
        if !any {
            return None;
        }

        let span_lon = (max_lon - min_lon).max(f64::EPSILON);
        let span_lat = (max_lat - min_lat).max(f64::EPSILON);
        let scale =
            ((width - 2.0 * margin) / span_lon).min((height - 2.0 * margin) / span_lat);
        let offset_x = (width - span_lon * scale) / 2.0;
        let offset_y = (height - span_lat * scale) / 2.0;

        Some(Self {
            min_lon,
            max_lat,
            scale,
            offset_x,
            offset_y,
        })
    }

    pub(crate) fn project(&self, (lon, lat): (f64, f64)) -> (f64, f64) {
        (
            self.offset_x + (lon - self.min_lon) * self.scale,
            self.offset_y + (self.max_lat - lat) * self.scale,
        )
    }

    /// Closed SVG path data for a ring.
    pub(crate) fn ring_path(&self, ring: &[(f64, f64)]) -> String {
        let mut d = String::new();
        for (index, &point) in ring.iter().enumerate() {
            let (x, y) = self.project(point);
            let op = if index == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{op} {x:.1} {y:.1} "));
        }
        d.push('Z');
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wardpulse_core::GeoFeature;

    #[test]
    fn test_known_emotions_have_fixed_colors() {
        assert_eq!(emotion_color("Hope"), "#2ecc71");
        assert_eq!(emotion_color("Anger"), "#e74c3c");
        assert_eq!(emotion_color("Apathy"), "#bdc3c7");
    }

    #[test]
    fn test_unknown_labels_take_default_color() {
        assert_eq!(emotion_color("Confusion"), DEFAULT_COLOR);
        assert_eq!(emotion_color(""), DEFAULT_COLOR);
    }

    #[test]
    fn test_feature_without_properties_styles_with_default() {
        let feature: GeoFeature = serde_json::from_value(json!({
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[78.4, 17.4], [78.5, 17.4], [78.5, 17.5], [78.4, 17.4]]]
            }
        }))
        .unwrap();

        assert_eq!(feature_fill(feature.properties.as_ref()), DEFAULT_COLOR);
        assert_eq!(polygon_rings(&feature.geometry).len(), 1);
    }

    #[test]
    fn test_polygon_rings_from_polygon() {
        let geometry = json!({
            "type": "Polygon",
            "coordinates": [[[78.4, 17.4], [78.5, 17.4], [78.5, 17.5], [78.4, 17.4]]]
        });
        let rings = polygon_rings(&geometry);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
    }

    #[test]
    fn test_polygon_rings_from_multi_polygon() {
        let geometry = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]],
                [[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0]]]
            ]
        });
        assert_eq!(polygon_rings(&geometry).len(), 2);
    }

    #[test]
    fn test_junk_geometry_yields_no_rings() {
        assert!(polygon_rings(&json!(null)).is_empty());
        assert!(polygon_rings(&json!("polygon")).is_empty());
        assert!(polygon_rings(&json!({ "type": "Point", "coordinates": [78.4, 17.4] })).is_empty());
        assert!(polygon_rings(&json!({ "type": "Polygon" })).is_empty());
    }

    #[test]
    fn test_degenerate_rings_are_dropped() {
        let geometry = json!({
            "type": "Polygon",
            "coordinates": [[[78.4, 17.4], [78.5, 17.4]]]
        });
        assert!(polygon_rings(&geometry).is_empty());
    }

    #[test]
    fn test_projection_fits_bounds_north_up() {
        let points = [(78.0, 17.0), (79.0, 18.0)];
        let projection = MapProjection::fit(points, 200.0, 100.0, 10.0).unwrap();

        let (west_x, south_y) = projection.project((78.0, 17.0));
        let (east_x, north_y) = projection.project((79.0, 18.0));

        assert!(west_x < east_x);
        assert!(north_y < south_y);
        for (x, y) in [(west_x, south_y), (east_x, north_y)] {
            assert!((0.0..=200.0).contains(&x));
            assert!((0.0..=100.0).contains(&y));
        }
    }

    #[test]
    fn test_projection_requires_points() {
        assert!(MapProjection::fit(std::iter::empty(), 200.0, 100.0, 10.0).is_none());
    }

    #[test]
    fn test_single_point_projects_finitely() {
        let projection = MapProjection::fit([(78.4, 17.4)], 200.0, 100.0, 10.0).unwrap();
        let (x, y) = projection.project((78.4, 17.4));
        assert!(x.is_finite() && y.is_finite());
    }

    #[test]
    fn test_ring_path_is_closed() {
        let projection = MapProjection::fit([(0.0, 0.0), (1.0, 1.0)], 100.0, 100.0, 0.0).unwrap();
        let d = projection.ring_path(&[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!(d.starts_with('M'));
        assert_eq!(d.matches('L').count(), 2);
        assert!(d.ends_with('Z'));
    }
}

//! Fetch and decode the remote GeoJSON documents.

mod client;

pub use client::{FeedClient, FeedError, HttpFeedClient};

#[cfg(test)]
pub use client::MockFeedClient;

use crate::present::Earthquake;
use geojson::{Feature, GeoJson, Geometry, Value};
use tracing::{info, warn};

/// A geographic line (sequence of lon/lat coordinates).
pub type LineString = Vec<(f64, f64)>;

/// Fetch both documents before first render. The requests are independent
/// and run on their own threads; neither waits on the other. A missing
/// boundary document degrades to a map without the overlay, while a failed
/// earthquake fetch is fatal for the run.
pub fn fetch_all(
    client: &dyn FeedClient,
    quake_url: &str,
    plates_url: Option<&str>,
) -> Result<(Vec<Earthquake>, Vec<LineString>), FeedError> {
    std::thread::scope(|scope| {
        let quakes = scope.spawn(|| fetch_earthquakes(client, quake_url));
        let boundaries = plates_url.map(|url| scope.spawn(move || fetch_boundaries(client, url)));

        let quakes = quakes
            .join()
            .map_err(|_| FeedError::Http("earthquake fetch worker panicked".to_string()))??;

        let boundaries = match boundaries {
            Some(handle) => {
                let result = handle
                    .join()
                    .map_err(|_| FeedError::Http("boundary fetch worker panicked".to_string()))?;
                match result {
                    Ok(lines) => lines,
                    Err(e) => {
                        warn!(error = %e, "boundary feed unavailable, overlay omitted");
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        Ok((quakes, boundaries))
    })
}

/// GET and decode the earthquake feed.
pub fn fetch_earthquakes(
    client: &dyn FeedClient,
    url: &str,
) -> Result<Vec<Earthquake>, FeedError> {
    let body = client.get(url)?;
    let quakes = parse_earthquakes(&body)?;
    info!(url, count = quakes.len(), "earthquake feed decoded");
    Ok(quakes)
}

/// GET and decode the plate-boundary feed.
pub fn fetch_boundaries(client: &dyn FeedClient, url: &str) -> Result<Vec<LineString>, FeedError> {
    let body = client.get(url)?;
    let lines = parse_boundaries(&body)?;
    info!(url, count = lines.len(), "boundary feed decoded");
    Ok(lines)
}

/// Decode a FeatureCollection of point events. Features without usable
/// point geometry are skipped with a warning; one bad record never fails
/// the batch.
pub fn parse_earthquakes(body: &[u8]) -> Result<Vec<Earthquake>, FeedError> {
    let collection = feature_collection(body)?;
    let mut quakes = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        match earthquake_from_feature(feature) {
            Some(quake) => quakes.push(quake),
            None => warn!("skipping feature without a usable point geometry"),
        }
    }
    Ok(quakes)
}

/// Decode a FeatureCollection of line geometries into plain line strings.
/// Polygonal geometries contribute their exterior rings.
pub fn parse_boundaries(body: &[u8]) -> Result<Vec<LineString>, FeedError> {
    let collection = feature_collection(body)?;
    let mut lines = Vec::new();
    for feature in &collection.features {
        if let Some(ref geometry) = feature.geometry {
            collect_lines(geometry, &mut lines);
        }
    }
    Ok(lines)
}

fn feature_collection(body: &[u8]) -> Result<geojson::FeatureCollection, FeedError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| FeedError::Parse(format!("response is not UTF-8: {e}")))?;
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| FeedError::Parse(e.to_string()))?;
    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(FeedError::Parse("expected a FeatureCollection".to_string())),
    }
}

/// The feed's per-feature property bag.
type Properties = serde_json::Map<String, serde_json::Value>;

fn prop<'a>(props: Option<&'a Properties>, key: &str) -> Option<&'a serde_json::Value> {
    props.and_then(|p| p.get(key))
}

fn earthquake_from_feature(feature: Feature) -> Option<Earthquake> {
    let props = feature.properties.as_ref();

    let magnitude = prop(props, "mag").and_then(|v| v.as_f64()).unwrap_or(0.0);
    let place = prop(props, "place")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown")
        .to_string();
    let time_ms = prop(props, "time").and_then(|v| v.as_i64()).unwrap_or(0);

    let geometry = feature.geometry?;
    let coords = match geometry.value {
        Value::Point(coords) => coords,
        _ => return None,
    };
    if coords.len() < 2 {
        return None;
    }

    Some(Earthquake {
        lon: coords[0],
        lat: coords[1],
        depth: coords.get(2).copied(),
        magnitude,
        place,
        time_ms,
    })
}

fn collect_lines(geometry: &Geometry, lines: &mut Vec<LineString>) {
    match &geometry.value {
        Value::LineString(coords) => {
            lines.push(coords.iter().map(|c| (c[0], c[1])).collect());
        }
        Value::MultiLineString(strings) => {
            for coords in strings {
                lines.push(coords.iter().map(|c| (c[0], c[1])).collect());
            }
        }
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                lines.push(exterior.iter().map(|c| (c[0], c[1])).collect());
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                if let Some(exterior) = rings.first() {
                    lines.push(exterior.iter().map(|c| (c[0], c[1])).collect());
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_lines(g, lines);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAKE_FEED: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"mag": 5.0, "place": "off the coast", "time": 0},
                "geometry": {"type": "Point", "coordinates": [-122.5, 38.1, 15.0]}
            },
            {
                "type": "Feature",
                "properties": {"mag": -1.0, "place": "quarry", "time": 1593611100000},
                "geometry": {"type": "Point", "coordinates": [10.0, 45.0]}
            }
        ]
    }"#;

    #[test]
    fn test_parse_earthquakes() {
        let quakes = parse_earthquakes(QUAKE_FEED.as_bytes()).unwrap();
        assert_eq!(quakes.len(), 2);
        assert_eq!(quakes[0].magnitude, 5.0);
        assert_eq!(quakes[0].depth, Some(15.0));
        assert_eq!(quakes[0].place, "off the coast");
        // second feature has no third coordinate
        assert_eq!(quakes[1].depth, None);
        assert_eq!(quakes[1].time_ms, 1_593_611_100_000);
    }

    #[test]
    fn test_malformed_feature_is_skipped() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"mag": 2.0}, "geometry": null},
                {
                    "type": "Feature",
                    "properties": {"mag": 3.0, "place": "kept", "time": 7},
                    "geometry": {"type": "Point", "coordinates": [1.0, 2.0, 3.0]}
                }
            ]
        }"#;
        let quakes = parse_earthquakes(body.as_bytes()).unwrap();
        assert_eq!(quakes.len(), 1);
        assert_eq!(quakes[0].place, "kept");
    }

    #[test]
    fn test_missing_properties_use_defaults() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": null,
                    "geometry": {"type": "Point", "coordinates": [1.0, 2.0, 3.0]}
                }
            ]
        }"#;
        let quakes = parse_earthquakes(body.as_bytes()).unwrap();
        assert_eq!(quakes[0].magnitude, 0.0);
        assert_eq!(quakes[0].place, "Unknown");
        assert_eq!(quakes[0].time_ms, 0);
    }

    #[test]
    fn test_not_a_collection_is_an_error() {
        let err = parse_earthquakes(b"{\"type\": \"Point\", \"coordinates\": [0.0, 0.0]}")
            .unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn test_parse_boundaries_lines_and_rings() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "MultiLineString", "coordinates": [
                        [[2.0, 2.0], [3.0, 3.0]],
                        [[4.0, 4.0], [5.0, 5.0]]
                    ]}
                }
            ]
        }"#;
        let lines = parse_boundaries(body.as_bytes()).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec![(0.0, 0.0), (1.0, 1.0)]);
    }

    #[test]
    fn test_fetch_error_propagates() {
        let mock = MockFeedClient {
            response: Err(FeedError::Status {
                status: 500,
                url: "http://feed".to_string(),
            }),
        };
        let err = fetch_earthquakes(&mock, "http://feed").unwrap_err();
        assert!(matches!(err, FeedError::Status { status: 500, .. }));
    }

    #[test]
    fn test_fetch_all_quake_failure_is_fatal() {
        let mock = MockFeedClient {
            response: Err(FeedError::Http("connection refused".to_string())),
        };
        assert!(fetch_all(&mock, "http://feed", None).is_err());
    }

    #[test]
    fn test_fetch_all_without_plates() {
        let mock = MockFeedClient {
            response: Ok(QUAKE_FEED.as_bytes().to_vec()),
        };
        let (quakes, boundaries) = fetch_all(&mock, "http://feed", None).unwrap();
        assert_eq!(quakes.len(), 2);
        assert!(boundaries.is_empty());
    }
}

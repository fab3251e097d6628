//! Turn fetched earthquake events into drawable markers with popup text.

use crate::encode::{bucket_color, marker_radius, DEPTH_BUCKETS};
use chrono::{TimeZone, Utc};
use rayon::prelude::*;

/// One earthquake event as consumed from the feed. Immutable after fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    pub lon: f64,
    pub lat: f64,
    /// Depth in kilometers; `None` when the source geometry carried no
    /// third coordinate.
    pub depth: Option<f64>,
    pub magnitude: f64,
    pub place: String,
    /// Event time, milliseconds since the Unix epoch.
    pub time_ms: i64,
}

/// Fill color when depth is unknown: the overflow bucket.
pub const UNKNOWN_DEPTH_COLOR: &str = DEPTH_BUCKETS[DEPTH_BUCKETS.len() - 1].1;

const STROKE: &str = "#000";
const STROKE_WEIGHT: f64 = 0.3;
const STROKE_OPACITY: f64 = 0.5;
const FILL_OPACITY: f64 = 1.0;

/// Everything the map needs to draw one event. Owned by the composed
/// frame; rebuilt only when the feed is reloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub lon: f64,
    pub lat: f64,
    /// Raw encoded radius. Non-positive values are kept on the marker
    /// but never drawn.
    pub radius: f64,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_weight: f64,
    pub stroke_opacity: f64,
    pub fill_opacity: f64,
    /// Shown while the pointer is over the marker, hidden when it leaves.
    pub popup: String,
}

/// Build the marker for one event: radius from magnitude, color from depth.
pub fn present(quake: &Earthquake) -> Marker {
    let fill = match quake.depth {
        Some(depth) => bucket_color(depth),
        None => UNKNOWN_DEPTH_COLOR,
    };
    Marker {
        lon: quake.lon,
        lat: quake.lat,
        radius: marker_radius(quake.magnitude),
        fill,
        stroke: STROKE,
        stroke_weight: STROKE_WEIGHT,
        stroke_opacity: STROKE_OPACITY,
        fill_opacity: FILL_OPACITY,
        popup: popup_text(quake),
    }
}

/// Present the whole batch. A weekly feed is a few hundred events, a
/// monthly one a few thousand; either way the work is independent per event.
pub fn present_all(quakes: &[Earthquake]) -> Vec<Marker> {
    quakes.par_iter().map(present).collect()
}

/// Popup body, one labeled field per line.
pub fn popup_text(quake: &Earthquake) -> String {
    let depth = match quake.depth {
        Some(d) => format!("{d}"),
        None => "unknown".to_string(),
    };
    format!(
        "Place: {}\nTime: {}\nMagnitude: {}\nDepth: {}",
        quake.place,
        format_time(quake.time_ms),
        quake.magnitude,
        depth
    )
}

/// Format an epoch-millisecond timestamp for the popup (24-hour, UTC).
pub fn format_time(time_ms: i64) -> String {
    match Utc.timestamp_millis_opt(time_ms).single() {
        Some(t) => t.format("%d-%b-%Y at %H:%M").to_string(),
        None => "unknown".to_string(),
    }
}

//! Visual encoding: magnitude → marker radius, depth → bucket color.

/// Depth buckets as (upper bound in km, fill color) pairs.
/// Upper bounds are inclusive; the last bucket catches everything above 90.
pub const DEPTH_BUCKETS: [(f64, &str); 6] = [
    (10.0, "#a7fb09"),
    (30.0, "#dcf900"),
    (50.0, "#f6de1a"),
    (70.0, "#fbb92e"),
    (90.0, "#faa35f"),
    (f64::INFINITY, "#ff5967"),
];

/// Legend edges: lower bound of the first bucket followed by each threshold.
const LEGEND_EDGES: [f64; 6] = [-10.0, 10.0, 30.0, 50.0, 70.0, 90.0];

/// Marker radius for a magnitude. No clamping: zero or negative magnitudes
/// encode to a non-positive radius, which the renderer treats as "not drawn".
#[inline(always)]
pub fn marker_radius(value: f64) -> f64 {
    value * 5.0
}

/// Fill color for a depth. Total over all inputs; NaN lands in the last bucket.
pub fn bucket_color(value: f64) -> &'static str {
    for &(bound, color) in &DEPTH_BUCKETS {
        if value <= bound {
            return color;
        }
    }
    DEPTH_BUCKETS[DEPTH_BUCKETS.len() - 1].1
}

/// Index of the bucket a depth falls in (0..=5).
pub fn bucket_index(value: f64) -> usize {
    DEPTH_BUCKETS
        .iter()
        .position(|&(bound, _)| value <= bound)
        .unwrap_or(DEPTH_BUCKETS.len() - 1)
}

/// One row of the legend: a range label and its swatch color.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
}

/// Derive the legend from the bucket edges. Adjacent edges become an
/// en-dash range; the open-ended last bucket gets a `+` suffix.
pub fn legend_entries() -> Vec<LegendEntry> {
    LEGEND_EDGES
        .iter()
        .enumerate()
        .map(|(i, &lower)| {
            let label = match LEGEND_EDGES.get(i + 1) {
                Some(upper) => format!("{lower}\u{2013}{upper}"),
                None => format!("{lower}+"),
            };
            LegendEntry {
                label,
                color: bucket_color(lower + 1.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_is_linear() {
        assert_eq!(marker_radius(5.0), 25.0);
        assert_eq!(marker_radius(0.0), 0.0);
        assert_eq!(marker_radius(-1.0), -5.0);
        assert_eq!(marker_radius(2.4), 12.0);
    }

    #[test]
    fn test_color_ladder() {
        assert_eq!(bucket_color(-10.0), "#a7fb09");
        assert_eq!(bucket_color(5.0), "#a7fb09");
        assert_eq!(bucket_color(15.0), "#dcf900");
        assert_eq!(bucket_color(45.0), "#f6de1a");
        assert_eq!(bucket_color(65.0), "#fbb92e");
        assert_eq!(bucket_color(89.9), "#faa35f");
        assert_eq!(bucket_color(91.0), "#ff5967");
        assert_eq!(bucket_color(700.0), "#ff5967");
    }

    #[test]
    fn test_boundaries_map_to_lower_bucket() {
        assert_eq!(bucket_color(10.0), "#a7fb09");
        assert_eq!(bucket_color(30.0), "#dcf900");
        assert_eq!(bucket_color(50.0), "#f6de1a");
        assert_eq!(bucket_color(70.0), "#fbb92e");
        assert_eq!(bucket_color(90.0), "#faa35f");
    }

    #[test]
    fn test_color_total_over_odd_inputs() {
        assert_eq!(bucket_color(f64::NEG_INFINITY), "#a7fb09");
        assert_eq!(bucket_color(f64::INFINITY), "#ff5967");
        assert_eq!(bucket_color(f64::NAN), "#ff5967");
    }

    #[test]
    fn test_bucket_index_tracks_color() {
        for v in [-20.0, 10.0, 10.1, 30.0, 49.0, 70.0, 90.0, 90.1, 1000.0] {
            assert_eq!(DEPTH_BUCKETS[bucket_index(v)].1, bucket_color(v));
        }
    }

    #[test]
    fn test_legend_has_six_entries() {
        let entries = legend_entries();
        assert_eq!(entries.len(), 6);
    }

    #[test]
    fn test_legend_labels() {
        let entries = legend_entries();
        assert_eq!(entries[0].label, "-10\u{2013}10");
        assert_eq!(entries[1].label, "10\u{2013}30");
        assert_eq!(entries[4].label, "70\u{2013}90");
        assert_eq!(entries[5].label, "90+");
        // every closed range uses an en-dash, only the last is open-ended
        for entry in &entries[..5] {
            assert!(entry.label.contains('\u{2013}'));
        }
        assert!(entries[5].label.ends_with('+'));
    }

    #[test]
    fn test_legend_colors_follow_buckets() {
        let entries = legend_entries();
        for (entry, &(_, color)) in entries.iter().zip(DEPTH_BUCKETS.iter()) {
            assert_eq!(entry.color, color);
        }
    }
}

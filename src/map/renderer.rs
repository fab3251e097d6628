use crate::braille::BrailleCanvas;
use crate::feed::LineString;
use crate::map::geometry::{draw_circle, draw_line, draw_ring};
use crate::map::projection::Viewport;
use crate::present::Marker;

/// Markers encode radii in the feed's own units; terminal cells are far
/// coarser than CSS pixels, so drawn radii are scaled down.
const MARKER_PIXEL_SCALE: f64 = 0.25;

/// Which layers are visible. The base style lives in the basemap source.
#[derive(Clone)]
pub struct DisplaySettings {
    pub show_earthquakes: bool,
    pub show_boundaries: bool,
    pub show_legend: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_earthquakes: true,
            show_boundaries: true,
            show_legend: true,
        }
    }
}

/// Canvases produced for one frame, one per drawing color.
pub struct MapLayers {
    pub basemap: BrailleCanvas,
    pub boundaries: BrailleCanvas,
    /// One canvas per depth bucket so each renders in its bucket color.
    pub markers: [BrailleCanvas; 6],
    /// Marker outlines (stroke).
    pub strokes: BrailleCanvas,
}

/// Composes the base layer, the boundary overlay and the marker layer.
/// Built once per run; layers are toggled, never refetched.
pub struct MapRenderer {
    pub coastlines: Vec<LineString>,
    pub boundaries: Vec<LineString>,
    pub markers: Vec<Marker>,
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            coastlines: Vec::new(),
            boundaries: Vec::new(),
            markers: Vec::new(),
            settings: DisplaySettings::default(),
        }
    }

    /// Render all visible layers onto fresh canvases of the given
    /// character dimensions.
    pub fn render(&self, width: usize, height: usize, viewport: &Viewport) -> MapLayers {
        let mut layers = MapLayers {
            basemap: BrailleCanvas::new(width, height),
            boundaries: BrailleCanvas::new(width, height),
            markers: std::array::from_fn(|_| BrailleCanvas::new(width, height)),
            strokes: BrailleCanvas::new(width, height),
        };

        for line in &self.coastlines {
            draw_linestring(&mut layers.basemap, line, viewport);
        }

        if self.settings.show_boundaries {
            for line in &self.boundaries {
                draw_linestring(&mut layers.boundaries, line, viewport);
            }
        }

        if self.settings.show_earthquakes {
            for marker in &self.markers {
                self.draw_marker(&mut layers, marker, viewport);
            }
        }

        layers
    }

    fn draw_marker(&self, layers: &mut MapLayers, marker: &Marker, viewport: &Viewport) {
        // Non-positive radius encodes "no visible marker"
        if marker.radius <= 0.0 {
            return;
        }
        let (px, py) = viewport.project(marker.lon, marker.lat);
        if !viewport.is_visible(px, py) {
            return;
        }

        let radius = pixel_radius(marker.radius);
        draw_circle(&mut layers.markers[fill_bucket(marker)], px, py, radius);
        if marker.stroke_weight > 0.0 {
            draw_ring(&mut layers.strokes, px, py, radius + 1);
        }
    }

    /// Topmost visible marker whose disc contains the pixel.
    pub fn marker_at(&self, px: i32, py: i32, viewport: &Viewport) -> Option<&Marker> {
        if !self.settings.show_earthquakes {
            return None;
        }
        self.markers.iter().rev().find(|marker| {
            if marker.radius <= 0.0 {
                return false;
            }
            let (mx, my) = viewport.project(marker.lon, marker.lat);
            let r = pixel_radius(marker.radius) + 1;
            let (dx, dy) = (px - mx, py - my);
            dx * dx + dy * dy <= r * r
        })
    }

    pub fn has_data(&self) -> bool {
        !self.markers.is_empty()
    }

    pub fn toggle_earthquakes(&mut self) {
        self.settings.show_earthquakes = !self.settings.show_earthquakes;
    }

    pub fn toggle_boundaries(&mut self) {
        self.settings.show_boundaries = !self.settings.show_boundaries;
    }

    pub fn toggle_legend(&mut self) {
        self.settings.show_legend = !self.settings.show_legend;
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drawn radius in braille pixels, never below one pixel for a visible marker.
fn pixel_radius(radius: f64) -> i32 {
    (radius * MARKER_PIXEL_SCALE).round().max(1.0) as i32
}

/// Index of the layer canvas a marker's fill color belongs to. Fallback
/// colors (unknown depth) land in the overflow bucket.
fn fill_bucket(marker: &Marker) -> usize {
    crate::encode::DEPTH_BUCKETS
        .iter()
        .position(|&(_, color)| color == marker.fill)
        .unwrap_or(crate::encode::DEPTH_BUCKETS.len() - 1)
}

/// Draw a linestring with viewport culling
fn draw_linestring(canvas: &mut BrailleCanvas, line: &LineString, viewport: &Viewport) {
    if line.len() < 2 {
        return;
    }

    let mut prev: Option<(i32, i32)> = None;

    for &(lon, lat) in line {
        let (px, py) = viewport.project(lon, lat);

        if let Some((prev_x, prev_y)) = prev {
            let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
            if dist < viewport.width && viewport.line_might_be_visible((prev_x, prev_y), (px, py)) {
                draw_line(canvas, prev_x, prev_y, px, py);
            }
        }

        prev = Some((px, py));
    }
}

use crate::basemap::{world_outline, BasemapSource, BaseStyle};
use crate::config::Config;
use crate::encode::{legend_entries, LegendEntry};
use crate::feed::LineString;
use crate::map::{MapRenderer, Viewport};
use crate::present::{present_all, Earthquake, Marker};

/// Legend panel width in characters, border included.
pub const LEGEND_WIDTH: u16 = 16;

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub renderer: MapRenderer,
    pub basemap: BasemapSource,
    /// Built once from the bucket table at startup.
    pub legend: Vec<LegendEntry>,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position for hover popups
    pub mouse_pos: Option<(u16, u16)>,
    /// Terminal dimensions in characters
    term_width: usize,
    term_height: usize,
    /// Initial view (lon, lat, zoom) for reset
    home: (f64, f64, f64),
}

impl App {
    pub fn new(config: &Config, term_width: usize, term_height: usize) -> Self {
        let mut app = Self {
            viewport: Viewport::new(config.center_lon, config.center_lat, config.zoom, 1, 1),
            renderer: MapRenderer::new(),
            basemap: BasemapSource::new(BaseStyle::Light, config.mapbox_token.clone()),
            legend: legend_entries(),
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
            term_width,
            term_height,
            home: (config.center_lon, config.center_lat, config.zoom),
        };
        app.renderer.coastlines = world_outline();
        app.layout_viewport();
        app
    }

    /// Install the fetched layers. Called once after both fetches complete.
    pub fn load(&mut self, quakes: &[Earthquake], boundaries: Vec<LineString>) {
        self.renderer.markers = present_all(quakes);
        self.renderer.boundaries = boundaries;
    }

    /// Map pane dimensions in characters, chrome excluded.
    pub fn map_chars(&self) -> (usize, usize) {
        let legend = if self.renderer.settings.show_legend {
            LEGEND_WIDTH as usize
        } else {
            0
        };
        // 2 columns of map border, 2 rows of border plus the status bar
        let width = self.term_width.saturating_sub(2 + legend);
        let height = self.term_height.saturating_sub(3);
        (width, height)
    }

    /// Recompute the viewport's pixel surface from the terminal layout.
    /// Braille gives 2x4 pixels per character.
    fn layout_viewport(&mut self) {
        let (width, height) = self.map_chars();
        self.viewport.width = width * 2;
        self.viewport.height = height * 4;
    }

    /// Update layout when the terminal resizes
    pub fn resize(&mut self, term_width: usize, term_height: usize) {
        self.term_width = term_width;
        self.term_height = term_height;
        self.layout_viewport();
    }

    /// Reset the view to the configured center and zoom
    pub fn reset_view(&mut self) {
        let (lon, lat, zoom) = self.home;
        self.viewport = Viewport::new(lon, lat, zoom, self.viewport.width, self.viewport.height);
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        let (px, py) = cell_to_pixel(col, row);
        self.viewport.zoom_in_at(px, py);
    }

    /// Zoom out from a screen position (terminal column/row)
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        let (px, py) = cell_to_pixel(col, row);
        self.viewport.zoom_out_at(px, py);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggle the earthquake layer
    pub fn toggle_earthquakes(&mut self) {
        self.renderer.toggle_earthquakes();
    }

    /// Toggle the fault-line overlay
    pub fn toggle_boundaries(&mut self) {
        self.renderer.toggle_boundaries();
    }

    /// Toggle the legend panel; the map pane absorbs the freed columns
    pub fn toggle_legend(&mut self) {
        self.renderer.toggle_legend();
        self.layout_viewport();
    }

    /// Switch to the next base style
    pub fn cycle_style(&mut self) {
        self.basemap.cycle_style();
    }

    /// Handle mouse drag panning
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            // Less sensitive when zoomed out
            let scale = if self.viewport.zoom < 2.0 {
                2
            } else if self.viewport.zoom < 4.0 {
                3
            } else {
                4
            };
            self.pan(dx * scale, dy * scale);
        }
        self.last_mouse = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    /// Marker under the pointer, if any. Drives the popup: visible while
    /// the pointer stays over the marker, gone when it leaves.
    pub fn hovered_marker(&self) -> Option<&Marker> {
        let (col, row) = self.mouse_pos?;
        let (px, py) = cell_to_pixel(col, row);
        self.renderer.marker_at(px, py, &self.viewport)
    }

    /// Current center coordinates as a string
    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }

    /// Current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }
}

/// Convert a terminal cell to braille pixel coordinates inside the map
/// pane (the pane's border occupies one cell on each side).
fn cell_to_pixel(col: u16, row: u16) -> (i32, i32) {
    let px = ((col.saturating_sub(1)) as i32) * 2;
    let py = ((row.saturating_sub(1)) as i32) * 4;
    (px, py)
}

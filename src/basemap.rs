//! Base-map styles and the embedded world outline they draw.

use crate::feed::LineString;
use ratatui::style::Color;

/// Named base-map styles, cycled at runtime without refetching any data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseStyle {
    Light,
    Satellite,
    Outdoors,
}

impl BaseStyle {
    pub fn name(self) -> &'static str {
        match self {
            BaseStyle::Light => "Light",
            BaseStyle::Satellite => "Satellite",
            BaseStyle::Outdoors => "Outdoors",
        }
    }

    /// Upstream style identifier the access token authorizes.
    pub fn style_id(self) -> &'static str {
        match self {
            BaseStyle::Light => "mapbox/light-v10",
            BaseStyle::Satellite => "mapbox/satellite-v9",
            BaseStyle::Outdoors => "mapbox/outdoors-v11",
        }
    }

    pub fn next(self) -> Self {
        match self {
            BaseStyle::Light => BaseStyle::Satellite,
            BaseStyle::Satellite => BaseStyle::Outdoors,
            BaseStyle::Outdoors => BaseStyle::Light,
        }
    }

    /// Terminal palette standing in for the raster style.
    pub fn palette(self) -> Palette {
        match self {
            BaseStyle::Light => Palette {
                coastline: Color::Gray,
                boundary: Color::Blue,
                chrome: Color::DarkGray,
            },
            BaseStyle::Satellite => Palette {
                coastline: Color::Green,
                boundary: Color::Cyan,
                chrome: Color::DarkGray,
            },
            BaseStyle::Outdoors => Palette {
                coastline: Color::LightGreen,
                boundary: Color::Blue,
                chrome: Color::DarkGray,
            },
        }
    }
}

/// Colors a style assigns to the non-marker layers.
pub struct Palette {
    pub coastline: Color,
    pub boundary: Color,
    pub chrome: Color,
}

/// The styled base layer: a style plus the credential its provider requires.
pub struct BasemapSource {
    pub style: BaseStyle,
    access_token: String,
}

impl BasemapSource {
    pub fn new(style: BaseStyle, access_token: String) -> Self {
        Self { style, access_token }
    }

    pub fn cycle_style(&mut self) {
        self.style = self.style.next();
    }

    /// Tile URL template for the active style, credential applied. The
    /// terminal renderer substitutes a vector outline for raster tiles;
    /// the template follows the provider's contract.
    pub fn tile_url_template(&self) -> String {
        format!(
            "https://api.mapbox.com/styles/v1/{}/tiles/{{z}}/{{x}}/{{y}}?access_token={}",
            self.style.style_id(),
            self.access_token
        )
    }

    pub fn attribution(&self) -> &'static str {
        "© Mapbox © OpenStreetMap"
    }
}

/// Simplified continent outlines drawn behind every style.
static WORLD_OUTLINE: &[&[(f64, f64)]] = &[
    // North America
    &[
        (-168.0, 65.0), (-166.0, 60.0), (-141.0, 60.0), (-130.0, 55.0),
        (-125.0, 48.0), (-124.0, 40.0), (-117.0, 32.0), (-110.0, 25.0),
        (-97.0, 25.0), (-97.0, 28.0), (-82.0, 24.0), (-80.0, 25.0),
        (-81.0, 31.0), (-75.0, 35.0), (-70.0, 41.0), (-67.0, 45.0),
        (-65.0, 47.0), (-55.0, 47.0), (-52.0, 47.0), (-55.0, 52.0),
        (-58.0, 55.0), (-64.0, 60.0), (-73.0, 62.0), (-80.0, 63.0),
        (-95.0, 62.0), (-110.0, 68.0), (-130.0, 70.0), (-145.0, 70.0),
        (-168.0, 65.0),
    ],
    // South America
    &[
        (-80.0, 10.0), (-75.0, 5.0), (-70.0, 5.0), (-60.0, 5.0),
        (-50.0, 0.0), (-35.0, -5.0), (-35.0, -10.0), (-38.0, -15.0),
        (-40.0, -22.0), (-48.0, -25.0), (-55.0, -34.0), (-58.0, -38.0),
        (-65.0, -42.0), (-68.0, -50.0), (-75.0, -52.0), (-75.0, -45.0),
        (-72.0, -40.0), (-72.0, -30.0), (-70.0, -20.0), (-70.0, -15.0),
        (-80.0, -5.0), (-80.0, 0.0), (-80.0, 10.0),
    ],
    // Europe
    &[
        (-10.0, 36.0), (-5.0, 36.0), (0.0, 38.0), (5.0, 43.0),
        (10.0, 44.0), (15.0, 45.0), (20.0, 40.0), (25.0, 37.0),
        (30.0, 40.0), (35.0, 42.0), (40.0, 43.0), (40.0, 55.0),
        (30.0, 60.0), (25.0, 65.0), (20.0, 70.0), (10.0, 71.0),
        (5.0, 62.0), (5.0, 58.0), (-5.0, 58.0), (-10.0, 52.0),
        (-5.0, 48.0), (-5.0, 43.0), (-10.0, 36.0),
    ],
    // Africa, Atlantic side
    &[
        (-17.0, 15.0), (-15.0, 10.0), (-10.0, 5.0), (0.0, 5.0),
        (10.0, 5.0), (15.0, 0.0), (20.0, -5.0), (25.0, -10.0),
        (35.0, -20.0), (35.0, -25.0), (30.0, -30.0), (20.0, -35.0),
        (18.0, -35.0), (15.0, -30.0), (10.0, -15.0), (10.0, 0.0),
        (5.0, 5.0), (-5.0, 5.0), (-10.0, 10.0), (-17.0, 15.0),
    ],
    // Africa, Mediterranean and Red Sea side
    &[
        (-17.0, 15.0), (-17.0, 20.0), (-15.0, 28.0), (-5.0, 35.0),
        (10.0, 37.0), (20.0, 33.0), (25.0, 32.0), (35.0, 30.0),
        (35.0, 20.0), (42.0, 12.0), (50.0, 12.0), (45.0, 5.0),
        (35.0, -5.0), (35.0, -20.0),
    ],
    // Asia
    &[
        (35.0, 42.0), (40.0, 43.0), (50.0, 40.0), (55.0, 37.0),
        (60.0, 25.0), (65.0, 25.0), (70.0, 20.0), (75.0, 15.0),
        (80.0, 8.0), (80.0, 15.0), (88.0, 22.0), (92.0, 22.0),
        (95.0, 16.0), (100.0, 14.0), (105.0, 10.0), (110.0, 20.0),
        (115.0, 22.0), (120.0, 22.0), (122.0, 25.0), (125.0, 30.0),
        (130.0, 35.0), (135.0, 35.0), (140.0, 40.0), (145.0, 45.0),
        (145.0, 50.0), (140.0, 55.0), (135.0, 55.0), (130.0, 52.0),
        (130.0, 43.0), (120.0, 40.0), (110.0, 45.0), (90.0, 50.0),
        (70.0, 55.0), (60.0, 55.0), (50.0, 50.0), (40.0, 43.0),
    ],
    // Australia
    &[
        (115.0, -20.0), (120.0, -18.0), (130.0, -12.0), (140.0, -12.0),
        (145.0, -15.0), (150.0, -25.0), (153.0, -30.0), (150.0, -35.0),
        (145.0, -38.0), (140.0, -38.0), (135.0, -35.0), (130.0, -32.0),
        (125.0, -32.0), (115.0, -35.0), (115.0, -25.0), (115.0, -20.0),
    ],
];

/// The embedded coastline outlines as owned line strings.
pub fn world_outline() -> Vec<LineString> {
    WORLD_OUTLINE.iter().map(|line| line.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_cycle_covers_all_styles() {
        let start = BaseStyle::Light;
        assert_eq!(start.next(), BaseStyle::Satellite);
        assert_eq!(start.next().next(), BaseStyle::Outdoors);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_tile_url_carries_style_and_token() {
        let source = BasemapSource::new(BaseStyle::Satellite, "pk.test-token".to_string());
        let url = source.tile_url_template();
        assert!(url.contains("mapbox/satellite-v9"));
        assert!(url.ends_with("access_token=pk.test-token"));
    }

    #[test]
    fn test_world_outline_is_closed_rings_or_lines() {
        let outline = world_outline();
        assert_eq!(outline.len(), 7);
        for line in &outline {
            assert!(line.len() >= 2);
        }
    }
}

//! Process configuration, read once at startup and passed in explicitly.

use thiserror::Error;

/// USGS summary feed, all events of the past week.
pub const QUAKE_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// PB2002 tectonic plate boundaries.
pub const PLATES_FEED_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

const TOKEN_VAR: &str = "MAPBOX_ACCESS_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing base-map access token: set {0}")]
    MissingToken(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub quake_url: String,
    pub plates_url: String,
    /// Access token required by the styled base-layer provider.
    pub mapbox_token: String,
    /// Initial view; fixed configuration, never derived from data.
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: f64,
    /// Fetch and show the plate-boundary overlay.
    pub plates: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key→value lookup; tests inject closures here.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mapbox_token = get(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken(TOKEN_VAR))?;

        let number = |key: &'static str, default: f64| -> Result<f64, ConfigError> {
            match get(key) {
                Some(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue { key, value: v }),
                None => Ok(default),
            }
        };

        Ok(Self {
            quake_url: get("QUAKEMAP_FEED_URL").unwrap_or_else(|| QUAKE_FEED_URL.to_string()),
            plates_url: get("QUAKEMAP_PLATES_URL").unwrap_or_else(|| PLATES_FEED_URL.to_string()),
            mapbox_token,
            center_lon: number("QUAKEMAP_CENTER_LON", 0.0)?,
            center_lat: number("QUAKEMAP_CENTER_LAT", 30.0902)?,
            zoom: number("QUAKEMAP_ZOOM", 2.2)?,
            plates: get("QUAKEMAP_PLATES").map(|v| v != "0").unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_missing_token_fails_fast() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken(_)));
        assert!(err.to_string().contains("MAPBOX_ACCESS_TOKEN"));
    }

    #[test]
    fn test_blank_token_rejected() {
        let err = Config::from_lookup(lookup(&[("MAPBOX_ACCESS_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken(_)));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("MAPBOX_ACCESS_TOKEN", "pk.test")])).unwrap();
        assert_eq!(config.quake_url, QUAKE_FEED_URL);
        assert_eq!(config.plates_url, PLATES_FEED_URL);
        assert_eq!(config.center_lat, 30.0902);
        assert_eq!(config.zoom, 2.2);
        assert!(config.plates);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("MAPBOX_ACCESS_TOKEN", "pk.test"),
            ("QUAKEMAP_FEED_URL", "http://localhost/quakes.json"),
            ("QUAKEMAP_ZOOM", "5"),
            ("QUAKEMAP_PLATES", "0"),
        ]))
        .unwrap();
        assert_eq!(config.quake_url, "http://localhost/quakes.json");
        assert_eq!(config.zoom, 5.0);
        assert!(!config.plates);
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("MAPBOX_ACCESS_TOKEN", "pk.test"),
            ("QUAKEMAP_ZOOM", "wide"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "QUAKEMAP_ZOOM", .. }
        ));
    }
}

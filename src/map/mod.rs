pub mod geometry;
pub mod projection;
pub mod renderer;

pub use projection::Viewport;
pub use renderer::{DisplaySettings, MapLayers, MapRenderer};

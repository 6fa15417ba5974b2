//! The land itself: seasons, weather and the territory grid

pub mod map;
pub mod weather;

pub use map::{Map, GRID_SIZE};
pub use weather::{Season, Weather, WeatherKind};

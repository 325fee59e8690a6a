pub mod geo;

pub use geo::{Coordinates, DistanceUnit, distance_km, format_distance};

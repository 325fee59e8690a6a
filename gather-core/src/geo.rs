use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

const KM_TO_MILES: f64 = 0.621371;

/// A point on the globe in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

/// Great-circle distance between two points via the Haversine formula,
/// rounded to one decimal place.
pub fn distance_km(from: &Coordinates, to: &Coordinates) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();

    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round_one_decimal(EARTH_RADIUS_KM * c)
}

/// Formats a kilometer distance for display, converting to miles on demand.
pub fn format_distance(distance: f64, unit: DistanceUnit) -> String {
    match unit {
        DistanceUnit::Kilometers => format!("{} km", distance),
        DistanceUnit::Miles => {
            format!("{} mi", round_one_decimal(distance * KM_TO_MILES))
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

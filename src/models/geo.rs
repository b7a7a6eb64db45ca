use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees (WGS84).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }
}

/// An inclusive geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl GeoBounds {
    /// Both edges are inclusive on both axes.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lng >= self.lng_min && lng <= self.lng_max
    }
}

/// A point in local Cartesian meters (x east, y north). Only meaningful
/// relative to the reference point it was projected from; never persisted
/// or compared across reference points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalXY {
    pub x: f64,
    pub y: f64,
}

//! Common primitives shared by problem and solver models.

#[cfg(test)]
#[path = "../../tests/unit/models/common_test.rs"]
mod common_test;

use rustc_hash::FxHashMap;

/// Alias to a scalar floating type.
pub type Float = f64;

/// Represents a monetary amount.
pub type Cost = Float;

/// Represents a distance in kilometers.
pub type Distance = Float;

/// Represents a zero-based planning period index.
pub type Period = usize;

/// A default circuit factor calibrating the tour-length approximation.
pub const DEFAULT_CIRCUIT_FACTOR: Float = 0.57;

/// Rounds a value to the given amount of decimal places.
pub fn round_to(value: Float, decimals: u32) -> Float {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Rounds a monetary value to two decimal places, the precision of serving cost tables.
pub fn round2(value: Cost) -> Cost {
    round_to(value, 2)
}

/// Rounds a monetary value to whole currency units, the precision of objective coefficients.
pub fn round0(value: Cost) -> Cost {
    value.round()
}

/// Represents a geographical point with optional zone attributes.
#[derive(Clone, Debug, Default)]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub lon: Float,
    /// Latitude in degrees.
    pub lat: Float,
    /// A surface area in square kilometers, set when the point denotes a zone centroid.
    pub area: Option<Float>,
    /// Intra-stop travel speed per vehicle id, set when the point denotes a zone centroid.
    pub speed_intra_stop: FxHashMap<String, Float>,
}

impl GeoPoint {
    /// Creates a point without zone attributes.
    pub fn new(lon: Float, lat: Float) -> Self {
        Self { lon, lat, ..Default::default() }
    }

    /// Creates a point carrying a zone surface area.
    pub fn with_area(lon: Float, lat: Float, area: Float) -> Self {
        Self { lon, lat, area: Some(area), speed_intra_stop: Default::default() }
    }
}

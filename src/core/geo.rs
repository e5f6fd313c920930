use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    #[serde(rename = "lon")]
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate from an (x, y) = (lon, lat) pair
    pub fn from_xy(x: f64, y: f64) -> Self {
        Self::new(y, x)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<geo_types::Point<f64>> for LatLng {
    fn from(point: geo_types::Point<f64>) -> Self {
        Self::from_xy(point.x(), point.y())
    }
}

/// Axis-aligned bounding box of a feature set, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Extent {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates an extent from (min-lon, min-lat, max-lon, max-lat)
    pub fn from_coords(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        Self::new(LatLng::new(min_lat, min_lng), LatLng::new(max_lat, max_lng))
    }

    pub fn from_rect(rect: geo_types::Rect<f64>) -> Self {
        let (min, max) = (rect.min(), rect.max());
        Self::from_coords(min.x, min.y, max.x, max.y)
    }

    pub fn min_lng(&self) -> f64 {
        self.south_west.lng
    }

    pub fn min_lat(&self) -> f64 {
        self.south_west.lat
    }

    pub fn max_lng(&self) -> f64 {
        self.north_east.lng
    }

    pub fn max_lat(&self) -> f64 {
        self.north_east.lat
    }

    /// Checks if the extent contains a point (edges included)
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Returns the union of this extent with another one
    pub fn union(&self, other: &Extent) -> Extent {
        let south = self.south_west.lat.min(other.south_west.lat);
        let west = self.south_west.lng.min(other.south_west.lng);
        let north = self.north_east.lat.max(other.north_east.lat);
        let east = self.north_east.lng.max(other.north_east.lng);

        Extent::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Midpoint of the box on each axis
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Gets the span of the extent on each axis
    pub fn span(&self) -> LatLng {
        LatLng::new(
            self.north_east.lat - self.south_west.lat,
            self.north_east.lng - self.south_west.lng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
    }

    #[test]
    fn test_lat_lng_from_point() {
        let coord = LatLng::from(geo_types::Point::new(-74.0060, 40.7128));
        assert_eq!(coord, LatLng::new(40.7128, -74.0060));
    }

    #[test]
    fn test_extent_contains() {
        let extent = Extent::from_coords(-75.0, 40.0, -73.0, 41.0);
        let point_inside = LatLng::new(40.5, -74.0);
        let point_outside = LatLng::new(42.0, -74.0);

        assert!(extent.contains(&point_inside));
        assert!(!extent.contains(&point_outside));
        assert!(extent.contains(&extent.south_west));
    }

    #[test]
    fn test_extent_union_and_span() {
        let a = Extent::from_coords(0.0, 0.0, 1.0, 1.0);
        let b = Extent::from_coords(-2.0, 0.5, 0.5, 4.0);
        let union = a.union(&b);

        assert_eq!(union, Extent::from_coords(-2.0, 0.0, 1.0, 4.0));
        assert_eq!(union.span(), LatLng::new(4.0, 3.0));
        assert_eq!(union.center(), LatLng::new(2.0, -0.5));
    }

    #[test]
    fn test_center_serializes_as_lon_lat() {
        let json = serde_json::to_value(LatLng::new(5.0, 10.0)).unwrap();
        assert_eq!(json, serde_json::json!({"lat": 5.0, "lon": 10.0}));
    }
}

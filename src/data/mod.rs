pub mod feature;
pub mod geojson;

pub use feature::{Feature, FeatureSet, GeometryKind, GroupKey, Value};
pub use geojson::{FeatureCollection, GeoJsonFeature, GeoJsonGeometry};

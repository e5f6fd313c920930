use crate::data::feature::{Feature, FeatureSet, Value};
use crate::{Error, Result};
use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use serde::{Deserialize, Serialize};

/// A position: longitude, latitude and an optional elevation
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCollectionTag {
    #[default]
    FeatureCollection,
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(rename = "type", default)]
    pub tag: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// `{"type": "FeatureCollection", "features": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub tag: FeatureCollectionTag,
    pub features: Vec<GeoJsonFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<GeoJsonFeature>) -> Self {
        Self {
            tag: FeatureCollectionTag::FeatureCollection,
            features,
        }
    }

    /// Parses a FeatureCollection document
    pub fn from_json_str(geojson_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(geojson_str)?)
    }

    /// Converts every feature of a set, using the feature position as id
    pub fn from_feature_set(set: &FeatureSet) -> Self {
        let features = set
            .features()
            .iter()
            .enumerate()
            .map(|(index, feature)| GeoJsonFeature::from_feature(set.columns(), index, feature))
            .collect();
        Self::new(features)
    }

    /// Builds a feature set; the schema is the union of property names in first-seen order
    pub fn to_feature_set(&self) -> Result<FeatureSet> {
        let mut columns: Vec<String> = Vec::new();
        for feature in &self.features {
            for name in feature.properties.iter().flat_map(|p| p.keys()) {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.clone());
                }
            }
        }

        let mut set = FeatureSet::new(columns.clone());
        for feature in &self.features {
            let attributes = columns
                .iter()
                .map(|name| {
                    feature
                        .properties
                        .as_ref()
                        .and_then(|p| p.get(name))
                        .map(Value::from_json)
                        .unwrap_or(Value::Null)
                })
                .collect();
            let geometry = feature.geometry.clone().map(Geometry::try_from).transpose()?;
            set.push(Feature {
                geometry,
                attributes,
            })?;
        }
        Ok(set)
    }
}

impl GeoJsonFeature {
    pub fn from_feature(columns: &[String], index: usize, feature: &Feature) -> Self {
        let properties = columns
            .iter()
            .zip(&feature.attributes)
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();

        Self {
            tag: FeatureTag::Feature,
            id: Some(serde_json::Value::String(index.to_string())),
            geometry: feature.geometry.as_ref().map(GeoJsonGeometry::from),
            properties: Some(properties),
        }
    }
}

fn position(c: &Coord<f64>) -> Position {
    vec![c.x, c.y]
}

fn ring(line: &LineString<f64>) -> Vec<Position> {
    line.0.iter().map(position).collect()
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring)
        .collect()
}

impl From<&Geometry<f64>> for GeoJsonGeometry {
    fn from(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(p) => GeoJsonGeometry::Point {
                coordinates: position(&p.0),
            },
            Geometry::Line(l) => GeoJsonGeometry::LineString {
                coordinates: vec![position(&l.start), position(&l.end)],
            },
            Geometry::LineString(ls) => GeoJsonGeometry::LineString {
                coordinates: ring(ls),
            },
            Geometry::Polygon(p) => GeoJsonGeometry::Polygon {
                coordinates: polygon_rings(p),
            },
            Geometry::Rect(r) => GeoJsonGeometry::Polygon {
                coordinates: polygon_rings(&r.to_polygon()),
            },
            Geometry::Triangle(t) => GeoJsonGeometry::Polygon {
                coordinates: polygon_rings(&t.to_polygon()),
            },
            Geometry::MultiPoint(mp) => GeoJsonGeometry::MultiPoint {
                coordinates: mp.0.iter().map(|p| position(&p.0)).collect(),
            },
            Geometry::MultiLineString(mls) => GeoJsonGeometry::MultiLineString {
                coordinates: mls.0.iter().map(ring).collect(),
            },
            Geometry::MultiPolygon(mp) => GeoJsonGeometry::MultiPolygon {
                coordinates: mp.0.iter().map(polygon_rings).collect(),
            },
            Geometry::GeometryCollection(gc) => GeoJsonGeometry::GeometryCollection {
                geometries: gc.0.iter().map(GeoJsonGeometry::from).collect(),
            },
        }
    }
}

/// Keeps longitude and latitude; an elevation, if any, is dropped
fn to_coord(position: &[f64]) -> Result<Coord<f64>> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(Error::Encoding(format!(
            "position needs at least two values, got {}",
            position.len()
        ))),
    }
}

fn to_line(positions: Vec<Position>) -> Result<LineString<f64>> {
    positions
        .iter()
        .map(|p| to_coord(p))
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

fn to_polygon(rings: Vec<Vec<Position>>) -> Result<Polygon<f64>> {
    let mut rings = rings.into_iter();
    let exterior = rings
        .next()
        .ok_or_else(|| Error::Encoding("polygon without exterior ring".into()))?;
    let interiors = rings.map(to_line).collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(to_line(exterior)?, interiors))
}

impl TryFrom<GeoJsonGeometry> for Geometry<f64> {
    type Error = Error;

    fn try_from(geometry: GeoJsonGeometry) -> Result<Self> {
        Ok(match geometry {
            GeoJsonGeometry::Point { coordinates } => {
                Geometry::Point(Point::from(to_coord(&coordinates)?))
            }
            GeoJsonGeometry::LineString { coordinates } => {
                Geometry::LineString(to_line(coordinates)?)
            }
            GeoJsonGeometry::Polygon { coordinates } => Geometry::Polygon(to_polygon(coordinates)?),
            GeoJsonGeometry::MultiPoint { coordinates } => Geometry::MultiPoint(MultiPoint(
                coordinates
                    .iter()
                    .map(|c| to_coord(c).map(Point::from))
                    .collect::<Result<Vec<_>>>()?,
            )),
            GeoJsonGeometry::MultiLineString { coordinates } => {
                Geometry::MultiLineString(MultiLineString(
                    coordinates
                        .into_iter()
                        .map(to_line)
                        .collect::<Result<Vec<_>>>()?,
                ))
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => Geometry::MultiPolygon(MultiPolygon(
                coordinates
                    .into_iter()
                    .map(to_polygon)
                    .collect::<Result<Vec<_>>>()?,
            )),
            GeoJsonGeometry::GeometryCollection { geometries } => {
                Geometry::GeometryCollection(GeometryCollection(
                    geometries
                        .into_iter()
                        .map(Geometry::try_from)
                        .collect::<Result<Vec<_>>>()?,
                ))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{point, polygon};

    #[test]
    fn test_geojson_parsing() {
        let geojson_str = r#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Test Point", "pop": 8336817},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [-74.0060, 40.7128]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {"kind": "city"},
                    "geometry": null
                }
            ]
        }
        "#;

        let collection = FeatureCollection::from_json_str(geojson_str).unwrap();
        let set = collection.to_feature_set().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.columns(), ["name", "pop", "kind"]);
        assert_eq!(set.features()[0].attributes[1], Value::Int(8336817));
        assert_eq!(set.features()[0].attributes[2], Value::Null);
        assert!(set.features()[1].geometry.is_none());
    }

    #[test]
    fn test_feature_serializes_with_type_tags() {
        let set = FeatureSet::new(["name"])
            .with_feature(point!(x: 1.0, y: 2.0), vec!["a".into()])
            .unwrap();
        let json = serde_json::to_value(FeatureCollection::from_feature_set(&set)).unwrap();

        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["type"], "Feature");
        assert_eq!(json["features"][0]["id"], "0");
        assert_eq!(json["features"][0]["geometry"]["type"], "Point");
        assert_eq!(
            json["features"][0]["geometry"]["coordinates"],
            serde_json::json!([1.0, 2.0])
        );
        assert_eq!(json["features"][0]["properties"]["name"], "a");
    }

    #[test]
    fn test_polygon_keeps_holes() {
        let poly = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)],
            interiors: [[(x: 2.0, y: 2.0), (x: 4.0, y: 2.0), (x: 4.0, y: 4.0)]]
        );
        let geometry = Geometry::Polygon(poly);

        match GeoJsonGeometry::from(&geometry) {
            GeoJsonGeometry::Polygon { coordinates } => {
                assert_eq!(coordinates.len(), 2);
                assert_eq!(coordinates[0][0], vec![0.0, 0.0]);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
        assert_eq!(
            Geometry::<f64>::try_from(GeoJsonGeometry::from(&geometry)).unwrap(),
            geometry
        );
    }

    #[test]
    fn test_empty_polygon_is_rejected() {
        let result = Geometry::<f64>::try_from(GeoJsonGeometry::Polygon {
            coordinates: vec![],
        });
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_elevation_is_dropped() {
        let geojson_str = r#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Paris"},
                    "geometry": {"type": "Point", "coordinates": [2.35, 48.85, 35.0]}
                },
                {
                    "type": "Feature",
                    "properties": {"name": "Park"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [1.0, 1.0, 6.0], [0.0, 0.0, 5.0]]]
                    }
                }
            ]
        }
        "#;

        let set = FeatureCollection::from_json_str(geojson_str)
            .unwrap()
            .to_feature_set()
            .unwrap();
        assert_eq!(
            set.features()[0].geometry,
            Some(Geometry::Point(point!(x: 2.35, y: 48.85)))
        );
        assert_eq!(
            set.features()[1].geometry,
            Some(Geometry::Polygon(polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
            ]))
        );
    }

    #[test]
    fn test_short_position_is_rejected() {
        let result = Geometry::<f64>::try_from(GeoJsonGeometry::Point {
            coordinates: vec![1.0],
        });
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_geometry_collection_converts_both_ways() {
        let json = r#"{
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [1.0, 2.0]},
                {"type": "LineString", "coordinates": [[0.0, 0.0], [3.0, 4.0]]}
            ]
        }"#;
        let parsed: GeoJsonGeometry = serde_json::from_str(json).unwrap();
        let geometry = Geometry::<f64>::try_from(parsed).unwrap();

        let expected = Geometry::GeometryCollection(GeometryCollection(vec![
            Geometry::Point(point!(x: 1.0, y: 2.0)),
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (3.0, 4.0)])),
        ]));
        assert_eq!(geometry, expected);
        assert_eq!(
            serde_json::to_value(GeoJsonGeometry::from(&geometry)).unwrap()["geometries"][1]["type"],
            "LineString"
        );
    }
}

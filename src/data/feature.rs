use crate::constants::DEFAULT_GEOMETRY_COLUMN;
use crate::{Error, Result};
use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute value carried by a feature or a database cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Hashable identity used when grouping features by this value.
    pub fn group_key(&self) -> GroupKey {
        match self {
            Value::Null => GroupKey::Null,
            Value::Bool(b) => GroupKey::Bool(*b),
            Value::Int(i) => GroupKey::Int(*i),
            // -0.0 and 0.0 land in the same group
            Value::Float(f) if *f == 0.0 => GroupKey::Float(0f64.to_bits()),
            Value::Float(f) => GroupKey::Float(f.to_bits()),
            Value::Text(s) => GroupKey::Text(s.clone()),
            Value::Bytes(b) => GroupKey::Bytes(b.clone()),
        }
    }

    /// Converts to a JSON value for interchange payloads
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::String(hex::encode(b)),
        }
    }

    /// Converts from a JSON property value; nested values are kept as JSON text
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" on whole numbers
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bytes(b) => write!(f, "{}", hex::encode(b)),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Hashable counterpart of [`Value`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(String),
    Bytes(Vec<u8>),
}

/// Closed set of geometry kinds the pipeline distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub fn of(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Line(_) | Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {
                GeometryKind::Polygon
            }
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// Only single points are drawn as bare markers; everything else also gets an overlay.
    pub fn is_point(&self) -> bool {
        matches!(self, GeometryKind::Point)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One geographic entity: a geometry plus one value per schema column
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry<f64>>,
    pub attributes: Vec<Value>,
}

impl Feature {
    pub fn new(geometry: impl Into<Geometry<f64>>, attributes: Vec<Value>) -> Self {
        Self {
            geometry: Some(geometry.into()),
            attributes,
        }
    }

    pub fn without_geometry(attributes: Vec<Value>) -> Self {
        Self {
            geometry: None,
            attributes,
        }
    }

    pub fn kind(&self) -> Option<GeometryKind> {
        self.geometry.as_ref().map(GeometryKind::of)
    }
}

/// Ordered features sharing one attribute schema and an optional SRID
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    columns: Vec<String>,
    geometry_column: String,
    srid: Option<i32>,
    features: Vec<Feature>,
}

impl FeatureSet {
    /// Creates an empty set with the given attribute columns
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            geometry_column: DEFAULT_GEOMETRY_COLUMN.to_string(),
            srid: None,
            features: Vec::new(),
        }
    }

    /// Creates a set from geometries alone, with no attributes
    pub fn from_geometries<G: Into<Geometry<f64>>>(geometries: impl IntoIterator<Item = G>) -> Self {
        let mut set = Self::new(Vec::<String>::new());
        set.features = geometries
            .into_iter()
            .map(|g| Feature::new(g, Vec::new()))
            .collect();
        set
    }

    pub fn with_srid(mut self, srid: Option<i32>) -> Self {
        self.srid = srid;
        self
    }

    pub fn with_geometry_column(mut self, name: impl Into<String>) -> Self {
        self.geometry_column = name.into();
        self
    }

    /// Appends a feature, checking it against the schema
    pub fn push(&mut self, feature: Feature) -> Result<()> {
        if feature.attributes.len() != self.columns.len() {
            return Err(Error::SchemaMismatch {
                expected: self.columns.len(),
                found: feature.attributes.len(),
            });
        }
        self.features.push(feature);
        Ok(())
    }

    /// Builder-style [`push`](Self::push)
    pub fn with_feature(
        mut self,
        geometry: impl Into<Geometry<f64>>,
        attributes: Vec<Value>,
    ) -> Result<Self> {
        self.push(Feature::new(geometry, attributes))?;
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn geometry_column(&self) -> &str {
        &self.geometry_column
    }

    pub fn srid(&self) -> Option<i32> {
        self.srid
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one attribute column, in feature order
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
        Ok(self.features.iter().map(move |f| &f.attributes[index]))
    }

    /// A copy restricted to the features at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> FeatureSet {
        FeatureSet {
            columns: self.columns.clone(),
            geometry_column: self.geometry_column.clone(),
            srid: self.srid,
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
        }
    }

    /// A copy with one attribute column removed
    pub fn without_column(&self, name: &str) -> Result<FeatureSet> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;

        let mut columns = self.columns.clone();
        columns.remove(index);
        let features = self
            .features
            .iter()
            .map(|f| {
                let mut attributes = f.attributes.clone();
                attributes.remove(index);
                Feature {
                    geometry: f.geometry.clone(),
                    attributes,
                }
            })
            .collect();

        Ok(FeatureSet {
            columns,
            geometry_column: self.geometry_column.clone(),
            srid: self.srid,
            features,
        })
    }

    /// Geometry kinds of all features; `None` entries for missing geometries
    pub fn kinds(&self) -> impl Iterator<Item = Option<GeometryKind>> + '_ {
        self.features.iter().map(Feature::kind)
    }
}

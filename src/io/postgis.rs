//! Reading feature sets from, and writing them to, PostGIS-style tables.

use crate::{
    constants::{DEFAULT_DB_GEOMETRY_COLUMN, UNKNOWN_SRID},
    data::feature::{Feature, FeatureSet, GeometryKind, Value},
    io::{
        connection::{ColumnSpec, IfExists, SpatialConnection},
        ewkt::to_ewkt,
        wkb::{self, DecodedGeometry},
    },
    Error, Result,
};
use std::fmt;

/// PostGIS column geometry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostGisType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    /// Any geometry; used when kinds are mixed
    Geometry,
}

impl PostGisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostGisType::Point => "POINT",
            PostGisType::LineString => "LINESTRING",
            PostGisType::Polygon => "POLYGON",
            PostGisType::MultiPoint => "MULTIPOINT",
            PostGisType::MultiLineString => "MULTILINESTRING",
            PostGisType::MultiPolygon => "MULTIPOLYGON",
            PostGisType::GeometryCollection => "GEOMETRYCOLLECTION",
            PostGisType::Geometry => "GEOMETRY",
        }
    }

    /// The exact type when every feature has the same kind, `GEOMETRY` otherwise.
    ///
    /// Missing geometries count as a different kind, and an empty set is `GEOMETRY`.
    pub fn for_kinds(kinds: impl IntoIterator<Item = Option<GeometryKind>>) -> Self {
        let mut kinds = kinds.into_iter();
        let first = match kinds.next() {
            Some(Some(kind)) => kind,
            _ => return PostGisType::Geometry,
        };
        if kinds.all(|kind| kind == Some(first)) {
            PostGisType::from(first)
        } else {
            PostGisType::Geometry
        }
    }

    pub fn for_set(set: &FeatureSet) -> Self {
        Self::for_kinds(set.kinds())
    }
}

impl From<GeometryKind> for PostGisType {
    fn from(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Point => PostGisType::Point,
            GeometryKind::LineString => PostGisType::LineString,
            GeometryKind::Polygon => PostGisType::Polygon,
            GeometryKind::MultiPoint => PostGisType::MultiPoint,
            GeometryKind::MultiLineString => PostGisType::MultiLineString,
            GeometryKind::MultiPolygon => PostGisType::MultiPolygon,
            GeometryKind::GeometryCollection => PostGisType::GeometryCollection,
        }
    }
}

impl fmt::Display for PostGisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How geometry cells are encoded in query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeometryEncoding {
    /// Hex text, the PostGIS default
    #[default]
    Hex,
    /// Raw bytes, as SQLite-based stores return them
    Binary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadOptions {
    pub geometry_column: String,
    /// SRID for the result; taken from the first geometry when `None`
    pub srid: Option<i32>,
    pub encoding: GeometryEncoding,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            geometry_column: DEFAULT_DB_GEOMETRY_COLUMN.to_string(),
            srid: None,
            encoding: GeometryEncoding::Hex,
        }
    }
}

impl ReadOptions {
    pub fn with_geometry_column(mut self, name: impl Into<String>) -> Self {
        self.geometry_column = name.into();
        self
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }

    pub fn with_encoding(mut self, encoding: GeometryEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteOptions {
    pub if_exists: IfExists,
    /// Column type to use instead of the one inferred from the features
    pub geometry_type: Option<PostGisType>,
    /// SRID to use instead of the feature set's
    pub srid: Option<i32>,
}

impl WriteOptions {
    pub fn with_if_exists(mut self, if_exists: IfExists) -> Self {
        self.if_exists = if_exists;
        self
    }

    pub fn with_geometry_type(mut self, geometry_type: PostGisType) -> Self {
        self.geometry_type = Some(geometry_type);
        self
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }
}

fn decode_cell(value: &Value, encoding: GeometryEncoding) -> Result<Option<DecodedGeometry>> {
    let decoded = match (value, encoding) {
        (Value::Null, _) => return Ok(None),
        (Value::Bytes(bytes), GeometryEncoding::Hex) => wkb::decode_hex(bytes)?,
        (Value::Bytes(bytes), GeometryEncoding::Binary) => wkb::decode(bytes)?,
        (Value::Text(text), GeometryEncoding::Hex) => wkb::decode_hex(text)?,
        (Value::Text(text), GeometryEncoding::Binary) => wkb::decode(text.as_bytes())?,
        (other, _) => {
            return Err(Error::Encoding(format!(
                "geometry cell holds a non-geometry value: {}",
                other
            )))
        }
    };
    Ok(Some(decoded))
}

/// Runs `sql` (or reads the table it names) and decodes the geometry column.
///
/// Every row is assumed to share one reference system: without an explicit
/// SRID the first decoded geometry's is applied to the whole result, and 0
/// leaves it unset.
pub fn read_postgis<C: SpatialConnection + ?Sized>(
    sql: &str,
    conn: &mut C,
    options: &ReadOptions,
) -> Result<FeatureSet> {
    let table = conn.query(sql)?;
    let geometry_index = table
        .column_index(&options.geometry_column)
        .ok_or_else(|| Error::MissingColumn(options.geometry_column.clone()))?;

    let columns: Vec<String> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != geometry_index)
        .map(|(_, name)| name.clone())
        .collect();

    let mut first_srid = None;
    let mut set = FeatureSet::new(columns).with_geometry_column(options.geometry_column.clone());

    for row in table.rows {
        let mut geometry = None;
        let mut attributes = Vec::with_capacity(row.len().saturating_sub(1));
        for (i, value) in row.into_iter().enumerate() {
            if i == geometry_index {
                geometry = decode_cell(&value, options.encoding)?;
            } else {
                attributes.push(value);
            }
        }
        if let (None, Some(decoded)) = (first_srid, &geometry) {
            first_srid = Some(decoded.srid);
        }
        set.push(Feature {
            geometry: geometry.map(|d| d.geometry),
            attributes,
        })?;
    }

    let srid = options
        .srid
        .or(first_srid)
        .filter(|&srid| srid != UNKNOWN_SRID);

    #[cfg(feature = "debug")]
    log::debug!("read {} features, srid {:?}", set.len(), srid);

    Ok(set.with_srid(srid))
}

/// Writes `set` into table `name`.
///
/// The geometry column type is inferred from the features unless overridden,
/// and every geometry is sent as EWKT tagged with the resolved SRID. Conflict
/// handling is left to the connection.
pub fn write_postgis<C: SpatialConnection + ?Sized>(
    set: &FeatureSet,
    name: &str,
    conn: &mut C,
    options: &WriteOptions,
) -> Result<()> {
    let geometry_type = options
        .geometry_type
        .unwrap_or_else(|| PostGisType::for_set(set));
    let srid = options.srid.or(set.srid()).unwrap_or(UNKNOWN_SRID);

    let mut columns: Vec<ColumnSpec> = set
        .columns()
        .iter()
        .map(|c| ColumnSpec::attribute(c.clone()))
        .collect();
    columns.push(ColumnSpec::geometry(
        set.geometry_column(),
        geometry_type,
        srid,
    ));

    let rows = set
        .features()
        .iter()
        .map(|feature| {
            let mut row = feature.attributes.clone();
            row.push(match &feature.geometry {
                Some(geometry) => Value::Text(to_ewkt(geometry, srid)),
                None => Value::Null,
            });
            row
        })
        .collect();

    #[cfg(feature = "debug")]
    log::debug!(
        "writing {} features to '{}' as {}({})",
        set.len(),
        name,
        geometry_type,
        srid
    );

    conn.write_table(name, &columns, rows, options.if_exists)
}

//! The database seam.
//!
//! [`SpatialConnection`] is what the PostGIS adapter talks to; driver-backed
//! implementations live with the caller, who also owns the connection
//! lifecycle. [`MemoryConnection`] keeps tables in process and stores
//! geometry columns the way PostGIS does: written as EWKT, read back as hex
//! EWKB.

use crate::{
    data::feature::Value,
    io::{ewkt::parse_ewkt, postgis::PostGisType, wkb},
    Error, Result,
};
use indexmap::IndexMap;

/// What to do when writing into a table that already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IfExists {
    #[default]
    Fail,
    Replace,
    Append,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    Attribute,
    Geometry { geometry_type: PostGisType, srid: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnSpec {
    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Attribute,
        }
    }

    pub fn geometry(name: impl Into<String>, geometry_type: PostGisType, srid: i32) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Geometry {
                geometry_type,
                srid,
            },
        }
    }
}

/// Tabular query result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Blocking access to a spatial database
pub trait SpatialConnection {
    /// Runs a query, or reads a whole table when given a bare table name
    fn query(&mut self, sql: &str) -> Result<Table>;

    /// Creates, replaces or appends to a table; fails with
    /// [`Error::TableExists`] under [`IfExists::Fail`]
    fn write_table(
        &mut self,
        name: &str,
        columns: &[ColumnSpec],
        rows: Vec<Vec<Value>>,
        if_exists: IfExists,
    ) -> Result<()>;
}

#[derive(Debug, Clone)]
struct StoredTable {
    columns: Vec<ColumnSpec>,
    rows: Vec<Vec<Value>>,
}

/// In-process table store
#[derive(Debug, Default)]
pub struct MemoryConnection {
    tables: IndexMap<String, StoredTable>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Declared columns of a stored table
    pub fn schema(&self, name: &str) -> Option<&[ColumnSpec]> {
        self.tables.get(name).map(|t| t.columns.as_slice())
    }

    /// Accepts `name` or `SELECT * FROM name`
    fn table_name(sql: &str) -> Result<&str> {
        let sql = sql.trim().trim_end_matches(';').trim();
        let words: Vec<&str> = sql.split_whitespace().collect();
        match words.as_slice() {
            [name] => Ok(*name),
            [select, "*", from, name]
                if select.eq_ignore_ascii_case("select") && from.eq_ignore_ascii_case("from") =>
            {
                Ok(*name)
            }
            _ => Err(Error::Database(format!("unsupported query: {}", sql))),
        }
    }

    fn store_cell(value: Value, column: &ColumnSpec) -> Result<Value> {
        match (&column.column_type, value) {
            (ColumnType::Geometry { .. }, Value::Text(text)) => {
                let (geometry, srid) = parse_ewkt(&text)?;
                Ok(Value::Text(wkb::encode_hex(&geometry, srid)?))
            }
            (_, value) => Ok(value),
        }
    }
}

impl SpatialConnection for MemoryConnection {
    fn query(&mut self, sql: &str) -> Result<Table> {
        let name = Self::table_name(sql)?;
        let table = self
            .tables
            .get(name)
            .ok_or_else(|| Error::Database(format!("relation \"{}\" does not exist", name)))?;

        Ok(Table {
            columns: table.columns.iter().map(|c| c.name.clone()).collect(),
            rows: table.rows.clone(),
        })
    }

    fn write_table(
        &mut self,
        name: &str,
        columns: &[ColumnSpec],
        rows: Vec<Vec<Value>>,
        if_exists: IfExists,
    ) -> Result<()> {
        let rows = rows
            .into_iter()
            .map(|row| {
                if row.len() != columns.len() {
                    return Err(Error::SchemaMismatch {
                        expected: columns.len(),
                        found: row.len(),
                    });
                }
                row.into_iter()
                    .zip(columns)
                    .map(|(value, column)| Self::store_cell(value, column))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let existing = self.tables.get_mut(name);
        match (existing, if_exists) {
            (Some(_), IfExists::Fail) => return Err(Error::TableExists(name.to_string())),
            (Some(existing), IfExists::Append) => {
                let same_columns = existing.columns.len() == columns.len()
                    && existing
                        .columns
                        .iter()
                        .zip(columns)
                        .all(|(a, b)| a.name == b.name);
                if !same_columns {
                    return Err(Error::Database(format!(
                        "cannot append to '{}': column mismatch",
                        name
                    )));
                }
                existing.rows.extend(rows);
            }
            (Some(existing), IfExists::Replace) => {
                *existing = StoredTable {
                    columns: columns.to_vec(),
                    rows,
                };
            }
            (None, _) => {
                self.tables.insert(
                    name.to_string(),
                    StoredTable {
                        columns: columns.to_vec(),
                        rows,
                    },
                );
            }
        }

        #[cfg(feature = "debug")]
        log::debug!("wrote table '{}' ({:?})", name, if_exists);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::attribute("name"),
            ColumnSpec::geometry("geom", PostGisType::Point, 4326),
        ]
    }

    fn row(name: &str) -> Vec<Value> {
        vec![name.into(), "SRID=4326;POINT(1 2)".into()]
    }

    #[test]
    fn test_geometry_is_stored_as_hex_ewkb() {
        let mut conn = MemoryConnection::new();
        conn.write_table("places", &columns(), vec![row("a")], IfExists::Fail)
            .unwrap();

        let table = conn.query("SELECT * FROM places;").unwrap();
        assert_eq!(table.columns, vec!["name", "geom"]);
        assert_eq!(
            table.rows[0][1],
            Value::Text("0101000020E6100000000000000000F03F0000000000000040".into())
        );
    }

    #[test]
    fn test_if_exists_policies() {
        let mut conn = MemoryConnection::new();
        conn.write_table("places", &columns(), vec![row("a")], IfExists::Fail)
            .unwrap();

        let err = conn
            .write_table("places", &columns(), vec![row("b")], IfExists::Fail)
            .unwrap_err();
        assert!(matches!(err, Error::TableExists(name) if name == "places"));

        conn.write_table("places", &columns(), vec![row("b")], IfExists::Append)
            .unwrap();
        assert_eq!(conn.query("places").unwrap().rows.len(), 2);

        conn.write_table("places", &columns(), vec![row("c")], IfExists::Replace)
            .unwrap();
        let table = conn.query("places").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], Value::from("c"));
    }

    #[test]
    fn test_unknown_table_and_query() {
        let mut conn = MemoryConnection::new();
        assert!(matches!(conn.query("nowhere"), Err(Error::Database(_))));
        assert!(matches!(
            conn.query("SELECT name FROM places WHERE id = 1"),
            Err(Error::Database(_))
        ));
    }

    #[test]
    fn test_bad_geometry_text_is_an_encoding_error() {
        let mut conn = MemoryConnection::new();
        let result = conn.write_table(
            "places",
            &columns(),
            vec![vec!["a".into(), "POINT(oops)".into()]],
            IfExists::Fail,
        );
        assert!(matches!(result, Err(Error::Encoding(_))));
        assert!(!conn.has_table("places"));
    }
}

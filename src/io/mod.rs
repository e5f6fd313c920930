pub mod connection;
pub mod ewkt;
pub mod postgis;
pub mod wkb;

pub use connection::{ColumnSpec, ColumnType, IfExists, MemoryConnection, SpatialConnection, Table};
pub use postgis::{
    read_postgis, write_postgis, GeometryEncoding, PostGisType, ReadOptions, WriteOptions,
};

//! # geoplot
//!
//! Turns collections of geographic features into map scenes and animation
//! frames, and moves them in and out of spatial databases.
//!
//! The rendering side is a pure pipeline: a [`FeatureSet`] is summarized into
//! centroids and an extent, the extent drives the automatic camera, shapes are
//! turned into overlay layers and everything is assembled into a [`Scene`]
//! (or a sequence of frames when grouping by an attribute). Displaying the
//! result is left to a [`SceneRenderer`].

pub mod animation;
pub mod core;
pub mod data;
pub mod io;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod spatial;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{BaseMapStyle, PlotOptions},
    framing::{auto_center, auto_zoom, Framing},
    geo::{Extent, LatLng},
    plot::{plot, show, Plot},
    scene::{assemble_scene, Scene, SceneOptions},
};

pub use data::{
    feature::{Feature, FeatureSet, GeometryKind, Value},
    geojson::{FeatureCollection, GeoJsonFeature, GeoJsonGeometry},
};

pub use layers::{
    marker::{MarkerMode, MarkerStyle, MarkerTrace},
    vector::{build_layers, LayerDescriptor, LayerStyle, LayerStyleOverrides},
};

pub use animation::sequence::{animate, AnimationSequence, Frame};

pub use io::{
    connection::{IfExists, MemoryConnection, SpatialConnection, Table},
    postgis::{read_postgis, write_postgis, PostGisType, ReadOptions, WriteOptions},
};

pub use rendering::{json::JsonRenderer, SceneRenderer};

pub use spatial::summary::{summarize, Summary};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum GeoPlotError {
    #[error("feature set is empty")]
    EmptyInput,

    #[error("grouping attribute '{0}' is not part of the feature set schema")]
    InvalidGroupKey(String),

    #[error("query missing geometry column '{0}'")]
    MissingColumn(String),

    #[error("unknown attribute column '{0}'")]
    UnknownColumn(String),

    #[error("table '{0}' already exists")]
    TableExists(String),

    #[error("geometry encoding error: {0}")]
    Encoding(String),

    #[error("feature {index} has no usable geometry")]
    MissingGeometry { index: usize },

    #[error("row has {found} values but the schema has {expected} columns")]
    SchemaMismatch { expected: usize, found: usize },

    #[error("database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type alias for convenience
pub type Error = GeoPlotError;

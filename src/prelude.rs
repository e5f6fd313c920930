//! Prelude module for common geoplot types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use geoplot::prelude::*;`

pub use crate::core::{
    config::{BaseMapStyle, PlotOptions},
    framing::{auto_center, auto_zoom, Framing},
    geo::{Extent, LatLng},
    plot::{plot, show, Plot},
    scene::{assemble_scene, Scene, SceneOptions},
};

pub use crate::data::{
    feature::{Feature, FeatureSet, GeometryKind, Value},
    geojson::FeatureCollection,
};

pub use crate::layers::{
    marker::{MarkerMode, MarkerStyle, MarkerTrace},
    vector::{build_layers, LayerDescriptor, LayerStyleOverrides},
};

pub use crate::animation::sequence::{animate, AnimationSequence};

pub use crate::io::{
    connection::{IfExists, MemoryConnection, SpatialConnection},
    postgis::{read_postgis, write_postgis, ReadOptions, WriteOptions},
};

pub use crate::rendering::{json::JsonRenderer, SceneRenderer};

pub use crate::spatial::summary::{summarize, Summary};

pub use crate::{Error as GeoPlotError, Result};

pub use geo_types::Geometry;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

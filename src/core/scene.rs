//! Static scene assembly: markers at centroids, overlays for shapes and a
//! camera.

use crate::{
    constants::HOVER_TEXT_SEPARATOR,
    core::{config::BaseMapStyle, framing::Framing, geo::LatLng},
    data::feature::FeatureSet,
    layers::{
        marker::{MarkerMode, MarkerStyle, MarkerTrace},
        vector::{build_layers, LayerDescriptor, LayerStyleOverrides},
    },
    spatial::summary::summarize,
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// Base-map view: camera plus style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
    pub bearing: f64,
    pub pitch: f64,
    pub style: BaseMapStyle,
    #[serde(rename = "accesstoken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// One static map render description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub markers: MarkerTrace,
    pub layers: Vec<LayerDescriptor>,
    pub view: MapView,
}

impl Scene {
    pub fn center(&self) -> LatLng {
        self.view.center
    }

    pub fn zoom(&self) -> f64 {
        self.view.zoom
    }

    pub fn framing(&self) -> Framing {
        Framing {
            center: self.view.center,
            zoom: self.view.zoom,
        }
    }
}

/// Everything [`assemble_scene`] needs besides the features
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneOptions {
    pub center: Option<LatLng>,
    pub zoom: Option<f64>,
    pub marker: MarkerStyle,
    pub mode: MarkerMode,
    pub text_columns: Option<Vec<String>>,
    pub style: BaseMapStyle,
    pub access_token: Option<String>,
    pub layer_overrides: LayerStyleOverrides,
}

impl SceneOptions {
    /// Pins the camera, e.g. to share it between animation frames
    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.center = Some(framing.center);
        self.zoom = Some(framing.zoom);
        self
    }
}

/// Joins the selected attribute values of each feature with `_`.
pub fn hover_text(set: &FeatureSet, columns: &[String]) -> Result<Vec<String>> {
    let indices = columns
        .iter()
        .map(|name| {
            set.column_index(name)
                .ok_or_else(|| Error::UnknownColumn(name.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(set
        .features()
        .iter()
        .map(|feature| {
            indices
                .iter()
                .map(|&i| feature.attributes[i].to_string())
                .collect::<Vec<_>>()
                .join(HOVER_TEXT_SEPARATOR)
        })
        .collect())
}

/// Builds a [`Scene`] for a feature set.
///
/// Every feature gets a marker at its centroid; shapes additionally get an
/// overlay layer, so a polygon is drawn as its filled outline and can still be
/// hovered through its marker.
pub fn assemble_scene(set: &FeatureSet, options: &SceneOptions) -> Result<Scene> {
    let summary = summarize(set)?;
    let framing = Framing::resolve(&summary, options.center, options.zoom);

    let mut markers = MarkerTrace::new(&summary.centroids, options.mode, options.marker.clone());
    if let Some(columns) = &options.text_columns {
        markers = markers.with_text(hover_text(set, columns)?);
    }

    let layers = build_layers(set, &options.layer_overrides);

    #[cfg(feature = "debug")]
    log::debug!(
        "scene: {} markers, {} layers, center {:?}, zoom {}",
        markers.len(),
        layers.len(),
        framing.center,
        framing.zoom
    );

    Ok(Scene {
        markers,
        layers,
        view: MapView {
            center: framing.center,
            zoom: framing.zoom,
            bearing: 0.0,
            pitch: 0.0,
            style: options.style,
            access_token: options.access_token.clone(),
        },
    })
}

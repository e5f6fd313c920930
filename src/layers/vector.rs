//! Shape overlays: every non-point feature becomes its own layer.

use crate::{
    constants::{
        DEFAULT_LAYER_COLOR, DEFAULT_LAYER_OPACITY, DEFAULT_LAYER_OUTLINE_COLOR, LAYER_SOURCE_TYPE,
    },
    data::{
        feature::FeatureSet,
        geojson::{FeatureCollection, GeoJsonFeature},
    },
};
use serde::{Deserialize, Serialize};

/// How a layer paints its source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    #[default]
    Fill,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    #[serde(rename = "outlinecolor")]
    pub outline_color: String,
}

/// Style shared by every overlay built in one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    #[serde(rename = "sourcetype")]
    pub source_type: String,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    pub color: String,
    pub opacity: f64,
    pub fill: FillStyle,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            source_type: LAYER_SOURCE_TYPE.to_string(),
            layer_type: LayerType::Fill,
            color: DEFAULT_LAYER_COLOR.to_string(),
            opacity: DEFAULT_LAYER_OPACITY,
            fill: FillStyle {
                outline_color: DEFAULT_LAYER_OUTLINE_COLOR.to_string(),
            },
        }
    }
}

/// Optional replacements for the [`LayerStyle`] defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerStyleOverrides {
    pub color: Option<String>,
    pub opacity: Option<f64>,
    pub layer_type: Option<LayerType>,
    pub outline_color: Option<String>,
}

impl LayerStyleOverrides {
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_layer_type(mut self, layer_type: LayerType) -> Self {
        self.layer_type = Some(layer_type);
        self
    }

    pub fn with_outline_color(mut self, color: impl Into<String>) -> Self {
        self.outline_color = Some(color.into());
        self
    }

    pub fn apply(&self, mut style: LayerStyle) -> LayerStyle {
        if let Some(color) = &self.color {
            style.color = color.clone();
        }
        if let Some(opacity) = self.opacity {
            style.opacity = opacity;
        }
        if let Some(layer_type) = self.layer_type {
            style.layer_type = layer_type;
        }
        if let Some(outline) = &self.outline_color {
            style.fill.outline_color = outline.clone();
        }
        style
    }
}

/// One overlay: a style plus a collection holding exactly one feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    #[serde(flatten)]
    pub style: LayerStyle,
    pub source: FeatureCollection,
}

impl LayerDescriptor {
    pub fn feature(&self) -> Option<&GeoJsonFeature> {
        self.source.features.first()
    }
}

/// Builds one layer per feature whose geometry is not a point.
///
/// Each layer wraps its feature in its own single-element collection so that
/// shapes stay independently styleable. Features without geometry are not
/// shapes and are skipped here; the summarizer is what rejects them.
pub fn build_layers(set: &FeatureSet, overrides: &LayerStyleOverrides) -> Vec<LayerDescriptor> {
    let style = overrides.apply(LayerStyle::default());

    set.features()
        .iter()
        .enumerate()
        .filter(|(_, feature)| matches!(feature.kind(), Some(kind) if !kind.is_point()))
        .map(|(index, feature)| LayerDescriptor {
            style: style.clone(),
            source: FeatureCollection::new(vec![GeoJsonFeature::from_feature(
                set.columns(),
                index,
                feature,
            )]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geojson::GeoJsonGeometry;
    use geo_types::{line_string, point, polygon, MultiPoint};

    fn mixed() -> FeatureSet {
        FeatureSet::new(["name"])
            .with_feature(point!(x: 0.0, y: 0.0), vec!["p".into()])
            .unwrap()
            .with_feature(
                polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
                vec!["poly".into()],
            )
            .unwrap()
            .with_feature(
                line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0)],
                vec!["line".into()],
            )
            .unwrap()
    }

    #[test]
    fn test_points_are_skipped() {
        let layers = build_layers(&mixed(), &LayerStyleOverrides::default());
        assert_eq!(layers.len(), 2);
        for layer in &layers {
            assert_eq!(layer.source.features.len(), 1);
            assert!(!matches!(
                layer.feature().and_then(|f| f.geometry.as_ref()),
                Some(GeoJsonGeometry::Point { .. })
            ));
        }
        assert_eq!(
            layers[1].feature().unwrap().properties.as_ref().unwrap()["name"],
            "line"
        );
    }

    #[test]
    fn test_multipoint_gets_a_layer() {
        let set = FeatureSet::from_geometries([MultiPoint::from(vec![(0.0, 0.0), (1.0, 1.0)])]);
        assert_eq!(build_layers(&set, &LayerStyleOverrides::default()).len(), 1);
    }

    #[test]
    fn test_points_only_yields_nothing() {
        let set = FeatureSet::from_geometries([point!(x: 0.0, y: 0.0)]);
        assert!(build_layers(&set, &LayerStyleOverrides::default()).is_empty());
    }

    #[test]
    fn test_overrides() {
        let overrides = LayerStyleOverrides::default()
            .with_color("darkblue")
            .with_opacity(0.5);
        let layers = build_layers(&mixed(), &overrides);

        assert_eq!(layers[0].style.color, "darkblue");
        assert_eq!(layers[0].style.opacity, 0.5);
        assert_eq!(layers[0].style.fill.outline_color, "red");
        assert_eq!(layers[0].style.layer_type, LayerType::Fill);
    }

    #[test]
    fn test_line_style_overrides() {
        let overrides = LayerStyleOverrides::default()
            .with_layer_type(LayerType::Line)
            .with_outline_color("black");
        let layers = build_layers(&mixed(), &overrides);

        assert!(layers
            .iter()
            .all(|layer| layer.style.layer_type == LayerType::Line));
        let json = serde_json::to_value(&layers[0]).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["fill"]["outlinecolor"], "black");
        assert_eq!(json["color"], "red");
    }

    #[test]
    fn test_descriptor_json_shape() {
        let layers = build_layers(&mixed(), &LayerStyleOverrides::default());
        let json = serde_json::to_value(&layers[0]).unwrap();

        assert_eq!(json["sourcetype"], "geojson");
        assert_eq!(json["type"], "fill");
        assert_eq!(json["color"], "red");
        assert_eq!(json["opacity"], 0.3);
        assert_eq!(json["fill"]["outlinecolor"], "red");
        assert_eq!(json["source"]["type"], "FeatureCollection");
        assert_eq!(json["source"]["features"].as_array().unwrap().len(), 1);
        assert_eq!(json["source"]["features"][0]["id"], "1");
    }
}

use crate::{
    animation::sequence::{animate, AnimationSequence},
    core::{
        config::PlotOptions,
        scene::{assemble_scene, Scene, SceneOptions},
    },
    data::feature::FeatureSet,
    layers::{marker::MarkerStyle, vector::LayerStyleOverrides},
    rendering::SceneRenderer,
    Result,
};
use serde::{Deserialize, Serialize};

/// What a plot call produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Plot {
    Static(Scene),
    Animated {
        /// Scene over the whole set, shown before playback starts
        scene: Scene,
        animation: AnimationSequence,
    },
}

impl Plot {
    /// The scene shown initially
    pub fn scene(&self) -> &Scene {
        match self {
            Plot::Static(scene) => scene,
            Plot::Animated { scene, .. } => scene,
        }
    }

    pub fn animation(&self) -> Option<&AnimationSequence> {
        match self {
            Plot::Static(_) => None,
            Plot::Animated { animation, .. } => Some(animation),
        }
    }
}

impl From<&PlotOptions> for SceneOptions {
    fn from(options: &PlotOptions) -> Self {
        SceneOptions {
            center: options.center,
            zoom: options.zoom,
            marker: MarkerStyle {
                color: options.color.clone(),
                size: options.marker_size,
            },
            mode: options.mode,
            text_columns: options.text_columns.clone(),
            style: options.style,
            access_token: options.resolved_access_token(),
            // Shapes take the marker color; outline keeps the layer default
            layer_overrides: LayerStyleOverrides::default()
                .with_color(options.color.clone())
                .with_opacity(options.opacity),
        }
    }
}

/// Builds the scene for `set` and, when `animate_by` is set, its animation.
pub fn plot(set: &FeatureSet, options: &PlotOptions) -> Result<Plot> {
    let scene_options = SceneOptions::from(options);
    let scene = assemble_scene(set, &scene_options)?;

    match &options.animate_by {
        None => Ok(Plot::Static(scene)),
        Some(key) => {
            let animation = animate(set, key, &scene_options)?;
            Ok(Plot::Animated { scene, animation })
        }
    }
}

/// Plots and hands the result to a renderer.
pub fn show<R: SceneRenderer + ?Sized>(
    set: &FeatureSet,
    options: &PlotOptions,
    renderer: &mut R,
) -> Result<()> {
    let plot = plot(set, options)?;
    renderer.render(&plot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, LatLng};
    use geo_types::{point, polygon};

    fn sample() -> FeatureSet {
        FeatureSet::new(["year"])
            .with_feature(point!(x: 0.0, y: 0.0), vec![2000.into()])
            .unwrap()
            .with_feature(
                polygon![(x: 8.0, y: 8.0), (x: 10.0, y: 8.0), (x: 10.0, y: 10.0)],
                vec![2001.into()],
            )
            .unwrap()
    }

    #[test]
    fn test_static_plot_styles_layers_like_markers() {
        let options = PlotOptions::new().with_color("green").with_opacity(0.7);
        let plot = plot(&sample(), &options).unwrap();

        assert!(plot.animation().is_none());
        let layer = &plot.scene().layers[0];
        assert_eq!(layer.style.color, "green");
        assert_eq!(layer.style.opacity, 0.7);
        assert_eq!(layer.style.fill.outline_color, "red");
        assert_eq!(plot.scene().markers.marker.color, "green");
    }

    #[test]
    fn test_animated_plot() {
        let options = PlotOptions::new().animate_by("year");
        let plot = plot(&sample(), &options).unwrap();
        let animation = plot.animation().unwrap();

        assert_eq!(animation.len(), 2);
        assert_eq!(animation.framing, plot.scene().framing());
    }

    #[test]
    fn test_explicit_camera_is_kept_by_frames() {
        let options = PlotOptions::new()
            .with_center(LatLng::new(1.0, 1.0))
            .with_zoom(3.0)
            .animate_by("year");
        let plot = plot(&sample(), &options).unwrap();

        for frame in &plot.animation().unwrap().frames {
            assert_eq!(frame.scene.center(), LatLng::new(1.0, 1.0));
            assert_eq!(frame.scene.zoom(), 3.0);
        }
    }

    #[test]
    fn test_bad_group_key() {
        let options = PlotOptions::new().animate_by("month");
        assert!(matches!(
            plot(&sample(), &options),
            Err(Error::InvalidGroupKey(_))
        ));
    }
}

use crate::{
    animation::controls::TimelineControls,
    core::{
        framing::Framing,
        scene::{assemble_scene, Scene, SceneOptions},
    },
    data::feature::{FeatureSet, GroupKey},
    spatial::summary::summarize,
    Error, Result,
};
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A scene bound to one value of the grouping attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub scene: Scene,
}

/// Ordered frames sharing one camera, plus the timeline widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSequence {
    /// Attribute the frames were grouped by
    pub key: String,
    pub framing: Framing,
    pub frames: Vec<Frame>,
    pub controls: TimelineControls,
}

impl AnimationSequence {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame_names(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|f| f.name.as_str())
    }
}

/// Feature indices per distinct value of `key`, in first-seen order.
pub fn group_indices(set: &FeatureSet, key: &str) -> Result<Vec<(String, Vec<usize>)>> {
    let column = set
        .column_index(key)
        .ok_or_else(|| Error::InvalidGroupKey(key.to_string()))?;

    let mut groups: IndexMap<GroupKey, (String, Vec<usize>), FxBuildHasher> = IndexMap::default();
    for (index, feature) in set.features().iter().enumerate() {
        let value = &feature.attributes[column];
        groups
            .entry(value.group_key())
            .or_insert_with(|| (value.to_string(), Vec::new()))
            .1
            .push(index);
    }

    Ok(groups.into_values().collect())
}

/// Builds one frame per distinct value of `key`.
///
/// The camera is computed once over the whole set (unless `options` pins it)
/// so it stays fixed while frames play. Each frame's features lose the
/// grouping attribute before their scene is assembled.
pub fn animate(set: &FeatureSet, key: &str, options: &SceneOptions) -> Result<AnimationSequence> {
    let groups = group_indices(set, key)?;
    let summary = summarize(set)?;
    let framing = Framing::resolve(&summary, options.center, options.zoom);
    let frame_options = options.clone().with_framing(framing);

    let mut frames = Vec::with_capacity(groups.len());
    for (label, indices) in groups {
        let group = set.select(&indices).without_column(key)?;
        let scene = assemble_scene(&group, &frame_options)?;
        frames.push(Frame { name: label, scene });
    }

    #[cfg(feature = "debug")]
    log::debug!("animation by '{}': {} frames", key, frames.len());

    let controls = TimelineControls::new(key, frames.iter().map(|f| f.name.clone()));

    Ok(AnimationSequence {
        key: key.to_string(),
        framing,
        frames,
        controls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature::Value;
    use geo_types::point;

    fn yearly() -> FeatureSet {
        FeatureSet::new(["name", "year"])
            .with_feature(point!(x: 0.0, y: 0.0), vec!["a".into(), 2000.into()])
            .unwrap()
            .with_feature(point!(x: 10.0, y: 10.0), vec!["b".into(), 2001.into()])
            .unwrap()
            .with_feature(point!(x: 4.0, y: 2.0), vec!["c".into(), 2000.into()])
            .unwrap()
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let groups = group_indices(&yearly(), "year").unwrap();
        assert_eq!(
            groups,
            vec![
                ("2000".to_string(), vec![0, 2]),
                ("2001".to_string(), vec![1]),
            ]
        );
    }

    #[test]
    fn test_frames_share_camera() {
        let sequence = animate(&yearly(), "year", &SceneOptions::default()).unwrap();

        assert_eq!(sequence.frame_names().collect::<Vec<_>>(), ["2000", "2001"]);
        assert_eq!(sequence.controls.slider.steps.len(), 2);
        for frame in &sequence.frames {
            assert_eq!(frame.scene.framing(), sequence.framing);
        }
        assert_eq!(sequence.framing.zoom, 5.5);
        assert_eq!(sequence.frames[0].scene.markers.len(), 2);
    }

    #[test]
    fn test_grouping_attribute_is_dropped() {
        let options = SceneOptions {
            text_columns: Some(vec!["name".into()]),
            ..Default::default()
        };
        let sequence = animate(&yearly(), "year", &options).unwrap();
        assert_eq!(
            sequence.frames[0].scene.markers.text,
            Some(vec!["a".to_string(), "c".to_string()])
        );

        let options = SceneOptions {
            text_columns: Some(vec!["year".into()]),
            ..Default::default()
        };
        assert!(matches!(
            animate(&yearly(), "year", &options),
            Err(Error::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_unknown_group_key() {
        assert!(matches!(
            animate(&yearly(), "decade", &SceneOptions::default()),
            Err(Error::InvalidGroupKey(key)) if key == "decade"
        ));
    }

    #[test]
    fn test_empty_set() {
        let set = FeatureSet::new(["year"]);
        assert!(matches!(
            animate(&set, "year", &SceneOptions::default()),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_null_is_its_own_group() {
        let set = FeatureSet::new(["kind"])
            .with_feature(point!(x: 0.0, y: 0.0), vec![Value::Null])
            .unwrap()
            .with_feature(point!(x: 1.0, y: 1.0), vec!["x".into()])
            .unwrap();
        let sequence = animate(&set, "kind", &SceneOptions::default()).unwrap();
        assert_eq!(sequence.frame_names().collect::<Vec<_>>(), ["null", "x"]);
    }
}

//! Timeline widgets attached to an animation: a slider with one step per
//! frame and play/pause buttons.

use crate::constants::{
    BUTTON_PAD_RIGHT, BUTTON_PAD_TOP, PAUSE_BUTTON_POSITION, PAUSE_FRAME_DURATION_MS,
    PAUSE_TRANSITION_MS, PLAY_BUTTON_POSITION, SLIDER_LENGTH, SLIDER_PAD_BOTTOM, SLIDER_PAD_TOP,
    SLIDER_TRANSITION_MS, SLIDER_X, STEP_FRAME_DURATION_MS, STEP_TRANSITION_MS,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    #[default]
    Immediate,
    Next,
    AfterAll,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTiming {
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redraw: Option<bool>,
}

/// Moves the animation to one named frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderStep {
    pub label: String,
    /// Frame names this step jumps to
    pub frames: Vec<String>,
    pub frame: FrameTiming,
    pub transition: Transition,
    pub mode: TransitionMode,
}

impl SliderStep {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            frames: vec![label.clone()],
            label,
            frame: FrameTiming {
                duration: STEP_FRAME_DURATION_MS,
                redraw: None,
            },
            transition: Transition {
                duration: STEP_TRANSITION_MS,
            },
            mode: TransitionMode::Immediate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentValue {
    pub prefix: String,
    #[serde(rename = "xanchor")]
    pub x_anchor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    #[serde(rename = "currentvalue")]
    pub current_value: CurrentValue,
    pub transition: Transition,
    pub pad: Padding,
    pub len: f64,
    pub x: f64,
    pub steps: Vec<SliderStep>,
}

impl Slider {
    /// A slider for frames grouped by `key`, with no steps yet
    pub fn new(key: &str) -> Self {
        Self {
            current_value: CurrentValue {
                prefix: format!("{}: ", key),
                x_anchor: "right".to_string(),
            },
            transition: Transition {
                duration: SLIDER_TRANSITION_MS,
            },
            pad: Padding {
                b: Some(SLIDER_PAD_BOTTOM),
                t: Some(SLIDER_PAD_TOP),
                r: None,
            },
            len: SLIDER_LENGTH,
            x: SLIDER_X,
            steps: Vec::new(),
        }
    }

    pub fn push_step(&mut self, label: impl Into<String>) {
        self.steps.push(SliderStep::new(label));
    }
}

/// What pressing a playback button does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PlaybackAction {
    /// Runs all frames, resuming from the current one
    Play {
        #[serde(rename = "fromcurrent")]
        from_current: bool,
    },
    /// Stops on the current frame without any transition
    Pause {
        frame: FrameTiming,
        transition: Transition,
        mode: TransitionMode,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackButton {
    pub label: String,
    #[serde(flatten)]
    pub action: PlaybackAction,
}

/// A button group placed under the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackMenu {
    pub buttons: Vec<PlaybackButton>,
    pub direction: String,
    pub pad: Padding,
    #[serde(rename = "showactive")]
    pub show_active: bool,
    pub x: f64,
    pub y: f64,
}

impl PlaybackMenu {
    fn single(button: PlaybackButton, (x, y): (f64, f64)) -> Self {
        Self {
            buttons: vec![button],
            direction: "left".to_string(),
            pad: Padding {
                r: Some(BUTTON_PAD_RIGHT),
                t: Some(BUTTON_PAD_TOP),
                b: None,
            },
            show_active: false,
            x,
            y,
        }
    }

    pub fn play() -> Self {
        Self::single(
            PlaybackButton {
                label: "Play".to_string(),
                action: PlaybackAction::Play { from_current: true },
            },
            PLAY_BUTTON_POSITION,
        )
    }

    pub fn pause() -> Self {
        Self::single(
            PlaybackButton {
                label: "Pause".to_string(),
                action: PlaybackAction::Pause {
                    frame: FrameTiming {
                        duration: PAUSE_FRAME_DURATION_MS,
                        redraw: Some(false),
                    },
                    transition: Transition {
                        duration: PAUSE_TRANSITION_MS,
                    },
                    mode: TransitionMode::Immediate,
                },
            },
            PAUSE_BUTTON_POSITION,
        )
    }
}

/// Slider plus play/pause menus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineControls {
    pub slider: Slider,
    pub menus: Vec<PlaybackMenu>,
}

impl TimelineControls {
    pub fn new<S: Into<String>>(key: &str, labels: impl IntoIterator<Item = S>) -> Self {
        let mut slider = Slider::new(key);
        for label in labels {
            slider.push_step(label);
        }
        Self {
            slider,
            menus: vec![PlaybackMenu::play(), PlaybackMenu::pause()],
        }
    }

    pub fn step_labels(&self) -> impl Iterator<Item = &str> {
        self.slider.steps.iter().map(|s| s.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_follow_labels() {
        let controls = TimelineControls::new("year", ["2000", "2001"]);
        assert_eq!(controls.slider.current_value.prefix, "year: ");
        assert_eq!(controls.step_labels().collect::<Vec<_>>(), ["2000", "2001"]);
        assert_eq!(controls.slider.steps[1].frames, vec!["2001".to_string()]);
        assert_eq!(controls.slider.steps[0].transition.duration, 300);
        assert_eq!(controls.slider.transition.duration, 300);
    }

    #[test]
    fn test_pause_suppresses_transition() {
        let pause = PlaybackMenu::pause();
        match &pause.buttons[0].action {
            PlaybackAction::Pause {
                frame, transition, ..
            } => {
                assert_eq!(frame.duration, 0);
                assert_eq!(frame.redraw, Some(false));
                assert_eq!(transition.duration, 0);
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!((pause.x, pause.y), (0.1, 0.05));
    }

    #[test]
    fn test_play_button_json() {
        let json = serde_json::to_value(PlaybackMenu::play()).unwrap();
        assert_eq!(json["buttons"][0]["label"], "Play");
        assert_eq!(json["buttons"][0]["action"], "play");
        assert_eq!(json["buttons"][0]["fromcurrent"], true);
        assert_eq!(json["showactive"], false);
        assert_eq!(json["pad"], serde_json::json!({"t": 40, "r": 20}));
    }
}

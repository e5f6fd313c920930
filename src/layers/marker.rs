use crate::{constants::DEFAULT_MARKER_COLOR, core::geo::LatLng};
use serde::{Deserialize, Serialize};

/// How markers are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerMode {
    #[default]
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "markers+text")]
    MarkersAndText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_MARKER_COLOR.to_string(),
            size: None,
        }
    }
}

/// One marker per feature, placed at the feature's centroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerTrace {
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    /// Hover text, one entry per marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    pub mode: MarkerMode,
    pub marker: MarkerStyle,
}

impl MarkerTrace {
    pub fn new(positions: &[LatLng], mode: MarkerMode, marker: MarkerStyle) -> Self {
        Self {
            lon: positions.iter().map(|p| p.lng).collect(),
            lat: positions.iter().map(|p| p.lat).collect(),
            text: None,
            mode,
            marker,
        }
    }

    pub fn with_text(mut self, text: Vec<String>) -> Self {
        self.text = Some(text);
        self
    }

    pub fn len(&self) -> usize {
        self.lon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_splits_coordinates() {
        let trace = MarkerTrace::new(
            &[LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0)],
            MarkerMode::Markers,
            MarkerStyle::default(),
        );
        assert_eq!(trace.lon, vec![2.0, 4.0]);
        assert_eq!(trace.lat, vec![1.0, 3.0]);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(
            serde_json::to_value(MarkerMode::MarkersAndText).unwrap(),
            "markers+text"
        );
        let json = serde_json::to_value(MarkerStyle::default()).unwrap();
        assert_eq!(json, serde_json::json!({"color": "darkblue"}));
    }
}

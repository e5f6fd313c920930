//! Configuration for plotting: the process-wide access token and the
//! per-call option set.
//!
//! The token is read once from the environment the first time it is needed
//! and never mutated afterwards; a call can still pass its own token through
//! [`PlotOptions::with_access_token`].

use crate::constants::{ACCESS_TOKEN_ENV, DEFAULT_MARKER_COLOR, DEFAULT_PLOT_OPACITY};
use crate::core::geo::LatLng;
use crate::layers::marker::MarkerMode;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_ACCESS_TOKEN: Lazy<Option<String>> = Lazy::new(|| {
    let token = std::env::var(ACCESS_TOKEN_ENV)
        .ok()
        .filter(|token| !token.is_empty());

    #[cfg(feature = "debug")]
    log::debug!(
        "{} is {}",
        ACCESS_TOKEN_ENV,
        if token.is_some() { "set" } else { "not set" }
    );

    token
});

/// Token taken from `MAPBOX_ACCESS_TOKEN` at first use
pub fn default_access_token() -> Option<&'static str> {
    DEFAULT_ACCESS_TOKEN.as_deref()
}

/// Base-map style names understood by the rendering surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseMapStyle {
    #[default]
    Basic,
    Light,
    Dark,
    Outdoors,
    Satellite,
    SatelliteStreets,
}

impl BaseMapStyle {
    pub fn name(&self) -> &'static str {
        match self {
            BaseMapStyle::Basic => "basic",
            BaseMapStyle::Light => "light",
            BaseMapStyle::Dark => "dark",
            BaseMapStyle::Outdoors => "outdoors",
            BaseMapStyle::Satellite => "satellite",
            BaseMapStyle::SatelliteStreets => "satellite-streets",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "basic" => Some(BaseMapStyle::Basic),
            "light" => Some(BaseMapStyle::Light),
            "dark" => Some(BaseMapStyle::Dark),
            "outdoors" => Some(BaseMapStyle::Outdoors),
            "satellite" => Some(BaseMapStyle::Satellite),
            "satellite-streets" => Some(BaseMapStyle::SatelliteStreets),
            _ => None,
        }
    }
}

/// Options of a single plot call
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Attribute columns joined into each marker's hover text
    pub text_columns: Option<Vec<String>>,
    /// Explicit camera center; auto-framed when `None`
    pub center: Option<LatLng>,
    /// Explicit zoom; auto-framed when `None`
    pub zoom: Option<f64>,
    pub marker_size: Option<f64>,
    pub mode: MarkerMode,
    /// Marker color, also used for shape overlays
    pub color: String,
    pub style: BaseMapStyle,
    /// Overrides the process-wide token for this call
    pub access_token: Option<String>,
    /// Opacity of shape overlays
    pub opacity: f64,
    /// Attribute to build animation frames from
    pub animate_by: Option<String>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            text_columns: None,
            center: None,
            zoom: None,
            marker_size: None,
            mode: MarkerMode::Markers,
            color: DEFAULT_MARKER_COLOR.to_string(),
            style: BaseMapStyle::Basic,
            access_token: None,
            opacity: DEFAULT_PLOT_OPACITY,
            animate_by: None,
        }
    }
}

impl PlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.text_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_center(mut self, center: LatLng) -> Self {
        self.center = Some(center);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_marker_size(mut self, size: f64) -> Self {
        self.marker_size = Some(size);
        self
    }

    pub fn with_mode(mut self, mode: MarkerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_style(mut self, style: BaseMapStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn animate_by(mut self, column: impl Into<String>) -> Self {
        self.animate_by = Some(column.into());
        self
    }

    /// The per-call token, falling back to the process-wide default
    pub fn resolved_access_token(&self) -> Option<String> {
        self.access_token
            .clone()
            .or_else(|| default_access_token().map(str::to_string))
    }
}

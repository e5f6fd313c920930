//! Automatic camera placement derived from a feature set's extent.

use crate::{
    constants::{AUTO_ZOOM_BASE, AUTO_ZOOM_SPAN_DIVISOR, MIN_AUTO_ZOOM},
    core::geo::{Extent, LatLng},
    spatial::summary::Summary,
};
use serde::{Deserialize, Serialize};

/// Midpoint of the extent on each axis.
pub fn auto_center(extent: &Extent) -> LatLng {
    extent.center()
}

/// `6.5 - ceil(max_span) / 10`, never below [`MIN_AUTO_ZOOM`].
pub fn auto_zoom(extent: &Extent) -> f64 {
    let span = extent.span();
    let max_span = span.lat.max(span.lng);
    let zoom = AUTO_ZOOM_BASE - max_span.ceil() / AUTO_ZOOM_SPAN_DIVISOR;
    zoom.max(MIN_AUTO_ZOOM)
}

/// Camera position shared by a scene (or by every frame of an animation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Framing {
    pub center: LatLng,
    pub zoom: f64,
}

impl Framing {
    pub fn auto(extent: &Extent) -> Self {
        Self {
            center: auto_center(extent),
            zoom: auto_zoom(extent),
        }
    }

    /// Uses explicit values where given and the auto-framed ones otherwise
    pub fn resolve(summary: &Summary, center: Option<LatLng>, zoom: Option<f64>) -> Self {
        Self {
            center: center.unwrap_or_else(|| auto_center(&summary.extent)),
            zoom: zoom.unwrap_or_else(|| auto_zoom(&summary.extent)),
        }
    }
}

use crate::{
    core::geo::{Extent, LatLng},
    data::feature::FeatureSet,
    Error, Result,
};
use geo::{BoundingRect, Centroid};

/// Per-feature centroids plus the overall extent of a feature set.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// One representative point per feature, in feature order
    pub centroids: Vec<LatLng>,
    pub extent: Extent,
}

impl Summary {
    pub fn longitudes(&self) -> Vec<f64> {
        self.centroids.iter().map(|c| c.lng).collect()
    }

    pub fn latitudes(&self) -> Vec<f64> {
        self.centroids.iter().map(|c| c.lat).collect()
    }
}

/// Computes centroids and the extent in a single pass.
///
/// Fails with [`Error::EmptyInput`] on an empty set and with
/// [`Error::MissingGeometry`] for a feature whose geometry is null or has no
/// centroid (an empty geometry).
pub fn summarize(set: &FeatureSet) -> Result<Summary> {
    if set.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut centroids = Vec::with_capacity(set.len());
    let mut extent: Option<Extent> = None;

    for (index, feature) in set.features().iter().enumerate() {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or(Error::MissingGeometry { index })?;
        let centroid = geometry
            .centroid()
            .ok_or(Error::MissingGeometry { index })?;
        let rect = geometry
            .bounding_rect()
            .ok_or(Error::MissingGeometry { index })?;

        centroids.push(LatLng::from(centroid));
        let feature_extent = Extent::from_rect(rect);
        extent = Some(match extent {
            Some(e) => e.union(&feature_extent),
            None => feature_extent,
        });
    }

    let extent = extent.ok_or(Error::EmptyInput)?;

    #[cfg(feature = "debug")]
    log::debug!(
        "summarized {} features, extent {:?}",
        centroids.len(),
        extent
    );

    Ok(Summary { centroids, extent })
}

pub mod json;

use crate::{core::plot::Plot, Result};

pub use json::JsonRenderer;

/// Display surface for plots.
///
/// Implementations own everything about presentation; the plotting pipeline
/// never inspects what they produce.
pub trait SceneRenderer {
    fn render(&mut self, plot: &Plot) -> Result<()>;
}

/// Keeps every plot it receives, mostly useful in tests
#[derive(Debug, Default)]
pub struct CollectingRenderer {
    pub plots: Vec<Plot>,
}

impl SceneRenderer for CollectingRenderer {
    fn render(&mut self, plot: &Plot) -> Result<()> {
        self.plots.push(plot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::config::PlotOptions, core::plot::show, data::feature::FeatureSet};
    use geo_types::point;

    #[test]
    fn test_show_hands_plot_to_renderer() {
        let set = FeatureSet::new(["year"])
            .with_feature(point!(x: 1.0, y: 1.0), vec![2000.into()])
            .unwrap();
        let mut renderer = CollectingRenderer::default();
        show(&set, &PlotOptions::new(), &mut renderer).unwrap();
        show(&set, &PlotOptions::new().animate_by("year"), &mut renderer).unwrap();

        assert_eq!(renderer.plots.len(), 2);
        assert!(renderer.plots[0].animation().is_none());
        assert_eq!(renderer.plots[1].animation().map(|a| a.len()), Some(1));
    }
}

use crate::{core::plot::Plot, rendering::SceneRenderer, Result};
use std::io::Write;

/// Writes each plot as one JSON document
pub struct JsonRenderer<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SceneRenderer for JsonRenderer<W> {
    fn render(&mut self, plot: &Plot) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, plot)?;
        } else {
            serde_json::to_writer(&mut self.writer, plot)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::config::PlotOptions, core::plot::show, data::feature::FeatureSet};
    use geo_types::point;

    #[test]
    fn test_writes_one_document_per_plot() {
        let set = FeatureSet::from_geometries([point!(x: 0.0, y: 0.0), point!(x: 10.0, y: 10.0)]);
        let mut renderer = JsonRenderer::new(Vec::new());
        show(&set, &PlotOptions::new().with_access_token("pk.test"), &mut renderer).unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        let json: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(json["kind"], "static");
        assert_eq!(json["view"]["center"], serde_json::json!({"lat": 5.0, "lon": 5.0}));
        assert_eq!(json["view"]["zoom"], 5.5);
        assert_eq!(json["view"]["style"], "basic");
        assert_eq!(json["view"]["accesstoken"], "pk.test");
        assert_eq!(json["markers"]["lon"], serde_json::json!([0.0, 10.0]));
        assert_eq!(json["layers"], serde_json::json!([]));
    }
}

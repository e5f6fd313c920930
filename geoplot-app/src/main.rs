use anyhow::Context;
use clap::Parser;
use geoplot::{show, BaseMapStyle, FeatureCollection, JsonRenderer, PlotOptions};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

#[derive(Debug, Parser)]
#[command(name = "geoplot-app")]
#[command(about = "Turn a GeoJSON FeatureCollection into a map scene description", long_about = None)]
struct Args {
    /// GeoJSON FeatureCollection to plot
    input: PathBuf,

    /// Attribute to group frames by
    #[arg(long)]
    animate_by: Option<String>,

    /// Attributes joined into hover text, comma separated
    #[arg(long, value_delimiter = ',')]
    text: Option<Vec<String>>,

    /// Base map style (basic, light, dark, outdoors, satellite, satellite-streets)
    #[arg(long, value_parser = parse_style)]
    style: Option<BaseMapStyle>,

    /// Write the JSON here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn parse_style(name: &str) -> Result<BaseMapStyle, String> {
    BaseMapStyle::from_name(name).ok_or_else(|| format!("unknown style '{}'", name))
}

impl Args {
    fn plot_options(&self) -> PlotOptions {
        let mut options = PlotOptions::new();
        if let Some(columns) = &self.text {
            options = options.with_text(columns.iter().map(|c| c.trim().to_string()));
        }
        if let Some(style) = self.style {
            options = options.with_style(style);
        }
        if let Some(column) = &self.animate_by {
            options = options.animate_by(column.clone());
        }
        options
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let set = FeatureCollection::from_json_str(&text)
        .and_then(|collection| collection.to_feature_set())
        .with_context(|| format!("parsing {}", args.input.display()))?;
    log::info!("loaded {} features from {}", set.len(), args.input.display());

    let writer: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut renderer = JsonRenderer::new(writer);
    show(&set, &args.plot_options(), &mut renderer)?;
    renderer.into_inner().flush()?;

    Ok(())
}

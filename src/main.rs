use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use snaplabel::capture::FileImageSource;
use snaplabel::config::SnapLabelConfig;
use snaplabel::export::{FileSink, save_snapshot};
use snaplabel::filename;
use snaplabel::{AnnotationCanvas, ExportFormat};

/// Place numbered callout labels around a screenshot
#[derive(Debug, Parser)]
#[command(name = "snaplabel", version, about)]
struct Cli {
    /// PNG image to annotate
    image: PathBuf,

    /// Point of interest as fractions of the framed surface, e.g. 0.25,0.5
    #[arg(short, long = "point", value_parser = parse_pair)]
    points: Vec<(f32, f32)>,

    /// Remove this many of the last points before saving
    #[arg(long, default_value_t = 0)]
    undo: usize,

    /// Output file name; any extension is replaced by the chosen formats
    #[arg(short, long)]
    output: Option<String>,

    /// Format to write; repeat for several (defaults to the configured ones)
    #[arg(short, long = "format")]
    formats: Vec<String>,

    /// Directory to write into (defaults to the configured save location)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Display box to report the fit scale for, e.g. 1280,720
    #[arg(long, value_parser = parse_pair)]
    container: Option<(f32, f32)>,

    /// Keep the chosen file name, formats and display box as the new defaults
    #[arg(long)]
    save_config: bool,
}

fn parse_pair(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got \"{s}\""))?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok((x, y))
}

/// Overlay command-line choices on the loaded configuration
fn apply_cli(cli: &Cli, mut config: SnapLabelConfig) -> anyhow::Result<SnapLabelConfig> {
    if let Some(output) = &cli.output {
        config.filename = filename::remove_extension(output).to_string();
    }
    if !cli.formats.is_empty() {
        // Rejects every unknown format before anything is written
        config.export_formats = cli
            .formats
            .iter()
            .map(|format| ExportFormat::from_extension(format))
            .collect::<Result<_, _>>()?;
    }
    if cli.container.is_some() {
        config.container = cli.container;
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = apply_cli(&cli, SnapLabelConfig::load())?;
    if cli.save_config {
        config.save();
    }

    let mut canvas = AnnotationCanvas::new();
    canvas
        .paste(&FileImageSource::new([&cli.image]))
        .await
        .with_context(|| format!("Failed to load {}", cli.image.display()))?;

    for (x, y) in &cli.points {
        if canvas.add_point(*x, *y).is_none() {
            log::warn!("Point {x},{y} falls in the label margin, skipped");
        }
    }
    for _ in 0..cli.undo {
        canvas.remove_last_annotation();
    }

    if let Some((width, height)) = config.container
        && let Some(scale) = canvas.display_scale(width, height)
    {
        log::info!("Display scale for {width}x{height}: {scale:.3}");
    }

    let filenames = config.export_filenames(&config.default_filename());

    let dir = match cli.dir.clone().or_else(|| config.save_location.dir()) {
        Some(dir) => dir,
        None => bail!("No save directory available, pass --dir"),
    };
    let sink = FileSink::new(dir, config.jpeg_quality);

    for name in &filenames {
        let outcome = save_snapshot(&canvas, &sink, name)
            .await
            .with_context(|| format!("Failed to save {name}"))?;
        if let Some(path) = outcome.path {
            println!("{}", path.display());
        }
    }
    Ok(())
}

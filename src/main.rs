//! qrcanvas command-line entrypoint

use bytes::Bytes;
use clap::{Parser, ValueEnum};
use qrcanvas::config::DEFAULT_CONFIG_FILENAME;
use qrcanvas::{
    BorderStyle, Color, DotShape, Error, QrCanvasConfig, QrCanvasOptions, QrDecoder, QrEncoder,
    QrRenderer, Result, logging,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BorderStyleArg {
    Square,
    Rounded,
}

impl From<BorderStyleArg> for BorderStyle {
    fn from(v: BorderStyleArg) -> Self {
        match v {
            BorderStyleArg::Square => BorderStyle::Square,
            BorderStyleArg::Rounded => BorderStyle::Rounded,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DotShapeArg {
    Square,
    Dots,
}

impl From<DotShapeArg> for DotShape {
    fn from(v: DotShapeArg) -> Self {
        match v {
            DotShapeArg::Square => DotShape::Square,
            DotShapeArg::Dots => DotShape::Dots,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "qrcanvas",
    version,
    about = "Export a styled QR code as a PNG with padding, border and rounded corners"
)]
struct Cli {
    /// Optional configuration file (toml/yaml/json). Defaults to qrcanvas.* in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Text or URL to encode
    #[arg(short, long)]
    data: Option<String>,

    /// Use an existing QR bitmap instead of rendering one
    #[arg(short, long, value_name = "PNG")]
    input: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Pixel size of the QR artwork in the output
    #[arg(short, long)]
    size: Option<u32>,

    /// Padding around the artwork (0-50)
    #[arg(long)]
    margin: Option<f32>,

    /// Border thickness (0-20)
    #[arg(long)]
    border_width: Option<f32>,

    /// Corner radius for rounded borders (0-50)
    #[arg(long)]
    border_radius: Option<f32>,

    /// Corner treatment for background and border
    #[arg(long, value_enum)]
    border_style: Option<BorderStyleArg>,

    /// Background color (#rgb, #rrggbb or #rrggbbaa)
    #[arg(long, value_name = "HEX")]
    background: Option<Color>,

    /// Border and dot color
    #[arg(long, value_name = "HEX")]
    stroke: Option<Color>,

    /// Module shape for the bundled renderer
    #[arg(long, value_enum)]
    dot_shape: Option<DotShapeArg>,

    /// Write the effective configuration to PATH (format by extension, default qr-config.json)
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_CONFIG_FILENAME
    )]
    save_config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Decode the exported image to confirm it still scans
    #[arg(long)]
    verify: bool,
}

impl Cli {
    fn apply(&self, config: &mut QrCanvasConfig) {
        if let Some(ref data) = self.data {
            config.content.data = data.clone();
        }
        if let Some(shape) = self.dot_shape {
            config.content.dot_shape = shape.into();
        }
        if let Some(ref output) = self.output {
            config.export.filename = output.clone();
        }
        if let Some(size) = self.size {
            config.export.download_size = size;
        }

        let style = &mut config.style;
        if let Some(margin) = self.margin {
            style.margin = margin;
        }
        if let Some(width) = self.border_width {
            style.border_width = width;
        }
        if let Some(radius) = self.border_radius {
            style.border_radius = radius;
        }
        if let Some(border_style) = self.border_style {
            style.border_style = border_style.into();
        }
        if let Some(color) = self.background {
            style.background_color = color;
        }
        if let Some(color) = self.stroke {
            style.stroke_color = color;
        }
        // the core never validates, so clamp to slider ranges here
        *style = style.clamped();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QrCanvasConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    logging::init(&config.logging)?;

    if let Some(ref path) = cli.save_config {
        config.save(path)?;
    }

    let download_size = config.export.download_size;
    if download_size == 0 {
        return Err(Error::Config("Download size must be positive".to_string()));
    }

    let started = Instant::now();
    let qr_bitmap = match cli.input {
        Some(ref path) => Bytes::from(tokio::fs::read(path).await?),
        None => {
            QrEncoder::new()
                .with_ec_level(config.content.ec_level)
                .with_dot_color(config.style.stroke_color)
                .with_dot_shape(config.content.dot_shape)
                .render_png(&config.content.data, download_size)
                .await?
        }
    };

    let surface = qrcanvas::create_qr_canvas(QrCanvasOptions {
        qr_bitmap,
        style: config.style.clone(),
        download_size,
    })
    .await?;

    let saved =
        qrcanvas::serialize_and_download(&surface, Some(config.export.filename.as_path())).await?;
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        width = surface.width(),
        "Export complete"
    );

    if cli.verify {
        let bytes = tokio::fs::read(&saved).await?;
        let decoded = QrDecoder::new().decode_bytes(&bytes)?;
        if cli.input.is_none() && decoded != config.content.data {
            return Err(Error::QrDecode(format!(
                "Exported image decodes to '{decoded}', expected '{}'",
                config.content.data
            )));
        }
        println!("Verified: {decoded}");
    }

    println!("Saved to: {}", saved.display());
    Ok(())
}

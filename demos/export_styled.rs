//! Render a QR code, frame it with a rounded border and save it
//!
//! Usage: cargo run --example export_styled

use qrcanvas::{
    BorderStyle, Color, QrCanvasOptions, QrEncoder, QrRenderer, StyleParameters,
    create_qr_canvas, serialize_and_download,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let style = StyleParameters {
        background_color: Color::parse("#fdf6e3")?,
        stroke_color: Color::parse("#073642")?,
        margin: 24.0,
        border_radius: 36.0,
        border_width: 6.0,
        border_style: BorderStyle::Rounded,
    };

    let download_size = 1200;
    let qr_bitmap = QrEncoder::new()
        .with_dot_color(style.stroke_color)
        .render_png("Hello from qrcanvas!", download_size)
        .await?;

    let surface = create_qr_canvas(QrCanvasOptions {
        qr_bitmap,
        style,
        download_size,
    })
    .await?;

    let path = serialize_and_download(&surface, None).await?;
    println!(
        "✓ {}x{} styled QR code saved to {}",
        surface.width(),
        surface.height(),
        path.display()
    );

    Ok(())
}

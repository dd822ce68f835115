use ritsmap::render::HeadlessRenderer;
use ritsmap::render::raster::{RasterOptions, svg_to_png};

#[test]
fn default_diagram_rasterizes_at_four_times_the_viewbox() {
    let renderer = HeadlessRenderer::new();
    let svg = renderer.render_svg_sync().unwrap();

    let doc = roxmltree::Document::parse(&svg).unwrap();
    let vb: Vec<f32> = doc
        .root_element()
        .attribute("viewBox")
        .unwrap()
        .split_whitespace()
        .map(|s| s.parse().unwrap())
        .collect();

    let png = svg_to_png(&svg, &RasterOptions::default()).unwrap();
    let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
    assert_eq!(pixmap.width(), (vb[2] * 4.0).ceil() as u32);
    assert_eq!(pixmap.height(), (vb[3] * 4.0).ceil() as u32);

    // White background in the corner.
    let corner = pixmap.pixel(0, 0).unwrap();
    assert_eq!(
        (corner.red(), corner.green(), corner.blue(), corner.alpha()),
        (255, 255, 255, 255)
    );
}

#[test]
fn renderer_exports_every_format() {
    let renderer = HeadlessRenderer::new()
        .with_override("dots.labels=false")
        .unwrap();
    let raster = RasterOptions {
        scale: 1.0,
        ..RasterOptions::default()
    };
    assert!(
        renderer
            .render_png_sync(&raster)
            .unwrap()
            .starts_with(b"\x89PNG")
    );
    assert!(
        renderer
            .render_jpeg_sync(&raster)
            .unwrap()
            .starts_with(&[0xFF, 0xD8])
    );
    assert!(renderer.render_pdf_sync().unwrap().starts_with(b"%PDF-"));
}

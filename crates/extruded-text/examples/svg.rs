use svg::Document;
use svg::node::element::Path;
use svg::node::element::path::Data;

use extruded_text::{
    MeshParams, Path2D, Segment, TtfFont, build_rounded_rect, layout, layout_options,
};
use tracing_subscriber::EnvFilter;

/// Convert a path to SVG data, flipping Y so the text reads upright.
fn path_to_svg_data(path: &Path2D, dx: f64, height: f64) -> Data {
    let at = |x: f64, y: f64| ((x + dx) as f32, (height - y) as f32);

    let mut data = Data::new().move_to(at(path.start.x, path.start.y));
    let mut pen = path.start;

    for segment in &path.segments {
        data = match *segment {
            Segment::Line { to } => data.line_to(at(to.x, to.y)),
            Segment::Quadratic { ctrl, to } => {
                let (cx, cy) = at(ctrl.x, ctrl.y);
                let (x, y) = at(to.x, to.y);
                data.quadratic_curve_to((cx, cy, x, y))
            }
            Segment::Arc { center, to } => {
                let r = (pen.x - center.x).hypot(pen.y - center.y) as f32;
                let (x, y) = at(to.x, to.y);
                // Counter-clockwise in font space is clockwise on screen, sweep flag 1.
                data.elliptical_arc_to((r, r, 0.0f32, 0.0f32, 1.0f32, x, y))
            }
        };
        pen = segment.end();
    }

    data.close()
}

fn outline(data: Data, color: &str) -> Path {
    Path::new()
        .set("fill", "none")
        .set("stroke", color)
        .set("stroke-width", "0.3")
        .set("d", data)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let font_path = args.next().ok_or("usage: svg <font.ttf> [text]")?;
    let text = args.next().unwrap_or_else(|| "Hello\nWorld".to_string());

    let font = TtfFont::from_path(&font_path, 0)?;
    let face = font.face()?;
    let params = MeshParams::default();
    params.validate()?;

    let text_layout = layout(&face, &text, &layout_options(&params));
    let bounds = text_layout.bounds;
    let padding = params.support_padding;

    let width = bounds.width() + padding.left + padding.right;
    let height = bounds.height() + padding.top + padding.bottom;
    let support = build_rounded_rect(width, height, params.support_corner_radius);

    // Place the text inside the plate the same way the mesh does.
    let dx = -bounds.min.x + padding.left;
    let dy = -bounds.min.y + padding.bottom;

    let mut document = Document::new().add(outline(
        path_to_svg_data(&support.path, 0.0, height),
        "blue",
    ));

    for glyph in &text_layout.glyphs {
        for path in &glyph.outers {
            let data = path_to_svg_data(&path.translated(0.0, dy), dx, height);
            document = document.add(outline(data, "black"));
        }
        for path in &glyph.holes {
            let data = path_to_svg_data(&path.translated(0.0, dy), dx, height);
            document = document.add(outline(data, "red"));
        }
    }

    let document = document
        .set("viewBox", (0, 0, width as f32, height as f32))
        .set("width", format!("{}mm", width))
        .set("height", format!("{}mm", height));

    svg::save("output_text.svg", &document)?;
    println!("Wrote output_text.svg ({} glyphs)", text_layout.glyphs.len());

    Ok(())
}

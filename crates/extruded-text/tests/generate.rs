use approx::assert_relative_eq;
use extruded_text::{
    Align, Bounds, ContourPoint, FontGlyph, GlyphSource, MeshError, MeshParams, MeshTopology,
    Padding, Point, TtfFont, generate_mesh, layout, layout_options,
};

/// Block letters on a 1000 unit em: `I` is a bar, `O` a square ring, `D` a
/// square ring built from curves.
struct BlockFont;

const EM: f64 = 1000.0;

fn square(x0: f64, y0: f64, x1: f64, y1: f64, clockwise: bool) -> Vec<ContourPoint> {
    let mut points = vec![
        ContourPoint::on(x0, y0),
        ContourPoint::on(x0, y1),
        ContourPoint::on(x1, y1),
        ContourPoint::on(x1, y0),
    ];
    if !clockwise {
        points.reverse();
    }
    points
}

fn ink(x1: f64) -> Option<Bounds> {
    Some(Bounds {
        min: Point::new(0.0, 0.0),
        max: Point::new(x1, EM),
    })
}

impl GlyphSource for BlockFont {
    fn units_per_em(&self) -> u16 {
        EM as u16
    }

    fn glyph(&self, ch: char) -> Option<FontGlyph> {
        match ch {
            ' ' => Some(FontGlyph {
                contours: Vec::new(),
                bounds: None,
                advance: 500.0,
            }),
            'I' => Some(FontGlyph {
                contours: vec![square(0.0, 0.0, 500.0, EM, true)],
                bounds: ink(500.0),
                advance: 500.0,
            }),
            'O' => Some(FontGlyph {
                contours: vec![
                    square(0.0, 0.0, EM, EM, true),
                    square(250.0, 250.0, 750.0, 750.0, false),
                ],
                bounds: ink(EM),
                advance: EM,
            }),
            'D' => Some(FontGlyph {
                contours: vec![
                    vec![
                        ContourPoint::on(0.0, 0.0),
                        ContourPoint::on(0.0, EM),
                        ContourPoint::on(500.0, EM),
                        ContourPoint::off(EM, EM),
                        ContourPoint::off(EM, 0.0),
                        ContourPoint::on(500.0, 0.0),
                    ],
                    square(250.0, 250.0, 500.0, 750.0, false),
                ],
                bounds: ink(EM),
                advance: EM,
            }),
            _ => None,
        }
    }
}

fn params(topology: MeshTopology) -> MeshParams {
    MeshParams::default()
        .with_topology(topology)
        .with_size(10.0)
        .with_spacing(0.0, 2.0)
        .with_extrude_depth(3.0)
        .with_support(2.0, 1.0, Padding::uniform(4.0))
}

#[test]
fn every_decoded_path_is_closed() {
    let text = layout(&BlockFont, "DOI\nID", &layout_options(&params(MeshTopology::TextOnly)));
    assert_eq!(text.glyphs.len(), 5);
    for glyph in &text.glyphs {
        for path in glyph.outers.iter().chain(&glyph.holes) {
            assert!(path.is_closed());
        }
        assert_eq!(glyph.outers.len(), 1);
    }

    // Counters of "D", "O" and the second "D".
    let holes: usize = text.glyphs.iter().map(|g| g.holes.len()).sum();
    assert_eq!(holes, 3);
}

#[test]
fn multi_line_alignment() {
    // Line widths are 5 ("I") and 15 ("OI").
    let base = params(MeshTopology::TextOnly);
    for (align, offset) in [(Align::Left, 0.0), (Align::Center, 5.0), (Align::Right, 10.0)] {
        let text = layout(&BlockFont, "I\nOI", &layout_options(&base.clone().with_align(align)));
        let first = &text.glyphs[0].outers[0];
        let left = first
            .segments
            .iter()
            .map(|s| s.end().x)
            .fold(f64::INFINITY, f64::min);
        assert_relative_eq!(left, offset);
    }
}

#[test]
fn text_with_support_dimensions() {
    let result = generate_mesh(&BlockFont, "OI", &params(MeshTopology::TextWithSupport)).unwrap();
    let dims = result.dimensions;

    assert_relative_eq!(dims.text_width, 15.0);
    assert_relative_eq!(dims.text_height, 10.0);
    assert_relative_eq!(dims.width, 23.0);
    assert_relative_eq!(dims.height, 18.0);
    assert_relative_eq!(dims.border_radius, 1.0);

    let text = result.text_solid.unwrap();
    let bounds = text.bounds().unwrap();
    assert_relative_eq!(bounds.min.x, 4.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.min.y, 4.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.min.z, 2.0);
    assert_relative_eq!(bounds.max.z, 5.0);

    // "O" is 100 - 25, "I" is 50.
    assert_relative_eq!(text.volume(), (75.0 + 50.0) * 3.0, epsilon = 1e-6);
    assert!(result.support_solid.unwrap().is_watertight());
}

#[test]
fn curved_glyphs_extrude_closed() {
    let result = generate_mesh(&BlockFont, "D", &params(MeshTopology::TextOnly)).unwrap();
    let text = result.text_solid.unwrap();
    assert!(text.is_watertight());
    assert!(text.volume() > 0.0);
}

#[test]
fn negative_text_thickness() {
    for (support_depth, text_depth) in [(2.0, 3.0), (8.0, 3.0), (3.0, 3.0)] {
        let params = params(MeshTopology::NegativeText)
            .with_extrude_depth(text_depth)
            .with_support(support_depth, 1.0, Padding::uniform(4.0));
        let result = generate_mesh(&BlockFont, "O", &params).unwrap();

        assert!(result.text_solid.is_none());
        let bounds = result.support_solid.unwrap().bounds().unwrap();
        assert_relative_eq!(bounds.min.z, 0.0);
        assert_relative_eq!(bounds.max.z, f64::max(support_depth, text_depth));
        assert_relative_eq!(result.dimensions.text_depth, text_depth);
    }
}

#[test]
fn negative_text_is_closed_at_default_settings() {
    let params = MeshParams::default().with_topology(MeshTopology::NegativeText);
    for text in ["I", "DOI", "ID\nO"] {
        let result = generate_mesh(&BlockFont, text, &params).unwrap();
        assert!(result.support_solid.unwrap().is_watertight(), "{text:?}");
    }
}

#[test]
fn negative_text_is_closed_with_a_system_font() {
    let Ok(font) = TtfFont::from_path("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf", 0) else {
        return;
    };
    let face = font.face().unwrap();
    let params = MeshParams::default().with_topology(MeshTopology::NegativeText);
    for text in ["l", "H", "Hello\nWorld"] {
        let result = generate_mesh(&face, text, &params).unwrap();
        assert!(result.support_solid.unwrap().is_watertight(), "{text:?}");
    }
}

#[test]
fn overlapping_letters_are_cut_once() {
    // Negative spacing pulls the second "I" 2 units into the first.
    let params = params(MeshTopology::NegativeText)
        .with_spacing(-2.0, 2.0)
        .with_support(2.0, 0.0, Padding::uniform(4.0));
    let result = generate_mesh(&BlockFont, "II", &params).unwrap();
    assert_relative_eq!(result.dimensions.text_width, 8.0);

    let support = result.support_solid.unwrap();
    assert!(support.is_watertight());
    assert_relative_eq!(support.volume(), (16.0 * 18.0 - 80.0) * 3.0, epsilon = 1e-6);
}

#[test]
fn empty_text_gives_plate_only() {
    let result = generate_mesh(&BlockFont, "", &params(MeshTopology::TextWithSupport)).unwrap();
    assert!(result.text_solid.is_none());
    assert_relative_eq!(result.dimensions.width, 8.0);
    assert!(result.support_solid.is_some());

    let result = generate_mesh(&BlockFont, "  \n ", &params(MeshTopology::NegativeText)).unwrap();
    assert!(result.support_solid.is_some());
}

#[test]
fn unsupported_characters_do_not_fail() {
    let result = generate_mesh(&BlockFont, "I?I", &params(MeshTopology::TextOnly)).unwrap();
    assert_relative_eq!(result.dimensions.text_width, 10.0);
}

#[test]
fn non_finite_size_is_an_error() {
    let params = params(MeshTopology::TextOnly).with_size(f64::INFINITY);
    assert!(matches!(
        generate_mesh(&BlockFont, "I", &params),
        Err(MeshError::InvalidParameter { name: "size", .. })
    ));
}

#[test]
fn generation_is_repeatable() {
    let params = params(MeshTopology::VerticalTextWithSupport);
    let first = generate_mesh(&BlockFont, "DO\nI", &params).unwrap();
    let second = generate_mesh(&BlockFont, "DO\nI", &params).unwrap();
    assert_eq!(first, second);
}

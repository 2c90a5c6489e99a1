//! `extruded-text-ttf` is a glyph source for the `extruded-text` crate that
//! reads outlines from TrueType and OpenType fonts.
//!
//! Parsing is done with [ttf_parser]. Quadratic (`glyf`) outlines are passed
//! through as-is; cubic (`CFF`) outlines are approximated by quadratic curves.

use std::path::Path;
use std::sync::Arc;

use extruded_text_core::{Bounds, Contour, ContourPoint, FontGlyph, GlyphSource, Point};
use thiserror::Error;
use ttf_parser::{Face, FaceParsingError, OutlineBuilder};

/// Errors that can occur while loading a font.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("font I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid font data: {0}")]
    Parse(#[from] FaceParsingError),
}

/// Convenient result alias for font loading.
pub type Result<T> = std::result::Result<T, FontError>;

/// A font face loaded from a font file.
#[derive(Debug, Clone)]
pub struct TtfFont {
    data: Arc<[u8]>,
    index: u32,
    units_per_em: u16,
}

impl TtfFont {
    /// Load a face from raw font bytes and a face index within the file.
    pub fn from_bytes(data: Arc<[u8]>, index: u32) -> Result<Self> {
        let units_per_em = Face::parse(&data, index)?.units_per_em();
        tracing::debug!(index, units_per_em, bytes = data.len(), "loaded font face");
        Ok(Self {
            data,
            index,
            units_per_em,
        })
    }

    pub fn from_vec(data: Vec<u8>, index: u32) -> Result<Self> {
        Self::from_bytes(Arc::from(data), index)
    }

    pub fn from_path(path: impl AsRef<Path>, index: u32) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_vec(data, index)
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Parse the face for a run of glyph lookups.
    ///
    /// The bytes were checked when the font was loaded, so this only fails
    /// if they are rejected a second time.
    pub fn face(&self) -> Result<TtfFace<'_>> {
        Ok(TtfFace {
            face: Face::parse(&self.data, self.index)?,
        })
    }
}

/// A parsed face borrowed from a [TtfFont], answering glyph lookups.
pub struct TtfFace<'a> {
    face: Face<'a>,
}

impl TtfFace<'_> {
    /// PostScript outlines wind the other way round from `glyf` outlines.
    fn is_postscript(&self) -> bool {
        let tables = self.face.tables();
        tables.cff.is_some() || tables.cff2.is_some()
    }
}

impl GlyphSource for TtfFace<'_> {
    fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    fn glyph(&self, ch: char) -> Option<FontGlyph> {
        let id = self.face.glyph_index(ch)?;

        let mut collector = if self.is_postscript() {
            ContourCollector::reversed()
        } else {
            ContourCollector::default()
        };
        let rect = self.face.outline_glyph(id, &mut collector);

        Some(FontGlyph {
            contours: collector.finish(),
            bounds: rect.map(|r| Bounds {
                min: Point::new(f64::from(r.x_min), f64::from(r.y_min)),
                max: Point::new(f64::from(r.x_max), f64::from(r.y_max)),
            }),
            advance: f64::from(self.face.glyph_hor_advance(id).unwrap_or(0)),
        })
    }
}

/// Rebuilds tagged contour points from outline drawing calls.
#[derive(Debug, Default)]
pub struct ContourCollector {
    contours: Vec<Contour>,
    current: Contour,
    reverse: bool,
}

impl ContourCollector {
    /// A collector that reverses every contour, turning counter-clockwise
    /// outer contours into the clockwise `glyf` convention.
    pub fn reversed() -> Self {
        Self {
            reverse: true,
            ..Self::default()
        }
    }

    fn pen(&self) -> ContourPoint {
        self.current
            .last()
            .copied()
            .unwrap_or(ContourPoint::on(0.0, 0.0))
    }

    fn end_contour(&mut self) {
        let mut contour = std::mem::take(&mut self.current);
        // Drawing calls return to the start point explicitly; contours close implicitly.
        if contour.len() > 1 && contour.first() == contour.last() {
            contour.pop();
        }
        if self.reverse {
            contour.reverse();
        }
        if !contour.is_empty() {
            self.contours.push(contour);
        }
    }

    /// Finish the pending contour and return everything collected.
    pub fn finish(mut self) -> Vec<Contour> {
        self.end_contour();
        self.contours
    }
}

impl OutlineBuilder for ContourCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.end_contour();
        self.current.push(ContourPoint::on(x.into(), y.into()));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current.push(ContourPoint::on(x.into(), y.into()));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.current.push(ContourPoint::off(x1.into(), y1.into()));
        self.current.push(ContourPoint::on(x.into(), y.into()));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p0 = self.pen();
        let p0 = Point::new(p0.x, p0.y);
        let (p1, p2, p3) = (
            Point::new(x1.into(), y1.into()),
            Point::new(x2.into(), y2.into()),
            Point::new(x.into(), y.into()),
        );

        // Split at t = 0.5 and fit one quadratic to each half.
        let (a, b, c) = (p0.midpoint(p1), p1.midpoint(p2), p2.midpoint(p3));
        let (d, e) = (a.midpoint(b), b.midpoint(c));
        let mid = d.midpoint(e);

        for (start, c1, c2, end) in [(p0, a, d, mid), (mid, e, c, p3)] {
            let ctrl = Point::new(
                (3.0 * (c1.x + c2.x) - start.x - end.x) / 4.0,
                (3.0 * (c1.y + c2.y) - start.y - end.y) / 4.0,
            );
            self.current.push(ContourPoint::off(ctrl.x, ctrl.y));
            self.current.push(ContourPoint::on(end.x, end.y));
        }
    }

    fn close(&mut self) {
        self.end_contour();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extruded_text_core::PathKind;
    use extruded_text_layout::outline::{decode_glyph, winding};

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            TtfFont::from_vec(vec![0, 1, 2, 3], 0),
            Err(FontError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            TtfFont::from_path("/nonexistent/font.ttf", 0),
            Err(FontError::Io(_))
        ));
    }

    #[test]
    fn parsed_face_is_the_glyph_source() {
        fn source<S: GlyphSource>() {}
        source::<TtfFace<'static>>();
    }

    #[test]
    fn system_font_glyphs_decode_with_outers() {
        let Ok(font) = TtfFont::from_path("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf", 0)
        else {
            return;
        };
        let face = font.face().unwrap();
        assert_eq!(face.units_per_em(), font.units_per_em());

        for ch in ['H', 'l', 'o'] {
            let glyph = face.glyph(ch).unwrap();
            assert!(glyph.advance > 0.0);
            let outline = decode_glyph(&glyph, 1.0, 0.0, 0.0);
            assert!(!outline.outers.is_empty(), "{ch:?}");
        }
        assert_eq!(face.glyph('o').map(|g| decode_glyph(&g, 1.0, 0.0, 0.0).holes.len()), Some(1));
    }

    #[test]
    fn collects_quadratic_contours() {
        let mut collector = ContourCollector::default();
        collector.move_to(0.0, 0.0);
        collector.line_to(10.0, 0.0);
        collector.quad_to(10.0, 10.0, 0.0, 10.0);
        collector.line_to(0.0, 0.0);
        collector.close();

        collector.move_to(3.0, 3.0);
        collector.line_to(5.0, 3.0);
        collector.line_to(5.0, 5.0);
        collector.close();

        let contours = collector.finish();
        assert_eq!(contours.len(), 2);
        assert_eq!(
            contours[0],
            vec![
                ContourPoint::on(0.0, 0.0),
                ContourPoint::on(10.0, 0.0),
                ContourPoint::off(10.0, 10.0),
                ContourPoint::on(0.0, 10.0),
            ]
        );
        assert_eq!(contours[1].len(), 3);
    }

    #[test]
    fn cubic_curves_become_two_quadratics() {
        let mut collector = ContourCollector::default();
        collector.move_to(0.0, 0.0);
        collector.curve_to(0.0, 4.0, 8.0, 4.0, 8.0, 0.0);
        collector.close();

        let contours = collector.finish();
        let contour = &contours[0];
        assert_eq!(contour.len(), 5);
        assert!(!contour[1].on_curve);
        assert_eq!(contour[2], ContourPoint::on(4.0, 3.0));
        assert!(!contour[3].on_curve);
        assert_eq!(contour[4], ContourPoint::on(8.0, 0.0));
    }

    #[test]
    fn reversed_collector_makes_counter_clockwise_outlines_outer() {
        let draw = |collector: &mut ContourCollector| {
            collector.move_to(0.0, 0.0);
            collector.line_to(10.0, 0.0);
            collector.curve_to(12.0, 3.0, 12.0, 7.0, 10.0, 10.0);
            collector.line_to(0.0, 10.0);
            collector.close();
        };

        let mut plain = ContourCollector::default();
        draw(&mut plain);
        assert_eq!(winding(&plain.finish()[0]), PathKind::Hole);

        let mut reversed = ContourCollector::reversed();
        draw(&mut reversed);
        let contours = reversed.finish();
        assert_eq!(winding(&contours[0]), PathKind::Outer);

        let outline = decode_glyph(
            &FontGlyph {
                contours,
                bounds: None,
                advance: 12.0,
            },
            1.0,
            0.0,
            0.0,
        );
        assert_eq!((outline.outers.len(), outline.holes.len()), (1, 0));
    }

    #[test]
    fn unclosed_contour_is_kept() {
        let mut collector = ContourCollector::default();
        collector.move_to(0.0, 0.0);
        collector.line_to(1.0, 0.0);
        collector.line_to(1.0, 1.0);
        assert_eq!(collector.finish().len(), 1);
    }
}

//! SVG render target.
//!
//! Screen coordinates already have y pointing down, so they map onto SVG
//! user units directly. Path data is written as raw `d` strings to keep
//! integer pixel coordinates exact.

use std::fmt::Write as _;
use std::path::Path;

use svg::Document;
use svg::node::element::Path as SvgPath;

use super::RenderTarget;
use crate::error::Result;
use crate::path::{Color, Figure, Fill, Stroke};

/// Accumulates drawn paths into an SVG document
pub struct SvgTarget {
    width: u32,
    height: u32,
    background: Option<Color>,
    elements: Vec<SvgPath>,
}

impl SvgTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            elements: Vec::new(),
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Number of drawn `<path>` elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_document(self) -> Document {
        let mut doc = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("viewBox", format!("0 0 {} {}", self.width, self.height))
            .set("width", self.width.to_string())
            .set("height", self.height.to_string());

        if let Some(bg) = self.background {
            doc = doc.add(
                svg::node::element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", bg.to_hex())
                    .set("fill-opacity", fmt_opacity(bg)),
            );
        }

        for el in self.elements {
            doc = doc.add(el);
        }
        doc
    }

    pub fn to_svg_string(self) -> String {
        self.into_document().to_string()
    }

    pub fn save(self, path: &Path) -> Result<()> {
        svg::save(path, &self.into_document())?;
        Ok(())
    }
}

impl RenderTarget for SvgTarget {
    fn fill_path(&mut self, figures: &[Figure], fill: &Fill) {
        let closed: Vec<&Figure> = figures.iter().filter(|f| f.is_closed()).collect();
        if closed.is_empty() {
            return;
        }

        let el = SvgPath::new()
            .set("d", figures_to_d(closed))
            .set("fill", fill.color.to_hex())
            .set("fill-opacity", fmt_opacity(fill.color))
            .set("fill-rule", "evenodd")
            .set("stroke", "none");
        self.elements.push(el);
    }

    fn stroke_path(&mut self, figures: &[Figure], stroke: &Stroke) {
        if figures.is_empty() {
            return;
        }

        let el = SvgPath::new()
            .set("d", figures_to_d(figures.iter()))
            .set("fill", "none")
            .set("stroke", stroke.color.to_hex())
            .set("stroke-opacity", fmt_opacity(stroke.color))
            .set("stroke-width", stroke.width.to_string())
            .set("stroke-linejoin", stroke.line_join.as_str());
        self.elements.push(el);
    }
}

fn figures_to_d<'a>(figures: impl IntoIterator<Item = &'a Figure>) -> String {
    let mut d = String::new();
    for figure in figures {
        for (i, p) in figure.points().iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            if !d.is_empty() {
                d.push(' ');
            }
            let _ = write!(d, "{cmd}{} {}", p.x, p.y);
        }
        if figure.is_closed() {
            d.push_str(" Z");
        }
    }
    d
}

fn fmt_opacity(c: Color) -> String {
    format!("{:.3}", c.opacity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ScreenPoint;

    fn square() -> Figure {
        Figure::Polygon(vec![
            ScreenPoint::new(0, 0),
            ScreenPoint::new(10, 0),
            ScreenPoint::new(10, 10),
        ])
    }

    #[test]
    fn test_path_data() {
        let line = Figure::Lines(vec![ScreenPoint::new(1, 2), ScreenPoint::new(3, 4)]);
        let d = figures_to_d([&square(), &line]);
        assert_eq!(d, "M0 0 L10 0 L10 10 Z M1 2 L3 4");
    }

    #[test]
    fn test_fill_then_stroke() {
        let mut target = SvgTarget::new(100, 100);
        target.fill_path(&[square()], &Fill::default());
        target.stroke_path(&[square()], &Stroke::default());
        assert_eq!(target.len(), 2);

        let svg = target.to_svg_string();
        assert!(svg.contains("fill-rule=\"evenodd\""), "{svg}");
        assert!(svg.contains("stroke-linejoin=\"round\""), "{svg}");
        assert!(svg.contains("#191970"), "{svg}");
        assert!(svg.contains("#f0f8ff"), "{svg}");
        assert!(svg.find("fill-rule").unwrap() < svg.find("stroke-linejoin").unwrap());
    }

    #[test]
    fn test_lines_are_not_filled() {
        let line = Figure::Lines(vec![ScreenPoint::new(1, 2), ScreenPoint::new(3, 4)]);
        let mut target = SvgTarget::new(10, 10);
        target.fill_path(std::slice::from_ref(&line), &Fill::default());
        assert!(target.is_empty());
        target.stroke_path(&[line], &Stroke::default());
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");

        let mut target = SvgTarget::new(50, 50).with_background(Color::rgb(255, 255, 255));
        target.fill_path(&[square()], &Fill::default());
        target.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains("viewBox=\"0 0 50 50\""));
    }
}

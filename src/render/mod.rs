pub mod svg;

pub use self::svg::SvgTarget;

use crate::path::{Figure, Fill, Stroke};

/// Drawing surface for screen paths.
///
/// Figures are in screen pixels. Fills use the even-odd rule across all
/// figures of one call; [`Figure::Lines`] figures are only stroked.
pub trait RenderTarget {
    fn fill_path(&mut self, figures: &[Figure], fill: &Fill);
    fn stroke_path(&mut self, figures: &[Figure], stroke: &Stroke);
}

//! Screen-space path built from projected rings.
//!
//! The path is what gets drawn and what mouse hit tests run against, so
//! both always see the same geometry. Rings with three or more points
//! become closed polygons, two-point rings become a line and shorter rings
//! are skipped. Filling uses the even-odd rule, which makes the result
//! independent of ring winding.

pub mod style;

pub use style::{Color, Fill, LineJoin, Stroke};

use crate::geometry::ScreenPoint;
use crate::render::RenderTarget;

/// One subpath of a [`ScreenPath`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Figure {
    /// Closed, fillable outline
    Polygon(Vec<ScreenPoint>),
    /// Open polyline with no interior
    Lines(Vec<ScreenPoint>),
}

impl Figure {
    pub fn points(&self) -> &[ScreenPoint] {
        match self {
            Figure::Polygon(points) | Figure::Lines(points) => points,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Figure::Polygon(_))
    }
}

/// Pixel bounding box of a path, inclusive on all sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl ScreenBounds {
    fn include(bounds: Option<Self>, p: ScreenPoint) -> Self {
        match bounds {
            Some(b) => Self {
                min_x: b.min_x.min(p.x),
                max_x: b.max_x.max(p.x),
                min_y: b.min_y.min(p.y),
                max_y: b.max_y.max(p.y),
            },
            None => Self {
                min_x: p.x,
                max_x: p.x,
                min_y: p.y,
                max_y: p.y,
            },
        }
    }

    pub fn contains(&self, p: ScreenPoint) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn width(&self) -> i64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i64 {
        self.max_y - self.min_y
    }
}

/// Capabilities a polygon needs from its screen path.
///
/// Keeps the polygon model free of any particular graphics library; a
/// backend owns whatever drawing resources it needs and frees them in
/// [`release`](PathBackend::release) or when it is rebuilt.
pub trait PathBackend: Default {
    /// Replace the current contents with the given rings
    fn rebuild(&mut self, rings: &[&[ScreenPoint]]);

    /// Whether `point` falls inside the filled region
    fn contains(&self, point: ScreenPoint) -> bool;

    /// Fill, then stroke the path
    fn render(&self, target: &mut dyn RenderTarget, fill: &Fill, stroke: &Stroke);

    /// Drop all contents and any held resources
    fn release(&mut self);
}

/// Headless path made of polygon and polyline figures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenPath {
    figures: Vec<Figure>,
    bounds: Option<ScreenBounds>,
}

impl ScreenPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path from rings in one go
    pub fn from_rings(rings: &[&[ScreenPoint]]) -> Self {
        let mut path = Self::new();
        path.rebuild(rings);
        path
    }

    /// Empty the path, keeping its allocation
    pub fn reset(&mut self) {
        self.figures.clear();
        self.bounds = None;
    }

    /// Append one ring. Points are added last-first; even-odd filling makes
    /// the direction irrelevant.
    pub fn add_ring(&mut self, ring: &[ScreenPoint]) {
        let reversed: Vec<ScreenPoint> = ring.iter().rev().copied().collect();

        let figure = match reversed.len() {
            0 | 1 => return,
            2 => Figure::Lines(reversed),
            _ => Figure::Polygon(reversed),
        };

        for &p in figure.points() {
            self.bounds = Some(ScreenBounds::include(self.bounds, p));
        }
        self.figures.push(figure);
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn bounds(&self) -> Option<ScreenBounds> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Even-odd test across every closed figure. Line figures have no area
    /// and never contain a point.
    pub fn contains_point(&self, point: ScreenPoint) -> bool {
        match self.bounds {
            Some(b) if b.contains(point) => {}
            _ => return false,
        }

        let (px, py) = (point.x as f64, point.y as f64);
        let mut inside = false;

        for figure in &self.figures {
            let Figure::Polygon(points) = figure else {
                continue;
            };

            let mut j = points.len() - 1;
            for i in 0..points.len() {
                let (xi, yi) = (points[i].x as f64, points[i].y as f64);
                let (xj, yj) = (points[j].x as f64, points[j].y as f64);

                if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
                    inside = !inside;
                }
                j = i;
            }
        }

        inside
    }
}

impl PathBackend for ScreenPath {
    fn rebuild(&mut self, rings: &[&[ScreenPoint]]) {
        self.reset();
        for ring in rings {
            self.add_ring(ring);
        }
        log::trace!(
            "Rebuilt screen path: {} figures from {} rings",
            self.figures.len(),
            rings.len()
        );
    }

    fn contains(&self, point: ScreenPoint) -> bool {
        self.contains_point(point)
    }

    fn render(&self, target: &mut dyn RenderTarget, fill: &Fill, stroke: &Stroke) {
        if self.figures.is_empty() {
            return;
        }
        target.fill_path(&self.figures, fill);
        target.stroke_path(&self.figures, stroke);
    }

    fn release(&mut self) {
        self.figures = Vec::new();
        self.bounds = None;
    }
}

//! Map overlay polygon.
//!
//! A polygon keeps its rings in geographic coordinates together with their
//! current screen projection, and owns the screen path used for drawing
//! and mouse hit testing. Lifecycle:
//!
//! ```text
//! Uninitialized -> Projected -> PathBuilt -> Projected (on any pixel change) -> ...
//!                                         \-> Disposed (terminal)
//! ```
//!
//! Any change to the projected points marks the path stale; hit tests and
//! rendering ignore a stale path until [`MapPolygon::update_path`] runs.

use serde_json::Value;

use crate::error::{PolygonError, Result};
use crate::geometry::{
    GeoBounds, GeoPoint, ProjectedRing, Projection, ScreenPoint, contains_point,
};
use crate::path::{Fill, PathBackend, ScreenPath, Stroke};
use crate::render::RenderTarget;

/// Where a polygon is in its projection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonState {
    /// Some ring has no screen projection yet
    Uninitialized,
    /// Every ring is projected but the path is missing or stale
    Projected,
    /// The path matches the current projection
    PathBuilt,
    Disposed,
}

/// Side effect a visibility change asks of the owning view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    /// Re-project and rebuild the path
    Shown,
    /// Drop any hover state on this polygon
    Hidden,
}

#[derive(Debug)]
pub struct MapPolygon<B: PathBackend = ScreenPath> {
    pub name: String,
    /// Opaque user data, persisted with the polygon
    pub tag: Option<Value>,
    visible: bool,
    hit_test_visible: bool,
    mouse_over: bool,
    stroke: Stroke,
    fill: Fill,
    rings: Vec<ProjectedRing>,
    path: B,
    path_current: bool,
    disposed: bool,
}

impl MapPolygon<ScreenPath> {
    /// Create a polygon from rings of geographic points. Ring 0 is the outer
    /// boundary; later rings flip containment inside themselves.
    pub fn new(rings: Vec<Vec<GeoPoint>>, name: impl Into<String>) -> Result<Self> {
        Self::with_backend(rings, name)
    }

    /// Create a single-ring polygon
    pub fn from_points(points: Vec<GeoPoint>, name: impl Into<String>) -> Result<Self> {
        Self::new(vec![points], name)
    }
}

impl<B: PathBackend> MapPolygon<B> {
    /// Create a polygon drawing through a specific path backend
    pub fn with_backend(rings: Vec<Vec<GeoPoint>>, name: impl Into<String>) -> Result<Self> {
        match rings.first() {
            None => return Err(PolygonError::invalid_argument("polygon needs at least one ring")),
            Some(outer) if outer.is_empty() => {
                return Err(PolygonError::invalid_argument("outer ring is empty"));
            }
            Some(_) => {}
        }

        Ok(Self {
            name: name.into(),
            tag: None,
            visible: true,
            hit_test_visible: false,
            mouse_over: false,
            stroke: Stroke::default(),
            fill: Fill::default(),
            rings: rings.into_iter().map(ProjectedRing::new).collect(),
            path: B::default(),
            path_current: false,
            disposed: false,
        })
    }

    pub fn with_style(mut self, stroke: Stroke, fill: Fill) -> Self {
        self.stroke = stroke;
        self.fill = fill;
        self
    }

    pub fn with_tag(mut self, tag: Value) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn state(&self) -> PolygonState {
        if self.disposed {
            PolygonState::Disposed
        } else if self.path_current {
            PolygonState::PathBuilt
        } else if self.rings.iter().all(ProjectedRing::is_projected) {
            PolygonState::Projected
        } else {
            PolygonState::Uninitialized
        }
    }

    /// Whether `point` lies inside the polygon. Always `false` once disposed.
    pub fn contains(&self, point: GeoPoint) -> bool {
        contains_point(point, &self.rings)
    }

    // --- ring access ---

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Geographic points of every ring, in order
    pub fn rings(&self) -> impl Iterator<Item = &[GeoPoint]> + '_ {
        self.rings.iter().map(ProjectedRing::geo)
    }

    /// Screen points of every ring; empty slices for unprojected rings
    pub fn local_rings(&self) -> impl Iterator<Item = &[ScreenPoint]> + '_ {
        self.rings.iter().map(ProjectedRing::local)
    }

    pub fn ring(&self, index: usize) -> Option<&[GeoPoint]> {
        self.rings.get(index).map(ProjectedRing::geo)
    }

    pub fn local_ring(&self, index: usize) -> Option<&[ScreenPoint]> {
        self.rings.get(index).map(ProjectedRing::local)
    }

    /// Outer ring points
    pub fn points(&self) -> &[GeoPoint] {
        self.ring(0).unwrap_or_default()
    }

    /// Outer ring screen points
    pub fn local_points(&self) -> &[ScreenPoint] {
        self.local_ring(0).unwrap_or_default()
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_rings(&self.rings)
    }

    // --- structural edits ---

    /// Append a modifier ring, returning its index
    pub fn add_ring(&mut self, points: Vec<GeoPoint>) -> Result<usize> {
        self.ensure_alive()?;
        self.rings.push(ProjectedRing::new(points));
        self.invalidate_path();
        Ok(self.rings.len() - 1)
    }

    /// Remove a modifier ring. The outer ring cannot be removed.
    pub fn remove_ring(&mut self, index: usize) -> Result<Vec<GeoPoint>> {
        self.ensure_alive()?;
        if index == 0 {
            return Err(PolygonError::invalid_argument("cannot remove the outer ring"));
        }
        self.check_ring(index)?;

        let ring = self.rings.remove(index);
        self.invalidate_path();
        Ok(ring.geo().to_vec())
    }

    pub fn push_point(&mut self, ring: usize, point: GeoPoint) -> Result<()> {
        self.ring_mut(ring)?.push(point);
        self.invalidate_path();
        Ok(())
    }

    /// Insert a point before `index`; `index == len` appends
    pub fn insert_point(&mut self, ring: usize, index: usize, point: GeoPoint) -> Result<()> {
        let r = self.ring_mut(ring)?;
        if index > r.len() {
            return Err(PolygonError::PointOutOfRange {
                ring,
                index,
                len: r.len(),
            });
        }
        r.insert(index, point);
        self.invalidate_path();
        Ok(())
    }

    /// Remove a point. Rings may shrink below three points; they then stop
    /// containing anything until points are added back.
    pub fn remove_point(&mut self, ring: usize, index: usize) -> Result<GeoPoint> {
        let r = self.ring_mut(ring)?;
        check_point(ring, index, r)?;
        let removed = r.remove(index);
        self.invalidate_path();
        Ok(removed)
    }

    pub fn set_point(&mut self, ring: usize, index: usize, point: GeoPoint) -> Result<()> {
        let r = self.ring_mut(ring)?;
        check_point(ring, index, r)?;
        r.set(index, point);
        self.invalidate_path();
        Ok(())
    }

    // --- projection ---

    /// Store the screen position of one point, as computed by the host view
    pub fn set_local_point(&mut self, ring: usize, index: usize, point: ScreenPoint) -> Result<()> {
        let r = self.ring_mut(ring)?;
        check_point(ring, index, r)?;
        r.set_local(index, point);
        self.invalidate_path();
        Ok(())
    }

    /// Project every point through `projection`
    pub fn update_local_position<P: Projection + ?Sized>(&mut self, projection: &P) -> Result<()> {
        self.ensure_alive()?;
        for ring in &mut self.rings {
            ring.project(projection);
        }
        self.invalidate_path();
        log::trace!(
            "Projected polygon '{}' ({} rings)",
            self.name,
            self.rings.len()
        );
        Ok(())
    }

    /// Rebuild the screen path from the current projection. Every ring must
    /// be projected first; a ring whose points were edited since the last
    /// projection fails with [`PolygonError::NotProjected`] and the path
    /// stays stale.
    pub fn update_path(&mut self) -> Result<()> {
        self.ensure_alive()?;
        if let Some(ring) = self.rings.iter().position(|r| !r.is_projected()) {
            self.invalidate_path();
            return Err(PolygonError::NotProjected { ring });
        }

        let locals: Vec<&[ScreenPoint]> = self.rings.iter().map(ProjectedRing::local).collect();
        self.path.rebuild(&locals);
        self.path_current = true;

        log::debug!(
            "Rebuilt path for polygon '{}' from {} rings",
            self.name,
            locals.len()
        );
        Ok(())
    }

    /// The current path, or `None` while it is stale
    pub fn path(&self) -> Option<&B> {
        self.path_current.then_some(&self.path)
    }

    /// Whether the screen point falls inside the drawn shape. `false` while
    /// the path is stale.
    pub fn is_inside_local(&self, point: ScreenPoint) -> bool {
        self.path_current && self.path.contains(point)
    }

    // --- rendering ---

    /// Fill then stroke the current path. Hidden polygons and polygons
    /// without a current path draw nothing.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        if self.visible && self.path_current {
            self.path.render(target, &self.fill, &self.stroke);
        }
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn fill(&self) -> &Fill {
        &self.fill
    }

    pub fn set_stroke(&mut self, stroke: Stroke) {
        self.stroke = stroke;
    }

    pub fn set_fill(&mut self, fill: Fill) {
        self.fill = fill;
    }

    // --- flags ---

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Toggle visibility. Returns what the owning view has to do, or `None`
    /// when nothing changed. Ring data is untouched.
    pub fn set_visible(&mut self, visible: bool) -> Option<VisibilityChange> {
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        if visible {
            Some(VisibilityChange::Shown)
        } else {
            self.mouse_over = false;
            Some(VisibilityChange::Hidden)
        }
    }

    /// Whether the polygon takes part in mouse hover and click handling
    pub fn is_hit_test_visible(&self) -> bool {
        self.hit_test_visible
    }

    pub fn set_hit_test_visible(&mut self, value: bool) {
        self.hit_test_visible = value;
    }

    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    pub(crate) fn set_mouse_over(&mut self, value: bool) {
        self.mouse_over = value;
    }

    // --- lifecycle ---

    /// Clear all rings and release the path. Calling it again does nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        for ring in &mut self.rings {
            ring.clear();
        }
        self.rings.clear();

        self.path.release();
        self.path_current = false;
        self.mouse_over = false;
        log::debug!("Disposed polygon '{}'", self.name);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.disposed {
            Err(PolygonError::Disposed)
        } else {
            Ok(())
        }
    }

    fn check_ring(&self, index: usize) -> Result<()> {
        if index < self.rings.len() {
            Ok(())
        } else {
            Err(PolygonError::RingOutOfRange {
                index,
                len: self.rings.len(),
            })
        }
    }

    fn ring_mut(&mut self, index: usize) -> Result<&mut ProjectedRing> {
        self.ensure_alive()?;
        self.check_ring(index)?;
        Ok(&mut self.rings[index])
    }

    pub(crate) fn invalidate_path(&mut self) {
        self.path_current = false;
    }
}

fn check_point(ring: usize, index: usize, r: &ProjectedRing) -> Result<()> {
    if index < r.len() {
        Ok(())
    } else {
        Err(PolygonError::PointOutOfRange {
            ring,
            index,
            len: r.len(),
        })
    }
}

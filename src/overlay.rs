//! Overlay: the owning container of map polygons.
//!
//! The overlay stands in for the host map view. It holds the current
//! [`Viewport`], keeps each visible polygon projected and its path built,
//! tracks mouse hover and forwards enter/leave/click notifications.

use crate::geometry::{ScreenPoint, Viewport};
use crate::polygon::{MapPolygon, VisibilityChange};
use crate::render::RenderTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Raw pointer input in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: i64,
    pub y: i64,
    pub button: MouseButton,
    /// 1 for a single click, 2 for a double click
    pub clicks: u32,
}

impl MouseEvent {
    pub fn click(x: i64, y: i64) -> Self {
        Self {
            x,
            y,
            button: MouseButton::Left,
            clicks: 1,
        }
    }

    pub fn double_click(x: i64, y: i64) -> Self {
        Self {
            clicks: 2,
            ..Self::click(x, y)
        }
    }

    pub fn position(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }
}

/// Mouse notification hooks. All methods default to doing nothing.
pub trait PolygonEvents {
    fn on_enter(&mut self, _polygon: &MapPolygon) {}
    fn on_leave(&mut self, _polygon: &MapPolygon) {}
    fn on_click(&mut self, _polygon: &MapPolygon, _event: &MouseEvent) {}
    fn on_double_click(&mut self, _polygon: &MapPolygon, _event: &MouseEvent) {}
}

/// Ignores every notification
impl PolygonEvents for () {}

#[derive(Debug)]
pub struct Overlay {
    pub id: String,
    polygons: Vec<MapPolygon>,
    view: Option<Viewport>,
    visible: bool,
    /// Suppresses redraw requests while a batch of edits is applied
    pub hold_invalidation: bool,
    needs_redraw: bool,
}

impl Overlay {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            polygons: Vec::new(),
            view: None,
            visible: true,
            hold_invalidation: false,
            needs_redraw: false,
        }
    }

    /// Take ownership of a polygon, projecting it if a view is set.
    /// Returns its index.
    pub fn add(&mut self, polygon: MapPolygon) -> usize {
        self.polygons.push(polygon);
        let index = self.polygons.len() - 1;
        self.refresh_polygon(index);
        self.invalidate();
        index
    }

    /// Hand a polygon back to the caller. Its path was built for this
    /// overlay's view, so it comes back stale.
    pub fn remove(&mut self, index: usize) -> Option<MapPolygon> {
        if index >= self.polygons.len() {
            return None;
        }
        let mut polygon = self.polygons.remove(index);
        polygon.set_mouse_over(false);
        polygon.invalidate_path();
        self.invalidate();
        Some(polygon)
    }

    pub fn polygons(&self) -> &[MapPolygon] {
        &self.polygons
    }

    pub fn polygon(&self, index: usize) -> Option<&MapPolygon> {
        self.polygons.get(index)
    }

    /// Mutable access for edits. Geometry edits leave the path stale until
    /// [`refresh_polygon`](Self::refresh_polygon) or [`refresh`](Self::refresh).
    pub fn polygon_mut(&mut self, index: usize) -> Option<&mut MapPolygon> {
        self.polygons.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn view(&self) -> Option<&Viewport> {
        self.view.as_ref()
    }

    /// Switch to a new view transform and re-project every visible polygon
    pub fn set_view(&mut self, view: Viewport) {
        self.view = Some(view);
        self.refresh();
    }

    /// Re-project and rebuild every visible polygon
    pub fn refresh(&mut self) {
        for index in 0..self.polygons.len() {
            self.refresh_polygon(index);
        }
        self.invalidate();
    }

    /// Re-project and rebuild one polygon. Hidden polygons are only marked
    /// stale and get refreshed when shown again.
    pub fn refresh_polygon(&mut self, index: usize) {
        let Some(view) = self.view.as_ref() else {
            return;
        };
        let Some(polygon) = self.polygons.get_mut(index) else {
            return;
        };
        if !polygon.is_visible() {
            polygon.invalidate_path();
            return;
        }

        let result = polygon
            .update_local_position(view)
            .and_then(|_| polygon.update_path());
        if let Err(e) = result {
            log::warn!("Skipping polygon '{}': {}", polygon.name, e);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the whole overlay. Hiding ends any hover and fires
    /// `on_leave` for the polygons the mouse was over.
    pub fn set_visible(&mut self, visible: bool, events: &mut dyn PolygonEvents) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if !visible {
            for polygon in &mut self.polygons {
                if polygon.is_mouse_over() {
                    polygon.set_mouse_over(false);
                    events.on_leave(polygon);
                }
            }
        }
        self.invalidate();
    }

    /// Show or hide one polygon. Showing re-projects it; hiding drops its
    /// hover state and fires `on_leave` if the mouse was over it.
    pub fn set_polygon_visible(
        &mut self,
        index: usize,
        visible: bool,
        events: &mut dyn PolygonEvents,
    ) -> bool {
        let Some(polygon) = self.polygons.get_mut(index) else {
            return false;
        };

        let was_over = polygon.is_mouse_over();
        match polygon.set_visible(visible) {
            None => return false,
            Some(VisibilityChange::Shown) => self.refresh_polygon(index),
            Some(VisibilityChange::Hidden) => {
                if was_over {
                    events.on_leave(&self.polygons[index]);
                }
            }
        }

        self.invalidate();
        true
    }

    /// Whether the mouse currently hovers any polygon
    pub fn is_mouse_over_polygon(&self) -> bool {
        self.polygons.iter().any(MapPolygon::is_mouse_over)
    }

    /// Update hover state for a pointer move, firing enter/leave on
    /// transitions
    pub fn mouse_move(&mut self, point: ScreenPoint, events: &mut dyn PolygonEvents) {
        if !self.visible {
            return;
        }

        for polygon in &mut self.polygons {
            if !polygon.is_visible() || !polygon.is_hit_test_visible() {
                continue;
            }

            let hit = polygon.is_inside_local(point);
            if hit && !polygon.is_mouse_over() {
                polygon.set_mouse_over(true);
                events.on_enter(polygon);
            } else if !hit && polygon.is_mouse_over() {
                polygon.set_mouse_over(false);
                events.on_leave(polygon);
            }
        }
    }

    /// Deliver a click to every hit-test-visible polygon under the pointer.
    /// Returns how many polygons were hit.
    pub fn mouse_click(&mut self, event: &MouseEvent, events: &mut dyn PolygonEvents) -> usize {
        if !self.visible {
            return 0;
        }

        let point = event.position();
        let mut hits = 0;
        for polygon in &self.polygons {
            if !polygon.is_visible()
                || !polygon.is_hit_test_visible()
                || !polygon.is_inside_local(point)
            {
                continue;
            }

            hits += 1;
            if event.clicks >= 2 {
                events.on_double_click(polygon, event);
            } else {
                events.on_click(polygon, event);
            }
        }
        hits
    }

    /// Draw every polygon in insertion order
    pub fn render(&self, target: &mut dyn RenderTarget) {
        if !self.visible {
            return;
        }
        for polygon in &self.polygons {
            polygon.render(target);
        }
    }

    /// Whether a redraw was requested since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn invalidate(&mut self) {
        if !self.hold_invalidation {
            self.needs_redraw = true;
        }
    }

    /// Dispose and drop every polygon
    pub fn clear(&mut self) {
        for polygon in &mut self.polygons {
            polygon.dispose();
        }
        self.polygons.clear();
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeoPoint;
    use crate::path::{Figure, Fill, Stroke};

    fn square(min: f64, max: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(min, min),
            GeoPoint::new(min, max),
            GeoPoint::new(max, max),
            GeoPoint::new(max, min),
        ]
    }

    /// Equator view, 10 px per degree, 200x200 surface centered at (0, 0)
    fn view() -> Viewport {
        Viewport::new(GeoPoint::new(0.0, 0.0), 10.0, 200, 200)
    }

    fn interactive(rings: Vec<Vec<GeoPoint>>, name: &str) -> MapPolygon {
        let mut p = MapPolygon::new(rings, name).unwrap();
        p.set_hit_test_visible(true);
        p
    }

    #[derive(Default)]
    struct Log(Vec<String>);

    impl PolygonEvents for Log {
        fn on_enter(&mut self, polygon: &MapPolygon) {
            self.0.push(format!("enter {}", polygon.name));
        }
        fn on_leave(&mut self, polygon: &MapPolygon) {
            self.0.push(format!("leave {}", polygon.name));
        }
        fn on_click(&mut self, polygon: &MapPolygon, _event: &MouseEvent) {
            self.0.push(format!("click {}", polygon.name));
        }
        fn on_double_click(&mut self, polygon: &MapPolygon, _event: &MouseEvent) {
            self.0.push(format!("double {}", polygon.name));
        }
    }

    #[derive(Default)]
    struct Count(usize);

    impl RenderTarget for Count {
        fn fill_path(&mut self, _: &[Figure], _: &Fill) {
            self.0 += 1;
        }
        fn stroke_path(&mut self, _: &[Figure], _: &Stroke) {}
    }

    #[test]
    fn test_add_projects_when_view_set() {
        let mut overlay = Overlay::new("shapes");
        let i = overlay.add(interactive(vec![square(-5.0, 5.0)], "a"));
        assert!(overlay.polygon(i).unwrap().path().is_none());

        overlay.set_view(view());
        assert!(overlay.polygon(i).unwrap().path().is_some());

        let j = overlay.add(interactive(vec![square(0.0, 2.0)], "b"));
        assert!(overlay.polygon(j).unwrap().path().is_some());
        assert!(overlay.take_redraw());
        assert!(!overlay.take_redraw());
    }

    #[test]
    fn test_hover_transitions() {
        let mut overlay = Overlay::new("shapes");
        overlay.set_view(view());
        overlay.add(interactive(vec![square(-5.0, 5.0)], "a"));
        let mut log = Log::default();

        overlay.mouse_move(ScreenPoint::new(100, 100), &mut log);
        overlay.mouse_move(ScreenPoint::new(101, 100), &mut log);
        assert!(overlay.is_mouse_over_polygon());
        overlay.mouse_move(ScreenPoint::new(10, 10), &mut log);
        assert!(!overlay.is_mouse_over_polygon());

        assert_eq!(log.0, vec!["enter a", "leave a"]);
    }

    #[test]
    fn test_hit_test_visible_gate() {
        let mut overlay = Overlay::new("shapes");
        overlay.set_view(view());
        let passive = MapPolygon::new(vec![square(-5.0, 5.0)], "passive").unwrap();
        overlay.add(passive);
        let mut log = Log::default();

        overlay.mouse_move(ScreenPoint::new(100, 100), &mut log);
        let hits = overlay.mouse_click(&MouseEvent::click(100, 100), &mut log);
        assert_eq!(hits, 0);
        assert!(log.0.is_empty());
    }

    #[test]
    fn test_clicks() {
        let mut overlay = Overlay::new("shapes");
        overlay.set_view(view());
        overlay.add(interactive(vec![square(-5.0, 5.0)], "big"));
        overlay.add(interactive(vec![square(-1.0, 1.0)], "small"));
        let mut log = Log::default();

        assert_eq!(overlay.mouse_click(&MouseEvent::click(100, 100), &mut log), 2);
        assert_eq!(
            overlay.mouse_click(&MouseEvent::double_click(135, 100), &mut log),
            1
        );
        assert_eq!(overlay.mouse_click(&MouseEvent::click(0, 0), &mut log), 0);

        assert_eq!(log.0, vec!["click big", "click small", "double big"]);
    }

    #[test]
    fn test_hide_polygon_fires_leave() {
        let mut overlay = Overlay::new("shapes");
        overlay.set_view(view());
        overlay.add(interactive(vec![square(-5.0, 5.0)], "a"));
        let mut log = Log::default();

        overlay.mouse_move(ScreenPoint::new(100, 100), &mut log);
        assert!(overlay.set_polygon_visible(0, false, &mut log));
        assert!(!overlay.set_polygon_visible(0, false, &mut log));
        assert!(!overlay.is_mouse_over_polygon());
        assert_eq!(log.0, vec!["enter a", "leave a"]);

        // Hidden polygons are not re-projected on view changes, but their
        // old path no longer answers hit tests
        overlay.set_view(Viewport::new(GeoPoint::new(80.0, 170.0), 10.0, 200, 200));
        let hidden = overlay.polygon(0).unwrap();
        assert!(hidden.path().is_none());
        assert!(!hidden.is_inside_local(ScreenPoint::new(100, 100)));
        overlay.set_view(view());

        // Showing re-projects with the current view
        assert!(overlay.set_polygon_visible(0, true, &mut ()));
        let poly = overlay.polygon(0).unwrap();
        assert!(poly.path().is_some());
        assert_eq!(poly.local_points()[0], ScreenPoint::new(50, 150));
    }

    #[test]
    fn test_render_respects_visibility() {
        let mut overlay = Overlay::new("shapes");
        overlay.set_view(view());
        overlay.add(interactive(vec![square(-5.0, 5.0)], "a"));
        overlay.add(interactive(vec![square(1.0, 2.0)], "b"));

        let mut count = Count::default();
        overlay.render(&mut count);
        assert_eq!(count.0, 2);

        overlay.set_polygon_visible(1, false, &mut ());
        let mut count = Count::default();
        overlay.render(&mut count);
        assert_eq!(count.0, 1);

        overlay.set_visible(false, &mut ());
        let mut count = Count::default();
        overlay.render(&mut count);
        assert_eq!(count.0, 0);
    }

    #[test]
    fn test_remove_transfers_ownership() {
        let mut overlay = Overlay::new("shapes");
        overlay.set_view(view());
        overlay.add(interactive(vec![square(-5.0, 5.0)], "a"));
        overlay.mouse_move(ScreenPoint::new(100, 100), &mut ());

        let poly = overlay.remove(0).unwrap();
        assert!(!poly.is_mouse_over());
        assert!(poly.path().is_none());
        assert!(!poly.is_inside_local(ScreenPoint::new(100, 100)));
        assert!(overlay.is_empty());
        assert!(overlay.remove(0).is_none());

        let mut other = Overlay::new("other");
        other.add(poly);
        assert_eq!(other.len(), 1);
        assert_eq!(other.mouse_click(&MouseEvent::click(100, 100), &mut ()), 0);
    }

    #[test]
    fn test_hide_overlay_ends_hover() {
        let mut overlay = Overlay::new("shapes");
        overlay.set_view(view());
        overlay.add(interactive(vec![square(-5.0, 5.0)], "a"));
        overlay.add(interactive(vec![square(20.0, 30.0)], "far"));
        let mut log = Log::default();

        overlay.mouse_move(ScreenPoint::new(100, 100), &mut log);
        overlay.set_visible(false, &mut log);
        assert!(!overlay.is_mouse_over_polygon());
        assert_eq!(log.0, vec!["enter a", "leave a"]);

        overlay.set_visible(true, &mut log);
        overlay.mouse_move(ScreenPoint::new(100, 100), &mut log);
        assert_eq!(log.0, vec!["enter a", "leave a", "enter a"]);
    }

    #[test]
    fn test_hold_invalidation() {
        let mut overlay = Overlay::new("shapes");
        overlay.hold_invalidation = true;
        overlay.add(interactive(vec![square(0.0, 1.0)], "a"));
        assert!(!overlay.take_redraw());

        overlay.hold_invalidation = false;
        overlay.set_visible(false, &mut ());
        assert!(overlay.take_redraw());
    }

    #[test]
    fn test_clear_disposes() {
        let mut overlay = Overlay::new("shapes");
        overlay.add(interactive(vec![square(0.0, 1.0)], "a"));
        overlay.clear();
        assert!(overlay.is_empty());
    }
}

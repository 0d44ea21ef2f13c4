use super::{GeoBounds, GeoPoint, ScreenPoint};

/// Maps geographic positions onto the rendering surface.
///
/// Implemented by whatever hosts the map view. Closures work too.
pub trait Projection {
    fn project(&self, point: GeoPoint) -> ScreenPoint;
}

impl<F> Projection for F
where
    F: Fn(GeoPoint) -> ScreenPoint,
{
    fn project(&self, point: GeoPoint) -> ScreenPoint {
        self(point)
    }
}

/// Simple view transform from WGS84 to screen pixels
///
/// Uses the same local approximation as a city-scale map:
/// - x = (lng - center_lng) * cos(center_lat) * zoom
/// - y = (lat - center_lat) * zoom, flipped so north is up
///
/// `zoom` is in pixels per degree of latitude. The center lands in the
/// middle of the `width` x `height` surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    center: GeoPoint,
    zoom: f64,
    width: u32,
    height: u32,
    cos_lat: f64,
}

impl Viewport {
    /// Create a viewport centered at the given coordinates
    pub fn new(center: GeoPoint, zoom: f64, width: u32, height: u32) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
            cos_lat: center.lat.to_radians().cos(),
        }
    }

    /// Create a viewport that fits `bounds` inside the surface with
    /// `margin` pixels left free on every side
    pub fn fit(bounds: &GeoBounds, width: u32, height: u32, margin: u32) -> Self {
        let center = bounds.center();
        let cos_lat = center.lat.to_radians().cos();

        let usable_w = (width as f64 - 2.0 * margin as f64).max(1.0);
        let usable_h = (height as f64 - 2.0 * margin as f64).max(1.0);

        let span_x = bounds.lng_span() * cos_lat;
        let span_y = bounds.lat_span();

        let zoom_x = if span_x > 0.0 {
            usable_w / span_x
        } else {
            f64::INFINITY
        };
        let zoom_y = if span_y > 0.0 {
            usable_h / span_y
        } else {
            f64::INFINITY
        };

        let zoom = zoom_x.min(zoom_y);
        let zoom = if zoom.is_finite() { zoom } else { 1.0 };

        Self::new(center, zoom, width, height)
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Move the view so `center` is in the middle of the surface
    pub fn pan_to(&mut self, center: GeoPoint) {
        self.center = center;
        self.cos_lat = center.lat.to_radians().cos();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }
}

impl Projection for Viewport {
    fn project(&self, point: GeoPoint) -> ScreenPoint {
        let dx = (point.lng - self.center.lng) * self.cos_lat * self.zoom;
        let dy = (point.lat - self.center.lat) * self.zoom;

        let x = self.width as f64 / 2.0 + dx;
        let y = self.height as f64 / 2.0 - dy;

        ScreenPoint::new(x.round() as i64, y.round() as i64)
    }
}

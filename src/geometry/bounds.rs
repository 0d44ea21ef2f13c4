use super::GeoPoint;

/// Bounding box in geographic degrees
#[derive(Debug, Clone, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut bounds = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };
        bounds.expand(rest);

        Some(bounds)
    }

    /// Create bounds covering every ring
    pub fn from_rings<R: AsRef<[GeoPoint]>>(rings: &[R]) -> Option<Self> {
        let mut bounds: Option<Self> = None;
        for ring in rings {
            let ring = ring.as_ref();
            match bounds.as_mut() {
                Some(b) => b.expand(ring),
                None => bounds = Self::from_points(ring),
            }
        }
        bounds
    }

    /// Expand bounds to include another set of points
    pub fn expand(&mut self, points: &[GeoPoint]) {
        for p in points {
            self.min_lat = self.min_lat.min(p.lat);
            self.max_lat = self.max_lat.max(p.lat);
            self.min_lng = self.min_lng.min(p.lng);
            self.max_lng = self.max_lng.max(p.lng);
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

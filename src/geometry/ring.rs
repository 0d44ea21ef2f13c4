use super::{GeoPoint, Projection, ScreenPoint};

/// One ring of a polygon, holding its geographic points together with
/// their screen projection.
///
/// The screen points are either absent (not yet projected) or exactly as
/// many as the geographic points. Every structural edit drops the screen
/// points, so the two sides can never drift apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedRing {
    geo: Vec<GeoPoint>,
    local: Vec<ScreenPoint>,
}

impl ProjectedRing {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        let local = Vec::with_capacity(points.len());
        Self { geo: points, local }
    }

    pub fn geo(&self) -> &[GeoPoint] {
        &self.geo
    }

    /// Screen points, empty until the ring is projected
    pub fn local(&self) -> &[ScreenPoint] {
        &self.local
    }

    pub fn len(&self) -> usize {
        self.geo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geo.is_empty()
    }

    pub fn is_projected(&self) -> bool {
        self.local.len() == self.geo.len()
    }

    pub fn push(&mut self, point: GeoPoint) {
        self.geo.push(point);
        self.local.clear();
    }

    /// Insert a point before `index`. Caller checks `index <= len`.
    pub fn insert(&mut self, index: usize, point: GeoPoint) {
        self.geo.insert(index, point);
        self.local.clear();
    }

    /// Remove the point at `index`. Caller checks `index < len`.
    pub fn remove(&mut self, index: usize) -> GeoPoint {
        self.local.clear();
        self.geo.remove(index)
    }

    /// Move the point at `index`. Caller checks `index < len`.
    pub fn set(&mut self, index: usize, point: GeoPoint) {
        self.geo[index] = point;
        self.local.clear();
    }

    /// Store the projection of one point. The screen side is allocated on
    /// first use, with unset points at the origin until the projector
    /// reaches them. Caller checks `index < len`.
    pub fn set_local(&mut self, index: usize, point: ScreenPoint) {
        if self.local.len() != self.geo.len() {
            self.local.clear();
            self.local.resize(self.geo.len(), ScreenPoint::default());
        }
        self.local[index] = point;
    }

    /// Re-project every point
    pub fn project<P: Projection + ?Sized>(&mut self, projection: &P) {
        self.local.clear();
        self.local
            .extend(self.geo.iter().map(|&p| projection.project(p)));
    }

    pub fn clear(&mut self) {
        self.geo.clear();
        self.local.clear();
    }
}

impl AsRef<[GeoPoint]> for ProjectedRing {
    fn as_ref(&self) -> &[GeoPoint] {
        &self.geo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> ProjectedRing {
        ProjectedRing::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ])
    }

    fn flat(p: GeoPoint) -> ScreenPoint {
        ScreenPoint::new((p.lng * 10.0) as i64, (p.lat * 10.0) as i64)
    }

    #[test]
    fn test_new_ring_is_unprojected() {
        let r = ring();
        assert_eq!(r.len(), 3);
        assert!(r.local().is_empty());
        assert!(!r.is_projected());
    }

    #[test]
    fn test_project() {
        let mut r = ring();
        r.project(&flat);
        assert!(r.is_projected());
        assert_eq!(r.local()[2], ScreenPoint::new(10, 10));
    }

    #[test]
    fn test_structural_edit_drops_projection() {
        let mut r = ring();
        r.project(&flat);
        r.push(GeoPoint::new(1.0, 0.0));
        assert!(r.local().is_empty());

        r.project(&flat);
        r.remove(0);
        assert!(r.local().is_empty());
        assert_eq!(r.len(), 3);

        r.project(&flat);
        r.set(0, GeoPoint::new(5.0, 5.0));
        assert!(r.local().is_empty());
    }

    #[test]
    fn test_set_local_allocates() {
        let mut r = ring();
        r.set_local(1, ScreenPoint::new(7, 8));
        assert_eq!(r.local().len(), 3);
        assert_eq!(r.local()[1], ScreenPoint::new(7, 8));
        assert_eq!(r.local()[0], ScreenPoint::default());
    }
}

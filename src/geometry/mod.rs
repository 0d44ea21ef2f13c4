pub mod bounds;
pub mod containment;
pub mod point;
pub mod projection;
pub mod ring;

pub use bounds::GeoBounds;
pub use containment::{contains_point, is_inside_ring};
pub use point::{GeoPoint, ScreenPoint};
pub use projection::{Projection, Viewport};
pub use ring::ProjectedRing;

//! mappoly - Map overlay polygons with geographic containment, screen
//! projection and mouse hit testing

pub mod config;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod path;
pub mod persist;
pub mod polygon;
pub mod render;

pub use error::{PolygonError, Result};
pub use geometry::{GeoPoint, Projection, ScreenPoint, Viewport};
pub use overlay::{MouseEvent, Overlay, PolygonEvents};
pub use path::{Fill, PathBackend, ScreenPath, Stroke};
pub use persist::PolygonRecord;
pub use polygon::{MapPolygon, PolygonState, VisibilityChange};
pub use render::{RenderTarget, SvgTarget};

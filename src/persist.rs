//! Saved form of a polygon.
//!
//! Only the geographic data is kept: name, tag, rings and visibility.
//! Screen points and the path are projection artifacts and are rebuilt
//! after loading.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::Result;
use crate::geometry::GeoPoint;
use crate::polygon::MapPolygon;

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Value>,
    pub polygons: Vec<Vec<GeoPoint>>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl PolygonRecord {
    pub fn from_polygon(polygon: &MapPolygon) -> Self {
        Self {
            name: polygon.name.clone(),
            tag: polygon.tag.clone(),
            polygons: polygon.rings().map(<[GeoPoint]>::to_vec).collect(),
            visible: polygon.is_visible(),
        }
    }

    /// Rebuild the polygon. It comes back unprojected.
    pub fn into_polygon(self) -> Result<MapPolygon> {
        let mut polygon = MapPolygon::new(self.polygons, self.name)?;
        polygon.tag = self.tag;
        polygon.set_visible(self.visible);
        Ok(polygon)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

impl From<&MapPolygon> for PolygonRecord {
    fn from(polygon: &MapPolygon) -> Self {
        Self::from_polygon(polygon)
    }
}

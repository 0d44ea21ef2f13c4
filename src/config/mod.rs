use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::geometry::GeoPoint;
use crate::path::{Color, Fill, LineJoin, Stroke, style};

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}
fn default_margin() -> u32 {
    20
}
fn default_stroke_width() -> f32 {
    style::DEFAULT_STROKE_WIDTH
}
fn default_stroke_color() -> String {
    "#9b191970".to_string()
}
fn default_fill_color() -> String {
    "#9bf0f8ff".to_string()
}

/// Map view settings
#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Pixels per degree; fitted to the polygon when absent
    #[serde(default)]
    pub zoom: Option<f64>,
    /// View center; the polygon's center when absent
    #[serde(default)]
    pub center: Option<GeoPoint>,
    /// Free pixels around a fitted polygon
    #[serde(default = "default_margin")]
    pub margin: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            zoom: None,
            center: None,
            margin: default_margin(),
        }
    }
}

/// Drawing style, colors as `#rrggbb` or `#aarrggbb`
#[derive(Debug, Deserialize, Clone)]
pub struct StyleConfig {
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    #[serde(default)]
    pub line_join: LineJoin,
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_width: default_stroke_width(),
            stroke_color: default_stroke_color(),
            line_join: LineJoin::default(),
            fill_color: default_fill_color(),
        }
    }
}

impl StyleConfig {
    /// Build the pen, falling back to the default color when unparsable
    pub fn stroke(&self) -> Stroke {
        let fallback = Stroke::default();
        Stroke {
            width: self.stroke_width,
            line_join: self.line_join,
            color: parse_color(&self.stroke_color, fallback.color),
        }
    }

    pub fn fill(&self) -> Fill {
        Fill {
            color: parse_color(&self.fill_color, Fill::default().color),
        }
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_hex(value).unwrap_or_else(|| {
        log::warn!("Invalid color '{}', using {}", value, fallback.to_hex());
        fallback
    })
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FileConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub svg: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

impl FileConfig {
    /// Read a specific config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Search the usual locations, returning the first config that parses
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => {
                    log::debug!("Loaded config from {:?}", path);
                    return Some(config);
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("mappoly.toml"));
    paths.push(PathBuf::from(".mappoly.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("mappoly").join("config.toml"));
        paths.push(config_dir.join("mappoly.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".mappoly.toml"));
        paths.push(home.join(".config").join("mappoly").join("config.toml"));
    }

    paths
}

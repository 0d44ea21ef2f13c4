use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;

use mappoly::config::FileConfig;
use mappoly::geometry::GeoBounds;
use mappoly::{GeoPoint, MouseEvent, Overlay, PolygonRecord, ScreenPoint, SvgTarget, Viewport};

/// Test points against a map polygon and render it
///
/// Examples:
///   # Which points fall inside the polygon (holes respected)
///   mappoly -i lake.json -p 47.61,-122.33 -p 47.60,-122.30
///
///   # Render to SVG fitted into a 1024x768 view
///   mappoly -i lake.json --svg lake.svg --width 1024 --height 768
///
///   # Hit-test screen pixels against the rendered shape
///   mappoly -i lake.json --hit 512,384 --hit 10,10
#[derive(Parser, Debug)]
#[command(name = "mappoly")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches mappoly.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Polygon JSON file (name, polygons, optional tag and visible)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Geographic point to test, as LAT,LON (repeatable)
    #[arg(short = 'p', long = "point", value_parser = parse_geo, allow_hyphen_values = true)]
    points: Vec<GeoPoint>,

    /// Screen pixel to hit-test, as X,Y (repeatable)
    #[arg(long = "hit", value_parser = parse_screen, allow_hyphen_values = true)]
    hits: Vec<ScreenPoint>,

    /// Write the rendered polygon to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// View width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// View height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Pixels per degree of latitude (fitted to the polygon if omitted)
    #[arg(long)]
    zoom: Option<f64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn parse_pair(s: &str) -> std::result::Result<(&str, &str), String> {
    s.split_once(',')
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| format!("expected two comma-separated values, got '{s}'"))
}

fn parse_geo(s: &str) -> std::result::Result<GeoPoint, String> {
    let (lat, lon) = parse_pair(s)?;
    let lat: f64 = lat.parse().map_err(|e| format!("bad latitude '{lat}': {e}"))?;
    let lon: f64 = lon.parse().map_err(|e| format!("bad longitude '{lon}': {e}"))?;
    Ok(GeoPoint::new(lat, lon))
}

fn parse_screen(s: &str) -> std::result::Result<ScreenPoint, String> {
    let (x, y) = parse_pair(s)?;
    let x: i64 = x.parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: i64 = y.parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(ScreenPoint::new(x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = match args.config {
        Some(ref path) => {
            if !path.exists() {
                bail!("Config file not found: {:?}", path);
            }
            FileConfig::from_file(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?
        }
        None => FileConfig::load().unwrap_or_default(),
    };

    let verbose = args.verbose || file_config.verbose;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .init();

    let input = args
        .input
        .clone()
        .or_else(|| file_config.input.clone())
        .context("No input polygon: pass --input or set `input` in the config file")?;
    let svg_path = args.svg.clone().or_else(|| file_config.svg.clone());

    let record = PolygonRecord::load(&input)
        .with_context(|| format!("Failed to load polygon from {}", input.display()))?;
    let polygon = record
        .into_polygon()
        .context("Polygon file does not describe a valid polygon")?
        .with_style(file_config.style.stroke(), file_config.style.fill());

    log::info!(
        "Loaded polygon '{}' with {} rings",
        polygon.name,
        polygon.ring_count()
    );

    for point in &args.points {
        let inside = polygon.contains(*point);
        println!(
            "({:.6}, {:.6}) {}",
            point.lat,
            point.lng,
            if inside { "inside" } else { "outside" }
        );
    }

    if args.hits.is_empty() && svg_path.is_none() {
        return Ok(());
    }

    let view = build_view(&args, &file_config, &polygon)?;
    log::debug!(
        "View: center ({:.5}, {:.5}), zoom {:.2} px/deg",
        view.center().lat,
        view.center().lng,
        view.zoom()
    );

    let mut overlay = Overlay::new("cli");
    overlay.set_view(view);
    let index = overlay.add(polygon);
    if let Some(p) = overlay.polygon_mut(index) {
        p.set_hit_test_visible(true);
    }

    for &hit in &args.hits {
        let hits = overlay.mouse_click(&MouseEvent::click(hit.x, hit.y), &mut ());
        println!(
            "[{}, {}] {}",
            hit.x,
            hit.y,
            if hits > 0 { "hit" } else { "miss" }
        );
    }

    if let Some(path) = svg_path {
        let (width, height) = overlay.view().map(Viewport::size).unwrap_or((0, 0));
        let mut target = SvgTarget::new(width, height);
        overlay.render(&mut target);
        target
            .save(&path)
            .with_context(|| format!("Failed to write SVG file: {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn build_view(
    args: &Args,
    config: &FileConfig,
    polygon: &mappoly::MapPolygon,
) -> Result<Viewport> {
    let width = args.width.unwrap_or(config.view.width);
    let height = args.height.unwrap_or(config.view.height);
    if width == 0 || height == 0 {
        bail!("View size must be non-zero, got {}x{}", width, height);
    }

    let bounds: GeoBounds = polygon
        .bounds()
        .context("Polygon has no points to frame")?;

    let mut view = Viewport::fit(&bounds, width, height, config.view.margin);
    if let Some(center) = config.view.center {
        view.pan_to(center);
    }
    if let Some(zoom) = args.zoom.or(config.view.zoom) {
        view.set_zoom(zoom);
    }
    Ok(view)
}

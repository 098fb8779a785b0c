use crate::core::scoring::{ScoredStation, StationScorer};
use crate::domain::model::Station;

/// Cap on how many stations a viewport query returns.
pub const MAX_VISIBLE_STATIONS: usize = 20_000;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two WGS84 points, in kilometres.
pub fn haversine_km(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let d_lat = (lat_b - lat_a).to_radians();
    let d_lon = (lon_b - lon_a).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat_a.to_radians().cos() * lat_b.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Axis-aligned geographic box, degrees WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Box spanning `radius_km` in every direction from a center point.
    pub fn around(lat: f64, lon: f64, radius_km: f64) -> Self {
        let lat_delta = radius_km / 111.0;
        // Longitude degrees shrink with latitude.
        let lon_delta = radius_km / (111.0 * lat.to_radians().cos().abs().max(0.01));
        Self {
            north: lat + lat_delta,
            south: lat - lat_delta,
            east: lon + lon_delta,
            west: lon - lon_delta,
        }
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat <= self.north && lat >= self.south && lon <= self.east && lon >= self.west
    }
}

/// Keeps the stations inside the box, ranked by relevance, capped at
/// `limit`. Stations without parseable coordinates are skipped.
pub fn select_in_viewport(
    stations: &[Station],
    viewport: &BoundingBox,
    scorer: &StationScorer,
    limit: usize,
) -> Vec<ScoredStation> {
    let in_view: Vec<Station> = stations
        .iter()
        .filter(|station| {
            station
                .coordinates()
                .is_some_and(|(lat, lon)| viewport.contains(lat, lon))
        })
        .cloned()
        .collect();

    let mut ranked = scorer.rank(&in_view);
    ranked.truncate(limit);
    if let (Some(best), Some(worst)) = (ranked.first(), ranked.last()) {
        tracing::debug!(
            "Viewport scores - best: {:.2}, worst kept: {:.2}",
            best.score,
            worst.score
        );
    }
    tracing::debug!(
        "Selected {} of {} stations in viewport",
        ranked.len(),
        in_view.len()
    );
    ranked
}

/// Marker size tier for a map-like rendering, chosen from how crowded the
/// view is. The thresholds loosen when zoomed in past level 14.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSize {
    Normal,
    Small,
    Tiny,
}

impl MarkerSize {
    pub fn for_density(stations_in_view: usize, zoom: f64) -> Self {
        let (high, very_high) = if zoom > 14.0 { (15, 40) } else { (25, 80) };

        if stations_in_view > very_high {
            MarkerSize::Tiny
        } else if stations_in_view > high {
            MarkerSize::Small
        } else {
            MarkerSize::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarkerSize::Normal => "normal",
            MarkerSize::Small => "small",
            MarkerSize::Tiny => "tiny",
        }
    }
}

impl std::fmt::Display for MarkerSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

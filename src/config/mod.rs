pub mod cli;
pub mod toml_config;

use crate::core::cache::DEFAULT_TTL_MINUTES;
use crate::core::client::BASE_URL;
use crate::core::filter::StationFilter;
use crate::core::scoring::ScoreWeights;
use crate::domain::model::FuelType;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use toml_config::TomlConfig;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Parser)]
#[command(name = "geogas")]
#[command(about = "Spanish fuel price lookup over the ministry's open data service")]
pub struct CliConfig {
    /// Path to a geogas.toml settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the snapshot cache and favorites.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Ignore the cached snapshot and fetch fresh data.
    #[arg(long, global = true)]
    pub refresh: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Download the current snapshot and refresh the local cache.
    Fetch,

    /// List stations matching the given filters.
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Order by relevance score instead of input order.
        #[arg(long)]
        rank: bool,

        /// Maximum number of stations to print.
        #[arg(long, default_value = "25")]
        limit: usize,
    },

    /// Best-scored stations inside a bounding box.
    Top {
        #[arg(long, allow_hyphen_values = true)]
        north: f64,
        #[arg(long, allow_hyphen_values = true)]
        south: f64,
        #[arg(long, allow_hyphen_values = true)]
        east: f64,
        #[arg(long, allow_hyphen_values = true)]
        west: f64,

        /// Map zoom level, used for the marker density tier.
        #[arg(long, default_value = "12")]
        zoom: f64,

        #[arg(long, default_value = "25")]
        limit: usize,
    },

    /// Stations within a radius of a point, nearest first.
    Near {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Search radius in kilometres.
        #[arg(long, default_value = "10")]
        radius: f64,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Manage the favorite station set.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// List every province present in the snapshot.
    Provinces,

    /// List municipalities, optionally within one province.
    Municipalities {
        #[arg(long)]
        province: Option<String>,
    },

    /// List every brand sign present in the snapshot.
    Brands,

    /// Write the filtered station list to a file.
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path.
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum FavoritesAction {
    /// Flip a station's favorite state.
    Toggle { station_id: String },
    /// Print all favorite station ids.
    List,
    /// Remove every favorite.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Filter flags shared by `list` and `export`.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Exact province name.
    #[arg(long)]
    pub province: Option<String>,

    /// Exact municipality name.
    #[arg(long)]
    pub municipality: Option<String>,

    /// Brand sign prefix, case-insensitive.
    #[arg(long)]
    pub brand: Option<String>,

    /// Fuels the station must sell (repeatable).
    #[arg(long = "fuel", value_enum)]
    pub fuels: Vec<FuelType>,

    /// Only stations open round the clock.
    #[arg(long)]
    pub open_24h: bool,

    /// Only favorite stations.
    #[arg(long)]
    pub favorites: bool,

    /// Price cap for gasoline 95 E5, euros per litre.
    #[arg(long)]
    pub max_price_gasoline_95: Option<f64>,

    /// Price cap for diesel A, euros per litre.
    #[arg(long)]
    pub max_price_diesel: Option<f64>,
}

impl FilterArgs {
    pub fn into_filter(self) -> StationFilter {
        StationFilter {
            province: self.province,
            municipality: self.municipality,
            brand: self.brand,
            fuels: self.fuels,
            open_24h: self.open_24h,
            favorites_only: self.favorites,
            max_price_gasoline_95: self.max_price_gasoline_95,
            max_price_diesel: self.max_price_diesel,
        }
    }
}

/// Effective settings after merging CLI flags, the optional TOML file, and
/// built-in defaults. CLI wins over file, file wins over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_endpoint: String,
    pub timeout_seconds: u64,
    pub cache_ttl_minutes: i64,
    pub data_dir: PathBuf,
    pub weights: ScoreWeights,
}

impl Settings {
    pub fn resolve(cli: &CliConfig, file: &TomlConfig) -> Self {
        let api = file.api.clone().unwrap_or_default();
        let cache = file.cache.clone().unwrap_or_default();
        let scoring = file.scoring.clone().unwrap_or_default();

        let defaults = ScoreWeights::default();
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| cache.data_dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        Self {
            api_endpoint: api.endpoint.unwrap_or_else(|| BASE_URL.to_string()),
            timeout_seconds: api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            cache_ttl_minutes: cache.ttl_minutes.unwrap_or(DEFAULT_TTL_MINUTES),
            data_dir,
            weights: ScoreWeights {
                price: scoring.price_weight.unwrap_or(defaults.price),
                variety: scoring.variety_weight.unwrap_or(defaults.variety),
                favorite: scoring.favorite_weight.unwrap_or(defaults.favorite),
            },
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("geogas"))
        .unwrap_or_else(|| PathBuf::from("./.geogas"))
}

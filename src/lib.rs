pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig, Command, ExportFormat, FavoritesAction, Settings};
pub use core::{
    cache::SnapshotCache, client::MitecoClient, favorites::FavoritesStore, filter::StationFilter,
    scoring::StationScorer,
};
pub use domain::model::{FuelType, PriceSnapshot, Station};
pub use utils::error::{GeoGasError, Result};

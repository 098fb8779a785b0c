use anyhow::Context;
use clap::Parser;
use geogas::config::toml_config::TomlConfig;
use geogas::core::scoring::ScoredStation;
use geogas::core::viewport::{
    haversine_km, select_in_viewport, BoundingBox, MarkerSize, MAX_VISIBLE_STATIONS,
};
use geogas::core::{catalog, export};
use geogas::utils::logger;
use geogas::{
    CliConfig, Command, ExportFormat, FavoritesAction, FavoritesStore, FuelType, LocalStorage,
    MitecoClient, PriceSnapshot, Settings, SnapshotCache, Station, StationScorer,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting geogas CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

struct App {
    settings: Settings,
    client: MitecoClient,
    cache: SnapshotCache<LocalStorage>,
    favorites: FavoritesStore<LocalStorage>,
    refresh: bool,
}

impl App {
    fn new(cli: &CliConfig) -> anyhow::Result<Self> {
        let file = TomlConfig::load_if_present(cli.config.as_deref())
            .context("loading configuration file")?;
        let settings = Settings::resolve(cli, &file);
        tracing::debug!("Resolved settings: {:?}", settings);

        let data_dir = settings.data_dir.to_string_lossy().into_owned();
        let client = MitecoClient::new(settings.api_endpoint.clone(), settings.timeout_seconds)
            .context("building HTTP client")?;
        let cache = SnapshotCache::new(
            LocalStorage::new(data_dir.clone()),
            settings.cache_ttl_minutes,
        );
        let favorites = FavoritesStore::new(LocalStorage::new(data_dir));

        Ok(Self {
            settings,
            client,
            cache,
            favorites,
            refresh: cli.refresh,
        })
    }

    async fn snapshot(&self) -> anyhow::Result<PriceSnapshot> {
        self.cache
            .load_or_fetch(&self.client, self.refresh)
            .await
            .context("loading station snapshot")
    }

    async fn scorer(&self) -> StationScorer {
        StationScorer::new(self.settings.weights, self.favorites.all().await)
    }
}

async fn run(cli: CliConfig) -> anyhow::Result<()> {
    let app = App::new(&cli)?;

    match cli.command.clone() {
        Command::Fetch => {
            let snapshot = app
                .cache
                .load_or_fetch(&app.client, true)
                .await
                .context("fetching station snapshot")?;
            match snapshot.published_at() {
                Some(published) => println!(
                    "✅ Cached {} stations (published {})",
                    snapshot.stations.len(),
                    published
                ),
                None => println!("✅ Cached {} stations", snapshot.stations.len()),
            }
        }

        Command::List {
            filters,
            rank,
            limit,
        } => {
            let snapshot = app.snapshot().await?;
            let favorites = app.favorites.all().await;
            let filter = filters.into_filter();
            let matched = filter.apply(&snapshot.stations, &favorites);
            tracing::info!(
                "{} of {} stations match",
                matched.len(),
                snapshot.stations.len()
            );

            if rank {
                let ranked = app.scorer().await.rank(&matched);
                for entry in ranked.iter().take(limit) {
                    print_scored(entry);
                }
            } else {
                for station in matched.iter().take(limit) {
                    print_station(station);
                }
            }
            println!("({} matching, showing up to {})", matched.len(), limit);
        }

        Command::Top {
            north,
            south,
            east,
            west,
            zoom,
            limit,
        } => {
            let snapshot = app.snapshot().await?;
            let viewport = BoundingBox::new(north, south, east, west);
            let scorer = app.scorer().await;
            let selected = select_in_viewport(
                &snapshot.stations,
                &viewport,
                &scorer,
                limit.min(MAX_VISIBLE_STATIONS),
            );

            let marker = MarkerSize::for_density(selected.len(), zoom);
            println!("{} stations in view, marker size: {}", selected.len(), marker);
            for entry in &selected {
                print_scored(entry);
            }
        }

        Command::Near {
            lat,
            lon,
            radius,
            limit,
        } => {
            let snapshot = app.snapshot().await?;
            let mut nearby: Vec<(f64, Station)> = snapshot
                .stations
                .iter()
                .filter_map(|station| {
                    let (s_lat, s_lon) = station.coordinates()?;
                    let km = haversine_km(lat, lon, s_lat, s_lon);
                    (km <= radius).then(|| (km, station.clone()))
                })
                .collect();
            nearby.sort_by(|a, b| a.0.total_cmp(&b.0));

            println!(
                "{} stations within {:.1} km of ({}, {})",
                nearby.len(),
                radius,
                lat,
                lon
            );
            for (km, station) in nearby.iter().take(limit) {
                println!("{:>7.2} km  {}", km, station_line(station));
            }
        }

        Command::Favorites { action } => match action {
            FavoritesAction::Toggle { station_id } => {
                let now_favorite = app
                    .favorites
                    .toggle(&station_id)
                    .await
                    .context("updating favorites")?;
                if now_favorite {
                    println!("⭐ {} added to favorites", station_id);
                } else {
                    println!("{} removed from favorites", station_id);
                }
            }
            FavoritesAction::List => {
                let mut ids: Vec<String> = app.favorites.all().await.into_iter().collect();
                ids.sort();
                if ids.is_empty() {
                    println!("No favorites yet");
                }
                for id in ids {
                    println!("{}", id);
                }
            }
            FavoritesAction::Clear => {
                app.favorites.clear().await.context("clearing favorites")?;
                println!("Favorites cleared");
            }
        },

        Command::Provinces => {
            let snapshot = app.snapshot().await?;
            for province in catalog::provinces(&snapshot.stations) {
                println!("{}", province);
            }
        }

        Command::Municipalities { province } => {
            let snapshot = app.snapshot().await?;
            for municipality in catalog::municipalities(&snapshot.stations, province.as_deref()) {
                println!("{}", municipality);
            }
        }

        Command::Brands => {
            let snapshot = app.snapshot().await?;
            for brand in catalog::brands(&snapshot.stations) {
                println!("{}", brand);
            }
        }

        Command::Export {
            filters,
            format,
            output,
        } => {
            let snapshot = app.snapshot().await?;
            let favorites = app.favorites.all().await;
            let matched = filters.into_filter().apply(&snapshot.stations, &favorites);

            let content = match format {
                ExportFormat::Csv => export::to_csv(&matched).context("rendering CSV")?,
                ExportFormat::Json => export::to_json(&matched).context("rendering JSON")?,
            };
            std::fs::write(&output, content)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("✅ Exported {} stations to {}", matched.len(), output.display());
        }
    }

    Ok(())
}

fn station_line(station: &Station) -> String {
    let mut prices = Vec::new();
    for fuel in [
        FuelType::Gasoline95E5,
        FuelType::Gasoline98E5,
        FuelType::DieselA,
        FuelType::Lpg,
    ] {
        if let Some(price) = station.price(fuel) {
            prices.push(format!("{} {:.3}", fuel.label(), price));
        }
    }

    format!(
        "{:<6} {:<20} {:<22} {:<18} {}",
        station.id,
        truncated(&station.brand, 20),
        truncated(&station.municipality, 22),
        truncated(&station.schedule, 18),
        prices.join("  ")
    )
}

fn print_station(station: &Station) {
    println!("{}", station_line(station));
}

fn print_scored(entry: &ScoredStation) {
    println!("[{:.2}] {}", entry.score, station_line(&entry.station));
}

fn truncated(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

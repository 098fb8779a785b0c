use geogas::core::client::STATIONS_ENDPOINT;
use geogas::core::export;
use geogas::{
    FavoritesStore, FuelType, LocalStorage, MitecoClient, SnapshotCache, StationFilter,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn ministry_payload() -> serde_json::Value {
    serde_json::json!({
        "Fecha": "21/08/2026 08:00:00",
        "ListaEESSPrecio": [
            {
                "IDEESS": "1001",
                "Rótulo": "REPSOL",
                "Provincia": "MADRID",
                "Municipio": "Alcobendas",
                "Horario": "L-D: 24H",
                "Precio Gasolina 95 E5": "1,42",
                "Precio Gasoleo A": "1,35"
            },
            {
                "IDEESS": "1002",
                "Rótulo": "CEPSA",
                "Provincia": "MADRID",
                "Municipio": "Getafe",
                "Horario": "L-V: 8:00-20:00",
                "Precio Gasolina 95 E5": "1,58"
            },
            {
                "IDEESS": "1003",
                "Rótulo": "GALP",
                "Provincia": "BARCELONA",
                "Municipio": "Badalona",
                "Horario": "L-D: 24H",
                "Precio Gasolina 95 E5": "1,44"
            }
        ],
        "ResultadoConsulta": "OK"
    })
}

#[tokio::test]
async fn test_fetch_filter_export_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/{}", STATIONS_ENDPOINT));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(ministry_payload());
    });

    let client = MitecoClient::new(server.url("/"), 5).unwrap();
    let cache = SnapshotCache::new(LocalStorage::new(data_dir.clone()), 30);

    // First call hits the API, second one is served from disk.
    let snapshot = cache.load_or_fetch(&client, false).await.unwrap();
    assert_eq!(snapshot.stations.len(), 3);
    let cached = cache.load_or_fetch(&client, false).await.unwrap();
    assert_eq!(cached.stations.len(), 3);
    api_mock.assert_hits(1);

    // Madrid stations open round the clock under 1.50 EUR/l.
    let favorites = FavoritesStore::new(LocalStorage::new(data_dir));
    let filter = StationFilter {
        province: Some("MADRID".to_string()),
        open_24h: true,
        max_price_gasoline_95: Some(1.50),
        ..Default::default()
    };
    let matched = filter.apply(&snapshot.stations, &favorites.all().await);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "1001");

    let csv = export::to_csv(&matched).unwrap();
    let lines: Vec<&str> = csv.trim_end().split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("REPSOL"));
    assert!(lines[1].contains("1.420"));
}

#[tokio::test]
async fn test_favorites_feed_filter_and_scoring() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(format!("/{}", STATIONS_ENDPOINT));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(ministry_payload());
    });

    let client = MitecoClient::new(server.url("/"), 5).unwrap();
    let cache = SnapshotCache::new(LocalStorage::new(data_dir.clone()), 30);
    let snapshot = cache.load_or_fetch(&client, false).await.unwrap();

    let favorites = FavoritesStore::new(LocalStorage::new(data_dir));
    favorites.toggle("1002").await.unwrap();

    let filter = StationFilter {
        favorites_only: true,
        ..Default::default()
    };
    let matched = filter.apply(&snapshot.stations, &favorites.all().await);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "1002");
    assert!(matched[0].has_price(FuelType::Gasoline95E5));

    // The favorite outranks the otherwise cheaper stations.
    let scorer = geogas::StationScorer::new(Default::default(), favorites.all().await);
    let ranked = scorer.rank(&snapshot.stations);
    assert_eq!(ranked[0].station.id, "1002");
}

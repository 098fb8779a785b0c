use geogas::core::client::STATIONS_ENDPOINT;
use geogas::domain::ports::PriceSource;
use geogas::{FuelType, MitecoClient};
use httpmock::prelude::*;

fn client_for(server: &MockServer) -> MitecoClient {
    MitecoClient::new(server.url("/"), 5).unwrap()
}

#[tokio::test]
async fn test_fetch_snapshot_ministry_envelope() {
    let server = MockServer::start();
    let payload = serde_json::json!({
        "Fecha": "21/08/2026 08:00:00",
        "ListaEESSPrecio": [
            {
                "IDEESS": "4375",
                "Rótulo": "REPSOL",
                "Provincia": "MADRID",
                "Municipio": "Alcobendas",
                "Latitud": "40,547000",
                "Longitud (WGS84)": "-3,642000",
                "Horario": "L-D: 24H",
                "Precio Gasolina 95 E5": "1,459",
                "Precio Gasoleo A": "1,359"
            },
            {
                "IDEESS": "5120",
                "Rótulo": "CEPSA",
                "Provincia": "BARCELONA"
            }
        ],
        "ResultadoConsulta": "OK"
    });

    let api_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/{}", STATIONS_ENDPOINT));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(payload);
    });

    let snapshot = client_for(&server).fetch_snapshot().await.unwrap();

    api_mock.assert();
    assert_eq!(snapshot.stations.len(), 2);
    assert_eq!(snapshot.result, "OK");
    assert!(snapshot.published_at().is_some());

    let repsol = &snapshot.stations[0];
    assert_eq!(repsol.brand, "REPSOL");
    assert_eq!(repsol.price(FuelType::Gasoline95E5), Some(1.459));
    assert_eq!(repsol.coordinates(), Some((40.547, -3.642)));

    let cepsa = &snapshot.stations[1];
    assert!(!cepsa.has_price(FuelType::Gasoline95E5));
}

#[tokio::test]
async fn test_fetch_snapshot_bare_array() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/{}", STATIONS_ENDPOINT));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"IDEESS": "1", "Rótulo": "REPSOL"},
                {"IDEESS": "2", "Rótulo": "CEPSA"}
            ]));
    });

    let snapshot = client_for(&server).fetch_snapshot().await.unwrap();

    api_mock.assert();
    assert_eq!(snapshot.stations.len(), 2);
    assert!(snapshot.date.is_empty());
}

#[tokio::test]
async fn test_fetch_snapshot_server_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/{}", STATIONS_ENDPOINT));
        then.status(500);
    });

    let result = client_for(&server).fetch_snapshot().await;

    api_mock.assert();
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("500"), "unexpected error: {}", message);
}

#[tokio::test]
async fn test_fetch_snapshot_non_json_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(format!("/{}", STATIONS_ENDPOINT));
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>maintenance</html>");
    });

    let result = client_for(&server).fetch_snapshot().await;
    assert!(result.is_err());
}

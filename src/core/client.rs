use crate::domain::model::{PriceSnapshot, Station};
use crate::domain::ports::PriceSource;
use crate::utils::error::{GeoGasError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Base URL of the ministry's fuel price REST services.
pub const BASE_URL: &str =
    "https://sedeaplicaciones.minetur.gob.es/ServiciosRESTCarburantes/PreciosCarburantes/";

/// Endpoint listing every land-based service station.
pub const STATIONS_ENDPOINT: &str = "EstacionesTerrestres/";

/// Object keys the station list has been observed under, in lookup order.
const LIST_FIELD_NAMES: [&str; 6] = [
    "ListaEESSPrecio",
    "listaEESSPrecio",
    "data",
    "result",
    "estaciones",
    "gasolineras",
];

pub struct MitecoClient {
    client: Client,
    base_url: String,
}

impl MitecoClient {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Turns the raw payload into a snapshot.
    ///
    /// The service normally answers with an object carrying `ListaEESSPrecio`,
    /// but a bare array has also been seen, so both shapes are accepted.
    fn parse_payload(payload: serde_json::Value) -> Result<PriceSnapshot> {
        match payload {
            serde_json::Value::Array(_) => {
                let stations: Vec<Station> = serde_json::from_value(payload)?;
                Ok(PriceSnapshot::from_stations(stations))
            }
            serde_json::Value::Object(ref map) => {
                let snapshot: PriceSnapshot = serde_json::from_value(payload.clone())?;
                if !snapshot.stations.is_empty() {
                    return Ok(snapshot);
                }

                // Empty list under the canonical key: look for the array
                // under the alternative names before giving up.
                for field in LIST_FIELD_NAMES {
                    if let Some(value) = map.get(field) {
                        if value.is_array() {
                            let stations: Vec<Station> =
                                serde_json::from_value(value.clone())?;
                            if !stations.is_empty() {
                                let mut found = snapshot.clone();
                                found.stations = stations;
                                return Ok(found);
                            }
                        }
                    }
                }

                Ok(snapshot)
            }
            other => Err(GeoGasError::UnexpectedResponse {
                message: format!("expected JSON array or object, got {}", other),
            }),
        }
    }
}

#[async_trait]
impl PriceSource for MitecoClient {
    async fn fetch_snapshot(&self) -> Result<PriceSnapshot> {
        let url = format!("{}{}", self.base_url, STATIONS_ENDPOINT);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(GeoGasError::UnexpectedResponse {
                message: format!("server answered with status {}", response.status()),
            });
        }

        let payload: serde_json::Value = response.json().await?;
        let snapshot = Self::parse_payload(payload)?;
        tracing::debug!("Parsed {} stations", snapshot.stations.len());
        Ok(snapshot)
    }
}

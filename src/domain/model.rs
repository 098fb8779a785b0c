use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Timestamp format the ministry uses in the `Fecha` field.
const SNAPSHOT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Parses a ministry decimal string (`"1,459"`) into a float.
///
/// The API reports every number as a string with a comma as the decimal
/// separator and an empty string when the value is absent.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', ".").parse::<f64>().ok()
}

/// Fuel products reported by the ministry, one per price column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum FuelType {
    Gasoline95E5,
    Gasoline95E10,
    Gasoline98E5,
    Gasoline98E10,
    DieselA,
    DieselB,
    DieselC,
    DieselPremium,
    Lpg,
    Cng,
    Lng,
    Hydrogen,
    Biodiesel,
    Bioethanol,
}

impl FuelType {
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Gasoline95E5 => "Gasolina 95 E5",
            FuelType::Gasoline95E10 => "Gasolina 95 E10",
            FuelType::Gasoline98E5 => "Gasolina 98 E5",
            FuelType::Gasoline98E10 => "Gasolina 98 E10",
            FuelType::DieselA => "Gasóleo A",
            FuelType::DieselB => "Gasóleo B",
            FuelType::DieselC => "Gasóleo C",
            FuelType::DieselPremium => "Gasóleo Premium",
            FuelType::Lpg => "GLP",
            FuelType::Cng => "GNC",
            FuelType::Lng => "GNL",
            FuelType::Hydrogen => "Hidrógeno",
            FuelType::Biodiesel => "Biodiésel",
            FuelType::Bioethanol => "Bioetanol",
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One service station as reported by the `EstacionesTerrestres/` endpoint.
///
/// Field names mirror the API payload exactly, accents included. Everything
/// arrives as a string; prices and coordinates use comma decimals and an
/// empty string marks an absent value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(rename = "IDEESS", default)]
    pub id: String,

    #[serde(rename = "Rótulo", default)]
    pub brand: String,

    #[serde(rename = "C.P.", default)]
    pub postal_code: String,

    #[serde(rename = "Dirección", default)]
    pub address: String,

    #[serde(rename = "Localidad", default)]
    pub locality: String,

    #[serde(rename = "Municipio", default)]
    pub municipality: String,

    #[serde(rename = "Provincia", default)]
    pub province: String,

    #[serde(rename = "Latitud", default)]
    pub latitude: String,

    #[serde(rename = "Longitud (WGS84)", default)]
    pub longitude: String,

    #[serde(rename = "Horario", default)]
    pub schedule: String,

    /// "P" = public, "R" = restricted.
    #[serde(rename = "Tipo Venta", default)]
    pub sale_type: String,

    #[serde(rename = "Remisión", default)]
    pub remission: String,

    /// "I" = integrated, "D" = independent.
    #[serde(rename = "Margen", default)]
    pub margin: String,

    #[serde(rename = "Precio Gasolina 95 E5", default)]
    pub price_gasoline_95_e5: String,

    #[serde(rename = "Precio Gasolina 95 E10", default)]
    pub price_gasoline_95_e10: String,

    #[serde(rename = "Precio Gasolina 98 E5", default)]
    pub price_gasoline_98_e5: String,

    #[serde(rename = "Precio Gasolina 98 E10", default)]
    pub price_gasoline_98_e10: String,

    #[serde(rename = "Precio Gasoleo A", default)]
    pub price_diesel_a: String,

    #[serde(rename = "Precio Gasoleo B", default)]
    pub price_diesel_b: String,

    #[serde(rename = "Precio Gasoleo C", default)]
    pub price_diesel_c: String,

    #[serde(rename = "Precio Gasoleo Premium", default)]
    pub price_diesel_premium: String,

    #[serde(rename = "Precio Gases licuados del petróleo", default)]
    pub price_lpg: String,

    #[serde(rename = "Precio Gas Natural Comprimido", default)]
    pub price_cng: String,

    #[serde(rename = "Precio Gas Natural Licuado", default)]
    pub price_lng: String,

    #[serde(rename = "Precio Hidrogeno", default)]
    pub price_hydrogen: String,

    #[serde(rename = "Precio Biodiesel", default)]
    pub price_biodiesel: String,

    #[serde(rename = "Precio Bioetanol", default)]
    pub price_bioethanol: String,
}

impl Station {
    /// Raw price string for a fuel, exactly as the API sent it.
    pub fn raw_price(&self, fuel: FuelType) -> &str {
        match fuel {
            FuelType::Gasoline95E5 => &self.price_gasoline_95_e5,
            FuelType::Gasoline95E10 => &self.price_gasoline_95_e10,
            FuelType::Gasoline98E5 => &self.price_gasoline_98_e5,
            FuelType::Gasoline98E10 => &self.price_gasoline_98_e10,
            FuelType::DieselA => &self.price_diesel_a,
            FuelType::DieselB => &self.price_diesel_b,
            FuelType::DieselC => &self.price_diesel_c,
            FuelType::DieselPremium => &self.price_diesel_premium,
            FuelType::Lpg => &self.price_lpg,
            FuelType::Cng => &self.price_cng,
            FuelType::Lng => &self.price_lng,
            FuelType::Hydrogen => &self.price_hydrogen,
            FuelType::Biodiesel => &self.price_biodiesel,
            FuelType::Bioethanol => &self.price_bioethanol,
        }
    }

    /// Parsed price in euros, `None` when absent or unparseable.
    pub fn price(&self, fuel: FuelType) -> Option<f64> {
        parse_decimal(self.raw_price(fuel))
    }

    /// Whether the station sells a fuel at all.
    pub fn has_price(&self, fuel: FuelType) -> bool {
        !self.raw_price(fuel).trim().is_empty()
    }

    /// WGS84 coordinates as `(latitude, longitude)`, when both parse.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = parse_decimal(&self.latitude)?;
        let lon = parse_decimal(&self.longitude)?;
        Some((lat, lon))
    }
}

/// Envelope the ministry wraps the station list in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSnapshot {
    #[serde(rename = "Fecha", default)]
    pub date: String,

    #[serde(rename = "ListaEESSPrecio", default)]
    pub stations: Vec<Station>,

    #[serde(rename = "ResultadoConsulta", default)]
    pub result: String,

    #[serde(rename = "Nota", default)]
    pub note: String,
}

impl PriceSnapshot {
    pub fn from_stations(stations: Vec<Station>) -> Self {
        Self {
            stations,
            ..Default::default()
        }
    }

    /// Publication time parsed from the `Fecha` field (`dd/MM/yyyy HH:mm:ss`).
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.date.trim(), SNAPSHOT_DATE_FORMAT).ok()
    }
}

use crate::domain::model::{FuelType, Station};
use crate::utils::error::Result;

const CSV_HEADER: [&str; 12] = [
    "id",
    "brand",
    "province",
    "municipality",
    "address",
    "latitude",
    "longitude",
    "schedule",
    "gasoline_95_e5",
    "gasoline_98_e5",
    "diesel_a",
    "lpg",
];

/// Renders stations as CSV with dot-decimal prices, empty cells for
/// missing values.
pub fn to_csv(stations: &[Station]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for station in stations {
        let (lat, lon) = station
            .coordinates()
            .map(|(lat, lon)| (lat.to_string(), lon.to_string()))
            .unwrap_or_default();
        let g95 = format_price(station, FuelType::Gasoline95E5);
        let g98 = format_price(station, FuelType::Gasoline98E5);
        let diesel = format_price(station, FuelType::DieselA);
        let lpg = format_price(station, FuelType::Lpg);

        writer.write_record([
            station.id.as_str(),
            station.brand.as_str(),
            station.province.as_str(),
            station.municipality.as_str(),
            station.address.as_str(),
            lat.as_str(),
            lon.as_str(),
            station.schedule.as_str(),
            g95.as_str(),
            g98.as_str(),
            diesel.as_str(),
            lpg.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| std::io::Error::other(e.to_string()).into())
}

/// Renders stations as pretty-printed JSON, ministry field names intact.
pub fn to_json(stations: &[Station]) -> Result<String> {
    Ok(serde_json::to_string_pretty(stations)?)
}

fn format_price(station: &Station, fuel: FuelType) -> String {
    station
        .price(fuel)
        .map(|p| format!("{:.3}", p))
        .unwrap_or_default()
}

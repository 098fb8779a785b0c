use crate::domain::model::Station;
use std::collections::BTreeSet;

/// Distinct provinces, sorted, empty values dropped.
pub fn provinces(stations: &[Station]) -> Vec<String> {
    distinct(stations, |s| &s.province)
}

/// Distinct municipalities, optionally restricted to one province.
pub fn municipalities(stations: &[Station], province: Option<&str>) -> Vec<String> {
    match province {
        Some(province) if !province.is_empty() => {
            let subset: Vec<Station> = stations
                .iter()
                .filter(|s| s.province == province)
                .cloned()
                .collect();
            distinct(&subset, |s| &s.municipality)
        }
        _ => distinct(stations, |s| &s.municipality),
    }
}

/// Distinct brand signs, sorted, empty values dropped.
pub fn brands(stations: &[Station]) -> Vec<String> {
    distinct(stations, |s| &s.brand)
}

fn distinct<F>(stations: &[Station], field: F) -> Vec<String>
where
    F: Fn(&Station) -> &String,
{
    let set: BTreeSet<&String> = stations
        .iter()
        .map(field)
        .filter(|v| !v.trim().is_empty())
        .collect();
    set.into_iter().cloned().collect()
}

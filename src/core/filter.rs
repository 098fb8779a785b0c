use crate::domain::model::{FuelType, Station};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Matches "24H" anywhere in a schedule string ("L-D: 24H", "24h", ...).
fn round_the_clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)24\s*h").unwrap())
}

/// Criteria for narrowing down a station list. All active criteria must
/// hold for a station to pass (AND semantics).
#[derive(Debug, Clone, Default)]
pub struct StationFilter {
    /// Exact province match.
    pub province: Option<String>,
    /// Exact municipality match.
    pub municipality: Option<String>,
    /// Case-insensitive prefix match on the station's brand sign.
    pub brand: Option<String>,
    /// Fuels the station must sell, all of them.
    pub fuels: Vec<FuelType>,
    /// Only stations open round the clock.
    pub open_24h: bool,
    /// Only stations in the favorites set.
    pub favorites_only: bool,
    /// Price cap for gasoline 95 E5, euros per litre.
    pub max_price_gasoline_95: Option<f64>,
    /// Price cap for diesel A, euros per litre.
    pub max_price_diesel: Option<f64>,
}

impl StationFilter {
    pub fn matches(&self, station: &Station, favorites: &HashSet<String>) -> bool {
        self.matches_location(station)
            && self.matches_brand(station)
            && self.matches_fuels(station)
            && self.matches_services(station, favorites)
            && self.matches_prices(station)
    }

    /// Applies every active criterion, keeping input order.
    pub fn apply(&self, stations: &[Station], favorites: &HashSet<String>) -> Vec<Station> {
        stations
            .iter()
            .filter(|s| self.matches(s, favorites))
            .cloned()
            .collect()
    }

    pub fn is_active(&self) -> bool {
        self.province.as_deref().is_some_and(|p| !p.is_empty())
            || self.municipality.as_deref().is_some_and(|m| !m.is_empty())
            || self.brand.as_deref().is_some_and(|b| !b.is_empty())
            || !self.fuels.is_empty()
            || self.open_24h
            || self.favorites_only
            || self.max_price_gasoline_95.is_some()
            || self.max_price_diesel.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn matches_location(&self, station: &Station) -> bool {
        if let Some(province) = self.province.as_deref() {
            if !province.is_empty() && province != station.province {
                return false;
            }
        }
        if let Some(municipality) = self.municipality.as_deref() {
            if !municipality.is_empty() && municipality != station.municipality {
                return false;
            }
        }
        true
    }

    fn matches_brand(&self, station: &Station) -> bool {
        match self.brand.as_deref() {
            None | Some("") => true,
            Some(prefix) => station
                .brand
                .to_lowercase()
                .starts_with(&prefix.to_lowercase()),
        }
    }

    fn matches_fuels(&self, station: &Station) -> bool {
        self.fuels.iter().all(|fuel| station.has_price(*fuel))
    }

    fn matches_services(&self, station: &Station, favorites: &HashSet<String>) -> bool {
        if self.open_24h && !round_the_clock_re().is_match(&station.schedule) {
            return false;
        }
        if self.favorites_only && (station.id.is_empty() || !favorites.contains(&station.id)) {
            return false;
        }
        true
    }

    fn matches_prices(&self, station: &Station) -> bool {
        // A cap implies the fuel must be there with a readable price.
        if let Some(max) = self.max_price_gasoline_95 {
            match station.price(FuelType::Gasoline95E5) {
                Some(price) if price <= max => {}
                _ => return false,
            }
        }
        if let Some(max) = self.max_price_diesel {
            match station.price(FuelType::DieselA) {
                Some(price) if price <= max => {}
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str) -> Station {
        Station {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn no_favorites() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_filter_by_province() {
        let mut madrid = station("ES123");
        madrid.province = "Madrid".to_string();
        let mut barcelona = station("ES456");
        barcelona.province = "Barcelona".to_string();

        let filter = StationFilter {
            province: Some("Madrid".to_string()),
            ..Default::default()
        };

        let result = filter.apply(&[madrid, barcelona], &no_favorites());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].province, "Madrid");
    }

    #[test]
    fn test_filter_by_municipality() {
        let mut a = station("ES123");
        a.municipality = "Alcobendas".to_string();
        let mut b = station("ES456");
        b.municipality = "San Sebastián de los Reyes".to_string();

        let filter = StationFilter {
            municipality: Some("Alcobendas".to_string()),
            ..Default::default()
        };

        let result = filter.apply(&[a, b], &no_favorites());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].municipality, "Alcobendas");
    }

    #[test]
    fn test_filter_by_brand_prefix_case_insensitive() {
        let mut repsol = station("ES123");
        repsol.brand = "Repsol Alcobendas".to_string();
        let mut cepsa = station("ES456");
        cepsa.brand = "Cepsa Madrid".to_string();

        let filter = StationFilter {
            brand: Some("repsol".to_string()),
            ..Default::default()
        };

        let result = filter.apply(&[repsol, cepsa], &no_favorites());
        assert_eq!(result.len(), 1);
        assert!(result[0].brand.contains("Repsol"));
    }

    #[test]
    fn test_filter_by_fuel_availability() {
        let mut with_g95 = station("ES123");
        with_g95.price_gasoline_95_e5 = "1,45".to_string();
        let without_g95 = station("ES456");

        let filter = StationFilter {
            fuels: vec![FuelType::Gasoline95E5],
            ..Default::default()
        };

        let result = filter.apply(&[with_g95, without_g95], &no_favorites());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "ES123");
    }

    #[test]
    fn test_filter_requires_all_listed_fuels() {
        let mut only_g95 = station("ES1");
        only_g95.price_gasoline_95_e5 = "1,45".to_string();
        let mut both = station("ES2");
        both.price_gasoline_95_e5 = "1,45".to_string();
        both.price_diesel_a = "1,35".to_string();

        let filter = StationFilter {
            fuels: vec![FuelType::Gasoline95E5, FuelType::DieselA],
            ..Default::default()
        };

        let result = filter.apply(&[only_g95, both], &no_favorites());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "ES2");
    }

    #[test]
    fn test_filter_24h() {
        let mut always_open = station("ES123");
        always_open.schedule = "24H".to_string();
        let mut real_format = station("ES124");
        real_format.schedule = "L-D: 24H".to_string();
        let mut weekdays = station("ES456");
        weekdays.schedule = "L-V: 8:00-22:00".to_string();

        let filter = StationFilter {
            open_24h: true,
            ..Default::default()
        };

        let result = filter.apply(&[always_open, real_format, weekdays], &no_favorites());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "ES123");
        assert_eq!(result[1].id, "ES124");
    }

    #[test]
    fn test_filter_favorites_only() {
        let a = station("ES123");
        let b = station("ES456");
        let unidentified = station("");

        let favorites: HashSet<String> = ["ES123".to_string()].into_iter().collect();
        let filter = StationFilter {
            favorites_only: true,
            ..Default::default()
        };

        let result = filter.apply(&[a, b, unidentified], &favorites);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "ES123");
    }

    #[test]
    fn test_filter_max_price_gasoline_95() {
        let mut cheap = station("ES123");
        cheap.price_gasoline_95_e5 = "1,45".to_string();
        let mut pricey = station("ES456");
        pricey.price_gasoline_95_e5 = "1,55".to_string();

        let filter = StationFilter {
            max_price_gasoline_95: Some(1.50),
            ..Default::default()
        };

        let result = filter.apply(&[cheap, pricey], &no_favorites());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].price_gasoline_95_e5, "1,45");
    }

    #[test]
    fn test_price_cap_excludes_missing_price() {
        let no_price = station("ES1");
        let mut garbled = station("ES2");
        garbled.price_diesel_a = "n/a".to_string();

        let filter = StationFilter {
            max_price_diesel: Some(2.0),
            ..Default::default()
        };

        assert!(filter.apply(&[no_price, garbled], &no_favorites()).is_empty());
    }

    #[test]
    fn test_combined_filters_use_and_semantics() {
        let mut passes = station("ES1");
        passes.province = "Madrid".to_string();
        passes.price_gasoline_95_e5 = "1,40".to_string();
        let mut wrong_province = station("ES2");
        wrong_province.province = "Barcelona".to_string();
        wrong_province.price_gasoline_95_e5 = "1,40".to_string();
        let mut too_expensive = station("ES3");
        too_expensive.province = "Madrid".to_string();
        too_expensive.price_gasoline_95_e5 = "1,60".to_string();

        let filter = StationFilter {
            province: Some("Madrid".to_string()),
            max_price_gasoline_95: Some(1.50),
            ..Default::default()
        };

        let result = filter.apply(&[passes, wrong_province, too_expensive], &no_favorites());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "ES1");
    }

    #[test]
    fn test_is_active_and_clear() {
        let mut filter = StationFilter::default();
        assert!(!filter.is_active());

        filter.province = Some("Madrid".to_string());
        filter.open_24h = true;
        assert!(filter.is_active());

        filter.clear();
        assert!(!filter.is_active());
    }

    #[test]
    fn test_empty_string_criteria_are_inactive() {
        let filter = StationFilter {
            province: Some(String::new()),
            brand: Some(String::new()),
            ..Default::default()
        };
        assert!(!filter.is_active());

        let mut anywhere = station("ES1");
        anywhere.province = "Madrid".to_string();
        assert!(filter.matches(&anywhere, &no_favorites()));
    }
}

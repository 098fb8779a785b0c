use crate::domain::model::{FuelType, Station};
use std::collections::HashSet;

/// Relative importance of each scoring criterion. The three weights are
/// expected to sum to 1.0 so the total stays in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub price: f64,
    pub variety: f64,
    pub favorite: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            price: 0.2,
            variety: 0.4,
            favorite: 0.4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoredStation {
    pub station: Station,
    pub score: f64,
}

/// Scores stations by price competitiveness, fuel variety, and favorite
/// status. Used to pick which stations to keep when an area holds more
/// than fit on screen.
pub struct StationScorer {
    weights: ScoreWeights,
    favorites: HashSet<String>,
}

impl StationScorer {
    pub fn new(weights: ScoreWeights, favorites: HashSet<String>) -> Self {
        Self { weights, favorites }
    }

    pub fn score(&self, station: &Station) -> f64 {
        self.price_score(station) * self.weights.price
            + self.variety_score(station) * self.weights.variety
            + self.favorite_score(station) * self.weights.favorite
    }

    /// Sorts stations by score, best first.
    pub fn rank(&self, stations: &[Station]) -> Vec<ScoredStation> {
        let mut scored: Vec<ScoredStation> = stations
            .iter()
            .map(|station| ScoredStation {
                station: station.clone(),
                score: self.score(station),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// Cheaper fuel scores higher. Gasoline and diesel are normalized
    /// against a 2.00 EUR/l ceiling, LPG against 1.50 EUR/l; the result is
    /// averaged over the prices that parsed.
    fn price_score(&self, station: &Station) -> f64 {
        let mut total = 0.0;
        let mut priced_fuels = 0;

        if let Some(price) = station.price(FuelType::Gasoline95E5) {
            total += ((2.0 - price) / 2.0).max(0.0);
            priced_fuels += 1;
        }
        if let Some(price) = station.price(FuelType::DieselA) {
            total += ((2.0 - price) / 2.0).max(0.0);
            priced_fuels += 1;
        }
        if let Some(price) = station.price(FuelType::Lpg) {
            total += ((1.5 - price) / 1.5).max(0.0);
            priced_fuels += 1;
        }

        if priced_fuels > 0 {
            total / priced_fuels as f64
        } else {
            0.0
        }
    }

    /// Counts the main fuel offerings; three or more is a full score.
    fn variety_score(&self, station: &Station) -> f64 {
        let fuels = [
            FuelType::Gasoline95E5,
            FuelType::DieselA,
            FuelType::Lpg,
            FuelType::Gasoline98E5,
        ];
        let available = fuels.iter().filter(|f| station.has_price(**f)).count();
        (available as f64 / 3.0).min(1.0)
    }

    fn favorite_score(&self, station: &Station) -> f64 {
        if !station.id.is_empty() && self.favorites.contains(&station.id) {
            1.0
        } else {
            0.0
        }
    }
}

mod tally;

use serde::{Deserialize, Serialize};

use super::criteria::Criterion;
use super::domain::{Hotel, HotelId, HotelScores, PoolCriteria};
use super::weights::{ScoreType, WeightTable};
use tally::tally_pool;

/// Upper end of the published score scale.
pub const SCORE_SCALE: f64 = 10.0;

/// Stateless calculator bound to one weight-table snapshot.
///
/// Build a new calculator for every pass so admin edits are picked up; the same
/// snapshot always produces the same scores for the same pool record.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    weights: WeightTable,
}

impl ScoreCalculator {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn score(&self, hotel: &Hotel) -> ScoreCard {
        let (scores, components, missing) = match &hotel.pool {
            Some(pool) => self.score_pool(pool),
            None => (HotelScores::default(), Vec::new(), Vec::new()),
        };

        ScoreCard {
            hotel_id: hotel.id.clone(),
            scores,
            components,
            missing,
        }
    }

    /// Scores plus the audit trail for a bare pool record.
    pub fn score_pool(
        &self,
        pool: &PoolCriteria,
    ) -> (HotelScores, Vec<ScoreComponent>, Vec<Criterion>) {
        let (components, missing, tallies) = tally_pool(pool, &self.weights);

        let mut scores = HotelScores::default();
        for score_type in ScoreType::ALL {
            scores.set(score_type, tallies.get(score_type).finish());
        }

        (scores, components, missing)
    }
}

/// Normalized contribution of one counted criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub criterion: Criterion,
    pub contribution: f64,
    pub notes: String,
}

/// Outcome of scoring one hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub hotel_id: HotelId,
    pub scores: HotelScores,
    pub components: Vec<ScoreComponent>,
    /// Active criteria skipped because the hotel has no value recorded.
    pub missing: Vec<Criterion>,
}

/// Round a raw `[0, 1]` average onto the published scale with one decimal.
pub(crate) fn to_scale(average: f64) -> f64 {
    (average.clamp(0.0, 1.0) * SCORE_SCALE * 10.0).round() / 10.0
}

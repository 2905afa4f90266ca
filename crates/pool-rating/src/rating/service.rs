use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::badges::{
    Badge, BadgeAssignment, BadgeCriterion, BadgeId, BadgePreview, BadgeRuleError, BadgeRuleSet,
};
use super::domain::{Hotel, HotelId};
use super::repository::{HotelRepository, HotelScoreView, RepositoryError, RuleRepository};
use super::scoring::{ScoreCalculator, ScoreCard};
use super::weights::{ScoringWeight, WeightPatch, WeightTable};

/// Service composing the score calculator, badge rules, and repositories.
pub struct RatingService<H, R> {
    hotels: Arc<H>,
    rules: Arc<R>,
}

/// Totals reported after a full recalculation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecalculationSummary {
    pub hotels: usize,
    pub fully_scored: usize,
    pub partially_scored: usize,
    pub unscored: usize,
}

impl<H, R> RatingService<H, R>
where
    H: HotelRepository + 'static,
    R: RuleRepository + 'static,
{
    pub fn new(hotels: Arc<H>, rules: Arc<R>) -> Self {
        Self { hotels, rules }
    }

    /// Build a calculator from the weight table as it stands right now.
    fn calculator(&self) -> Result<ScoreCalculator, RatingServiceError> {
        let weights = self.rules.weights()?;
        if weights.active().next().is_none() {
            warn!("weight table has no active criteria; every score will be empty");
        }
        Ok(ScoreCalculator::new(weights))
    }

    /// Recompute and persist the scores of one hotel.
    pub fn recalculate(&self, hotel_id: &HotelId) -> Result<ScoreCard, RatingServiceError> {
        let calculator = self.calculator()?;
        let hotel = self.fetch_hotel(hotel_id)?;
        self.store_scores(&calculator, hotel)
    }

    /// Recompute every hotel against a single weight snapshot.
    pub fn recalculate_all(&self) -> Result<RecalculationSummary, RatingServiceError> {
        let calculator = self.calculator()?;
        let mut summary = RecalculationSummary {
            hotels: 0,
            fully_scored: 0,
            partially_scored: 0,
            unscored: 0,
        };

        for hotel in self.hotels.all()? {
            let card = self.store_scores(&calculator, hotel)?;
            let scored = [
                card.scores.overall,
                card.scores.family,
                card.scores.quiet,
                card.scores.party,
            ]
            .iter()
            .filter(|score| score.is_some())
            .count();

            summary.hotels += 1;
            match scored {
                4 => summary.fully_scored += 1,
                0 => summary.unscored += 1,
                _ => summary.partially_scored += 1,
            }
        }

        info!(
            hotels = summary.hotels,
            unscored = summary.unscored,
            "recalculated hotel scores"
        );
        Ok(summary)
    }

    fn store_scores(
        &self,
        calculator: &ScoreCalculator,
        hotel: Hotel,
    ) -> Result<ScoreCard, RatingServiceError> {
        let card = calculator.score(&hotel);
        debug!(
            hotel_id = %hotel.id,
            overall = ?card.scores.overall,
            missing = card.missing.len(),
            "scored hotel"
        );
        self.hotels.save_scores(&hotel.id, card.scores, Utc::now())?;
        Ok(card)
    }

    /// Cached scores and badges for display.
    pub fn scores(&self, hotel_id: &HotelId) -> Result<HotelScoreView, RatingServiceError> {
        let hotel = self.fetch_hotel(hotel_id)?;
        Ok(HotelScoreView::from(&hotel))
    }

    pub fn weights(&self) -> Result<WeightTable, RatingServiceError> {
        Ok(self.rules.weights()?)
    }

    /// Merge admin edits into the weight table. Stored scores are not touched until the
    /// next recalculation.
    pub fn update_weights(
        &self,
        patches: Vec<WeightPatch>,
    ) -> Result<WeightTable, RatingServiceError> {
        let mut changed = 0;
        let table = self
            .rules
            .modify_weights(|table| changed = table.apply(patches))?;
        info!(changed, "updated scoring weights");
        Ok(table)
    }

    /// Criteria shown on public pages (visible and public flags set).
    pub fn public_criteria(&self) -> Result<Vec<ScoringWeight>, RatingServiceError> {
        let table = self.rules.weights()?;
        Ok(table.public_criteria().into_iter().cloned().collect())
    }

    /// Validate and store a new badge definition.
    pub fn create_badge(&self, badge: Badge) -> Result<Badge, RatingServiceError> {
        badge.rules()?;
        let stored = self.rules.insert_badge(badge)?;
        info!(badge_id = %stored.id, criteria = stored.criteria.len(), "created badge");
        Ok(stored)
    }

    /// Evaluate ad-hoc criteria against every hotel without saving anything.
    pub fn preview_criteria(
        &self,
        criteria: &[BadgeCriterion],
    ) -> Result<BadgePreview, RatingServiceError> {
        let rules = BadgeRuleSet::compile(criteria)?;
        let hotels = self.hotels.all()?;
        Ok(rules.preview(&hotels))
    }

    pub fn preview_badge(&self, badge_id: &BadgeId) -> Result<BadgePreview, RatingServiceError> {
        let badge = self.fetch_badge(badge_id)?;
        let rules = badge.rules()?;
        let hotels = self.hotels.all()?;
        Ok(rules.preview(&hotels))
    }

    /// Sync badge associations with the badge's current criteria.
    pub fn apply_badge(&self, badge_id: &BadgeId) -> Result<BadgeAssignment, RatingServiceError> {
        let badge = self.fetch_badge(badge_id)?;
        let rules = badge.rules()?;
        let hotels = self.hotels.all()?;
        let assignment = rules.plan_assignment(badge_id, &hotels);

        for hotel_id in &assignment.assigned {
            self.hotels.set_badge(hotel_id, badge_id, true)?;
        }
        for hotel_id in &assignment.revoked {
            self.hotels.set_badge(hotel_id, badge_id, false)?;
        }

        info!(
            badge_id = %badge_id,
            assigned = assignment.assigned.len(),
            revoked = assignment.revoked.len(),
            "applied badge"
        );
        Ok(assignment)
    }

    fn fetch_hotel(&self, hotel_id: &HotelId) -> Result<Hotel, RatingServiceError> {
        self.hotels
            .fetch(hotel_id)?
            .ok_or_else(|| RatingServiceError::HotelNotFound(hotel_id.clone()))
    }

    fn fetch_badge(&self, badge_id: &BadgeId) -> Result<Badge, RatingServiceError> {
        self.rules
            .badge(badge_id)?
            .ok_or_else(|| RatingServiceError::BadgeNotFound(badge_id.clone()))
    }
}

/// Error raised by the rating service.
#[derive(Debug, thiserror::Error)]
pub enum RatingServiceError {
    #[error("hotel '{0}' not found")]
    HotelNotFound(HotelId),
    #[error("badge '{0}' not found")]
    BadgeNotFound(BadgeId),
    #[error(transparent)]
    BadgeRule(#[from] BadgeRuleError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

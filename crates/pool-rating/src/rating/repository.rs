use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::badges::{Badge, BadgeId};
use super::domain::{Hotel, HotelId, HotelScores, SubscriptionTier};
use super::weights::WeightTable;

/// Storage abstraction for hotel records so the service can be exercised in isolation.
///
/// Writes touch a single concern of the record, so a score pass and a badge sync running
/// side by side never overwrite each other's fields.
pub trait HotelRepository: Send + Sync {
    fn fetch(&self, id: &HotelId) -> Result<Option<Hotel>, RepositoryError>;
    fn all(&self) -> Result<Vec<Hotel>, RepositoryError>;
    /// Overwrite the cached scores and their timestamp.
    fn save_scores(
        &self,
        id: &HotelId,
        scores: HotelScores,
        calculated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
    /// Grant or revoke one badge. Returns whether membership changed.
    fn set_badge(
        &self,
        id: &HotelId,
        badge: &BadgeId,
        granted: bool,
    ) -> Result<bool, RepositoryError>;
}

/// Storage for admin-managed rating rules: the weight table and badge definitions.
pub trait RuleRepository: Send + Sync {
    fn weights(&self) -> Result<WeightTable, RepositoryError>;
    /// Run `edit` against the stored table while holding it, then return the result.
    fn modify_weights<F>(&self, edit: F) -> Result<WeightTable, RepositoryError>
    where
        F: FnOnce(&mut WeightTable);
    fn badge(&self, id: &BadgeId) -> Result<Option<Badge>, RepositoryError>;
    fn insert_badge(&self, badge: Badge) -> Result<Badge, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public representation of a hotel's cached scores.
#[derive(Debug, Clone, Serialize)]
pub struct HotelScoreView {
    pub hotel_id: HotelId,
    pub name: String,
    pub subscription: SubscriptionTier,
    pub scores: HotelScores,
    pub badges: BTreeSet<BadgeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores_calculated_at: Option<DateTime<Utc>>,
}

impl From<&Hotel> for HotelScoreView {
    fn from(hotel: &Hotel) -> Self {
        Self {
            hotel_id: hotel.id.clone(),
            name: hotel.name.clone(),
            subscription: hotel.subscription,
            scores: hotel.scores,
            badges: hotel.badges.clone(),
            scores_calculated_at: hotel.scores_calculated_at,
        }
    }
}

//! Hotel pool scoring and badge eligibility.
//!
//! Raw pool attributes ([`PoolCriteria`]) are read through the typed [`Attribute`] table,
//! normalized per [`Criterion`], and combined with the admin [`WeightTable`] into four
//! scores. Badges are AND-combined comparisons over the same attributes (or the cached
//! scores). [`RatingService`] persists results through the repository traits, and
//! [`rating_router`] exposes the service over HTTP.

pub mod attributes;
pub mod badges;
pub mod criteria;
pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod weights;

#[cfg(test)]
mod tests;

pub use attributes::{Attribute, AttributeError, AttributeValue};
pub use badges::{
    Badge, BadgeAssignment, BadgeCriterion, BadgeId, BadgePreview, BadgeRuleError, BadgeRuleSet,
    MatchedHotel,
};
pub use criteria::Criterion;
pub use domain::{
    Atmosphere, CrowdLevel, DestinationId, Hotel, HotelId, HotelScores, MusicLevel, PoolCriteria,
    SubscriptionTier,
};
pub use import::{HotelSheetImporter, ImportError, WeightTableImporter};
pub use repository::{HotelRepository, HotelScoreView, RepositoryError, RuleRepository};
pub use router::rating_router;
pub use scoring::{ScoreCalculator, ScoreCard, ScoreComponent};
pub use service::{RatingService, RatingServiceError, RecalculationSummary};
pub use weights::{ScoreType, ScoringWeight, WeightPatch, WeightTable, MAX_WEIGHT};

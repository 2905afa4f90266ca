use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::rating::badges::{Badge, BadgeCriterion, BadgeId};
use crate::rating::criteria::Criterion;
use crate::rating::domain::{
    Atmosphere, CrowdLevel, Hotel, HotelId, HotelScores, MusicLevel, PoolCriteria, SubscriptionTier,
};
use crate::rating::repository::{HotelRepository, RepositoryError, RuleRepository};
use crate::rating::weights::{ScoringWeight, WeightTable};
use crate::rating::{rating_router, RatingService};

pub(super) fn family_pool() -> PoolCriteria {
    PoolCriteria {
        sunbed_to_guest_ratio: Some(0.8),
        pool_count: Some(3),
        cleanliness_rating: Some(5),
        kids_facilities_rating: Some(5),
        has_kids_pool: Some(true),
        has_waterslides: Some(true),
        has_lifeguard: Some(true),
        has_swim_up_bar: Some(false),
        atmosphere: Some(Atmosphere::Lively),
        music_level: Some(MusicLevel::Background),
        crowd_level: Some(CrowdLevel::Busy),
        ..PoolCriteria::default()
    }
}

pub(super) fn quiet_pool() -> PoolCriteria {
    PoolCriteria {
        cleanliness_rating: Some(3),
        quietness_rating: Some(5),
        has_adults_only_pool: Some(true),
        has_kids_pool: Some(false),
        has_pool_bar: Some(true),
        atmosphere: Some(Atmosphere::Tranquil),
        music_level: Some(MusicLevel::None),
        crowd_level: Some(CrowdLevel::Quiet),
        ..PoolCriteria::default()
    }
}

pub(super) fn family_resort() -> Hotel {
    let mut hotel =
        Hotel::new("h-family", "Splash Bay Resort", "costa-dorada").with_pool(family_pool());
    hotel.subscription = SubscriptionTier::Premium;
    hotel
}

pub(super) fn quiet_retreat() -> Hotel {
    Hotel::new("h-quiet", "Olive Grove Retreat", "paphos").with_pool(quiet_pool())
}

pub(super) fn unsurveyed_hotel() -> Hotel {
    Hotel::new("h-blank", "Harbour Inn", "paphos")
}

/// Two criteria with overall weights 2 and 1 and nothing else.
pub(super) fn small_table() -> WeightTable {
    WeightTable::from(vec![
        ScoringWeight::new(Criterion::Cleanliness, 2.0, 0.0, 0.0, 0.0),
        ScoringWeight::new(Criterion::KidsPool, 1.0, 0.0, 0.0, 0.0),
    ])
}

pub(super) fn spotless_badge() -> Badge {
    Badge {
        id: BadgeId("spotless".to_string()),
        name: "Spotless Pool".to_string(),
        description: Some("Top marks for pool cleanliness".to_string()),
        icon: Some("sparkles".to_string()),
        color: None,
        criteria: vec![BadgeCriterion::new("cleanliness_rating", ">=", "4")],
    }
}

pub(super) fn build_service() -> (
    RatingService<MemoryHotels, MemoryRules>,
    Arc<MemoryHotels>,
    Arc<MemoryRules>,
) {
    let hotels = Arc::new(MemoryHotels::with_hotels(vec![
        family_resort(),
        quiet_retreat(),
        unsurveyed_hotel(),
    ]));
    let rules = Arc::new(MemoryRules::with_weights(WeightTable::standard()));
    let service = RatingService::new(hotels.clone(), rules.clone());
    (service, hotels, rules)
}

#[derive(Default, Clone)]
pub(super) struct MemoryHotels {
    pub(super) records: Arc<Mutex<BTreeMap<HotelId, Hotel>>>,
}

impl MemoryHotels {
    pub(super) fn with_hotels(hotels: Vec<Hotel>) -> Self {
        let records = hotels
            .into_iter()
            .map(|hotel| (hotel.id.clone(), hotel))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub(super) fn stored(&self, id: &str) -> Hotel {
        self.records
            .lock()
            .expect("hotel mutex poisoned")
            .get(&HotelId(id.to_string()))
            .cloned()
            .expect("hotel present")
    }
}

impl HotelRepository for MemoryHotels {
    fn fetch(&self, id: &HotelId) -> Result<Option<Hotel>, RepositoryError> {
        let guard = self.records.lock().expect("hotel mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Hotel>, RepositoryError> {
        let guard = self.records.lock().expect("hotel mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn save_scores(
        &self,
        id: &HotelId,
        scores: HotelScores,
        calculated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("hotel mutex poisoned");
        let hotel = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        hotel.scores = scores;
        hotel.scores_calculated_at = Some(calculated_at);
        Ok(())
    }

    fn set_badge(
        &self,
        id: &HotelId,
        badge: &BadgeId,
        granted: bool,
    ) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("hotel mutex poisoned");
        let hotel = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(if granted {
            hotel.badges.insert(badge.clone())
        } else {
            hotel.badges.remove(badge)
        })
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRules {
    weights: Arc<Mutex<WeightTable>>,
    badges: Arc<Mutex<BTreeMap<BadgeId, Badge>>>,
}

impl MemoryRules {
    pub(super) fn with_weights(table: WeightTable) -> Self {
        Self {
            weights: Arc::new(Mutex::new(table)),
            badges: Arc::default(),
        }
    }
}

impl RuleRepository for MemoryRules {
    fn weights(&self) -> Result<WeightTable, RepositoryError> {
        Ok(self.weights.lock().expect("weights mutex poisoned").clone())
    }

    fn modify_weights<F>(&self, edit: F) -> Result<WeightTable, RepositoryError>
    where
        F: FnOnce(&mut WeightTable),
    {
        let mut guard = self.weights.lock().expect("weights mutex poisoned");
        edit(&mut *guard);
        Ok(guard.clone())
    }

    fn badge(&self, id: &BadgeId) -> Result<Option<Badge>, RepositoryError> {
        let guard = self.badges.lock().expect("badge mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_badge(&self, badge: Badge) -> Result<Badge, RepositoryError> {
        let mut guard = self.badges.lock().expect("badge mutex poisoned");
        if guard.contains_key(&badge.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(badge.id.clone(), badge.clone());
        Ok(badge)
    }
}

pub(super) struct UnavailableHotels;

impl HotelRepository for UnavailableHotels {
    fn fetch(&self, _id: &HotelId) -> Result<Option<Hotel>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Hotel>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_scores(
        &self,
        _id: &HotelId,
        _scores: HotelScores,
        _calculated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn set_badge(
        &self,
        _id: &HotelId,
        _badge: &BadgeId,
        _granted: bool,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn rating_router_with_service(
    service: RatingService<MemoryHotels, MemoryRules>,
) -> axum::Router {
    rating_router(Arc::new(service))
}

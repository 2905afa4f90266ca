use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use pool_rating::error::AppError;
use pool_rating::rating::{
    Badge, BadgeId, Hotel, HotelId, HotelRepository, HotelScores, HotelSheetImporter,
    RepositoryError, RuleRepository, WeightTable, WeightTableImporter,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryHotelRepository {
    records: Arc<Mutex<BTreeMap<HotelId, Hotel>>>,
}

impl InMemoryHotelRepository {
    pub(crate) fn with_hotels(hotels: Vec<Hotel>) -> Self {
        let records = hotels
            .into_iter()
            .map(|hotel| (hotel.id.clone(), hotel))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl HotelRepository for InMemoryHotelRepository {
    fn fetch(&self, id: &HotelId) -> Result<Option<Hotel>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Hotel>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn save_scores(
        &self,
        id: &HotelId,
        scores: HotelScores,
        calculated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
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
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let hotel = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let changed = if granted {
            hotel.badges.insert(badge.clone())
        } else {
            hotel.badges.remove(badge)
        };
        Ok(changed)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRuleRepository {
    weights: Arc<Mutex<WeightTable>>,
    badges: Arc<Mutex<BTreeMap<BadgeId, Badge>>>,
}

impl InMemoryRuleRepository {
    pub(crate) fn new(weights: WeightTable) -> Self {
        Self {
            weights: Arc::new(Mutex::new(weights)),
            badges: Arc::default(),
        }
    }
}

impl RuleRepository for InMemoryRuleRepository {
    fn weights(&self) -> Result<WeightTable, RepositoryError> {
        let guard = self.weights.lock().expect("weights mutex poisoned");
        Ok(guard.clone())
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

/// Weight table from a CSV export, or the built-in seed table.
pub(crate) fn load_weights(path: Option<&Path>) -> Result<WeightTable, AppError> {
    match path {
        Some(path) => {
            let table = WeightTableImporter::from_path(path)?;
            info!(path = %path.display(), criteria = table.len(), "loaded scoring weights");
            Ok(table)
        }
        None => Ok(WeightTable::standard()),
    }
}

pub(crate) fn load_hotels(path: &Path) -> Result<Vec<Hotel>, AppError> {
    let hotels = HotelSheetImporter::from_path(path)?;
    info!(path = %path.display(), hotels = hotels.len(), "loaded hotel sheet");
    Ok(hotels)
}

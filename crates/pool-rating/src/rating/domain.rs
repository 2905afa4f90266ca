use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::badges::BadgeId;
use super::weights::ScoreType;

/// Identifier wrapper for hotels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HotelId(pub String);

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for destinations (resort towns, islands, regions).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DestinationId(pub String);

/// Listing tier purchased by the hotel. Affects presentation only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Featured,
    Premium,
}

/// Hotel record as stored by the surrounding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub destination_id: DestinationId,
    #[serde(default)]
    pub pool: Option<PoolCriteria>,
    #[serde(default)]
    pub scores: HotelScores,
    #[serde(default)]
    pub subscription: SubscriptionTier,
    #[serde(default)]
    pub click_count: u64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub badges: BTreeSet<BadgeId>,
    #[serde(default)]
    pub scores_calculated_at: Option<DateTime<Utc>>,
}

impl Hotel {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: HotelId(id.into()),
            name: name.into(),
            destination_id: DestinationId(destination.into()),
            pool: None,
            scores: HotelScores::default(),
            subscription: SubscriptionTier::default(),
            click_count: 0,
            view_count: 0,
            badges: BTreeSet::new(),
            scores_calculated_at: None,
        }
    }

    pub fn with_pool(mut self, pool: PoolCriteria) -> Self {
        self.pool = Some(pool);
        self
    }
}

/// The four cached scores. `None` means no counted criterion was available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelScores {
    pub overall: Option<f64>,
    pub family: Option<f64>,
    pub quiet: Option<f64>,
    pub party: Option<f64>,
}

impl HotelScores {
    pub fn get(&self, score_type: ScoreType) -> Option<f64> {
        match score_type {
            ScoreType::Overall => self.overall,
            ScoreType::Family => self.family,
            ScoreType::Quiet => self.quiet,
            ScoreType::Party => self.party,
        }
    }

    pub fn set(&mut self, score_type: ScoreType, value: Option<f64>) {
        match score_type {
            ScoreType::Overall => self.overall = value,
            ScoreType::Family => self.family = value,
            ScoreType::Quiet => self.quiet = value,
            ScoreType::Party => self.party = value,
        }
    }
}

/// Overall ambience around the pool deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Atmosphere {
    Tranquil,
    Relaxed,
    Lively,
    Party,
}

/// Loudness of music played at the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicLevel {
    #[serde(alias = "silent")]
    None,
    Background,
    Loud,
    Dj,
}

impl Atmosphere {
    pub const fn as_str(self) -> &'static str {
        match self {
            Atmosphere::Tranquil => "tranquil",
            Atmosphere::Relaxed => "relaxed",
            Atmosphere::Lively => "lively",
            Atmosphere::Party => "party",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tranquil" => Some(Self::Tranquil),
            "relaxed" => Some(Self::Relaxed),
            "lively" => Some(Self::Lively),
            "party" => Some(Self::Party),
            _ => None,
        }
    }
}

impl MusicLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            MusicLevel::None => "none",
            MusicLevel::Background => "background",
            MusicLevel::Loud => "loud",
            MusicLevel::Dj => "dj",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" | "silent" => Some(Self::None),
            "background" => Some(Self::Background),
            "loud" => Some(Self::Loud),
            "dj" => Some(Self::Dj),
            _ => None,
        }
    }
}

/// Typical crowding at peak hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdLevel {
    Quiet,
    Moderate,
    Busy,
    Packed,
}

/// Pool attributes recorded for a hotel. Every field is optional: `None` means the
/// attribute has not been surveyed, which is different from a negative answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolCriteria {
    pub sunbed_to_guest_ratio: Option<f64>,
    pub pool_count: Option<u32>,
    pub largest_pool_area_sqm: Option<u32>,
    pub shade_coverage_percent: Option<u8>,
    pub pool_open_hours: Option<u8>,

    pub cleanliness_rating: Option<u8>,
    pub water_quality_rating: Option<u8>,
    pub sunbed_availability_rating: Option<u8>,
    pub quietness_rating: Option<u8>,
    pub staff_service_rating: Option<u8>,
    pub poolside_food_rating: Option<u8>,
    pub kids_facilities_rating: Option<u8>,
    pub view_rating: Option<u8>,

    pub has_heated_pool: Option<bool>,
    pub has_kids_pool: Option<bool>,
    pub has_waterslides: Option<bool>,
    pub has_lazy_river: Option<bool>,
    pub has_wave_pool: Option<bool>,
    pub has_adults_only_pool: Option<bool>,
    pub has_infinity_pool: Option<bool>,
    pub has_indoor_pool: Option<bool>,
    pub has_pool_bar: Option<bool>,
    pub has_swim_up_bar: Option<bool>,
    pub has_lifeguard: Option<bool>,
    pub has_cabanas: Option<bool>,
    pub has_free_towels: Option<bool>,
    pub enforces_sunbed_policy: Option<bool>,
    pub hosts_pool_parties: Option<bool>,
    pub wheelchair_accessible: Option<bool>,
    pub has_pool_hoist: Option<bool>,
    pub has_step_free_entry: Option<bool>,
    pub has_shallow_area: Option<bool>,
    pub has_changing_rooms: Option<bool>,

    pub atmosphere: Option<Atmosphere>,
    pub music_level: Option<MusicLevel>,
    pub crowd_level: Option<CrowdLevel>,
}

impl CrowdLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            CrowdLevel::Quiet => "quiet",
            CrowdLevel::Moderate => "moderate",
            CrowdLevel::Busy => "busy",
            CrowdLevel::Packed => "packed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "quiet" => Some(Self::Quiet),
            "moderate" => Some(Self::Moderate),
            "busy" => Some(Self::Busy),
            "packed" => Some(Self::Packed),
            _ => None,
        }
    }
}

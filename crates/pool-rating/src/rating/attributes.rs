//! Typed addressing of `PoolCriteria` fields.
//!
//! Admin tooling refers to attributes by their snake_case column name (weights table,
//! badge rules, CSV exports). [`Attribute`] maps those names onto the struct fields so no
//! lookup ever goes through reflection or a stringly-typed map.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{Atmosphere, CrowdLevel, MusicLevel, PoolCriteria};

/// A single raw field of [`PoolCriteria`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    SunbedToGuestRatio,
    PoolCount,
    LargestPoolAreaSqm,
    ShadeCoveragePercent,
    PoolOpenHours,
    CleanlinessRating,
    WaterQualityRating,
    SunbedAvailabilityRating,
    QuietnessRating,
    StaffServiceRating,
    PoolsideFoodRating,
    KidsFacilitiesRating,
    ViewRating,
    HasHeatedPool,
    HasKidsPool,
    HasWaterslides,
    HasLazyRiver,
    HasWavePool,
    HasAdultsOnlyPool,
    HasInfinityPool,
    HasIndoorPool,
    HasPoolBar,
    HasSwimUpBar,
    HasLifeguard,
    HasCabanas,
    HasFreeTowels,
    EnforcesSunbedPolicy,
    HostsPoolParties,
    WheelchairAccessible,
    HasPoolHoist,
    HasStepFreeEntry,
    HasShallowArea,
    HasChangingRooms,
    Atmosphere,
    MusicLevel,
    CrowdLevel,
}

/// Storage shape of an attribute, used when parsing imported values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Flag,
    Rating,
    Ratio,
    Count,
    Percent,
    Hours,
    Level,
}

/// Value read from a hotel's pool record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue {
    Flag(bool),
    Rating(u8),
    Ratio(f64),
    Count(u32),
    Percent(u8),
    Hours(u8),
    Level(&'static str),
}

impl AttributeValue {
    /// Numeric view used by comparisons. Flags read as 1/0; levels have none.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Rating(value)
            | AttributeValue::Percent(value)
            | AttributeValue::Hours(value) => Some(f64::from(*value)),
            AttributeValue::Count(value) => Some(f64::from(*value)),
            AttributeValue::Ratio(value) => Some(*value),
            AttributeValue::Flag(true) => Some(1.0),
            AttributeValue::Flag(false) => Some(0.0),
            AttributeValue::Level(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Flag(value) => write!(f, "{value}"),
            AttributeValue::Rating(value)
            | AttributeValue::Percent(value)
            | AttributeValue::Hours(value) => write!(f, "{value}"),
            AttributeValue::Count(value) => write!(f, "{value}"),
            AttributeValue::Ratio(value) => write!(f, "{value}"),
            AttributeValue::Level(value) => f.write_str(value),
        }
    }
}

/// Raised when an imported cell cannot be stored in its attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("unknown attribute '{0}'")]
    Unknown(String),
    #[error("invalid value '{value}' for {attribute}: expected {expected}")]
    InvalidValue {
        attribute: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Attribute {
    pub const ALL: [Attribute; 36] = [
        Attribute::SunbedToGuestRatio,
        Attribute::PoolCount,
        Attribute::LargestPoolAreaSqm,
        Attribute::ShadeCoveragePercent,
        Attribute::PoolOpenHours,
        Attribute::CleanlinessRating,
        Attribute::WaterQualityRating,
        Attribute::SunbedAvailabilityRating,
        Attribute::QuietnessRating,
        Attribute::StaffServiceRating,
        Attribute::PoolsideFoodRating,
        Attribute::KidsFacilitiesRating,
        Attribute::ViewRating,
        Attribute::HasHeatedPool,
        Attribute::HasKidsPool,
        Attribute::HasWaterslides,
        Attribute::HasLazyRiver,
        Attribute::HasWavePool,
        Attribute::HasAdultsOnlyPool,
        Attribute::HasInfinityPool,
        Attribute::HasIndoorPool,
        Attribute::HasPoolBar,
        Attribute::HasSwimUpBar,
        Attribute::HasLifeguard,
        Attribute::HasCabanas,
        Attribute::HasFreeTowels,
        Attribute::EnforcesSunbedPolicy,
        Attribute::HostsPoolParties,
        Attribute::WheelchairAccessible,
        Attribute::HasPoolHoist,
        Attribute::HasStepFreeEntry,
        Attribute::HasShallowArea,
        Attribute::HasChangingRooms,
        Attribute::Atmosphere,
        Attribute::MusicLevel,
        Attribute::CrowdLevel,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Attribute::SunbedToGuestRatio => "sunbed_to_guest_ratio",
            Attribute::PoolCount => "pool_count",
            Attribute::LargestPoolAreaSqm => "largest_pool_area_sqm",
            Attribute::ShadeCoveragePercent => "shade_coverage_percent",
            Attribute::PoolOpenHours => "pool_open_hours",
            Attribute::CleanlinessRating => "cleanliness_rating",
            Attribute::WaterQualityRating => "water_quality_rating",
            Attribute::SunbedAvailabilityRating => "sunbed_availability_rating",
            Attribute::QuietnessRating => "quietness_rating",
            Attribute::StaffServiceRating => "staff_service_rating",
            Attribute::PoolsideFoodRating => "poolside_food_rating",
            Attribute::KidsFacilitiesRating => "kids_facilities_rating",
            Attribute::ViewRating => "view_rating",
            Attribute::HasHeatedPool => "has_heated_pool",
            Attribute::HasKidsPool => "has_kids_pool",
            Attribute::HasWaterslides => "has_waterslides",
            Attribute::HasLazyRiver => "has_lazy_river",
            Attribute::HasWavePool => "has_wave_pool",
            Attribute::HasAdultsOnlyPool => "has_adults_only_pool",
            Attribute::HasInfinityPool => "has_infinity_pool",
            Attribute::HasIndoorPool => "has_indoor_pool",
            Attribute::HasPoolBar => "has_pool_bar",
            Attribute::HasSwimUpBar => "has_swim_up_bar",
            Attribute::HasLifeguard => "has_lifeguard",
            Attribute::HasCabanas => "has_cabanas",
            Attribute::HasFreeTowels => "has_free_towels",
            Attribute::EnforcesSunbedPolicy => "enforces_sunbed_policy",
            Attribute::HostsPoolParties => "hosts_pool_parties",
            Attribute::WheelchairAccessible => "wheelchair_accessible",
            Attribute::HasPoolHoist => "has_pool_hoist",
            Attribute::HasStepFreeEntry => "has_step_free_entry",
            Attribute::HasShallowArea => "has_shallow_area",
            Attribute::HasChangingRooms => "has_changing_rooms",
            Attribute::Atmosphere => "atmosphere",
            Attribute::MusicLevel => "music_level",
            Attribute::CrowdLevel => "crowd_level",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|attribute| attribute.name().eq_ignore_ascii_case(needle))
    }

    pub const fn kind(self) -> AttributeKind {
        match self {
            Attribute::SunbedToGuestRatio => AttributeKind::Ratio,
            Attribute::PoolCount | Attribute::LargestPoolAreaSqm => AttributeKind::Count,
            Attribute::ShadeCoveragePercent => AttributeKind::Percent,
            Attribute::PoolOpenHours => AttributeKind::Hours,
            Attribute::CleanlinessRating
            | Attribute::WaterQualityRating
            | Attribute::SunbedAvailabilityRating
            | Attribute::QuietnessRating
            | Attribute::StaffServiceRating
            | Attribute::PoolsideFoodRating
            | Attribute::KidsFacilitiesRating
            | Attribute::ViewRating => AttributeKind::Rating,
            Attribute::Atmosphere | Attribute::MusicLevel | Attribute::CrowdLevel => {
                AttributeKind::Level
            }
            _ => AttributeKind::Flag,
        }
    }

    /// Read the attribute from a pool record. `None` when the value was never recorded.
    pub fn read(self, pool: &PoolCriteria) -> Option<AttributeValue> {
        use AttributeValue::{Count, Flag, Hours, Level, Percent, Rating, Ratio};

        match self {
            Attribute::SunbedToGuestRatio => pool.sunbed_to_guest_ratio.map(Ratio),
            Attribute::PoolCount => pool.pool_count.map(Count),
            Attribute::LargestPoolAreaSqm => pool.largest_pool_area_sqm.map(Count),
            Attribute::ShadeCoveragePercent => pool.shade_coverage_percent.map(Percent),
            Attribute::PoolOpenHours => pool.pool_open_hours.map(Hours),
            Attribute::CleanlinessRating => pool.cleanliness_rating.map(Rating),
            Attribute::WaterQualityRating => pool.water_quality_rating.map(Rating),
            Attribute::SunbedAvailabilityRating => pool.sunbed_availability_rating.map(Rating),
            Attribute::QuietnessRating => pool.quietness_rating.map(Rating),
            Attribute::StaffServiceRating => pool.staff_service_rating.map(Rating),
            Attribute::PoolsideFoodRating => pool.poolside_food_rating.map(Rating),
            Attribute::KidsFacilitiesRating => pool.kids_facilities_rating.map(Rating),
            Attribute::ViewRating => pool.view_rating.map(Rating),
            Attribute::HasHeatedPool => pool.has_heated_pool.map(Flag),
            Attribute::HasKidsPool => pool.has_kids_pool.map(Flag),
            Attribute::HasWaterslides => pool.has_waterslides.map(Flag),
            Attribute::HasLazyRiver => pool.has_lazy_river.map(Flag),
            Attribute::HasWavePool => pool.has_wave_pool.map(Flag),
            Attribute::HasAdultsOnlyPool => pool.has_adults_only_pool.map(Flag),
            Attribute::HasInfinityPool => pool.has_infinity_pool.map(Flag),
            Attribute::HasIndoorPool => pool.has_indoor_pool.map(Flag),
            Attribute::HasPoolBar => pool.has_pool_bar.map(Flag),
            Attribute::HasSwimUpBar => pool.has_swim_up_bar.map(Flag),
            Attribute::HasLifeguard => pool.has_lifeguard.map(Flag),
            Attribute::HasCabanas => pool.has_cabanas.map(Flag),
            Attribute::HasFreeTowels => pool.has_free_towels.map(Flag),
            Attribute::EnforcesSunbedPolicy => pool.enforces_sunbed_policy.map(Flag),
            Attribute::HostsPoolParties => pool.hosts_pool_parties.map(Flag),
            Attribute::WheelchairAccessible => pool.wheelchair_accessible.map(Flag),
            Attribute::HasPoolHoist => pool.has_pool_hoist.map(Flag),
            Attribute::HasStepFreeEntry => pool.has_step_free_entry.map(Flag),
            Attribute::HasShallowArea => pool.has_shallow_area.map(Flag),
            Attribute::HasChangingRooms => pool.has_changing_rooms.map(Flag),
            Attribute::Atmosphere => pool.atmosphere.map(|level| Level(level.as_str())),
            Attribute::MusicLevel => pool.music_level.map(|level| Level(level.as_str())),
            Attribute::CrowdLevel => pool.crowd_level.map(|level| Level(level.as_str())),
        }
    }

    /// Parse `raw` and store it on `pool`. A blank cell clears the attribute.
    pub fn assign(self, pool: &mut PoolCriteria, raw: &str) -> Result<(), AttributeError> {
        let raw = raw.trim();
        let blank = raw.is_empty();

        match self {
            Attribute::SunbedToGuestRatio => {
                pool.sunbed_to_guest_ratio = self.parse_or_clear(raw, blank, parse_ratio)?
            }
            Attribute::PoolCount => {
                pool.pool_count = self.parse_or_clear(raw, blank, parse_count)?
            }
            Attribute::LargestPoolAreaSqm => {
                pool.largest_pool_area_sqm = self.parse_or_clear(raw, blank, parse_count)?
            }
            Attribute::ShadeCoveragePercent => {
                pool.shade_coverage_percent = self.parse_or_clear(raw, blank, parse_percent)?
            }
            Attribute::PoolOpenHours => {
                pool.pool_open_hours = self.parse_or_clear(raw, blank, parse_hours)?
            }
            Attribute::CleanlinessRating => {
                pool.cleanliness_rating = self.parse_or_clear(raw, blank, parse_rating)?
            }
            Attribute::WaterQualityRating => {
                pool.water_quality_rating = self.parse_or_clear(raw, blank, parse_rating)?
            }
            Attribute::SunbedAvailabilityRating => {
                pool.sunbed_availability_rating = self.parse_or_clear(raw, blank, parse_rating)?
            }
            Attribute::QuietnessRating => {
                pool.quietness_rating = self.parse_or_clear(raw, blank, parse_rating)?
            }
            Attribute::StaffServiceRating => {
                pool.staff_service_rating = self.parse_or_clear(raw, blank, parse_rating)?
            }
            Attribute::PoolsideFoodRating => {
                pool.poolside_food_rating = self.parse_or_clear(raw, blank, parse_rating)?
            }
            Attribute::KidsFacilitiesRating => {
                pool.kids_facilities_rating = self.parse_or_clear(raw, blank, parse_rating)?
            }
            Attribute::ViewRating => {
                pool.view_rating = self.parse_or_clear(raw, blank, parse_rating)?
            }
            Attribute::Atmosphere => {
                pool.atmosphere = self.parse_or_clear(raw, blank, Atmosphere::parse)?
            }
            Attribute::MusicLevel => {
                pool.music_level = self.parse_or_clear(raw, blank, MusicLevel::parse)?
            }
            Attribute::CrowdLevel => {
                pool.crowd_level = self.parse_or_clear(raw, blank, CrowdLevel::parse)?
            }
            flag => {
                let value = self.parse_or_clear(raw, blank, parse_flag)?;
                if let Some(slot) = flag.flag_slot(pool) {
                    *slot = value;
                }
            }
        }

        Ok(())
    }

    /// Parse a standalone value the way an imported cell would be stored.
    pub fn parse_value(self, raw: &str) -> Option<AttributeValue> {
        let mut scratch = PoolCriteria::default();
        self.assign(&mut scratch, raw).ok()?;
        self.read(&scratch)
    }

    fn flag_slot(self, pool: &mut PoolCriteria) -> Option<&mut Option<bool>> {
        let slot = match self {
            Attribute::HasHeatedPool => &mut pool.has_heated_pool,
            Attribute::HasKidsPool => &mut pool.has_kids_pool,
            Attribute::HasWaterslides => &mut pool.has_waterslides,
            Attribute::HasLazyRiver => &mut pool.has_lazy_river,
            Attribute::HasWavePool => &mut pool.has_wave_pool,
            Attribute::HasAdultsOnlyPool => &mut pool.has_adults_only_pool,
            Attribute::HasInfinityPool => &mut pool.has_infinity_pool,
            Attribute::HasIndoorPool => &mut pool.has_indoor_pool,
            Attribute::HasPoolBar => &mut pool.has_pool_bar,
            Attribute::HasSwimUpBar => &mut pool.has_swim_up_bar,
            Attribute::HasLifeguard => &mut pool.has_lifeguard,
            Attribute::HasCabanas => &mut pool.has_cabanas,
            Attribute::HasFreeTowels => &mut pool.has_free_towels,
            Attribute::EnforcesSunbedPolicy => &mut pool.enforces_sunbed_policy,
            Attribute::HostsPoolParties => &mut pool.hosts_pool_parties,
            Attribute::WheelchairAccessible => &mut pool.wheelchair_accessible,
            Attribute::HasPoolHoist => &mut pool.has_pool_hoist,
            Attribute::HasStepFreeEntry => &mut pool.has_step_free_entry,
            Attribute::HasShallowArea => &mut pool.has_shallow_area,
            Attribute::HasChangingRooms => &mut pool.has_changing_rooms,
            Attribute::SunbedToGuestRatio
            | Attribute::PoolCount
            | Attribute::LargestPoolAreaSqm
            | Attribute::ShadeCoveragePercent
            | Attribute::PoolOpenHours
            | Attribute::CleanlinessRating
            | Attribute::WaterQualityRating
            | Attribute::SunbedAvailabilityRating
            | Attribute::QuietnessRating
            | Attribute::StaffServiceRating
            | Attribute::PoolsideFoodRating
            | Attribute::KidsFacilitiesRating
            | Attribute::ViewRating
            | Attribute::Atmosphere
            | Attribute::MusicLevel
            | Attribute::CrowdLevel => return None,
        };
        Some(slot)
    }

    fn parse_or_clear<T>(
        self,
        raw: &str,
        blank: bool,
        parse: fn(&str) -> Option<T>,
    ) -> Result<Option<T>, AttributeError> {
        if blank {
            return Ok(None);
        }

        parse(raw).map(Some).ok_or_else(|| AttributeError::InvalidValue {
            attribute: self.name(),
            value: raw.to_string(),
            expected: self.kind().expectation(),
        })
    }
}

impl AttributeKind {
    const fn expectation(self) -> &'static str {
        match self {
            AttributeKind::Flag => "yes/no, true/false, or 1/0",
            AttributeKind::Rating => "a rating between 1 and 5",
            AttributeKind::Ratio => "a non-negative decimal",
            AttributeKind::Count => "a non-negative whole number",
            AttributeKind::Percent => "a percentage between 0 and 100",
            AttributeKind::Hours => "a number of hours between 0 and 24",
            AttributeKind::Level => "one of the documented levels",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Yes/no spellings accepted by every import path.
pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn parse_rating(raw: &str) -> Option<u8> {
    raw.parse::<u8>().ok().filter(|value| (1..=5).contains(value))
}

fn parse_ratio(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok()
}

fn parse_percent(raw: &str) -> Option<u8> {
    raw.trim_end_matches('%')
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|value| *value <= 100)
}

fn parse_hours(raw: &str) -> Option<u8> {
    raw.parse::<u8>().ok().filter(|value| *value <= 24)
}

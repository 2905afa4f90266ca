use std::fmt;

use serde::{Deserialize, Serialize};

use super::attributes::{Attribute, AttributeValue};
use super::domain::PoolCriteria;

/// A scorable criterion: one attribute read through one normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    SunbedRatio,
    PoolCount,
    PoolSize,
    ShadeCoverage,
    OpeningHours,
    Cleanliness,
    WaterQuality,
    SunbedAvailability,
    Quietness,
    StaffService,
    PoolsideFood,
    KidsFacilities,
    View,
    HeatedPool,
    KidsPool,
    Waterslides,
    LazyRiver,
    WavePool,
    AdultsOnlyPool,
    InfinityPool,
    IndoorPool,
    PoolBar,
    SwimUpBar,
    Lifeguard,
    Cabanas,
    FreeTowels,
    SunbedPolicy,
    PoolParties,
    WheelchairAccess,
    PoolHoist,
    StepFreeEntry,
    ShallowArea,
    ChangingRooms,
    QuietAtmosphere,
    PartyAtmosphere,
    CalmMusic,
    PartyMusic,
    LowCrowding,
}

/// How a raw attribute value is mapped onto the `[0, 1]` contribution scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// `true` → 1, `false` → 0.
    Flag,
    /// Star rating 1–5 divided by 5.
    Rating,
    /// Linear up to `cap`, saturating above it.
    Capped { cap: f64 },
    Percent,
    /// Fixed contribution per named level.
    Levels(&'static [(&'static str, f64)]),
}

const QUIET_ATMOSPHERE: &[(&str, f64)] = &[
    ("tranquil", 1.0),
    ("relaxed", 0.75),
    ("lively", 0.25),
    ("party", 0.0),
];
const PARTY_ATMOSPHERE: &[(&str, f64)] = &[
    ("tranquil", 0.0),
    ("relaxed", 0.25),
    ("lively", 0.75),
    ("party", 1.0),
];
const CALM_MUSIC: &[(&str, f64)] = &[
    ("none", 1.0),
    ("background", 0.7),
    ("loud", 0.2),
    ("dj", 0.0),
];
const PARTY_MUSIC: &[(&str, f64)] = &[
    ("none", 0.0),
    ("background", 0.3),
    ("loud", 0.8),
    ("dj", 1.0),
];
const LOW_CROWDING: &[(&str, f64)] = &[
    ("quiet", 1.0),
    ("moderate", 0.7),
    ("busy", 0.35),
    ("packed", 0.0),
];

impl Normalization {
    /// Map a value onto `[0, 1]`. `None` when the value does not fit this normalization.
    pub fn apply(&self, value: AttributeValue) -> Option<f64> {
        let normalized = match (self, value) {
            (Normalization::Flag, AttributeValue::Flag(flag)) => {
                if flag {
                    1.0
                } else {
                    0.0
                }
            }
            (Normalization::Rating, AttributeValue::Rating(rating)) => {
                f64::from(rating.clamp(1, 5)) / 5.0
            }
            (Normalization::Percent, AttributeValue::Percent(percent)) => {
                f64::from(percent.min(100)) / 100.0
            }
            (Normalization::Capped { cap }, value) if *cap > 0.0 => {
                let number = value.as_number()?;
                if !number.is_finite() {
                    return None;
                }
                (number / cap).clamp(0.0, 1.0)
            }
            (Normalization::Levels(levels), AttributeValue::Level(level)) => levels
                .iter()
                .find(|(name, _)| *name == level)
                .map(|(_, contribution)| *contribution)?,
            _ => return None,
        };

        Some(normalized)
    }
}

impl Criterion {
    pub const ALL: [Criterion; 38] = [
        Criterion::SunbedRatio,
        Criterion::PoolCount,
        Criterion::PoolSize,
        Criterion::ShadeCoverage,
        Criterion::OpeningHours,
        Criterion::Cleanliness,
        Criterion::WaterQuality,
        Criterion::SunbedAvailability,
        Criterion::Quietness,
        Criterion::StaffService,
        Criterion::PoolsideFood,
        Criterion::KidsFacilities,
        Criterion::View,
        Criterion::HeatedPool,
        Criterion::KidsPool,
        Criterion::Waterslides,
        Criterion::LazyRiver,
        Criterion::WavePool,
        Criterion::AdultsOnlyPool,
        Criterion::InfinityPool,
        Criterion::IndoorPool,
        Criterion::PoolBar,
        Criterion::SwimUpBar,
        Criterion::Lifeguard,
        Criterion::Cabanas,
        Criterion::FreeTowels,
        Criterion::SunbedPolicy,
        Criterion::PoolParties,
        Criterion::WheelchairAccess,
        Criterion::PoolHoist,
        Criterion::StepFreeEntry,
        Criterion::ShallowArea,
        Criterion::ChangingRooms,
        Criterion::QuietAtmosphere,
        Criterion::PartyAtmosphere,
        Criterion::CalmMusic,
        Criterion::PartyMusic,
        Criterion::LowCrowding,
    ];

    /// Name, source attribute, and normalization for every criterion.
    #[rustfmt::skip]
    const fn definition(self) -> (&'static str, Attribute, Normalization) {
        use Normalization::{Capped, Flag, Levels, Percent, Rating};

        match self {
            Criterion::SunbedRatio => ("sunbed_ratio", Attribute::SunbedToGuestRatio, Capped { cap: 1.0 }),
            Criterion::PoolCount => ("pool_count", Attribute::PoolCount, Capped { cap: 4.0 }),
            Criterion::PoolSize => ("pool_size", Attribute::LargestPoolAreaSqm, Capped { cap: 400.0 }),
            Criterion::ShadeCoverage => ("shade_coverage", Attribute::ShadeCoveragePercent, Percent),
            Criterion::OpeningHours => ("opening_hours", Attribute::PoolOpenHours, Capped { cap: 12.0 }),
            Criterion::Cleanliness => ("cleanliness", Attribute::CleanlinessRating, Rating),
            Criterion::WaterQuality => ("water_quality", Attribute::WaterQualityRating, Rating),
            Criterion::SunbedAvailability => {
                ("sunbed_availability", Attribute::SunbedAvailabilityRating, Rating)
            }
            Criterion::Quietness => ("quietness", Attribute::QuietnessRating, Rating),
            Criterion::StaffService => ("staff_service", Attribute::StaffServiceRating, Rating),
            Criterion::PoolsideFood => ("poolside_food", Attribute::PoolsideFoodRating, Rating),
            Criterion::KidsFacilities => ("kids_facilities", Attribute::KidsFacilitiesRating, Rating),
            Criterion::View => ("view", Attribute::ViewRating, Rating),
            Criterion::HeatedPool => ("heated_pool", Attribute::HasHeatedPool, Flag),
            Criterion::KidsPool => ("kids_pool", Attribute::HasKidsPool, Flag),
            Criterion::Waterslides => ("waterslides", Attribute::HasWaterslides, Flag),
            Criterion::LazyRiver => ("lazy_river", Attribute::HasLazyRiver, Flag),
            Criterion::WavePool => ("wave_pool", Attribute::HasWavePool, Flag),
            Criterion::AdultsOnlyPool => ("adults_only_pool", Attribute::HasAdultsOnlyPool, Flag),
            Criterion::InfinityPool => ("infinity_pool", Attribute::HasInfinityPool, Flag),
            Criterion::IndoorPool => ("indoor_pool", Attribute::HasIndoorPool, Flag),
            Criterion::PoolBar => ("pool_bar", Attribute::HasPoolBar, Flag),
            Criterion::SwimUpBar => ("swim_up_bar", Attribute::HasSwimUpBar, Flag),
            Criterion::Lifeguard => ("lifeguard", Attribute::HasLifeguard, Flag),
            Criterion::Cabanas => ("cabanas", Attribute::HasCabanas, Flag),
            Criterion::FreeTowels => ("free_towels", Attribute::HasFreeTowels, Flag),
            Criterion::SunbedPolicy => ("sunbed_policy", Attribute::EnforcesSunbedPolicy, Flag),
            Criterion::PoolParties => ("pool_parties", Attribute::HostsPoolParties, Flag),
            Criterion::WheelchairAccess => {
                ("wheelchair_access", Attribute::WheelchairAccessible, Flag)
            }
            Criterion::PoolHoist => ("pool_hoist", Attribute::HasPoolHoist, Flag),
            Criterion::StepFreeEntry => ("step_free_entry", Attribute::HasStepFreeEntry, Flag),
            Criterion::ShallowArea => ("shallow_area", Attribute::HasShallowArea, Flag),
            Criterion::ChangingRooms => ("changing_rooms", Attribute::HasChangingRooms, Flag),
            Criterion::QuietAtmosphere => {
                ("quiet_atmosphere", Attribute::Atmosphere, Levels(QUIET_ATMOSPHERE))
            }
            Criterion::PartyAtmosphere => {
                ("party_atmosphere", Attribute::Atmosphere, Levels(PARTY_ATMOSPHERE))
            }
            Criterion::CalmMusic => ("calm_music", Attribute::MusicLevel, Levels(CALM_MUSIC)),
            Criterion::PartyMusic => ("party_music", Attribute::MusicLevel, Levels(PARTY_MUSIC)),
            Criterion::LowCrowding => ("low_crowding", Attribute::CrowdLevel, Levels(LOW_CROWDING)),
        }
    }

    pub const fn name(self) -> &'static str {
        self.definition().0
    }

    pub const fn attribute(self) -> Attribute {
        self.definition().1
    }

    pub const fn normalization(self) -> Normalization {
        self.definition().2
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|criterion| criterion.name().eq_ignore_ascii_case(needle))
    }

    /// Normalized `[0, 1]` contribution for a pool record, `None` when the attribute is missing.
    pub fn contribution(self, pool: &PoolCriteria) -> Option<f64> {
        let raw = self.attribute().read(pool)?;
        self.normalization().apply(raw)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::criteria::Criterion;

/// Upper bound accepted for any single weight.
pub const MAX_WEIGHT: f64 = 5.0;

/// The four published scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreType {
    Overall,
    Family,
    Quiet,
    Party,
}

impl ScoreType {
    pub const ALL: [ScoreType; 4] = [
        ScoreType::Overall,
        ScoreType::Family,
        ScoreType::Quiet,
        ScoreType::Party,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ScoreType::Overall => "overall",
            ScoreType::Family => "family",
            ScoreType::Quiet => "quiet",
            ScoreType::Party => "party",
        }
    }
}

/// Clamp a weight into `[0, MAX_WEIGHT]`; non-finite input counts as 0.
pub fn clamp_weight(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_WEIGHT)
    } else {
        0.0
    }
}

/// Admin-editable weighting for one criterion.
///
/// Weights are clamped whenever they enter the struct (constructor, setters, and
/// deserialization), so the calculator can use them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawScoringWeight")]
pub struct ScoringWeight {
    criterion: Criterion,
    overall: f64,
    family: f64,
    quiet: f64,
    party: f64,
    pub is_active: bool,
    pub is_visible: bool,
    pub is_public: bool,
}

#[derive(Deserialize)]
struct RawScoringWeight {
    criterion: Criterion,
    #[serde(default)]
    overall: f64,
    #[serde(default)]
    family: f64,
    #[serde(default)]
    quiet: f64,
    #[serde(default)]
    party: f64,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default = "default_true")]
    is_visible: bool,
    #[serde(default = "default_true")]
    is_public: bool,
}

fn default_true() -> bool {
    true
}

impl From<RawScoringWeight> for ScoringWeight {
    fn from(raw: RawScoringWeight) -> Self {
        let mut weight =
            ScoringWeight::new(raw.criterion, raw.overall, raw.family, raw.quiet, raw.party);
        weight.is_active = raw.is_active;
        weight.is_visible = raw.is_visible;
        weight.is_public = raw.is_public;
        weight
    }
}

impl ScoringWeight {
    /// Active, visible, and public row with clamped weights.
    pub fn new(criterion: Criterion, overall: f64, family: f64, quiet: f64, party: f64) -> Self {
        Self {
            criterion,
            overall: clamp_weight(overall),
            family: clamp_weight(family),
            quiet: clamp_weight(quiet),
            party: clamp_weight(party),
            is_active: true,
            is_visible: true,
            is_public: true,
        }
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn weight(&self, score_type: ScoreType) -> f64 {
        match score_type {
            ScoreType::Overall => self.overall,
            ScoreType::Family => self.family,
            ScoreType::Quiet => self.quiet,
            ScoreType::Party => self.party,
        }
    }

    pub fn set_weight(&mut self, score_type: ScoreType, value: f64) {
        let value = clamp_weight(value);
        match score_type {
            ScoreType::Overall => self.overall = value,
            ScoreType::Family => self.family = value,
            ScoreType::Quiet => self.quiet = value,
            ScoreType::Party => self.party = value,
        }
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Presentation flag only; scoring ignores it.
    pub fn is_publicly_listed(&self) -> bool {
        self.is_visible && self.is_public
    }
}

/// Partial edit of one weight row. Fields left out keep their stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPatch {
    pub criterion: Criterion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiet: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl WeightPatch {
    pub fn new(criterion: Criterion) -> Self {
        Self {
            criterion,
            overall: None,
            family: None,
            quiet: None,
            party: None,
            is_active: None,
            is_visible: None,
            is_public: None,
        }
    }

    pub fn with_weight(mut self, score_type: ScoreType, value: f64) -> Self {
        let slot = match score_type {
            ScoreType::Overall => &mut self.overall,
            ScoreType::Family => &mut self.family,
            ScoreType::Quiet => &mut self.quiet,
            ScoreType::Party => &mut self.party,
        };
        *slot = Some(value);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }

    /// Merge onto `row`; unknown criteria start from an all-zero, listed row.
    fn merge(&self, row: Option<&ScoringWeight>) -> ScoringWeight {
        let mut merged = row
            .cloned()
            .unwrap_or_else(|| ScoringWeight::new(self.criterion, 0.0, 0.0, 0.0, 0.0));
        for (score_type, value) in [
            (ScoreType::Overall, self.overall),
            (ScoreType::Family, self.family),
            (ScoreType::Quiet, self.quiet),
            (ScoreType::Party, self.party),
        ] {
            if let Some(value) = value {
                merged.set_weight(score_type, value);
            }
        }
        if let Some(active) = self.is_active {
            merged.is_active = active;
        }
        if let Some(visible) = self.is_visible {
            merged.is_visible = visible;
        }
        if let Some(public) = self.is_public {
            merged.is_public = public;
        }
        merged
    }
}

/// A full row replaces every stored field.
impl From<ScoringWeight> for WeightPatch {
    fn from(weight: ScoringWeight) -> Self {
        Self {
            criterion: weight.criterion,
            overall: Some(weight.overall),
            family: Some(weight.family),
            quiet: Some(weight.quiet),
            party: Some(weight.party),
            is_active: Some(weight.is_active),
            is_visible: Some(weight.is_visible),
            is_public: Some(weight.is_public),
        }
    }
}

/// Snapshot of the weight configuration used for one calculation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ScoringWeight>", into = "Vec<ScoringWeight>")]
pub struct WeightTable {
    weights: BTreeMap<Criterion, ScoringWeight>,
}

impl From<Vec<ScoringWeight>> for WeightTable {
    fn from(rows: Vec<ScoringWeight>) -> Self {
        rows.into_iter().collect()
    }
}

impl From<WeightTable> for Vec<ScoringWeight> {
    fn from(table: WeightTable) -> Self {
        table.weights.into_values().collect()
    }
}

impl FromIterator<ScoringWeight> for WeightTable {
    fn from_iter<I: IntoIterator<Item = ScoringWeight>>(iter: I) -> Self {
        let mut table = WeightTable::default();
        for weight in iter {
            table.upsert(weight);
        }
        table
    }
}

impl WeightTable {
    /// Insert or replace the row for the weight's criterion. Later rows win.
    pub fn upsert(&mut self, weight: ScoringWeight) {
        self.weights.insert(weight.criterion, weight);
    }

    /// Apply a batch of admin edits, returning how many rows changed.
    pub fn apply(&mut self, patches: impl IntoIterator<Item = WeightPatch>) -> usize {
        let mut changed = 0;
        for patch in patches {
            let current = self.weights.get(&patch.criterion);
            let merged = patch.merge(current);
            if current != Some(&merged) {
                changed += 1;
            }
            self.upsert(merged);
        }
        changed
    }

    pub fn get(&self, criterion: Criterion) -> Option<&ScoringWeight> {
        self.weights.get(&criterion)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Rows in criterion order.
    pub fn iter(&self) -> impl Iterator<Item = &ScoringWeight> {
        self.weights.values()
    }

    /// Rows that take part in scoring.
    pub fn active(&self) -> impl Iterator<Item = &ScoringWeight> {
        self.weights.values().filter(|weight| weight.is_active)
    }

    /// Criteria surfaced on public hotel pages.
    pub fn public_criteria(&self) -> Vec<&ScoringWeight> {
        self.weights
            .values()
            .filter(|weight| weight.is_publicly_listed())
            .collect()
    }

    /// Seed configuration shipped with the application.
    pub fn standard() -> Self {
        STANDARD_WEIGHTS
            .iter()
            .map(|&(criterion, overall, family, quiet, party)| {
                let weight = ScoringWeight::new(criterion, overall, family, quiet, party);
                if criterion == Criterion::PoolHoist {
                    weight.hidden()
                } else {
                    weight
                }
            })
            .collect()
    }
}

#[rustfmt::skip]
const STANDARD_WEIGHTS: [(Criterion, f64, f64, f64, f64); 38] = [
    // criterion                     overall family quiet party
    (Criterion::SunbedRatio,         2.5,    2.0,   2.0,  1.5),
    (Criterion::PoolCount,           1.5,    2.0,   0.5,  1.5),
    (Criterion::PoolSize,            1.5,    1.5,   1.0,  2.0),
    (Criterion::ShadeCoverage,       1.0,    2.0,   1.5,  0.5),
    (Criterion::OpeningHours,        1.0,    1.0,   0.5,  2.0),
    (Criterion::Cleanliness,         3.0,    3.0,   2.0,  1.5),
    (Criterion::WaterQuality,        3.0,    3.0,   2.0,  1.0),
    (Criterion::SunbedAvailability,  2.0,    2.0,   2.0,  1.0),
    (Criterion::Quietness,           1.0,    0.5,   5.0,  0.0),
    (Criterion::StaffService,        2.0,    1.5,   1.5,  1.5),
    (Criterion::PoolsideFood,        1.5,    1.5,   1.0,  2.0),
    (Criterion::KidsFacilities,      1.0,    5.0,   0.0,  0.0),
    (Criterion::View,                1.5,    0.5,   2.0,  1.0),
    (Criterion::HeatedPool,          1.5,    2.0,   1.0,  0.5),
    (Criterion::KidsPool,            0.5,    5.0,   0.0,  0.0),
    (Criterion::Waterslides,         1.0,    4.0,   0.0,  1.0),
    (Criterion::LazyRiver,           0.5,    3.0,   0.5,  1.0),
    (Criterion::WavePool,            0.5,    3.0,   0.0,  1.5),
    (Criterion::AdultsOnlyPool,      1.0,    0.0,   4.0,  1.0),
    (Criterion::InfinityPool,        1.5,    0.5,   2.0,  1.5),
    (Criterion::IndoorPool,          0.5,    1.0,   1.0,  0.0),
    (Criterion::PoolBar,             1.0,    0.5,   0.0,  3.0),
    (Criterion::SwimUpBar,           1.0,    0.0,   0.0,  4.0),
    (Criterion::Lifeguard,           1.0,    4.0,   0.5,  0.5),
    (Criterion::Cabanas,             1.0,    1.0,   1.5,  1.5),
    (Criterion::FreeTowels,          1.0,    1.0,   1.0,  0.5),
    (Criterion::SunbedPolicy,        1.0,    1.0,   1.5,  0.0),
    (Criterion::PoolParties,         0.0,    0.0,   0.0,  5.0),
    (Criterion::WheelchairAccess,    1.5,    1.0,   1.0,  0.5),
    (Criterion::PoolHoist,           1.0,    0.5,   0.5,  0.0),
    (Criterion::StepFreeEntry,       1.0,    1.5,   0.5,  0.0),
    (Criterion::ShallowArea,         0.5,    4.0,   0.0,  0.0),
    (Criterion::ChangingRooms,       1.0,    1.5,   0.5,  0.5),
    (Criterion::QuietAtmosphere,     1.0,    0.5,   5.0,  0.0),
    (Criterion::PartyAtmosphere,     0.5,    0.0,   0.0,  5.0),
    (Criterion::CalmMusic,           0.5,    0.5,   4.0,  0.0),
    (Criterion::PartyMusic,          0.0,    0.0,   0.0,  4.0),
    (Criterion::LowCrowding,         1.5,    1.0,   4.0,  0.0),
];

mod rule;

pub use rule::{BadgeCriterion, BadgeField, BadgeRule, BadgeRuleError, Operator};

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{Hotel, HotelId};

/// Identifier wrapper for badges.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BadgeId(pub String);

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Badge definition with display metadata and its eligibility criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub criteria: Vec<BadgeCriterion>,
}

impl Badge {
    pub fn rules(&self) -> Result<BadgeRuleSet, BadgeRuleError> {
        BadgeRuleSet::compile(&self.criteria)
    }
}

/// Validated criteria combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeRuleSet {
    rules: Vec<BadgeRule>,
}

impl BadgeRuleSet {
    /// Validate every criterion, failing on the first malformed entry.
    pub fn compile(criteria: &[BadgeCriterion]) -> Result<Self, BadgeRuleError> {
        let rules = criteria
            .iter()
            .enumerate()
            .map(|(index, criterion)| BadgeRule::compile(index, criterion))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[BadgeRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// An empty rule set never matches.
    pub fn matches(&self, hotel: &Hotel) -> bool {
        !self.rules.is_empty() && self.rules.iter().all(|rule| rule.matches(hotel))
    }

    /// Side-effect-free evaluation over a set of hotels.
    pub fn preview<'a, I>(&self, hotels: I) -> BadgePreview
    where
        I: IntoIterator<Item = &'a Hotel>,
    {
        let hotels: Vec<MatchedHotel> = hotels
            .into_iter()
            .filter(|hotel| self.matches(hotel))
            .map(|hotel| MatchedHotel {
                hotel_id: hotel.id.clone(),
                name: hotel.name.clone(),
            })
            .collect();

        BadgePreview {
            matched: hotels.len(),
            hotels,
        }
    }

    /// Work out which hotels gain or lose `badge_id`, without touching them.
    pub fn plan_assignment<'a, I>(&self, badge_id: &BadgeId, hotels: I) -> BadgeAssignment
    where
        I: IntoIterator<Item = &'a Hotel>,
    {
        let mut assignment = BadgeAssignment {
            badge_id: badge_id.clone(),
            assigned: Vec::new(),
            revoked: Vec::new(),
            retained: 0,
        };

        for hotel in hotels {
            let qualifies = self.matches(hotel);
            let holds = hotel.badges.contains(badge_id);
            match (qualifies, holds) {
                (true, false) => assignment.assigned.push(hotel.id.clone()),
                (false, true) => assignment.revoked.push(hotel.id.clone()),
                (true, true) => assignment.retained += 1,
                (false, false) => {}
            }
        }

        assignment
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedHotel {
    pub hotel_id: HotelId,
    pub name: String,
}

/// Preview output: how many hotels qualify and which ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgePreview {
    pub matched: usize,
    pub hotels: Vec<MatchedHotel>,
}

/// Association changes produced when a badge is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeAssignment {
    pub badge_id: BadgeId,
    pub assigned: Vec<HotelId>,
    pub revoked: Vec<HotelId>,
    pub retained: usize,
}

impl BadgeAssignment {
    pub fn is_noop(&self) -> bool {
        self.assigned.is_empty() && self.revoked.is_empty()
    }
}

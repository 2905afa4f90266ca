use super::super::criteria::Criterion;
use super::super::domain::PoolCriteria;
use super::super::weights::{ScoreType, WeightTable};
use super::{to_scale, ScoreComponent};

/// Running weighted sum for one score type.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Tally {
    weighted: f64,
    total_weight: f64,
}

impl Tally {
    fn add(&mut self, weight: f64, contribution: f64) {
        // Zero weight means "not counted", so it must not reach the denominator.
        if weight > 0.0 {
            self.weighted += weight * contribution;
            self.total_weight += weight;
        }
    }

    pub(crate) fn finish(self) -> Option<f64> {
        if self.total_weight > 0.0 {
            Some(to_scale(self.weighted / self.total_weight))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Tallies {
    overall: Tally,
    family: Tally,
    quiet: Tally,
    party: Tally,
}

impl Tallies {
    pub(crate) fn get(&self, score_type: ScoreType) -> Tally {
        match score_type {
            ScoreType::Overall => self.overall,
            ScoreType::Family => self.family,
            ScoreType::Quiet => self.quiet,
            ScoreType::Party => self.party,
        }
    }

    fn get_mut(&mut self, score_type: ScoreType) -> &mut Tally {
        match score_type {
            ScoreType::Overall => &mut self.overall,
            ScoreType::Family => &mut self.family,
            ScoreType::Quiet => &mut self.quiet,
            ScoreType::Party => &mut self.party,
        }
    }
}

pub(crate) fn tally_pool(
    pool: &PoolCriteria,
    weights: &WeightTable,
) -> (Vec<ScoreComponent>, Vec<Criterion>, Tallies) {
    let mut components = Vec::new();
    let mut missing = Vec::new();
    let mut tallies = Tallies::default();

    for weight in weights.active() {
        let criterion = weight.criterion();
        let Some(contribution) = criterion.contribution(pool) else {
            missing.push(criterion);
            continue;
        };

        let mut counted_in = Vec::new();
        for score_type in ScoreType::ALL {
            let value = weight.weight(score_type);
            tallies.get_mut(score_type).add(value, contribution);
            if value > 0.0 {
                counted_in.push(score_type.label());
            }
        }

        let notes = if counted_in.is_empty() {
            format!("{criterion} has zero weight for every score")
        } else {
            format!(
                "{criterion} contributes {:.2} to {}",
                contribution,
                counted_in.join(", ")
            )
        };

        components.push(ScoreComponent {
            criterion,
            contribution,
            notes,
        });
    }

    (components, missing, tallies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_weight_is_excluded_from_denominator() {
        let mut tally = Tally::default();
        tally.add(2.0, 1.0);
        tally.add(0.0, 0.0);
        assert_eq!(tally.finish(), Some(10.0));
    }

    #[test]
    fn empty_tally_has_no_score() {
        assert_eq!(Tally::default().finish(), None);
    }

    #[test]
    fn weighted_average_is_rounded_to_one_decimal() {
        let mut tally = Tally::default();
        tally.add(1.0, 1.0);
        tally.add(2.0, 0.0);
        // 1/3 of the scale.
        assert_eq!(tally.finish(), Some(3.3));
    }
}

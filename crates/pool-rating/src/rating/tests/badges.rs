use super::common::*;
use crate::rating::badges::{BadgeCriterion, BadgeId, BadgeRuleError, BadgeRuleSet};
use crate::rating::domain::HotelId;

fn rules(criteria: &[BadgeCriterion]) -> BadgeRuleSet {
    BadgeRuleSet::compile(criteria).expect("criteria compile")
}

#[test]
fn numeric_threshold_matches_only_qualifying_hotels() {
    let spotless = spotless_badge().rules().expect("badge compiles");
    let hotels = vec![family_resort(), quiet_retreat(), unsurveyed_hotel()];

    let preview = spotless.preview(&hotels);

    assert_eq!(preview.matched, 1);
    assert_eq!(preview.hotels[0].hotel_id, HotelId("h-family".to_string()));
    assert_eq!(preview.hotels[0].name, "Splash Bay Resort");
}

#[test]
fn criteria_are_combined_with_and() {
    let set = rules(&[
        BadgeCriterion::new("cleanliness_rating", ">=", "3"),
        BadgeCriterion::new("has_adults_only_pool", "==", "true"),
    ]);

    assert!(set.matches(&quiet_retreat()));
    assert!(!set.matches(&family_resort()));
}

#[test]
fn empty_rule_set_never_matches() {
    let set = rules(&[]);

    assert!(set.is_empty());
    assert!(!set.matches(&family_resort()));
    assert_eq!(set.preview(&[family_resort(), quiet_retreat()]).matched, 0);
}

#[test]
fn missing_values_never_satisfy_a_rule() {
    let not_party = rules(&[BadgeCriterion::new("atmosphere", "!=", "party")]);
    let pool_bar = rules(&[BadgeCriterion::new("has_pool_bar", "==", "true")]);

    assert!(!not_party.matches(&unsurveyed_hotel()));
    assert!(not_party.matches(&quiet_retreat()));
    assert!(!pool_bar.matches(&family_resort()), "pool bar was never surveyed");
    assert!(pool_bar.matches(&quiet_retreat()));
}

#[test]
fn level_comparisons_ignore_case() {
    let tranquil = rules(&[BadgeCriterion::new("atmosphere", "==", "TRANQUIL")]);
    let ordered = rules(&[BadgeCriterion::new("atmosphere", ">", "lively")]);

    assert!(tranquil.matches(&quiet_retreat()));
    assert!(!ordered.matches(&quiet_retreat()));
    assert!(!ordered.matches(&family_resort()));
}

#[test]
fn single_equals_is_accepted_as_equality() {
    let set = rules(&[BadgeCriterion::new("pool_count", "=", "3")]);

    assert!(set.matches(&family_resort()));
}

#[test]
fn score_fields_read_cached_scores() {
    let set = rules(&[BadgeCriterion::new("quiet_score", ">=", "9")]);
    let mut retreat = quiet_retreat();

    assert!(!set.matches(&retreat), "scores have not been calculated yet");

    retreat.scores.quiet = Some(9.7);
    assert!(set.matches(&retreat));
}

#[test]
fn compile_reports_position_of_bad_criterion() {
    let result = BadgeRuleSet::compile(&[
        BadgeCriterion::new("cleanliness_rating", ">=", "4"),
        BadgeCriterion::new("jacuzzi_count", ">", "1"),
    ]);

    assert_eq!(
        result,
        Err(BadgeRuleError::UnknownField {
            index: 1,
            field: "jacuzzi_count".to_string(),
        })
    );
}

#[test]
fn assignment_plan_adds_and_revokes() {
    let spotless = spotless_badge().rules().expect("badge compiles");
    let badge_id = BadgeId("spotless".to_string());
    let mut retreat = quiet_retreat();
    retreat.badges.insert(badge_id.clone());
    let hotels = vec![family_resort(), retreat, unsurveyed_hotel()];

    let plan = spotless.plan_assignment(&badge_id, &hotels);

    assert_eq!(plan.assigned, vec![HotelId("h-family".to_string())]);
    assert_eq!(plan.revoked, vec![HotelId("h-quiet".to_string())]);
    assert_eq!(plan.retained, 0);
    assert!(!plan.is_noop());
}

#[test]
fn flag_rules_accept_numeric_and_yes_no_spellings() {
    let retreat = quiet_retreat();
    let resort = family_resort();

    assert!(rules(&[BadgeCriterion::new("has_pool_bar", "==", "1")]).matches(&retreat));
    assert!(rules(&[BadgeCriterion::new("has_pool_bar", "==", "yes")]).matches(&retreat));
    assert!(!rules(&[BadgeCriterion::new("has_pool_bar", "!=", "1")]).matches(&retreat));
    assert!(!rules(&[BadgeCriterion::new("has_pool_bar", "==", "0")]).matches(&retreat));

    assert!(rules(&[BadgeCriterion::new("has_swim_up_bar", "==", "0")]).matches(&resort));
    assert!(rules(&[BadgeCriterion::new("has_swim_up_bar", "!=", "1")]).matches(&resort));
    assert!(!rules(&[BadgeCriterion::new("has_swim_up_bar", "==", "n")]).matches(&retreat));
}

#[test]
fn music_level_none_matches_silent_pools() {
    let none = rules(&[BadgeCriterion::new("music_level", "==", "none")]);
    let silent = rules(&[BadgeCriterion::new("music_level", "==", "silent")]);

    assert!(none.matches(&quiet_retreat()));
    assert!(silent.matches(&quiet_retreat()));
    assert!(!none.matches(&family_resort()));
}

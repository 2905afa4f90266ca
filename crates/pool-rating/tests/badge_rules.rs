use pool_rating::rating::{
    Badge, BadgeCriterion, BadgeId, BadgeRuleSet, Hotel, HotelSheetImporter, PoolCriteria,
};

fn rated(id: &str, cleanliness: u8) -> Hotel {
    Hotel::new(id, format!("Hotel {id}"), "mallorca").with_pool(PoolCriteria {
        cleanliness_rating: Some(cleanliness),
        ..PoolCriteria::default()
    })
}

#[test]
fn cleanliness_threshold_splits_hotels() {
    let criterion: BadgeCriterion = "cleanliness_rating>=4".parse().expect("compact form parses");
    let rules = BadgeRuleSet::compile(&[criterion]).expect("rule compiles");

    assert!(rules.matches(&rated("h-1", 5)));
    assert!(rules.matches(&rated("h-2", 4)));
    assert!(!rules.matches(&rated("h-3", 3)));
}

#[test]
fn badge_without_criteria_matches_nothing() {
    let badge = Badge {
        id: BadgeId("empty".to_string()),
        name: "Empty".to_string(),
        description: None,
        icon: None,
        color: None,
        criteria: Vec::new(),
    };
    let rules = badge.rules().expect("empty rule set compiles");

    assert!(!rules.matches(&rated("h-1", 5)));
}

#[test]
fn family_badge_over_sample_sheet() {
    let data = include_bytes!("../sample_hotels.csv");
    let hotels = HotelSheetImporter::from_reader(&data[..]).expect("sample hotels import");
    let rules = BadgeRuleSet::compile(&[
        BadgeCriterion::new("has_kids_pool", "==", "true"),
        BadgeCriterion::new("has_lifeguard", "==", "true"),
    ])
    .expect("rules compile");
    let preview = rules.preview(&hotels);

    assert_eq!(preview.matched, 1);
    assert_eq!(preview.hotels[0].hotel_id.0, "h-101");
}

#[test]
fn badge_definitions_accept_numeric_json_values() {
    let badge: Badge = serde_json::from_str(
        r#"{
            "id": "big-pool",
            "name": "Big Pool",
            "icon": "waves",
            "criteria": [{ "field": "largest_pool_area_sqm", "operator": ">", "value": 300 }]
        }"#,
    )
    .expect("badge parses");
    let data = include_bytes!("../sample_hotels.csv");
    let hotels = HotelSheetImporter::from_reader(&data[..]).expect("sample hotels import");

    let preview = badge.rules().expect("rules compile").preview(&hotels);

    let ids: Vec<&str> = preview
        .hotels
        .iter()
        .map(|hotel| hotel.hotel_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["h-101", "h-103"]);
}

use pool_rating::rating::{
    Criterion, HotelSheetImporter, ImportError, ScoreType, SubscriptionTier, WeightTable,
    WeightTableImporter,
};

#[test]
fn standard_weights_export_matches_seed_table() {
    let data = include_bytes!("../standard_weights.csv");

    let table = WeightTableImporter::from_reader(&data[..]).expect("weights import");

    assert_eq!(table, WeightTable::standard());
    let hoist = table.get(Criterion::PoolHoist).expect("hoist row");
    assert!(!hoist.is_publicly_listed());
}

#[test]
fn sample_sheet_imports_every_hotel() {
    let data = include_bytes!("../sample_hotels.csv");

    let hotels = HotelSheetImporter::from_reader(&data[..]).expect("hotels import");

    assert_eq!(hotels.len(), 5);
    let resort = &hotels[0];
    assert_eq!(resort.subscription, SubscriptionTier::Premium);
    assert_eq!(resort.click_count, 412);
    assert_eq!(resort.scores.get(ScoreType::Overall), None);

    let inn = hotels
        .iter()
        .find(|hotel| hotel.id.0 == "h-104")
        .expect("inn present");
    assert!(inn.pool.is_none());

    let villa = hotels
        .iter()
        .find(|hotel| hotel.id.0 == "h-105")
        .expect("villa present");
    let pool = villa.pool.as_ref().expect("villa surveyed");
    assert_eq!(pool.shade_coverage_percent, None);
    assert_eq!(pool.has_free_towels, Some(true));
    assert_eq!(pool.music_level, None);
}

#[test]
fn malformed_weight_flags_are_rejected() {
    let csv = "criterion,overall,family,quiet,party,is_active\ncleanliness,3,3,2,1.5,maybe\n";

    match WeightTableImporter::from_reader(csv.as_bytes()) {
        Err(ImportError::InvalidValue { line, column, value }) => {
            assert_eq!(line, 2);
            assert_eq!(column, "is_active");
            assert_eq!(value, "maybe");
        }
        other => panic!("expected invalid flag, got {other:?}"),
    }
}

#[test]
fn missing_weights_file_is_an_io_error() {
    let err = WeightTableImporter::from_path("does/not/exist.csv").expect_err("missing file");

    assert!(matches!(err, ImportError::Io(_)));
}

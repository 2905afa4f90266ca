use crate::infra::{load_hotels, load_weights, InMemoryHotelRepository, InMemoryRuleRepository};
use chrono::{DateTime, Utc};
use clap::Args;
use pool_rating::error::AppError;
use pool_rating::rating::{
    Atmosphere, Badge, BadgeCriterion, BadgeId, BadgePreview, BadgeRuleSet, CrowdLevel,
    Criterion, Hotel, HotelId, HotelRepository, HotelScores, MusicLevel, PoolCriteria,
    RatingService, RatingServiceError, ScoreCalculator, ScoreCard, ScoreType, SubscriptionTier,
    WeightPatch,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Hotel attribute CSV export
    #[arg(long)]
    pub(crate) hotels: PathBuf,
    /// Weight table CSV export (defaults to the built-in table)
    #[arg(long)]
    pub(crate) weights_csv: Option<PathBuf>,
    /// Print the score cards as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BadgePreviewArgs {
    /// Hotel attribute CSV export
    #[arg(long)]
    pub(crate) hotels: PathBuf,
    /// Badge criterion in compact form, e.g. `cleanliness_rating>=4` (repeat to AND)
    #[arg(long = "rule", required = true)]
    pub(crate) rules: Vec<BadgeCriterion>,
    /// Weight table CSV export used for `*_score` fields
    #[arg(long)]
    pub(crate) weights_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Weight table CSV export (defaults to the built-in table)
    #[arg(long)]
    pub(crate) weights_csv: Option<PathBuf>,
    /// Stop after the scoring portion of the demo.
    #[arg(long)]
    pub(crate) skip_badges: bool,
}

#[derive(Debug, Serialize)]
struct ScoreReport {
    generated_at: DateTime<Utc>,
    cards: Vec<ScoreCard>,
}

pub(crate) fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        hotels,
        weights_csv,
        json,
    } = args;

    let hotels = load_hotels(&hotels)?;
    let calculator = ScoreCalculator::new(load_weights(weights_csv.as_deref())?);
    let cards: Vec<ScoreCard> = hotels.iter().map(|hotel| calculator.score(hotel)).collect();

    if json {
        let report = ScoreReport {
            generated_at: Utc::now(),
            cards,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Score report unavailable: {err}"),
        }
        return Ok(());
    }

    println!("Pool scores for {} hotels", hotels.len());
    for (hotel, card) in hotels.iter().zip(&cards) {
        render_score_line(hotel, &card.scores);
        if !card.missing.is_empty() {
            println!("    {} criteria not surveyed", card.missing.len());
        }
    }

    Ok(())
}

pub(crate) fn run_badge_preview(args: BadgePreviewArgs) -> Result<(), AppError> {
    let BadgePreviewArgs {
        hotels,
        rules,
        weights_csv,
    } = args;

    let rule_set = BadgeRuleSet::compile(&rules).map_err(RatingServiceError::from)?;
    let calculator = ScoreCalculator::new(load_weights(weights_csv.as_deref())?);
    let mut hotels = load_hotels(&hotels)?;
    for hotel in &mut hotels {
        hotel.scores = calculator.score(hotel).scores;
    }

    let criteria: Vec<String> = rules.iter().map(ToString::to_string).collect();
    println!("Badge preview: {}", criteria.join(" AND "));
    render_preview(&rule_set.preview(&hotels), hotels.len());
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        weights_csv,
        skip_badges,
    } = args;

    let weights = load_weights(weights_csv.as_deref())?;
    let hotels = Arc::new(InMemoryHotelRepository::with_hotels(demo_hotels()));
    let rules = Arc::new(InMemoryRuleRepository::new(weights));
    let service = RatingService::new(hotels.clone(), rules);

    println!("Pool rating demo");
    let summary = service.recalculate_all()?;
    println!(
        "- Scored {} hotels: {} fully, {} partially, {} without pool data",
        summary.hotels, summary.fully_scored, summary.partially_scored, summary.unscored
    );
    for hotel in hotels.all().map_err(RatingServiceError::from)? {
        render_score_line(&hotel, &hotel.scores);
    }

    println!("\nRaising the quiet weight of low crowding to the maximum");
    service.update_weights(vec![
        WeightPatch::new(Criterion::LowCrowding).with_weight(ScoreType::Quiet, f64::MAX)
    ])?;
    let retreat = HotelId("demo-olive".to_string());
    let card = service.recalculate(&retreat)?;
    println!(
        "- {} quiet score is now {}",
        retreat,
        format_score(card.scores.quiet)
    );
    println!("  Score components:");
    for component in card.components.iter().take(5) {
        println!(
            "    - {}: {:.2} ({})",
            component.criterion, component.contribution, component.notes
        );
    }

    let public = service.public_criteria()?;
    println!("- {} criteria listed on public hotel pages", public.len());

    if skip_badges {
        return Ok(());
    }

    println!("\nBadge rules");
    for badge in demo_badges() {
        let created = match service.create_badge(badge) {
            Ok(badge) => badge,
            Err(err) => {
                println!("  Badge rejected: {}", err);
                continue;
            }
        };
        let criteria: Vec<String> = created.criteria.iter().map(ToString::to_string).collect();
        println!("- {} [{}]", created.name, criteria.join(" AND "));

        let preview = service.preview_badge(&created.id)?;
        render_preview(&preview, summary.hotels);

        let assignment = service.apply_badge(&created.id)?;
        println!(
            "  Applied: {} assigned, {} revoked, {} unchanged",
            assignment.assigned.len(),
            assignment.revoked.len(),
            assignment.retained
        );
    }

    match service.scores(&HotelId("demo-splash".to_string())) {
        Ok(view) => match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("\nPublic score payload:\n{}", json),
            Err(err) => println!("\nPublic score payload unavailable: {}", err),
        },
        Err(err) => println!("\nScore lookup failed: {}", err),
    }

    Ok(())
}

fn render_score_line(hotel: &Hotel, scores: &HotelScores) {
    println!(
        "  {:<14} {:<24} overall {:>4} | family {:>4} | quiet {:>4} | party {:>4}",
        hotel.id.0,
        hotel.name,
        format_score(scores.overall),
        format_score(scores.family),
        format_score(scores.quiet),
        format_score(scores.party)
    );
}

fn render_preview(preview: &BadgePreview, total: usize) {
    println!("  {} of {} hotels qualify", preview.matched, total);
    for hotel in &preview.hotels {
        println!("    - {} ({})", hotel.name, hotel.hotel_id);
    }
}

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.1}"),
        None => "n/a".to_string(),
    }
}

fn demo_hotels() -> Vec<Hotel> {
    let mut splash = Hotel::new("demo-splash", "Splash Bay Resort", "costa-dorada").with_pool(
        PoolCriteria {
            sunbed_to_guest_ratio: Some(0.8),
            pool_count: Some(3),
            largest_pool_area_sqm: Some(520),
            shade_coverage_percent: Some(40),
            cleanliness_rating: Some(5),
            water_quality_rating: Some(5),
            kids_facilities_rating: Some(5),
            has_kids_pool: Some(true),
            has_waterslides: Some(true),
            has_lazy_river: Some(true),
            has_lifeguard: Some(true),
            has_shallow_area: Some(true),
            atmosphere: Some(Atmosphere::Lively),
            music_level: Some(MusicLevel::Background),
            crowd_level: Some(CrowdLevel::Busy),
            ..PoolCriteria::default()
        },
    );
    splash.subscription = SubscriptionTier::Premium;

    let olive = Hotel::new("demo-olive", "Olive Grove Retreat", "paphos").with_pool(PoolCriteria {
        sunbed_to_guest_ratio: Some(1.1),
        pool_count: Some(1),
        shade_coverage_percent: Some(70),
        cleanliness_rating: Some(4),
        quietness_rating: Some(5),
        view_rating: Some(5),
        has_adults_only_pool: Some(true),
        has_infinity_pool: Some(true),
        has_kids_pool: Some(false),
        atmosphere: Some(Atmosphere::Tranquil),
        music_level: Some(MusicLevel::None),
        crowd_level: Some(CrowdLevel::Quiet),
        ..PoolCriteria::default()
    });

    let neon = Hotel::new("demo-neon", "Neon Beach Club", "ayia-napa").with_pool(PoolCriteria {
        sunbed_to_guest_ratio: Some(0.5),
        largest_pool_area_sqm: Some(350),
        pool_open_hours: Some(14),
        cleanliness_rating: Some(3),
        has_pool_bar: Some(true),
        has_swim_up_bar: Some(true),
        hosts_pool_parties: Some(true),
        atmosphere: Some(Atmosphere::Party),
        music_level: Some(MusicLevel::Dj),
        crowd_level: Some(CrowdLevel::Packed),
        ..PoolCriteria::default()
    });

    let harbour = Hotel::new("demo-harbour", "Harbour Inn", "paphos");

    vec![splash, olive, neon, harbour]
}

fn demo_badges() -> Vec<Badge> {
    vec![
        Badge {
            id: BadgeId("family-splash".to_string()),
            name: "Family Splash".to_string(),
            description: Some("Supervised pools with something for the kids".to_string()),
            icon: Some("child".to_string()),
            color: Some("#3182ce".to_string()),
            criteria: vec![
                BadgeCriterion::new("has_kids_pool", "==", "true"),
                BadgeCriterion::new("has_lifeguard", "==", "true"),
            ],
        },
        Badge {
            id: BadgeId("tranquil-deck".to_string()),
            name: "Tranquil Deck".to_string(),
            description: Some("Calm, uncrowded pool decks".to_string()),
            icon: Some("leaf".to_string()),
            color: Some("#2f855a".to_string()),
            criteria: vec![BadgeCriterion::new("quiet_score", ">=", "8")],
        },
        Badge {
            id: BadgeId("big-pool".to_string()),
            name: "Big Pool".to_string(),
            description: None,
            icon: Some("waves".to_string()),
            color: None,
            criteria: vec![BadgeCriterion::new("largest_pool_area_sqm", ">", "300")],
        },
    ]
}

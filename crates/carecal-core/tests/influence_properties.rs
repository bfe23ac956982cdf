//! Property tests for the influence engine.

use carecal_core::influence::{display_score, DIRECT_SCORE_MAX};
use carecal_core::{
    compute_day_influence, compute_month_grid, Category, Event, EventDuration, ReachUnit,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn arb_unit() -> impl Strategy<Value = ReachUnit> {
    prop_oneof![
        Just(ReachUnit::Days),
        Just(ReachUnit::Weeks),
        Just(ReachUnit::Months),
        Just(ReachUnit::Years),
        Just(ReachUnit::Other("lunar cycles".to_string())),
    ]
}

fn arb_duration() -> impl Strategy<Value = EventDuration> {
    prop_oneof![
        Just(EventDuration::AllDay),
        (0u32..6, 0u32..60).prop_map(|(hours, minutes)| EventDuration::Timed { hours, minutes }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    (
        -400i64..60,
        1u8..=10,
        arb_duration(),
        proptest::option::of(-2.0f64..40.0),
        arb_unit(),
    )
        .prop_map(|(offset, impact, duration, reach_value, reach_unit)| Event {
            id: format!("evt{offset}"),
            name: "activity".to_string(),
            category: Category::Exercise,
            date: base_date() + Duration::days(offset),
            duration,
            impact,
            reach_value,
            reach_unit,
        })
}

proptest! {
    #[test]
    fn scores_are_finite_and_bounded(events in proptest::collection::vec(arb_event(), 0..40)) {
        let influence = compute_day_influence(base_date(), &events);

        prop_assert!(influence.total_score.is_finite());
        prop_assert!(influence.total_score >= 0.0);
        prop_assert!(influence.direct_score <= DIRECT_SCORE_MAX);
        prop_assert!(display_score(influence.total_score) <= 100);
    }

    #[test]
    fn reach_contributions_sorted_and_above_noise(events in proptest::collection::vec(arb_event(), 0..40)) {
        let influence = compute_day_influence(base_date(), &events);

        for pair in influence.reach_contributions.windows(2) {
            prop_assert!(pair[0].contributed_effect >= pair[1].contributed_effect);
        }
        for c in &influence.reach_contributions {
            prop_assert!(c.contributed_effect > 0.5);
            prop_assert!(c.source_date < base_date());
        }
    }

    #[test]
    fn future_events_never_contribute(event in arb_event(), ahead in 1i64..500) {
        let mut future = event;
        future.date = base_date() + Duration::days(ahead);
        let influence = compute_day_influence(base_date(), &[future]);
        prop_assert_eq!(influence.total_score, 0.0);
    }

    #[test]
    fn stacking_direct_events_never_exceeds_cap(count in 1usize..60, impact in 1u8..=10) {
        let events: Vec<Event> = (0..count)
            .map(|i| Event::new(i.to_string(), "stack", Category::Therapy, base_date(), impact)
                .with_duration(EventDuration::AllDay))
            .collect();
        let influence = compute_day_influence(base_date(), &events);
        prop_assert!(influence.direct_score <= DIRECT_SCORE_MAX);
        prop_assert!(influence.total_score <= DIRECT_SCORE_MAX);
    }

    #[test]
    fn direct_activity_beats_reach_only(
        prior in proptest::collection::vec(arb_event(), 0..20),
        impact in 1u8..=10,
    ) {
        let prior: Vec<Event> = prior.into_iter().filter(|e| e.date < base_date()).collect();
        let reach_only = compute_day_influence(base_date(), &prior);

        let mut with_direct = prior.clone();
        with_direct.push(Event::new("today", "today", Category::Exercise, base_date(), impact));
        let direct = compute_day_influence(base_date(), &with_direct);

        prop_assert!(direct.total_score > reach_only.total_score);
    }

    #[test]
    fn month_grid_always_has_42_cells(year in 1990i32..2100, month in 1u32..=12) {
        let grid = compute_month_grid(year, month, &[]).unwrap();
        prop_assert_eq!(grid.cells.len(), 42);
        prop_assert_eq!(
            grid.leading_days + grid.current_month_cells().count() + grid.trailing_days,
            42
        );
    }
}

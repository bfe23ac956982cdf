use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reach::reach_to_days;
use super::{
    ALL_DAY_BONUS, CONTRIBUTION_NOISE_FLOOR, DECAY_BASE, DECAY_WINDOW_FRACTION, DIRECT_SCORE_MAX,
    IMPACT_SCALE, LONG_SESSION_BONUS, LONG_SESSION_MINUTES, REACH_FLOOR_MULTIPLIER,
    REACH_SUPPRESSION, SOFT_CAP_SLOPE, SOFT_CAP_THRESHOLD,
};
use crate::event::{Category, Event, EventDuration};

/// Same-day activity and the score it earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectEvent {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub impact: u8,
    /// Post-bonus, pre-cap score.
    pub contributed_score: f64,
}

/// Earlier activity still felt on the target day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachContribution {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub source_date: NaiveDate,
    pub days_elapsed: i64,
    pub contributed_effect: f64,
    pub impact: u8,
}

/// Decomposed influence for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayInfluence {
    pub date: NaiveDate,
    pub direct_score: f64,
    pub reach_score: f64,
    /// Unclamped; can go up to [`DIRECT_SCORE_MAX`].
    pub total_score: f64,
    /// In original event order.
    pub direct_events: Vec<DirectEvent>,
    /// Sorted by descending effect.
    pub reach_contributions: Vec<ReachContribution>,
}

impl DayInfluence {
    pub fn is_empty(&self) -> bool {
        self.direct_events.is_empty()
            && self.reach_contributions.is_empty()
            && self.total_score == 0.0
    }
}

/// Compute the influence of `events` on `date`.
///
/// Total over any event slice, including an empty one.
pub fn compute_day_influence(date: NaiveDate, events: &[Event]) -> DayInfluence {
    let mut direct_sum = 0.0;
    let mut direct_events = Vec::new();
    let mut reach_score = 0.0;
    let mut reach_contributions = Vec::new();

    for event in events {
        if event.date == date {
            let score = direct_event_score(event);
            direct_sum += score;
            direct_events.push(DirectEvent {
                id: event.id.clone(),
                name: event.name.clone(),
                category: event.category,
                impact: event.impact,
                contributed_score: score,
            });
        } else if event.date < date {
            let days_elapsed = (date - event.date).num_days();
            let effect = reach_effect(event, days_elapsed as f64);
            if effect <= 0.0 {
                continue;
            }
            reach_score += effect;
            if effect > CONTRIBUTION_NOISE_FLOOR {
                reach_contributions.push(ReachContribution {
                    id: event.id.clone(),
                    name: event.name.clone(),
                    category: event.category,
                    source_date: event.date,
                    days_elapsed,
                    contributed_effect: effect,
                    impact: event.impact,
                });
            }
        }
    }

    reach_contributions.sort_by(|a, b| b.contributed_effect.total_cmp(&a.contributed_effect));

    let direct_score = soft_cap(direct_sum);
    let total_score = if direct_score > 0.0 {
        direct_score.max(reach_score * REACH_FLOOR_MULTIPLIER)
    } else {
        reach_score
    };

    DayInfluence {
        date,
        direct_score,
        reach_score,
        total_score,
        direct_events,
        reach_contributions,
    }
}

fn direct_event_score(event: &Event) -> f64 {
    f64::from(event.impact) * IMPACT_SCALE * duration_bonus(&event.duration)
}

fn duration_bonus(duration: &EventDuration) -> f64 {
    match duration.total_minutes() {
        None => ALL_DAY_BONUS,
        Some(minutes) if minutes >= LONG_SESSION_MINUTES => LONG_SESSION_BONUS,
        Some(_) => 1.0,
    }
}

/// Diminishing returns for stacking same-day activities.
fn soft_cap(score: f64) -> f64 {
    if score > SOFT_CAP_THRESHOLD {
        let capped = SOFT_CAP_THRESHOLD + (score / SOFT_CAP_THRESHOLD).log2() * SOFT_CAP_SLOPE;
        capped.min(DIRECT_SCORE_MAX)
    } else {
        score
    }
}

/// Zero once the reach window has closed.
fn reach_effect(event: &Event, days_elapsed: f64) -> f64 {
    let reach_days = reach_to_days(event.reach_value, &event.reach_unit);
    if days_elapsed > reach_days {
        return 0.0;
    }
    let decay = DECAY_BASE.powf(days_elapsed / (reach_days * DECAY_WINDOW_FRACTION));
    f64::from(event.impact) * IMPACT_SCALE * decay * REACH_SUPPRESSION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn event(id: &str, day: u32, impact: u8) -> Event {
        Event::new(id, format!("Activity {id}"), Category::Exercise, date(2024, 3, day), impact)
    }

    #[test]
    fn empty_collection_scores_zero() {
        let influence = compute_day_influence(date(2024, 3, 10), &[]);
        assert_eq!(influence.total_score, 0.0);
        assert!(influence.is_empty());
    }

    #[test]
    fn single_full_impact_event_scores_exactly_100() {
        let influence = compute_day_influence(date(2024, 3, 10), &[event("a", 10, 10)]);
        assert_eq!(influence.direct_score, 100.0);
        assert_eq!(influence.total_score, 100.0);
        assert_eq!(influence.direct_events[0].contributed_score, 100.0);
    }

    #[test]
    fn duration_bonuses_multiply_base_score() {
        let target = date(2024, 3, 10);
        let all_day = event("a", 10, 5).with_duration(EventDuration::AllDay);
        let long = event("b", 10, 5).with_duration(EventDuration::Timed { hours: 2, minutes: 0 });
        let short = event("c", 10, 5).with_duration(EventDuration::Timed { hours: 1, minutes: 59 });

        let influence = compute_day_influence(target, &[all_day, long, short]);
        let scores: Vec<f64> = influence
            .direct_events
            .iter()
            .map(|e| e.contributed_score)
            .collect();

        assert!(approx(scores[0], 55.0));
        assert!(approx(scores[1], 52.5));
        assert!(approx(scores[2], 50.0));
    }

    #[test]
    fn direct_events_keep_original_order() {
        let target = date(2024, 3, 10);
        let events = vec![event("low", 10, 2), event("high", 10, 9), event("mid", 10, 5)];
        let influence = compute_day_influence(target, &events);

        let names: Vec<&str> = influence.direct_events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Activity low", "Activity high", "Activity mid"]);
    }

    #[test]
    fn soft_cap_applies_log_curve_above_100() {
        let target = date(2024, 3, 10);
        let influence = compute_day_influence(target, &[event("a", 10, 10), event("b", 10, 10)]);
        // 200 raw -> 100 + log2(2) * 15
        assert!(approx(influence.direct_score, 115.0));

        let four: Vec<Event> = (0..4).map(|i| event(&i.to_string(), 10, 10)).collect();
        let influence = compute_day_influence(target, &four);
        assert_eq!(influence.direct_score, 120.0);
        // Breakdown keeps pre-cap scores.
        assert!(influence.direct_events.iter().all(|e| e.contributed_score == 100.0));
    }

    #[test]
    fn reach_decays_exponentially() {
        let source = event("a", 9, 10).with_reach(10.0, "days");
        let influence = compute_day_influence(date(2024, 3, 10), &[source]);

        let expected = 100.0 * 0.2f64.powf(1.0 / 2.0) * 0.3;
        assert!(approx(influence.reach_score, expected));
        assert!(approx(influence.total_score, expected));
        assert_eq!(influence.reach_contributions.len(), 1);
        assert_eq!(influence.reach_contributions[0].days_elapsed, 1);
        assert_eq!(influence.reach_contributions[0].source_date, date(2024, 3, 9));
    }

    #[test]
    fn reach_window_edge_is_inclusive() {
        let source = event("a", 3, 10).with_reach(1.0, "weeks");
        let at_edge = compute_day_influence(date(2024, 3, 10), &[source.clone()]);
        assert!(at_edge.reach_score > 0.0);

        let past_edge = compute_day_influence(date(2024, 3, 11), &[source]);
        assert_eq!(past_edge.reach_score, 0.0);
        assert!(past_edge.reach_contributions.is_empty());
    }

    #[test]
    fn future_events_have_no_reach() {
        let future = event("a", 20, 10).with_reach(1.0, "years");
        let influence = compute_day_influence(date(2024, 3, 10), &[future]);
        assert_eq!(influence.total_score, 0.0);
    }

    #[test]
    fn same_day_events_do_not_count_as_reach() {
        let today = event("a", 10, 6).with_reach(2.0, "weeks");
        let influence = compute_day_influence(date(2024, 3, 10), &[today]);
        assert_eq!(influence.reach_score, 0.0);
        assert_eq!(influence.direct_score, 60.0);
    }

    #[test]
    fn tiny_contributions_are_summed_but_not_listed() {
        // Default one-day reach: 50 * 0.2^5 * 0.3 = 0.0048
        let faint = event("a", 9, 5);
        let influence = compute_day_influence(date(2024, 3, 10), &[faint]);
        assert!(influence.reach_score > 0.0);
        assert!(influence.reach_score < CONTRIBUTION_NOISE_FLOOR);
        assert!(influence.reach_contributions.is_empty());
    }

    #[test]
    fn reach_contributions_sorted_descending() {
        let events = vec![
            event("old", 1, 10).with_reach(1.0, "months"),
            event("recent", 9, 4).with_reach(1.0, "months"),
            event("strong", 8, 10).with_reach(1.0, "months"),
        ];
        let influence = compute_day_influence(date(2024, 3, 10), &events);

        let effects: Vec<f64> = influence
            .reach_contributions
            .iter()
            .map(|c| c.contributed_effect)
            .collect();
        assert!(effects.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(influence.reach_contributions[0].name, "Activity strong");
    }

    #[test]
    fn direct_day_takes_max_of_direct_and_weighted_reach() {
        let target = date(2024, 3, 10);
        let reach = event("r", 9, 10).with_reach(1.0, "years");
        let weak_direct = event("d", 10, 1);

        let influence = compute_day_influence(target, &[reach, weak_direct]);
        assert_eq!(influence.direct_score, 10.0);
        assert!(approx(influence.total_score, influence.reach_score * 1.2));
        assert!(influence.total_score > influence.direct_score);
    }

    #[test]
    fn direct_day_never_drops_below_direct_score() {
        let target = date(2024, 3, 10);
        let reach = event("r", 9, 2);
        let strong_direct = event("d", 10, 8);

        let influence = compute_day_influence(target, &[reach, strong_direct]);
        assert_eq!(influence.total_score, 80.0);
    }
}

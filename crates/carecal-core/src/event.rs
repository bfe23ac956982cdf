//! Logged self-care activities.
//!
//! Events are owned by whatever collaborator supplies them (a JSON file, an
//! import, a calendar sync). The scoring engine only ever reads them.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Activity category.
///
/// Unrecognized values deserialize to [`Category::Other`] so an event list
/// written by a newer client still scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Therapy,
    Exercise,
    QualityTime,
    #[default]
    #[serde(other)]
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Therapy,
        Category::Exercise,
        Category::QualityTime,
        Category::Other,
    ];

    /// Stable key used in files and configuration.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Therapy => "therapy",
            Category::Exercise => "exercise",
            Category::QualityTime => "quality-time",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How long an activity lasted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDuration {
    /// The activity took the whole day.
    AllDay,
    /// A clock-time span.
    Timed {
        #[serde(default)]
        hours: u32,
        #[serde(default)]
        minutes: u32,
    },
}

impl Default for EventDuration {
    fn default() -> Self {
        EventDuration::Timed { hours: 1, minutes: 0 }
    }
}

impl EventDuration {
    /// Total minutes of a timed span, `None` for all-day events.
    pub fn total_minutes(&self) -> Option<u32> {
        match self {
            EventDuration::AllDay => None,
            EventDuration::Timed { hours, minutes } => {
                Some(hours.saturating_mul(60).saturating_add(*minutes))
            }
        }
    }
}

/// Unit of an event's reach.
///
/// Parsing is lenient: singular/plural and case are ignored, and anything
/// unrecognized is kept verbatim but resolves as days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ReachUnit {
    #[default]
    Days,
    Weeks,
    Months,
    Years,
    Other(String),
}

impl ReachUnit {
    /// Multiplier turning one unit into days. Calendar-approximate on purpose.
    pub fn days_per_unit(&self) -> f64 {
        match self {
            ReachUnit::Days => 1.0,
            ReachUnit::Weeks => 7.0,
            ReachUnit::Months => 30.0,
            ReachUnit::Years => 365.0,
            ReachUnit::Other(_) => 1.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReachUnit::Days => "days",
            ReachUnit::Weeks => "weeks",
            ReachUnit::Months => "months",
            ReachUnit::Years => "years",
            ReachUnit::Other(raw) => raw,
        }
    }
}

impl From<&str> for ReachUnit {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "day" | "days" => ReachUnit::Days,
            "week" | "weeks" => ReachUnit::Weeks,
            "month" | "months" => ReachUnit::Months,
            "year" | "years" => ReachUnit::Years,
            _ => ReachUnit::Other(raw.to_string()),
        }
    }
}

impl From<String> for ReachUnit {
    fn from(raw: String) -> Self {
        ReachUnit::from(raw.as_str())
    }
}

impl From<ReachUnit> for String {
    fn from(unit: ReachUnit) -> Self {
        match unit {
            ReachUnit::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ReachUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single logged activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "default_if_malformed")]
    pub duration: EventDuration,
    /// Intrinsic benefit rating, 1-10.
    pub impact: u8,
    /// Non-numeric values read as absent.
    #[serde(default, deserialize_with = "lenient_number")]
    pub reach_value: Option<f64>,
    #[serde(default, deserialize_with = "default_if_malformed")]
    pub reach_unit: ReachUnit,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

fn default_if_malformed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl Event {
    /// Create a one-hour event with a one-day reach.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        date: NaiveDate,
        impact: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            date,
            duration: EventDuration::default(),
            impact,
            reach_value: None,
            reach_unit: ReachUnit::Days,
        }
    }

    pub fn with_duration(mut self, duration: EventDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_reach(mut self, value: f64, unit: impl Into<ReachUnit>) -> Self {
        self.reach_value = Some(value);
        self.reach_unit = unit.into();
        self
    }
}

use crate::event::ReachUnit;

/// Resolve a reach `(value, unit)` pair to a day count.
///
/// A missing, non-finite or non-positive value counts as 1, so the result is
/// always strictly positive and safe to divide by.
pub fn reach_to_days(value: Option<f64>, unit: &ReachUnit) -> f64 {
    let value = match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 1.0,
    };
    value * unit.days_per_unit()
}

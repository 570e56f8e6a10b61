//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Pluralizes "point" for a balance.
///
/// Usage in templates: `{{ points|points_label }}` renders `1 point` or `7 points`.
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn points_label(points: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let points = points.to_string();
    let unit = if points == "1" { "point" } else { "points" };
    Ok(format!("{points} {unit}"))
}

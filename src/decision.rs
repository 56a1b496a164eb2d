use chrono::{NaiveDateTime, TimeDelta};
use log::info;
use crate::errors::DecisionError;
use crate::models::decision::Decision;
use crate::models::forecast::ForecastPoint;

/// Length of the decision window following the reference time
pub const DECISION_WINDOW_HOURS: i64 = 24;

/// Total precipitation (mm) above which irrigation is deferred
pub const DEFER_PRECIP_MM: f64 = 5.0;

/// Total precipitation (mm) below which extra irrigation may be needed
pub const DRY_PRECIP_MM: f64 = 1.0;

/// Average temperature (°C) above which a dry window needs extra irrigation
pub const HOT_TEMP_C: f64 = 30.0;

/// Average humidity (%) below which a dry window needs extra irrigation
pub const LOW_HUMIDITY_PCT: f64 = 60.0;

/// Aggregates over the forecast points within the decision window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowSummary {
    pub points: usize,
    pub total_precip: f64,
    pub avg_temp: f64,
    pub avg_humidity: f64,
}

/// Decides how to irrigate given forecast points and a reference time.
///
/// Only points later than the reference time and at most 24 hours ahead are considered.
/// The rules are evaluated in order, first match wins:
/// * total precipitation > 5.0 mm gives Defer
/// * total precipitation < 1.0 mm and (avg temperature > 30.0°C or avg humidity < 60%) gives ExtraIrrigation
/// * anything else gives NormalIrrigation
///
/// An empty list of points gives Error and a window without points gives Defer.
///
/// # Arguments
///
/// * 'points' - forecast points in any order
/// * 'reference_time' - local time the decision is made for
pub fn decide(points: &[ForecastPoint], reference_time: NaiveDateTime) -> Result<(Decision, String), DecisionError> {
    if points.is_empty() {
        return Ok((Decision::Error, "no forecast data to analyze".to_string()));
    }

    let summary = match summarize_window(points, reference_time)? {
        Some(summary) => summary,
        None => {
            return Ok((Decision::Defer, "no forecast data for next 24 hours (data may be stale)".to_string()));
        }
    };

    info!("Analysis of the next {} hours ({} forecast points): total precipitation {:.2} mm, average temperature {:.2}°C, average humidity {:.2}%",
          DECISION_WINDOW_HOURS, summary.points, summary.total_precip, summary.avg_temp, summary.avg_humidity);

    Ok(classify(&summary))
}

/// Aggregates the points within the decision window, returns None if there are no such points
///
/// # Arguments
///
/// * 'points' - forecast points in any order
/// * 'reference_time' - local time the window starts after
pub fn summarize_window(points: &[ForecastPoint], reference_time: NaiveDateTime) -> Result<Option<WindowSummary>, DecisionError> {
    let window_end = reference_time + TimeDelta::hours(DECISION_WINDOW_HOURS);

    let window = points
        .iter()
        .filter(|p| p.local_time > reference_time && p.local_time <= window_end)
        .collect::<Vec<&ForecastPoint>>();

    if window.is_empty() {
        return Ok(None);
    }

    let mut total_precip = 0.0;
    let mut total_temp = 0.0;
    let mut total_humidity = 0.0;
    for p in &window {
        total_precip += p.precipitation_mm;
        total_temp += required(p.temperature_c, "temperature", p.local_time)?;
        total_humidity += required(p.humidity_pct, "humidity", p.local_time)?;
    }

    let n = window.len() as f64;
    Ok(Some(WindowSummary {
        points: window.len(),
        total_precip,
        avg_temp: total_temp / n,
        avg_humidity: total_humidity / n,
    }))
}

fn required(value: Option<f64>, field: &'static str, local_time: NaiveDateTime) -> Result<f64, DecisionError> {
    value.ok_or(DecisionError::MissingValue { field, local_time })
}

fn classify(summary: &WindowSummary) -> (Decision, String) {
    if summary.total_precip > DEFER_PRECIP_MM {
        (Decision::Defer,
         format!("forecast total precipitation {:.2} mm within 24 hours", summary.total_precip))
    } else if summary.total_precip < DRY_PRECIP_MM && (summary.avg_temp > HOT_TEMP_C || summary.avg_humidity < LOW_HUMIDITY_PCT) {
        (Decision::ExtraIrrigation,
         format!("high temperature ({:.2}°C) and/or low humidity ({:.2}%)", summary.avg_temp, summary.avg_humidity))
    } else {
        (Decision::NormalIrrigation,
         format!("normal weather conditions (rain: {:.2} mm, temperature: {:.2}°C, humidity: {:.2}%)",
                 summary.total_precip, summary.avg_temp, summary.avg_humidity))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(7, 30, 0).unwrap()
    }

    fn point(offset: TimeDelta, precip: f64, temp: f64, humidity: f64) -> ForecastPoint {
        ForecastPoint {
            local_time: now() + offset,
            temperature_c: Some(temp),
            humidity_pct: Some(humidity),
            precipitation_mm: precip,
            condition_text: Some("Berawan".to_string()),
        }
    }

    #[test]
    fn hot_dry_day_needs_extra_irrigation() {
        let points = vec![point(TimeDelta::hours(1), 0.0, 35.0, 50.0)];
        let (decision, reason) = decide(&points, now()).unwrap();

        assert_eq!(decision, Decision::ExtraIrrigation);
        assert!(reason.contains("35.00"));
    }

    #[test]
    fn rain_takes_precedence() {
        let points = vec![point(TimeDelta::hours(2), 6.0, 28.0, 70.0)];
        let (decision, reason) = decide(&points, now()).unwrap();

        assert_eq!(decision, Decision::Defer);
        assert!(reason.contains("6.00 mm"));
    }

    #[test]
    fn moderate_day_is_normal() {
        let points = vec![point(TimeDelta::hours(3), 2.0, 25.0, 70.0)];
        let (decision, reason) = decide(&points, now()).unwrap();

        assert_eq!(decision, Decision::NormalIrrigation);
        assert!(reason.contains("2.00 mm"));
        assert!(reason.contains("25.00°C"));
        assert!(reason.contains("70.00%"));
    }

    #[test]
    fn no_points_is_an_error() {
        let (decision, reason) = decide(&[], now()).unwrap();

        assert_eq!(decision, Decision::Error);
        assert_eq!(reason, "no forecast data to analyze");
    }

    #[test]
    fn stale_points_defer() {
        let points = vec![
            point(TimeDelta::hours(-3), 0.0, 35.0, 40.0),
            point(TimeDelta::hours(25), 0.0, 35.0, 40.0),
        ];
        let (decision, reason) = decide(&points, now()).unwrap();

        assert_eq!(decision, Decision::Defer);
        assert_eq!(reason, "no forecast data for next 24 hours (data may be stale)");
    }

    #[test]
    fn window_excludes_reference_time_and_includes_end() {
        let points = vec![
            point(TimeDelta::zero(), 10.0, 20.0, 90.0),
            point(TimeDelta::hours(24), 0.5, 32.0, 70.0),
            point(TimeDelta::hours(24) + TimeDelta::seconds(1), 10.0, 20.0, 90.0),
        ];
        let summary = summarize_window(&points, now()).unwrap().unwrap();

        assert_eq!(summary.points, 1);
        assert_eq!(summary.total_precip, 0.5);
        assert_eq!(decide(&points, now()).unwrap().0, Decision::ExtraIrrigation);
    }

    #[test]
    fn only_reference_instant_is_stale() {
        let points = vec![point(TimeDelta::zero(), 0.0, 35.0, 40.0)];
        assert_eq!(decide(&points, now()).unwrap().0, Decision::Defer);
    }

    #[test]
    fn aggregates_over_window() {
        let points = vec![
            point(TimeDelta::hours(3), 1.5, 24.0, 80.0),
            point(TimeDelta::hours(6), 2.5, 28.0, 60.0),
            point(TimeDelta::hours(9), 2.0, 26.0, 70.0),
            point(TimeDelta::hours(-6), 40.0, 0.0, 0.0),
        ];
        let summary = summarize_window(&points, now()).unwrap().unwrap();

        assert_eq!(summary.points, 3);
        assert!((summary.total_precip - 6.0).abs() < 1e-9);
        assert!((summary.avg_temp - 26.0).abs() < 1e-9);
        assert!((summary.avg_humidity - 70.0).abs() < 1e-9);
        assert_eq!(decide(&points, now()).unwrap().0, Decision::Defer);
    }

    #[rstest]
    #[case::heavy_rain(5.5, 35.0, 40.0, Decision::Defer)]
    #[case::rain_at_limit(5.0, 25.0, 70.0, Decision::NormalIrrigation)]
    #[case::dry_and_hot(0.9, 30.5, 70.0, Decision::ExtraIrrigation)]
    #[case::dry_and_low_humidity(0.0, 25.0, 59.9, Decision::ExtraIrrigation)]
    #[case::dry_but_mild(0.0, 30.0, 60.0, Decision::NormalIrrigation)]
    #[case::almost_dry_and_hot(1.0, 35.0, 40.0, Decision::NormalIrrigation)]
    #[case::wet_and_hot(3.0, 35.0, 40.0, Decision::NormalIrrigation)]
    fn classification(#[case] precip: f64, #[case] temp: f64, #[case] humidity: f64, #[case] expected: Decision) {
        let points = vec![point(TimeDelta::hours(4), precip, temp, humidity)];
        assert_eq!(decide(&points, now()).unwrap().0, expected);
    }

    #[test]
    fn points_may_come_in_any_order() {
        let mut points = vec![
            point(TimeDelta::hours(21), 0.0, 33.0, 50.0),
            point(TimeDelta::hours(3), 0.2, 31.0, 55.0),
            point(TimeDelta::hours(12), 0.1, 32.0, 52.0),
        ];
        let forward = decide(&points, now()).unwrap();
        points.reverse();

        assert_eq!(decide(&points, now()).unwrap(), forward);
    }

    #[test]
    fn missing_temperature_in_window_fails() {
        let mut p = point(TimeDelta::hours(2), 0.0, 30.0, 60.0);
        p.temperature_c = None;
        let err = decide(&[p], now()).unwrap_err();

        assert!(matches!(err, DecisionError::MissingValue { field: "temperature", .. }));
    }

    #[test]
    fn missing_humidity_outside_window_is_ignored() {
        let mut stale = point(TimeDelta::hours(-1), 0.0, 30.0, 60.0);
        stale.humidity_pct = None;
        let points = vec![stale, point(TimeDelta::hours(2), 2.0, 25.0, 70.0)];

        assert_eq!(decide(&points, now()).unwrap().0, Decision::NormalIrrigation);
    }
}

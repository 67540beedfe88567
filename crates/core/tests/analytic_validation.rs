//! Validation of the closed-form analytic fallout model
//!
//! Checks the unsupported-input cases, contour scaling against the reference
//! calibration, point dose-rate queries and the downwind frame they use.
//!
//! Run tests with: cargo test --test `analytic_validation`

use approx::assert_relative_eq;
use fallout_core::{
    analytic::{point_dose_rate, UnsupportedReason, REFERENCE_CONTOURS},
    core_types::{Degrees, Kilotons, KilometersPerHour},
    AnalyticIsodoseModel, AnalyticOutcome, BurstHeight, DownwindPoint,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn compute(yield_kt: f64, wind_kph: f64, burst: BurstHeight) -> AnalyticOutcome {
    AnalyticIsodoseModel::default().compute(
        Kilotons::new(yield_kt),
        KilometersPerHour::new(wind_kph),
        burst,
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// UNSUPPORTED INPUTS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_air_burst_is_unsupported() {
    let outcome = compute(20.0, 24.0, BurstHeight::Air);
    assert!(!outcome.is_supported());
    assert!(outcome.contours().is_empty());
    assert_eq!(
        outcome,
        AnalyticOutcome::Unsupported(UnsupportedReason::NotGroundBurst(BurstHeight::Air))
    );
}

#[test]
fn test_non_positive_yield_is_unsupported() {
    for y in [0.0, -5.0, f64::NAN] {
        let outcome = compute(y, 24.0, BurstHeight::Ground);
        assert_eq!(
            outcome,
            AnalyticOutcome::Unsupported(UnsupportedReason::NonPositiveYield)
        );
    }
}

#[test]
fn test_calm_wind_is_unsupported() {
    let outcome = compute(20.0, 0.0, BurstHeight::Ground);
    assert_eq!(
        outcome,
        AnalyticOutcome::Unsupported(UnsupportedReason::NonPositiveWind)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTOUR SCALING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_reference_conditions_reproduce_table() {
    // 15 mph expressed in km/h
    let outcome = compute(10.0, 15.0 / 0.621371, BurstHeight::Ground);
    let result = outcome.result().expect("ground burst is supported");
    for reference in &REFERENCE_CONTOURS {
        let c = result
            .contour(reference.threshold)
            .expect("every reference contour survives at 10 kt");
        assert_relative_eq!(c.length_km, reference.length_km, epsilon = 0.051);
        assert_relative_eq!(c.width_km, reference.width_km, epsilon = 0.051);
    }
}

#[test]
fn test_1000_r_contour_at_20_kt() {
    let outcome = compute(20.0, 24.0, BurstHeight::Ground);
    let c = outcome
        .result()
        .and_then(|r| r.contour(1000.0))
        .expect("1000 R/hr contour present");

    let expected_length = 4.12 * 2f64.powf(0.54);
    let expected_width = 0.82 * 2f64.powf(0.63);
    assert_relative_eq!(c.length_km, expected_length, max_relative = 0.05);
    assert_relative_eq!(c.width_km, expected_width, max_relative = 0.05);
}

#[test]
fn test_contours_grow_with_yield() {
    let small = compute(5.0, 24.0, BurstHeight::Ground);
    let large = compute(500.0, 24.0, BurstHeight::Ground);
    let length = |o: &AnalyticOutcome| {
        o.result()
            .and_then(|r| r.contour(10.0))
            .map(|c| c.length_km)
    };
    assert!(length(&large) > length(&small));
}

#[test]
fn test_contour_values_rounded_to_tenth() {
    let outcome = compute(37.0, 31.0, BurstHeight::Ground);
    for c in outcome.contours() {
        assert_relative_eq!(c.length_km * 10.0, (c.length_km * 10.0).round(), epsilon = 1e-9);
        assert_relative_eq!(c.width_km * 10.0, (c.width_km * 10.0).round(), epsilon = 1e-9);
        assert!(c.length_km >= 0.1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// POINT DOSE RATES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_point_dose_symmetric_and_peaked_on_axis() {
    let outcome = compute(100.0, 24.0, BurstHeight::Ground);
    let params = outcome.result().expect("supported").parameters;

    for x in [1.0, 5.0, 20.0, 60.0] {
        let on_axis = point_dose_rate(x, 0.0, &params);
        let left = point_dose_rate(x, -2.0, &params);
        let right = point_dose_rate(x, 2.0, &params);
        assert!(on_axis.is_finite() && on_axis >= 0.0);
        assert_relative_eq!(left, right, max_relative = 1e-12);
        assert!(on_axis >= left);
    }
}

#[test]
fn test_frame_query_uses_miles() {
    let outcome = compute(50.0, 24.0, BurstHeight::Ground);
    let result = outcome.result().expect("supported");
    let point = DownwindPoint::new(16.0934, 1.60934);
    assert_relative_eq!(
        result.dose_rate_at(point),
        point_dose_rate(10.0, 1.0, &result.parameters),
        max_relative = 1e-9
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// DOWNWIND FRAME
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_westerly_wind_carries_plume_east() {
    let (east, north) = DownwindPoint::new(10.0, 0.0).to_east_north(Degrees::new(270.0));
    assert_relative_eq!(east, 10.0, epsilon = 1e-9);
    assert_relative_eq!(north, 0.0, epsilon = 1e-9);
}

#[test]
fn test_northerly_wind_carries_plume_south() {
    let (east, north) = DownwindPoint::new(10.0, 0.0).to_east_north(Degrees::new(0.0));
    assert_relative_eq!(east, 0.0, epsilon = 1e-9);
    assert_relative_eq!(north, -10.0, epsilon = 1e-9);
}

#[test]
fn test_frame_round_trip_preserves_distance() {
    let from = Degrees::new(135.0);
    let p = DownwindPoint::new(7.5, -3.0);
    let (e, n) = p.to_east_north(from);
    let back = DownwindPoint::from_east_north(e, n, from);
    assert_relative_eq!(back.x_km, p.x_km, epsilon = 1e-9);
    assert_relative_eq!(back.y_km, p.y_km, epsilon = 1e-9);
    assert_relative_eq!(*back.distance(), *p.distance(), epsilon = 1e-9);
}

use std::f64::consts::PI;

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::Rng;

use crate::error::SimError;
use crate::types::{PricePoint, PriceSeries};

const STABLE_TREND_STRENGTH: f64 = 0.001;
const STABLE_VOLATILITY: f64 = 0.001;
const STABLE_DAILY_CYCLE: f64 = 0.0005;
const STABLE_WEEKLY_CYCLE: f64 = 0.0003;
const STABLE_MOMENTUM: f64 = 0.01;
const HOURS_PER_WEEK: f64 = 24.0 * 7.0;

/// Synthesize a realistic-looking hourly price path for one asset.
///
/// The path is a random walk around `base_value` with a fixed overall trend,
/// tiered volatility (wider for short windows), daily and weekly sine
/// cycles, and a momentum term that feeds each hour's deviation from the
/// baseline into the next.  Stable assets use much smaller constants for
/// every component so the path hugs the baseline.
///
/// Returns `days * 24` points, oldest first, exactly one hour apart, with
/// the newest point at `Utc::now()`.  `days == 0` yields an empty series.
pub fn generate_history(base_value: f64, days: i64, is_stable: bool) -> Result<PriceSeries, SimError> {
    generate_history_at(base_value, days, is_stable, Utc::now(), &mut rand::thread_rng())
}

/// Same as [`generate_history`] but with an explicit "now" instant and a
/// caller-supplied random source, so tests can pin both.
pub fn generate_history_at<R: Rng>(
    base_value: f64,
    days: i64,
    is_stable: bool,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<PriceSeries, SimError> {
    if days < 0 {
        return Err(SimError::InvalidRange(format!("days must be >= 0, got {days}")));
    }
    if !base_value.is_finite() || base_value <= 0.0 {
        return Err(SimError::InvalidRange(format!(
            "base value must be finite and positive, got {base_value}"
        )));
    }

    let total_hours = days * 24;
    let mut points: Vec<PricePoint> = Vec::with_capacity(total_hours as usize);

    // One trend for the whole series; stable assets barely trend at all.
    let trend_direction: f64 = rng.gen_range(-1.0..=1.0);
    let trend_strength = if is_stable {
        STABLE_TREND_STRENGTH
    } else {
        rng.gen_range(0.1..=0.3)
    };

    let volatility = if is_stable {
        STABLE_VOLATILITY
    } else if days <= 1 {
        0.08
    } else if days <= 7 {
        0.05
    } else {
        0.03
    };

    // Walk backward from now, one hour per step.
    let mut current_value = base_value;
    for i in 0..total_hours {
        let timestamp = now - Duration::hours(i);

        let time_progress = i as f64 / total_hours as f64;
        let trend_component = trend_direction * trend_strength * time_progress;

        let random_variation = rng.gen_range(-volatility..=volatility);

        let hour_of_day = timestamp.hour() as f64;
        let daily_cycle =
            (hour_of_day * 2.0 * PI / 24.0).sin() * if is_stable { STABLE_DAILY_CYCLE } else { 0.02 };
        let weekly_cycle = (i as f64 * 2.0 * PI / HOURS_PER_WEEK).sin()
            * if is_stable { STABLE_WEEKLY_CYCLE } else { 0.015 };

        // Previous hour's deviation from baseline bleeds into this one.
        let momentum = if i > 0 {
            (current_value - base_value) / base_value * if is_stable { STABLE_MOMENTUM } else { 0.1 }
        } else {
            0.0
        };

        let total_change = trend_component + random_variation + daily_cycle + weekly_cycle + momentum;
        current_value = base_value * (1.0 + total_change);

        current_value = if is_stable {
            current_value.clamp(base_value * 0.998, base_value * 1.002)
        } else {
            current_value.clamp(base_value * 0.1, base_value * 3.0)
        };

        points.push(PricePoint {
            timestamp,
            value: current_value,
        });
    }

    points.reverse();
    Ok(points)
}

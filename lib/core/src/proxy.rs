//! Proxy estimators
//!
//! Fixed heuristics that synthesize features no provider reports directly,
//! or that stand in for a provider that did not answer. All functions are
//! pure; callers resolve missing inputs from the defaults table first.

use crate::normalize::{clamp_range, round4, NITROGEN_RANGE};

/// Climate nitrogen proxy output range
pub const CLIMATE_NITROGEN_RANGE: (f64, f64) = (0.01, 0.22);

const ELEVATION_RANGE: (f64, f64) = (0.0, 5000.0);
const CLIMATE_TEMPERATURE_RANGE: (f64, f64) = (-20.0, 50.0);
const FIRE_TEMPERATURE_RANGE: (f64, f64) = (0.0, 50.0);
const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);

/// Temperature at which fire risk saturates, in °C
const FIRE_SATURATION_TEMPERATURE: f64 = 40.0;

const NITROGEN_BASELINE: f64 = 0.51;
const NITROGEN_GAIN: f64 = 10.0;
const AMPLIFIED_RANGE: (f64, f64) = (0.1, 1.0);

/// Total nitrogen estimated from climate when the soil provider has nothing.
///
/// Anchored at 0.08 for 15 °C, 50 % humidity and sea level: warmer and more
/// humid points trend higher, higher elevation trends lower.
pub fn climate_nitrogen(elevation_m: f64, temperature_c: f64, humidity_pct: f64) -> f64 {
    let e = clamp_range(elevation_m, ELEVATION_RANGE);
    let t = clamp_range(temperature_c, CLIMATE_TEMPERATURE_RANGE);
    let h = clamp_range(humidity_pct, HUMIDITY_RANGE);
    let tn = 0.08 + 0.003 * (t - 15.0) + 0.001 * (h - 50.0) - 0.00001 * e;
    round4(clamp_range(tn, CLIMATE_NITROGEN_RANGE))
}

/// Total nitrogen from organic carbon (C:N ≈ 10:1). `None` when there is no
/// carbon to go on.
pub fn organic_carbon_nitrogen(soc_g_per_kg: f64) -> Option<f64> {
    if soc_g_per_kg > 0.0 {
        Some(round4(clamp_range(soc_g_per_kg * 0.002, NITROGEN_RANGE)))
    } else {
        None
    }
}

/// `(1 - humidity/100) * min(1, temperature/40)`, in [0, 1]
pub fn fire_risk(temperature_c: f64, humidity_pct: f64) -> f64 {
    let h = clamp_range(humidity_pct, HUMIDITY_RANGE) / 100.0;
    let t = clamp_range(temperature_c, FIRE_TEMPERATURE_RANGE) / FIRE_SATURATION_TEMPERATURE;
    let raw = (1.0 - h) * t.min(1.0);
    round4(clamp_range(raw, (0.0, 1.0)))
}

/// Exaggerates small nitrogen differences around the baseline for display.
/// Preserves sign and order of differences; never use as model input.
pub fn amplify_nitrogen(raw: f64) -> f64 {
    let amplified = NITROGEN_BASELINE + (raw - NITROGEN_BASELINE) * NITROGEN_GAIN;
    round4(clamp_range(amplified, AMPLIFIED_RANGE))
}

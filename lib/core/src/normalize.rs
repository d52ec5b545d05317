//! Unit and scale normalization for soil readings
//!
//! SoilGrids reports nitrogen in cg/kg and soil organic carbon in dg/kg. The
//! model was trained on much smaller, differently anchored ranges, so each
//! reading goes through a fixed linear mapping clamped to the training range.

/// Target range for total nitrogen
pub const NITROGEN_RANGE: (f64, f64) = (0.01, 0.25);
/// Target range for the phosphorus pair
pub const PHOSPHORUS_RANGE: (f64, f64) = (0.05, 1.0);

/// Available-to-total nitrogen ratio observed in training data
pub const AVAILABLE_NITROGEN_RATIO: f64 = 0.033;
/// Available-to-total phosphorus ratio
pub const AVAILABLE_PHOSPHORUS_RATIO: f64 = 0.95;

const NITROGEN_SCALE: f64 = 0.12;
const PHOSPHORUS_PER_SOC: f64 = 0.012;

/// Round to 4 decimal places
#[inline]
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

#[inline]
pub fn clamp_range(x: f64, (lo, hi): (f64, f64)) -> f64 {
    x.max(lo).min(hi)
}

/// cg/kg -> g/kg
#[inline]
pub fn nitrogen_g_per_kg(raw_cg_per_kg: f64) -> f64 {
    raw_cg_per_kg / 100.0
}

/// dg/kg -> g/kg
#[inline]
pub fn organic_carbon_g_per_kg(raw_dg_per_kg: f64) -> f64 {
    raw_dg_per_kg / 10.0
}

/// Total nitrogen on the training scale from a raw SoilGrids reading
pub fn total_nitrogen(raw_cg_per_kg: f64) -> f64 {
    let g_kg = nitrogen_g_per_kg(raw_cg_per_kg);
    round4(clamp_range(g_kg * NITROGEN_SCALE, NITROGEN_RANGE))
}

/// Available nitrogen, a fixed fraction of total nitrogen from any source
#[inline]
pub fn available_nitrogen(total_nitrogen: f64) -> f64 {
    round4(total_nitrogen * AVAILABLE_NITROGEN_RATIO)
}

/// `(total, available)` phosphorus from organic carbon in g/kg
pub fn phosphorus_pair(soc_g_per_kg: f64) -> (f64, f64) {
    let tp = round4(clamp_range(soc_g_per_kg * PHOSPHORUS_PER_SOC, PHOSPHORUS_RANGE));
    (tp, round4(tp * AVAILABLE_PHOSPHORUS_RATIO))
}

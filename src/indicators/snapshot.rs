//! Indicator snapshot at the latest bar, with per-indicator fallbacks.

use tracing::debug;

use crate::indicators::momentum::{calculate_rsi_default, calculate_stochastic_k_default};
use crate::indicators::registry::IndicatorKind;
use crate::indicators::trend::calculate_ema_default;
use crate::indicators::volatility::calculate_bollinger_bands_default;
use crate::indicators::volume::calculate_volume_ratio_default;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::market::PriceSeries;

/// Snapshot plus the indicators that fell back to their neutral value.
#[derive(Debug, Clone)]
pub struct SnapshotReport {
    pub snapshot: IndicatorSnapshot,
    pub degraded: Vec<IndicatorKind>,
}

/// Compute every indicator independently; a degraded indicator never
/// affects the others.
pub fn compute_snapshot(series: &PriceSeries) -> IndicatorSnapshot {
    compute_snapshot_report(series).snapshot
}

pub fn compute_snapshot_report(series: &PriceSeries) -> SnapshotReport {
    let bars = series.bars();
    let latest = series.latest();
    let price = latest.close;
    let mut snapshot = IndicatorSnapshot::neutral(price);
    snapshot.is_up_candle = latest.is_up();
    let mut degraded = Vec::new();

    match calculate_rsi_default(bars) {
        Some(rsi) => snapshot.rsi14 = rsi,
        None => degraded.push(IndicatorKind::Rsi),
    }

    match calculate_bollinger_bands_default(bars) {
        Some(bands) => {
            snapshot.bb_lower = bands.lower;
            snapshot.bb_middle = bands.middle;
            snapshot.bb_upper = bands.upper;
        }
        None => degraded.push(IndicatorKind::Bollinger),
    }

    match calculate_ema_default(bars) {
        Some(ema) => snapshot.ema5 = ema,
        None => degraded.push(IndicatorKind::Ema),
    }

    match calculate_stochastic_k_default(bars) {
        Some(k) => snapshot.stoch_k14 = k,
        None => degraded.push(IndicatorKind::StochasticK),
    }

    match calculate_volume_ratio_default(bars) {
        Some(ratio) => snapshot.volume_ratio_pct = ratio,
        None => degraded.push(IndicatorKind::VolumeRatio),
    }

    for kind in &degraded {
        debug!(
            ticker = %series.ticker(),
            indicator = kind.name(),
            bars = bars.len(),
            fallback = kind.fallback(),
            "indicator degraded, using fallback"
        );
    }

    SnapshotReport { snapshot, degraded }
}

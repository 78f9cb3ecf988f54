//! Per-year aggregates: average price trend and the launches/median combo

use super::{round2, upper_median, YearValue};
use crate::record::{DeviceField, DeviceRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Years kept by the price trend.
pub const PRICE_TREND_MAX_YEARS: usize = 20;

/// Mean USD price per launch year, years ascending by their text form.
/// Devices without a year or a usable price are skipped.
pub fn price_trend(view: &[&DeviceRecord]) -> Vec<YearValue> {
    let mut by_year: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in view {
        if let (Some(year), Some(price)) = (record.field(DeviceField::Year), record.usd_price()) {
            by_year.entry(year).or_default().push(price);
        }
    }

    by_year
        .into_iter()
        .take(PRICE_TREND_MAX_YEARS)
        .map(|(year, prices)| YearValue {
            year: year.to_string(),
            value: round2(prices.iter().sum::<f64>() / prices.len() as f64),
        })
        .collect()
}

/// Launch counts and median USD price per year.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchesCombo {
    pub years: Vec<String>,
    pub launch_counts: Vec<u64>,
    /// Upper-middle median; 0 for years without a usable price.
    pub median_prices: Vec<f64>,
    /// False when a single company is selected: only the median series is shown.
    pub show_launch_counts: bool,
}

impl LaunchesCombo {
    /// The count series, or `None` when the presentation omits it.
    pub fn visible_launch_counts(&self) -> Option<&[u64]> {
        self.show_launch_counts.then_some(self.launch_counts.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

pub fn launches_combo(view: &[&DeviceRecord], single_company: bool) -> LaunchesCombo {
    let mut by_year: BTreeMap<&str, (u64, Vec<f64>)> = BTreeMap::new();
    for record in view {
        let Some(year) = record.field(DeviceField::Year) else {
            continue;
        };
        let slot = by_year.entry(year).or_default();
        slot.0 += 1;
        if let Some(price) = record.usd_price() {
            slot.1.push(price);
        }
    }

    let mut combo = LaunchesCombo {
        show_launch_counts: !single_company,
        ..LaunchesCombo::default()
    };
    for (year, (count, prices)) in by_year {
        combo.years.push(year.to_string());
        combo.launch_counts.push(count);
        combo.median_prices.push(upper_median(&prices));
    }
    combo
}

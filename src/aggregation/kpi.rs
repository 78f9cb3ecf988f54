//! Headline figures for the filtered view

use super::{upper_median, OrderedCounter, UNKNOWN_LABEL};
use crate::record::{DeviceField, DeviceRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_devices: usize,
    /// Distinct company values; devices without a company form one group.
    pub unique_brands: usize,
    /// Upper-middle valid USD price, 0 when no prices.
    pub median_price: f64,
    /// Most frequent RAM label, earliest-seen on ties. `None` for an empty view.
    pub most_common_ram: Option<String>,
}

pub fn kpis(view: &[&DeviceRecord]) -> Kpis {
    let unique_brands = view
        .iter()
        .map(|r| r.field(DeviceField::Company))
        .collect::<HashSet<_>>()
        .len();

    let prices: Vec<f64> = view.iter().filter_map(|r| r.usd_price()).collect();

    let mut ram = OrderedCounter::new();
    for record in view {
        ram.add(record.field(DeviceField::Ram).unwrap_or(UNKNOWN_LABEL));
    }

    Kpis {
        total_devices: view.len(),
        unique_brands,
        median_price: upper_median(&prices),
        most_common_ram: ram.ranked().into_iter().next().map(|entry| entry.label),
    }
}

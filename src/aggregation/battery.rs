//! Battery capacity distribution

use crate::filter::BatterySortOrder;
use crate::record::DeviceRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryCount {
    pub capacity_mah: i64,
    pub count: u64,
}

impl BatteryCount {
    pub fn label(&self) -> String {
        format!("{} mAh", self.capacity_mah)
    }
}

/// The `top_n` most common capacities, then ordered by `order`.
///
/// Devices with no parseable or a zero capacity are skipped. Capacities with
/// equal counts rank by ascending capacity.
pub fn battery_distribution(
    view: &[&DeviceRecord],
    order: BatterySortOrder,
    top_n: usize,
) -> Vec<BatteryCount> {
    let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
    for capacity in view.iter().filter_map(|r| r.battery_mah()).filter(|c| *c != 0) {
        *counts.entry(capacity).or_insert(0) += 1;
    }

    let mut top: Vec<BatteryCount> = counts
        .into_iter()
        .map(|(capacity_mah, count)| BatteryCount { capacity_mah, count })
        .collect();
    top.sort_by(|a, b| b.count.cmp(&a.count));
    top.truncate(top_n);

    match order {
        BatterySortOrder::ValueAsc => top.sort_by_key(|b| b.capacity_mah),
        BatterySortOrder::ValueDesc => top.sort_by(|a, b| b.capacity_mah.cmp(&a.capacity_mah)),
        BatterySortOrder::CountAsc => top.sort_by_key(|b| b.count),
        BatterySortOrder::CountDesc => {}
    }
    top
}

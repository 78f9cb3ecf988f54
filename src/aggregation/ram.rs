//! RAM distribution over the RAM comparison view

use super::{CategoryCount, OrderedCounter, UNKNOWN_LABEL};
use crate::parsers::leading_number;
use crate::record::{DeviceField, DeviceRecord};

/// Count devices per raw RAM label, ordered by the label's leading number.
/// Labels without a number sort as 0; equal numbers keep first-seen order.
/// Devices without a RAM label are counted under "Unknown".
pub fn ram_distribution(view: &[&DeviceRecord]) -> Vec<CategoryCount> {
    let mut counter = OrderedCounter::new();
    for record in view {
        counter.add(record.field(DeviceField::Ram).unwrap_or(UNKNOWN_LABEL));
    }
    let mut entries = counter.into_entries();
    entries.sort_by(|a, b| leading_number(&a.label).total_cmp(&leading_number(&b.label)));
    entries
}

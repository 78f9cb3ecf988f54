//! Dataset View - derives filtered subsets from the immutable dataset

use crate::filter::{ram_selected, FilterConfig};
use crate::record::{Dataset, DeviceRecord};
use std::borrow::Cow;
use std::collections::BTreeSet;
use tracing::debug;

/// Records of the dataset that pass the filter, in load order.
pub type FilteredView<'a> = Vec<&'a DeviceRecord>;

/// Rebuild the filtered view from scratch.
pub fn recompute_filtered<'a>(dataset: &'a Dataset, config: &FilterConfig) -> FilteredView<'a> {
    let view: FilteredView<'a> = dataset
        .records()
        .iter()
        .filter(|record| config.matches(record))
        .collect();
    debug!("Filtered view: {} of {} devices", view.len(), dataset.len());
    view
}

/// Narrow the filtered view to a RAM selection used only by the RAM chart.
/// An empty selection returns the view itself.
pub fn recompute_ram_comparison_view<'v, 'a>(
    filtered: &'v [&'a DeviceRecord],
    selection: &BTreeSet<String>,
) -> Cow<'v, [&'a DeviceRecord]> {
    if selection.is_empty() {
        return Cow::Borrowed(filtered);
    }
    Cow::Owned(
        filtered
            .iter()
            .copied()
            .filter(|record| ram_selected(selection, record))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DeviceField;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            DeviceRecord::new("a").with(DeviceField::Year, "2020").with(DeviceField::Ram, "4GB"),
            DeviceRecord::new("b").with(DeviceField::Year, "2021").with(DeviceField::Ram, "8GB"),
            DeviceRecord::new("c").with(DeviceField::Year, "2010").with(DeviceField::Ram, "8GB"),
        ])
    }

    #[test]
    fn test_recompute_filtered_rescans_dataset() {
        let dataset = dataset();
        let mut config = FilterConfig::default();
        assert_eq!(recompute_filtered(&dataset, &config).len(), 2);

        config.set_year_bounds(2000, 2025);
        assert_eq!(recompute_filtered(&dataset, &config).len(), 3);

        config.set_year_bounds(2021, 2021);
        let view = recompute_filtered(&dataset, &config);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].model.as_deref(), Some("b"));
    }

    #[test]
    fn test_ram_comparison_view() {
        let dataset = dataset();
        let view = recompute_filtered(&dataset, &FilterConfig::default());

        let all = recompute_ram_comparison_view(&view, &BTreeSet::new());
        assert!(matches!(all, Cow::Borrowed(_)));
        assert_eq!(all.len(), 2);

        let selection: BTreeSet<String> = ["8GB".to_string()].into_iter().collect();
        let narrowed = recompute_ram_comparison_view(&view, &selection);
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].model.as_deref(), Some("b"));
    }
}

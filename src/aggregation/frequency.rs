//! Top-N frequency rankings by category

use super::{CategoryCount, Limits, OrderedCounter};
use crate::record::{DeviceField, DeviceRecord};

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Count records per value of `field`, most frequent first, truncated to `top_n`.
/// Missing values are counted under "Unknown".
pub fn top_by_field(view: &[&DeviceRecord], field: DeviceField, top_n: usize) -> Vec<CategoryCount> {
    let mut counter = OrderedCounter::new();
    for record in view {
        counter.add(record.field(field).unwrap_or(UNKNOWN_LABEL));
    }
    let mut ranked = counter.ranked();
    ranked.truncate(top_n);
    ranked
}

/// Most common processors, with long names shortened.
pub fn top_processors(view: &[&DeviceRecord], limits: &Limits) -> Vec<CategoryCount> {
    top_by_field(view, DeviceField::Processor, limits.top_n)
        .into_iter()
        .map(|entry| CategoryCount {
            label: truncate_label(&entry.label, limits.label_width),
            count: entry.count,
        })
        .collect()
}

pub fn top_companies(view: &[&DeviceRecord], limits: &Limits) -> Vec<CategoryCount> {
    top_by_field(view, DeviceField::Company, limits.top_n)
}

/// Shorten to `width` characters, the last three being "...".
pub fn truncate_label(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        return label.to_string();
    }
    let kept: String = label.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_company(companies: &[&str]) -> Vec<DeviceRecord> {
        companies
            .iter()
            .map(|c| DeviceRecord::new("m").with(DeviceField::Company, *c))
            .collect()
    }

    #[test]
    fn test_company_ranking_ties_keep_first_seen_order() {
        let records = by_company(&["C", "A", "B", "A", "C", "A", "B", "A", "C", "B", "A"]);
        let view: Vec<&DeviceRecord> = records.iter().collect();
        let ranked = top_companies(&view, &Limits::default());
        assert_eq!(
            ranked,
            vec![
                CategoryCount::new("A", 5),
                CategoryCount::new("C", 3),
                CategoryCount::new("B", 3),
            ]
        );
    }

    #[test]
    fn test_top_n_truncation_and_unknown() {
        let names: Vec<String> = (0..12).map(|i| format!("Brand{}", i)).collect();
        let mut records: Vec<DeviceRecord> = names
            .iter()
            .map(|c| DeviceRecord::new("m").with(DeviceField::Company, c.as_str()))
            .collect();
        records.push(DeviceRecord::new("m"));
        records.push(DeviceRecord::new("m"));
        let view: Vec<&DeviceRecord> = records.iter().collect();

        let ranked = top_companies(&view, &Limits::default());
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0], CategoryCount::new(UNKNOWN_LABEL, 2));
        assert_eq!(ranked[1].label, "Brand0");
    }

    #[test]
    fn test_processor_labels_truncated_but_company_labels_not() {
        let long = "Qualcomm Snapdragon 8 Gen 3 for Galaxy";
        let records = vec![DeviceRecord::new("m")
            .with(DeviceField::Processor, long)
            .with(DeviceField::Company, long)];
        let view: Vec<&DeviceRecord> = records.iter().collect();

        let processors = top_processors(&view, &Limits::default());
        assert_eq!(processors[0].label, "Qualcomm Snapdrag...");
        assert_eq!(processors[0].label.chars().count(), 20);

        let companies = top_companies(&view, &Limits::default());
        assert_eq!(companies[0].label, long);
    }

    #[test]
    fn test_truncate_label_boundary() {
        assert_eq!(truncate_label("exactly twenty chars", 20), "exactly twenty chars");
        assert_eq!(truncate_label("exactly twenty chars!", 20), "exactly twenty ch...");
    }

    #[test]
    fn test_empty_view() {
        assert!(top_processors(&[], &Limits::default()).is_empty());
    }
}

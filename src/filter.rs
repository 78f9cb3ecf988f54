//! Filter Predicate Model
//!
//! `FilterConfig` is the whole filter state as one serializable value. Bound
//! edits go through the `set_*_bounds` methods, which keep `min <= max`; the
//! predicate itself takes the bounds as given.

use crate::record::{DeviceField, DeviceRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_YEAR_BOUNDS: Bounds = Bounds { min: 2014, max: 2025 };
pub const DEFAULT_PRICE_BOUNDS: Bounds = Bounds { min: 0, max: 3000 };
pub const DEFAULT_BATTERY_BOUNDS: Bounds = Bounds { min: 0, max: 10000 };

/// Inclusive integer range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

impl Bounds {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min as f64 && value <= self.max as f64
    }

    /// Apply an edit the way paired sliders do. When the pair crosses, the
    /// handle that moved is pinned to the one that did not.
    fn edit(&mut self, min: i64, max: i64) {
        if min <= max {
            self.min = min;
            self.max = max;
        } else if max != self.max {
            self.min = min;
            self.max = min;
        } else {
            self.min = max;
            self.max = max;
        }
    }
}

/// Ordering of the battery-capacity chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatterySortOrder {
    ValueAsc,
    ValueDesc,
    CountAsc,
    #[default]
    CountDesc,
}

impl FromStr for BatterySortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "value-asc" => Ok(BatterySortOrder::ValueAsc),
            "desc" | "value-desc" => Ok(BatterySortOrder::ValueDesc),
            "count-asc" => Ok(BatterySortOrder::CountAsc),
            "count-desc" => Ok(BatterySortOrder::CountDesc),
            other => Err(format!("unknown battery sort order: {}", other)),
        }
    }
}

impl fmt::Display for BatterySortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BatterySortOrder::ValueAsc => "value-asc",
            BatterySortOrder::ValueDesc => "value-desc",
            BatterySortOrder::CountAsc => "count-asc",
            BatterySortOrder::CountDesc => "count-desc",
        };
        f.write_str(s)
    }
}

/// Complete filter state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Empty means every company.
    pub companies: BTreeSet<String>,
    pub years: Bounds,
    pub prices: Bounds,
    /// Raw RAM labels; empty means every label.
    pub ram: BTreeSet<String>,
    /// Tracked for the controls and the badge, but not consulted by `matches`.
    pub battery: Bounds,
    pub battery_sort: BatterySortOrder,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            companies: BTreeSet::new(),
            years: DEFAULT_YEAR_BOUNDS,
            prices: DEFAULT_PRICE_BOUNDS,
            ram: BTreeSet::new(),
            battery: DEFAULT_BATTERY_BOUNDS,
            battery_sort: BatterySortOrder::default(),
        }
    }
}

impl FilterConfig {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the company selection. `"all"` and blank entries mean no restriction.
    pub fn set_companies<I, S>(&mut self, companies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.companies = clean_selection(companies);
    }

    pub fn set_ram<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ram = clean_selection(labels);
    }

    pub fn set_year_bounds(&mut self, min: i64, max: i64) {
        self.years.edit(min, max);
    }

    pub fn set_price_bounds(&mut self, min: i64, max: i64) {
        self.prices.edit(min, max);
    }

    pub fn set_battery_bounds(&mut self, min: i64, max: i64) {
        self.battery.edit(min, max);
    }

    /// The single selected company, if exactly one is selected.
    pub fn single_company(&self) -> Option<&str> {
        match self.companies.len() {
            1 => self.companies.iter().next().map(String::as_str),
            _ => None,
        }
    }

    pub fn is_single_company(&self) -> bool {
        self.companies.len() == 1
    }

    /// Global inclusion predicate: company, year, price and RAM must all match.
    pub fn matches(&self, record: &DeviceRecord) -> bool {
        self.company_matches(record)
            && self.year_matches(record)
            && self.price_matches(record)
            && self.ram_matches(record)
    }

    fn company_matches(&self, record: &DeviceRecord) -> bool {
        self.companies.is_empty()
            || record
                .field(DeviceField::Company)
                .is_some_and(|c| self.companies.contains(c))
    }

    fn year_matches(&self, record: &DeviceRecord) -> bool {
        self.years.contains(record.year_number() as f64)
    }

    /// Devices without a usable price are kept.
    fn price_matches(&self, record: &DeviceRecord) -> bool {
        record.usd_price().map_or(true, |p| self.prices.contains(p))
    }

    fn ram_matches(&self, record: &DeviceRecord) -> bool {
        ram_selected(&self.ram, record)
    }

    /// Which filter dimensions differ from their defaults.
    ///
    /// The count covers company, year, price and battery. A RAM selection
    /// is reported through `ram_selected` but does not raise the count.
    pub fn active_filters(&self) -> ActiveFilters {
        let companies_selected = self.companies.len();
        let ram_selected = self.ram.len();
        let dims = [
            companies_selected > 0,
            self.years != DEFAULT_YEAR_BOUNDS,
            self.prices != DEFAULT_PRICE_BOUNDS,
            self.battery != DEFAULT_BATTERY_BOUNDS,
        ];
        ActiveFilters {
            count: dims.iter().filter(|active| **active).count(),
            companies_selected,
            ram_selected,
        }
    }
}

/// Badge data for the filter panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilters {
    pub count: usize,
    pub companies_selected: usize,
    pub ram_selected: usize,
}

/// RAM-label membership; an empty selection admits every record.
pub fn ram_selected(selection: &BTreeSet<String>, record: &DeviceRecord) -> bool {
    selection.is_empty()
        || record
            .field(DeviceField::Ram)
            .is_some_and(|r| selection.contains(r))
}

pub(crate) fn clean_selection<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(Into::into)
        .filter(|v| !v.is_empty() && v != "all")
        .collect()
}

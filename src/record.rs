//! Device records and the immutable dataset they live in

use crate::parsers::{leading_number, parse_battery, parse_price, parse_year};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Named columns of the source data set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceField {
    Company,
    Model,
    Processor,
    Ram,
    Battery,
    Year,
    PricePakistan,
    PriceIndia,
    PriceChina,
    PriceUsa,
    PriceDubai,
}

impl DeviceField {
    /// Column header as it appears in the CSV.
    pub fn header(self) -> &'static str {
        match self {
            DeviceField::Company => "Company Name",
            DeviceField::Model => "Model Name",
            DeviceField::Processor => "Processor",
            DeviceField::Ram => "RAM",
            DeviceField::Battery => "Battery Capacity",
            DeviceField::Year => "Launched Year",
            DeviceField::PricePakistan => "Launched Price (Pakistan)",
            DeviceField::PriceIndia => "Launched Price (India)",
            DeviceField::PriceChina => "Launched Price (China)",
            DeviceField::PriceUsa => "Launched Price (USA)",
            DeviceField::PriceDubai => "Launched Price (Dubai)",
        }
    }
}

/// One row of the data set. Missing cells are `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    #[serde(rename = "Company Name", default)]
    pub company: Option<String>,
    #[serde(rename = "Model Name", default)]
    pub model: Option<String>,
    #[serde(rename = "Processor", default)]
    pub processor: Option<String>,
    #[serde(rename = "RAM", default)]
    pub ram: Option<String>,
    #[serde(rename = "Battery Capacity", default)]
    pub battery: Option<String>,
    #[serde(rename = "Launched Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Launched Price (Pakistan)", default)]
    pub price_pakistan: Option<String>,
    #[serde(rename = "Launched Price (India)", default)]
    pub price_india: Option<String>,
    #[serde(rename = "Launched Price (China)", default)]
    pub price_china: Option<String>,
    #[serde(rename = "Launched Price (USA)", default)]
    pub price_usa: Option<String>,
    #[serde(rename = "Launched Price (Dubai)", default)]
    pub price_dubai: Option<String>,
}

impl DeviceRecord {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::default()
        }
    }

    /// Builder-style setter used by loaders and tests.
    pub fn with(mut self, field: DeviceField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            DeviceField::Company => self.company = value,
            DeviceField::Model => self.model = value,
            DeviceField::Processor => self.processor = value,
            DeviceField::Ram => self.ram = value,
            DeviceField::Battery => self.battery = value,
            DeviceField::Year => self.year = value,
            DeviceField::PricePakistan => self.price_pakistan = value,
            DeviceField::PriceIndia => self.price_india = value,
            DeviceField::PriceChina => self.price_china = value,
            DeviceField::PriceUsa => self.price_usa = value,
            DeviceField::PriceDubai => self.price_dubai = value,
        }
        self
    }

    /// Raw value of a field; empty strings count as missing.
    pub fn field(&self, field: DeviceField) -> Option<&str> {
        let value = match field {
            DeviceField::Company => &self.company,
            DeviceField::Model => &self.model,
            DeviceField::Processor => &self.processor,
            DeviceField::Ram => &self.ram,
            DeviceField::Battery => &self.battery,
            DeviceField::Year => &self.year,
            DeviceField::PricePakistan => &self.price_pakistan,
            DeviceField::PriceIndia => &self.price_india,
            DeviceField::PriceChina => &self.price_china,
            DeviceField::PriceUsa => &self.price_usa,
            DeviceField::PriceDubai => &self.price_dubai,
        };
        value.as_deref().filter(|s| !s.is_empty())
    }

    pub fn has_model(&self) -> bool {
        self.field(DeviceField::Model).is_some()
    }

    /// US launch price, used by the filter and every USD aggregate.
    pub fn usd_price(&self) -> Option<f64> {
        parse_price(self.field(DeviceField::PriceUsa))
    }

    pub fn price_in(&self, field: DeviceField) -> Option<f64> {
        parse_price(self.field(field))
    }

    pub fn battery_mah(&self) -> Option<i64> {
        parse_battery(self.field(DeviceField::Battery))
    }

    pub fn year_number(&self) -> i64 {
        parse_year(self.field(DeviceField::Year))
    }
}

/// The full data set, loaded once and never mutated.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<DeviceRecord>,
}

impl Dataset {
    /// Build a dataset, dropping rows without a model name.
    pub fn new(records: impl IntoIterator<Item = DeviceRecord>) -> Self {
        Self {
            records: records.into_iter().filter(DeviceRecord::has_model).collect(),
        }
    }

    pub fn records(&self) -> &[DeviceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct company names, sorted ascending.
    pub fn companies(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.field(DeviceField::Company))
            .unique()
            .sorted()
            .map(str::to_string)
            .collect()
    }

    /// Distinct RAM labels ordered by their leading number.
    pub fn ram_labels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.field(DeviceField::Ram))
            .filter(|label| seen.insert(*label))
            .sorted_by(|a, b| leading_number(a).total_cmp(&leading_number(b)))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_drops_rows_without_model() {
        let dataset = Dataset::new(vec![
            DeviceRecord::new("Galaxy S24"),
            DeviceRecord::default().with(DeviceField::Company, "Ghost"),
            DeviceRecord::new(""),
        ]);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].model.as_deref(), Some("Galaxy S24"));
    }

    #[test]
    fn test_empty_cells_count_as_missing() {
        let record = DeviceRecord::new("X").with(DeviceField::Company, "");
        assert_eq!(record.field(DeviceField::Company), None);
        assert_eq!(record.usd_price(), None);
        assert_eq!(record.year_number(), 0);
    }

    #[test]
    fn test_filter_options() {
        let dataset = Dataset::new(vec![
            DeviceRecord::new("a").with(DeviceField::Company, "Vivo").with(DeviceField::Ram, "12GB"),
            DeviceRecord::new("b").with(DeviceField::Company, "Apple").with(DeviceField::Ram, "6GB"),
            DeviceRecord::new("c").with(DeviceField::Company, "Vivo").with(DeviceField::Ram, "8GB / 12GB"),
            DeviceRecord::new("d").with(DeviceField::Ram, "6GB"),
        ]);
        assert_eq!(dataset.companies(), vec!["Apple", "Vivo"]);
        assert_eq!(dataset.ram_labels(), vec!["6GB", "8GB / 12GB", "12GB"]);
    }
}

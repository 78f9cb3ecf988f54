//! Market segmentation: price tiers and cross-country price comparison
//!
//! Both reducers are suppressed (return `None`) when exactly one company is
//! selected.

use crate::record::{DeviceField, DeviceRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Fixed price bands in USD; each covers `[lower, upper)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    Budget,
    MidRange,
    Premium,
    Flagship,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Budget,
        PriceTier::MidRange,
        PriceTier::Premium,
        PriceTier::Flagship,
    ];

    pub fn lower(self) -> f64 {
        match self {
            PriceTier::Budget => 0.0,
            PriceTier::MidRange => 200.0,
            PriceTier::Premium => 500.0,
            PriceTier::Flagship => 1000.0,
        }
    }

    pub fn upper(self) -> f64 {
        match self {
            PriceTier::Budget => 200.0,
            PriceTier::MidRange => 500.0,
            PriceTier::Premium => 1000.0,
            PriceTier::Flagship => f64::INFINITY,
        }
    }

    pub fn classify(price: f64) -> Option<PriceTier> {
        Self::ALL
            .into_iter()
            .find(|tier| price >= tier.lower() && price < tier.upper())
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceTier::Budget => "Budget",
            PriceTier::MidRange => "Mid-Range",
            PriceTier::Premium => "Premium",
            PriceTier::Flagship => "Flagship",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCount {
    pub tier: PriceTier,
    pub count: u64,
}

/// Device counts per price tier, in tier order. Only positive USD prices count.
pub fn price_tiers(view: &[&DeviceRecord], single_company: bool) -> Option<Vec<TierCount>> {
    if single_company {
        debug!("Price tiers suppressed for single-company selection");
        return None;
    }

    let mut counts = PriceTier::ALL.map(|tier| TierCount { tier, count: 0 });
    let mut valid_prices = 0usize;
    for price in view.iter().filter_map(|r| r.usd_price()).filter(|p| *p > 0.0) {
        valid_prices += 1;
        if let Some(tier) = PriceTier::classify(price) {
            if let Some(slot) = counts.iter_mut().find(|c| c.tier == tier) {
                slot.count += 1;
            }
        }
    }
    debug!(
        total_devices = view.len(),
        valid_prices,
        "Price tier distribution: {:?}",
        counts.iter().map(|c| (c.tier.label(), c.count)).collect::<Vec<_>>()
    );

    Some(counts.to_vec())
}

/// A launch-price column with its static USD conversion rate.
#[derive(Clone, Copy, Debug)]
pub struct CountryColumn {
    pub country: &'static str,
    pub field: DeviceField,
    pub usd_rate: f64,
}

pub const COUNTRY_COLUMNS: [CountryColumn; 5] = [
    CountryColumn { country: "Pakistan (PKR)", field: DeviceField::PricePakistan, usd_rate: 0.0036 },
    CountryColumn { country: "India (INR)", field: DeviceField::PriceIndia, usd_rate: 0.012 },
    CountryColumn { country: "China (CNY)", field: DeviceField::PriceChina, usd_rate: 0.14 },
    CountryColumn { country: "USA (USD)", field: DeviceField::PriceUsa, usd_rate: 1.0 },
    CountryColumn { country: "Dubai (AED)", field: DeviceField::PriceDubai, usd_rate: 0.27 },
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryPrice {
    pub country: String,
    /// Mean converted price rounded to whole dollars; 0 without data.
    pub average_usd: f64,
}

/// Average launch price per market, converted to USD.
pub fn country_prices(view: &[&DeviceRecord], single_company: bool) -> Option<Vec<CountryPrice>> {
    if single_company {
        debug!("Country prices suppressed for single-company selection");
        return None;
    }

    let prices = COUNTRY_COLUMNS
        .iter()
        .map(|column| {
            let converted: Vec<f64> = view
                .iter()
                .filter_map(|r| r.price_in(column.field))
                .filter(|p| *p > 0.0)
                .map(|p| p * column.usd_rate)
                .collect();
            let average_usd = if converted.is_empty() {
                0.0
            } else {
                (converted.iter().sum::<f64>() / converted.len() as f64).round()
            };
            CountryPrice {
                country: column.country.to_string(),
                average_usd,
            }
        })
        .collect();

    Some(prices)
}

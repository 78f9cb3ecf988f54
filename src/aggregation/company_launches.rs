//! Launch counts per year broken down by company

use super::OrderedCounter;
use crate::record::{DeviceField, DeviceRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Which companies the breakdown covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchScope {
    /// Exactly one company selected; rendered unstacked.
    Single,
    /// Several companies selected; stacked.
    Selected,
    /// No selection: the busiest companies in the view; stacked.
    #[default]
    TopCompanies,
}

/// One company's launch count per year, aligned with `CompanyLaunches::years`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySeries {
    pub company: String,
    pub counts: Vec<u64>,
}

impl CompanySeries {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyLaunches {
    pub scope: LaunchScope,
    pub years: Vec<String>,
    pub series: Vec<CompanySeries>,
}

impl CompanyLaunches {
    pub fn stacked(&self) -> bool {
        self.scope != LaunchScope::Single
    }

    /// Sum over companies for each year.
    pub fn year_totals(&self) -> Vec<u64> {
        (0..self.years.len())
            .map(|i| self.series.iter().map(|s| s.counts[i]).sum())
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.series.iter().map(CompanySeries::total).sum()
    }
}

/// Build the (year x company) launch matrix for the chosen companies.
pub fn launches_by_company(
    view: &[&DeviceRecord],
    selected: &BTreeSet<String>,
    top_n: usize,
) -> CompanyLaunches {
    let (scope, companies): (LaunchScope, Vec<String>) = match selected.len() {
        0 => (LaunchScope::TopCompanies, busiest_companies(view, top_n)),
        1 => (LaunchScope::Single, selected.iter().cloned().collect()),
        _ => (LaunchScope::Selected, selected.iter().cloned().collect()),
    };

    let column: HashMap<&str, usize> = companies
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let mut matrix: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
    for record in view {
        let (Some(year), Some(company)) = (
            record.field(DeviceField::Year),
            record.field(DeviceField::Company),
        ) else {
            continue;
        };
        if let Some(&i) = column.get(company) {
            matrix.entry(year).or_insert_with(|| vec![0; companies.len()])[i] += 1;
        }
    }

    let years: Vec<String> = matrix.keys().map(|y| y.to_string()).collect();
    let series = companies
        .iter()
        .enumerate()
        .map(|(i, company)| CompanySeries {
            company: company.clone(),
            counts: matrix.values().map(|row| row[i]).collect(),
        })
        .collect();

    CompanyLaunches {
        scope,
        years,
        series,
    }
}

fn busiest_companies(view: &[&DeviceRecord], top_n: usize) -> Vec<String> {
    let mut counter = OrderedCounter::new();
    for company in view.iter().filter_map(|r| r.field(DeviceField::Company)) {
        counter.add(company);
    }
    counter
        .ranked()
        .into_iter()
        .take(top_n)
        .map(|entry| entry.label)
        .collect()
}

//! Recomputation orchestrator
//!
//! `Dashboard` owns the dataset and the current filter state. Each
//! `FilterEvent` is applied to the configuration first, then every view,
//! aggregation and insight is rebuilt from scratch into a new snapshot.

use crate::aggregation::{
    self, BatteryCount, CategoryCount, CompanyLaunches, CountryPrice, Kpis, LaunchesCombo, Limits,
    TierCount, YearValue,
};
use crate::filter::{clean_selection, ActiveFilters, BatterySortOrder, FilterConfig};
use crate::insights::{self, Insights};
use crate::record::Dataset;
use crate::view::{recompute_filtered, recompute_ram_comparison_view};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// A change to the filter state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterEvent {
    SetCompanies(Vec<String>),
    SetYearBounds { min: i64, max: i64 },
    SetPriceBounds { min: i64, max: i64 },
    SetRam(Vec<String>),
    /// Selection for the RAM chart only.
    SetRamComparison(Vec<String>),
    SetBatteryBounds { min: i64, max: i64 },
    SetBatterySort(BatterySortOrder),
    /// Replace the whole configuration in one step.
    Replace(FilterConfig),
    Reset,
}

/// Everything the presentation layer reads after a recomputation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub active_filters: ActiveFilters,
    pub single_company: Option<String>,
    pub filtered_count: usize,
    pub kpis: Kpis,
    pub processors: Vec<CategoryCount>,
    pub companies: Vec<CategoryCount>,
    pub price_trend: Vec<YearValue>,
    pub ram_distribution: Vec<CategoryCount>,
    pub launches: LaunchesCombo,
    pub company_launches: CompanyLaunches,
    pub battery: Vec<BatteryCount>,
    /// `None` when suppressed for a single-company selection.
    pub price_tiers: Option<Vec<TierCount>>,
    /// `None` when suppressed for a single-company selection.
    pub country_prices: Option<Vec<CountryPrice>>,
    pub insights: Insights,
}

pub struct Dashboard {
    dataset: Dataset,
    config: FilterConfig,
    ram_comparison: BTreeSet<String>,
    limits: Limits,
    snapshot: DashboardSnapshot,
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        Self::with_limits(dataset, Limits::default())
    }

    pub fn with_limits(dataset: Dataset, limits: Limits) -> Self {
        let config = FilterConfig::default();
        let ram_comparison = BTreeSet::new();
        let snapshot = compute_snapshot(&dataset, &config, &ram_comparison, &limits);
        Self {
            dataset,
            config,
            ram_comparison,
            limits,
            snapshot,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn ram_comparison(&self) -> &BTreeSet<String> {
        &self.ram_comparison
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    /// Apply an event and recompute. Returns the new snapshot.
    pub fn apply(&mut self, event: FilterEvent) -> &DashboardSnapshot {
        self.apply_all([event])
    }

    /// Apply several events, recomputing once against the final state.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = FilterEvent>) -> &DashboardSnapshot {
        for event in events {
            debug!(?event, "Applying filter event");
            apply_event(&mut self.config, &mut self.ram_comparison, event);
        }
        self.recompute()
    }

    fn recompute(&mut self) -> &DashboardSnapshot {
        self.snapshot = compute_snapshot(&self.dataset, &self.config, &self.ram_comparison, &self.limits);
        info!(
            filtered = self.snapshot.filtered_count,
            total = self.dataset.len(),
            active_filters = self.snapshot.active_filters.count,
            "Dashboard recomputed"
        );
        &self.snapshot
    }
}

fn apply_event(config: &mut FilterConfig, ram_comparison: &mut BTreeSet<String>, event: FilterEvent) {
    match event {
        FilterEvent::SetCompanies(companies) => config.set_companies(companies),
        FilterEvent::SetYearBounds { min, max } => config.set_year_bounds(min, max),
        FilterEvent::SetPriceBounds { min, max } => config.set_price_bounds(min, max),
        FilterEvent::SetRam(labels) => config.set_ram(labels),
        FilterEvent::SetRamComparison(labels) => *ram_comparison = clean_selection(labels),
        FilterEvent::SetBatteryBounds { min, max } => config.set_battery_bounds(min, max),
        FilterEvent::SetBatterySort(order) => config.battery_sort = order,
        FilterEvent::Replace(replacement) => *config = replacement,
        FilterEvent::Reset => {
            config.reset();
            ram_comparison.clear();
        }
    }
}

/// Pure recomputation of every view, aggregation and insight.
pub fn compute_snapshot(
    dataset: &Dataset,
    config: &FilterConfig,
    ram_comparison: &BTreeSet<String>,
    limits: &Limits,
) -> DashboardSnapshot {
    let filtered = recompute_filtered(dataset, config);
    let ram_view = recompute_ram_comparison_view(&filtered, ram_comparison);
    let company = config.single_company();
    let single = company.is_some();

    let processors = aggregation::top_processors(&filtered, limits);
    let companies = aggregation::top_companies(&filtered, limits);
    let price_trend = aggregation::price_trend(&filtered);
    let ram_distribution = aggregation::ram_distribution(&ram_view);
    let launches = aggregation::launches_combo(&filtered, single);
    let company_launches = aggregation::launches_by_company(&filtered, &config.companies, limits.top_n);
    let battery = aggregation::battery_distribution(&filtered, config.battery_sort, limits.top_n);
    let price_tiers = aggregation::price_tiers(&filtered, single);
    let country_prices = aggregation::country_prices(&filtered, single);

    let insights = Insights {
        processors: insights::ranking_insight(&processors, company),
        companies: insights::ranking_insight(&companies, None),
        price_trend: insights::trend_insight(&price_trend),
        ram: insights::ram_insight(&ram_distribution, company),
        launches: insights::launches_insight(&launches),
        company_launches: insights::company_launches_insight(&company_launches),
        battery: insights::battery_insight(&battery, company),
        price_tiers: price_tiers.as_deref().and_then(insights::tier_insight),
        country_prices: country_prices.as_deref().and_then(insights::country_insight),
    };

    DashboardSnapshot {
        active_filters: config.active_filters(),
        single_company: company.map(str::to_string),
        filtered_count: filtered.len(),
        kpis: aggregation::kpis(&filtered),
        processors,
        companies,
        price_trend,
        ram_distribution,
        launches,
        company_launches,
        battery,
        price_tiers,
        country_prices,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DeviceField, DeviceRecord};

    fn dataset() -> Dataset {
        Dataset::new(vec![
            DeviceRecord::new("iPhone 15")
                .with(DeviceField::Company, "Apple")
                .with(DeviceField::Year, "2023")
                .with(DeviceField::Ram, "6GB")
                .with(DeviceField::PriceUsa, "USD 799"),
            DeviceRecord::new("Galaxy S23")
                .with(DeviceField::Company, "Samsung")
                .with(DeviceField::Year, "2023")
                .with(DeviceField::Ram, "8GB")
                .with(DeviceField::PriceUsa, "USD 1,199"),
            DeviceRecord::new("Galaxy A05")
                .with(DeviceField::Company, "Samsung")
                .with(DeviceField::Year, "2022")
                .with(DeviceField::Ram, "4GB")
                .with(DeviceField::PriceUsa, "USD 150"),
        ])
    }

    #[test]
    fn test_initial_snapshot_uses_defaults() {
        let dashboard = Dashboard::new(dataset());
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.filtered_count, 3);
        assert_eq!(snapshot.active_filters.count, 0);
        assert!(snapshot.price_tiers.is_some());
        assert!(snapshot.launches.show_launch_counts);
    }

    #[test]
    fn test_single_company_suppresses_market_views() {
        let mut dashboard = Dashboard::new(dataset());
        let snapshot = dashboard.apply(FilterEvent::SetCompanies(vec!["Samsung".into()]));
        assert_eq!(snapshot.filtered_count, 2);
        assert_eq!(snapshot.single_company.as_deref(), Some("Samsung"));
        assert!(snapshot.price_tiers.is_none());
        assert!(snapshot.country_prices.is_none());
        assert!(snapshot.insights.price_tiers.is_none());
        assert_eq!(snapshot.launches.visible_launch_counts(), None);
        assert!(!snapshot.company_launches.stacked());
    }

    #[test]
    fn test_ram_comparison_only_affects_ram_chart() {
        let mut dashboard = Dashboard::new(dataset());
        let snapshot = dashboard.apply(FilterEvent::SetRamComparison(vec!["8GB".into()]));
        assert_eq!(snapshot.filtered_count, 3);
        assert_eq!(snapshot.ram_distribution, vec![CategoryCount::new("8GB", 1)]);
        assert_eq!(snapshot.active_filters.count, 0);
    }

    #[test]
    fn test_apply_all_recomputes_once_with_final_state() {
        let mut dashboard = Dashboard::new(dataset());
        let snapshot = dashboard.apply_all([
            FilterEvent::SetPriceBounds { min: 500, max: 3000 },
            FilterEvent::SetYearBounds { min: 2023, max: 2025 },
        ]);
        assert_eq!(snapshot.filtered_count, 2);
        assert_eq!(snapshot.active_filters.count, 2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut dashboard = Dashboard::new(dataset());
        dashboard.apply(FilterEvent::SetCompanies(vec!["Apple".into()]));
        dashboard.apply(FilterEvent::SetRamComparison(vec!["6GB".into()]));
        dashboard.apply(FilterEvent::SetBatterySort(BatterySortOrder::ValueAsc));
        let snapshot = dashboard.apply(FilterEvent::Reset).clone();

        assert_eq!(dashboard.config(), &FilterConfig::default());
        assert!(dashboard.ram_comparison().is_empty());
        assert_eq!(snapshot.filtered_count, 3);
    }

    #[test]
    fn test_empty_dataset_yields_empty_results() {
        let dashboard = Dashboard::new(Dataset::default());
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.filtered_count, 0);
        assert_eq!(snapshot.kpis, Kpis::default());
        assert!(snapshot.processors.is_empty());
        assert!(snapshot.price_trend.is_empty());
        assert!(snapshot.battery.is_empty());
        assert!(snapshot.company_launches.series.is_empty());
        assert_eq!(snapshot.insights, Insights::default());
    }

    #[test]
    fn test_filter_event_round_trips_as_message() {
        let event = FilterEvent::SetYearBounds { min: 2016, max: 2020 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"set_year_bounds","value":{"min":2016,"max":2020}}"#
        );
        let back: FilterEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);

        let reset: FilterEvent = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
        assert_eq!(reset, FilterEvent::Reset);
    }
}

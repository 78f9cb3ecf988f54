//! Insight Summarizer
//!
//! Turns aggregation results into the handful of facts the narrative text is
//! built from. Every function returns `None` when there is nothing to report.

use crate::aggregation::{
    BatteryCount, CategoryCount, CompanyLaunches, CountryPrice, LaunchScope, LaunchesCombo,
    PriceTier, TierCount, YearValue,
};
use serde::{Deserialize, Serialize};

/// Leader of a top-N ranking and how concentrated the ranking is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankingInsight {
    pub top_label: String,
    pub top_count: u64,
    pub shown: usize,
    /// Share of the top three within the shown entries, whole percent.
    pub top3_share_pct: u32,
    /// Set when the view is narrowed to one company.
    pub company: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increased,
    Decreased,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendInsight {
    pub first_year: String,
    pub last_year: String,
    pub min_value: f64,
    pub max_value: f64,
    pub period_average: f64,
    /// Last year compared with the first; equal endpoints count as decreased.
    pub direction: TrendDirection,
}

/// The labels sharing the highest count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeInsight {
    pub labels: Vec<String>,
    pub count: u64,
    pub company: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchesInsight {
    pub peak_year: String,
    pub peak_count: u64,
    pub total_launches: u64,
    pub average_per_year: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyLaunchesInsight {
    pub total_launches: u64,
    pub most_active_year: String,
    pub most_active_year_count: u64,
    /// The single selected company, or the busiest company of a group.
    pub lead_company: String,
    pub lead_company_total: u64,
    pub single_company: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierInsight {
    pub dominant: PriceTier,
    pub dominant_pct: u32,
    pub total: u64,
    /// Flagship if populated, else Premium if populated.
    pub most_premium: Option<TierCount>,
    pub counts: Vec<TierCount>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryInsight {
    pub most_expensive: CountryPrice,
    pub least_expensive: CountryPrice,
    pub difference_usd: f64,
    /// How much dearer the most expensive market is, whole percent.
    pub difference_pct: u32,
    pub markets_analyzed: usize,
}

/// All insights for one snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub processors: Option<RankingInsight>,
    pub companies: Option<RankingInsight>,
    pub price_trend: Option<TrendInsight>,
    pub ram: Option<ModeInsight>,
    pub launches: Option<LaunchesInsight>,
    pub company_launches: Option<CompanyLaunchesInsight>,
    pub battery: Option<ModeInsight>,
    pub price_tiers: Option<TierInsight>,
    pub country_prices: Option<CountryInsight>,
}

fn percent(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 {
        return 0;
    }
    (part / whole * 100.0).round() as u32
}

pub fn ranking_insight(ranking: &[CategoryCount], company: Option<&str>) -> Option<RankingInsight> {
    let top = ranking.first()?;
    let shown_total: u64 = ranking.iter().map(|e| e.count).sum();
    let top3: u64 = ranking.iter().take(3).map(|e| e.count).sum();
    Some(RankingInsight {
        top_label: top.label.clone(),
        top_count: top.count,
        shown: ranking.len(),
        top3_share_pct: percent(top3 as f64, shown_total as f64),
        company: company.map(str::to_string),
    })
}

pub fn trend_insight(trend: &[YearValue]) -> Option<TrendInsight> {
    let (first, last) = (trend.first()?, trend.last()?);
    let values = trend.iter().map(|p| p.value);
    let direction = if last.value > first.value {
        TrendDirection::Increased
    } else {
        TrendDirection::Decreased
    };
    Some(TrendInsight {
        first_year: first.year.clone(),
        last_year: last.year.clone(),
        min_value: values.clone().fold(f64::INFINITY, f64::min),
        max_value: values.clone().fold(f64::NEG_INFINITY, f64::max),
        period_average: values.sum::<f64>() / trend.len() as f64,
        direction,
    })
}

fn mode_insight<I>(entries: I, company: Option<&str>) -> Option<ModeInsight>
where
    I: IntoIterator<Item = (String, u64)>,
{
    let entries: Vec<(String, u64)> = entries.into_iter().collect();
    let count = entries.iter().map(|(_, c)| *c).max().filter(|c| *c > 0)?;
    Some(ModeInsight {
        labels: entries
            .into_iter()
            .filter(|(_, c)| *c == count)
            .map(|(label, _)| label)
            .collect(),
        count,
        company: company.map(str::to_string),
    })
}

pub fn ram_insight(distribution: &[CategoryCount], company: Option<&str>) -> Option<ModeInsight> {
    mode_insight(
        distribution.iter().map(|e| (e.label.clone(), e.count)),
        company,
    )
}

pub fn battery_insight(distribution: &[BatteryCount], company: Option<&str>) -> Option<ModeInsight> {
    mode_insight(distribution.iter().map(|b| (b.label(), b.count)), company)
}

pub fn launches_insight(combo: &LaunchesCombo) -> Option<LaunchesInsight> {
    let peak_count = *combo.launch_counts.iter().max()?;
    let peak_index = combo.launch_counts.iter().position(|c| *c == peak_count)?;
    let total_launches: u64 = combo.launch_counts.iter().sum();
    Some(LaunchesInsight {
        peak_year: combo.years[peak_index].clone(),
        peak_count,
        total_launches,
        average_per_year: (total_launches as f64 / combo.years.len() as f64).round(),
    })
}

pub fn company_launches_insight(launches: &CompanyLaunches) -> Option<CompanyLaunchesInsight> {
    let total_launches = launches.total();
    if total_launches == 0 {
        return None;
    }

    let year_totals = launches.year_totals();
    let most_active_year_count = year_totals.iter().copied().max()?;
    let year_index = year_totals.iter().position(|c| *c == most_active_year_count)?;

    let single_company = launches.scope == LaunchScope::Single;
    let mut lead = &launches.series[0];
    for series in &launches.series[1..] {
        if series.total() > lead.total() {
            lead = series;
        }
    }

    Some(CompanyLaunchesInsight {
        total_launches,
        most_active_year: launches.years[year_index].clone(),
        most_active_year_count,
        lead_company: lead.company.clone(),
        lead_company_total: lead.total(),
        single_company,
    })
}

pub fn tier_insight(tiers: &[TierCount]) -> Option<TierInsight> {
    let total: u64 = tiers.iter().map(|t| t.count).sum();
    if total == 0 {
        return None;
    }
    let mut dominant = &tiers[0];
    for tier in &tiers[1..] {
        // Later tiers win ties.
        if tier.count >= dominant.count {
            dominant = tier;
        }
    }
    let most_premium = [PriceTier::Flagship, PriceTier::Premium]
        .into_iter()
        .find_map(|wanted| tiers.iter().find(|t| t.tier == wanted && t.count > 0))
        .cloned();
    Some(TierInsight {
        dominant: dominant.tier,
        dominant_pct: percent(dominant.count as f64, total as f64),
        total,
        most_premium,
        counts: tiers.to_vec(),
    })
}

pub fn country_insight(prices: &[CountryPrice]) -> Option<CountryInsight> {
    let mut priced: Vec<&CountryPrice> = prices.iter().filter(|p| p.average_usd > 0.0).collect();
    priced.sort_by(|a, b| b.average_usd.total_cmp(&a.average_usd));
    let most = *priced.first()?;
    let least = *priced.last()?;
    let difference_usd = most.average_usd - least.average_usd;
    Some(CountryInsight {
        most_expensive: most.clone(),
        least_expensive: least.clone(),
        difference_usd,
        difference_pct: percent(difference_usd, least.average_usd),
        markets_analyzed: priced.len(),
    })
}

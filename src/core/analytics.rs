//! Analytics aggregation: one period window, three concurrent reads.

use crate::backend::Backend;
use crate::core::service::DataService;
use crate::models::{Chamber, DailyWork, Infrastructure, RecordFilter};
use crate::utils::date::today;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reporting window. Unknown tokens fall back to thirty days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Period {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl Period {
    pub fn from_token(token: &str) -> Self {
        match token {
            "7d" => Period::Week,
            "90d" => Period::Quarter,
            _ => Period::Month,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "7d",
            Period::Month => "30d",
            Period::Quarter => "90d",
        }
    }

    pub fn days(&self) -> u64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Quarter => 90,
        }
    }

    /// `(start, end)` with `end = today` and `start = today - days`.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = today.checked_sub_days(Days::new(self.days())).unwrap_or(NaiveDate::MIN);
        (start, today)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    pub daily_work: Vec<DailyWork>,
    pub infrastructure: Vec<Infrastructure>,
    pub chambers: Vec<Chamber>,
    pub period: Period,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub work_entries: usize,
    pub total_work_done: f64,
    pub work_by_block: BTreeMap<String, f64>,
    pub infrastructure_total: usize,
    pub infrastructure_live: usize,
    pub infrastructure_not_live: usize,
    pub chambers_total: usize,
}

impl AnalyticsSnapshot {
    pub fn summary(&self) -> AnalyticsSummary {
        let mut work_by_block: BTreeMap<String, f64> = BTreeMap::new();
        for w in &self.daily_work {
            let block = w.block.clone().unwrap_or_else(|| "(none)".to_string());
            *work_by_block.entry(block).or_default() += w.work_done;
        }

        let live = self.infrastructure.iter().filter(|i| i.is_live()).count();

        AnalyticsSummary {
            work_entries: self.daily_work.len(),
            total_work_done: self.daily_work.iter().map(|w| w.work_done).sum(),
            work_by_block,
            infrastructure_total: self.infrastructure.len(),
            infrastructure_live: live,
            infrastructure_not_live: self.infrastructure.len() - live,
            chambers_total: self.chambers.len(),
        }
    }
}

impl<B: Backend> DataService<B> {
    pub async fn get_analytics_data(&self, period: Period) -> Option<AnalyticsSnapshot> {
        self.get_analytics_data_at(period, today()).await
    }

    /// Same as [`get_analytics_data`](Self::get_analytics_data) with an explicit "today".
    ///
    /// The three reads run concurrently; the first failure discards the whole
    /// snapshot.
    pub async fn get_analytics_data_at(
        &self,
        period: Period,
        today: NaiveDate,
    ) -> Option<AnalyticsSnapshot> {
        let (start, end) = period.window(today);
        let window = RecordFilter::default().between(start, end);
        let everything = RecordFilter::default();

        let joined = futures::try_join!(
            self.get_daily_work(&window),
            self.get_infrastructure(&everything),
            self.get_chambers(&everything),
        );

        match joined {
            Ok((daily_work, infrastructure, chambers)) => Some(AnalyticsSnapshot {
                daily_work,
                infrastructure,
                chambers,
                period,
            }),
            Err(e) => {
                tracing::error!(error = %e, period = period.as_str(), "Error fetching analytics data");
                None
            }
        }
    }
}

use crate::backend::Backend;
use crate::core::{DataService, Period};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{field, header};

pub async fn handle<B: Backend>(period: &str, service: &DataService<B>) -> AppResult<()> {
    let period = Period::from_token(period);

    let snapshot = service
        .get_analytics_data(period)
        .await
        .ok_or_else(|| AppError::Other("analytics data unavailable".into()))?;

    let s = snapshot.summary();

    header(format!("Analytics ({})", period.as_str()));
    field("Work entries", s.work_entries);
    field("Total work done", format!("{:.2}", s.total_work_done));
    for (block, done) in &s.work_by_block {
        field(&format!("  block {block}"), format!("{done:.2}"));
    }
    field("Infrastructure", s.infrastructure_total);
    field("  live", s.infrastructure_live);
    field("  not live", s.infrastructure_not_live);
    field("Chambers", s.chambers_total);
    Ok(())
}

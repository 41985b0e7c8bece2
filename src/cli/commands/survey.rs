use crate::backend::Backend;
use crate::cli::commands::print_rows;
use crate::core::DataService;
use crate::errors::AppResult;
use crate::models::RecordFilter;

fn block_filter(block: &Option<String>) -> RecordFilter {
    match block {
        Some(b) => RecordFilter::default().block(b),
        None => RecordFilter::default(),
    }
}

pub async fn handle_infra_info<B: Backend>(
    block: &Option<String>,
    service: &DataService<B>,
) -> AppResult<()> {
    let rows = service.get_infrastructure_info(&block_filter(block)).await?;
    print_rows(&rows)
}

pub async fn handle_chambers<B: Backend>(
    block: &Option<String>,
    service: &DataService<B>,
) -> AppResult<()> {
    let rows = service.get_chambers(&block_filter(block)).await?;
    print_rows(&rows)
}

use crate::backend::Backend;
use crate::cli::commands::print_rows;
use crate::cli::parser::{WorkAction, WorkFields};
use crate::core::DataService;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyWorkInput, RecordFilter};
use crate::ui::messages::{success, warning};

impl From<&WorkFields> for DailyWorkInput {
    fn from(f: &WorkFields) -> Self {
        Self {
            district: f.district.clone(),
            block: f.block.clone(),
            machine_number: f.machine_number.clone(),
            ring_name: f.ring_name.clone(),
            route_name: f.route_name.clone(),
            date: f.date,
            work_done: f.work_done,
            description: f.description.clone(),
        }
    }
}

pub async fn handle<B: Backend>(action: &WorkAction, service: &DataService<B>) -> AppResult<()> {
    match action {
        WorkAction::List { filter } => {
            let rows = service.get_daily_work(&RecordFilter::from(filter)).await?;
            print_rows(&rows)
        }
        WorkAction::Add { fields } => {
            let stored = service.save_daily_work(&DailyWorkInput::from(fields)).await?;
            success(format!(
                "Daily work #{} saved for {} ({})",
                stored.id, fields.block, fields.date
            ));
            Ok(())
        }
        WorkAction::Update { id, fields } => {
            let updated = service
                .update_daily_work(id, &DailyWorkInput::from(fields))
                .await?;
            if updated.is_empty() {
                return Err(AppError::NotFound(format!("daily work #{id}")));
            }
            success(format!("Daily work #{id} updated"));
            Ok(())
        }
        WorkAction::Del { id } => {
            service.delete_daily_work(id).await?;
            warning(format!("Daily work #{id} deleted"));
            Ok(())
        }
    }
}

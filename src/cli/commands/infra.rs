use crate::backend::Backend;
use crate::cli::commands::print_rows;
use crate::cli::parser::{InfraAction, InfraFields};
use crate::core::DataService;
use crate::errors::AppResult;
use crate::models::{InfrastructureInput, RecordFilter};
use crate::ui::messages::success;

impl From<&InfraFields> for InfrastructureInput {
    fn from(f: &InfraFields) -> Self {
        Self {
            block: f.block.clone(),
            gp_name: f.gp_name.clone(),
            ring_name: f.ring_name.clone(),
            building: f.building.clone(),
            router_category: f.router_category.clone(),
            router_status: f.router_status.clone(),
            status: f.status.clone(),
            electricity_meter: f.electricity_meter.clone(),
            live_status: f.live_status.clone(),
            live_date: f.live_date,
            not_live_reason: f.not_live_reason.clone(),
            notes: f.notes.clone(),
        }
    }
}

pub async fn handle<B: Backend>(action: &InfraAction, service: &DataService<B>) -> AppResult<()> {
    match action {
        InfraAction::List { filter } => {
            let rows = service
                .get_infrastructure(&RecordFilter::from(filter))
                .await?;
            print_rows(&rows)
        }
        InfraAction::Add { fields } => {
            let stored = service
                .save_infrastructure(&InfrastructureInput::from(fields))
                .await?;
            success(format!(
                "Infrastructure #{} saved for GP {} ({})",
                stored.id, fields.gp_name, fields.block
            ));
            Ok(())
        }
    }
}

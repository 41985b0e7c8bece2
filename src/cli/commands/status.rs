use crate::backend::Backend;
use crate::core::DataService;
use crate::errors::AppResult;
use crate::ui::messages::{field, success, warning};

pub async fn handle<B: Backend>(service: &DataService<B>) -> AppResult<()> {
    field("Backend", service.backend().name());

    match service.check_system_status().await {
        Ok(rows) => {
            success("Backend reachable");
            if let Some(row) = rows.first() {
                field("Last status", row);
            }
        }
        Err(e) => warning(format!("System status check failed: {e}")),
    }

    let tables = service.list_tables().await?;
    field("Tables", tables.join(", "));
    Ok(())
}

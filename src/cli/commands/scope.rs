use crate::backend::Backend;
use crate::cli::commands::print_rows;
use crate::cli::parser::ScopeAction;
use crate::core::DataService;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub async fn handle<B: Backend>(action: &ScopeAction, service: &DataService<B>) -> AppResult<()> {
    match action {
        ScopeAction::List => {
            let rows = service.get_work_scope().await?;
            print_rows(&rows)
        }
        ScopeAction::Set { block, total } => {
            service.save_work_scope(block, *total).await?;
            success(format!("Scope of block {block} set to {total}"));
            Ok(())
        }
    }
}

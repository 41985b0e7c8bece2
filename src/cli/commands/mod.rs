pub mod analytics;
pub mod config;
pub mod export;
pub mod infra;
pub mod init;
pub mod scope;
pub mod status;
pub mod survey;
pub mod upload;
pub mod work;

use crate::cli::parser::FilterArgs;
use crate::errors::AppResult;
use crate::export::{ExportRow, build_sheet, cell_text};
use crate::models::RecordFilter;
use crate::ui::messages::info;
use crate::utils::table::TextTable;

impl From<&FilterArgs> for RecordFilter {
    fn from(args: &FilterArgs) -> Self {
        let mut filter = RecordFilter::default();
        if let Some(b) = &args.block {
            filter = filter.block(b);
        }
        if let Some(s) = &args.live_status {
            filter = filter.live_status(s);
        }
        filter.start_date = args.from;
        filter.end_date = args.to;
        filter
    }
}

/// Print records as an aligned text table (same columns as the export).
pub(crate) fn print_rows<T: ExportRow>(rows: &[T]) -> AppResult<()> {
    if rows.is_empty() {
        info("No records found.");
        return Ok(());
    }

    let sheet = build_sheet(rows)?;
    let mut table = TextTable::new(sheet.headers.clone());
    for r in &sheet.rows {
        table.add_row(r.iter().map(cell_text).collect());
    }

    print!("{}", table.render());
    println!("{} record(s)", rows.len());
    Ok(())
}

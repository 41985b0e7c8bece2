use crate::backend::Backend;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::export_file_name;
use crate::core::{DataService, DataType, ExportOptions};
use crate::errors::{AppError, AppResult};
use crate::models::RecordFilter;
use crate::ui::messages::{info, warning};
use crate::utils::date::today;
use crate::utils::path::expand_tilde;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Chiede conferma prima di sovrascrivere un export esistente.
fn confirm_overwrite(path: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    Ok(ans == "y" || ans == "yes")
}

pub async fn handle<B: Backend>(
    cmd: &Commands,
    service: &DataService<B>,
    cfg: &Config,
) -> AppResult<()> {
    if let Commands::Export {
        data_type,
        filter,
        format,
        dir,
        force,
    } = cmd
    {
        // token non valido: errore prima di qualsiasi chiamata al backend
        let data_type: DataType = data_type.parse()?;

        let mut options = ExportOptions {
            dir: expand_tilde(dir.as_deref().unwrap_or(&cfg.export_dir)),
            format: *format,
            force: *force,
        };

        let target = options
            .dir
            .join(export_file_name(data_type, today(), options.format));
        if target.exists() && !options.force {
            if !confirm_overwrite(&target)? {
                return Err(AppError::Export(
                    "export cancelled: existing file not overwritten".into(),
                ));
            }
            info("Existing file will be overwritten.");
            options.force = true;
        }

        let report = service
            .export(data_type, &RecordFilter::from(filter), &options)
            .await?;
        println!("{} ({} rows)", report.file_name, report.rows);
    }
    Ok(())
}

// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use std::path::Path;

/// Verifica se un file può essere creato o sovrascritto.
///
/// - La cartella di destinazione viene creata se manca
/// - Se il file NON esiste → Ok
/// - Se esiste → Ok solo con `force`, altrimenti `AppError::Export`
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Ok(())
}

use crate::backend::Backend;
use crate::config::Config;
use crate::core::DataService;
use crate::errors::AppResult;
use crate::ui::messages::{field, success};
use crate::utils::path::expand_tilde;

pub async fn handle<B: Backend>(
    file: &str,
    bucket: &Option<String>,
    service: &DataService<B>,
    cfg: &Config,
) -> AppResult<()> {
    let bucket = bucket.as_deref().unwrap_or(&cfg.default_bucket);

    let report = service
        .upload_file(&expand_tilde(file), Some(bucket))
        .await?;

    success("Upload completed");
    field("File name", &report.file_name);
    field("URL", &report.url);
    Ok(())
}

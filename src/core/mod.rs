pub mod analytics;
pub mod export;
pub mod service;
pub mod upload;

pub use analytics::{AnalyticsSnapshot, AnalyticsSummary, Period};
pub use export::{DataType, ExportOptions, ExportReport};
pub use service::DataService;
pub use upload::{DEFAULT_BUCKET, UploadReport};

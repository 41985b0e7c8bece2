mod common;

use chrono::Utc;
use common::{RecordingBackend, date, infra_input, local_service, temp_dir, work_input};
use infratrack::core::export::export_file_name;
use infratrack::core::{DataService, DataType, ExportOptions};
use infratrack::errors::AppError;
use infratrack::export::{ExportFormat, build_sheet};
use infratrack::models::{DailyWork, RecordFilter};
use std::fs;

fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

fn options(dir: &std::path::Path, format: ExportFormat) -> ExportOptions {
    ExportOptions {
        dir: dir.to_path_buf(),
        format,
        force: false,
    }
}

#[test]
fn test_export_file_names() {
    let d = date("2024-05-09");
    assert_eq!(
        export_file_name(DataType::DailyWork, d, ExportFormat::Xlsx),
        "Daily_Work_2024-05-09.xlsx"
    );
    assert_eq!(
        export_file_name(DataType::Infrastructure, d, ExportFormat::Csv),
        "Infrastructure_2024-05-09.csv"
    );
    assert_eq!(
        export_file_name(DataType::Chambers, d, ExportFormat::Json),
        "Chambers_2024-05-09.json"
    );
}

#[test]
fn test_data_type_tokens() {
    assert_eq!("daily-work".parse::<DataType>().unwrap(), DataType::DailyWork);
    assert_eq!(
        "infrastructure".parse::<DataType>().unwrap(),
        DataType::Infrastructure
    );
    assert_eq!("chambers".parse::<DataType>().unwrap(), DataType::Chambers);
    assert!(matches!(
        "Daily-Work".parse::<DataType>(),
        Err(AppError::InvalidDataType(_))
    ));
}

#[tokio::test]
async fn test_export_empty_daily_work_still_writes_workbook() {
    let dir = temp_dir("export_empty");
    let service = local_service();

    let report = service
        .export_named(
            "daily-work",
            &RecordFilter::default(),
            &options(&dir, ExportFormat::Xlsx),
        )
        .await
        .expect("export");

    assert_eq!(report.rows, 0);
    assert_eq!(report.file_name, format!("Daily_Work_{}.xlsx", today()));
    assert_eq!(report.path, dir.join(&report.file_name));

    let bytes = fs::read(&report.path).expect("workbook written");
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
}

#[tokio::test]
async fn test_unknown_data_type_fails_before_any_backend_call() {
    let dir = temp_dir("export_unknown");
    let backend = RecordingBackend::new(
        infratrack::backend::LocalBackend::in_memory(common::PUBLIC_BASE).unwrap(),
    );
    let service = DataService::new(backend);

    let err = service
        .export_named(
            "unknown-type",
            &RecordFilter::default(),
            &options(&dir, ExportFormat::Xlsx),
        )
        .await
        .expect_err("invalid type");

    assert!(matches!(err, AppError::InvalidDataType(ref t) if t == "unknown-type"));
    assert_eq!(service.backend().calls(), 0);
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_export_csv_applies_filters() {
    let dir = temp_dir("export_csv");
    let service = local_service();

    service
        .save_daily_work(&work_input("B12", "2024-01-10", 120.0))
        .await
        .unwrap();
    service
        .save_daily_work(&work_input("C07", "2024-01-11", 80.0))
        .await
        .unwrap();

    let report = service
        .export(
            DataType::DailyWork,
            &RecordFilter::default().block("B12"),
            &options(&dir, ExportFormat::Csv),
        )
        .await
        .expect("export");

    assert_eq!(report.rows, 1);
    let content = fs::read_to_string(&report.path).expect("read csv");
    let mut lines = content.lines();
    assert!(lines.next().unwrap().starts_with("id,district,block,machine_number"));
    let row = lines.next().expect("one data row");
    assert!(row.contains("B12"));
    assert!(row.contains("2024-01-10"));
    assert!(lines.next().is_none());
}

#[tokio::test]
async fn test_export_infrastructure_json() {
    let dir = temp_dir("export_json");
    let service = local_service();

    service
        .save_infrastructure(&infra_input("B12", "Jatni", "Live"))
        .await
        .unwrap();

    let report = service
        .export(
            DataType::Infrastructure,
            &RecordFilter::default(),
            &options(&dir, ExportFormat::Json),
        )
        .await
        .expect("export");

    let content = fs::read_to_string(&report.path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    assert_eq!(parsed[0]["gp_name"], "Jatni");
}

#[tokio::test]
async fn test_export_overwrites_with_force() {
    let dir = temp_dir("export_force");
    let service = local_service();
    let mut opts = options(&dir, ExportFormat::Xlsx);
    opts.force = true;

    let first = service
        .export(DataType::Chambers, &RecordFilter::default(), &opts)
        .await
        .unwrap();
    let second = service
        .export(DataType::Chambers, &RecordFilter::default(), &opts)
        .await
        .unwrap();

    assert_eq!(first.path, second.path);
    assert!(second.path.exists());
}

#[test]
fn test_sheet_headers_follow_declared_columns() {
    let rows: Vec<DailyWork> = Vec::new();
    let sheet = build_sheet(&rows).unwrap();
    assert_eq!(sheet.headers.first().map(String::as_str), Some("id"));
    assert!(sheet.headers.iter().any(|h| h == "work_date"));
    assert!(sheet.rows.is_empty());
}

#[tokio::test]
async fn test_existing_file_is_kept_without_force() {
    let dir = temp_dir("export_no_force");
    let service = local_service();
    let opts = options(&dir, ExportFormat::Csv);

    let first = service
        .export(DataType::DailyWork, &RecordFilter::default(), &opts)
        .await
        .unwrap();
    let before = fs::read_to_string(&first.path).unwrap();

    service
        .save_daily_work(&work_input("B12", "2024-01-10", 120.0))
        .await
        .unwrap();

    let err = service
        .export(DataType::DailyWork, &RecordFilter::default(), &opts)
        .await
        .expect_err("no silent overwrite");
    assert!(matches!(err, AppError::Export(_)));
    assert_eq!(fs::read_to_string(&first.path).unwrap(), before);
}

mod common;

use common::{date, infra_input, local_service, seed_chamber, work_input};
use infratrack::backend::{Backend, LocalBackend, Predicate, Query, RestBackend, Table};
use infratrack::core::DataService;
use infratrack::errors::AppError;
use infratrack::models::{RecordFilter, RecordId};
use serde_json::json;

#[tokio::test]
async fn test_save_work_scope_upserts_by_block() {
    let service = local_service();

    service.save_work_scope("B12", 450.0).await.expect("first save");
    let second = service.save_work_scope("B12", 500.0).await.expect("second save");
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].total_scope, 500.0);

    service.save_work_scope("A03", 120.0).await.expect("other block");

    let scope = service.get_work_scope().await.expect("list scope");
    let b12: Vec<_> = scope.iter().filter(|s| s.block == "B12").collect();
    assert_eq!(b12.len(), 1);
    assert_eq!(b12[0].total_scope, 500.0);
    assert!(b12[0].updated_at.is_some());

    // ordinati per block crescente
    let blocks: Vec<&str> = scope.iter().map(|s| s.block.as_str()).collect();
    assert_eq!(blocks, vec!["A03", "B12"]);
}

#[tokio::test]
async fn test_daily_work_date_range_inclusive_and_descending() {
    let service = local_service();

    for day in ["2023-12-31", "2024-01-01", "2024-01-15", "2024-01-31", "2024-02-01"] {
        service
            .save_daily_work(&work_input("B12", day, 100.0))
            .await
            .expect("save work");
    }

    let filter = RecordFilter::default().between(date("2024-01-01"), date("2024-01-31"));
    let rows = service.get_daily_work(&filter).await.expect("list work");

    let days: Vec<String> = rows
        .iter()
        .filter_map(|w| w.work_date)
        .map(|d| d.to_string())
        .collect();
    assert_eq!(days, vec!["2024-01-31", "2024-01-15", "2024-01-01"]);
}

#[tokio::test]
async fn test_daily_work_block_filter_and_sentinel() {
    let service = local_service();

    service
        .save_daily_work(&work_input("B12", "2024-03-01", 50.0))
        .await
        .unwrap();
    service
        .save_daily_work(&work_input("C07", "2024-03-02", 75.0))
        .await
        .unwrap();

    let b12 = service
        .get_daily_work(&RecordFilter::default().block("B12"))
        .await
        .unwrap();
    assert_eq!(b12.len(), 1);
    assert_eq!(b12[0].block.as_deref(), Some("B12"));

    let literal_all = RecordFilter {
        block: Some("all".into()),
        ..Default::default()
    };
    let all = service.get_daily_work(&literal_all).await.unwrap();
    let none = service.get_daily_work(&RecordFilter::default()).await.unwrap();
    assert_eq!(all, none);
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_save_daily_work_maps_columns_and_stamps_created_at() {
    let service = local_service();

    let stored = service
        .save_daily_work(&work_input("B12", "2024-01-05", 320.5))
        .await
        .expect("save work");

    assert!(stored.id.as_i64().is_some_and(|n| n > 0));
    assert_eq!(stored.work_date, Some(date("2024-01-05")));
    assert_eq!(stored.machine_number.as_deref(), Some("HDD-07"));
    assert_eq!(stored.route_name.as_deref(), Some("GP Jatni - GP Bhubaneswar"));
    assert_eq!(stored.work_done, 320.5);
    assert!(stored.created_at.is_some());
    assert!(stored.updated_at.is_none());
}

#[tokio::test]
async fn test_update_and_delete_daily_work_by_id() {
    let service = local_service();

    let first = service
        .save_daily_work(&work_input("B12", "2024-01-05", 100.0))
        .await
        .unwrap();
    let second = service
        .save_daily_work(&work_input("B12", "2024-01-06", 200.0))
        .await
        .unwrap();

    let mut changed = work_input("B13", "2024-01-07", 150.0);
    changed.description = None;
    let updated = service
        .update_daily_work(&first.id, &changed)
        .await
        .expect("update");
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].block.as_deref(), Some("B13"));
    assert_eq!(updated[0].description, None);
    assert!(updated[0].updated_at.is_some());

    service.delete_daily_work(&second.id).await.expect("delete");

    let left = service
        .get_daily_work(&RecordFilter::default())
        .await
        .unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, first.id);
    assert_eq!(left[0].work_done, 150.0);

    // id inesistente: nessuna riga toccata, nessun errore
    let none = service
        .update_daily_work(&RecordId::Int(9999), &changed)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_infrastructure_filters() {
    let service = local_service();

    service
        .save_infrastructure(&infra_input("B12", "Jatni", "Live"))
        .await
        .unwrap();
    service
        .save_infrastructure(&infra_input("B12", "Mendhasal", "Not Live"))
        .await
        .unwrap();
    service
        .save_infrastructure(&infra_input("C07", "Balianta", "Live"))
        .await
        .unwrap();

    let live_b12 = service
        .get_infrastructure(&RecordFilter::default().block("B12").live_status("Live"))
        .await
        .unwrap();
    assert_eq!(live_b12.len(), 1);
    assert_eq!(live_b12[0].gp_name.as_deref(), Some("Jatni"));
    assert!(live_b12[0].is_live());

    let everything = service
        .get_infrastructure(&RecordFilter::default().block("all").live_status("all"))
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);
}

#[tokio::test]
async fn test_survey_tables_keep_extra_columns() {
    let backend = LocalBackend::in_memory(common::PUBLIC_BASE).unwrap();
    seed_chamber(&backend, "B12", "CH-001").await;
    seed_chamber(&backend, "C07", "CH-002").await;
    backend
        .insert(
            Table::InfrastructureInfo,
            json!({"block": "B12", "olt_port": "1/1/3", "created_at": "2024-01-02T00:00:00.000Z"}),
        )
        .await
        .unwrap();
    let service = DataService::new(backend);

    let chambers = service
        .get_chambers(&RecordFilter::default().block("B12"))
        .await
        .unwrap();
    assert_eq!(chambers.len(), 1);
    assert_eq!(chambers[0].extra.get("chamber_number"), Some(&json!("CH-001")));

    let info = service
        .get_infrastructure_info(&RecordFilter::default())
        .await
        .unwrap();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0].extra.get("olt_port"), Some(&json!("1/1/3")));
}

#[tokio::test]
async fn test_read_errors_are_surfaced_not_empty() {
    // nessun server in ascolto: la connessione viene rifiutata
    let remote = RestBackend::new("http://127.0.0.1:9", "test-key").expect("client");
    let service = DataService::new(remote);

    let err = service.get_work_scope().await.expect_err("must fail");
    assert!(matches!(err, AppError::Http(_)));
}

#[tokio::test]
async fn test_local_backend_rejects_unknown_columns() {
    let backend = LocalBackend::in_memory(common::PUBLIC_BASE).unwrap();

    let err = backend
        .select(&Query::from(Table::DailyWork).eq("block; DROP TABLE daily_work", "x"))
        .await
        .expect_err("unknown column");
    assert!(matches!(err, AppError::UnknownColumn { .. }));

    let err = backend
        .insert(Table::WorkScope, json!({"block": "B1", "colour": "red"}))
        .await
        .expect_err("unknown column");
    assert!(matches!(err, AppError::UnknownColumn { ref column, .. } if column == "colour"));

    let err = backend
        .delete(Table::DailyWork, &Predicate::eq("nope", 1))
        .await
        .expect_err("unknown column");
    assert!(matches!(err, AppError::UnknownColumn { .. }));
}

#[tokio::test]
async fn test_health_check_and_table_listing() {
    let service = local_service();

    let status = service.check_system_status().await.expect("status");
    assert!(status.is_empty());

    let tables = service.list_tables().await.expect("tables");
    for t in Table::ALL {
        assert!(tables.iter().any(|n| n == t.as_str()), "missing {t}");
    }
    assert!(!tables.iter().any(|n| n == "log"));
}

#[tokio::test]
async fn test_local_database_file_persists_between_opens() {
    let db = common::setup_test_db("persist");

    {
        let service = DataService::new(LocalBackend::open(&db, common::PUBLIC_BASE).unwrap());
        service.save_work_scope("B12", 450.0).await.unwrap();
    }

    let service = DataService::new(LocalBackend::open(&db, common::PUBLIC_BASE).unwrap());
    let scope = service.get_work_scope().await.unwrap();
    assert_eq!(scope.len(), 1);
    assert_eq!(scope[0].block, "B12");

    // migrazioni registrate una sola volta
    let conn = rusqlite::Connection::open(&db).unwrap();
    let applied = infratrack::db::log::load_log(&conn, 50).unwrap();
    let migrations = applied
        .iter()
        .filter(|(_, op, _, _)| op == "migration_applied")
        .count();
    assert_eq!(migrations, 3);
}

mod common;

use common::{CannedBackend, date, work_input};
use infratrack::core::{DataService, Period};
use infratrack::models::{RecordFilter, RecordId};
use serde_json::{Value, json};

const UUID: &str = "8f14e45f-ceea-467f-a0e6-3c1a0b4a2d11";

#[test]
fn test_record_id_from_cli_text() {
    assert_eq!("42".parse::<RecordId>().unwrap(), RecordId::Int(42));
    assert_eq!(
        UUID.parse::<RecordId>().unwrap(),
        RecordId::Text(UUID.to_string())
    );
    assert_eq!(Value::from(&RecordId::Int(7)), json!(7));
    assert_eq!(RecordId::from(UUID).to_string(), UUID);
}

#[tokio::test]
async fn test_uuid_keyed_rows_decode() {
    let service = DataService::new(CannedBackend::new(vec![
        json!({"id": UUID, "block": "B12", "chamber_number": "CH-9"}),
    ]));

    let chambers = service
        .get_chambers(&RecordFilter::default())
        .await
        .expect("uuid ids are accepted");
    assert_eq!(chambers[0].id, RecordId::Text(UUID.to_string()));
    assert_eq!(chambers[0].extra.get("chamber_number"), Some(&json!("CH-9")));

    let info = service
        .get_infrastructure_info(&RecordFilter::default())
        .await
        .unwrap();
    assert_eq!(info[0].id.as_i64(), None);

    let infra = service
        .get_infrastructure(&RecordFilter::default())
        .await
        .unwrap();
    assert_eq!(infra[0].id.to_string(), UUID);
}

#[tokio::test]
async fn test_update_and_delete_pass_text_ids_through() {
    let service = DataService::new(CannedBackend::new(vec![
        json!({"id": UUID, "block": "B13", "work_date": "2024-01-07", "work_done": 150}),
    ]));
    let id = RecordId::from(UUID);

    let updated = service
        .update_daily_work(&id, &work_input("B13", "2024-01-07", 150.0))
        .await
        .unwrap();
    assert_eq!(updated[0].id, id);

    service.delete_daily_work(&id).await.unwrap();

    let filters = service.backend().filters();
    assert_eq!(filters.len(), 2);
    for f in filters {
        assert_eq!(f.column, "id");
        assert_eq!(f.value, json!(UUID));
    }
}

#[tokio::test]
async fn test_null_columns_do_not_fail_the_list() {
    let service = DataService::new(CannedBackend::new(vec![
        json!({"id": 1, "block": "B12", "work_date": "2024-03-01", "work_done": 5}),
        json!({"id": 2, "block": "B12", "work_date": null, "work_done": null}),
    ]));

    let rows = service
        .get_daily_work(&RecordFilter::default())
        .await
        .expect("null cells are tolerated");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].work_date, Some(date("2024-03-01")));
    assert_eq!(rows[1].work_date, None);
    assert_eq!(rows[1].work_done, 0.0);

    // una riga incompleta non annulla l'intero snapshot
    let snapshot = service
        .get_analytics_data_at(Period::Month, date("2024-03-03"))
        .await
        .expect("snapshot");
    assert_eq!(snapshot.summary().total_work_done, 5.0);
}

#[tokio::test]
async fn test_null_total_scope_reads_as_zero() {
    let service = DataService::new(CannedBackend::new(vec![
        json!({"id": 3, "block": "B12", "total_scope": null, "updated_at": null}),
    ]));

    let scope = service.get_work_scope().await.unwrap();
    assert_eq!(scope[0].block, "B12");
    assert_eq!(scope[0].total_scope, 0.0);
    assert_eq!(scope[0].id, Some(RecordId::Int(3)));
}

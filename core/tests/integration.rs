//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port (the server holds
//! its state per instance, so tests stay independent) and drives the real
//! client over real HTTP: request building, timeout enforcement, status and
//! content-type interpretation, and decoding are all exercised together.

use std::time::Duration;

use metrology_core::{
    ApiError, Config, CreateEquipment, EquipmentClient, EquipmentState, ListParams,
    UpdateEquipment, VerificationStatus,
};
use reqwest::Method;

async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

async fn client() -> EquipmentClient {
    let base = spawn_server().await;
    EquipmentClient::new(&Config::new(&base).unwrap())
}

fn micrometer() -> CreateEquipment {
    CreateEquipment {
        name: "Micrometer MK-25".to_string(),
        equipment_type: "micrometer".to_string(),
        serial_number: "SN-100".to_string(),
        inventory_number: "INV-100".to_string(),
        state: None,
        verification_date: chrono::NaiveDate::from_ymd_opt(2024, 2, 15),
        interval_months: Some(12),
    }
}

#[tokio::test]
async fn crud_lifecycle() {
    let client = client().await;

    // list — empty registry
    let records = client.list(&ListParams::default()).await.unwrap();
    assert!(records.is_empty(), "expected empty registry");

    // create
    let created = client.create(&micrometer()).await.unwrap();
    assert_eq!(created.name, "Micrometer MK-25");
    assert_eq!(created.state, EquipmentState::InService);
    assert_eq!(
        created.next_verification_date,
        chrono::NaiveDate::from_ymd_opt(2025, 2, 15)
    );
    assert!(created.updated_at >= created.created_at);
    let id = created.id.clone();

    // get — round-trips the created record
    let fetched = client.get(&id).await.unwrap();
    assert_eq!(fetched, created);

    // update — state only; everything else unchanged
    let patch = UpdateEquipment {
        state: Some(EquipmentState::InRepair),
        ..Default::default()
    };
    let updated = client.update(&id, &patch).await.unwrap();
    assert_eq!(updated.state, EquipmentState::InRepair);
    let refetched = client.get(&id).await.unwrap();
    assert_eq!(refetched.state, EquipmentState::InRepair);
    assert_eq!(refetched.name, created.name);
    assert_eq!(refetched.serial_number, created.serial_number);
    assert_eq!(refetched.inventory_number, created.inventory_number);
    assert_eq!(refetched.verification_date, created.verification_date);
    assert_eq!(refetched.created_at, created.created_at);

    // update — explicit null clears the schedule
    let patch = UpdateEquipment {
        verification_date: Some(None),
        interval_months: Some(None),
        ..Default::default()
    };
    let cleared = client.update(&id, &patch).await.unwrap();
    assert!(cleared.verification_date.is_none());
    assert!(cleared.next_verification_date.is_none());

    // delete — empty-body success
    client.remove(&id).await.unwrap();

    // get after delete — 404 surfaced, not swallowed
    let err = client.get(&id).await.unwrap_err();
    assert!(err.is_not_found(), "expected 404, got {err}");

    // delete again — 404
    let err = client.remove(&id).await.unwrap_err();
    assert!(err.is_not_found());

    // list — empty again
    let records = client.list(&ListParams::default()).await.unwrap();
    assert!(records.is_empty(), "expected empty registry after delete");
}

#[tokio::test]
async fn list_applies_filters_and_pagination() {
    let client = client().await;

    for (name, kind, serial) in [
        ("Bore gauge", "gauge", "SN-10"),
        ("Caliper 150", "caliper", "SN-11"),
        ("Caliper 300", "caliper", "SN-12"),
    ] {
        client
            .create(&CreateEquipment {
                name: name.to_string(),
                equipment_type: kind.to_string(),
                serial_number: serial.to_string(),
                inventory_number: format!("{serial}-INV"),
                state: None,
                verification_date: None,
                interval_months: None,
            })
            .await
            .unwrap();
    }

    let by_type = client
        .list(&ListParams {
            equipment_type: Some("caliper".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_type.len(), 2);
    assert_eq!(by_type[0].name, "Caliper 150");

    let by_search = client
        .list(&ListParams {
            q: Some("sn-10".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].name, "Bore gauge");

    // Blank filters are dropped from the query entirely.
    let with_blanks = client
        .list(&ListParams {
            name: Some("   ".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(with_blanks.len(), 3);

    let page = client
        .list(&ListParams {
            limit: Some(1),
            offset: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Caliper 150");
}

#[tokio::test]
async fn derive_status_agrees_with_server_summary() {
    let client = client().await;

    let overdue = client
        .create(&CreateEquipment {
            name: "Old gauge".to_string(),
            equipment_type: "gauge".to_string(),
            serial_number: "SN-30".to_string(),
            inventory_number: "INV-30".to_string(),
            state: None,
            verification_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 15),
            interval_months: Some(12),
        })
        .await
        .unwrap();

    assert_eq!(overdue.status.as_deref(), Some("overdue"));
    let today = chrono::Utc::now().date_naive();
    assert_eq!(
        metrology_core::derive_status(&overdue, today),
        VerificationStatus::Overdue
    );
}

#[tokio::test]
async fn slow_server_fails_with_timeout() {
    // A listener that accepts connections but never responds.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            // Hold the socket open without answering.
            tokio::spawn(async move {
                let _socket = socket;
                tokio::time::sleep(Duration::from_secs(60)).await;
            });
        }
    });

    let config = Config::new(&format!("http://{addr}"))
        .unwrap()
        .with_timeout(Duration::from_millis(200));
    let client = EquipmentClient::new(&config);

    let err = client.list(&ListParams::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout), "got {err}");
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    // Bind then drop to find a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = EquipmentClient::new(&Config::new(&format!("http://{addr}")).unwrap());
    let err = client.get("some-id").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err}");
}

#[tokio::test]
async fn not_found_carries_status_and_body() {
    let client = client().await;

    let err = client.get("00000000-0000-0000-0000-000000000000").await.unwrap_err();
    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status, 404);
            assert!(body.unwrap().contains("Equipment not found"));
        }
        other => panic!("expected Http error, got {other}"),
    }
}

#[tokio::test]
async fn non_json_success_yields_empty_result() {
    let base = spawn_server().await;
    let http = metrology_core::http::Http::new(&Config::new(&base).unwrap());

    // /health answers 200 text/plain; the request layer must not try to
    // parse it as JSON.
    let url = http.url(&["health"], false, "");
    let result = http
        .request::<serde_json::Value, ()>(Method::GET, url, None)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_yields_empty_result_without_parse() {
    let base = spawn_server().await;
    let config = Config::new(&base).unwrap();
    let client = EquipmentClient::new(&config);
    let http = metrology_core::http::Http::new(&config);

    let created = client.create(&micrometer()).await.unwrap();

    // 204 from DELETE comes back as Ok(None) at the request layer.
    let url = http.url(&["equipment", &created.id], false, "");
    let result = http
        .request::<serde_json::Value, ()>(Method::DELETE, url, None)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn ids_are_percent_encoded_into_the_path() {
    let client = client().await;

    // An id with reserved characters must not break the path; the server
    // rejects it as an unknown UUID rather than a routing error.
    let err = client.get("id with spaces/и").await.unwrap_err();
    match err {
        ApiError::Http { status, .. } => assert_eq!(status, 400),
        other => panic!("expected Http error, got {other}"),
    }
}

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{Months, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use serde_with::rust::double_option;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ALLOWED_STATES: [&str; 5] = [
    "in-service",
    "in-storage",
    "pending-verification",
    "in-repair",
    "decommissioned",
];

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 200;
const DUE_SOON_WINDOW_DAYS: i64 = 30;

#[derive(Clone, Debug)]
pub struct StoredEquipment {
    pub id: Uuid,
    pub name: String,
    pub equipment_type: String,
    pub serial_number: String,
    pub inventory_number: String,
    pub state: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub verification_date: Option<NaiveDate>,
    pub interval_months: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EquipmentRead {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub serial_number: String,
    pub inventory_number: String,
    pub state: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub verification_date: Option<NaiveDate>,
    pub interval_months: Option<u32>,
    pub next_verification_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct CreateEquipment {
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub serial_number: String,
    pub inventory_number: String,
    pub state: Option<String>,
    pub verification_date: Option<NaiveDate>,
    pub interval_months: Option<u32>,
}

/// PATCH payload with three-state fields: absent leaves the stored value,
/// explicit null clears it, a value sets it.
#[derive(Deserialize, Default)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub serial_number: Option<String>,
    pub inventory_number: Option<String>,
    pub state: Option<String>,
    #[serde(default, with = "double_option")]
    pub verification_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "double_option")]
    pub interval_months: Option<Option<u32>>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, StoredEquipment>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        // Trailing slash on the collection path is significant.
        .route("/equipment/", get(list_equipment).post(create_equipment))
        .route(
            "/equipment/{id}",
            get(get_equipment)
                .patch(update_equipment)
                .delete(delete_equipment),
        )
        .route("/health", get(health))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn next_verification_date(record: &StoredEquipment) -> Option<NaiveDate> {
    match (record.verification_date, record.interval_months) {
        (Some(date), Some(months)) => date.checked_add_months(Months::new(months)),
        _ => None,
    }
}

fn status_summary(record: &StoredEquipment, today: NaiveDate) -> String {
    let Some(next) = next_verification_date(record) else {
        return "no schedule".to_string();
    };
    if next < today {
        "overdue".to_string()
    } else if (next - today).num_days() <= DUE_SOON_WINDOW_DAYS {
        "due soon".to_string()
    } else {
        "current".to_string()
    }
}

fn read_view(record: &StoredEquipment) -> EquipmentRead {
    let today = Utc::now().date_naive();
    EquipmentRead {
        id: record.id,
        name: record.name.clone(),
        equipment_type: record.equipment_type.clone(),
        serial_number: record.serial_number.clone(),
        inventory_number: record.inventory_number.clone(),
        state: record.state.clone(),
        status: status_summary(record, today),
        created_at: record.created_at,
        updated_at: record.updated_at,
        verification_date: record.verification_date,
        interval_months: record.interval_months,
        next_verification_date: next_verification_date(record),
    }
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Equipment not found" })),
    )
}

fn invalid_state(state: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": format!("invalid state: {state}") })),
    )
}

/// Lenient int parsing with bounds, matching the service's pagination rules.
fn to_int(value: Option<&String>, default: usize, min: usize, max: Option<usize>) -> usize {
    let mut v = value
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(default);
    if v < min {
        v = min;
    }
    if let Some(max) = max {
        if v > max {
            v = max;
        }
    }
    v
}

fn matches_filters(record: &StoredEquipment, params: &HashMap<String, String>) -> bool {
    if let Some(q) = params.get("q").filter(|q| !q.is_empty()) {
        let needle = q.to_lowercase();
        let haystacks = [
            &record.name,
            &record.equipment_type,
            &record.serial_number,
            &record.inventory_number,
        ];
        if !haystacks
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        {
            return false;
        }
    }
    let exact = [
        ("name", &record.name),
        ("type", &record.equipment_type),
        ("serial_number", &record.serial_number),
        ("inventory_number", &record.inventory_number),
    ];
    for (key, field) in exact {
        if let Some(expected) = params.get(key).filter(|v| !v.is_empty()) {
            if expected != field {
                return false;
            }
        }
    }
    true
}

async fn list_equipment(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<EquipmentRead>> {
    let limit = to_int(params.get("limit"), DEFAULT_LIMIT, 1, Some(MAX_LIMIT));
    let offset = to_int(params.get("offset"), 0, 0, None);

    let records = db.read().await;
    let mut matching: Vec<&StoredEquipment> = records
        .values()
        .filter(|record| matches_filters(record, &params))
        .collect();
    matching.sort_by(|a, b| a.name.cmp(&b.name));

    Json(
        matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(read_view)
            .collect(),
    )
}

async fn create_equipment(
    State(db): State<Db>,
    Json(input): Json<CreateEquipment>,
) -> Result<(StatusCode, Json<EquipmentRead>), (StatusCode, Json<Value>)> {
    let state = input.state.unwrap_or_else(|| "in-service".to_string());
    if !ALLOWED_STATES.contains(&state.as_str()) {
        return Err(invalid_state(&state));
    }
    let now = Utc::now().naive_utc();
    let record = StoredEquipment {
        id: Uuid::new_v4(),
        name: input.name,
        equipment_type: input.equipment_type,
        serial_number: input.serial_number,
        inventory_number: input.inventory_number,
        state,
        created_at: now,
        updated_at: now,
        verification_date: input.verification_date,
        interval_months: input.interval_months,
    };
    let view = read_view(&record);
    db.write().await.insert(record.id, record);
    Ok((StatusCode::CREATED, Json(view)))
}

async fn get_equipment(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<EquipmentRead>, (StatusCode, Json<Value>)> {
    let records = db.read().await;
    records
        .get(&id)
        .map(|record| Json(read_view(record)))
        .ok_or_else(not_found)
}

async fn update_equipment(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateEquipment>,
) -> Result<Json<EquipmentRead>, (StatusCode, Json<Value>)> {
    let mut records = db.write().await;
    let record = records.get_mut(&id).ok_or_else(not_found)?;

    if let Some(state) = &input.state {
        if !ALLOWED_STATES.contains(&state.as_str()) {
            return Err(invalid_state(state));
        }
    }
    if let Some(name) = input.name {
        record.name = name;
    }
    if let Some(equipment_type) = input.equipment_type {
        record.equipment_type = equipment_type;
    }
    if let Some(serial_number) = input.serial_number {
        record.serial_number = serial_number;
    }
    if let Some(inventory_number) = input.inventory_number {
        record.inventory_number = inventory_number;
    }
    if let Some(state) = input.state {
        record.state = state;
    }
    if let Some(verification_date) = input.verification_date {
        record.verification_date = verification_date;
    }
    if let Some(interval_months) = input.interval_months {
        record.interval_months = interval_months;
    }
    record.updated_at = Utc::now().naive_utc();

    Ok(Json(read_view(record)))
}

async fn delete_equipment(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut records = db.write().await;
    records
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(not_found)
}

async fn health() -> &'static str {
    "ok"
}

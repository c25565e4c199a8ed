//! Domain DTOs for the equipment registry API.
//!
//! # Design
//! These types mirror the service schema but are defined independently from
//! the mock-server crate; integration tests catch schema drift. Identifiers
//! stay opaque `String`s — the server happens to mint UUIDs, but nothing
//! here depends on that.
//!
//! The PATCH payload keeps three-state semantics per nullable field: a
//! missing field leaves the server value unchanged, an explicit `null`
//! clears it, and a value sets it. Plain `Option` cannot express that, so
//! nullable fields use `Option<Option<T>>` with serde_with's
//! `double_option`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

/// Operator-assigned lifecycle state of a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentState {
    InService,
    InStorage,
    PendingVerification,
    InRepair,
    Decommissioned,
}

/// A registry entry as returned by the server.
///
/// `status` is a server-computed display summary and is treated as opaque.
/// The verification schedule arrives flattened: `next_verification_date` is
/// derived server-side and, when present, is authoritative — see
/// [`derive_status`](crate::schedule::derive_status) for the local fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub serial_number: String,
    pub inventory_number: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub state: EquipmentState,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub verification_date: Option<NaiveDate>,
    #[serde(default)]
    pub interval_months: Option<u32>,
    #[serde(default)]
    pub next_verification_date: Option<NaiveDate>,
}

/// Request payload for registering new equipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEquipment {
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub serial_number: String,
    pub inventory_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EquipmentState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_months: Option<u32>,
}

/// Partial-update payload. Only fields present in the JSON are applied.
///
/// `verification_date` and `interval_months` are nullable server-side, so
/// they carry the full absent / null / value distinction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEquipment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EquipmentState>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub verification_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub interval_months: Option<Option<u32>>,
}

/// Filters and pagination for [`EquipmentClient::list`](crate::EquipmentClient::list).
///
/// `q` is a free-text search over name, type, serial and inventory numbers;
/// the remaining string filters are exact matches. All fields are optional;
/// the default value requests an unfiltered page per server defaults.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub q: Option<String>,
    pub name: Option<String>,
    pub equipment_type: Option<String>,
    pub serial_number: Option<String>,
    pub inventory_number: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
